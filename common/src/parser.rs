//! レスポンスパーサー
//!
//! - 判定サービスの自由文応答を Verdict に正規化
//! - マーケットプレイスの商品詳細JSONから画像IDを抽出

use crate::error::Result;
use crate::prompts::PASS_TOKEN;
use crate::types::Verdict;
use serde_json::Value;

/// 判定サービスの応答を Verdict に変換
///
/// 前後の空白を除いて `Pass` と完全一致した場合のみ Pass。
/// `Not Pass`、空文字、大文字小文字違いなどはすべて NotPass になる。
/// 照合規則を変える場合はこの関数だけを差し替える。
pub fn normalize_verdict(response: &str) -> Verdict {
    if response.trim() == PASS_TOKEN {
        Verdict::Pass
    } else {
        Verdict::NotPass
    }
}

/// 商品詳細JSONから `data.product_info.images` を取り出す
///
/// # Returns
/// * `Ok(Vec<String>)` - 画像ID（出品の並び順のまま）。パスが無い場合は空
/// * `Err` - JSONとして不正
pub fn extract_image_ids(body: &str) -> Result<Vec<String>> {
    let payload: Value = serde_json::from_str(body)?;

    let ids = payload
        .pointer("/data/product_info/images")
        .and_then(Value::as_array)
        .map(|images| {
            images
                .iter()
                .filter_map(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ids)
}

/// 画像IDを公開CDNのURLに変換
pub fn cdn_image_url(prefix: &str, image_id: &str) -> String {
    if prefix.ends_with('/') {
        format!("{}{}", prefix, image_id)
    } else {
        format!("{}/{}", prefix, image_id)
    }
}
