use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use thiserror::Error;

lazy_static! {
    /// 出品URLの `i.<shop_id>.<item_id>` 部分
    static ref LISTING_ID_RE: Regex = Regex::new(r"i\.(\d+)\.(\d+)").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("listing URL is empty")]
    Empty,

    #[error("no i.<shop_id>.<item_id> segment in {0}")]
    NoIdentifier(String),
}

/// 出品の識別子（どちらも数字のみの文字列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingIdentifier {
    pub shop_id: String,
    pub item_id: String,
}

impl fmt::Display for ListingIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i.{}.{}", self.shop_id, self.item_id)
    }
}

/// 出品URLから識別子を抽出
///
/// 実在する出品かどうかは確認しない（取得時に判明する）
pub fn parse_listing_url(url: &str) -> Result<ListingIdentifier, UrlError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlError::Empty);
    }

    let caps = LISTING_ID_RE
        .captures(url)
        .ok_or_else(|| UrlError::NoIdentifier(url.to_string()))?;

    Ok(ListingIdentifier {
        shop_id: caps[1].to_string(),
        item_id: caps[2].to_string(),
    })
}
