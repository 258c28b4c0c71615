//! プロンプト生成モジュール
//!
//! 判定サービスに渡す固定の指示文

/// 真正品と判断した場合の応答トークン
pub const PASS_TOKEN: &str = "Pass";

/// 偽物の疑いがある場合の応答トークン
pub const NOT_PASS_TOKEN: &str = "Not Pass";

/// 参照画像（1枚目）と出品画像（2枚目）を比較させる指示文
pub const AUTHENTICITY_RUBRIC: &str = r#"Compare these images and determine if the product appears to be authentic.
Consider:
1. Logo placement and quality
2. Product design details
3. Material quality appearance
4. Color accuracy
5. Overall build quality

The first image is the reference (authentic product).
The second image is the product to verify.

Respond with 'Pass' if it appears authentic or 'Not Pass' if it shows signs of being counterfeit."#;
