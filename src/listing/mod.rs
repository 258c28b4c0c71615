//! 出品情報の取得
//!
//! - url: 出品URLから (shop_id, item_id) を抽出
//! - fetcher: ブラウザ相当のセッションで商品詳細APIを呼び出し、画像IDを取得

pub mod fetcher;
pub mod url;

pub use fetcher::{FetchError, HttpListingFetcher, ListingSource};
pub use url::{parse_listing_url, ListingIdentifier, UrlError};
