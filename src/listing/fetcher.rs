use super::url::ListingIdentifier;
use async_trait::async_trait;
use authcheck_common::extract_image_ids;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// エラー時に残すレスポンス本文の最大文字数
const BODY_EXCERPT_CHARS: usize = 200;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {excerpt}")]
    HttpStatus { status: u16, excerpt: String },

    #[error("listing has no images")]
    NoImages,

    #[error("invalid listing payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// 出品の画像ID一覧を返す取得元
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// 画像IDを出品の並び順で返す。空の場合は NoImages
    async fn fetch_listing_images(&self, id: &ListingIdentifier) -> Result<Vec<String>, FetchError>;
}

/// マーケットプレイスの内部APIから取得する実装
///
/// 商品ページを一度開いてセッションCookieを受け取ってから、
/// 同じセッションで商品詳細APIを呼ぶ。
pub struct HttpListingFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpListingFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(browser_headers(&base_url)?)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// 人が見る商品ページのURL
    pub fn listing_page_url(&self, id: &ListingIdentifier) -> String {
        format!("{}/-i.{}.{}", self.base_url, id.shop_id, id.item_id)
    }

    /// 商品詳細APIのURL
    pub fn product_api_url(&self, id: &ListingIdentifier) -> String {
        format!(
            "{}/api/v4/pdp/get_pc?shop_id={}&item_id={}",
            self.base_url, id.shop_id, id.item_id
        )
    }

    /// Cookie取得のためのページ閲覧。失敗しても続行する
    async fn bootstrap_session(&self, id: &ListingIdentifier) {
        let url = self.listing_page_url(id);
        match self.client.get(&url).send().await {
            Ok(resp) => debug!(%url, status = resp.status().as_u16(), "session bootstrap"),
            Err(e) => warn!(%url, error = %e, "session bootstrap failed, continuing"),
        }
    }

    /// 画像をファイルに保存（サンプル画像表示用）
    pub async fn download_to(&self, url: &str, path: &Path) -> Result<u64, FetchError> {
        let resp = self.client.get(url).timeout(self.timeout).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                excerpt: String::new(),
            });
        }

        let bytes = resp.bytes().await?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| FetchError::Network(format!("cannot write {}: {}", path.display(), e)))?;
        Ok(bytes.len() as u64)
    }
}

#[async_trait]
impl ListingSource for HttpListingFetcher {
    async fn fetch_listing_images(&self, id: &ListingIdentifier) -> Result<Vec<String>, FetchError> {
        self.bootstrap_session(id).await;

        let url = self.product_api_url(id);
        let resp = self.client.get(&url).timeout(self.timeout).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let excerpt = body_excerpt(&resp.text().await.unwrap_or_default());
            debug!(%url, status = status.as_u16(), %excerpt, "product api rejected request");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                excerpt,
            });
        }

        let body = resp.text().await?;
        let ids = extract_image_ids(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        if ids.is_empty() {
            return Err(FetchError::NoImages);
        }

        debug!(listing = %id, images = ids.len(), "fetched listing images");
        Ok(ids)
    }
}

fn browser_headers(base_url: &str) -> Result<HeaderMap, FetchError> {
    let referer = HeaderValue::from_str(&format!("{}/", base_url))
        .map_err(|_| FetchError::Network(format!("invalid marketplace base URL: {}", base_url)))?;

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, referer);

    let extra: &[(&'static str, &'static str)] = &[
        ("sec-ch-ua", r#""Not_A Brand";v="8", "Chromium";v="120", "Google Chrome";v="120""#),
        ("sec-ch-ua-platform", r#""Windows""#),
        ("sec-fetch-dest", "empty"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-site", "same-origin"),
        ("x-api-source", "pc"),
        ("x-requested-with", "XMLHttpRequest"),
        ("x-shopee-language", "id"),
    ];
    for &(name, value) in extra {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    Ok(headers)
}

fn body_excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
