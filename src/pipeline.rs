//! 真贋チェックの一連処理
//!
//! URL解析 → 出品画像取得 → 1枚ずつ判定（出品の並び順、逐次）→ 集計
//!
//! CSV出力は含まない（report::write_csv で明示的に行う）

use crate::judge::{judge, VisionJudge};
use crate::listing::{parse_listing_url, FetchError, ListingSource, UrlError};
use crate::reference::ReferenceLibrary;
use authcheck_common::{cdn_image_url, AuthenticityReport, ComparisonResult};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid listing URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("failed to fetch listing: {0}")]
    Fetch(FetchError),

    #[error("no product images found")]
    NoImages,
}

impl From<FetchError> for PipelineError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::NoImages => PipelineError::NoImages,
            other => PipelineError::Fetch(other),
        }
    }
}

impl PipelineError {
    /// 利用者向けの短いメッセージ（`Error:` で始まる）
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::InvalidUrl(UrlError::Empty) => "Error: Product URL is required.".into(),
            PipelineError::InvalidUrl(UrlError::NoIdentifier(_)) => {
                "Error: Invalid listing URL format. Please try again.".into()
            }
            PipelineError::Fetch(FetchError::Timeout) => {
                "Error: Request timed out. Please try again.".into()
            }
            PipelineError::Fetch(FetchError::HttpStatus { status, .. }) => {
                format!("Error: Failed to fetch product data (HTTP {}).", status)
            }
            PipelineError::Fetch(FetchError::Network(detail))
            | PipelineError::Fetch(FetchError::Decode(detail)) => {
                format!("Error: Failed to fetch data: {}", detail)
            }
            PipelineError::Fetch(FetchError::NoImages) | PipelineError::NoImages => {
                "Error: No product images found.".into()
            }
        }
    }
}

/// 進捗通知
#[derive(Debug)]
pub enum Progress<'a> {
    /// 画像一覧の取得完了
    Fetched { total: usize },
    /// 1枚の判定完了（index は0始まり）
    Judged { index: usize, result: &'a ComparisonResult },
}

pub struct Pipeline<'a> {
    source: &'a dyn ListingSource,
    judge: &'a dyn VisionJudge,
    library: &'a ReferenceLibrary,
    cdn_prefix: String,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn ListingSource,
        judge: &'a dyn VisionJudge,
        library: &'a ReferenceLibrary,
        cdn_prefix: impl Into<String>,
    ) -> Self {
        Self {
            source,
            judge,
            library,
            cdn_prefix: cdn_prefix.into(),
        }
    }

    pub async fn run_check(
        &self,
        listing_url: &str,
        category: &str,
    ) -> Result<AuthenticityReport, PipelineError> {
        self.run_check_with_progress(listing_url, category, |_| {}).await
    }

    /// 出品の全画像を判定して集計
    ///
    /// URL・取得エラーは全体の失敗。1枚ごとの判定失敗は Error 行として残し、処理を続ける。
    pub async fn run_check_with_progress<F>(
        &self,
        listing_url: &str,
        category: &str,
        mut on_progress: F,
    ) -> Result<AuthenticityReport, PipelineError>
    where
        F: FnMut(Progress<'_>),
    {
        let image_urls = self.fetch_image_urls(listing_url).await?;
        on_progress(Progress::Fetched {
            total: image_urls.len(),
        });

        let mut rows = Vec::with_capacity(image_urls.len());
        for (index, image_url) in image_urls.iter().enumerate() {
            let result = judge(self.judge, self.library, image_url, category).await;
            on_progress(Progress::Judged {
                index,
                result: &result,
            });
            rows.push(result);
        }

        let report = AuthenticityReport::build(rows);
        info!(
            total = report.total_images,
            pass = report.pass_count,
            fail = report.fail_count,
            "authenticity check finished"
        );
        Ok(report)
    }

    /// URLを解析し、出品画像のCDN URLを並び順で返す
    pub async fn fetch_image_urls(&self, listing_url: &str) -> Result<Vec<String>, PipelineError> {
        let id = parse_listing_url(listing_url)?;
        let image_ids = self.source.fetch_listing_images(&id).await?;

        if image_ids.is_empty() {
            return Err(PipelineError::NoImages);
        }

        Ok(image_ids
            .iter()
            .map(|image_id| cdn_image_url(&self.cdn_prefix, image_id))
            .collect())
    }
}
