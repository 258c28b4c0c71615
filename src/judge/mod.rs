//! 真贋判定アダプタ
//!
//! 出品画像1枚とカテゴリの参照画像1枚を判定サービスに渡し、
//! 応答を Pass / Not Pass / Error に分類する。
//! 判定サービスの失敗は Error 行として吸収し、呼び出し元には伝播させない。

pub mod openai;

pub use openai::OpenAiVisionClient;

use crate::reference::ReferenceLibrary;
use async_trait::async_trait;
use authcheck_common::{normalize_verdict, ComparisonResult, Verdict};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum JudgmentError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("service returned HTTP {status}: {excerpt}")]
    Status { status: u16, excerpt: String },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("cannot read reference image {path}: {source}")]
    ReferenceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 画像2枚を受け取り、判定文字列を返す判定サービス
#[async_trait]
pub trait VisionJudge: Send + Sync {
    /// `reference` は真正品の見本（1枚目）、`candidate_url` は検査対象（2枚目）
    async fn compare(&self, reference: &Path, candidate_url: &str) -> Result<String, JudgmentError>;
}

/// 出品画像1枚を判定
///
/// - 参照画像がないカテゴリは判定サービスを呼ばずに Error
/// - 参照画像は先頭の1枚のみ使用
/// - 判定サービスの失敗は Error
pub async fn judge<J>(
    service: &J,
    library: &ReferenceLibrary,
    candidate_url: &str,
    category: &str,
) -> ComparisonResult
where
    J: VisionJudge + ?Sized,
{
    let Some(reference) = library.primary_reference(category) else {
        warn!(%category, "no reference images for category");
        return ComparisonResult::error(candidate_url);
    };

    match service.compare(reference, candidate_url).await {
        Ok(response) => {
            let result = match normalize_verdict(&response) {
                Verdict::Pass => ComparisonResult::pass(candidate_url),
                _ => ComparisonResult::not_pass(candidate_url),
            };
            debug!(image = %candidate_url, response = %response.trim(), verdict = %result.verdict, "judged");
            result
        }
        Err(e) => {
            warn!(image = %candidate_url, error = %e, "judgment failed");
            ComparisonResult::error(candidate_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedJudge {
        response: Result<&'static str, ()>,
        calls: AtomicUsize,
    }

    impl FixedJudge {
        fn replying(response: &'static str) -> Self {
            Self { response: Ok(response), calls: AtomicUsize::new(0) }
        }

        fn failing() -> Self {
            Self { response: Err(()), calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl VisionJudge for FixedJudge {
        async fn compare(&self, _reference: &Path, _candidate_url: &str) -> Result<String, JudgmentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .map(str::to_string)
                .map_err(|_| JudgmentError::Request("connection reset".into()))
        }
    }

    fn library() -> ReferenceLibrary {
        let mut categories = BTreeMap::new();
        categories.insert("bags".to_string(), vec![PathBuf::from("ref/bags/a.jpg")]);
        categories.insert("empty".to_string(), Vec::new());
        ReferenceLibrary::new(categories)
    }

    #[tokio::test]
    async fn test_pass() {
        let service = FixedJudge::replying("Pass");
        let result = judge(&service, &library(), "https://cdn/x", "bags").await;
        assert_eq!(result, ComparisonResult::pass("https://cdn/x"));
        assert_eq!(result.confidence, 1.0);
    }

    #[tokio::test]
    async fn test_pass_with_whitespace() {
        let service = FixedJudge::replying("  Pass \n");
        let result = judge(&service, &library(), "x", "bags").await;
        assert_eq!(result.verdict, Verdict::Pass);
    }

    #[tokio::test]
    async fn test_not_pass_and_unexpected_text() {
        for response in ["Not Pass", "", "pass", "I think it is Pass"] {
            let service = FixedJudge::replying(response);
            let result = judge(&service, &library(), "x", "bags").await;
            assert_eq!(result.verdict, Verdict::NotPass, "response: {:?}", response);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[tokio::test]
    async fn test_service_failure_becomes_error() {
        let service = FixedJudge::failing();
        let result = judge(&service, &library(), "x", "bags").await;
        assert_eq!(result, ComparisonResult::error("x"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_category_skips_service() {
        let service = FixedJudge::replying("Pass");

        let unknown = judge(&service, &library(), "x", "watches").await;
        let empty = judge(&service, &library(), "x", "empty").await;

        assert_eq!(unknown.verdict, Verdict::Error);
        assert_eq!(empty.verdict, Verdict::Error);
        assert_eq!(unknown.confidence, 0.0);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }
}
