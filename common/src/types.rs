//! 真贋判定結果の型定義
//!
//! - Verdict: 1枚ごとの判定（Pass / Not Pass / Error）
//! - ComparisonResult: 1枚の出品画像に対する判定結果
//! - AuthenticityReport: 出品全体の集計

use serde::{Deserialize, Serialize};
use std::fmt;

/// 判定区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    #[serde(rename = "Not Pass")]
    NotPass,
    Error,
}

impl Verdict {
    /// CSV・画面表示用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "Pass",
            Verdict::NotPass => "Not Pass",
            Verdict::Error => "Error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1枚の出品画像に対する判定結果
///
/// confidenceは確率ではなく 1.0（Pass）か 0.0 のどちらか
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub image_url: String,
    pub verdict: Verdict,
    pub confidence: f64,
}

impl ComparisonResult {
    pub fn pass(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            verdict: Verdict::Pass,
            confidence: 1.0,
        }
    }

    pub fn not_pass(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            verdict: Verdict::NotPass,
            confidence: 0.0,
        }
    }

    pub fn error(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            verdict: Verdict::Error,
            confidence: 0.0,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// 出品全体の集計レポート
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityReport {
    pub total_images: usize,
    pub pass_count: usize,
    /// Not Pass と Error の合計
    pub fail_count: usize,
    pub detail_rows: Vec<ComparisonResult>,
    pub sample_image_url: Option<String>,
}

impl AuthenticityReport {
    /// 判定結果を集計してレポートを構築（ファイル出力なし）
    pub fn build(detail_rows: Vec<ComparisonResult>) -> Self {
        let total_images = detail_rows.len();
        let pass_count = detail_rows.iter().filter(|r| r.is_pass()).count();
        let sample_image_url = detail_rows.first().map(|r| r.image_url.clone());

        Self {
            total_images,
            pass_count,
            fail_count: total_images - pass_count,
            detail_rows,
            sample_image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Pass.label(), "Pass");
        assert_eq!(Verdict::NotPass.label(), "Not Pass");
        assert_eq!(Verdict::Error.to_string(), "Error");
    }

    #[test]
    fn test_verdict_serde_uses_labels() {
        let json = serde_json::to_string(&Verdict::NotPass).unwrap();
        assert_eq!(json, "\"Not Pass\"");
    }

    #[test]
    fn test_build_counts_error_as_fail() {
        let rows = vec![
            ComparisonResult::pass("a"),
            ComparisonResult::error("b"),
            ComparisonResult::not_pass("c"),
        ];
        let report = AuthenticityReport::build(rows);

        assert_eq!(report.total_images, 3);
        assert_eq!(report.pass_count, 1);
        assert_eq!(report.fail_count, 2);
        assert_eq!(report.sample_image_url.as_deref(), Some("a"));
    }

    #[test]
    fn test_build_empty() {
        let report = AuthenticityReport::build(Vec::new());
        assert_eq!(report.total_images, 0);
        assert!(report.sample_image_url.is_none());
    }
}
