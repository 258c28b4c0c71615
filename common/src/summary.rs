//! 集計結果のテキスト整形

use crate::types::AuthenticityReport;

/// 信頼度をパーセント表記に変換（例: 1.0 → "100.00%"）
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// 画面表示用のサマリー文
pub fn render_summary(report: &AuthenticityReport, output_path: &str) -> String {
    format!(
        "Authenticity Check Results:\n\
         Total Images Analyzed: {}\n\
         Appears Authentic: {}\n\
         Potentially Counterfeit: {}\n\
         \n\
         Detailed results saved to {}",
        report.total_images, report.pass_count, report.fail_count, output_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComparisonResult;

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
    }

    #[test]
    fn test_render_summary() {
        let report = AuthenticityReport::build(vec![
            ComparisonResult::pass("a"),
            ComparisonResult::not_pass("b"),
        ]);
        let summary = render_summary(&report, "authenticity_check.csv");

        assert!(summary.contains("Total Images Analyzed: 2"));
        assert!(summary.contains("Appears Authentic: 1"));
        assert!(summary.contains("Potentially Counterfeit: 1"));
        assert!(summary.ends_with("authenticity_check.csv"));
    }
}
