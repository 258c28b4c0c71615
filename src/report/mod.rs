//! レポート出力
//!
//! 集計は authcheck_common::AuthenticityReport::build（純粋関数）、
//! ここではCSVへの書き出しのみを行う。

use crate::error::Result;
use authcheck_common::{format_confidence, AuthenticityReport};
use std::path::Path;

const CSV_HEADER: [&str; 3] = ["image_url", "authenticity_result", "confidence"];

/// 1画像1行でCSVに書き出す（既存ファイルは上書き）
pub fn write_csv(report: &AuthenticityReport, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)?;

    writer.write_record(CSV_HEADER)?;
    for row in &report.detail_rows {
        let confidence = format_confidence(row.confidence);
        writer.write_record([row.image_url.as_str(), row.verdict.label(), confidence.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
