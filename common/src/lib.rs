//! Listing Authcheck Common Library
//!
//! CLIと将来のフロントエンドで共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod prompts;
pub mod parser;
pub mod summary;

pub use types::{AuthenticityReport, ComparisonResult, Verdict};
pub use error::{Error, Result};
pub use prompts::{AUTHENTICITY_RUBRIC, NOT_PASS_TOKEN, PASS_TOKEN};
pub use parser::{cdn_image_url, extract_image_ids, normalize_verdict};
pub use summary::{format_confidence, render_summary};
