//! マーケットプレイス出品の真贋チェック
//!
//! 出品URLから画像一覧を取得し、カテゴリの参照画像と1枚ずつ比較して集計する。

pub mod cli;
pub mod config;
pub mod error;
pub mod judge;
pub mod listing;
pub mod logging;
pub mod pipeline;
pub mod reference;
pub mod report;

pub use authcheck_common::{AuthenticityReport, ComparisonResult, Verdict};
