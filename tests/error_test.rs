//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use listing_authcheck::error::AuthCheckError;
use listing_authcheck::listing::{parse_listing_url, FetchError, UrlError};
use listing_authcheck::pipeline::PipelineError;

/// AuthCheckErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        AuthCheckError::Config("bad config".to_string()),
        AuthCheckError::MissingApiKey,
        AuthCheckError::Http("tls".to_string()),
        AuthCheckError::Pipeline(PipelineError::NoImages),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "empty message: {:?}", err);
    }
}

/// 利用者向けメッセージは必ず "Error:" で始まる
#[test]
fn test_user_message_prefix() {
    let errors = vec![
        AuthCheckError::MissingApiKey,
        AuthCheckError::Config("home directory not found".to_string()),
        AuthCheckError::Pipeline(PipelineError::InvalidUrl(UrlError::Empty)),
        AuthCheckError::Pipeline(PipelineError::Fetch(FetchError::Timeout)),
    ];

    for err in errors {
        assert!(err.user_message().starts_with("Error:"), "{:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = AuthCheckError::MissingApiKey.user_message();
    assert!(display.contains("OPENAI_API_KEY"));
    assert!(display.contains("authcheck config"));
}

/// パイプラインエラーは透過的に表示される
#[test]
fn test_pipeline_error_transparent() {
    let err: AuthCheckError = PipelineError::Fetch(FetchError::HttpStatus {
        status: 403,
        excerpt: "blocked".into(),
    })
    .into();

    assert!(format!("{}", err).contains("403"));
    assert_eq!(err.user_message(), "Error: Failed to fetch product data (HTTP 403).");
}

/// URL解析エラーからの変換
#[test]
fn test_url_error_conversion() {
    let url_err = parse_listing_url("https://shopee.co.id/search?keyword=bag").unwrap_err();
    let err: PipelineError = url_err.into();

    assert!(matches!(err, PipelineError::InvalidUrl(UrlError::NoIdentifier(_))));
    assert_eq!(err.user_message(), "Error: Invalid listing URL format. Please try again.");
}

/// 空URL
#[test]
fn test_empty_url_message() {
    let err: PipelineError = parse_listing_url("  ").unwrap_err().into();
    assert_eq!(err.user_message(), "Error: Product URL is required.");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: AuthCheckError = io_err.into();

    assert!(matches!(err, AuthCheckError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: AuthCheckError = json_err.into();

    assert!(matches!(err, AuthCheckError::JsonParse(_)));
}
