//! OpenAI互換 Chat Completions API による判定サービス
//!
//! 参照画像はローカルファイルのため base64 の data URL として送信し、
//! 出品画像は CDN の URL をそのまま渡す。

use super::{JudgmentError, VisionJudge};
use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use authcheck_common::AUTHENTICITY_RUBRIC;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chat Completions リクエスト
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

/// Chat Completions レスポンス
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct OpenAiVisionClient {
    client: reqwest::Client,
    api_base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiVisionClient {
    pub fn new(
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        Ok(Self::new(
            config.api_base_url.clone(),
            api_key,
            config.model.clone(),
            config.max_tokens,
        ))
    }

    pub(crate) fn build_request(&self, reference_url: String, candidate_url: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: AUTHENTICITY_RUBRIC.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: reference_url },
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: candidate_url.to_string(),
                        },
                    },
                ],
            }],
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl VisionJudge for OpenAiVisionClient {
    async fn compare(&self, reference: &Path, candidate_url: &str) -> std::result::Result<String, JudgmentError> {
        let reference_url = image_data_url(reference).await?;
        let request = self.build_request(reference_url, candidate_url);

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.api_base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| JudgmentError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(JudgmentError::Status {
                status: status.as_u16(),
                excerpt: text.chars().take(200).collect(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| JudgmentError::Request(e.to_string()))?;
        parse_completion(&body)
    }
}

/// レスポンス本文から最初の選択肢のテキストを取り出す
fn parse_completion(body: &str) -> std::result::Result<String, JudgmentError> {
    let payload: ChatResponse =
        serde_json::from_str(body).map_err(|e| JudgmentError::Parse(e.to_string()))?;

    payload
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| JudgmentError::Parse("response has no message content".into()))
}

/// ローカル画像を data URL に変換
async fn image_data_url(path: &Path) -> std::result::Result<String, JudgmentError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| JudgmentError::ReferenceRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(format!("data:{};base64,{}", mime_type(path), STANDARD.encode(bytes)))
}

fn mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        _ => "image/jpeg",
    }
}
