//! Minimal client for the Anthropic Messages API.

use common::model::chat::{ConversationTurn, Role};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AnthropicConfig;
use crate::services::ServiceError;

const API_VERSION: &str = "2023-06-01";
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ConversationTurn>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Makes `turns` acceptable to the Messages API: the first message must come
/// from the user and roles must alternate. Leading assistant turns are
/// dropped, consecutive turns of the same role are merged, and empty turns
/// are skipped.
pub fn normalize_history(turns: &[ConversationTurn]) -> Vec<ConversationTurn> {
    let mut out: Vec<ConversationTurn> = Vec::with_capacity(turns.len());
    for turn in turns {
        if turn.content.trim().is_empty() {
            continue;
        }
        if out.is_empty() && turn.role == Role::Assistant {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.role == turn.role => {
                last.content.push_str("\n\n");
                last.content.push_str(&turn.content);
                continue;
            }
            _ => {}
        }
        out.push(turn.clone());
    }
    out
}

/// Sends the conversation context followed by `prompt` and returns the text
/// of the reply.
pub async fn complete(
    client: &Client,
    config: &AnthropicConfig,
    system: &str,
    history: &[ConversationTurn],
    prompt: String,
) -> Result<String, ServiceError> {
    let api_key = config.api_key.as_deref().ok_or_else(|| {
        ServiceError::Internal(
            "Claude API가 설정되지 않았습니다. ANTHROPIC_API_KEY를 확인해주세요.".to_string(),
        )
    })?;

    let mut turns = history.to_vec();
    turns.push(ConversationTurn::user(prompt));
    let messages = normalize_history(&turns);
    debug!("Sending {} messages to {}", messages.len(), config.model);

    let body = MessagesRequest {
        model: &config.model,
        max_tokens: config.max_tokens,
        temperature: TEMPERATURE,
        system,
        messages,
    };

    let url = format!("{}/v1/messages", config.base_url.trim_end_matches('/'));
    let response = client
        .post(url)
        .header("x-api-key", api_key)
        .header("anthropic-version", API_VERSION)
        .json(&body)
        .send()
        .await
        .map_err(|e| ServiceError::Upstream(format!("Claude API에 연결할 수 없습니다: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorResponse>(&text)
            .map(|e| e.error.message)
            .unwrap_or(text);
        return Err(ServiceError::Upstream(format!(
            "Claude API 오류 (HTTP {}): {}",
            status.as_u16(),
            message
        )));
    }

    let parsed: MessagesResponse = response
        .json()
        .await
        .map_err(|e| ServiceError::Upstream(format!("Claude 응답을 해석할 수 없습니다: {}", e)))?;

    let answer = parsed
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");

    if answer.trim().is_empty() {
        return Err(ServiceError::Upstream("Claude가 빈 답변을 반환했습니다.".to_string()));
    }
    Ok(answer)
}
