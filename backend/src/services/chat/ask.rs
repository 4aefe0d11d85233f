use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::conversation::recent_window;
use common::model::chat::{ChatRequest, ChatResponse, SearchSource};
use log::{info, warn};
use reqwest::Client;

use super::{claude, fetch, prompt, search};
use crate::config::Config;
use crate::services::source::resolve_source;
use crate::services::ServiceError;

pub(crate) async fn process(
    config: web::Data<Config>,
    client: web::Data<Client>,
    payload: web::Json<ChatRequest>,
) -> impl Responder {
    match answer_question(&config, &client, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            warn!("Chat request failed: {}", e);
            e.error_response()
        }
    }
}

pub async fn answer_question(
    config: &Config,
    client: &Client,
    request: ChatRequest,
) -> Result<ChatResponse, ServiceError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ServiceError::BadRequest("질문을 입력해주세요.".to_string()));
    }
    if config.anthropic.api_key.is_none() {
        return Err(ServiceError::Internal(
            "Claude API가 설정되지 않았습니다. ANTHROPIC_API_KEY를 확인해주세요.".to_string(),
        ));
    }

    let source = resolve_source(config, request.locator(), request.sheet_name.as_deref())?;
    let locator = &source.locator;
    info!(
        "Answering question on {} {} ({} history turns)",
        locator.source_type(),
        locator.resource_id(),
        request.conversation_history.len()
    );

    let (content, search_results) = tokio::join!(
        fetch::fetch_source(client, &config.google.docs_base_url, locator),
        run_search(client, config, &request, question),
    );
    let content = content?;

    let sources = search_results.clone().unwrap_or_default();
    let prompt = prompt::build_prompt(question, source.title.as_deref(), &content, &sources);
    let history = recent_window(&request.conversation_history);
    let answer = claude::complete(
        client,
        &config.anthropic,
        prompt::SYSTEM_PROMPT,
        &history,
        prompt,
    )
        .await?;

    Ok(ChatResponse {
        answer,
        data_count: content.data_count(),
        web_search_count: search_results.as_ref().map(Vec::len),
        search_sources: sources,
    })
}

/// Web results are an optional enrichment: a failing search is logged and
/// the question is answered without them.
async fn run_search(
    client: &Client,
    config: &Config,
    request: &ChatRequest,
    question: &str,
) -> Option<Vec<SearchSource>> {
    if !request.enable_web_search {
        return None;
    }
    match search::web_search(client, &config.google, question).await {
        Ok(results) => results,
        Err(e) => {
            warn!("Web search skipped: {}", e);
            None
        }
    }
}
