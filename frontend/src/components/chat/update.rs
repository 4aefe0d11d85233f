use common::conversation::PendingAnswer;
use common::model::chat::{interpret_reply, ChatRequest, ChatResponse, CONNECTION_ERROR};
use gloo_console::error;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ChatWidget;
use crate::config::api_url;

pub fn update(component: &mut ChatWidget, ctx: &Context<ChatWidget>, msg: Msg) -> bool {
    match msg {
        Msg::SetInput(text) => {
            component.input = text;
            true
        }
        Msg::ToggleWebSearch(enabled) => {
            component.web_search = enabled;
            true
        }
        Msg::Send => {
            let question = component.input.trim().to_string();
            if question.is_empty() || component.is_sending() {
                return false;
            }
            component.input.clear();

            let pending = component.store.begin_question(&question);
            let request = ChatRequest::for_source(
                question,
                ctx.props().source.as_ref(),
                pending.history.clone(),
            )
            .with_web_search(component.web_search);

            let link = ctx.link().clone();
            spawn_local(async move {
                let result = ask(&request).await;
                link.send_message(Msg::Settled(pending, result));
            });
            true
        }
        Msg::Settled(pending, result) => {
            settle(component, &pending, result);
            pending.source_id == component.store.active_id()
        }
    }
}

fn settle(component: &mut ChatWidget, pending: &PendingAnswer, result: Result<ChatResponse, String>) {
    match result {
        Ok(response) => component.store.complete(pending, response),
        Err(message) => component.store.fail(pending, message),
    }
}

async fn ask(request: &ChatRequest) -> Result<ChatResponse, String> {
    let response = Request::post(&api_url("/api/chat"))
        .json(request)
        .map_err(|e| {
            error!("Could not encode chat request:", e.to_string());
            CONNECTION_ERROR.to_string()
        })?
        .send()
        .await
        .map_err(|e| {
            error!("Chat request failed:", e.to_string());
            CONNECTION_ERROR.to_string()
        })?;

    let ok = response.ok();
    let body = response.text().await.unwrap_or_default();
    interpret_reply(ok, &body)
}
