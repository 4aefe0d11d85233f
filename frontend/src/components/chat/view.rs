use common::conversation::{EntryBody, Sender, TranscriptEntry};
use common::model::chat::SearchSource;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ChatWidget;
use crate::helpers::render_markdown;

pub fn view(component: &ChatWidget, ctx: &Context<ChatWidget>) -> Html {
    let link = ctx.link();
    let entries = component
        .store
        .active()
        .map(|c| c.transcript.as_slice())
        .unwrap_or_default();

    html! {
        <div class="chat-widget">
            <div class="chat-transcript" ref={component.transcript_ref.clone()}>
                { for entries.iter().map(build_entry) }
            </div>
            { build_composer(component, link) }
        </div>
    }
}

fn build_entry(entry: &TranscriptEntry) -> Html {
    let sender_class = match entry.sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    };

    let content = match &entry.body {
        EntryBody::Text(text) => html! { <div class="chat-text">{ text.clone() }</div> },
        EntryBody::Loading => html! {
            <div class="chat-loading">
                <span class="dot" /><span class="dot" /><span class="dot" />
            </div>
        },
        EntryBody::Answer {
            text,
            web_search_count,
            sources,
        } => html! {
            <>
                <div class="chat-markdown">
                    { Html::from_html_unchecked(AttrValue::from(render_markdown(text))) }
                </div>
                { build_citations(*web_search_count, sources) }
            </>
        },
        EntryBody::Error(message) => html! { <div class="chat-error">{ message.clone() }</div> },
    };

    html! {
        <div class={classes!("chat-message", sender_class)}>
            { content }
        </div>
    }
}

fn build_citations(web_search_count: Option<usize>, sources: &[SearchSource]) -> Html {
    if sources.is_empty() {
        return html! {};
    }
    let caption = match web_search_count {
        Some(count) => format!("웹 검색 결과 {}건 참고", count),
        None => "참고 자료".to_string(),
    };

    html! {
        <div class="chat-citations">
            <div class="caption">
                <i class="material-icons">{"travel_explore"}</i>
                { caption }
            </div>
            <ol>
                { for sources.iter().map(|source| html! {
                    <li>
                        <a href={source.link.clone()} target="_blank" rel="noopener noreferrer">
                            { source.title.clone() }
                        </a>
                        <span class="host">{ source.source.clone() }</span>
                    </li>
                }) }
            </ol>
        </div>
    }
}

fn build_composer(component: &ChatWidget, link: &Scope<ChatWidget>) -> Html {
    let sending = component.is_sending();

    let onkeydown = link.batch_callback(|e: KeyboardEvent| {
        if e.key() == "Enter" && !e.shift_key() && !e.is_composing() {
            e.prevent_default();
            vec![Msg::Send]
        } else {
            vec![]
        }
    });

    html! {
        <div class="chat-composer">
            <label class="web-search-toggle" title="답변에 웹 검색 결과를 함께 활용합니다">
                <input
                    type="checkbox"
                    checked={component.web_search}
                    onchange={link.callback(|e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::ToggleWebSearch(input.checked())
                    })}
                />
                {"웹 검색"}
            </label>
            <textarea
                rows="1"
                placeholder="질문을 입력하세요..."
                disabled={sending}
                value={component.input.clone()}
                oninput={link.callback(|e: InputEvent| {
                    let area: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::SetInput(area.value())
                })}
                {onkeydown}
            />
            <button
                class="icon-btn send"
                title="보내기"
                disabled={sending || component.input.trim().is_empty()}
                onclick={link.callback(|_| Msg::Send)}
            >
                <i class="material-icons">{"send"}</i>
            </button>
        </div>
    }
}
