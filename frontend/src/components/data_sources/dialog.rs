use common::model::datasource::SourceKind;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::DataSourceManager;
use crate::tops_sheet::top_sheet::TopSheet;

pub fn source_dialog(component: &DataSourceManager, link: &Scope<DataSourceManager>) -> Html {
    let form = &component.form;
    let title = if form.editing.is_some() {
        "데이터 소스 편집"
    } else {
        "데이터 소스 추가"
    };

    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Save
    });

    html! {
        <TopSheet
            node_ref={component.dialog_ref.clone()}
            title={title}
            on_close={link.callback(|_| Msg::CloseDialog)}
        >
            <form class="source-form" {onsubmit}>
                <label class="field">
                    <span>{"이름"}</span>
                    <input
                        type="text"
                        placeholder="예: 2025 학생 설문"
                        value={form.title.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetTitle(input.value())
                        })}
                    />
                </label>
                <label class="field">
                    <span>{"종류"}</span>
                    <select onchange={link.callback(|e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        Msg::SetKind(SourceKind::parse(&select.value()))
                    })}>
                        { for [SourceKind::Survey, SourceKind::Interview].into_iter().map(|kind| html! {
                            <option value={kind.as_str()} selected={form.kind == kind}>{ kind.label() }</option>
                        }) }
                    </select>
                </label>
                <label class="field">
                    <span>{"Google 시트 또는 문서 주소"}</span>
                    <input
                        type="url"
                        placeholder="https://docs.google.com/spreadsheets/d/.../edit#gid=0"
                        value={form.url.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetUrl(input.value())
                        })}
                    />
                    <small class="hint">{"시트는 원하는 탭을 연 상태의 주소(#gid=...)를 붙여넣어 주세요."}</small>
                </label>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        checked={form.is_default}
                        onchange={link.callback(|e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetDefault(input.checked())
                        })}
                    />
                    {"기본 데이터 소스로 사용"}
                </label>
                <div class="actions">
                    <button type="button" class="secondary" onclick={link.callback(|_| Msg::CloseDialog)}>
                        {"취소"}
                    </button>
                    <button type="submit" class="primary" disabled={component.saving}>
                        { if component.saving { "저장 중..." } else { "저장" } }
                    </button>
                </div>
            </form>
        </TopSheet>
    }
}
