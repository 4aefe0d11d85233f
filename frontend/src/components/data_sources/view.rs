use common::model::datasource::DataSource;
use yew::html::Scope;
use yew::prelude::*;

use super::dialog::source_dialog;
use super::messages::Msg;
use super::state::DataSourceManager;

pub fn view(component: &DataSourceManager, ctx: &Context<DataSourceManager>) -> Html {
    let link = ctx.link();

    html! {
        <div class="source-bar">
            <div class="source-tabs">
                { for component.sources.iter().map(|source| build_tab(component, link, source)) }
                {
                    if component.loading && component.sources.is_empty() {
                        html! { <span class="hint">{"불러오는 중..."}</span> }
                    } else if component.sources.is_empty() {
                        html! { <span class="hint">{"등록된 데이터 소스가 없습니다."}</span> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <button class="icon-btn" title="데이터 소스 추가" onclick={link.callback(|_| Msg::OpenAdd)}>
                <i class="material-icons">{"add"}</i>
                <span class="icon-label">{"추가"}</span>
            </button>
            { source_dialog(component, link) }
        </div>
    }
}

fn build_tab(
    component: &DataSourceManager,
    link: &Scope<DataSourceManager>,
    source: &DataSource,
) -> Html {
    let active = component.selected.as_deref() == Some(source.id.as_str());
    let select_id = source.id.clone();
    let edit_id = source.id.clone();

    html! {
        <div class={classes!("source-tab", active.then_some("active"))}>
            <button class="tab-btn" onclick={link.callback(move |_| Msg::Select(select_id.clone()))}>
                <span class={classes!("kind", source.kind.as_str())}>{ source.kind.label() }</span>
                { source.title.clone() }
                { if source.is_default { html! { <i class="material-icons star" title="기본">{"star"}</i> } } else { html! {} } }
            </button>
            <button
                class="icon-btn edit"
                title="편집"
                onclick={link.callback(move |_| Msg::OpenEdit(edit_id.clone()))}
            >
                <i class="material-icons">{"edit"}</i>
            </button>
        </div>
    }
}
