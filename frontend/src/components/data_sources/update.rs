use common::model::chat::ErrorBody;
use common::model::datasource::{DataSource, NewDataSource};
use gloo_console::error;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{DataSourceManager, SourceForm};
use crate::config::api_url;
use crate::helpers::{alert, show_toast};
use crate::tops_sheet::top_sheet::{close_top_sheet, open_top_sheet};

pub fn update(
    component: &mut DataSourceManager,
    ctx: &Context<DataSourceManager>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Reload(preferred) => {
            component.loading = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = fetch_sources().await;
                link.send_message(Msg::Loaded(result, preferred));
            });
            true
        }
        Msg::Loaded(result, preferred) => {
            component.loading = false;
            match result {
                Ok(sources) => {
                    component.sources = sources;
                    component.reselect(preferred);
                    notify_selection(component, ctx);
                }
                Err(e) => {
                    error!("Loading data sources failed:", e.clone());
                    show_toast(&format!("데이터 소스를 불러오지 못했습니다: {}", e));
                    notify_selection(component, ctx);
                }
            }
            true
        }
        Msg::Select(id) => {
            if component.selected.as_deref() == Some(id.as_str()) {
                return false;
            }
            component.selected = Some(id);
            notify_selection(component, ctx);
            true
        }
        Msg::OpenAdd => {
            component.form = SourceForm::default();
            open_top_sheet(&component.dialog_ref);
            true
        }
        Msg::OpenEdit(id) => {
            let Some(source) = component.sources.iter().find(|s| s.id == id) else {
                return false;
            };
            component.form = SourceForm::edit(source);
            open_top_sheet(&component.dialog_ref);
            true
        }
        Msg::CloseDialog => {
            close_top_sheet(&component.dialog_ref);
            false
        }
        Msg::SetTitle(title) => {
            component.form.title = title;
            true
        }
        Msg::SetKind(kind) => {
            component.form.kind = kind;
            true
        }
        Msg::SetUrl(url) => {
            component.form.url = url;
            true
        }
        Msg::SetDefault(is_default) => {
            component.form.is_default = is_default;
            true
        }
        Msg::Save => {
            if component.saving {
                return false;
            }
            let new = match component.form.to_new() {
                Ok(new) => new,
                Err(e) => {
                    alert(&e);
                    return false;
                }
            };
            component.saving = true;

            let editing = component.form.editing.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = save_source(editing.as_deref(), &new).await;
                link.send_message(Msg::Saved(result));
            });
            true
        }
        Msg::Saved(result) => {
            component.saving = false;
            match result {
                Ok(source) => {
                    close_top_sheet(&component.dialog_ref);
                    show_toast(&format!("'{}' 저장되었습니다.", source.title));
                    ctx.link().send_message(Msg::Reload(Some(source.id)));
                }
                Err(e) => {
                    error!("Saving data source failed:", e.clone());
                    alert(&e);
                }
            }
            true
        }
    }
}

fn notify_selection(component: &DataSourceManager, ctx: &Context<DataSourceManager>) {
    ctx.props()
        .on_select
        .emit(component.selected_source().cloned());
}

async fn fetch_sources() -> Result<Vec<DataSource>, String> {
    let response = Request::get(&api_url("/api/data-sources"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_json(response).await
}

async fn save_source(editing: Option<&str>, new: &NewDataSource) -> Result<DataSource, String> {
    let request = match editing {
        Some(id) => Request::put(&api_url(&format!("/api/data-sources/{}", id))),
        None => Request::post(&api_url("/api/data-sources")),
    };
    let response = request
        .json(new)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| format!("서버에 연결할 수 없습니다: {}", e))?;
    read_json(response).await
}

/// Decodes a successful body, or the backend's `error` field otherwise.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response.json::<T>().await.map_err(|e| e.to_string());
    }
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => Err(body.error),
        Err(_) => Err(format!("요청이 실패했습니다 (HTTP {})", status)),
    }
}
