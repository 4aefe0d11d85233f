use common::model::survey::clamp_birth_year;
use gloo_console::{error, log};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Date, Object, Reflect};
use wasm_bindgen::JsValue;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::{Field, Msg};
use super::state::SurveyForm;
use crate::config::SURVEY_ENDPOINT;
use crate::helpers::alert;

/// The endpoint never answers in a readable way, so success is shown after
/// this delay.
const SUCCESS_DELAY_MS: u32 = 2000;
const IFRAME_LIFETIME_MS: u32 = 3000;

pub fn update(component: &mut SurveyForm, ctx: &Context<SurveyForm>, msg: Msg) -> bool {
    match msg {
        Msg::Set(field, value) => {
            field.set(&mut component.survey, value);
            true
        }
        Msg::ClampBirthYear => {
            let current = Date::new_0().get_full_year() as i32;
            let clamped = clamp_birth_year(&component.survey.birth_year, current);
            if clamped == component.survey.birth_year {
                return false;
            }
            Field::BirthYear.set(&mut component.survey, clamped);
            true
        }
        Msg::Submit => {
            if component.loading {
                return false;
            }
            component.loading = true;
            component.survey.timestamp = seoul_timestamp();

            let url = component.survey.submission_url(SURVEY_ENDPOINT);
            match submit_via_iframe(&url) {
                Ok(()) => {
                    log!("Survey submitted for", component.survey.name.clone());
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        TimeoutFuture::new(SUCCESS_DELAY_MS).await;
                        link.send_message(Msg::Submitted);
                    });
                }
                Err(e) => ctx.link().send_message(Msg::Failed(e)),
            }
            true
        }
        Msg::Submitted => {
            component.loading = false;
            component.submitted = true;
            true
        }
        Msg::Failed(e) => {
            error!("Survey submission failed:", e);
            component.loading = false;
            alert("제출 중 오류가 발생했습니다. 다시 시도해주세요.");
            true
        }
        Msg::Reset => {
            *component = SurveyForm::new();
            true
        }
    }
}

/// Current time as Korean users read it, e.g. `2025. 3. 14. 오후 2:05:09`.
fn seoul_timestamp() -> String {
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("timeZone"), &JsValue::from_str("Asia/Seoul")).ok();
    Date::new_0().to_locale_string("ko-KR", &options).into()
}

/// Loads `url` in a hidden iframe, which issues exactly one GET, and removes
/// the frame once the request has had time to finish.
fn submit_via_iframe(url: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document unavailable".to_string())?;
    let body = document.body().ok_or_else(|| "body unavailable".to_string())?;

    let iframe = document
        .create_element("iframe")
        .map_err(|e| format!("{:?}", e))?;
    iframe
        .set_attribute("style", "display:none")
        .map_err(|e| format!("{:?}", e))?;
    iframe.set_attribute("src", url).map_err(|e| format!("{:?}", e))?;
    body.append_child(&iframe).map_err(|e| format!("{:?}", e))?;

    spawn_local(async move {
        TimeoutFuture::new(IFRAME_LIFETIME_MS).await;
        iframe.remove();
    });
    Ok(())
}
