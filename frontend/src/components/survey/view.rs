use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::{Field, Msg};
use super::state::SurveyForm;
use common::model::survey::MIN_BIRTH_YEAR;

const GRADES: [&str; 6] = ["중1", "중2", "중3", "고1", "고2", "고3"];

pub fn view(component: &SurveyForm, ctx: &Context<SurveyForm>) -> Html {
    let link = ctx.link();
    if component.submitted {
        return build_success(link);
    }

    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <form class="survey-form" {onsubmit}>
            <h2>{"학생 학습 설문"}</h2>
            <p class="hint">{"* 표시는 필수 항목입니다."}</p>

            { text_input(component, link, Field::Name, "이름 *", "홍길동", true) }
            <label class="field">
                <span>{"출생연도 *"}</span>
                <input
                    type="number"
                    required=true
                    min={MIN_BIRTH_YEAR.to_string()}
                    placeholder="2008"
                    value={component.survey.birth_year.clone()}
                    oninput={input_callback(link, Field::BirthYear)}
                    onchange={link.callback(|_: Event| Msg::ClampBirthYear)}
                />
            </label>
            <label class="field">
                <span>{"학년 *"}</span>
                <select
                    required=true
                    onchange={link.callback(|e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        Msg::Set(Field::Grade, select.value())
                    })}
                >
                    <option value="" selected={component.survey.grade.is_empty()}>{"선택하세요"}</option>
                    { for GRADES.iter().map(|grade| html! {
                        <option value={*grade} selected={component.survey.grade == *grade}>{ *grade }</option>
                    }) }
                </select>
            </label>
            { text_input(component, link, Field::SchoolName, "학교 이름 *", "한국중학교", true) }
            { text_input(component, link, Field::City, "거주 지역 *", "서울시 강남구", true) }
            { text_input(component, link, Field::SchoolScore, "내신 성적", "예: 90점, 2등급", false) }
            { text_input(component, link, Field::MockExamScore, "모의고사 성적", "예: 2등급", false) }
            { text_area(component, link, Field::StudyStyle, "공부 스타일", "예: 자기주도 학습") }
            { text_area(component, link, Field::PreferredMethod, "선호하는 학습 방법", "예: 인강 활용") }
            { text_area(component, link, Field::ChallengingPart, "공부할 때 가장 어려운 점", "예: 시간 관리") }
            { text_area(component, link, Field::FeatureRequest, "원하는 기능", "예: AI 튜터 기능") }

            <button type="submit" class="primary" disabled={component.loading}>
                {
                    if component.loading {
                        html! { <><span class="spinner" />{" 제출 중..."}</> }
                    } else {
                        html! { "제출하기" }
                    }
                }
            </button>
        </form>
    }
}

fn build_success(link: &Scope<SurveyForm>) -> Html {
    html! {
        <div class="survey-success">
            <i class="material-icons">{"check_circle"}</i>
            <h2>{"제출이 완료되었습니다!"}</h2>
            <p>{"설문에 참여해 주셔서 감사합니다."}</p>
            <button class="secondary" onclick={link.callback(|_| Msg::Reset)}>{"새 응답 작성"}</button>
        </div>
    }
}

fn input_callback(link: &Scope<SurveyForm>, field: Field) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Set(field, input.value())
    })
}

fn text_input(
    component: &SurveyForm,
    link: &Scope<SurveyForm>,
    field: Field,
    label: &'static str,
    placeholder: &'static str,
    required: bool,
) -> Html {
    html! {
        <label class="field">
            <span>{ label }</span>
            <input
                type="text"
                {required}
                {placeholder}
                value={field.value(&component.survey).to_string()}
                oninput={input_callback(link, field)}
            />
        </label>
    }
}

fn text_area(
    component: &SurveyForm,
    link: &Scope<SurveyForm>,
    field: Field,
    label: &'static str,
    placeholder: &'static str,
) -> Html {
    html! {
        <label class="field">
            <span>{ label }</span>
            <textarea
                rows="2"
                {placeholder}
                value={field.value(&component.survey).to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    let area: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::Set(field, area.value())
                })}
            />
        </label>
    }
}
