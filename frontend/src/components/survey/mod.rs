//! Student survey form.
//!
//! Responses are posted to an Apps Script web app that does not answer CORS
//! requests, so the form is delivered as a GET through a hidden iframe and
//! success is assumed after a fixed delay.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::{Field, Msg};
pub use state::SurveyForm;

impl Component for SurveyForm {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        SurveyForm::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
