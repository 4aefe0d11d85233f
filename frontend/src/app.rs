use crate::components::chat::ChatWidget;
use crate::components::data_sources::DataSourceManager;
use crate::components::survey::SurveyForm;
use common::model::datasource::DataSource;
use yew::{classes, html, Component, Context, Html};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    Survey,
}

pub enum Msg {
    Show(Page),
    SourceSelected(Option<DataSource>),
}

pub struct App {
    page: Page,
    source: Option<DataSource>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::Chat,
            source: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Show(page) => {
                let changed = self.page != page;
                self.page = page;
                changed
            }
            Msg::SourceSelected(source) => {
                let changed = self.source != source;
                self.source = source;
                changed
            }
        }
    }

    // Both pages stay mounted so chat transcripts survive a visit to the survey.
    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let nav = |page: Page, label: &'static str| {
            html! {
                <button
                    class={classes!("nav-btn", (self.page == page).then_some("active"))}
                    onclick={link.callback(move |_| Msg::Show(page))}
                >
                    { label }
                </button>
            }
        };

        html! {
            <div class="app">
                <header class="app-header">
                    <h1>{"학생 데이터 도우미"}</h1>
                    <nav>
                        { nav(Page::Chat, "데이터 챗봇") }
                        { nav(Page::Survey, "학생 설문") }
                    </nav>
                </header>
                <main>
                    <section class="page" hidden={self.page != Page::Chat}>
                        <DataSourceManager on_select={link.callback(Msg::SourceSelected)} />
                        <ChatWidget source={self.source.clone()} />
                    </section>
                    <section class="page" hidden={self.page != Page::Survey}>
                        <SurveyForm />
                    </section>
                </main>
            </div>
        }
    }
}
