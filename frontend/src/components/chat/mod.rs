//! Chat widget answering questions about the selected data source.
//!
//! Each data source keeps its own transcript for the lifetime of the page;
//! switching sources swaps the visible conversation without losing the others.
//! Answers that arrive after the user switched away are still written to the
//! conversation they belong to.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ChatProps;
pub use state::ChatWidget;

impl Component for ChatWidget {
    type Message = Msg;
    type Properties = ChatProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut widget = ChatWidget::new();
        widget.store.activate(&ctx.props().source_id());
        widget
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let source_id = ctx.props().source_id();
        if source_id != old_props.source_id() {
            self.store.activate(&source_id);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        self.scroll_to_bottom();
    }
}
