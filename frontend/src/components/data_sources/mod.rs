//! Data-source tabs and the add/edit dialog.
//!
//! The list is loaded once on first render and again after every save. The
//! selected source is reported to the parent through `on_select`.

use yew::prelude::*;

mod dialog;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DataSourceProps;
pub use state::DataSourceManager;

impl Component for DataSourceManager {
    type Message = Msg;
    type Properties = DataSourceProps;

    fn create(_ctx: &Context<Self>) -> Self {
        DataSourceManager::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Reload(None));
        }
    }
}
