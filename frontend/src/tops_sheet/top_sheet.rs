use uuid::Uuid;
use yew::{html, Callback, Component, Context, Html, MouseEvent, NodeRef, Properties};

const VISIBLE_CLASS: &str = "show";

/// Modal sheet that slides down from the top of the page. Visibility is
/// toggled through `open_top_sheet` and `close_top_sheet` on its `node_ref`.
pub struct TopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub title: String,
    /// Called when the backdrop or the close button is clicked.
    pub on_close: Callback<()>,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_backdrop = props.on_close.reform(|_: MouseEvent| ());
        let on_button = props.on_close.reform(|_: MouseEvent| ());

        html! {
            <div class="top-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                <div class="top-sheet-backdrop" onclick={on_backdrop} />
                <div class="top-sheet-panel">
                    <div class="top-sheet-header">
                        <h3>{ props.title.clone() }</h3>
                        <button type="button" class="icon-btn" title="닫기" onclick={on_button}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        top_sheet.class_list().add_1(VISIBLE_CLASS).ok();
    }
}

pub fn close_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        top_sheet.class_list().remove_1(VISIBLE_CLASS).ok();
    }
}
