use common::conversation::ConversationStore;
use web_sys::Element;
use yew::prelude::*;

pub struct ChatWidget {
    pub store: ConversationStore,
    /// Text currently in the question box.
    pub input: String,
    pub web_search: bool,
    pub transcript_ref: NodeRef,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            store: ConversationStore::new(),
            input: String::new(),
            web_search: false,
            transcript_ref: NodeRef::default(),
        }
    }

    /// True while the visible conversation waits for an answer.
    pub fn is_sending(&self) -> bool {
        self.store.active().is_some_and(|c| c.has_pending())
    }

    pub fn scroll_to_bottom(&self) {
        if let Some(transcript) = self.transcript_ref.cast::<Element>() {
            transcript.set_scroll_top(transcript.scroll_height());
        }
    }
}
