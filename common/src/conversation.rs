//! Page-lifetime conversation bookkeeping for the chat widget.
//!
//! Each data source gets its own [`Conversation`]: the transcript exactly as
//! it is rendered, and the turn history whose tail is sent upstream as
//! conversation context. Switching tabs only changes which conversation is
//! active, so coming back to a source shows the same transcript again.
//!
//! A question goes through two steps. [`ConversationStore::begin_question`]
//! appends the user entry plus a single loading placeholder and returns a
//! [`PendingAnswer`] naming that placeholder. When the request settles,
//! [`ConversationStore::complete`] or [`ConversationStore::fail`] replaces
//! the placeholder in place. The pending handle carries the source id, so a
//! late answer lands in the conversation it belongs to even if another tab
//! is active by then.

use crate::model::chat::{ChatResponse, ConversationTurn, SearchSource};
use std::collections::HashMap;

/// Number of most recent turns sent upstream with each question.
pub const HISTORY_WINDOW: usize = 10;

/// First transcript entry of every conversation.
pub const WELCOME_MESSAGE: &str =
    "안녕하세요! 데이터에 대해 궁금한 점을 물어보세요. 예: \"중학생은 몇 명인가요?\"";

/// Returns the last [`HISTORY_WINDOW`] turns.
pub fn recent_window(turns: &[ConversationTurn]) -> Vec<ConversationTurn> {
    let start = turns.len().saturating_sub(HISTORY_WINDOW);
    turns[start..].to_vec()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    Text(String),
    Loading,
    Answer {
        text: String,
        web_search_count: Option<usize>,
        sources: Vec<SearchSource>,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub body: EntryBody,
}

impl TranscriptEntry {
    fn bot(body: EntryBody) -> Self {
        Self {
            sender: Sender::Bot,
            body,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.body, EntryBody::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub transcript: Vec<TranscriptEntry>,
    pub history: Vec<ConversationTurn>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            transcript: vec![TranscriptEntry::bot(EntryBody::Text(
                WELCOME_MESSAGE.to_string(),
            ))],
            history: Vec::new(),
        }
    }
}

impl Conversation {
    pub fn has_pending(&self) -> bool {
        self.transcript.iter().any(TranscriptEntry::is_loading)
    }
}

/// Handle for a question whose answer has not arrived yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnswer {
    pub source_id: String,
    pub question: String,
    /// Conversation context captured before the question was appended.
    pub history: Vec<ConversationTurn>,
    placeholder: usize,
}

/// Conversations keyed by data-source id. The empty string is used when no
/// data source is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationStore {
    conversations: HashMap<String, Conversation>,
    active: String,
}

impl ConversationStore {
    pub fn new() -> Self {
        let mut store = Self::default();
        store.activate("");
        store
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    /// Makes `source_id` the active conversation, starting it with the
    /// welcome message on first visit.
    pub fn activate(&mut self, source_id: &str) {
        self.active = source_id.to_string();
        self.conversations
            .entry(self.active.clone())
            .or_default();
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.conversations.get(&self.active)
    }

    pub fn get(&self, source_id: &str) -> Option<&Conversation> {
        self.conversations.get(source_id)
    }

    /// Appends `question` and its loading placeholder to the active
    /// conversation.
    pub fn begin_question(&mut self, question: &str) -> PendingAnswer {
        let source_id = self.active.clone();
        let conversation = self.conversations.entry(source_id.clone()).or_default();

        let history = recent_window(&conversation.history);
        conversation.transcript.push(TranscriptEntry {
            sender: Sender::User,
            body: EntryBody::Text(question.to_string()),
        });
        conversation
            .transcript
            .push(TranscriptEntry::bot(EntryBody::Loading));
        conversation.history.push(ConversationTurn::user(question));

        PendingAnswer {
            source_id,
            question: question.to_string(),
            history,
            placeholder: conversation.transcript.len() - 1,
        }
    }

    /// Replaces the placeholder of `pending` with the answer.
    pub fn complete(&mut self, pending: &PendingAnswer, response: ChatResponse) {
        if let Some(conversation) = self.settle(
            pending,
            EntryBody::Answer {
                text: response.answer.clone(),
                web_search_count: response.web_search_count,
                sources: response.search_sources,
            },
        ) {
            conversation
                .history
                .push(ConversationTurn::assistant(response.answer));
        }
    }

    /// Replaces the placeholder of `pending` with an error message.
    pub fn fail(&mut self, pending: &PendingAnswer, message: impl Into<String>) {
        self.settle(pending, EntryBody::Error(message.into()));
    }

    fn settle(&mut self, pending: &PendingAnswer, body: EntryBody) -> Option<&mut Conversation> {
        let conversation = self.conversations.get_mut(&pending.source_id)?;
        let entry = conversation.transcript.get_mut(pending.placeholder)?;
        if !entry.is_loading() {
            return None;
        }
        entry.body = body;
        Some(conversation)
    }
}
