use common::conversation::PendingAnswer;
use common::model::chat::ChatResponse;

pub enum Msg {
    SetInput(String),
    Send,
    ToggleWebSearch(bool),
    Settled(PendingAnswer, Result<ChatResponse, String>),
}
