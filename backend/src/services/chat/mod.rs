//! # Chat Service Module
//!
//! Answers questions about a data source. It provides the backend logic for the
//! `POST /api/chat` endpoint used by the chat widget.
//!
//! ## Workflow
//!
//! 1.  **Validation**: `ask::process` receives a `ChatRequest`. An empty question is
//!     rejected with `400` before anything else happens.
//!
//! 2.  **Source resolution**: the identifiers in the request win. Without them the
//!     default source of the registry is used, then the sheet configured through
//!     `DEFAULT_SPREADSHEET_ID`.
//!
//! 3.  **Data fetching**: `fetch` downloads the sheet tab as CSV or the document as
//!     plain text from Google's export urls. When the client asked for it and search
//!     credentials are configured, `search` queries Google Custom Search at the same time.
//!
//! 4.  **Prompt**: `prompt` renders the data, the web results and the question.
//!
//! 5.  **Completion**: `claude` sends the last ten conversation turns plus the prompt to
//!     the Anthropic Messages API and the text of the reply becomes the `answer`.

mod ask;
mod claude;
pub(crate) mod fetch;
mod prompt;
mod search;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/chat";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(ask::process))
}
