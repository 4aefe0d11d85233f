//! Diagnostics for checking what the chat endpoint would read.
//!
//! - `GET /api/debug/sheet-data`: headers, first row, row count and the
//!   respondent names of a source. Takes the same optional identifiers as
//!   `POST /api/chat` in the query string and falls back to the default source.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod sheet_data;

const API_PATH: &str = "/api/debug";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/sheet-data", get().to(sheet_data::process))
}
