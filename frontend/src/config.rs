//! Endpoints baked in at build time.
//!
//! `API_BASE` defaults to the empty string so requests go to the origin that
//! served the page, which is the backend itself.

pub const API_BASE: &str = match option_env!("SHEET_CHAT_API_BASE") {
    Some(base) => base,
    None => "",
};

/// Apps Script web app that appends survey rows to the response sheet.
pub const SURVEY_ENDPOINT: &str = match option_env!("SURVEY_ENDPOINT") {
    Some(endpoint) => endpoint,
    None => "https://script.google.com/macros/s/REPLACE_WITH_DEPLOYMENT_ID/exec",
};

pub fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE.trim_end_matches('/'), path)
}
