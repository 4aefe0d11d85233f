//! Data source registry endpoints.
//!
//! The frontend lists the registered spreadsheets/documents as chat tabs and
//! edits them through the add and edit dialogs. Sources are never deleted.
//!
//! The provided routes are:
//! - `GET /api/data-sources`: every registered source, oldest first.
//! - `POST /api/data-sources`: registers a `NewDataSource` and returns the stored
//!   `DataSource` with its generated id. Marking it as default clears the flag
//!   on every other source.
//! - `PUT /api/data-sources/{id}`: overwrites an existing source; `404` when the id
//!   is unknown.

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;
use common::model::datasource::NewDataSource;

use crate::services::ServiceError;

mod add;
mod list;
pub mod store;
mod update;

const API_PATH: &str = "/api/data-sources";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(add::process))
        .route("/{id}", put().to(update::process))
}

/// Shared checks of the add and edit payloads.
fn validate(new: &NewDataSource) -> Result<(), ServiceError> {
    if new.title.trim().is_empty() {
        return Err(ServiceError::BadRequest("데이터 소스 이름을 입력해주세요.".to_string()));
    }
    if new.locator.resource_id().trim().is_empty() {
        return Err(ServiceError::BadRequest("시트 또는 문서 ID가 비어 있습니다.".to_string()));
    }
    Ok(())
}
