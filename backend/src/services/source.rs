//! Picks the data source a request is about.

use common::model::datasource::SourceLocator;
use serde::Deserialize;

use crate::config::Config;
use crate::db;
use crate::services::data_sources::store;
use crate::services::ServiceError;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    pub locator: SourceLocator,
    /// Title of the tab the user sees, when known.
    pub title: Option<String>,
}

/// Query string accepted by the read-only GET endpoints. Same identifiers as
/// the body of `POST /api/chat`; all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceQuery {
    pub spreadsheet_id: Option<String>,
    pub sheet_gid: Option<String>,
    pub sheet_name: Option<String>,
    pub document_id: Option<String>,
}

impl SourceQuery {
    pub fn resolve(&self, config: &Config) -> Result<ResolvedSource, ServiceError> {
        let requested = SourceLocator::from_ids(
            self.spreadsheet_id.as_deref(),
            self.sheet_gid.as_deref(),
            self.document_id.as_deref(),
        );
        resolve_source(config, requested, self.sheet_name.as_deref())
    }
}

/// The source named by the request, else the default registered source, else
/// the sheet configured through `DEFAULT_SPREADSHEET_ID`.
pub fn resolve_source(
    config: &Config,
    requested: Option<SourceLocator>,
    requested_title: Option<&str>,
) -> Result<ResolvedSource, ServiceError> {
    if let Some(locator) = requested {
        return Ok(ResolvedSource {
            locator,
            title: requested_title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        });
    }

    let conn = db::open(&config.database_path)?;
    if let Some(source) = store::default_source(&conn)? {
        return Ok(ResolvedSource {
            locator: source.locator,
            title: Some(source.title),
        });
    }

    config
        .default_source
        .clone()
        .map(|locator| ResolvedSource {
            locator,
            title: None,
        })
        .ok_or_else(|| {
            ServiceError::BadRequest(
                "선택된 데이터 소스가 없습니다. 먼저 데이터 소스를 추가해주세요.".to_string(),
            )
        })
}
