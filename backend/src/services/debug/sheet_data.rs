use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::warn;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::services::chat::fetch::{self, SourceContent};
use crate::services::source::SourceQuery;
use crate::services::ServiceError;

/// Header names survey forms use for the respondent's name.
const NAME_COLUMNS: [&str; 3] = ["이름을 적어주세요", "이름", "Name"];

#[derive(Debug, Serialize)]
pub struct SheetDataReport {
    pub source_type: &'static str,
    pub resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub data_count: usize,
    pub headers: Vec<String>,
    pub first_row: Option<Map<String, Value>>,
    pub all_names: Vec<String>,
}

pub(crate) async fn process(
    config: web::Data<Config>,
    client: web::Data<Client>,
    query: web::Query<SourceQuery>,
) -> impl Responder {
    match sheet_data(&config, &client, &query).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            warn!("Sheet data check failed: {}", e);
            e.error_response()
        }
    }
}

async fn sheet_data(
    config: &Config,
    client: &Client,
    query: &SourceQuery,
) -> Result<SheetDataReport, ServiceError> {
    let source = query.resolve(config)?;
    let content =
        fetch::fetch_source(client, &config.google.docs_base_url, &source.locator).await?;

    let mut report = SheetDataReport {
        source_type: source.locator.source_type(),
        resource_id: source.locator.resource_id().to_string(),
        title: source.title,
        data_count: content.data_count(),
        headers: Vec::new(),
        first_row: None,
        all_names: Vec::new(),
    };

    if let SourceContent::Table(table) = content {
        report.first_row = table.rows.first().map(|row| {
            table
                .headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                .collect()
        });
        report.all_names = table
            .find_column(&NAME_COLUMNS, &["이름", "name"])
            .map(|idx| table.column_values(idx).into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        report.headers = table.headers;
    }

    Ok(report)
}
