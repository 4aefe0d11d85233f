//! Respondent counts for the resolved spreadsheet.
//!
//! - `GET /api/demographics`: total rows and the share of middle and high
//!   school students, read from the grade column.

use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, ResponseError, Scope};
use log::warn;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::services::chat::fetch::{self, SheetTable, SourceContent};
use crate::services::source::SourceQuery;
use crate::services::ServiceError;

const API_PATH: &str = "/api/demographics";

const MIDDLE_SCHOOL: &str = "중학생";
const HIGH_SCHOOL: &str = "고등학생";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Demographics {
    pub total_count: usize,
    /// Percent of all rows, one decimal.
    pub school_year: BTreeMap<&'static str, f64>,
}

async fn process(
    config: web::Data<Config>,
    client: web::Data<Client>,
    query: web::Query<SourceQuery>,
) -> impl Responder {
    match demographics(&config, &client, &query).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            warn!("Demographics failed: {}", e);
            e.error_response()
        }
    }
}

async fn demographics(
    config: &Config,
    client: &Client,
    query: &SourceQuery,
) -> Result<Demographics, ServiceError> {
    let source = query.resolve(config)?;
    match fetch::fetch_source(client, &config.google.docs_base_url, &source.locator).await? {
        SourceContent::Table(table) => Ok(count_school_years(&table)),
        SourceContent::Document(_) => Err(ServiceError::BadRequest(
            "문서에서는 응답자 통계를 낼 수 없습니다. 스프레드시트를 선택해주세요.".to_string(),
        )),
    }
}

fn count_school_years(table: &SheetTable) -> Demographics {
    let total_count = table.rows.len();
    let (middle, high) = match table.find_column(&[], &["학년", "grade"]) {
        Some(idx) => table
            .column_values(idx)
            .into_iter()
            .fold((0usize, 0usize), |(m, h), value| match school_of(value) {
                Some(MIDDLE_SCHOOL) => (m + 1, h),
                Some(_) => (m, h + 1),
                None => (m, h),
            }),
        None => (0, 0),
    };

    let mut school_year = BTreeMap::new();
    school_year.insert(MIDDLE_SCHOOL, percent(middle, total_count));
    school_year.insert(HIGH_SCHOOL, percent(high, total_count));
    Demographics {
        total_count,
        school_year,
    }
}

fn school_of(grade: &str) -> Option<&'static str> {
    let grade = grade.trim();
    if grade.starts_with('중') || grade.contains("중학") {
        Some(MIDDLE_SCHOOL)
    } else if grade.starts_with('고') || grade.contains("고등") {
        Some(HIGH_SCHOOL)
    } else {
        None
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}
