use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::datasource::{DataSource, NewDataSource};
use log::{info, warn};

use super::{store, validate};
use crate::config::Config;
use crate::db;
use crate::services::ServiceError;

pub(crate) async fn process(
    config: web::Data<Config>,
    id: web::Path<String>,
    payload: web::Json<NewDataSource>,
) -> impl Responder {
    match update_data_source(&config, &id, payload.into_inner()) {
        Ok(source) => HttpResponse::Ok().json(source),
        Err(e) => {
            warn!("Updating data source {} failed: {}", id, e);
            e.error_response()
        }
    }
}

fn update_data_source(
    config: &Config,
    id: &str,
    new: NewDataSource,
) -> Result<DataSource, ServiceError> {
    validate(&new)?;

    let conn = db::open(&config.database_path)?;
    let source = store::update(&conn, id, &new)?
        .ok_or_else(|| ServiceError::NotFound(format!("데이터 소스를 찾을 수 없습니다: {}", id)))?;
    info!("Updated data source '{}' ({})", source.title, source.id);
    Ok(source)
}
