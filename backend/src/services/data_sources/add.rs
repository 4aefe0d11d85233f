use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::datasource::{DataSource, NewDataSource};
use log::{info, warn};

use super::{store, validate};
use crate::config::Config;
use crate::db;
use crate::services::ServiceError;

pub(crate) async fn process(
    config: web::Data<Config>,
    payload: web::Json<NewDataSource>,
) -> impl Responder {
    match add_data_source(&config, payload.into_inner()) {
        Ok(source) => HttpResponse::Ok().json(source),
        Err(e) => {
            warn!("Adding data source failed: {}", e);
            e.error_response()
        }
    }
}

fn add_data_source(config: &Config, new: NewDataSource) -> Result<DataSource, ServiceError> {
    validate(&new)?;

    let conn = db::open(&config.database_path)?;
    let id = uuid::Uuid::new_v4().to_string();
    let source = store::insert(&conn, &id, &new)?;
    info!(
        "Registered {} source '{}' ({})",
        source.locator.source_type(),
        source.title,
        source.id
    );
    Ok(source)
}
