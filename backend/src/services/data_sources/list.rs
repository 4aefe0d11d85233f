use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::datasource::DataSource;
use log::error;

use super::store;
use crate::config::Config;
use crate::db;
use crate::services::ServiceError;

pub(crate) async fn process(config: web::Data<Config>) -> impl Responder {
    match list_data_sources(&config) {
        Ok(sources) => HttpResponse::Ok().json(sources),
        Err(e) => {
            error!("Listing data sources failed: {}", e);
            e.error_response()
        }
    }
}

fn list_data_sources(config: &Config) -> Result<Vec<DataSource>, ServiceError> {
    let conn = db::open(&config.database_path)?;
    Ok(store::list(&conn)?)
}
