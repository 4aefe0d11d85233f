mod config;
mod db;
mod services;

use crate::config::Config;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Timeout for calls to Google and Anthropic.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env();
    let url = config.url();

    db::init(&config.database_path).map_err(std::io::Error::other)?;
    if let Some(locator) = &config.default_source {
        let conn = db::open(&config.database_path).map_err(std::io::Error::other)?;
        if services::data_sources::store::seed_default(&conn, locator)
            .map_err(std::io::Error::other)?
        {
            info!("Registered default source {}", locator.resource_id());
        }
    }
    if config.anthropic.api_key.is_none() {
        warn!("ANTHROPIC_API_KEY not set; /api/chat will answer with an error");
    }

    let client = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .map_err(std::io::Error::other)?;

    if config.open_browser {
        let _url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&_url_clone);
        });
    }

    info!("Server running at {}", url);

    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);
    let client = web::Data::new(client);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(config.clone())
            .app_data(client.clone())
            .service(services::health::configure_routes())
            .service(services::data_sources::configure_routes())
            .service(services::chat::configure_routes())
            .service(services::debug::configure_routes())
            .service(services::demographics::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind(bind)?
        .run()
        .await
}
