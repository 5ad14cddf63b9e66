use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use std::sync::Arc;

use link_shortener::config::AppConfig;
use link_shortener::db::MongoStore;
use link_shortener::geo;
use link_shortener::routes::init_routes;
use link_shortener::state::app_state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    // Initialize the database connection
    let store = MongoStore::connect(&config)
        .await
        .context("Error connecting to the database")?;

    // Create shared state
    let app_state = web::Data::new(AppState {
        store: Arc::new(store),
        geo: geo::from_config(&config),
        base_url: config.base_url.clone(),
    });

    info!("Listening on {}:{}", config.bind_addr, config.port);

    let cors_origins = config.cors_origins.clone();
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((config.bind_addr.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}
