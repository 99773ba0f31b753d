mod api;
mod config;
mod database;
mod models;
mod utils;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::AppState,
    config::{Config, StoreBackend},
    database::{InMemoryUserStore, MongoDB, MongoUserStore, UserStore},
    utils::AppError,
};

fn startup_error(err: AppError) -> std::io::Error {
    log::error!("❌ {}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

/// Sem store conectado o servidor não sobe
async fn build_store(config: &Config) -> Result<Arc<dyn UserStore>, AppError> {
    match config.store {
        StoreBackend::MongoDB => {
            log::info!("📊 Database: {}", config.mongodb_uri);
            let db = MongoDB::new(&config.mongodb_uri).await?;
            log::info!("✅ MongoDB connected successfully");
            Ok(Arc::new(MongoUserStore::new(&db)))
        }
        StoreBackend::Memory => {
            log::warn!("⚠️  Using in-memory user store; data is lost on restart");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
    }
}

fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting Usuarios Service...");

    let config = Config::from_env().map_err(startup_error)?;
    let store = build_store(&config).await.map_err(startup_error)?;
    let state = web::Data::new(AppState::new(store));

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("   👉 Local: http://localhost:{}", config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
