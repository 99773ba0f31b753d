pub mod health;
pub mod swagger;
pub mod usuarios;

use std::sync::Arc;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::{database::UserStore, models::ErrorResponse};

/// Estado compartilhado pelos handlers via `web::Data`.
///
/// O store é injetado na construção; os handlers só conhecem a trait.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        AppState { store }
    }
}

/// Corpo JSON inválido vira 400 com o corpo de erro padrão
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️ Invalid JSON body: {}", err);
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::with_details("Invalid JSON body", &err));
        InternalError::from_response(err, response).into()
    })
}

/// Registra todas as rotas da API
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/usuarios")
                .app_data(json_config())
                .service(usuarios::list_users)
                .service(usuarios::get_user_stats)
                .service(usuarios::list_users_by_role)
                .service(usuarios::create_user)
                .service(usuarios::update_user)
                .service(usuarios::delete_user),
        );
}
