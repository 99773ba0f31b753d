use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use crate::{
    api::AppState,
    models::{
        CreateUserRequest, DeletedUserResponse, ErrorResponse, UpdateUserRequest, User,
        UserResponse, UserStats,
    },
};

const USER_NOT_FOUND: &str = "User not found";

fn to_responses(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

/// GET /usuarios - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "Usuarios",
    responses(
        (status = 200, description = "All users, in store order", body = [UserResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[get("")]
pub async fn list_users(state: web::Data<AppState>) -> impl Responder {
    log::info!("📥 GET /usuarios - Listing users");

    match state.store.find_all().await {
        Ok(users) => {
            log::info!("✅ Users found: {}", users.len());
            HttpResponse::Ok().json(to_responses(users))
        }
        Err(e) => {
            log::error!("❌ Error in GET /usuarios: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Failed to fetch users", e))
        }
    }
}

/// GET /usuarios/rol/{rol} - Usuários com o rol exato
#[utoipa::path(
    get,
    path = "/usuarios/rol/{rol}",
    tag = "Usuarios",
    params(("rol" = String, Path, description = "Exact, case-sensitive role")),
    responses(
        (status = 200, description = "Users with the given role", body = [UserResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[get("/rol/{rol}")]
pub async fn list_users_by_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let role = path.into_inner();
    log::info!("🔍 GET /usuarios/rol/{} - Searching users by role", role);

    match state.store.find_by_role(&role).await {
        Ok(users) => {
            log::info!("✅ Users with role {}: {}", role, users.len());
            HttpResponse::Ok().json(to_responses(users))
        }
        Err(e) => {
            log::error!("❌ Error searching by role {}: {}", role, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Search failed"))
        }
    }
}

/// GET /usuarios/stats - Total, total por rol e ativos
#[utoipa::path(
    get,
    path = "/usuarios/stats",
    tag = "Usuarios",
    responses(
        (status = 200, description = "Aggregate counts", body = UserStats),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[get("/stats")]
pub async fn get_user_stats(state: web::Data<AppState>) -> impl Responder {
    log::info!("📊 GET /usuarios/stats - Computing statistics");

    match state.store.stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            log::error!("❌ Error computing statistics: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch statistics"))
        }
    }
}

/// POST /usuarios - Cria usuário
#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "Usuarios",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing name or role", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[post("")]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> impl Responder {
    log::info!("📥 POST /usuarios - Creating user");
    log::debug!("📦 Payload: {:?}", body);

    let user = match body.into_inner().into_user() {
        Ok(user) => user,
        Err(e) => {
            log::warn!("⚠️ Incomplete data: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                crate::models::REQUIRED_FIELDS_MESSAGE,
            ));
        }
    };

    match state.store.insert(user).await {
        Ok(created) => {
            log::info!("✅ User created: {:?}", created.id);
            HttpResponse::Created().json(UserResponse::from(created))
        }
        Err(e) => {
            log::error!("❌ Error in POST /usuarios: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Failed to create user", e))
        }
    }
}

/// PUT /usuarios/{id} - Atualiza name e role
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = String, Path, description = "User id (24-char hex)")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User after the update", body = UserResponse),
        (status = 400, description = "Missing name or role", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Malformed id or store failure", body = ErrorResponse)
    )
)]
#[put("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> impl Responder {
    let user_id = path.into_inner();
    log::info!("📝 PUT /usuarios/{} - Updating user", user_id);
    log::debug!("📦 Payload: {:?}", body);

    let update = match body.into_inner().into_update() {
        Ok(update) => update,
        Err(e) => {
            log::warn!("⚠️ Incomplete data: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                crate::models::REQUIRED_FIELDS_MESSAGE,
            ));
        }
    };

    match state.store.update_name_role(&user_id, update).await {
        Ok(Some(updated)) => {
            log::info!("✅ User updated: {}", user_id);
            HttpResponse::Ok().json(UserResponse::from(updated))
        }
        Ok(None) => {
            log::warn!("⚠️ User not found: {}", user_id);
            HttpResponse::NotFound().json(ErrorResponse::new(USER_NOT_FOUND))
        }
        Err(e) => {
            log::error!("❌ Error in PUT /usuarios/{}: {}", user_id, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Failed to update user", e))
        }
    }
}

/// DELETE /usuarios/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = String, Path, description = "User id (24-char hex)")),
    responses(
        (status = 200, description = "User removed", body = DeletedUserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Malformed id or store failure", body = ErrorResponse)
    )
)]
#[delete("/{id}")]
pub async fn delete_user(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    log::info!("🗑️  DELETE /usuarios/{} - Removing user", user_id);

    match state.store.delete(&user_id).await {
        Ok(Some(deleted)) => {
            log::info!("✅ User deleted: {}", user_id);
            HttpResponse::Ok().json(DeletedUserResponse {
                message: "User deleted successfully".to_string(),
                deleted_user: UserResponse::from(deleted),
            })
        }
        Ok(None) => {
            log::warn!("⚠️ User not found: {}", user_id);
            HttpResponse::NotFound().json(ErrorResponse::new(USER_NOT_FOUND))
        }
        Err(e) => {
            log::error!("❌ Error in DELETE /usuarios/{}: {}", user_id, e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Failed to delete user", e))
        }
    }
}
