use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Usuarios Service API",
        version = "1.0.0",
        description = "CRUD and aggregate statistics over the `usuarios` collection.\n\n**Errors:** every failure answers `{ \"error\": string, \"details\"?: string }`."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Usuarios
        crate::api::usuarios::list_users,
        crate::api::usuarios::list_users_by_role,
        crate::api::usuarios::get_user_stats,
        crate::api::usuarios::create_user,
        crate::api::usuarios::update_user,
        crate::api::usuarios::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::UserResponse,
            crate::models::CreateUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::UserStats,
            crate::models::RoleCount,
            crate::models::DeletedUserResponse,
            crate::models::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service and store health."),
        (name = "Usuarios", description = "User resource: list, filter by role, statistics, create, update and delete."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/health",
            "/usuarios",
            "/usuarios/rol/{rol}",
            "/usuarios/stats",
            "/usuarios/{id}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }
}
