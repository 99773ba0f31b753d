use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// Valor inicial de `active` para todo usuário novo
pub const DEFAULT_ACTIVE: bool = true;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and role are required";

fn default_active() -> bool {
    DEFAULT_ACTIVE
}

/// Usuário (armazenado no MongoDB, coleção `usuarios`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub role: String,

    /// Sem validação de formato
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Definido uma única vez na criação
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,

    /// Gravado na criação e nunca alterado pelas rotas
    #[serde(default = "default_active")]
    pub active: bool,
}

impl User {
    pub fn new(name: String, role: String, email: Option<String>) -> Self {
        User {
            id: None,
            name,
            role,
            email,
            created_at: DateTime::now(),
            active: DEFAULT_ACTIVE,
        }
    }
}

/// Request para criar usuário
///
/// Campos opcionais no nível do serde para que a ausência vire 400 com o
/// corpo de erro padrão, e não uma falha de desserialização.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
}

impl CreateUserRequest {
    pub fn into_user(self) -> Result<User, AppError> {
        let (name, role) = require_name_role(self.name, self.role)?;
        Ok(User::new(name, role, self.email))
    }
}

/// Request para atualizar usuário. Qualquer outro campo do corpo é ignorado.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_update(self) -> Result<UserUpdate, AppError> {
        let (name, role) = require_name_role(self.name, self.role)?;
        Ok(UserUpdate { name, role })
    }
}

/// Os únicos campos mutáveis de um usuário
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub name: String,
    pub role: String,
}

fn require_name_role(
    name: Option<String>,
    role: Option<String>,
) -> Result<(String, String), AppError> {
    match (name, role) {
        (Some(name), Some(role)) if !name.is_empty() && !role.is_empty() => Ok((name, role)),
        _ => Err(AppError::InvalidRequest(REQUIRED_FIELDS_MESSAGE.to_string())),
    }
}

/// Response de usuário
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// RFC 3339
    pub created_at: String,
    pub active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            role: user.role,
            email: user.email,
            created_at: user.created_at.try_to_rfc3339_string().unwrap_or_default(),
            active: user.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleCount {
    pub role: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: u64,
    pub by_role: Vec<RoleCount>,
    pub active: u64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedUserResponse {
    pub message: String,
    pub deleted_user: UserResponse,
}
