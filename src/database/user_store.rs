// ==================== USER STORE ====================
// Porta de persistência dos usuários. Os handlers recebem um
// `Arc<dyn UserStore>` para rodar contra MongoDB ou memória.

use crate::{
    database::MongoDB,
    models::{RoleCount, User, UserStats, UserUpdate},
    utils::AppError,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Collection, Database,
};
use serde::Deserialize;

pub const USERS_COLLECTION: &str = "usuarios";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Todos os usuários, na ordem natural do store
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Match exato e case-sensitive em `role`
    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    async fn count_by_role(&self) -> Result<Vec<RoleCount>, AppError>;

    async fn count_active(&self) -> Result<u64, AppError>;

    /// Persiste e devolve o usuário com `id` atribuído
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// Sobrescreve apenas `name` e `role`. `Ok(None)` se o id não existe.
    async fn update_name_role(&self, id: &str, update: UserUpdate)
        -> Result<Option<User>, AppError>;

    /// Remove e devolve o estado anterior. `Ok(None)` se o id não existe.
    async fn delete(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    /// Three independent reads; no isolation between them.
    async fn stats(&self) -> Result<UserStats, AppError> {
        let total = self.count().await?;
        let by_role = self.count_by_role().await?;
        let active = self.count_active().await?;

        Ok(UserStats { total, by_role, active })
    }
}

pub fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// Linha do `$group` por role
#[derive(Debug, Deserialize)]
struct RoleGroup {
    #[serde(rename = "_id")]
    role: Option<String>,
    total: i64,
}

#[derive(Clone)]
pub struct MongoUserStore {
    database: Database,
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        MongoUserStore {
            database: db.database().clone(),
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, AppError> {
        let cursor = self.collection.find(doc! { "role": role }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn count_by_role(&self) -> Result<Vec<RoleCount>, AppError> {
        let pipeline = vec![doc! {
            "$group": { "_id": "$role", "total": { "$sum": 1 } }
        }];

        let groups: Vec<Document> = self.collection.aggregate(pipeline).await?.try_collect().await?;

        groups
            .into_iter()
            .map(|group| {
                let group: RoleGroup = mongodb::bson::from_document(group)
                    .map_err(|e| AppError::DatabaseError(format!("Invalid role group: {}", e)))?;
                Ok(RoleCount {
                    role: group.role.unwrap_or_default(),
                    total: group.total.max(0) as u64,
                })
            })
            .collect()
    }

    async fn count_active(&self) -> Result<u64, AppError> {
        Ok(self.collection.count_documents(doc! { "active": true }).await?)
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let result = self.collection.insert_one(&user).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("Inserted id is not an ObjectId".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }

    async fn update_name_role(
        &self,
        id: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, AppError> {
        let object_id = parse_user_id(id)?;

        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": { "name": update.name, "role": update.role } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = parse_user_id(id)?;
        Ok(self.collection.find_one_and_delete(doc! { "_id": object_id }).await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        let id = ObjectId::new();
        assert_eq!(parse_user_id(&id.to_hex()), Ok(id));
        assert_eq!(
            parse_user_id("not-an-id"),
            Err(AppError::InvalidId("not-an-id".to_string()))
        );
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongo_store_crud() {
        dotenv::dotenv().ok();

        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/usuarios_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();
        let store = MongoUserStore::new(&db);
        store.ping().await.unwrap();

        let role = format!("role-{}", ObjectId::new().to_hex());
        let created = store
            .insert(User::new("Ana".to_string(), role.clone(), None))
            .await
            .unwrap();
        let id = created.id.unwrap().to_hex();

        let by_role = store.find_by_role(&role).await.unwrap();
        assert_eq!(by_role.len(), 1);
        assert!(by_role[0].active);

        let updated = store
            .update_name_role(&id, UserUpdate { name: "Ana2".to_string(), role: role.clone() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Ana2");
        assert_eq!(updated.created_at, created.created_at);

        let stats = store.stats().await.unwrap();
        assert!(stats.by_role.iter().any(|r| r.role == role && r.total == 1));

        assert!(store.delete(&id).await.unwrap().is_some());
        assert!(store.delete(&id).await.unwrap().is_none());
    }
}
