use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::{
    database::{parse_user_id, UserStore},
    models::{RoleCount, User, UserUpdate},
    utils::AppError,
};

/// Store em processo. Mantém a ordem de inserção como "ordem natural".
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.role == role).cloned().collect())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }

    async fn count_by_role(&self) -> Result<Vec<RoleCount>, AppError> {
        let users = self.users.read().await;

        let mut counts: Vec<RoleCount> = Vec::new();
        for user in users.iter() {
            match counts.iter_mut().find(|c| c.role == user.role) {
                Some(count) => count.total += 1,
                None => counts.push(RoleCount {
                    role: user.role.clone(),
                    total: 1,
                }),
            }
        }

        Ok(counts)
    }

    async fn count_active(&self) -> Result<u64, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.active).count() as u64)
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        user.id = Some(ObjectId::new());

        let mut users = self.users.write().await;
        users.push(user.clone());
        Ok(user)
    }

    async fn update_name_role(
        &self,
        id: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, AppError> {
        let object_id = parse_user_id(id)?;

        let mut users = self.users.write().await;
        Ok(users
            .iter_mut()
            .find(|u| u.id == Some(object_id))
            .map(|user| {
                user.name = update.name;
                user.role = update.role;
                user.clone()
            }))
    }

    async fn delete(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = parse_user_id(id)?;

        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|u| u.id == Some(object_id))
            .map(|index| users.remove(index)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, role: &str) -> User {
        User::new(name.to_string(), role.to_string(), None)
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let store = InMemoryUserStore::new();

        let a = store.insert(user("Ana", "admin")).await.unwrap();
        let b = store.insert(user("Bruno", "admin")).await.unwrap();

        assert!(a.id.is_some());
        assert_ne!(a.id, b.id);
        assert_eq!(store.find_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_find_by_role_is_exact_match() {
        let store = InMemoryUserStore::new();
        store.insert(user("Ana", "admin")).await.unwrap();
        store.insert(user("Bruno", "Admin")).await.unwrap();
        store.insert(user("Carla", "administrator")).await.unwrap();
        store.insert(user("Davi", "player")).await.unwrap();

        let admins = store.find_by_role("admin").await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].name, "Ana");

        assert!(store.find_by_role("adm").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_only_touches_name_and_role() {
        let store = InMemoryUserStore::new();
        let mut original = user("Ana", "admin");
        original.email = Some("ana@example.com".to_string());
        let created = store.insert(original).await.unwrap();
        let id = created.id.unwrap().to_hex();

        let updated = store
            .update_name_role(&id, UserUpdate { name: "Ana2".to_string(), role: "player".to_string() })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Ana2");
        assert_eq!(updated.role, "player");
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.active, created.active);
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids() {
        let store = InMemoryUserStore::new();
        store.insert(user("Ana", "admin")).await.unwrap();
        let unused = ObjectId::new().to_hex();

        let update = UserUpdate { name: "X".to_string(), role: "Y".to_string() };
        assert_eq!(store.update_name_role(&unused, update.clone()).await, Ok(None));
        assert_eq!(store.delete(&unused).await, Ok(None));
        assert_eq!(store.count().await, Ok(1));

        assert!(matches!(
            store.update_name_role("123", update).await,
            Err(AppError::InvalidId(_))
        ));
        assert!(matches!(store.delete("123").await, Err(AppError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_stats() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.stats().await.unwrap().total, 0);

        store.insert(user("Ana", "admin")).await.unwrap();
        store.insert(user("Bruno", "player")).await.unwrap();
        store.insert(user("Carla", "player")).await.unwrap();

        let mut inactive = user("Davi", "player");
        inactive.active = false;
        store.insert(inactive).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(
            stats.by_role,
            vec![
                RoleCount { role: "admin".to_string(), total: 1 },
                RoleCount { role: "player".to_string(), total: 3 },
            ]
        );
    }
}
