pub mod memory;
pub mod user_store;

pub use memory::InMemoryUserStore;
pub use user_store::{parse_user_id, MongoUserStore, UserStore, USERS_COLLECTION};

use crate::utils::AppError;
use mongodb::{Client, Collection, Database};

/// Banco usado quando a URI não traz o nome no path
pub const DEFAULT_DATABASE: &str = "fullstack_game";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Falha rápido no boot se o servidor não responder
        client_options
            .connect_timeout
            .get_or_insert(std::time::Duration::from_secs(5));
        client_options
            .server_selection_timeout
            .get_or_insert(std::time::Duration::from_secs(5));

        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        log::info!("📦 Using database: {}", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Index failures are logged and never abort startup.
    async fn ensure_indexes(&self) {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let usuarios = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);

        // Index: usuarios(role) - busca por rol e agregação de stats
        let role_index = IndexModel::builder()
            .keys(doc! { "role": 1 })
            .build();

        match usuarios.create_index(role_index).await {
            Ok(_) => log::info!("   ✅ Index created: {}(role)", USERS_COLLECTION),
            Err(e) => log::debug!("   ℹ️  Index not created: {}", e),
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/usuarios_test".to_string());
        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_fails() {
        let db = MongoDB::new("mongodb://127.0.0.1:1/usuarios_test?serverSelectionTimeoutMS=200").await;
        assert!(matches!(db, Err(AppError::DatabaseError(_))));
    }
}
