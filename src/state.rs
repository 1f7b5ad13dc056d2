use crate::auth::google::{GoogleVerifier, IdTokenVerifier};
use crate::config::AppConfig;
use crate::plants::repo::{MongoPlants, PlantRepo};
use crate::storage::{LocalStorage, StorageClient};
use crate::users::repo::{MongoRoles, MongoUsers, RoleRepo, UserRepo};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub roles: Arc<dyn RoleRepo>,
    pub plants: Arc<dyn PlantRepo>,
    pub storage: Arc<dyn StorageClient>,
    pub google: Arc<dyn IdTokenVerifier>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = crate::db::connect(&config).await?;
        let storage = Arc::new(LocalStorage::new(&config.upload_dir).await?) as Arc<dyn StorageClient>;
        let google = Arc::new(GoogleVerifier::new(&config.google)?) as Arc<dyn IdTokenVerifier>;

        Ok(Self {
            users: Arc::new(MongoUsers::new(&db)),
            roles: Arc::new(MongoRoles::new(&db)),
            plants: Arc::new(MongoPlants::new(&db)),
            storage,
            google,
            config,
        })
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by in-memory fakes; roles `USER_ROLE` and `ADMIN_ROLE`
    /// exist.
    pub fn fake() -> Self {
        use crate::config::{GoogleConfig, JwtConfig};
        use crate::memory::{FakeGoogle, MemoryPlants, MemoryRoles, MemoryStorage, MemoryUsers};

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "mongodb://localhost:27017".into(),
            database_name: "vivero-test".into(),
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            google: GoogleConfig {
                client_id: "test-client".into(),
                certs_url: "http://127.0.0.1:9/certs".into(),
            },
            public_dir: "public".into(),
            upload_dir: "imagenes".into(),
        });

        Self {
            config,
            users: Arc::new(MemoryUsers::default()),
            roles: Arc::new(MemoryRoles::new(["USER_ROLE", "ADMIN_ROLE"])),
            plants: Arc::new(MemoryPlants::default()),
            storage: Arc::new(MemoryStorage::default()),
            google: Arc::new(FakeGoogle),
        }
    }
}
