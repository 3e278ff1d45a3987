use crate::cache::ObjectCache;
use crate::cache::register::{get_object_cache_plugin, registered_object_cache_plugins};
use crate::config::AppConfig;
use crate::errors::{Result, SchoolAdminError};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::{generate_password, hash_password};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@school.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn construct_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        SchoolAdminError::cache_plugin_not_found(format!(
            "Cache backend '{name}' is not registered (available: {:?})",
            registered_object_cache_plugins()
        ))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// 创建缓存实例，配置的后端不可用时回退到进程内缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();
    warn!("Attempting to create {} cache backend", cache_type);

    match construct_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != "moka" => {
            warn!("{}; falling back to Moka (in-memory) cache", e);
            construct_cache("moka").await
        }
        Err(e) => Err(e),
    }
}

/// 空库启动时写入演示数据
async fn seed_fixtures(storage: &Arc<dyn Storage>) {
    if !AppConfig::get().database.seed_fixtures {
        debug!("Fixture seeding disabled by configuration");
        return;
    }

    match storage.seed_fixtures().await {
        Ok(true) => warn!("Demo school data loaded"),
        Ok(false) => debug!("Business tables already contain data, skipping fixtures"),
        Err(e) => error!("Failed to seed demo data: {}", e),
    }
}

/// 没有任何账号时创建默认管理员
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} account(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No accounts found, creating default admin account..."),
        Err(e) => {
            warn!("Failed to count accounts: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| {
            let generated = generate_password(16);
            warn!("==========================================================");
            warn!("  ADMIN_PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", generated);
            warn!("==========================================================");
            generated
        });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password: password_hash,
        role: UserRole::Admin,
        display_name: Some("Administrator".to_string()),
    };

    match storage.create_user(admin_request).await {
        Ok(user) => info!(
            "Default admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动所需的存储与缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider was already installed");
    }

    debug!(
        "Registered cache backends: {:?}",
        registered_object_cache_plugins()
    );

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_fixtures(&storage).await;
    seed_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
