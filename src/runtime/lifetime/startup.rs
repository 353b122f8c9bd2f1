use crate::cache::{ObjectCache, register::get_cache_backend};
use crate::config::AppConfig;
use crate::errors::AskSystemError;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按名字从注册表构建一个缓存后端，构建失败只记日志
async fn build_cache_backend(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_cache_backend(name)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Cache backend '{}' ready", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to initialize cache backend '{}': {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时退回进程内缓存
async fn create_cache() -> crate::errors::Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();

    if get_cache_backend(cache_type).is_none() {
        warn!("Cache backend '{}' not found in registry", cache_type);
    }
    if let Some(cache) = build_cache_backend(cache_type).await {
        return Ok(cache);
    }

    if cache_type != "memory" {
        warn!("Falling back to in-memory cache");
        if let Some(cache) = build_cache_backend("memory").await {
            return Ok(cache);
        }
    }

    Err(AskSystemError::cache_plugin_not_found(format!(
        "no usable cache backend (configured: {cache_type})"
    )))
}

/// 首次启动时创建默认的 admin 账号，已有管理员则什么都不做。
/// 密码取 ADMIN_PASSWORD 环境变量，没设置就随机生成并打印到日志。
async fn seed_admin(storage: &Arc<dyn Storage>) -> crate::errors::Result<()> {
    let count = storage.count_admins().await?;
    if count > 0 {
        debug!("Database already has {} admin(s), skipping admin seed", count);
        return Ok(());
    }

    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            let generated = crate::utils::random_code::generate_random_code(16);
            warn!("ADMIN_PASSWORD not set, generated admin password: {}", generated);
            warn!("Save it now or set ADMIN_PASSWORD, it will not be shown again");
            generated
        }
    };

    let password_hash = hash_password(&password)?;
    let admin = storage.create_admin("admin", &password_hash).await?;
    info!(
        "Default admin account created (ID: {}, username: {})",
        admin.id, admin.username
    );
    Ok(())
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和默认账号种子
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::log_cache_backends();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 账号种子失败不阻塞启动，管理员可以事后手工补建
    if let Err(e) = seed_admin(&storage).await {
        warn!("Admin seed skipped: {}", e);
    }

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
