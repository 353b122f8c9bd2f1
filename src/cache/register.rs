//! 缓存后端注册表
//!
//! 各后端通过 `declare_cache_backend!` 在进程启动时写入注册表，
//! 启动流程再按配置的名字取出构造器。

use crate::cache::traits::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

/// 后端构造器返回的装箱 future
pub type BoxedCacheFuture = Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
/// 缓存后端构造器，注册表按名字保存
pub type CacheBackendCtor = Arc<dyn Fn() -> BoxedCacheFuture + Send + Sync>;

static CACHE_BACKENDS: Lazy<RwLock<HashMap<String, CacheBackendCtor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_cache_backend<S: Into<String>>(name: S, constructor: CacheBackendCtor) {
    let name = name.into();
    let mut backends = CACHE_BACKENDS
        .write()
        .expect("Cache backend registry lock poisoned");
    if backends.insert(name.clone(), constructor).is_some() {
        tracing::warn!("Cache backend '{}' registered twice, keeping the last", name);
    }
}

pub fn get_cache_backend(name: &str) -> Option<CacheBackendCtor> {
    CACHE_BACKENDS
        .read()
        .expect("Cache backend registry lock poisoned")
        .get(name)
        .cloned()
}

/// 打印当前注册的缓存后端，调试用
pub fn log_cache_backends() {
    let backends = CACHE_BACKENDS
        .read()
        .expect("Cache backend registry lock poisoned");
    let mut names: Vec<&str> = backends.keys().map(String::as_str).collect();
    names.sort_unstable();
    tracing::debug!("Registered cache backends: {:?}", names);
}
