//! 缓存层
//!
//! 后端以插件形式在进程启动时注册，按配置选择，
//! redis 不可用时回退到进程内缓存。
//!
//! 目前用于缓存已认证的登录主体，减少每次请求的数据库往返。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个缓存后端，进程启动时自动注册到全局表
#[macro_export]
macro_rules! declare_cache_backend {
    ($name:literal, $backend:ty) => {
        const _: () = {
            #[ctor::ctor]
            fn register() {
                $crate::cache::register::register_cache_backend(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let backend = <$backend>::new()?;
                            Ok(Box::new(backend) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        };
    };
}
