use serde::{Deserialize, Serialize};

/// 应用总配置，字段与 config.toml 的顶层 section 一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub argon2: Argon2Config,
    pub invite: InviteConfig,
}

/// 应用基本信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时优先使用 Unix 套接字，host/port 失效
    pub unix_socket_path: String,
    /// 0 表示按 CPU 核数自动决定（上限 max_workers）
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default)]
    pub timeouts: ServerTimeouts,
    #[serde(default)]
    pub limits: ServerLimits,
}

/// 连接超时，省略时用默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerTimeouts {
    /// 读完整个请求的时限（毫秒）
    pub client_request: u64,
    /// 等待客户端断开的时限（毫秒）
    pub client_disconnect: u64,
    /// keep-alive 空闲时长（秒）
    pub keep_alive: u64,
}

impl Default for ServerTimeouts {
    fn default() -> Self {
        Self {
            client_request: 30_000,
            client_disconnect: 5_000,
            keep_alive: 75,
        }
    }
}

/// 请求体限制
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerLimits {
    /// 单位字节
    pub max_payload_size: usize,
}

impl Default for ServerLimits {
    fn default() -> Self {
        Self {
            max_payload_size: 10 * 1024 * 1024,
        }
    }
}

/// JWT 配置，时长单位见各字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// 签名密钥，不回显到任何序列化输出
    #[serde(skip_serializing, default)]
    pub secret: String,
    /// access token 有效期（分钟）
    pub access_token_expiry: i64,
    /// refresh token 有效期（天）
    pub refresh_token_expiry: i64,
    /// 勾选记住我后的 refresh token 有效期（天）
    pub refresh_token_remember_me_expiry: i64,
}

/// 数据库配置，类型从 URL scheme 推断
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    /// 连接超时（秒）
    pub timeout: u64,
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 后端名，memory 或 redis
    #[serde(rename = "type")]
    pub cache_type: String,
    /// 条目默认存活时长（秒）
    #[serde(default = "default_cache_ttl")]
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryCacheConfig,
}

/// Redis 后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    /// 所有键统一加这个前缀，便于多应用共用一个库
    pub key_prefix: String,
    pub pool_size: u64,
}

/// 进程内缓存后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    #[serde(default = "default_memory_capacity")]
    pub max_capacity: u64,
}

/// CORS 配置，列表里出现 "*" 表示放开对应维度
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

/// Argon2 密码哈希参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// 单位 KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

/// 邀请码配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteConfig {
    /// 单次批量生成的数量上限
    #[serde(default = "default_invite_batch")]
    pub max_batch: u32,
}

fn default_max_workers() -> usize {
    8
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_memory_capacity() -> u64 {
    10_000
}

fn default_cors_max_age() -> usize {
    3600
}

fn default_invite_batch() -> u32 {
    100
}
