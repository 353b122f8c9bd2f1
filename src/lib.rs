//! AskSystem 校园答疑平台的后端服务。
//!
//! 主线是学生在课程下向老师提问、老师答复、学生确认并评分，
//! 学校、课程、聘用、选课、邀请码等管理能力围绕这条主线展开。
//!
//! 代码分层：
//! - `routes` 注册 HTTP 接口，`middlewares` 负责认证、授权和限流
//! - `services` 承载业务规则，经 `storage` 抽象访问数据库
//! - `entity` 是 SeaORM 实体，`models` 是对外的请求/响应类型
//! - `cache`、`config`、`errors`、`utils` 为各层公用

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
