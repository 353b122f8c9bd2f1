//! 统一错误类型
//!
//! 所有内部错误都归并为 [`AskSystemError`]，每个变体带一个固定编号和
//! 人类可读的标签，日志里按 `[编号] 标签: 详情` 输出。

use std::fmt;

/// 按 `变体 => (编号, 标签)` 的形式批量定义错误变体，
/// 同时生成 snake_case 的便捷构造函数。
macro_rules! define_asksystem_errors {
    ($(
        $variant:ident => ($code:literal, $label:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AskSystemError {
            $($variant(String),)*
        }

        impl AskSystemError {
            /// 错误编号，稳定不变，供日志检索
            pub fn code(&self) -> &'static str {
                match self {
                    $(AskSystemError::$variant(_) => $code,)*
                }
            }

            /// 错误标签
            pub fn label(&self) -> &'static str {
                match self {
                    $(AskSystemError::$variant(_) => $label,)*
                }
            }

            /// 错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AskSystemError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl AskSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AskSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_asksystem_errors! {
    CacheConnection => ("E001", "Cache Connection Error"),
    CachePluginNotFound => ("E002", "Cache Plugin Not Found"),
    DatabaseConfig => ("E003", "Database Configuration Error"),
    DatabaseConnection => ("E004", "Database Connection Error"),
    DatabaseOperation => ("E005", "Database Operation Error"),
    Validation => ("E006", "Validation Error"),
    NotFound => ("E007", "Resource Not Found"),
    Conflict => ("E008", "Resource Conflict"),
    Forbidden => ("E009", "Operation Forbidden"),
    QuotaExceeded => ("E010", "Quota Exceeded"),
    QuotaConflict => ("E011", "Quota Conflict"),
    NotAnswered => ("E012", "Not Answered"),
}

impl fmt::Display for AskSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code(), self.label(), self.message())
    }
}

impl std::error::Error for AskSystemError {}

impl From<sea_orm::DbErr> for AskSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        AskSystemError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AskSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(AskSystemError::cache_connection("test").code(), "E001");
        assert_eq!(AskSystemError::not_found("test").code(), "E007");
        assert_eq!(AskSystemError::quota_exceeded("test").code(), "E010");
        assert_eq!(AskSystemError::not_answered("test").code(), "E012");
    }

    #[test]
    fn test_constructor_matches_variant() {
        let err = AskSystemError::quota_conflict("重复操作");
        assert!(matches!(err, AskSystemError::QuotaConflict(_)));
        assert_eq!(err.label(), "Quota Conflict");
        assert_eq!(err.message(), "重复操作");
    }

    #[test]
    fn test_display_includes_code_and_label() {
        let err = AskSystemError::validation("手机号格式不正确");
        let text = err.to_string();
        assert!(text.starts_with("[E006]"));
        assert!(text.contains("Validation Error"));
        assert!(text.contains("手机号格式不正确"));
    }

    #[test]
    fn test_db_error_converts_to_database_operation() {
        let err: AskSystemError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, AskSystemError::DatabaseOperation(_)));
        assert!(err.message().contains("boom"));
    }
}
