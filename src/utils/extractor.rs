//! 路径参数安全提取器
//!
//! 路径里的数字 ID 先解析为正的 i64 再进入处理函数，
//! 非法值直接返回 400，处理函数不再重复校验。

/// 定义一个从路径参数提取正整数 ID 的类型
///
/// 生成的类型同时实现 Deserialize（用于 web::Path 元组）
/// 和 FromRequest（用于直接作为处理函数参数）。
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                let id = raw.parse::<i64>().map_err(|_| {
                    serde::de::Error::custom(format!("invalid {}: '{raw}'", $param))
                })?;
                if id <= 0 {
                    return Err(serde::de::Error::custom(format!(
                        "{} must be a positive integer",
                        $param
                    )));
                }
                Ok($name(id))
            }
        }

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                use $crate::models::{ApiResponse, ErrorCode};

                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                std::future::ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(actix_web::error::InternalError::from_response(
                        format!("invalid path parameter: {}", $param),
                        actix_web::HttpResponse::BadRequest().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::BadRequest,
                                format!("路径参数 {} 必须为正整数", $param),
                            ),
                        ),
                    )
                    .into()),
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeSchoolIdI64, "school_id");
define_safe_i64_extractor!(SafeTeacherIdI64, "teacher_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_i64_extractor!(SafeAskIdI64, "ask_id");
define_safe_i64_extractor!(SafeAnswerIdI64, "answer_id");
define_safe_i64_extractor!(SafeImageIdI64, "image_id");
