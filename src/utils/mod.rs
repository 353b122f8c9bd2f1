pub mod extractor;
pub mod id_list;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeAnswerIdI64, SafeAskIdI64, SafeImageIdI64, SafeSchoolIdI64, SafeStudentIdI64,
    SafeTeacherIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
