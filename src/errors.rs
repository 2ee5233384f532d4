//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use std::fmt;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
}

impl SchoolError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => StatusCode::BAD_REQUEST,
            SchoolError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SchoolError::Authorization(_) => StatusCode::FORBIDDEN,
            SchoolError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的 API 错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => ErrorCode::ValidationFailed,
            SchoolError::Authentication(_) => ErrorCode::Unauthorized,
            SchoolError::Authorization(_) => ErrorCode::Forbidden,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 转换为统一格式的 HTTP 响应
    pub fn to_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::from_error(self))
    }

    /// 冲突与未找到换成业务错误码，其余同 [`Self::to_response`]
    pub fn to_response_with(
        &self,
        conflict: ErrorCode,
        not_found: ErrorCode,
    ) -> HttpResponse {
        let code = match self {
            SchoolError::Conflict(_) => conflict,
            SchoolError::NotFound(_) => not_found,
            _ => return self.to_response(),
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::error_empty(code, self.message()))
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => SchoolError::Conflict(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                SchoolError::Validation(format!("Referenced record does not exist: {msg}"))
            }
            _ => SchoolError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

impl From<csv::Error> for SchoolError {
    fn from(err: csv::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

/// 将数据库错误包装为带上下文的业务错误
///
/// 唯一约束冲突保留为 `Conflict`，其余错误附加操作描述。
pub fn db_error(context: &str, err: sea_orm::DbErr) -> SchoolError {
    match SchoolError::from(err) {
        SchoolError::DatabaseOperation(msg) => {
            SchoolError::DatabaseOperation(format!("{context}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolError::database_config("test").code(), "E003");
        assert_eq!(SchoolError::validation("test").code(), "E007");
        assert_eq!(SchoolError::conflict("test").code(), "E010");
        assert_eq!(SchoolError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::not_found("Book 7");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Book 7"));
    }

    #[test]
    fn test_domain_code_keeps_status() {
        let resp = SchoolError::conflict("No copies available")
            .to_response_with(ErrorCode::BookUnavailable, ErrorCode::BookNotFound);
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = SchoolError::validation("bad")
            .to_response_with(ErrorCode::BookUnavailable, ErrorCode::BookNotFound);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SchoolError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SchoolError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SchoolError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(SchoolError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(SchoolError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            SchoolError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_error_keeps_context() {
        let err = db_error("查询图书失败", sea_orm::DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E005");
        assert!(err.message().starts_with("查询图书失败"));
    }
}
