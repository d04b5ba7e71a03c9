//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_course_admin_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseAdminError {
            $($variant(String),)*
        }

        impl CourseAdminError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseAdminError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseAdminError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseAdminError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseAdminError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseAdminError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_course_admin_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Authentication("E010", "Authentication Error"),
    Import("E011", "Import Error"),
    Conflict("E012", "Conflict"),
}

impl CourseAdminError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为资源不存在错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, CourseAdminError::NotFound(_))
    }

    /// 是否为唯一约束冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, CourseAdminError::Conflict(_))
    }
}

impl fmt::Display for CourseAdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseAdminError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseAdminError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseAdminError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseAdminError {
    fn from(err: std::io::Error) -> Self {
        CourseAdminError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseAdminError {
    fn from(err: serde_json::Error) -> Self {
        CourseAdminError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for CourseAdminError {
    fn from(err: csv::Error) -> Self {
        CourseAdminError::Import(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseAdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseAdminError::cache_connection("test").code(), "E001");
        assert_eq!(CourseAdminError::database_operation("test").code(), "E005");
        assert_eq!(CourseAdminError::validation("test").code(), "E007");
        assert_eq!(CourseAdminError::not_found("test").code(), "E008");
    }

    #[test]
    fn test_database_error_display() {
        let err = CourseAdminError::database_operation("disk I/O error");
        assert_eq!(err.to_string(), "Database Error: disk I/O error");
    }

    #[test]
    fn test_not_found() {
        assert!(CourseAdminError::not_found("Class not found").is_not_found());
        assert!(!CourseAdminError::validation("Class not found").is_not_found());
        assert!(CourseAdminError::conflict("Email already exists").is_conflict());
    }
}
