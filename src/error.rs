//! Modulith 错误处理系统
//!
//! 统一的错误类型和错误处理机制

use thiserror::Error;

/// 框架统一错误类型
#[derive(Error, Debug)]
pub enum ModulithError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Module '{name}' is already installed")]
    DuplicateModule { name: String },

    #[error("Module '{name}' not found")]
    ModuleNotFound { name: String },

    #[error("Fetch error: {message}")]
    Fetch { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ModulithError {
    /// 创建参数相关错误
    pub fn invalid_argument(message: &str) -> Self {
        Self::InvalidArgument {
            message: message.to_string(),
        }
    }

    /// 创建抓取相关错误
    pub fn fetch(message: &str) -> Self {
        Self::Fetch {
            message: message.to_string(),
        }
    }

    /// 创建验证相关错误
    pub fn validation(message: &str) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// 创建内部错误
    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ModulithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = ModulithError::fetch("connection refused");
        assert!(matches!(error, ModulithError::Fetch { .. }));
        assert_eq!(error.to_string(), "Fetch error: connection refused");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let modulith_error = ModulithError::from(io_error);
        assert!(matches!(modulith_error, ModulithError::Io(_)));
    }

    #[test]
    fn test_duplicate_module_message() {
        let error = ModulithError::DuplicateModule { name: "vector".to_string() };
        assert_eq!(error.to_string(), "Module 'vector' is already installed");
    }

    #[test]
    fn test_result_type() {
        let success: Result<i32> = Ok(42);
        let failure: Result<i32> = Err(ModulithError::internal("Test error"));

        assert!(success.is_ok());
        assert!(failure.is_err());
    }
}
