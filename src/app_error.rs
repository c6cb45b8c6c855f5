use crate::runner::RunError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    RuntimeFailure = 1,
    Usage = 2,
    Internal = 3,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    code: ExitCode,
    message: String,
}

impl AppError {
    pub fn usage<T: Into<String>>(message: T) -> Self {
        Self::with_code(ExitCode::Usage, message)
    }

    pub fn runtime<T: Into<String>>(message: T) -> Self {
        Self::with_code(ExitCode::RuntimeFailure, message)
    }

    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::with_code(ExitCode::Internal, message)
    }

    fn with_code<T: Into<String>>(code: ExitCode, message: T) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        self.code as i32
    }
}

impl From<RunError> for AppError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::Spawn { .. } => AppError::runtime(err.to_string()),
            RunError::Io { .. } | RunError::Panicked { .. } => AppError::internal(err.to_string()),
        }
    }
}
