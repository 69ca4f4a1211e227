//! Structured errors, serializable for the `--json` report

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("[{code:?}] {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    HookInstallation,
    InvalidConfiguration,
    InvalidState,
    Interrupted,
    NotSupported,
    Unknown,
}

impl ErrorCode {
    /// Process exit status for a run that failed with this code
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::Interrupted => 130,
            _ => 1,
        }
    }
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestions: Vec::new(),
            context: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// A global listener could not be installed
    pub fn hook_installation(listener: &str, reason: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::HookInstallation,
            format!("Failed to set {} hook: {}", listener, reason),
        )
        .with_suggestions(vec![
            "Run from an interactive desktop session".to_string(),
            "Close other tools that install low-level input hooks".to_string(),
        ])
    }

    pub fn invalid_configuration(field: &str, reason: &str) -> Self {
        Self::new(
            ErrorCode::InvalidConfiguration,
            format!("Invalid {}: {}", field, reason),
        )
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    pub fn interrupted() -> Self {
        Self::new(ErrorCode::Interrupted, "Recording interrupted before the stop gesture")
    }

    pub fn not_supported(what: &str) -> Self {
        Self::new(
            ErrorCode::NotSupported,
            format!("{} is only supported on Windows", what),
        )
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}
