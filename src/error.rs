//! Error types for session mutations

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown {record} field '{field}'")]
    UnknownField { record: &'static str, field: String },

    #[error("'{value}' is not a valid {kind}")]
    InvalidChoice { kind: &'static str, value: String },

    #[error("unknown month '{0}'")]
    UnknownMonth(String),
}

impl SessionError {
    pub fn unknown_field(record: &'static str, field: &str) -> Self {
        SessionError::UnknownField {
            record,
            field: field.to_string(),
        }
    }

    pub fn invalid_choice(kind: &'static str, value: &str) -> Self {
        SessionError::InvalidChoice {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
