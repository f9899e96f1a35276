use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeLoanError {
    #[error("Invalid argument: {field} — {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HomeLoanError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        HomeLoanError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, used by the HTTP and JS surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            HomeLoanError::InvalidArgument { .. } => "InvalidArgument",
            HomeLoanError::Serialization(_) => "Serialization",
        }
    }
}

impl From<serde_json::Error> for HomeLoanError {
    fn from(e: serde_json::Error) -> Self {
        HomeLoanError::Serialization(e.to_string())
    }
}
