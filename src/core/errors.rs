//! Error taxonomy for the reminding core
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use thiserror::Error;

/// Failures raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("query failed: {0}")]
    Sqlite(#[from] sqlite::Error),

    #[error("invalid timestamp '{value}' in column '{column}'")]
    BadTimestamp { column: &'static str, value: String },
}

/// Failures raised while delivering a message.
///
/// Permanent failures (blocked, deactivated, unknown recipient) mean the
/// message will never arrive no matter how often we retry. Everything else is
/// transient; the transport has already done its own backoff by the time the
/// error surfaces here.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("permanent delivery failure (HTTP {status}): {message}")]
    Permanent { status: u16, message: String },

    #[error("transient delivery failure: {0}")]
    Transient(String),
}

impl DeliveryError {
    pub fn is_permanent(&self) -> bool {
        matches!(self, DeliveryError::Permanent { .. })
    }
}

/// Top-level failures of a remind invocation.
#[derive(Debug, Error)]
pub enum RemindError {
    /// There are no notes at all, so selection is meaningless.
    #[error("no notes available to remind")]
    EmptyPopulation,

    /// The selected note vanished between selection and assembly.
    #[error("note '{0}' not found")]
    NoteNotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_classification() {
        let permanent = DeliveryError::Permanent {
            status: 403,
            message: "blocked".to_string(),
        };
        let transient = DeliveryError::Transient("gateway hiccup".to_string());

        assert!(permanent.is_permanent());
        assert!(!transient.is_permanent());
    }

    #[test]
    fn test_storage_error_wraps_into_remind_error() {
        let err: RemindError = StorageError::BadTimestamp {
            column: "added_at",
            value: "not-a-date".to_string(),
        }
        .into();
        assert!(matches!(err, RemindError::Storage(_)));
    }
}
