use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Truncated input: expected at least {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    #[error("Corrupt patch in slot {slot}: {reason}")]
    CorruptPatch { slot: usize, reason: String },

    #[error("Corrupt bank: {0}")]
    CorruptBank(String),

    #[error("Failed to decode name of patch in slot {slot}: {bytes:02X?}")]
    DecodeError { slot: usize, bytes: Vec<u8> },

    #[error("Patch index {index} out of range (bank has {count} patches)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    pub(crate) fn corrupt(slot: usize, reason: impl Into<String>) -> Self {
        Error::CorruptPatch {
            slot,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::TruncatedInput {
            expected: 134660,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "Truncated input: expected at least 134660 bytes, got 10"
        );

        let err = Error::DecodeError {
            slot: 3,
            bytes: vec![0x41, 0xFF],
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode name of patch in slot 3: [41, FF]"
        );

        let err = Error::corrupt(5, "source count 9 exceeds 6");
        assert_eq!(
            err.to_string(),
            "Corrupt patch in slot 5: source count 9 exceeds 6"
        );
    }
}
