// src/error.rs
// Standardized error types for PolkaForge

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;
use crate::wallet::WalletError;

/// Top-level error type for the PolkaForge library
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Result using ForgeError
pub type Result<T> = std::result::Result<T, ForgeError>;

impl From<ForgeError> for String {
    fn from(err: ForgeError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_error_wraps() {
        let err: ForgeError = WalletError::NoExtension.into();
        assert!(err.to_string().starts_with("wallet error"));
        assert!(err.to_string().contains("extension"));
    }

    #[test]
    fn test_store_error_wraps() {
        let err: ForgeError = StoreError::RepositoryNotFound("abc".into()).into();
        assert!(err.to_string().contains("store error"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_io_error_wraps() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ForgeError = io.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_into_string() {
        let s: String = ForgeError::from(StoreError::JobNotFound("j1".into())).into();
        assert!(s.contains("j1"));
    }
}
