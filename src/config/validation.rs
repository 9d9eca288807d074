//! Semantic configuration checks, run after deserialization.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("listener.max_body_size must be greater than zero")]
    ZeroBodySize,

    #[error("storage.data_path must not be empty")]
    EmptyDataPath,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Check constraints serde cannot express.
pub fn validate_config(config: &ServiceConfig) -> Result<(), ValidationError> {
    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        return Err(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_body_size == 0 {
        return Err(ValidationError::ZeroBodySize);
    }
    if config.storage.data_path.is_empty() {
        return Err(ValidationError::EmptyDataPath);
    }
    if config.timeouts.request_secs == 0 {
        return Err(ValidationError::ZeroRequestTimeout);
    }
    Ok(())
}
