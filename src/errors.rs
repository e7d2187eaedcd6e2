//! Error types for the resource pool

use thiserror::Error;

/// Opaque error produced by a resource factory
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error(
        "Invalid configuration: initial capacity {initial_capacity} exceeds max capacity {max_capacity}"
    )]
    InvalidConfiguration {
        initial_capacity: usize,
        max_capacity: usize,
    },

    #[error("Pool is closed")]
    Closed,

    #[error("Resource factory failed: {0}")]
    Factory(#[source] BoxError),
}

impl PoolError {
    /// Whether this error came from the factory rather than the pool itself
    pub fn is_factory(&self) -> bool {
        matches!(self, PoolError::Factory(_))
    }

    /// Take the factory's own error out of a `Factory` variant
    pub fn into_factory_error(self) -> Option<BoxError> {
        match self {
            PoolError::Factory(source) => Some(source),
            _ => None,
        }
    }
}

pub type PoolResult<T> = Result<T, PoolError>;
