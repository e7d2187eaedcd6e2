//! # EsoxSolutions.ResourcePool (Rust Port)
//!
//! Bounded, thread-safe pool for expensive resources that must be closed
//! explicitly, such as network connections and file handles.
//!
//! ## Features
//!
//! - Non-blocking acquire: reuses an idle resource or calls the factory
//! - Lock-free bounded idle queue; overflow is closed on release
//! - Idle-timeout eviction, applied lazily on acquire
//! - Pool warm-up/pre-population
//! - Idempotent shutdown that closes every idle resource
//! - Automatic return of resources via RAII (Drop trait)
//! - Optional serde-loadable settings (`serde` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use esox_resourcepool::{PoolConfiguration, Resource, ResourcePool};
//! use std::convert::Infallible;
//! use std::time::Duration;
//!
//! struct Conn(u32);
//!
//! impl Resource for Conn {
//!     type Error = Infallible;
//!     fn close(self) -> Result<(), Infallible> { Ok(()) }
//! }
//!
//! let config = PoolConfiguration::new(|| Ok::<_, Infallible>(Conn(1)))
//!     .with_max_capacity(10)
//!     .with_idle_timeout(Duration::from_secs(60));
//! let pool = ResourcePool::new(config).unwrap();
//! {
//!     let conn = pool.checkout().unwrap();
//!     println!("Got: {}", conn.0);
//!     // Resource automatically returned when `conn` goes out of scope
//! }
//! assert_eq!(pool.len(), 1);
//! ```

mod pool;
mod config;
mod idle;
mod resource;
mod errors;

pub use pool::{ResourcePool, PooledResource};
pub use config::{PoolConfiguration, DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_CAPACITY};
#[cfg(feature = "serde")]
pub use config::PoolSettings;
pub use resource::Resource;
pub use errors::{BoxError, PoolError, PoolResult};
