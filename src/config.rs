//! Pool configuration options

use crate::errors::{BoxError, PoolError, PoolResult};
use crate::resource::Resource;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default upper bound on idle resources
pub const DEFAULT_MAX_CAPACITY: usize = 100;

/// Default idle time after which a buffered resource is considered stale
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

pub(crate) type Factory<R> = Arc<dyn Fn() -> Result<R, BoxError> + Send + Sync>;

/// Configuration for a resource pool
///
/// # Examples
///
/// ```
/// use esox_resourcepool::PoolConfiguration;
/// use std::net::TcpStream;
/// use std::time::Duration;
///
/// let config = PoolConfiguration::new(|| TcpStream::connect("127.0.0.1:6379"))
///     .with_initial_capacity(0)
///     .with_max_capacity(16)
///     .with_idle_timeout(Duration::from_secs(30));
///
/// assert_eq!(config.max_capacity, 16);
/// assert_eq!(config.idle_timeout, Duration::from_secs(30));
/// assert!(config.validate().is_ok());
/// ```
pub struct PoolConfiguration<R> {
    /// Number of resources created and buffered when the pool is built
    pub initial_capacity: usize,

    /// Maximum number of idle resources the pool keeps
    pub max_capacity: usize,

    /// How long a resource may sit idle before it is discarded
    pub idle_timeout: Duration,

    pub(crate) factory: Factory<R>,
}

impl<R: Resource> PoolConfiguration<R> {
    /// Create a configuration with default values around `factory`
    pub fn new<F, E>(factory: F) -> Self
    where
        F: Fn() -> Result<R, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            initial_capacity: 0,
            max_capacity: DEFAULT_MAX_CAPACITY,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            factory: Arc::new(move || factory().map_err(Into::into)),
        }
    }

    /// Set how many resources to pre-create
    pub fn with_initial_capacity(mut self, count: usize) -> Self {
        self.initial_capacity = count;
        self
    }

    /// Set the maximum number of idle resources
    pub fn with_max_capacity(mut self, count: usize) -> Self {
        self.max_capacity = count;
        self
    }

    /// Set the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Build a configuration from loaded settings
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "serde")] {
    /// use esox_resourcepool::{PoolConfiguration, PoolSettings};
    /// use std::net::TcpStream;
    ///
    /// let settings = PoolSettings { max_capacity: 8, ..Default::default() };
    /// let config =
    ///     PoolConfiguration::from_settings(settings, || TcpStream::connect("127.0.0.1:80"));
    /// assert_eq!(config.max_capacity, 8);
    /// # }
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_settings<F, E>(settings: PoolSettings, factory: F) -> Self
    where
        F: Fn() -> Result<R, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::new(factory)
            .with_initial_capacity(settings.initial_capacity)
            .with_max_capacity(settings.max_capacity)
            .with_idle_timeout(settings.idle_timeout)
    }
}

impl<R> PoolConfiguration<R> {
    /// Check the capacity bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use esox_resourcepool::{PoolConfiguration, PoolError};
    /// use std::net::TcpStream;
    ///
    /// let config = PoolConfiguration::new(|| TcpStream::connect("127.0.0.1:80"))
    ///     .with_initial_capacity(4)
    ///     .with_max_capacity(2);
    ///
    /// assert!(matches!(config.validate(), Err(PoolError::InvalidConfiguration { .. })));
    /// ```
    pub fn validate(&self) -> PoolResult<()> {
        if self.initial_capacity > self.max_capacity {
            return Err(PoolError::InvalidConfiguration {
                initial_capacity: self.initial_capacity,
                max_capacity: self.max_capacity,
            });
        }
        Ok(())
    }

    pub(crate) fn create(&self) -> PoolResult<R> {
        (self.factory)().map_err(PoolError::Factory)
    }
}

impl<R> Clone for PoolConfiguration<R> {
    fn clone(&self) -> Self {
        Self {
            initial_capacity: self.initial_capacity,
            max_capacity: self.max_capacity,
            idle_timeout: self.idle_timeout,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<R> fmt::Debug for PoolConfiguration<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolConfiguration")
            .field("initial_capacity", &self.initial_capacity)
            .field("max_capacity", &self.max_capacity)
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

/// Serializable capacity and timeout settings, for loading from config files
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    pub initial_capacity: usize,
    pub max_capacity: usize,
    pub idle_timeout: Duration,
}

#[cfg(feature = "serde")]
impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_capacity: DEFAULT_MAX_CAPACITY,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::io;

    struct Dummy;

    impl Resource for Dummy {
        type Error = Infallible;

        fn close(self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let config = PoolConfiguration::new(|| Ok::<_, io::Error>(Dummy));
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.max_capacity, DEFAULT_MAX_CAPACITY);
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_equal_to_max_is_valid() {
        let config = PoolConfiguration::new(|| Ok::<_, io::Error>(Dummy))
            .with_initial_capacity(3)
            .with_max_capacity(3);
        assert!(config.validate().is_ok());

        let empty = config.clone().with_initial_capacity(0).with_max_capacity(0);
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn test_initial_above_max_is_rejected() {
        let config = PoolConfiguration::new(|| Ok::<_, io::Error>(Dummy))
            .with_initial_capacity(4)
            .with_max_capacity(3);

        match config.validate() {
            Err(PoolError::InvalidConfiguration {
                initial_capacity,
                max_capacity,
            }) => {
                assert_eq!(initial_capacity, 4);
                assert_eq!(max_capacity, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_factory_failure_maps_to_pool_error() {
        let config = PoolConfiguration::new(|| -> Result<Dummy, io::Error> {
            Err(io::Error::new(io::ErrorKind::TimedOut, "dial timeout"))
        });
        let err = config.create().err().unwrap();
        assert!(err.is_factory());
        assert_eq!(err.to_string(), "Resource factory failed: dial timeout");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_settings_fall_back_to_defaults() {
        let settings: PoolSettings = serde_json::from_str(r#"{"max_capacity": 8}"#).unwrap();
        assert_eq!(settings.initial_capacity, 0);
        assert_eq!(settings.max_capacity, 8);
        assert_eq!(settings.idle_timeout, DEFAULT_IDLE_TIMEOUT);

        let empty: PoolSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PoolSettings::default());
        assert_eq!(empty.max_capacity, DEFAULT_MAX_CAPACITY);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_settings_round_trip() {
        let settings = PoolSettings {
            initial_capacity: 2,
            max_capacity: 12,
            idle_timeout: Duration::from_millis(1500),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains(r#""idle_timeout":{"secs":1,"nanos":500000000}"#));

        let loaded: PoolSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, settings);

        let config = PoolConfiguration::from_settings(loaded, || Ok::<_, io::Error>(Dummy));
        assert_eq!(config.initial_capacity, 2);
        assert_eq!(config.max_capacity, 12);
        assert_eq!(config.idle_timeout, Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_omits_factory() {
        let config = PoolConfiguration::new(|| Ok::<_, io::Error>(Dummy)).with_max_capacity(7);
        let debug = format!("{:?}", config);
        assert!(debug.contains("max_capacity: 7"));
        assert!(!debug.contains("factory"));
    }
}
