//! Core resource pool implementation

use crate::config::PoolConfiguration;
use crate::errors::{PoolError, PoolResult};
use crate::idle::{IdleQueue, IdleRecord};
use crate::resource::{Resource, close_quietly};

use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

/// State shared by every handle to one pool and by its checked-out guards
struct Shared<R: Resource> {
    idle: IdleQueue<R>,
    // Guards the closed transition against concurrent releases
    closed: Mutex<bool>,
    config: PoolConfiguration<R>,
}

impl<R: Resource> Shared<R> {
    fn acquire(&self) -> PoolResult<R> {
        // At most one pass over the records idle on entry, then the factory
        for _ in 0..self.idle.len() {
            let Some(record) = self.idle.try_pop() else {
                break;
            };

            if record.is_stale(self.config.idle_timeout) {
                tracing::trace!(
                    idle_for = ?record.returned_at.elapsed(),
                    "discarding stale resource"
                );
                close_quietly(record.resource);
                continue;
            }

            return Ok(record.resource);
        }

        if *self.closed.lock() {
            return Err(PoolError::Closed);
        }

        self.config.create()
    }

    fn release(&self, resource: R) {
        let rejected = {
            let closed = self.closed.lock();
            if *closed {
                Some(resource)
            } else {
                self.idle
                    .try_push(IdleRecord::new(resource))
                    .err()
                    .map(|record| record.resource)
            }
        };

        if let Some(resource) = rejected {
            tracing::trace!("idle queue full or pool closed, dropping released resource");
            close_quietly(resource);
        }
    }

    fn close(&self) {
        let mut closed = self.closed.lock();
        if *closed {
            return;
        }
        *closed = true;

        let mut drained = 0usize;
        while let Some(record) = self.idle.try_pop() {
            close_quietly(record.resource);
            drained += 1;
        }

        tracing::debug!(drained, "resource pool closed");
    }

    fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

impl<R: Resource> Drop for Shared<R> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Bounded pool of closeable resources
///
/// Idle resources are reused until they have sat unused for longer than the
/// configured idle timeout. `acquire` never blocks: when nothing is idle it
/// calls the factory, so the number of live resources may briefly exceed
/// `max_capacity`. The bound is enforced on `release`, which closes any
/// resource that does not fit in the idle queue.
///
/// Cloning a pool yields another handle to the same pool. Buffered resources
/// are closed by [`close`](ResourcePool::close), or once the last handle and
/// the last [`PooledResource`] are dropped.
///
/// # Examples
///
/// ```
/// use esox_resourcepool::{PoolConfiguration, Resource, ResourcePool};
/// use std::convert::Infallible;
///
/// struct Conn;
///
/// impl Resource for Conn {
///     type Error = Infallible;
///     fn close(self) -> Result<(), Infallible> { Ok(()) }
/// }
///
/// let config = PoolConfiguration::new(|| Ok::<_, Infallible>(Conn))
///     .with_initial_capacity(2)
///     .with_max_capacity(4);
/// let pool = ResourcePool::new(config).unwrap();
/// assert_eq!(pool.len(), 2);
///
/// let conn = pool.acquire().unwrap();
/// assert_eq!(pool.len(), 1);
/// pool.release(conn);
/// assert_eq!(pool.len(), 2);
///
/// pool.close();
/// assert!(pool.is_empty());
/// ```
pub struct ResourcePool<R: Resource> {
    shared: Arc<Shared<R>>,
}

impl<R: Resource> ResourcePool<R> {
    /// Create a pool and pre-create `initial_capacity` resources
    pub fn new(config: PoolConfiguration<R>) -> PoolResult<Self> {
        config.validate()?;

        let pool = Self {
            shared: Arc::new(Shared {
                idle: IdleQueue::new(config.max_capacity),
                closed: Mutex::new(false),
                config,
            }),
        };

        let warmup = pool.shared.config.initial_capacity;
        let mut created = Vec::with_capacity(warmup);
        for _ in 0..warmup {
            match pool.acquire() {
                Ok(resource) => created.push(resource),
                Err(err) => {
                    created.into_iter().for_each(close_quietly);
                    return Err(err);
                }
            }
        }
        for resource in created {
            pool.release(resource);
        }

        Ok(pool)
    }

    /// Create a pool with default settings around `factory`
    pub fn with_factory<F, E>(factory: F) -> PoolResult<Self>
    where
        F: Fn() -> Result<R, E> + Send + Sync + 'static,
        E: Into<crate::errors::BoxError>,
    {
        Self::new(PoolConfiguration::new(factory))
    }

    /// Take an idle resource, or create a new one if none is available
    ///
    /// Idle resources past the idle timeout are closed and skipped. Once the
    /// pool is closed and nothing is idle this returns [`PoolError::Closed`]
    /// rather than calling the factory. A factory call that started before
    /// `close` finished may still complete; its resource is closed as soon as
    /// it is released.
    pub fn acquire(&self) -> PoolResult<R> {
        self.shared.acquire()
    }

    /// Like [`acquire`](ResourcePool::acquire), but the resource goes back to
    /// the pool when the guard is dropped
    pub fn checkout(&self) -> PoolResult<PooledResource<R>> {
        let resource = self.shared.acquire()?;
        Ok(PooledResource {
            resource: Some(resource),
            pool: Arc::clone(&self.shared),
        })
    }

    /// Return a resource to the pool
    ///
    /// The resource is closed instead if the pool is closed or already holds
    /// `max_capacity` idle resources.
    pub fn release(&self, resource: R) {
        self.shared.release(resource);
    }

    /// Close the pool and every idle resource; further calls do nothing
    pub fn close(&self) {
        self.shared.close();
    }

    /// Number of idle resources right now
    pub fn len(&self) -> usize {
        self.shared.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.idle.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    pub fn max_capacity(&self) -> usize {
        self.shared.idle.capacity()
    }

    pub fn idle_timeout(&self) -> Duration {
        self.shared.config.idle_timeout
    }
}

impl<R: Resource> Clone for ResourcePool<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Resource> fmt::Debug for ResourcePool<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("idle", &self.len())
            .field("closed", &self.is_closed())
            .field("config", &self.shared.config)
            .finish()
    }
}

/// A checked-out resource that returns to its pool when dropped
pub struct PooledResource<R: Resource> {
    resource: Option<R>,
    pool: Arc<Shared<R>>,
}

impl<R: Resource> PooledResource<R> {
    /// Keep the resource and never return it to the pool
    pub fn detach(mut self) -> R {
        // Only `detach`, `discard` and `Drop` empty `resource`, and each consumes the guard
        self.resource.take().expect("Resource already taken")
    }

    /// Close the resource instead of returning it, e.g. after an I/O error
    pub fn discard(mut self) {
        if let Some(resource) = self.resource.take() {
            close_quietly(resource);
        }
    }
}

impl<R: Resource> Deref for PooledResource<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        // Always `Some` while the guard is alive
        self.resource.as_ref().expect("Resource already taken")
    }
}

impl<R: Resource> DerefMut for PooledResource<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // Always `Some` while the guard is alive
        self.resource.as_mut().expect("Resource already taken")
    }
}

impl<R: Resource> Drop for PooledResource<R> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            self.pool.release(resource);
        }
    }
}

impl<R: Resource + fmt::Debug> fmt::Debug for PooledResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledResource").field(&self.resource).finish()
    }
}
