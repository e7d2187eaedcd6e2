//! The close capability every pooled resource exposes

use std::net::{Shutdown, TcpStream};

/// A resource that can be explicitly closed
///
/// `close` consumes the handle, so a resource can only ever be closed once.
/// Errors returned from `close` while the pool discards a resource are
/// logged and swallowed.
///
/// # Examples
///
/// ```
/// use esox_resourcepool::Resource;
/// use std::convert::Infallible;
///
/// struct Session(u32);
///
/// impl Resource for Session {
///     type Error = Infallible;
///
///     fn close(self) -> Result<(), Infallible> {
///         Ok(())
///     }
/// }
///
/// assert!(Session(1).close().is_ok());
/// ```
pub trait Resource: Send + 'static {
    /// Error reported by a failed close
    type Error: std::error::Error + Send + Sync + 'static;

    /// Release whatever the resource holds
    fn close(self) -> Result<(), Self::Error>;
}

impl Resource for TcpStream {
    type Error = std::io::Error;

    fn close(self) -> Result<(), Self::Error> {
        self.shutdown(Shutdown::Both)
    }
}

/// Close a resource the pool is discarding, logging any failure
pub(crate) fn close_quietly<R: Resource>(resource: R) {
    if let Err(err) = resource.close() {
        tracing::warn!(error = %err, "failed to close discarded resource");
    }
}
