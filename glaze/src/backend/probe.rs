//! Deferred error flag access.

use crate::probe::DriverError;

/// Access to the driver’s deferred error flag.
pub unsafe trait ErrorQuery {
  /// Pop the oldest pending error, if any.
  ///
  /// Repeated calls must eventually return `None`.
  unsafe fn poll_error(&mut self) -> Option<DriverError>;
}
