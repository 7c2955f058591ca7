//! Buffer backend interface.
//!
//! This interface defines the low-level API buffers must implement to be usable.

use crate::buffer::{BufferError, BufferTarget};

/// Buffer backend.
///
/// You want to implement that trait on your backend type to support buffers.
pub unsafe trait Buffer {
  /// The inner representation of the buffer for this backend.
  type BufferRepr;

  /// Create a new buffer bound to `target` and upload `bytes` into it, once.
  ///
  /// The buffer is left bound to `target` after the call.
  unsafe fn new_buffer(
    &mut self,
    target: BufferTarget,
    bytes: &[u8],
  ) -> Result<Self::BufferRepr, BufferError>;

  /// Bind the buffer to the target it was created for.
  unsafe fn bind_buffer(buffer: &Self::BufferRepr);

  /// Reset the target the buffer was created for to the null handle.
  unsafe fn unbind_buffer(buffer: &Self::BufferRepr);

  /// Release the buffer.
  ///
  /// Any bind point still naming the buffer must be reset.
  unsafe fn destroy_buffer(buffer: &mut Self::BufferRepr);
}
