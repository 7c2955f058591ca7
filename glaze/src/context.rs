//! Graphics contexts.
//!
//! A [`GraphicsContext`] owns a backend and hands it out to constructors. This crate never
//! creates contexts; windowing crates such as glaze-glfw do, and tests use glaze-headless.
//!
//! # Rules
//!
//! - A context stays on the thread that created it; implementors must be `!Send` and `!Sync`.
//! - At most one context exists per thread.
//! - Every object created from a context is dropped before it. Releasing driver objects once the
//!   context is gone is undefined behavior.

/// Owner of a backend.
///
/// # Safety
///
/// Implementors must uphold the rules listed in the [module documentation](self).
pub unsafe trait GraphicsContext {
  /// Backend type this context owns.
  type Backend: ?Sized;

  /// Access the backend.
  fn backend(&mut self) -> &mut Self::Backend;
}
