//! Headless backend for glaze.
//!
//! [`Headless`] implements the whole glaze backend interface without any GPU or window. Calls are
//! forwarded to a software [`Device`] that keeps track of handles, bind points and deferred
//! errors, and records every call it receives. That makes it possible to check how the
//! glaze wrappers drive a graphics API from plain tests:
//!
//! ```
//! use glaze::buffer::IndexBuffer;
//! use glaze_headless::{device::Kind, HeadlessContext};
//!
//! let mut ctx = HeadlessContext::new();
//!
//! {
//!   let ib = IndexBuffer::new(&mut ctx, &[0, 1, 2]).unwrap();
//!   assert_eq!(ib.count(), 3);
//!   assert_eq!(ctx.device().live(Kind::Buffer), 1);
//! }
//!
//! assert_eq!(ctx.device().live(Kind::Buffer), 0);
//! ```

mod backend;
pub mod device;
pub mod glsl;

pub use crate::backend::{Buffer, Object};
pub use crate::device::Device;
use glaze::context::GraphicsContext;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// The headless backend type.
#[derive(Debug, Default)]
pub struct Headless {
  pub(crate) device: Rc<RefCell<Device>>,
}

impl Headless {
  pub fn new() -> Self {
    Self::default()
  }
}

/// Graphics context owning a [`Headless`] backend.
#[derive(Debug, Default)]
pub struct HeadlessContext {
  backend: Headless,
}

impl HeadlessContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inspect the device.
  ///
  /// # Panics
  ///
  /// Panics if the device is already borrowed mutably, which can only happen while a backend
  /// call is running.
  pub fn device(&self) -> Ref<Device> {
    self.backend.device.borrow()
  }

  /// Tamper with the device, e.g. to raise errors or forget recorded calls.
  pub fn device_mut(&self) -> RefMut<Device> {
    self.backend.device.borrow_mut()
  }
}

unsafe impl GraphicsContext for HeadlessContext {
  type Backend = Headless;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}
