//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for glaze. The backend type is [`GL33`].
//!
//! Every representation type handed to glaze carries a shared pointer to the [`GLState`] of the
//! backend that created it. That’s how bind calls, which don’t get to see the backend, still go
//! through the bind cache.

mod buffer;
mod probe;
mod render;
mod shader;
mod state;
mod texture;
mod vertex_array;

pub use self::buffer::Buffer;
pub use self::shader::{Program, Stage};
pub use self::state::GLState;
pub use self::state::StateQueryError;
pub use self::texture::Texture;
pub use self::vertex_array::VertexArray;
use std::cell::RefCell;
use std::rc::Rc;

/// OpenGL 3.3 backend.
///
/// Use it as the `Backend` of a graphics context whose OpenGL 3.3 context is current on this
/// thread.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Take this thread’s [`GLState`] and build the backend around it.
  ///
  /// GL symbols must be loaded. Fails if a `GL33` was already created on this thread.
  pub fn new() -> Result<Self, StateQueryError> {
    let state = GLState::new()?;
    log::info!("OpenGL 3.3 backend ready");

    Ok(GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Access the bind-state cache.
  ///
  /// # Safety
  ///
  /// Mutating the cache without issuing the matching GL calls desynchronizes it from the driver.
  pub unsafe fn state(&self) -> &Rc<RefCell<GLState>> {
    &self.state
  }
}
