//! OpenGL buffer implementation.

use crate::gl33::{
  state::{Bind, GLState},
  GL33,
};
use gl::types::*;
use glaze::backend::buffer::Buffer as BufferBackend;
use glaze::buffer::{BufferError, BufferTarget};
use std::{cell::RefCell, rc::Rc};

/// OpenGL buffer.
#[derive(Debug)]
pub struct Buffer {
  handle: GLuint,
  target: BufferTarget,
  state: Rc<RefCell<GLState>>,
}

impl Buffer {
  /// Raw OpenGL handle.
  pub fn handle(&self) -> GLuint {
    self.handle
  }

  unsafe fn bind_to(&self, handle: GLuint, bind: Bind) {
    let mut state = self.state.borrow_mut();

    match self.target {
      BufferTarget::Array => state.bind_array_buffer(handle, bind),
      BufferTarget::ElementArray => state.bind_element_array_buffer(handle, bind),
    }
  }
}

unsafe impl BufferBackend for GL33 {
  type BufferRepr = Buffer;

  unsafe fn new_buffer(
    &mut self,
    target: BufferTarget,
    bytes: &[u8],
  ) -> Result<Self::BufferRepr, BufferError> {
    let mut handle: GLuint = 0;
    gl::GenBuffers(1, &mut handle);

    if handle == 0 {
      return Err(BufferError::CreationFailed);
    }

    let buffer = Buffer {
      handle,
      target,
      state: self.state.clone(),
    };

    // a fresh handle is only turned into a buffer object by its first bind
    buffer.bind_to(handle, Bind::Forced);

    gl::BufferData(
      opengl_target(target),
      bytes.len() as GLsizeiptr,
      bytes.as_ptr() as _,
      gl::STATIC_DRAW,
    );

    Ok(buffer)
  }

  unsafe fn bind_buffer(buffer: &Self::BufferRepr) {
    buffer.bind_to(buffer.handle, Bind::Cached);
  }

  unsafe fn unbind_buffer(buffer: &Self::BufferRepr) {
    buffer.bind_to(0, Bind::Cached);
  }

  unsafe fn destroy_buffer(buffer: &mut Self::BufferRepr) {
    buffer.state.borrow_mut().forget_buffer(buffer.handle);
    gl::DeleteBuffers(1, &buffer.handle);
  }
}

fn opengl_target(target: BufferTarget) -> GLenum {
  match target {
    BufferTarget::Array => gl::ARRAY_BUFFER,
    BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
  }
}
