//! OpenGL vertex array implementation.

use crate::gl33::{
  state::{Bind, GLState},
  GL33,
};
use gl::types::*;
use glaze::backend::vertex_array::VertexArray as VertexArrayBackend;
use glaze::vertex::{ElementType, VertexAttrib};
use glaze::vertex_array::VertexArrayError;
use std::{cell::RefCell, ffi::c_void, ptr, rc::Rc};

/// OpenGL vertex array object.
#[derive(Debug)]
pub struct VertexArray {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl VertexArray {
  /// Raw OpenGL handle.
  pub fn handle(&self) -> GLuint {
    self.handle
  }
}

unsafe impl VertexArrayBackend for GL33 {
  type VertexArrayRepr = VertexArray;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let mut handle: GLuint = 0;
    gl::GenVertexArrays(1, &mut handle);

    if handle == 0 {
      return Err(VertexArrayError::CreationFailed);
    }

    self
      .state
      .borrow_mut()
      .bind_vertex_array(handle, Bind::Forced);

    Ok(VertexArray {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array
      .state
      .borrow_mut()
      .bind_vertex_array(vertex_array.handle, Bind::Cached);
  }

  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array.state.borrow_mut().unbind_vertex_array();
  }

  unsafe fn set_vertex_attrib(
    _: &Self::VertexArrayRepr,
    index: u32,
    attrib: &VertexAttrib,
  ) {
    // the attribute is recorded against the bound vertex array and array buffer
    gl::EnableVertexAttribArray(index as GLuint);
    gl::VertexAttribPointer(
      index as GLuint,
      attrib.count as GLint,
      opengl_type(attrib.ty),
      if attrib.normalized { gl::TRUE } else { gl::FALSE },
      attrib.stride as GLsizei,
      ptr::null::<c_void>().add(attrib.offset),
    );
  }

  unsafe fn destroy_vertex_array(vertex_array: &mut Self::VertexArrayRepr) {
    vertex_array
      .state
      .borrow_mut()
      .forget_vertex_array(vertex_array.handle);
    gl::DeleteVertexArrays(1, &vertex_array.handle);
  }
}

fn opengl_type(ty: ElementType) -> GLenum {
  match ty {
    ElementType::Float => gl::FLOAT,
    ElementType::UnsignedInt => gl::UNSIGNED_INT,
    ElementType::UnsignedByte => gl::UNSIGNED_BYTE,
  }
}
