//! Vertex arrays.
//!
//! A [`VertexArray`] is the driver object remembering which buffer feeds which attribute slot and
//! how. It is configured with [`VertexArray::add_buffer`], which is where the three “dumb” types
//! meet: [`VertexBuffer`], [`VertexLayout`] and the array itself.
//!
//! # Bind discipline
//!
//! The driver records attribute shapes against whichever vertex array is _currently_ bound, not
//! against the object you “meant”. `add_buffer` therefore binds the array itself, then the buffer,
//! right before recording anything. If you interleave raw backend calls between those, you are on
//! your own.

use crate::backend::buffer::Buffer as BufferBackend;
use crate::backend::vertex_array::VertexArray as VertexArrayBackend;
use crate::buffer::VertexBuffer;
use crate::context::GraphicsContext;
use crate::vertex::VertexLayout;
use std::{error, fmt};

/// Vertex array errors.
#[derive(Debug, Eq, PartialEq)]
pub enum VertexArrayError {
  /// The driver didn’t hand back a vertex array handle.
  CreationFailed,
}

impl fmt::Display for VertexArrayError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexArrayError::CreationFailed => f.write_str("cannot create vertex array"),
    }
  }
}

impl error::Error for VertexArrayError {}

/// Attribute-slot configuration object.
#[derive(Debug)]
pub struct VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  repr: B::VertexArrayRepr,
}

impl<B> Drop for VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_vertex_array(&mut self.repr) };
  }
}

impl<B> VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  /// Create a vertex array. It is left bound.
  pub fn new<C>(ctx: &mut C) -> Result<Self, VertexArrayError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let repr = unsafe { ctx.backend().new_vertex_array()? };
    Ok(VertexArray { repr })
  }

  /// Feed the attribute slots described by `layout` from `buffer`.
  ///
  /// Slot `i` receives the `i`-th pushed element of the layout. Calling this again with another
  /// buffer and layout overwrites the slots both layouts have in common.
  pub fn add_buffer(&self, buffer: &VertexBuffer<B>, layout: &VertexLayout)
  where
    B: BufferBackend,
  {
    self.bind();
    buffer.bind();

    for (index, attrib) in layout.attribs() {
      unsafe { B::set_vertex_attrib(&self.repr, index, &attrib) };
    }

    log::debug!(
      "vertex array configured with {} attribute(s), stride = {}",
      layout.elements().len(),
      layout.stride()
    );
  }

  pub fn bind(&self) {
    unsafe { B::bind_vertex_array(&self.repr) };
  }

  pub fn unbind(&self) {
    unsafe { B::unbind_vertex_array(&self.repr) };
  }
}
