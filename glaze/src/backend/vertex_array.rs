//! Vertex array backend interface.

use crate::vertex::VertexAttrib;
use crate::vertex_array::VertexArrayError;

/// Vertex array backend.
pub unsafe trait VertexArray {
  type VertexArrayRepr;

  /// Create a vertex array and bind it.
  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError>;

  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr);

  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr);

  /// Enable the attribute slot `index` and record its shape.
  ///
  /// The shape is recorded against the **currently bound** vertex array and array buffer, not
  /// necessarily `vertex_array`; callers must bind both right before calling this.
  unsafe fn set_vertex_attrib(
    vertex_array: &Self::VertexArrayRepr,
    index: u32,
    attrib: &VertexAttrib,
  );

  unsafe fn destroy_vertex_array(vertex_array: &mut Self::VertexArrayRepr);
}
