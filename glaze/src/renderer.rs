//! Frame-level drawing operations.

use crate::backend::buffer::Buffer as BufferBackend;
use crate::backend::render::Render;
use crate::backend::shader::Shader as ShaderBackend;
use crate::backend::vertex_array::VertexArray as VertexArrayBackend;
use crate::buffer::IndexBuffer;
use crate::context::GraphicsContext;
use crate::shader::ShaderProgram;
use crate::vertex_array::VertexArray;

/// Stateless renderer.
///
/// Everything the renderer draws comes from its arguments; it holds no state of its own.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Renderer;

impl Renderer {
  pub fn new() -> Self {
    Renderer
  }

  /// Clear the color buffer with the current clear color.
  pub fn clear<C>(&self, ctx: &mut C)
  where
    C: GraphicsContext,
    C::Backend: Render,
  {
    unsafe { ctx.backend().clear_color_buffer() };
  }

  pub fn set_clear_color<C>(&self, ctx: &mut C, rgba: [f32; 4])
  where
    C: GraphicsContext,
    C::Backend: Render,
  {
    unsafe { ctx.backend().set_clear_color(rgba) };
  }

  /// Blend with `src.a` and `1 - src.a`.
  pub fn enable_alpha_blending<C>(&self, ctx: &mut C)
  where
    C: GraphicsContext,
    C::Backend: Render,
  {
    unsafe { ctx.backend().enable_alpha_blending() };
  }

  /// Draw `ib.count()` indices, of `ib.index_type()`, as triangles.
  ///
  /// `program`, then `va`, then `ib` are bound before issuing the draw. They are left bound.
  pub fn draw<C, B>(
    &self,
    ctx: &mut C,
    va: &VertexArray<B>,
    ib: &IndexBuffer<B>,
    program: &ShaderProgram<B>,
  ) where
    C: GraphicsContext<Backend = B>,
    B: ?Sized + BufferBackend + VertexArrayBackend + ShaderBackend + Render,
  {
    program.bind();
    va.bind();
    ib.bind();

    unsafe { ctx.backend().draw_indexed(ib.count(), ib.index_type()) };
  }
}
