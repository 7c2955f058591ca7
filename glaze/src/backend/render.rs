//! Render backend interface.

use crate::buffer::IndexType;

/// Frame-level operations: clearing, blending and indexed draws.
pub unsafe trait Render {
  unsafe fn set_clear_color(&mut self, rgba: [f32; 4]);

  unsafe fn clear_color_buffer(&mut self);

  /// Enable blending with `src_alpha, 1 - src_alpha` factors.
  unsafe fn enable_alpha_blending(&mut self);

  /// Draw `count` indices of type `ty` as triangles, reading the currently bound vertex array and
  /// element buffer.
  unsafe fn draw_indexed(&mut self, count: usize, ty: IndexType);
}
