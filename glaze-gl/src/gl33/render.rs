use crate::gl33::GL33;
use gl::types::*;
use glaze::backend::render::Render;
use glaze::buffer::IndexType;
use std::ptr;

unsafe impl Render for GL33 {
  unsafe fn set_clear_color(&mut self, rgba: [f32; 4]) {
    self.state.borrow_mut().set_clear_color(rgba);
  }

  unsafe fn clear_color_buffer(&mut self) {
    gl::Clear(gl::COLOR_BUFFER_BIT);
  }

  unsafe fn enable_alpha_blending(&mut self) {
    let mut state = self.state.borrow_mut();

    state.set_blending(true);
    state.set_blending_func(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
  }

  unsafe fn draw_indexed(&mut self, count: usize, ty: IndexType) {
    gl::DrawElements(
      gl::TRIANGLES,
      count as GLsizei,
      opengl_index_type(ty),
      ptr::null(),
    );
  }
}

fn opengl_index_type(ty: IndexType) -> GLenum {
  match ty {
    IndexType::U8 => gl::UNSIGNED_BYTE,
    IndexType::U16 => gl::UNSIGNED_SHORT,
    IndexType::U32 => gl::UNSIGNED_INT,
  }
}
