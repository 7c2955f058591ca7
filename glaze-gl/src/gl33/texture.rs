use crate::gl33::{state::GLState, GL33};
use gl::types::*;
use glaze::backend::texture::Texture as TextureBackend;
use glaze::texture::TextureError;
use std::{cell::RefCell, ffi::c_void, rc::Rc};

/// OpenGL 2D texture.
#[derive(Debug)]
pub struct Texture {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Texture {
  /// Raw OpenGL handle.
  pub fn handle(&self) -> GLuint {
    self.handle
  }
}

unsafe impl TextureBackend for GL33 {
  type TextureRepr = Texture;

  unsafe fn new_texture(
    &mut self,
    width: u32,
    height: u32,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError> {
    let mut handle: GLuint = 0;
    gl::GenTextures(1, &mut handle);

    if handle == 0 {
      return Err(TextureError::CreationFailed);
    }

    let mut state = self.state.borrow_mut();
    state.bind_texture(handle);

    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);

    // RGBA8 rows are always 4-byte aligned
    gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);
    gl::TexImage2D(
      gl::TEXTURE_2D,
      0,
      gl::RGBA8 as GLint,
      width as GLsizei,
      height as GLsizei,
      0,
      gl::RGBA,
      gl::UNSIGNED_BYTE,
      texels.as_ptr() as *const c_void,
    );

    state.bind_texture(0);

    Ok(Texture {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_texture(texture: &Self::TextureRepr, slot: u32) {
    let mut state = texture.state.borrow_mut();

    state.set_texture_unit(slot);
    state.bind_texture(texture.handle);
  }

  unsafe fn unbind_texture(texture: &Self::TextureRepr, slot: u32) {
    let mut state = texture.state.borrow_mut();

    state.set_texture_unit(slot);
    state.bind_texture(0);
  }

  unsafe fn destroy_texture(texture: &mut Self::TextureRepr) {
    texture.state.borrow_mut().forget_texture(texture.handle);
    gl::DeleteTextures(1, &texture.handle);
  }
}
