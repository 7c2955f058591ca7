//! Backend trait implementations.

use crate::device::Device;
use crate::Headless;
use glaze::backend::buffer::Buffer as BufferBackend;
use glaze::backend::probe::ErrorQuery;
use glaze::backend::render::Render;
use glaze::backend::shader::Shader;
use glaze::backend::texture::Texture;
use glaze::backend::vertex_array::VertexArray;
use glaze::buffer::{BufferError, BufferTarget};
use glaze::probe::DriverError;
use glaze::buffer::IndexType;
use glaze::shader::{ProgramError, StageError, StageType, UniformLocation, UniformValue};
use glaze::texture::TextureError;
use glaze::vertex::VertexAttrib;
use glaze::vertex_array::VertexArrayError;
use std::cell::RefCell;
use std::rc::Rc;

/// A device object.
#[derive(Debug)]
pub struct Object {
  handle: u32,
  device: Rc<RefCell<Device>>,
}

impl Object {
  pub fn handle(&self) -> u32 {
    self.handle
  }
}

/// A device buffer, remembering the target it was created for.
#[derive(Debug)]
pub struct Buffer {
  object: Object,
  target: BufferTarget,
}

impl Buffer {
  pub fn handle(&self) -> u32 {
    self.object.handle
  }

  pub fn target(&self) -> BufferTarget {
    self.target
  }
}

impl Headless {
  fn object(&self, handle: u32) -> Object {
    Object {
      handle,
      device: self.device.clone(),
    }
  }
}

unsafe impl BufferBackend for Headless {
  type BufferRepr = Buffer;

  unsafe fn new_buffer(
    &mut self,
    target: BufferTarget,
    bytes: &[u8],
  ) -> Result<Self::BufferRepr, BufferError> {
    let mut device = self.device.borrow_mut();
    let handle = device.gen_buffer(target);

    device.bind_buffer(target, handle);
    device.buffer_data(target, bytes.len());

    Ok(Buffer {
      object: self.object(handle),
      target,
    })
  }

  unsafe fn bind_buffer(buffer: &Self::BufferRepr) {
    let Buffer { object, target } = buffer;
    object.device.borrow_mut().bind_buffer(*target, object.handle);
  }

  unsafe fn unbind_buffer(buffer: &Self::BufferRepr) {
    let Buffer { object, target } = buffer;
    object.device.borrow_mut().bind_buffer(*target, 0);
  }

  unsafe fn destroy_buffer(buffer: &mut Self::BufferRepr) {
    let object = &buffer.object;
    object.device.borrow_mut().delete_buffer(object.handle);
  }
}

unsafe impl VertexArray for Headless {
  type VertexArrayRepr = Object;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let mut device = self.device.borrow_mut();
    let handle = device.gen_vertex_array();

    device.bind_vertex_array(handle);

    Ok(self.object(handle))
  }

  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array
      .device
      .borrow_mut()
      .bind_vertex_array(vertex_array.handle);
  }

  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array.device.borrow_mut().bind_vertex_array(0);
  }

  unsafe fn set_vertex_attrib(
    vertex_array: &Self::VertexArrayRepr,
    index: u32,
    attrib: &VertexAttrib,
  ) {
    vertex_array
      .device
      .borrow_mut()
      .vertex_attrib_pointer(index, *attrib);
  }

  unsafe fn destroy_vertex_array(vertex_array: &mut Self::VertexArrayRepr) {
    vertex_array
      .device
      .borrow_mut()
      .delete_vertex_array(vertex_array.handle);
  }
}

unsafe impl Shader for Headless {
  type StageRepr = Object;

  type ProgramRepr = Object;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let mut device = self.device.borrow_mut();
    let (handle, compiled) = device.create_shader(ty, src);

    match compiled {
      Ok(()) => Ok(self.object(handle)),

      Err(log) => {
        device.delete_shader(handle);

        Err(StageError::CompilationFailed(ty, log))
      }
    }
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    stage.device.borrow_mut().delete_shader(stage.handle);
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = self
      .device
      .borrow_mut()
      .create_program(&[vertex.handle, fragment.handle]);

    Ok(self.object(handle))
  }

  unsafe fn link_program(program: &Self::ProgramRepr) -> Result<(), ProgramError> {
    program
      .device
      .borrow_mut()
      .link_program(program.handle)
      .map_err(ProgramError::LinkFailed)
  }

  unsafe fn use_program(program: &Self::ProgramRepr) {
    program.device.borrow_mut().use_program(program.handle);
  }

  unsafe fn unuse_program(program: &Self::ProgramRepr) {
    program.device.borrow_mut().use_program(0);
  }

  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> UniformLocation {
    program
      .device
      .borrow_mut()
      .uniform_location(program.handle, name)
  }

  unsafe fn set_uniform(program: &Self::ProgramRepr, location: UniformLocation, value: UniformValue) {
    program.device.borrow_mut().set_uniform(location, value);
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    program.device.borrow_mut().delete_program(program.handle);
  }
}

unsafe impl Texture for Headless {
  type TextureRepr = Object;

  unsafe fn new_texture(
    &mut self,
    width: u32,
    height: u32,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError> {
    let expected = width as usize * height as usize * 4;

    if texels.len() != expected {
      return Err(TextureError::SizeMismatch {
        expected,
        actual: texels.len(),
      });
    }

    let handle = self.device.borrow_mut().gen_texture(width, height);
    Ok(self.object(handle))
  }

  unsafe fn bind_texture(texture: &Self::TextureRepr, slot: u32) {
    let mut device = texture.device.borrow_mut();

    device.active_texture(slot);
    device.bind_texture(texture.handle);
  }

  unsafe fn unbind_texture(texture: &Self::TextureRepr, slot: u32) {
    let mut device = texture.device.borrow_mut();

    device.active_texture(slot);
    device.bind_texture(0);
  }

  unsafe fn destroy_texture(texture: &mut Self::TextureRepr) {
    texture.device.borrow_mut().delete_texture(texture.handle);
  }
}

unsafe impl Render for Headless {
  unsafe fn set_clear_color(&mut self, rgba: [f32; 4]) {
    self.device.borrow_mut().set_clear_color(rgba);
  }

  unsafe fn clear_color_buffer(&mut self) {
    self.device.borrow_mut().clear();
  }

  unsafe fn enable_alpha_blending(&mut self) {
    self.device.borrow_mut().enable_blending();
  }

  unsafe fn draw_indexed(&mut self, count: usize, ty: IndexType) {
    self.device.borrow_mut().draw_elements(count, ty);
  }
}

unsafe impl ErrorQuery for Headless {
  unsafe fn poll_error(&mut self) -> Option<DriverError> {
    self.device.borrow_mut().poll_error()
  }
}
