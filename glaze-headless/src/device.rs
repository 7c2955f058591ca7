//! The recording device.
//!
//! A [`Device`] plays the role of the driver: it hands out handles, tracks which of them are
//! alive, mirrors the bind points, records every call it receives and raises deferred errors on
//! misuse, the same way a real driver would.

use crate::glsl::{self, StageInfo};
use glaze::buffer::BufferTarget;
use glaze::probe::DriverError;
use glaze::buffer::IndexType;
use glaze::shader::{StageType, UniformLocation, UniformValue};
use glaze::vertex::VertexAttrib;
use std::collections::{HashMap, VecDeque};

/// Number of texture units the device exposes.
pub const TEXTURE_UNITS: u32 = 48;

/// Kind of driver object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
  Buffer,
  VertexArray,
  Shader,
  Program,
  Texture,
}

/// A recorded driver call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
  GenBuffer(u32),
  BindBuffer { target: BufferTarget, handle: u32 },
  BufferData { target: BufferTarget, size: usize },
  DeleteBuffer(u32),
  GenVertexArray(u32),
  BindVertexArray(u32),
  VertexAttribPointer { index: u32, attrib: VertexAttrib },
  DeleteVertexArray(u32),
  CreateShader { handle: u32, ty: StageType },
  DeleteShader(u32),
  CreateProgram(u32),
  LinkProgram(u32),
  UseProgram(u32),
  GetUniformLocation { program: u32, name: String },
  Uniform { location: i32, value: UniformValue },
  DeleteProgram(u32),
  GenTexture(u32),
  ActiveTexture(u32),
  BindTexture(u32),
  TexImage2D { width: u32, height: u32 },
  DeleteTexture(u32),
  ClearColor([f32; 4]),
  Clear,
  EnableBlending,
  DrawElements { count: usize, ty: IndexType },
}

/// Current bind points.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bindings {
  pub array_buffer: u32,
  pub element_array_buffer: u32,
  pub vertex_array: u32,
  pub program: u32,
  pub active_texture: u32,
  pub textures: Vec<u32>,
}

impl Default for Bindings {
  fn default() -> Self {
    Bindings {
      array_buffer: 0,
      element_array_buffer: 0,
      vertex_array: 0,
      program: 0,
      active_texture: 0,
      textures: vec![0; TEXTURE_UNITS as usize],
    }
  }
}

#[derive(Debug)]
struct Shader {
  info: Option<StageInfo>,
}

#[derive(Debug, Default)]
struct Program {
  stages: Vec<StageInfo>,
  linked: bool,
  // index is the location
  uniforms: Vec<String>,
  values: HashMap<i32, UniformValue>,
}

#[derive(Debug, Default)]
struct VertexArray {
  element_array_buffer: u32,
  attribs: HashMap<u32, VertexAttrib>,
}

/// Software stand-in for a graphics driver.
#[derive(Debug)]
pub struct Device {
  next_handle: u32,
  live: HashMap<u32, Kind>,
  bindings: Bindings,
  buffers: HashMap<u32, BufferTarget>,
  vertex_arrays: HashMap<u32, VertexArray>,
  shaders: HashMap<u32, Shader>,
  programs: HashMap<u32, Program>,
  textures: HashMap<u32, (u32, u32)>,
  clear_color: [f32; 4],
  blending: bool,
  errors: VecDeque<DriverError>,
  calls: Vec<Call>,
}

impl Default for Device {
  fn default() -> Self {
    Device {
      next_handle: 1,
      live: HashMap::new(),
      bindings: Bindings::default(),
      buffers: HashMap::new(),
      vertex_arrays: HashMap::new(),
      shaders: HashMap::new(),
      programs: HashMap::new(),
      textures: HashMap::new(),
      clear_color: [0.; 4],
      blending: false,
      errors: VecDeque::new(),
      calls: Vec::new(),
    }
  }
}

impl Device {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of live objects of a given kind.
  pub fn live(&self, kind: Kind) -> usize {
    self.live.values().filter(|k| **k == kind).count()
  }

  /// Whether `handle` names a live object.
  pub fn is_live(&self, handle: u32) -> bool {
    self.live.contains_key(&handle)
  }

  pub fn bindings(&self) -> &Bindings {
    &self.bindings
  }

  pub fn calls(&self) -> &[Call] {
    &self.calls
  }

  /// Forget the recorded calls.
  pub fn take_calls(&mut self) -> Vec<Call> {
    std::mem::take(&mut self.calls)
  }

  pub fn clear_color(&self) -> [f32; 4] {
    self.clear_color
  }

  pub fn is_blending(&self) -> bool {
    self.blending
  }

  /// Attribute configured in slot `index` of vertex array `handle`.
  pub fn vertex_attrib(&self, vertex_array: u32, index: u32) -> Option<VertexAttrib> {
    self
      .vertex_arrays
      .get(&vertex_array)
      .and_then(|va| va.attribs.get(&index).copied())
  }

  /// Last value set for uniform `name` of `program`.
  pub fn uniform(&self, program: u32, name: &str) -> Option<UniformValue> {
    let program = self.programs.get(&program)?;
    let location = program.uniforms.iter().position(|u| u == name)?;

    program.values.get(&(location as i32)).copied()
  }

  /// Dimensions of texture `handle`.
  pub fn texture_size(&self, handle: u32) -> Option<(u32, u32)> {
    self.textures.get(&handle).copied()
  }

  /// Raise a deferred error, as if a call had failed.
  pub fn raise(&mut self, err: DriverError) {
    log::trace!("raised {} after {:?}", err, self.calls.last());
    self.errors.push_back(err);
  }

  pub fn pending_errors(&self) -> usize {
    self.errors.len()
  }

  pub(crate) fn poll_error(&mut self) -> Option<DriverError> {
    self.errors.pop_front()
  }

  fn gen(&mut self, kind: Kind) -> u32 {
    let handle = self.next_handle;
    self.next_handle += 1;
    self.live.insert(handle, kind);
    handle
  }

  fn is_live_as(&self, handle: u32, kind: Kind) -> bool {
    self.live.get(&handle) == Some(&kind)
  }

  // Drivers silently ignore dead names; raising here is what makes double frees visible.
  fn delete(&mut self, handle: u32, kind: Kind) {
    if !self.is_live_as(handle, kind) {
      self.raise(DriverError::InvalidValue);
      return;
    }

    self.live.remove(&handle);
  }

  pub(crate) fn gen_buffer(&mut self, target: BufferTarget) -> u32 {
    let handle = self.gen(Kind::Buffer);
    self.buffers.insert(handle, target);
    self.calls.push(Call::GenBuffer(handle));
    handle
  }

  pub(crate) fn bind_buffer(&mut self, target: BufferTarget, handle: u32) {
    self.calls.push(Call::BindBuffer { target, handle });

    if handle != 0 && !self.is_live_as(handle, Kind::Buffer) {
      self.raise(DriverError::InvalidOperation);
      return;
    }

    match target {
      BufferTarget::Array => self.bindings.array_buffer = handle,

      BufferTarget::ElementArray => {
        self.bindings.element_array_buffer = handle;

        let vertex_array = self.bindings.vertex_array;
        if let Some(va) = self.vertex_arrays.get_mut(&vertex_array) {
          va.element_array_buffer = handle;
        }
      }
    }
  }

  pub(crate) fn buffer_data(&mut self, target: BufferTarget, size: usize) {
    self.calls.push(Call::BufferData { target, size });

    let bound = match target {
      BufferTarget::Array => self.bindings.array_buffer,
      BufferTarget::ElementArray => self.bindings.element_array_buffer,
    };

    if bound == 0 {
      self.raise(DriverError::InvalidOperation);
    }
  }

  pub(crate) fn delete_buffer(&mut self, handle: u32) {
    self.calls.push(Call::DeleteBuffer(handle));
    self.delete(handle, Kind::Buffer);
    self.buffers.remove(&handle);

    if self.bindings.array_buffer == handle {
      self.bindings.array_buffer = 0;
    }

    if self.bindings.element_array_buffer == handle {
      self.bindings.element_array_buffer = 0;
    }

    for va in self.vertex_arrays.values_mut() {
      if va.element_array_buffer == handle {
        va.element_array_buffer = 0;
      }
    }
  }

  pub(crate) fn gen_vertex_array(&mut self) -> u32 {
    let handle = self.gen(Kind::VertexArray);
    self.vertex_arrays.insert(handle, VertexArray::default());
    self.calls.push(Call::GenVertexArray(handle));
    handle
  }

  pub(crate) fn bind_vertex_array(&mut self, handle: u32) {
    self.calls.push(Call::BindVertexArray(handle));

    if handle != 0 && !self.is_live_as(handle, Kind::VertexArray) {
      self.raise(DriverError::InvalidOperation);
      return;
    }

    self.bindings.vertex_array = handle;
    self.bindings.element_array_buffer = self
      .vertex_arrays
      .get(&handle)
      .map(|va| va.element_array_buffer)
      .unwrap_or(0);
  }

  pub(crate) fn vertex_attrib_pointer(&mut self, index: u32, attrib: VertexAttrib) {
    self.calls.push(Call::VertexAttribPointer { index, attrib });

    if !(1..=4).contains(&attrib.count) {
      self.raise(DriverError::InvalidValue);
      return;
    }

    let vertex_array = self.bindings.vertex_array;
    if vertex_array == 0 || self.bindings.array_buffer == 0 {
      self.raise(DriverError::InvalidOperation);
      return;
    }

    if let Some(va) = self.vertex_arrays.get_mut(&vertex_array) {
      va.attribs.insert(index, attrib);
    }
  }

  pub(crate) fn delete_vertex_array(&mut self, handle: u32) {
    self.calls.push(Call::DeleteVertexArray(handle));
    self.delete(handle, Kind::VertexArray);
    self.vertex_arrays.remove(&handle);

    if self.bindings.vertex_array == handle {
      self.bindings.vertex_array = 0;
      self.bindings.element_array_buffer = 0;
    }
  }

  pub(crate) fn create_shader(&mut self, ty: StageType, src: &str) -> (u32, Result<(), String>) {
    let handle = self.gen(Kind::Shader);
    self.calls.push(Call::CreateShader { handle, ty });

    let (info, result) = match glsl::scan(src) {
      Ok(info) => (Some(info), Ok(())),
      Err(log) => (None, Err(log)),
    };

    self.shaders.insert(handle, Shader { info });
    (handle, result)
  }

  pub(crate) fn delete_shader(&mut self, handle: u32) {
    self.calls.push(Call::DeleteShader(handle));
    self.delete(handle, Kind::Shader);
    self.shaders.remove(&handle);
  }

  pub(crate) fn create_program(&mut self, stages: &[u32]) -> u32 {
    let handle = self.gen(Kind::Program);
    self.calls.push(Call::CreateProgram(handle));

    let stages = stages
      .iter()
      .filter_map(|stage| self.shaders.get(stage))
      .filter_map(|shader| shader.info.clone())
      .collect();

    self.programs.insert(
      handle,
      Program {
        stages,
        ..Program::default()
      },
    );

    handle
  }

  pub(crate) fn link_program(&mut self, handle: u32) -> Result<(), String> {
    self.calls.push(Call::LinkProgram(handle));

    let program = self
      .programs
      .get_mut(&handle)
      .ok_or_else(|| format!("unknown program {}", handle))?;

    let result = match program.stages.as_slice() {
      [vertex, fragment] => glsl::link(vertex, fragment),
      _ => Err("error: a program needs one vertex and one fragment stage".to_owned()),
    };

    if result.is_ok() {
      program.linked = true;
      program.uniforms = program
        .stages
        .iter()
        .flat_map(|stage| stage.used_uniforms.iter().cloned())
        .fold(Vec::new(), |mut acc, name| {
          if !acc.contains(&name) {
            acc.push(name);
          }
          acc
        });
    }

    result
  }

  pub(crate) fn use_program(&mut self, handle: u32) {
    self.calls.push(Call::UseProgram(handle));

    if handle != 0 && !self.is_live_as(handle, Kind::Program) {
      self.raise(DriverError::InvalidValue);
      return;
    }

    let linked = self.programs.get(&handle).map_or(true, |p| p.linked);
    if !linked {
      self.raise(DriverError::InvalidOperation);
      return;
    }

    self.bindings.program = handle;
  }

  pub(crate) fn uniform_location(&mut self, program: u32, name: &str) -> UniformLocation {
    self.calls.push(Call::GetUniformLocation {
      program,
      name: name.to_owned(),
    });

    let index = match self.programs.get(&program) {
      Some(p) => p.uniforms.iter().position(|u| u == name),

      None => {
        self.raise(DriverError::InvalidValue);
        return UniformLocation::INACTIVE;
      }
    };

    index.map_or(UniformLocation::INACTIVE, |i| UniformLocation::new(i as i32))
  }

  pub(crate) fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
    let location = location.index();
    self.calls.push(Call::Uniform { location, value });

    // -1 is silently ignored by drivers
    if location == -1 {
      return;
    }

    let current = self.bindings.program;
    let program = self
      .programs
      .get_mut(&current)
      .filter(|p| location >= 0 && (location as usize) < p.uniforms.len());

    match program {
      Some(p) => {
        p.values.insert(location, value);
      }

      None => self.raise(DriverError::InvalidOperation),
    }
  }

  pub(crate) fn delete_program(&mut self, handle: u32) {
    self.calls.push(Call::DeleteProgram(handle));
    self.delete(handle, Kind::Program);
    self.programs.remove(&handle);

    if self.bindings.program == handle {
      self.bindings.program = 0;
    }
  }

  pub(crate) fn gen_texture(&mut self, width: u32, height: u32) -> u32 {
    let handle = self.gen(Kind::Texture);
    self.calls.push(Call::GenTexture(handle));
    self.calls.push(Call::TexImage2D { width, height });
    self.textures.insert(handle, (width, height));
    handle
  }

  pub(crate) fn active_texture(&mut self, unit: u32) {
    self.calls.push(Call::ActiveTexture(unit));

    if unit >= TEXTURE_UNITS {
      self.raise(DriverError::InvalidEnum);
      return;
    }

    self.bindings.active_texture = unit;
  }

  pub(crate) fn bind_texture(&mut self, handle: u32) {
    self.calls.push(Call::BindTexture(handle));

    if handle != 0 && !self.is_live_as(handle, Kind::Texture) {
      self.raise(DriverError::InvalidOperation);
      return;
    }

    let unit = self.bindings.active_texture as usize;
    self.bindings.textures[unit] = handle;
  }

  pub(crate) fn delete_texture(&mut self, handle: u32) {
    self.calls.push(Call::DeleteTexture(handle));
    self.delete(handle, Kind::Texture);
    self.textures.remove(&handle);

    for t in self.bindings.textures.iter_mut().filter(|t| **t == handle) {
      *t = 0;
    }
  }

  pub(crate) fn set_clear_color(&mut self, rgba: [f32; 4]) {
    self.calls.push(Call::ClearColor(rgba));
    self.clear_color = rgba;
  }

  pub(crate) fn clear(&mut self) {
    self.calls.push(Call::Clear);
  }

  pub(crate) fn enable_blending(&mut self) {
    self.calls.push(Call::EnableBlending);
    self.blending = true;
  }

  pub(crate) fn draw_elements(&mut self, count: usize, ty: IndexType) {
    self.calls.push(Call::DrawElements { count, ty });

    if self.bindings.program == 0
      || self.bindings.vertex_array == 0
      || self.bindings.element_array_buffer == 0
    {
      self.raise(DriverError::InvalidOperation);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn handles_are_never_zero() {
    let mut device = Device::new();

    assert_ne!(device.gen_buffer(BufferTarget::Array), 0);
    assert_ne!(device.gen_vertex_array(), 0);
  }

  #[test]
  fn binding_a_deleted_buffer_fails() {
    let mut device = Device::new();
    let buffer = device.gen_buffer(BufferTarget::Array);

    device.delete_buffer(buffer);
    device.bind_buffer(BufferTarget::Array, buffer);

    assert_eq!(device.poll_error(), Some(DriverError::InvalidOperation));
    assert_eq!(device.bindings().array_buffer, 0);
  }

  #[test]
  fn element_binding_follows_vertex_array() {
    let mut device = Device::new();
    let a = device.gen_vertex_array();
    let b = device.gen_vertex_array();
    let ib = device.gen_buffer(BufferTarget::ElementArray);

    device.bind_vertex_array(a);
    device.bind_buffer(BufferTarget::ElementArray, ib);
    device.bind_vertex_array(b);
    assert_eq!(device.bindings().element_array_buffer, 0);

    device.bind_vertex_array(a);
    assert_eq!(device.bindings().element_array_buffer, ib);
  }

  #[test]
  fn out_of_range_texture_unit() {
    let mut device = Device::new();

    device.active_texture(TEXTURE_UNITS);
    assert_eq!(device.poll_error(), Some(DriverError::InvalidEnum));
    assert_eq!(device.poll_error(), None);
  }

  #[test]
  fn draw_without_state_fails() {
    let mut device = Device::new();

    device.draw_elements(3, IndexType::U32);
    assert_eq!(device.poll_error(), Some(DriverError::InvalidOperation));
  }

  #[test]
  fn double_delete_fails() {
    let mut device = Device::new();
    let texture = device.gen_texture(1, 1);

    device.delete_texture(texture);
    device.delete_texture(texture);

    assert_eq!(device.poll_error(), Some(DriverError::InvalidValue));
    assert_eq!(device.live(Kind::Texture), 0);
  }
}
