//! Shader programs and uniforms.
//!
//! A [`ShaderProgram`] is built out of two textual stages, a vertex one and a fragment one. Both
//! are usually stored in the same file and separated by marker lines:
//!
//! ```text
//! #shader vertex
//! …vertex stage…
//!
//! #shader fragment
//! …fragment stage…
//! ```
//!
//! See [`ShaderSource::parse`] for the exact splitting rules.
//!
//! # Uniforms
//!
//! Uniforms are set by name. The first time a name is used, its location is queried from the
//! driver and cached in the program; every later set with the same name reuses the cached
//! location. Names the compiled program doesn’t know (misspelled, or optimized away by the
//! shader compiler) resolve to [`UniformLocation::INACTIVE`], and setting them is a silent no-op.
//!
//! Uniform sets target whichever program is **currently bound**. Bind the program before setting
//! its uniforms.

use crate::backend::shader::Shader as ShaderBackend;
use crate::context::GraphicsContext;
use cgmath::Matrix4;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{error, fmt, fs, io};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`ShaderProgram`] can generate.
#[derive(Debug)]
pub enum ProgramError {
  /// The source file couldn’t be read.
  Io(PathBuf, io::Error),
  /// A shader stage failed to compile.
  StageError(StageError),
  /// The driver didn’t hand back a program handle.
  CreationFailed,
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::Io(ref path, ref e) => write!(f, "cannot read {}: {}", path.display(), e),

      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),

      ProgramError::CreationFailed => f.write_str("cannot create shader program"),

      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::Io(_, e) => Some(e),
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Vertex and fragment sources, split out of a single text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ShaderSource {
  pub vertex: String,
  pub fragment: String,
}

impl ShaderSource {
  /// Split `text` into stages.
  ///
  /// Any line containing `#shader` is a marker: if the rest of it mentions `vertex` or
  /// `fragment`, the following lines go to that stage. Lines before the first marker, or after a
  /// marker naming neither stage, are dropped. A stage without marker ends up empty, which the
  /// shader compiler will then reject.
  pub fn parse(text: &str) -> Self {
    let mut src = ShaderSource::default();
    let mut current = None;

    for line in text.lines() {
      if line.contains("#shader") {
        current = if line.contains("vertex") {
          Some(StageType::VertexShader)
        } else if line.contains("fragment") {
          Some(StageType::FragmentShader)
        } else {
          None
        };

        continue;
      }

      let block = match current {
        Some(StageType::VertexShader) => &mut src.vertex,
        Some(StageType::FragmentShader) => &mut src.fragment,
        None => continue,
      };

      block.push_str(line);
      block.push('\n');
    }

    src
  }

  /// Read and split a file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ProgramError::Io(path.to_owned(), e))?;

    Ok(Self::parse(&text))
  }
}

/// Location of a uniform inside a linked program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct UniformLocation(i32);

impl UniformLocation {
  /// Location of names the program doesn’t know about.
  pub const INACTIVE: UniformLocation = UniformLocation(-1);

  pub fn new(index: i32) -> Self {
    UniformLocation(index)
  }

  pub fn index(self) -> i32 {
    self.0
  }

  pub fn is_active(self) -> bool {
    self.0 >= 0
  }
}

/// A typed uniform value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
  Int(i32),
  Float(f32),
  Vec4([f32; 4]),
  /// Column-major 4×4 matrix.
  Mat4([[f32; 4]; 4]),
}

/// Types that can be sent as uniform values.
pub trait Uniformable {
  fn into_uniform(self) -> UniformValue;
}

impl Uniformable for i32 {
  fn into_uniform(self) -> UniformValue {
    UniformValue::Int(self)
  }
}

impl Uniformable for f32 {
  fn into_uniform(self) -> UniformValue {
    UniformValue::Float(self)
  }
}

impl Uniformable for [f32; 4] {
  fn into_uniform(self) -> UniformValue {
    UniformValue::Vec4(self)
  }
}

impl Uniformable for Matrix4<f32> {
  fn into_uniform(self) -> UniformValue {
    UniformValue::Mat4(self.into())
  }
}

// Compiled stage, released when dropped; only lives until the program is linked.
struct Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  repr: B::StageRepr,
}

impl<B> Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  fn new(backend: &mut B, ty: StageType, src: &str) -> Result<Self, StageError> {
    let repr = unsafe { backend.new_stage(ty, src)? };
    Ok(Stage { repr })
  }
}

impl<B> Drop for Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_stage(&mut self.repr) };
  }
}

/// A linked vertex + fragment program, with its uniform-location cache.
///
/// A program may be _null_ (see [`ShaderProgram::new`]); binding a null program or setting its
/// uniforms does nothing.
pub struct ShaderProgram<B>
where
  B: ?Sized + ShaderBackend,
{
  repr: Option<B::ProgramRepr>,
  linked: bool,
  uniforms: HashMap<String, UniformLocation>,
}

impl<B> Drop for ShaderProgram<B>
where
  B: ?Sized + ShaderBackend,
{
  fn drop(&mut self) {
    if let Some(ref mut repr) = self.repr {
      unsafe { B::destroy_program(repr) };
    }
  }
}

impl<B> fmt::Debug for ShaderProgram<B>
where
  B: ?Sized + ShaderBackend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("ShaderProgram")
      .field("null", &self.repr.is_none())
      .field("linked", &self.linked)
      .field("cached_uniforms", &self.uniforms.len())
      .finish()
  }
}

impl<B> ShaderProgram<B>
where
  B: ?Sized + ShaderBackend,
{
  /// Build a program from a shader file, never failing.
  ///
  /// Any error (missing file, compilation failure) is logged and a null program is returned.
  /// A failed link still returns a usable program; check [`ShaderProgram::is_linked`].
  pub fn new<C>(ctx: &mut C, path: impl AsRef<Path>) -> Self
  where
    C: GraphicsContext<Backend = B>,
  {
    let path = path.as_ref();

    Self::from_path(ctx, path).unwrap_or_else(|e| {
      log::error!("cannot build shader program from {}: {}", path.display(), e);
      Self::null()
    })
  }

  /// Build a program from a shader file.
  pub fn from_path<C>(ctx: &mut C, path: impl AsRef<Path>) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let src = ShaderSource::from_path(path)?;
    Self::from_source(ctx, &src)
  }

  pub fn from_source<C>(ctx: &mut C, src: &ShaderSource) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = B>,
  {
    Self::from_strings(ctx, &src.vertex, &src.fragment)
  }

  /// Compile both stages, then link them.
  ///
  /// A link failure is not an error: the log is reported and the program is returned with
  /// [`ShaderProgram::is_linked`] set to `false`.
  pub fn from_strings<C>(ctx: &mut C, vertex: &str, fragment: &str) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let backend = ctx.backend();

    let vs = Stage::<B>::new(backend, StageType::VertexShader, vertex)?;
    let fs = Stage::<B>::new(backend, StageType::FragmentShader, fragment)?;
    let repr = unsafe { backend.new_program(&vs.repr, &fs.repr)? };

    let linked = match unsafe { B::link_program(&repr) } {
      Ok(()) => true,
      Err(e) => {
        log::warn!("{}", e);
        false
      }
    };

    // stages are not needed anymore once the program is linked
    drop(fs);
    drop(vs);

    log::debug!("created shader program (linked = {})", linked);

    Ok(ShaderProgram {
      repr: Some(repr),
      linked,
      uniforms: HashMap::new(),
    })
  }

  /// A program owning no driver object.
  pub fn null() -> Self {
    ShaderProgram {
      repr: None,
      linked: false,
      uniforms: HashMap::new(),
    }
  }

  pub fn is_null(&self) -> bool {
    self.repr.is_none()
  }

  pub fn is_linked(&self) -> bool {
    self.linked
  }

  pub fn bind(&self) {
    if let Some(ref repr) = self.repr {
      unsafe { B::use_program(repr) };
    }
  }

  pub fn unbind(&self) {
    if let Some(ref repr) = self.repr {
      unsafe { B::unuse_program(repr) };
    }
  }

  /// Resolve the location of a uniform, querying the driver only the first time `name` is seen.
  pub fn uniform_location(&mut self, name: &str) -> UniformLocation {
    let repr = match self.repr {
      Some(ref repr) => repr,
      None => return UniformLocation::INACTIVE,
    };

    if let Some(location) = self.uniforms.get(name) {
      return *location;
    }

    let location = unsafe { B::uniform_location(repr, name) };

    if !location.is_active() {
      log::warn!("uniform {} doesn’t exist or is inactive", name);
    }

    self.uniforms.insert(name.to_owned(), location);
    location
  }

  /// Set a uniform of this program, which must be bound.
  pub fn set_uniform<T>(&mut self, name: &str, value: T)
  where
    T: Uniformable,
  {
    let location = self.uniform_location(name);

    if !location.is_active() {
      return;
    }

    if let Some(ref repr) = self.repr {
      unsafe { B::set_uniform(repr, location, value.into_uniform()) };
    }
  }

  pub fn set_uniform_1i(&mut self, name: &str, value: i32) {
    self.set_uniform(name, value);
  }

  pub fn set_uniform_1f(&mut self, name: &str, value: f32) {
    self.set_uniform(name, value);
  }

  pub fn set_uniform_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
    self.set_uniform(name, [v0, v1, v2, v3]);
  }

  pub fn set_uniform_mat4f(&mut self, name: &str, matrix: &Matrix4<f32>) {
    self.set_uniform(name, *matrix);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BASIC: &str = "\
#shader vertex
#version 330 core
void main() {}

#shader fragment
#version 330 core
out vec4 color;
void main() { color = vec4(1.); }
";

  #[test]
  fn split_vertex_and_fragment() {
    let src = ShaderSource::parse(BASIC);

    assert_eq!(src.vertex, "#version 330 core\nvoid main() {}\n\n");
    assert!(src.fragment.starts_with("#version 330 core\nout vec4 color;\n"));
    assert!(!src.fragment.contains("#shader"));
  }

  #[test]
  fn lines_before_first_marker_are_dropped() {
    let src = ShaderSource::parse("// header\n#shader vertex\nA\n#shader fragment\nB\n");

    assert_eq!(src.vertex, "A\n");
    assert_eq!(src.fragment, "B\n");
  }

  #[test]
  fn unknown_marker_drops_its_block() {
    let src = ShaderSource::parse("#shader vertex\nA\n#shader geometry\nG\n#shader fragment\nB\n");

    assert_eq!(src.vertex, "A\n");
    assert_eq!(src.fragment, "B\n");
  }

  #[test]
  fn missing_marker_leaves_stage_empty() {
    let src = ShaderSource::parse("#shader vertex\nA\n");

    assert_eq!(src.vertex, "A\n");
    assert!(src.fragment.is_empty());
  }

  #[test]
  fn missing_file() {
    let err = ShaderSource::from_path("this/does/not/exist.shader").unwrap_err();
    assert!(matches!(err, ProgramError::Io(..)));
  }

  #[test]
  fn uniform_values() {
    assert_eq!(3i32.into_uniform(), UniformValue::Int(3));
    assert_eq!(0.5f32.into_uniform(), UniformValue::Float(0.5));

    let m = Matrix4::from_translation(cgmath::Vector3::new(1f32, 2., 3.));
    match m.into_uniform() {
      UniformValue::Mat4(cols) => assert_eq!(cols[3], [1., 2., 3., 1.]),
      v => panic!("unexpected uniform value: {:?}", v),
    }
  }

  #[test]
  fn inactive_location() {
    assert!(!UniformLocation::INACTIVE.is_active());
    assert!(UniformLocation::new(0).is_active());
  }
}
