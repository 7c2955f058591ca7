//! Bind-state cache.
//!
//! OpenGL keeps one “currently bound object” per target, for the whole context. [`GLState`]
//! mirrors the targets glaze uses so that redundant binds never reach the driver, and so that
//! deleting an object resets the mirrored targets still naming it, exactly like the driver does.

use gl::types::*;
use std::cell::Cell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// Whether this thread already handed out its `GLState`.
thread_local!(static STATE_TAKEN: Cell<bool> = Cell::new(false));

/// A mirrored driver value, or nothing if the driver value is unknown.
///
/// An unknown value never matches, so the next set always reaches the driver.
#[derive(Debug)]
struct Cached<T>(Option<T>);

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn known(value: T) -> Self {
    Cached(Some(value))
  }

  fn unknown() -> Self {
    Cached(None)
  }

  /// Whether setting `value` must go through to the driver.
  fn is_stale(&self, value: &T) -> bool {
    self.0.as_ref() != Some(value)
  }

  fn holds(&self, value: &T) -> bool {
    !self.is_stale(value)
  }

  fn store(&mut self, value: T) {
    self.0 = Some(value);
  }

  fn forget(&mut self) {
    self.0 = None;
  }
}

/// Mirror of the texture units: the active one, and the 2D texture bound to each.
#[derive(Debug)]
struct TextureUnits {
  active: Cached<u32>,
  bound: Vec<Cached<GLuint>>,
}

impl TextureUnits {
  fn new(count: u32, active: u32) -> Self {
    let active = if active < count {
      Cached::known(active)
    } else {
      Cached::unknown()
    };
    let bound = (0..count).map(|_| Cached::unknown()).collect();

    TextureUnits { active, bound }
  }

  fn count(&self) -> u32 {
    self.bound.len() as u32
  }

  /// Whether activating `unit` must reach the driver.
  ///
  /// Units past the last one always do, so that the driver raises its error. It rejects them and
  /// keeps its active unit, so they are not mirrored.
  fn activate(&mut self, unit: u32) -> bool {
    if unit >= self.count() {
      return true;
    }

    if self.active.is_stale(&unit) {
      self.active.store(unit);
      true
    } else {
      false
    }
  }

  /// Whether binding `handle` to the active unit must reach the driver.
  fn bind(&mut self, handle: GLuint) -> bool {
    match self.active.0 {
      Some(unit) => {
        // active units are always in range
        let bound = &mut self.bound[unit as usize];

        if bound.holds(&handle) {
          false
        } else {
          bound.store(handle);
          true
        }
      }

      // the texture lands on a unit we can't name
      None => {
        self.bound.iter_mut().for_each(Cached::forget);
        true
      }
    }
  }

  fn forget_texture(&mut self, handle: GLuint) {
    for bound in self.bound.iter_mut().filter(|bound| bound.holds(&handle)) {
      bound.store(0);
    }
  }

  fn forget(&mut self) {
    self.active.forget();
    self.bound.iter_mut().for_each(Cached::forget);
  }
}

/// How a bind should treat the cache.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Bind {
  /// Always issue the driver call; used the first time a fresh handle is bound.
  Forced,
  /// Skip the driver call if the target already holds the handle.
  Cached,
}

/// Mirror of the driver bind state, one per thread.
///
/// It is `!Send` and `!Sync`: it belongs to the thread whose context is current.
#[derive(Debug)]
pub struct GLState {
  _not_send: PhantomData<*const ()>,

  clear_color: Cached<[GLfloat; 4]>,
  blending: Cached<bool>,
  blending_func: Cached<(GLenum, GLenum)>,

  texture_units: TextureUnits,

  array_buffer: GLuint,
  // element buffer binding belongs to the bound vertex array
  element_array_buffer: Cached<GLuint>,
  vertex_array: GLuint,

  program: GLuint,
}

impl GLState {
  /// Acquire the state of the current thread, reading the initial values from the driver.
  ///
  /// The context must be current. Only the first call on a given thread succeeds.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    let taken = STATE_TAKEN.with(|taken| taken.replace(true));

    if taken {
      return Err(StateQueryError::UnavailableGLState);
    }

    unsafe { Self::query() }
  }

  unsafe fn query() -> Result<Self, StateQueryError> {
    let mut clear_color = [0.; 4];
    gl::GetFloatv(gl::COLOR_CLEAR_VALUE, clear_color.as_mut_ptr());

    let blending = match gl::IsEnabled(gl::BLEND) {
      gl::TRUE => true,
      gl::FALSE => false,
      state => return Err(StateQueryError::UnknownBlendingState(state)),
    };

    // glBlendFunc sets both the color and alpha factors; only the color ones are mirrored
    let blending_func = (
      get_integer(gl::BLEND_SRC_RGB) as GLenum,
      get_integer(gl::BLEND_DST_RGB) as GLenum,
    );

    let unit_count = get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS).max(0) as u32;
    let active_unit = (get_integer(gl::ACTIVE_TEXTURE) as GLenum).wrapping_sub(gl::TEXTURE0);

    Ok(GLState {
      _not_send: PhantomData,
      clear_color: Cached::known(clear_color),
      blending: Cached::known(blending),
      blending_func: Cached::known(blending_func),
      texture_units: TextureUnits::new(unit_count, active_unit),
      array_buffer: 0,
      element_array_buffer: Cached::unknown(),
      vertex_array: get_integer(gl::VERTEX_ARRAY_BINDING) as GLuint,
      program: get_integer(gl::CURRENT_PROGRAM) as GLuint,
    })
  }

  /// Forget the mirrored bindings, e.g. after raw GL calls made behind glaze’s back.
  ///
  /// Every next bind reaches the driver.
  pub fn invalidate_bindings(&mut self) {
    self.texture_units.forget();
    self.array_buffer = 0;
    self.element_array_buffer.forget();
    self.vertex_array = 0;
    self.program = 0;
  }

  pub(crate) unsafe fn set_clear_color(&mut self, rgba: [GLfloat; 4]) {
    if self.clear_color.is_stale(&rgba) {
      gl::ClearColor(rgba[0], rgba[1], rgba[2], rgba[3]);
      self.clear_color.store(rgba);
    }
  }

  pub(crate) unsafe fn set_blending(&mut self, enabled: bool) {
    if self.blending.is_stale(&enabled) {
      if enabled {
        gl::Enable(gl::BLEND);
      } else {
        gl::Disable(gl::BLEND);
      }

      self.blending.store(enabled);
    }
  }

  pub(crate) unsafe fn set_blending_func(&mut self, src: GLenum, dst: GLenum) {
    if self.blending_func.is_stale(&(src, dst)) {
      gl::BlendFunc(src, dst);
      self.blending_func.store((src, dst));
    }
  }

  pub(crate) unsafe fn set_texture_unit(&mut self, unit: u32) {
    if self.texture_units.activate(unit) {
      gl::ActiveTexture(gl::TEXTURE0.wrapping_add(unit));
    }
  }

  /// Bind a 2D texture to the active unit.
  pub(crate) unsafe fn bind_texture(&mut self, handle: GLuint) {
    if self.texture_units.bind(handle) {
      gl::BindTexture(gl::TEXTURE_2D, handle);
    }
  }

  pub(crate) fn forget_texture(&mut self, handle: GLuint) {
    self.texture_units.forget_texture(handle);
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.array_buffer = handle;
    }
  }

  pub(crate) unsafe fn bind_element_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.element_array_buffer.is_stale(&handle) {
      gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, handle);
      self.element_array_buffer.store(handle);
    }
  }

  pub(crate) fn forget_buffer(&mut self, handle: GLuint) {
    if self.array_buffer == handle {
      self.array_buffer = 0;
    }

    if self.element_array_buffer.holds(&handle) {
      self.element_array_buffer.store(0);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.vertex_array != handle {
      gl::BindVertexArray(handle);
      self.vertex_array = handle;
      self.element_array_buffer.forget();
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self) {
    self.bind_vertex_array(0, Bind::Cached);
  }

  pub(crate) fn forget_vertex_array(&mut self, handle: GLuint) {
    if self.vertex_array == handle {
      self.vertex_array = 0;
      self.element_array_buffer.forget();
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.program != handle {
      gl::UseProgram(handle);
      self.program = handle;
    }
  }

  // A deleted program stays in use until replaced, and its handle may be recycled meanwhile.
  pub(crate) fn forget_program(&mut self, handle: GLuint) {
    if self.program == handle {
      self.program = 0;
    }
  }
}

unsafe fn get_integer(pname: GLenum) -> GLint {
  let mut value = 0;
  gl::GetIntegerv(pname, &mut value);
  value
}

/// Errors raised while acquiring the [`GLState`].
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// This thread already handed out its state.
  UnavailableGLState,
  /// `glIsEnabled(GL_BLEND)` answered neither true nor false.
  UnknownBlendingState(GLboolean),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => f.write_str("graphics state already taken on this thread"),
      StateQueryError::UnknownBlendingState(s) => write!(f, "unknown blending state: {}", s),
    }
  }
}

impl error::Error for StateQueryError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_values_are_always_stale() {
    let cached = Cached::<u32>::unknown();

    assert!(cached.is_stale(&0));
    assert!(!cached.holds(&0));
  }

  #[test]
  fn known_values_skip_redundant_sets() {
    let mut cached = Cached::known(3);

    assert!(!cached.is_stale(&3));
    assert!(cached.is_stale(&4));

    cached.store(4);
    assert!(cached.holds(&4));

    cached.forget();
    assert!(cached.is_stale(&4));
  }

  #[test]
  fn out_of_range_unit_keeps_the_active_one() {
    let (a, b) = (1, 2);
    let mut units = TextureUnits::new(16, 0);

    assert!(!units.activate(0));
    assert!(units.bind(b));

    // rejected by the driver: `a` ends up on unit 0
    assert!(units.activate(1000));
    assert!(units.bind(a));

    assert!(!units.activate(0));
    assert!(units.bind(b));
    assert!(!units.bind(b));
  }

  #[test]
  fn unknown_active_unit_forgets_every_binding() {
    let mut units = TextureUnits::new(4, 2);

    assert!(units.bind(7));
    units.active.forget();
    assert!(units.bind(8));

    assert!(units.activate(2));
    assert!(units.bind(7));
  }

  #[test]
  fn deleted_textures_leave_their_units() {
    let mut units = TextureUnits::new(4, 0);

    assert!(units.bind(5));
    assert!(!units.activate(0));
    units.forget_texture(5);

    assert!(!units.bind(0));
    assert!(units.bind(5));
  }

  #[test]
  fn bogus_active_unit_is_unknown() {
    let mut units = TextureUnits::new(4, 9);

    assert!(units.activate(0));
    assert!(!units.activate(0));
  }
}
