//! [GLFW](https://crates.io/crates/glfw) surface for [glaze](https://crates.io/crates/glaze).
//!
//! A [`GlfwSurface`] opens a window with an OpenGL 3.3 core context, loads the GL symbols and
//! bootstraps a [`GL33`] backend. Render with its [`GL33Context`]; read window events from its
//! receiver.

#![deny(missing_docs)]

use glfw::{self, Action, Context as _, Glfw, InitError, Key, Window, WindowEvent, WindowMode};
use glaze::context::GraphicsContext;
pub use glaze_gl::gl33::StateQueryError;
use glaze_gl::GL33;
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Window size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen on the primary monitor, at its current resolution.
  Fullscreen,
}

/// Window options.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  vsync: bool,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to a 960×540 window.
  /// - `vsync` enabled.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 960,
        height: 540,
      },
      vsync: true,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> WindowDim {
    self.dim
  }

  /// Synchronize buffer swaps with the monitor refresh rate.
  #[inline]
  pub fn set_vsync(self, vsync: bool) -> Self {
    WindowOpt { vsync, ..self }
  }

  /// Whether buffer swaps are synchronized.
  #[inline]
  pub fn vsync(&self) -> bool {
    self.vsync
  }
}

/// Surface creation errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// GLFW itself failed to initialize.
  InitError(InitError),
  /// GLFW refused the window or its 3.3 core context.
  WindowCreationFailed,
  /// A surface was already opened on this thread.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "cannot initialize GLFW: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("cannot create window"),
      GlfwSurfaceError::GraphicsStateError(ref e) => write!(f, "cannot set up OpenGL 3.3: {}", e),
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// A window, split into its event queue and its rendering context.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Window events, filled by [`GL33Context::poll_events`].
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Context to render with.
  pub context: GL33Context,
}

impl GlfwSurface {
  /// Open a window and bootstrap an OpenGL 3.3 glaze environment in it.
  pub fn new_gl33(title: &str, opt: WindowOpt) -> Result<Self, GlfwSurfaceError> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));

    let (mut window, events_rx) =
      create_window(&mut glfw, title, opt.dim).ok_or(GlfwSurfaceError::WindowCreationFailed)?;

    log::debug!("created window ({:?})", opt.dim);

    window.make_current();
    window.set_key_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_close_polling(true);

    let interval = if opt.vsync {
      glfw::SwapInterval::Sync(1)
    } else {
      glfw::SwapInterval::None
    };
    window.glfw.set_swap_interval(interval);

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL33::new().map_err(GlfwSurfaceError::GraphicsStateError)?;
    let context = GL33Context { window, gl };
    let surface = GlfwSurface { events_rx, context };

    Ok(surface)
  }
}

fn create_window(
  glfw: &mut Glfw,
  title: &str,
  dim: WindowDim,
) -> Option<(Window, Receiver<(f64, WindowEvent)>)> {
  match dim {
    WindowDim::Windowed { width, height } => {
      glfw.create_window(width, height, title, WindowMode::Windowed)
    }

    WindowDim::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| {
      let monitor = monitor?;
      let mode = monitor.get_video_mode()?;

      glfw.create_window(mode.width, mode.height, title, WindowMode::FullScreen(monitor))
    }),
  }
}

/// Graphics context of a GLFW window, rendering with [`GL33`].
#[derive(Debug)]
pub struct GL33Context {
  /// The window, for anything not wrapped here.
  pub window: Window,
  gl: GL33,
}

impl GL33Context {
  /// Whether the window was asked to close.
  pub fn should_close(&self) -> bool {
    self.window.should_close()
  }

  /// Whether `key` is currently held down.
  pub fn key_pressed(&self, key: Key) -> bool {
    self.window.get_key(key) == Action::Press
  }

  /// Present the back buffer.
  pub fn swap_buffers(&mut self) {
    self.window.swap_buffers();
  }

  /// Process pending window events; they are then available from the surface’s receiver.
  pub fn poll_events(&mut self) {
    self.window.glfw.poll_events();
  }

  /// Size of the framebuffer, in pixels.
  pub fn framebuffer_size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w.max(0) as u32, h.max(0) as u32]
  }

  /// Change the title of the window.
  pub fn set_title(&mut self, title: &str) {
    self.window.set_title(title);
  }
}

unsafe impl GraphicsContext for GL33Context {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}
