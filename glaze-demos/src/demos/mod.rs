//! The demos, and what they share.
//!
//! Demos showcase the happy path. Failing to allocate a driver object is fatal for a demo, so
//! constructors `expect` their buffers; shaders and textures degrade to null objects instead and
//! the failure shows up in the logs.

use glaze::demo::DemoSwitcher;
use glaze_gl::GL33;
use glaze_glfw::GL33Context;
use std::path::PathBuf;

pub mod clear_color;
pub mod multiple_objects;
pub mod triangle;
pub mod uniform;

/// Context every demo renders with.
pub type Context = GL33Context;

/// Backend every demo allocates from.
pub type Backend = GL33;

/// Register all demos, in menu order.
pub fn register(switcher: &mut DemoSwitcher<Context>) {
  switcher
    .register("ClearColor", clear_color::ClearColor::boxed)
    .register("Triangle", triangle::Triangle::boxed)
    .register("Uniform", uniform::Uniform::boxed)
    .register("MultipleObjects", multiple_objects::MultipleObjects::boxed);
}

/// Path to a shader shipped with the demos.
pub fn shader_path(name: &str) -> PathBuf {
  [env!("CARGO_MANIFEST_DIR"), "res", "shaders", name]
    .iter()
    .collect()
}
