//! OpenGL backends.
//!
//! This crate exports [OpenGL](https://www.khronos.org/opengl/) backends for
//! [glaze](https://crates.io/crates/glaze). Pick a backend type (currently only [`GL33`]) and use
//! it as the `Backend` of your graphics context.

#[cfg(feature = "gl33")]
pub mod gl33;

#[cfg(feature = "gl33")]
pub use gl33::GL33;
