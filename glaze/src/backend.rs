//! Backend interfacing.
//!
//! Each submodule exposes a single `unsafe trait` a backend type must implement to support the
//! matching feature. Representation types (`*Repr`) are owned by the wrappers of this crate, which
//! call the `destroy_*` functions from their [`Drop`] implementation; a backend must therefore
//! store in its representations everything it needs to release them (typically a handle and a
//! shared pointer to its bind-state cache).
//!
//! Functions that act on an existing representation are associated functions (no `&mut self`):
//! they can be called from a destructor, which has no access to the context.

pub mod buffer;
pub mod probe;
pub mod render;
pub mod shader;
pub mod texture;
pub mod vertex_array;
