//! # What is this?
//!
//! `glaze` is a thin, ownership-safe layer over a stateful graphics API such as OpenGL 3.3. It
//! doesn’t hide the graphics API behind a scene graph or a render graph: it gives you the very same
//! objects you would manipulate by hand (vertex buffers, index buffers, vertex arrays, shader
//! programs, textures) but makes sure that:
//!
//! - every driver object is created exactly once, in a constructor, and destroyed exactly once,
//!   in [`Drop`];
//! - wrappers are move-only, so a handle can never be owned twice;
//! - the driver’s global “currently bound object per target” state is mirrored in a single,
//!   explicit place owned by the backend, and never assumed to survive an unrelated call;
//! - the driver’s deferred error flag can be drained and decoded around any call, see
//!   [`probe`].
//!
//! On top of those wrappers sit a stateless [`Renderer`](renderer::Renderer) and a
//! [`DemoSwitcher`](demo::DemoSwitcher), a small state machine owning at most one live demo and
//! replacing it transactionally.
//!
//! # Backends
//!
//! Types in this crate are parametric over a _backend type_; as a convention, the type variable
//! `B`. The interface between `glaze` and a backend is specified in [`backend`], as a set of
//! `unsafe trait`s. Two backends exist:
//!
//! - [glaze-gl], an OpenGL 3.3 implementation;
//! - [glaze-headless], a context-free implementation recording every call it receives, mostly
//!   useful to test code written against `glaze`.
//!
//! Constructors never take a backend directly: they take a [`GraphicsContext`], which is the
//! owner of the backend and is provided by a windowing crate (see [glaze-glfw]).
//!
//! # Threading
//!
//! Everything is single-threaded. A graphics context lives on the thread that created it and
//! every object created from it must stay on that thread as well.
//!
//! [glaze-gl]: https://crates.io/crates/glaze-gl
//! [glaze-headless]: https://crates.io/crates/glaze-headless
//! [glaze-glfw]: https://crates.io/crates/glaze-glfw
//! [`GraphicsContext`]: context::GraphicsContext

pub mod backend;
pub mod buffer;
pub mod context;
pub mod demo;
pub mod probe;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod ui;
pub mod vertex;
pub mod vertex_array;
