//! Vertex and index buffers.
//!
//! A GPU buffer is a contiguous region of driver-owned memory. Buffers in this crate are
//! immutable: they are created from a slice of data, uploaded once, and released when dropped.
//! No update-in-place operation is exposed.
//!
//! Two kinds of buffers exist, differing only by the bind target they use:
//!
//! - [`VertexBuffer`], bound to the array-buffer target and holding raw vertex bytes;
//! - [`IndexBuffer`], bound to the element-buffer target and holding indices (`u32` by default,
//!   any [`Index`] type otherwise). It remembers how many indices it holds and their type, which
//!   [`Renderer::draw`] needs.
//!
//! # Bind state
//!
//! [`VertexBuffer::bind`] and friends write to a single, process-wide bind point. Binding another
//! buffer replaces the previous one silently, and unbinding resets the bind point to the null
//! handle, whichever buffer was bound. Any operation relying on the “currently bound” buffer must
//! bind it right before.
//!
//! [`Renderer::draw`]: crate::renderer::Renderer::draw

use crate::backend::buffer::Buffer as BufferBackend;
use crate::context::GraphicsContext;
use std::{error, fmt};

/// Bind target of a buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BufferTarget {
  /// Vertex attribute data.
  Array,
  /// Vertex indices.
  ElementArray,
}

/// Type of the indices held by an [`IndexBuffer`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IndexType {
  /// 8-bit unsigned integer.
  U8,
  /// 16-bit unsigned integer.
  U16,
  /// 32-bit unsigned integer.
  U32,
}

impl IndexType {
  /// Size of one index, in bytes.
  pub fn size(self) -> usize {
    match self {
      IndexType::U8 => 1,
      IndexType::U16 => 2,
      IndexType::U32 => 4,
    }
  }
}

/// Types usable as indices.
///
/// > Implementing this trait is `unsafe`: `INDEX_TYPE` must describe the in-memory
/// > representation of `Self` exactly.
pub unsafe trait Index: bytemuck::Pod {
  /// Type tag handed to the driver.
  const INDEX_TYPE: IndexType;
}

unsafe impl Index for u8 {
  const INDEX_TYPE: IndexType = IndexType::U8;
}

unsafe impl Index for u16 {
  const INDEX_TYPE: IndexType = IndexType::U16;
}

unsafe impl Index for u32 {
  const INDEX_TYPE: IndexType = IndexType::U32;
}

/// Buffer errors.
#[derive(Debug, Eq, PartialEq)]
pub enum BufferError {
  /// The driver didn’t hand back a buffer handle.
  CreationFailed,
}

impl fmt::Display for BufferError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BufferError::CreationFailed => f.write_str("cannot create buffer"),
    }
  }
}

impl error::Error for BufferError {}

/// An immutable buffer of vertex data.
///
/// # Parametricity
///
/// `B` is the backend type. It must implement [`backend::buffer::Buffer`].
///
/// [`backend::buffer::Buffer`]: crate::backend::buffer::Buffer
#[derive(Debug)]
pub struct VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  pub(crate) repr: B::BufferRepr,
  size: usize,
}

impl<B> Drop for VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_buffer(&mut self.repr) };
  }
}

impl<B> VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  /// Create a vertex buffer from a slice of plain-old-data items.
  ///
  /// The slice is uploaded as raw bytes; describe how those bytes decompose into attributes with
  /// a [`VertexLayout`](crate::vertex::VertexLayout).
  pub fn new<C, T>(ctx: &mut C, data: &[T]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
    T: bytemuck::Pod,
  {
    Self::from_bytes(ctx, bytemuck::cast_slice(data))
  }

  /// Create a vertex buffer from an explicit byte span.
  pub fn from_bytes<C>(ctx: &mut C, bytes: &[u8]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let repr = unsafe { ctx.backend().new_buffer(BufferTarget::Array, bytes)? };
    let size = bytes.len();

    log::debug!("created vertex buffer ({} bytes)", size);

    Ok(VertexBuffer { repr, size })
  }

  /// Size of the buffer, in bytes.
  pub fn size(&self) -> usize {
    self.size
  }

  /// Bind to the array-buffer target.
  pub fn bind(&self) {
    unsafe { B::bind_buffer(&self.repr) };
  }

  /// Reset the array-buffer target.
  pub fn unbind(&self) {
    unsafe { B::unbind_buffer(&self.repr) };
  }
}

/// An immutable buffer of indices.
#[derive(Debug)]
pub struct IndexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  pub(crate) repr: B::BufferRepr,
  count: usize,
  ty: IndexType,
}

impl<B> Drop for IndexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_buffer(&mut self.repr) };
  }
}

impl<B> IndexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  /// Create an index buffer holding `u32` indices.
  pub fn new<C>(ctx: &mut C, indices: &[u32]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
  {
    Self::from_indices(ctx, indices)
  }

  /// Create an index buffer holding indices of any [`Index`] type.
  pub fn from_indices<C, I>(ctx: &mut C, indices: &[I]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
    I: Index,
  {
    let bytes: &[u8] = bytemuck::cast_slice(indices);
    let repr = unsafe { ctx.backend().new_buffer(BufferTarget::ElementArray, bytes)? };
    let count = indices.len();
    let ty = I::INDEX_TYPE;

    log::debug!("created index buffer ({} {:?} indices)", count, ty);

    Ok(IndexBuffer { repr, count, ty })
  }

  /// Number of indices.
  pub fn count(&self) -> usize {
    self.count
  }

  /// Type of the indices.
  pub fn index_type(&self) -> IndexType {
    self.ty
  }

  /// Size of the buffer, in bytes.
  pub fn size(&self) -> usize {
    self.count * self.ty.size()
  }

  /// Bind to the element-buffer target.
  pub fn bind(&self) {
    unsafe { B::bind_buffer(&self.repr) };
  }

  /// Reset the element-buffer target.
  pub fn unbind(&self) {
    unsafe { B::unbind_buffer(&self.repr) };
  }
}
