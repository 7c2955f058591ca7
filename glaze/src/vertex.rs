//! Vertex layouts.
//!
//! A [`VertexLayout`] describes how the raw bytes of a [`VertexBuffer`] decompose into typed
//! vertex attributes. It is a pure value: building one doesn’t talk to the driver.
//!
//! Attributes are appended with [`VertexLayout::push`]. The order of pushes defines both the
//! attribute slot (0, 1, 2, …) and the byte offset of each attribute inside a vertex record (the
//! sum of the sizes of all previously pushed attributes). The stride (the byte distance between
//! two consecutive vertex records) is accumulated as attributes are pushed.
//!
//! > The stride must match the actual layout of the bytes uploaded in the vertex buffer. Nothing
//! > checks it; a mismatch yields garbage on screen, not an error.
//!
//! Only a closed set of component types is supported: `f32`, `u32` and `u8`. Trying to push any
//! other type doesn’t compile.
//!
//! [`VertexBuffer`]: crate::buffer::VertexBuffer

use std::fmt;

/// Type of a vertex attribute component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ElementType {
  /// 32-bit floating point.
  Float,
  /// 32-bit unsigned integer.
  UnsignedInt,
  /// 8-bit unsigned integer.
  UnsignedByte,
}

impl ElementType {
  /// Size in bytes of a single component.
  pub fn size(self) -> usize {
    match self {
      ElementType::Float => 4,
      ElementType::UnsignedInt => 4,
      ElementType::UnsignedByte => 1,
    }
  }
}

impl fmt::Display for ElementType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ElementType::Float => f.write_str("float"),
      ElementType::UnsignedInt => f.write_str("unsigned int"),
      ElementType::UnsignedByte => f.write_str("unsigned byte"),
    }
  }
}

mod sealed {
  pub trait Sealed {}

  impl Sealed for f32 {}
  impl Sealed for u32 {}
  impl Sealed for u8 {}
}

/// Rust types usable as vertex attribute components.
///
/// This trait is sealed.
pub trait VertexComponent: sealed::Sealed {
  const TYPE: ElementType;

  /// Whether integral values are normalized to `[0; 1]` when fetched by shaders.
  const NORMALIZED: bool;
}

impl VertexComponent for f32 {
  const TYPE: ElementType = ElementType::Float;
  const NORMALIZED: bool = false;
}

impl VertexComponent for u32 {
  const TYPE: ElementType = ElementType::UnsignedInt;
  const NORMALIZED: bool = false;
}

impl VertexComponent for u8 {
  const TYPE: ElementType = ElementType::UnsignedByte;
  const NORMALIZED: bool = true;
}

/// A single element of a [`VertexLayout`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexElement {
  pub ty: ElementType,
  /// Number of components (1–4).
  pub count: u32,
  pub normalized: bool,
}

impl VertexElement {
  /// Size in bytes of the whole element.
  pub fn size(&self) -> usize {
    self.count as usize * self.ty.size()
  }
}

/// Full description of an attribute slot, as handed to the backend.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttrib {
  pub ty: ElementType,
  pub count: u32,
  pub normalized: bool,
  /// Byte distance between two vertex records.
  pub stride: usize,
  /// Byte offset of the attribute inside a vertex record.
  pub offset: usize,
}

/// Ordered list of vertex elements and the resulting stride.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VertexLayout {
  elements: Vec<VertexElement>,
  stride: usize,
}

impl VertexLayout {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an element made of `count` components of type `T`.
  pub fn push<T>(&mut self, count: u32) -> &mut Self
  where
    T: VertexComponent,
  {
    let element = VertexElement {
      ty: T::TYPE,
      count,
      normalized: T::NORMALIZED,
    };

    self.stride += element.size();
    self.elements.push(element);
    self
  }

  pub fn elements(&self) -> &[VertexElement] {
    &self.elements
  }

  pub fn stride(&self) -> usize {
    self.stride
  }

  /// Iterate over `(slot, attribute)` pairs, in push order.
  pub fn attribs(&self) -> impl Iterator<Item = (u32, VertexAttrib)> + '_ {
    let stride = self.stride;

    self
      .elements
      .iter()
      .scan(0, move |offset, element| {
        let attrib = VertexAttrib {
          ty: element.ty,
          count: element.count,
          normalized: element.normalized,
          stride,
          offset: *offset,
        };

        *offset += element.size();
        Some(attrib)
      })
      .enumerate()
      .map(|(slot, attrib)| (slot as u32, attrib))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_layout() {
    let layout = VertexLayout::new();

    assert_eq!(layout.stride(), 0);
    assert_eq!(layout.attribs().count(), 0);
  }

  #[test]
  fn position_and_uv() {
    let mut layout = VertexLayout::new();
    layout.push::<f32>(2).push::<f32>(2);

    assert_eq!(layout.stride(), 16);

    let attribs: Vec<_> = layout.attribs().collect();
    assert_eq!(attribs.len(), 2);
    assert_eq!(attribs[0].0, 0);
    assert_eq!(attribs[0].1.offset, 0);
    assert_eq!(attribs[1].0, 1);
    assert_eq!(attribs[1].1.offset, 8);
    assert!(attribs.iter().all(|(_, a)| a.stride == 16));
  }

  #[test]
  fn normalization_conventions() {
    let mut layout = VertexLayout::new();
    layout.push::<f32>(3).push::<u32>(1).push::<u8>(4);

    let normalized: Vec<_> = layout.elements().iter().map(|e| e.normalized).collect();
    assert_eq!(normalized, vec![false, false, true]);
  }

  #[test]
  fn offsets_are_running_sums() {
    // mixed sizes, in an order that doesn’t keep anything aligned
    let mut layout = VertexLayout::new();
    layout
      .push::<u8>(3)
      .push::<f32>(1)
      .push::<u8>(1)
      .push::<u32>(2)
      .push::<f32>(4);

    let sizes = [3, 4, 1, 8, 16];
    let expected_stride: usize = sizes.iter().sum();
    assert_eq!(layout.stride(), expected_stride);

    let mut expected_offset = 0;
    for ((slot, attrib), size) in layout.attribs().zip(sizes.iter()) {
      assert_eq!(attrib.offset, expected_offset, "slot {}", slot);
      assert_eq!(attrib.stride, expected_stride);
      expected_offset += size;
    }
  }

  #[test]
  fn push_order_matters() {
    let mut a = VertexLayout::new();
    a.push::<f32>(2).push::<u8>(4);

    let mut b = VertexLayout::new();
    b.push::<u8>(4).push::<f32>(2);

    assert_eq!(a.stride(), b.stride());
    assert_ne!(a, b);

    let a_offsets: Vec<_> = a.attribs().map(|(_, x)| x.offset).collect();
    let b_offsets: Vec<_> = b.attribs().map(|(_, x)| x.offset).collect();
    assert_eq!(a_offsets, vec![0, 8]);
    assert_eq!(b_offsets, vec![0, 4]);
  }
}
