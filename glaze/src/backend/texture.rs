//! Texture backend interface.
//!
//! This interface defines the low-level API textures must implement to be usable.

use crate::texture::TextureError;

/// Texture backend.
///
/// Only 2D, RGBA8 textures with linear filtering and clamp-to-edge wrapping are supported.
pub unsafe trait Texture {
  type TextureRepr;

  /// Create a texture and upload `texels` (`width × height` RGBA8 texels, bottom row first).
  unsafe fn new_texture(
    &mut self,
    width: u32,
    height: u32,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError>;

  /// Make `slot` the active texture unit and bind the texture to it.
  ///
  /// `slot` is not validated against the number of units the implementation supports.
  unsafe fn bind_texture(texture: &Self::TextureRepr, slot: u32);

  /// Make `slot` the active texture unit and reset its 2D binding.
  unsafe fn unbind_texture(texture: &Self::TextureRepr, slot: u32);

  unsafe fn destroy_texture(texture: &mut Self::TextureRepr);
}
