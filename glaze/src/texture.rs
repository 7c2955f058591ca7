//! 2D textures.
//!
//! Textures are created from image files (PNG and JPEG are supported) or from already-decoded
//! RGBA8 bitmaps. Images are flipped vertically on load so that their first row ends up at the
//! bottom, which is where texture coordinates expect it.
//!
//! Sampling uses linear filtering for both minification and magnification, and clamps to the
//! edge on both axes. No mipmaps are generated.

use crate::backend::texture::Texture as TextureBackend;
use crate::context::GraphicsContext;
use std::path::{Path, PathBuf};
use std::{error, fmt};

/// Errors that might happen when working with textures.
#[derive(Debug)]
pub enum TextureError {
  /// The image file couldn’t be opened or decoded.
  CannotLoad(PathBuf, image::ImageError),
  /// The texel slice doesn’t match the requested dimensions.
  SizeMismatch { expected: usize, actual: usize },
  /// The driver didn’t hand back a texture handle.
  CreationFailed,
}

impl fmt::Display for TextureError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      TextureError::CannotLoad(ref path, ref e) => {
        write!(f, "cannot load texture {}: {}", path.display(), e)
      }

      TextureError::SizeMismatch { expected, actual } => write!(
        f,
        "texel size mismatch: expected {} bytes, got {}",
        expected, actual
      ),

      TextureError::CreationFailed => f.write_str("cannot create texture"),
    }
  }
}

impl error::Error for TextureError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      TextureError::CannotLoad(_, e) => Some(e),
      _ => None,
    }
  }
}

/// A 2D RGBA8 texture.
///
/// A texture may be _null_ (see [`Texture::new`]), in which case binding it does nothing.
pub struct Texture<B>
where
  B: ?Sized + TextureBackend,
{
  repr: Option<B::TextureRepr>,
  width: u32,
  height: u32,
}

impl<B> Drop for Texture<B>
where
  B: ?Sized + TextureBackend,
{
  fn drop(&mut self) {
    if let Some(ref mut repr) = self.repr {
      unsafe { B::destroy_texture(repr) };
    }
  }
}

impl<B> fmt::Debug for Texture<B>
where
  B: ?Sized + TextureBackend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("Texture")
      .field("null", &self.repr.is_none())
      .field("width", &self.width)
      .field("height", &self.height)
      .finish()
  }
}

impl<B> Texture<B>
where
  B: ?Sized + TextureBackend,
{
  /// Load a texture from an image file, never failing.
  ///
  /// If the file can’t be loaded, the error is logged and a null texture is returned.
  pub fn new<C>(ctx: &mut C, path: impl AsRef<Path>) -> Self
  where
    C: GraphicsContext<Backend = B>,
  {
    Self::from_path(ctx, path).unwrap_or_else(|e| {
      log::error!("{}", e);
      Self::null()
    })
  }

  /// Load a texture from an image file.
  pub fn from_path<C>(ctx: &mut C, path: impl AsRef<Path>) -> Result<Self, TextureError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let path = path.as_ref();
    let img = image::open(path)
      .map_err(|e| TextureError::CannotLoad(path.to_owned(), e))?
      .flipv()
      .to_rgba8();
    let (width, height) = img.dimensions();

    let texture = Self::from_rgba8(ctx, width, height, img.as_raw())?;
    log::debug!("loaded texture {} ({}×{})", path.display(), width, height);

    Ok(texture)
  }

  /// Upload an RGBA8 bitmap, rows given bottom first.
  pub fn from_rgba8<C>(
    ctx: &mut C,
    width: u32,
    height: u32,
    texels: &[u8],
  ) -> Result<Self, TextureError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let expected = width as usize * height as usize * 4;

    if texels.len() != expected {
      return Err(TextureError::SizeMismatch {
        expected,
        actual: texels.len(),
      });
    }

    let repr = unsafe { ctx.backend().new_texture(width, height, texels)? };

    Ok(Texture {
      repr: Some(repr),
      width,
      height,
    })
  }

  /// A texture owning no driver object.
  pub fn null() -> Self {
    Texture {
      repr: None,
      width: 0,
      height: 0,
    }
  }

  pub fn is_null(&self) -> bool {
    self.repr.is_none()
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  /// Bind to texture unit `slot`.
  ///
  /// `slot` isn’t checked against the number of units the driver exposes; an out-of-range slot
  /// is reported as a deferred driver error.
  pub fn bind(&self, slot: u32) {
    if let Some(ref repr) = self.repr {
      unsafe { B::bind_texture(repr, slot) };
    }
  }

  /// Reset texture unit `slot`, whichever texture it holds.
  pub fn unbind(&self, slot: u32) {
    if let Some(ref repr) = self.repr {
      unsafe { B::unbind_texture(repr, slot) };
    }
  }
}
