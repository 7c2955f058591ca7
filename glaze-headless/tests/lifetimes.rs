use glaze::buffer::{IndexBuffer, VertexBuffer};
use glaze::texture::{Texture, TextureError};
use glaze::vertex_array::VertexArray;
use glaze_headless::device::Kind;
use glaze_headless::HeadlessContext;

const ITERATIONS: usize = 1000;

#[test]
fn vertex_buffers_are_released() {
  let mut ctx = HeadlessContext::new();
  let before = ctx.device().live(Kind::Buffer);

  for i in 0..ITERATIONS {
    let vb = VertexBuffer::new(&mut ctx, &[i as f32; 12]).unwrap();
    assert_eq!(vb.size(), 48);
  }

  assert_eq!(ctx.device().live(Kind::Buffer), before);
  assert_eq!(ctx.device().pending_errors(), 0);
}

#[test]
fn index_buffers_are_released() {
  let mut ctx = HeadlessContext::new();
  let va = VertexArray::new(&mut ctx).unwrap();
  let before = ctx.device().live(Kind::Buffer);

  for _ in 0..ITERATIONS {
    let ib = IndexBuffer::new(&mut ctx, &[0, 1, 2, 2, 3, 0]).unwrap();
    assert_eq!(ib.count(), 6);
    assert_eq!(ib.size(), 24);
  }

  assert_eq!(ctx.device().live(Kind::Buffer), before);
  assert_eq!(ctx.device().bindings().element_array_buffer, 0);

  drop(va);
  assert_eq!(ctx.device().live(Kind::VertexArray), 0);
}

#[test]
fn textures_are_released() {
  let mut ctx = HeadlessContext::new();
  let before = ctx.device().live(Kind::Texture);
  let texels = [127u8; 4 * 4 * 4];

  for i in 0..ITERATIONS {
    let texture = Texture::from_rgba8(&mut ctx, 4, 4, &texels).unwrap();
    texture.bind((i % 32) as u32);
  }

  assert_eq!(ctx.device().live(Kind::Texture), before);
  assert!(ctx.device().bindings().textures.iter().all(|t| *t == 0));
}

#[test]
fn mismatched_texels_are_rejected() {
  let mut ctx = HeadlessContext::new();
  let err = Texture::from_rgba8(&mut ctx, 4, 4, &[0; 15]).unwrap_err();

  assert!(matches!(
    err,
    TextureError::SizeMismatch {
      expected: 64,
      actual: 15
    }
  ));
  assert_eq!(ctx.device().live(Kind::Texture), 0);
}

#[test]
fn missing_image_yields_null_texture() {
  let mut ctx = HeadlessContext::new();
  let texture = Texture::new(&mut ctx, "res/textures/nope.png");

  assert!(texture.is_null());
  texture.bind(0);
  assert!(ctx.device().calls().is_empty());
}

#[test]
fn image_is_loaded_as_rgba8() {
  let path = std::env::temp_dir().join(format!("glaze-headless-{}.png", std::process::id()));
  let img = image::RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8 * 80, y as u8 * 120, 0]));
  img.save(&path).unwrap();

  let mut ctx = HeadlessContext::new();
  let texture = Texture::from_path(&mut ctx, &path);
  std::fs::remove_file(&path).unwrap();

  let texture = texture.unwrap();
  assert_eq!((texture.width(), texture.height()), (3, 2));
  assert!(!texture.is_null());
  assert_eq!(ctx.device().live(Kind::Texture), 1);
}
