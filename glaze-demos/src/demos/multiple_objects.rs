use super::{shader_path, Backend, Context};
use cgmath::{Matrix4, Vector3};
use glaze::buffer::{IndexBuffer, VertexBuffer};
use glaze::demo::Demo;
use glaze::renderer::Renderer;
use glaze::shader::ShaderProgram;
use glaze::texture::Texture;
use glaze::ui::Ui;
use glaze::vertex::VertexLayout;
use glaze::vertex_array::VertexArray;
use image::{Rgba, RgbaImage};

// position, texture coordinates
#[rustfmt::skip]
const QUAD: [f32; 16] = [
  -50., -50., 0., 0.,
   50., -50., 1., 0.,
   50.,  50., 1., 1.,
  -50.,  50., 0., 1.,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

const WIDTH: f32 = 1024.;
const HEIGHT: f32 = 768.;

/// The same textured quad, drawn twice with two model matrices.
pub struct MultipleObjects {
  renderer: Renderer,
  program: ShaderProgram<Backend>,
  texture: Texture<Backend>,
  va: VertexArray<Backend>,
  _vb: VertexBuffer<Backend>,
  ib: IndexBuffer<Backend>,
  proj: Matrix4<f32>,
  view: Matrix4<f32>,
  translation_a: [f32; 2],
  translation_b: [f32; 2],
}

impl MultipleObjects {
  pub fn boxed(ctx: &mut Context) -> Box<dyn Demo<Context>> {
    let va = VertexArray::new(ctx).expect("vertex array creation");
    let vb = VertexBuffer::new(ctx, &QUAD).expect("vertex buffer creation");

    let mut layout = VertexLayout::new();
    layout.push::<f32>(2).push::<f32>(2);
    va.add_buffer(&vb, &layout);

    let ib = IndexBuffer::new(ctx, &INDICES).expect("index buffer creation");

    let checkerboard = checkerboard(64, 8);
    let texture = Texture::from_rgba8(
      ctx,
      checkerboard.width(),
      checkerboard.height(),
      checkerboard.as_raw(),
    )
    .unwrap_or_else(|e| {
      log::error!("{}", e);
      Texture::null()
    });

    let mut program = ShaderProgram::new(ctx, shader_path("texture.shader"));
    program.bind();
    texture.bind(0);
    program.set_uniform_1i("u_Texture", 0);

    va.unbind();
    vb.unbind();
    ib.unbind();
    program.unbind();

    Box::new(MultipleObjects {
      renderer: Renderer::new(),
      program,
      texture,
      va,
      _vb: vb,
      ib,
      proj: cgmath::ortho(0., WIDTH, 0., HEIGHT, -1., 1.),
      view: Matrix4::from_translation(Vector3::new(-100., 0., 0.)),
      translation_a: [200., 200.],
      translation_b: [400., 200.],
    })
  }

  fn draw_at(&mut self, ctx: &mut Context, [x, y]: [f32; 2]) {
    let model = Matrix4::from_translation(Vector3::new(x, y, 0.));
    let mvp = self.proj * self.view * model;

    self.program.bind();
    self.program.set_uniform_mat4f("u_MVP", &mvp);
    self.renderer.draw(ctx, &self.va, &self.ib, &self.program);
  }
}

impl Demo<Context> for MultipleObjects {
  fn on_render(&mut self, ctx: &mut Context) {
    self.renderer.set_clear_color(ctx, [0., 0., 0., 1.]);
    self.renderer.clear(ctx);

    self.texture.bind(0);

    let (a, b) = (self.translation_a, self.translation_b);
    self.draw_at(ctx, a);
    self.draw_at(ctx, b);
  }

  fn on_ui(&mut self, ui: &mut dyn Ui) {
    ui.slider_f32("Translation A.x", &mut self.translation_a[0], 0., WIDTH);
    ui.slider_f32("Translation A.y", &mut self.translation_a[1], 0., HEIGHT);
    ui.slider_f32("Translation B.x", &mut self.translation_b[0], 0., WIDTH);
    ui.slider_f32("Translation B.y", &mut self.translation_b[1], 0., HEIGHT);
  }
}

/// Half-transparent checkerboard of `size`×`size` texels, with `cells` cells per side.
fn checkerboard(size: u32, cells: u32) -> RgbaImage {
  let cell = (size / cells).max(1);

  RgbaImage::from_fn(size, size, |x, y| {
    if (x / cell + y / cell) % 2 == 0 {
      Rgba([230, 120, 40, 255])
    } else {
      Rgba([40, 120, 230, 128])
    }
  })
}
