use super::{shader_path, Backend, Context};
use glaze::buffer::{IndexBuffer, VertexBuffer};
use glaze::demo::Demo;
use glaze::renderer::Renderer;
use glaze::shader::ShaderProgram;
use glaze::ui::Ui;
use glaze::vertex::VertexLayout;
use glaze::vertex_array::VertexArray;

#[rustfmt::skip]
const POSITIONS: [f32; 8] = [
  -0.5, -0.5,
   0.5, -0.5,
   0.5,  0.5,
  -0.5,  0.5,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Red channel change per second.
const SPEED: f32 = 3.;

/// A quad whose red channel bounces between 0 and 1, driven by a uniform.
pub struct Uniform {
  renderer: Renderer,
  program: ShaderProgram<Backend>,
  va: VertexArray<Backend>,
  _vb: VertexBuffer<Backend>,
  ib: IndexBuffer<Backend>,
  red: f32,
  step: f32,
}

impl Uniform {
  pub fn boxed(ctx: &mut Context) -> Box<dyn Demo<Context>> {
    let va = VertexArray::new(ctx).expect("vertex array creation");
    let vb = VertexBuffer::new(ctx, &POSITIONS).expect("vertex buffer creation");

    let mut layout = VertexLayout::new();
    layout.push::<f32>(2);
    va.add_buffer(&vb, &layout);

    let ib = IndexBuffer::new(ctx, &INDICES).expect("index buffer creation");
    let program = ShaderProgram::new(ctx, shader_path("color.shader"));

    va.unbind();
    vb.unbind();
    ib.unbind();

    Box::new(Uniform {
      renderer: Renderer::new(),
      program,
      va,
      _vb: vb,
      ib,
      red: 0.,
      step: SPEED,
    })
  }
}

impl Demo<Context> for Uniform {
  fn on_update(&mut self, dt: f32) {
    if self.red < 0. || self.red > 1. {
      self.step = -self.step;
    }

    self.red += self.step * dt;
  }

  fn on_render(&mut self, ctx: &mut Context) {
    self.renderer.set_clear_color(ctx, [0., 0., 0., 1.]);
    self.renderer.clear(ctx);

    self.program.bind();
    self
      .program
      .set_uniform_4f("u_Color", self.red.clamp(0., 1.), 0.3, 0.8, 1.);
    self.renderer.draw(ctx, &self.va, &self.ib, &self.program);
  }

  fn on_ui(&mut self, ui: &mut dyn Ui) {
    ui.text(&format!("red: {:.2}", self.red.clamp(0., 1.)));
  }
}
