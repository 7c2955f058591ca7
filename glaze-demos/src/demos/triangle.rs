use super::{shader_path, Backend, Context};
use glaze::buffer::{IndexBuffer, VertexBuffer};
use glaze::demo::Demo;
use glaze::renderer::Renderer;
use glaze::shader::ShaderProgram;
use glaze::vertex::VertexLayout;
use glaze::vertex_array::VertexArray;

#[rustfmt::skip]
const POSITIONS: [f32; 6] = [
  -0.5, -0.5,
   0.0,  0.5,
   0.5, -0.5,
];

const INDICES: [u32; 3] = [0, 1, 2];

/// A single flat-colored triangle.
pub struct Triangle {
  renderer: Renderer,
  program: ShaderProgram<Backend>,
  va: VertexArray<Backend>,
  _vb: VertexBuffer<Backend>,
  ib: IndexBuffer<Backend>,
}

impl Triangle {
  pub fn boxed(ctx: &mut Context) -> Box<dyn Demo<Context>> {
    let va = VertexArray::new(ctx).expect("vertex array creation");
    let vb = VertexBuffer::new(ctx, &POSITIONS).expect("vertex buffer creation");

    let mut layout = VertexLayout::new();
    layout.push::<f32>(2);
    va.add_buffer(&vb, &layout);

    let ib = IndexBuffer::new(ctx, &INDICES).expect("index buffer creation");

    let mut program = ShaderProgram::new(ctx, shader_path("color.shader"));
    program.bind();
    program.set_uniform_4f("u_Color", 0.9, 0.5, 0.1, 1.);

    va.unbind();
    vb.unbind();
    ib.unbind();
    program.unbind();

    Box::new(Triangle {
      renderer: Renderer::new(),
      program,
      va,
      _vb: vb,
      ib,
    })
  }
}

impl Demo<Context> for Triangle {
  fn on_render(&mut self, ctx: &mut Context) {
    self.renderer.set_clear_color(ctx, [0., 0., 0., 1.]);
    self.renderer.clear(ctx);
    self.renderer.draw(ctx, &self.va, &self.ib, &self.program);
  }
}
