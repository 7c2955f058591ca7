use glaze::buffer::{BufferTarget, IndexBuffer, IndexType, VertexBuffer};
use glaze::probe::{self, DriverError, ErrorProbe, FailurePolicy};
use glaze::renderer::Renderer;
use glaze::shader::{ShaderProgram, ShaderSource};
use glaze::vertex::VertexLayout;
use glaze::vertex_array::VertexArray;
use glaze::gl_call;
use glaze_headless::device::Call;
use glaze_headless::HeadlessContext;

const SHADER: &str = "\
#shader vertex
#version 330 core
layout(location = 0) in vec4 position;
layout(location = 1) in vec2 texCoord;
out vec2 v_TexCoord;
void main() {
  gl_Position = position;
  v_TexCoord = texCoord;
}

#shader fragment
#version 330 core
layout(location = 0) out vec4 color;
in vec2 v_TexCoord;
uniform vec4 u_Color;
void main() {
  color = u_Color * vec4(v_TexCoord, 1., 1.);
}
";

#[rustfmt::skip]
const QUAD: [f32; 16] = [
  -0.5, -0.5, 0., 0.,
   0.5, -0.5, 1., 0.,
   0.5,  0.5, 1., 1.,
  -0.5,  0.5, 0., 1.,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

#[test]
fn quad() {
  let _ = env_logger::builder().is_test(true).try_init();

  let mut ctx = HeadlessContext::new();
  let renderer = Renderer::new();

  let va = VertexArray::new(&mut ctx).unwrap();
  let vb = VertexBuffer::new(&mut ctx, &QUAD).unwrap();
  let mut layout = VertexLayout::new();
  layout.push::<f32>(2).push::<f32>(2);
  va.add_buffer(&vb, &layout);

  let ib = IndexBuffer::new(&mut ctx, &INDICES).unwrap();
  let mut program = ShaderProgram::from_source(&mut ctx, &ShaderSource::parse(SHADER)).unwrap();

  program.bind();
  program.set_uniform_4f("u_Color", 0.8, 0.3, 0.8, 1.);

  va.unbind();
  vb.unbind();
  ib.unbind();
  program.unbind();
  ctx.device_mut().take_calls();

  renderer.clear(&mut ctx);
  renderer.draw(&mut ctx, &va, &ib, &program);

  let calls = ctx.device_mut().take_calls();
  assert_eq!(calls.len(), 5);
  assert_eq!(calls[0], Call::Clear);
  assert!(matches!(calls[1], Call::UseProgram(h) if h != 0));
  assert!(matches!(calls[2], Call::BindVertexArray(h) if h != 0));
  assert!(matches!(
    calls[3],
    Call::BindBuffer {
      target: BufferTarget::ElementArray,
      handle
    } if handle != 0
  ));
  assert_eq!(
    calls[4],
    Call::DrawElements {
      count: 6,
      ty: IndexType::U32
    }
  );

  assert!(probe::drain(&mut ctx).is_empty());
}

#[test]
fn clear_color_and_blending() {
  let mut ctx = HeadlessContext::new();
  let renderer = Renderer::new();

  renderer.set_clear_color(&mut ctx, [0.2, 0.3, 0.8, 1.]);
  renderer.enable_alpha_blending(&mut ctx);

  assert_eq!(ctx.device().clear_color(), [0.2, 0.3, 0.8, 1.]);
  assert!(ctx.device().is_blending());
}

#[test]
fn drawing_nothing_is_reported() {
  let mut ctx = HeadlessContext::new();
  let probe = ErrorProbe::new(FailurePolicy::Log);

  let va = VertexArray::new(&mut ctx).unwrap();
  let ib = IndexBuffer::new(&mut ctx, &INDICES).unwrap();
  let program = ShaderProgram::null();

  let ok = {
    probe.clear(&mut ctx);
    Renderer::new().draw(&mut ctx, &va, &ib, &program);
    probe.check(&mut ctx, "draw", file!(), line!())
  };

  assert!(!ok);
  assert_eq!(ctx.device().pending_errors(), 0);
}

#[test]
fn stale_errors_are_cleared_before_the_call() {
  let mut ctx = HeadlessContext::new();
  let probe = ErrorProbe::new(FailurePolicy::Abort);

  ctx.device_mut().raise(DriverError::InvalidEnum);
  ctx.device_mut().raise(DriverError::OutOfMemory);

  // stale errors are dropped, not attributed to the wrapped call
  let value = gl_call!(probe, &mut ctx, 40 + 2);
  assert_eq!(value, 42);
  assert_eq!(ctx.device().pending_errors(), 0);
}

#[test]
fn drain_reports_every_error_in_order() {
  let mut ctx = HeadlessContext::new();

  ctx.device_mut().raise(DriverError::InvalidValue);
  ctx.device_mut().raise(DriverError::InvalidOperation);

  assert_eq!(
    probe::drain(&mut ctx),
    vec![DriverError::InvalidValue, DriverError::InvalidOperation]
  );
  assert!(probe::drain(&mut ctx).is_empty());
}

#[test]
#[should_panic]
fn abort_policy_panics() {
  let mut ctx = HeadlessContext::new();
  let probe = ErrorProbe::new(FailurePolicy::Abort);

  let texture =
    glaze::texture::Texture::from_rgba8(&mut ctx, 1, 1, &[0, 0, 0, 255]).unwrap();
  gl_call!(probe, &mut ctx, texture.bind(1000));
}

#[test]
fn narrow_indices_are_drawn_with_their_type() {
  let mut ctx = HeadlessContext::new();

  let va = VertexArray::new(&mut ctx).unwrap();
  let vb = VertexBuffer::new(&mut ctx, &QUAD).unwrap();
  let mut layout = VertexLayout::new();
  layout.push::<f32>(2).push::<f32>(2);
  va.add_buffer(&vb, &layout);

  let ib = IndexBuffer::from_indices(&mut ctx, &[0u16, 1, 2, 2, 3, 0]).unwrap();
  assert_eq!(ib.index_type(), IndexType::U16);
  assert_eq!(ib.count(), 6);
  assert_eq!(ib.size(), 12);

  let program = ShaderProgram::from_source(&mut ctx, &ShaderSource::parse(SHADER)).unwrap();
  ctx.device_mut().take_calls();

  Renderer::new().draw(&mut ctx, &va, &ib, &program);

  let calls = ctx.device_mut().take_calls();
  assert_eq!(
    calls.last(),
    Some(&Call::DrawElements {
      count: 6,
      ty: IndexType::U16
    })
  );
  assert!(probe::drain(&mut ctx).is_empty());
}
