use cgmath::{Matrix4, Vector3};
use glaze::shader::{ProgramError, ShaderProgram, ShaderSource, StageError, StageType, UniformValue};
use glaze_headless::device::{Call, Kind};
use glaze_headless::HeadlessContext;
use std::fs;

const SHADER: &str = "\
#shader vertex
#version 330 core
layout(location = 0) in vec4 position;
uniform mat4 u_MVP;
void main() {
  gl_Position = u_MVP * position;
}

#shader fragment
#version 330 core
layout(location = 0) out vec4 color;
uniform vec4 u_Color;
uniform float u_Unused;
void main() {
  color = u_Color;
}
";

fn program(ctx: &mut HeadlessContext) -> ShaderProgram<glaze_headless::Headless> {
  ShaderProgram::from_source(ctx, &ShaderSource::parse(SHADER)).unwrap()
}

fn location_queries(ctx: &HeadlessContext, uniform: &str) -> usize {
  ctx
    .device()
    .calls()
    .iter()
    .filter(|call| matches!(call, Call::GetUniformLocation { name, .. } if name == uniform))
    .count()
}

fn uniform_sets(ctx: &HeadlessContext) -> usize {
  ctx
    .device()
    .calls()
    .iter()
    .filter(|call| matches!(call, Call::Uniform { .. }))
    .count()
}

#[test]
fn active_uniform_is_queried_once() {
  let mut ctx = HeadlessContext::new();
  let mut program = program(&mut ctx);
  program.bind();

  for i in 0..10 {
    program.set_uniform_4f("u_Color", i as f32, 0., 0., 1.);
  }

  assert_eq!(location_queries(&ctx, "u_Color"), 1);
  assert_eq!(uniform_sets(&ctx), 10);
  assert_eq!(ctx.device().pending_errors(), 0);
}

#[test]
fn inactive_uniform_never_reaches_the_driver() {
  let mut ctx = HeadlessContext::new();
  let mut program = program(&mut ctx);
  program.bind();

  for _ in 0..5 {
    program.set_uniform_1f("u_Unused", 1.);
    program.set_uniform_1i("u_Misspelled", 3);
  }

  assert_eq!(location_queries(&ctx, "u_Unused"), 1);
  assert_eq!(location_queries(&ctx, "u_Misspelled"), 1);
  assert_eq!(uniform_sets(&ctx), 0);
  assert_eq!(ctx.device().pending_errors(), 0);
}

#[test]
fn uniform_values_reach_the_bound_program() {
  let mut ctx = HeadlessContext::new();
  let mut program = program(&mut ctx);
  program.bind();

  let mvp = Matrix4::from_translation(Vector3::new(-100., 0., 0.));
  program.set_uniform_mat4f("u_MVP", &mvp);
  program.set_uniform_4f("u_Color", 0.2, 0.3, 0.8, 1.);

  let handle = ctx.device().bindings().program;
  assert_eq!(
    ctx.device().uniform(handle, "u_Color"),
    Some(UniformValue::Vec4([0.2, 0.3, 0.8, 1.]))
  );
  assert_eq!(
    ctx.device().uniform(handle, "u_MVP"),
    Some(UniformValue::Mat4(mvp.into()))
  );
}

#[test]
fn stages_are_released_once_linked() {
  let mut ctx = HeadlessContext::new();
  let program = program(&mut ctx);

  assert!(program.is_linked());
  assert_eq!(ctx.device().live(Kind::Shader), 0);
  assert_eq!(ctx.device().live(Kind::Program), 1);

  drop(program);
  assert_eq!(ctx.device().live(Kind::Program), 0);
}

#[test]
fn stages_stay_attached_until_destroyed() {
  let mut ctx = HeadlessContext::new();
  let _program = program(&mut ctx);

  let device = ctx.device();
  let calls = device.calls();
  let link = calls
    .iter()
    .position(|call| matches!(call, Call::LinkProgram(_)))
    .unwrap();
  let deleted_after_link = calls[link..]
    .iter()
    .filter(|call| matches!(call, Call::DeleteShader(_)))
    .count();

  assert_eq!(deleted_after_link, 2);
}

#[test]
fn compilation_failure() {
  let mut ctx = HeadlessContext::new();
  let src = ShaderSource::parse("#shader vertex\nvoid main() {}\n#shader fragment\nnot glsl\n");

  let err = ShaderProgram::from_source(&mut ctx, &src).unwrap_err();
  match err {
    ProgramError::StageError(StageError::CompilationFailed(StageType::FragmentShader, ref log)) => {
      // the compiler log travels with the error; reporting it is up to the caller
      assert!(!log.is_empty());
    }

    _ => panic!("unexpected error: {}", err),
  }

  // the vertex stage was compiled before the failure, and released after it
  assert_eq!(ctx.device().live(Kind::Shader), 0);
  assert_eq!(ctx.device().live(Kind::Program), 0);
}

#[test]
fn link_failure_still_yields_a_program() {
  let mut ctx = HeadlessContext::new();
  let src = ShaderSource::parse(
    "#shader vertex\nvoid main() {}\n#shader fragment\nin vec2 v_TexCoord;\nvoid main() {}\n",
  );

  let program = ShaderProgram::from_source(&mut ctx, &src).unwrap();
  assert!(!program.is_null());
  assert!(!program.is_linked());
  assert_eq!(ctx.device().live(Kind::Program), 1);
}

#[test]
fn missing_file_yields_null_program() {
  let mut ctx = HeadlessContext::new();
  let mut program = ShaderProgram::new(&mut ctx, "res/shaders/nope.shader");

  assert!(program.is_null());

  // everything is a no-op on a null program
  program.bind();
  program.set_uniform_1i("u_Texture", 0);
  assert!(ctx.device().calls().is_empty());
}

#[test]
fn from_path() {
  let path = std::env::temp_dir().join(format!("glaze-headless-{}.shader", std::process::id()));
  fs::write(&path, SHADER).unwrap();

  let mut ctx = HeadlessContext::new();
  let program = ShaderProgram::from_path(&mut ctx, &path);
  fs::remove_file(&path).unwrap();

  assert!(program.unwrap().is_linked());
}
