use glaze::buffer::{IndexBuffer, VertexBuffer};
use glaze::demo::{Demo, DemoSwitcher};
use glaze::gl_call;
use glaze::probe::{ErrorProbe, FailurePolicy};
use glaze::renderer::Renderer;
use glaze::texture::Texture;
use glaze::ui::NullUi;
use glaze::vertex::VertexLayout;
use glaze::vertex_array::VertexArray;
use glaze_headless::device::{Call, Kind};
use glaze_headless::{Headless, HeadlessContext};

type Ctx = HeadlessContext;

struct Geometry {
  va: VertexArray<Headless>,
  _vb: VertexBuffer<Headless>,
  ib: IndexBuffer<Headless>,
}

impl Geometry {
  fn boxed(ctx: &mut Ctx) -> Box<dyn Demo<Ctx>> {
    let va = VertexArray::new(ctx).unwrap();
    let vb = VertexBuffer::new(ctx, &[0f32; 8]).unwrap();
    let mut layout = VertexLayout::new();
    layout.push::<f32>(2);
    va.add_buffer(&vb, &layout);
    let ib = IndexBuffer::new(ctx, &[0, 1, 2]).unwrap();

    Box::new(Geometry { va, _vb: vb, ib })
  }
}

impl Demo<Ctx> for Geometry {
  fn on_render(&mut self, _: &mut Ctx) {
    self.va.bind();
    self.ib.bind();
  }
}

struct Textured {
  texture: Texture<Headless>,
}

impl Textured {
  fn boxed(ctx: &mut Ctx) -> Box<dyn Demo<Ctx>> {
    let texture = Texture::from_rgba8(ctx, 1, 1, &[255; 4]).unwrap();
    Box::new(Textured { texture })
  }
}

impl Demo<Ctx> for Textured {
  fn on_render(&mut self, ctx: &mut Ctx) {
    Renderer::new().clear(ctx);
    self.texture.bind(0);
  }
}

// binds its texture to a unit the device doesn't have
struct Misbound {
  texture: Texture<Headless>,
}

impl Misbound {
  fn boxed(ctx: &mut Ctx) -> Box<dyn Demo<Ctx>> {
    let texture = Texture::from_rgba8(ctx, 1, 1, &[255; 4]).unwrap();
    Box::new(Misbound { texture })
  }
}

impl Demo<Ctx> for Misbound {
  fn on_render(&mut self, _: &mut Ctx) {
    self.texture.bind(1000);
  }
}

fn switcher() -> DemoSwitcher<Ctx> {
  let mut switcher = DemoSwitcher::new();
  switcher
    .register("Geometry", Geometry::boxed)
    .register("Textured", Textured::boxed);
  switcher
}

fn live_objects(ctx: &Ctx) -> usize {
  let device = ctx.device();
  let kinds = [Kind::Buffer, Kind::VertexArray, Kind::Texture];
  let live = kinds.iter().map(|kind| device.live(*kind)).sum();

  live
}

fn is_creation(call: &Call) -> bool {
  matches!(
    call,
    Call::GenBuffer(_) | Call::GenVertexArray(_) | Call::GenTexture(_)
  )
}

fn is_deletion(call: &Call) -> bool {
  matches!(
    call,
    Call::DeleteBuffer(_) | Call::DeleteVertexArray(_) | Call::DeleteTexture(_)
  )
}

#[test]
fn reselecting_creates_nothing() {
  let mut ctx = Ctx::new();
  let mut switcher = switcher();

  assert!(switcher.select(&mut ctx, 0));
  let live = live_objects(&ctx);
  assert_eq!(live, 3);
  ctx.device_mut().take_calls();

  assert!(!switcher.select(&mut ctx, 0));
  assert!(ctx.device().calls().is_empty());
  assert_eq!(live_objects(&ctx), live);

  switcher.shutdown();
}

#[test]
fn old_demo_is_gone_before_new_one_starts() {
  let mut ctx = Ctx::new();
  let mut switcher = switcher();

  switcher.select(&mut ctx, 0);
  switcher.frame(&mut ctx, 0., &mut NullUi);
  ctx.device_mut().take_calls();

  assert!(switcher.select(&mut ctx, 1));

  let calls = ctx.device_mut().take_calls();
  let last_deletion = calls.iter().rposition(is_deletion).unwrap();
  let first_creation = calls.iter().position(is_creation).unwrap();

  assert_eq!(calls.iter().filter(|call| is_deletion(call)).count(), 3);
  assert!(last_deletion < first_creation);
  assert_eq!(live_objects(&ctx), 1);

  // and back
  assert!(switcher.select(&mut ctx, 0));
  assert_eq!(live_objects(&ctx), 3);
  assert_eq!(ctx.device().live(Kind::Texture), 0);

  switcher.shutdown();
}

#[test]
fn shutdown_releases_everything() {
  let mut ctx = Ctx::new();
  let mut switcher = switcher();

  switcher.select(&mut ctx, 1);
  switcher.frame(&mut ctx, 0.016, &mut NullUi);
  switcher.shutdown();

  assert_eq!(live_objects(&ctx), 0);
  assert_eq!(switcher.active(), None);
  assert_eq!(ctx.device().pending_errors(), 0);
}

#[test]
fn driver_errors_raised_in_a_frame_are_reported() {
  let mut ctx = Ctx::new();
  let probe = ErrorProbe::new(FailurePolicy::Log);
  let mut switcher = DemoSwitcher::new();
  switcher
    .register("Textured", Textured::boxed)
    .register("Misbound", Misbound::boxed);

  switcher.select(&mut ctx, 0);
  probe.clear(&mut ctx);
  switcher.frame(&mut ctx, 0., &mut NullUi);
  assert!(probe.check(&mut ctx, "frame", file!(), line!()));

  switcher.select(&mut ctx, 1);
  probe.clear(&mut ctx);
  switcher.frame(&mut ctx, 0., &mut NullUi);
  assert!(!probe.check(&mut ctx, "frame", file!(), line!()));
  assert_eq!(ctx.device().pending_errors(), 0);

  switcher.shutdown();
}

#[test]
#[should_panic]
fn driver_errors_raised_in_a_frame_abort() {
  let mut ctx = Ctx::new();
  let probe = ErrorProbe::new(FailurePolicy::Abort);
  let mut switcher = DemoSwitcher::new();
  switcher.register("Misbound", Misbound::boxed);

  switcher.select(&mut ctx, 0);
  gl_call!(probe, &mut ctx, switcher.frame(&mut ctx, 0., &mut NullUi));
}

#[test]
fn dropping_the_switcher_releases_the_running_demo() {
  let mut ctx = Ctx::new();
  let mut switcher = switcher();

  switcher.select(&mut ctx, 0);
  assert_eq!(live_objects(&ctx), 3);

  drop(switcher);
  assert_eq!(live_objects(&ctx), 0);
  assert!(ctx.device().calls().iter().any(is_deletion));
}
