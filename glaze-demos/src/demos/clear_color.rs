use super::Context;
use glaze::demo::Demo;
use glaze::renderer::Renderer;
use glaze::ui::Ui;

/// Fills the screen with an editable color.
pub struct ClearColor {
  renderer: Renderer,
  color: [f32; 4],
}

impl ClearColor {
  pub fn boxed(_: &mut Context) -> Box<dyn Demo<Context>> {
    Box::new(ClearColor {
      renderer: Renderer::new(),
      color: [0.2, 0.3, 0.8, 1.],
    })
  }
}

impl Demo<Context> for ClearColor {
  fn on_render(&mut self, ctx: &mut Context) {
    self.renderer.set_clear_color(ctx, self.color);
    self.renderer.clear(ctx);
  }

  fn on_ui(&mut self, ui: &mut dyn Ui) {
    ui.color_edit4("Clear Color", &mut self.color);
  }
}
