//! Immediate-mode UI description.
//!
//! Demos describe their controls every frame through the [`Ui`] trait. The windowing side decides
//! how those controls are shown and edited; this crate only cares about the values flowing back.
//!
//! Every widget returns `true` when it changed the value it was given during this frame.

/// Immediate-mode UI sink.
pub trait Ui {
  /// Show a line of text.
  fn text(&mut self, text: &str);

  /// Edit `value` within `[min; max]`.
  fn slider_f32(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool;

  /// Edit an RGBA color, each channel within `[0; 1]`.
  fn color_edit4(&mut self, label: &str, rgba: &mut [f32; 4]) -> bool;

  /// Radio button: selecting it sets `*selected` to `index`.
  fn radio_button(&mut self, label: &str, selected: &mut usize, index: usize) -> bool;
}

/// A UI that shows nothing and never edits anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullUi;

impl Ui for NullUi {
  fn text(&mut self, _: &str) {}

  fn slider_f32(&mut self, _: &str, _: &mut f32, _: f32, _: f32) -> bool {
    false
  }

  fn color_edit4(&mut self, _: &str, _: &mut [f32; 4]) -> bool {
    false
  }

  fn radio_button(&mut self, _: &str, _: &mut usize, _: usize) -> bool {
    false
  }
}
