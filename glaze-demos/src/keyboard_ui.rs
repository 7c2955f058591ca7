//! A keyboard-driven [`Ui`].
//!
//! Digit keys pick a radio button by index, Tab moves the focus to the next editable control and
//! Up / Down nudge the focused control. Text lines and the focused control are gathered into a
//! single line, meant to be shown in the window title.

use glaze::ui::Ui;
use glfw::Key;

/// Number of nudges to go from the minimum to the maximum of a slider.
const SLIDER_STEPS: f32 = 100.;

/// Nudge applied to a color channel.
const CHANNEL_STEP: f32 = 0.05;

const CHANNELS: [&str; 4] = ["r", "g", "b", "a"];

#[derive(Debug, Default)]
pub struct KeyboardUi {
  lines: Vec<String>,
  focused: Option<String>,
  // editable controls described during the current frame
  controls: usize,
  focus: usize,
  nudge: f32,
  pick: Option<usize>,
}

impl KeyboardUi {
  pub fn new() -> Self {
    Self::default()
  }

  /// Feed a key press (or repeat).
  pub fn key_pressed(&mut self, key: Key) {
    match key {
      Key::Tab => self.focus += 1,
      Key::Up => self.nudge += 1.,
      Key::Down => self.nudge -= 1.,
      _ => {
        if let Some(digit) = digit(key) {
          self.pick = digit.checked_sub(1);
        }
      }
    }
  }

  /// Start describing a new frame.
  pub fn begin_frame(&mut self) {
    self.lines.clear();
    self.focused = None;
    self.controls = 0;
  }

  /// Finish the frame and return its text.
  ///
  /// Pending inputs are consumed by the frame, whether a control used them or not.
  pub fn end_frame(&mut self) -> String {
    if self.controls == 0 {
      self.focus = 0;
    } else {
      self.focus %= self.controls;
    }

    self.nudge = 0.;
    self.pick = None;

    let mut parts = self.lines.clone();

    if let Some(focused) = self.focused.take() {
      parts.push(format!("> {}", focused));
    }

    parts.join(" | ")
  }

  // Register an editable control; only the focused one gets the pending nudge.
  fn control(&mut self) -> Option<f32> {
    let id = self.controls;
    self.controls += 1;

    if id == self.focus {
      Some(self.nudge)
    } else {
      None
    }
  }
}

impl Ui for KeyboardUi {
  fn text(&mut self, text: &str) {
    self.lines.push(text.to_owned());
  }

  fn slider_f32(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool {
    let nudge = match self.control() {
      Some(nudge) => nudge,
      None => return false,
    };

    let before = *value;
    *value = (*value + nudge * (max - min) / SLIDER_STEPS).clamp(min, max);
    self.focused = Some(format!("{}: {:.1}", label, value));

    *value != before
  }

  fn color_edit4(&mut self, label: &str, rgba: &mut [f32; 4]) -> bool {
    let mut changed = false;

    for (channel, name) in rgba.iter_mut().zip(CHANNELS.iter()) {
      if let Some(nudge) = self.control() {
        let before = *channel;
        *channel = (*channel + nudge * CHANNEL_STEP).clamp(0., 1.);
        self.focused = Some(format!("{}.{}: {:.2}", label, name, channel));
        changed |= *channel != before;
      }
    }

    changed
  }

  fn radio_button(&mut self, label: &str, selected: &mut usize, index: usize) -> bool {
    let picked = self.pick == Some(index) && *selected != index;

    if picked {
      *selected = index;
    }

    let mark = if *selected == index { '*' } else { ' ' };
    self.lines.push(format!("{}[{}] {}", index + 1, mark, label));

    picked
  }
}

fn digit(key: Key) -> Option<usize> {
  let digit = match key {
    Key::Num0 | Key::Kp0 => 0,
    Key::Num1 | Key::Kp1 => 1,
    Key::Num2 | Key::Kp2 => 2,
    Key::Num3 | Key::Kp3 => 3,
    Key::Num4 | Key::Kp4 => 4,
    Key::Num5 | Key::Kp5 => 5,
    Key::Num6 | Key::Kp6 => 6,
    Key::Num7 | Key::Kp7 => 7,
    Key::Num8 | Key::Kp8 => 8,
    Key::Num9 | Key::Kp9 => 9,
    _ => return None,
  };

  Some(digit)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn digits_pick_radio_buttons() {
    let mut ui = KeyboardUi::new();
    let mut selected = 0;

    ui.key_pressed(Key::Num2);
    ui.begin_frame();
    assert!(!ui.radio_button("first", &mut selected, 0));
    assert!(ui.radio_button("second", &mut selected, 1));
    ui.end_frame();
    assert_eq!(selected, 1);

    // the pick is consumed
    ui.begin_frame();
    assert!(!ui.radio_button("first", &mut selected, 0));
    assert!(!ui.radio_button("second", &mut selected, 1));
    assert_eq!(ui.end_frame(), "1[ ] first | 2[*] second");
    assert_eq!(selected, 1);
  }

  #[test]
  fn tab_cycles_focus_and_arrows_nudge() {
    let mut ui = KeyboardUi::new();
    let (mut a, mut b) = (0., 0.);

    ui.key_pressed(Key::Tab);
    ui.key_pressed(Key::Up);
    ui.begin_frame();
    assert!(!ui.slider_f32("a", &mut a, 0., 100.));
    assert!(ui.slider_f32("b", &mut b, 0., 100.));
    assert_eq!(ui.end_frame(), "> b: 1.0");
    assert_eq!((a, b), (0., 1.));

    // past the last control, nothing is focused until the focus wraps around
    ui.key_pressed(Key::Tab);
    ui.key_pressed(Key::Down);
    ui.begin_frame();
    ui.slider_f32("a", &mut a, 0., 100.);
    ui.slider_f32("b", &mut b, 0., 100.);
    ui.end_frame();
    assert_eq!((a, b), (0., 1.));
  }

  #[test]
  fn color_channels_are_separate_controls() {
    let mut ui = KeyboardUi::new();
    let mut rgba = [1., 0.5, 0.5, 1.];

    ui.key_pressed(Key::Tab);
    ui.key_pressed(Key::Up);
    ui.key_pressed(Key::Up);
    ui.begin_frame();
    assert!(ui.color_edit4("Clear Color", &mut rgba));
    assert_eq!(ui.end_frame(), "> Clear Color.g: 0.60");
    assert_eq!((rgba[0], rgba[2], rgba[3]), (1., 0.5, 1.));
    assert!((rgba[1] - 0.6).abs() < 1e-6);

    // alpha is already at its maximum
    ui.key_pressed(Key::Tab);
    ui.key_pressed(Key::Tab);
    ui.key_pressed(Key::Up);
    ui.begin_frame();
    assert!(!ui.color_edit4("Clear Color", &mut rgba));
    assert_eq!(ui.end_frame(), "> Clear Color.a: 1.00");
    assert_eq!(rgba[3], 1.);
  }
}
