//! Demos and the demo switcher.
//!
//! A [`Demo`] is a self-contained scene owning its driver objects. The [`DemoSwitcher`] keeps at
//! most one of them alive at a time and forwards the frame callbacks to it.
//!
//! Switching is transactional with respect to driver objects: the running demo is dropped, along
//! with everything it owns, before the next one is constructed, so that the new demo never
//! observes stale objects on bind points it also uses.
//!
//! Since demos own driver objects, the switcher must be shut down before the context goes away.
//! Call [`DemoSwitcher::shutdown`] explicitly, or make sure the switcher is dropped first.

use crate::ui::Ui;

/// A runnable scene.
///
/// `C` is the graphics context type demos render with.
pub trait Demo<C> {
  /// Advance the simulation by `dt` seconds.
  fn on_update(&mut self, _dt: f32) {}

  fn on_render(&mut self, _ctx: &mut C) {}

  /// Describe the demo’s controls.
  fn on_ui(&mut self, _ui: &mut dyn Ui) {}
}

/// Builds a demo.
pub type DemoFactory<C> = fn(&mut C) -> Box<dyn Demo<C>>;

struct Entry<C> {
  name: String,
  factory: DemoFactory<C>,
}

struct Running<C> {
  index: usize,
  demo: Box<dyn Demo<C>>,
}

/// Runs one registered demo at a time.
pub struct DemoSwitcher<C> {
  entries: Vec<Entry<C>>,
  running: Option<Running<C>>,
  selection: usize,
}

impl<C> Default for DemoSwitcher<C> {
  fn default() -> Self {
    DemoSwitcher {
      entries: Vec::new(),
      running: None,
      selection: 0,
    }
  }
}

impl<C> DemoSwitcher<C> {
  /// Create an empty switcher, with no demo running.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a demo under `name`. Demos are indexed in registration order.
  pub fn register(&mut self, name: impl Into<String>, factory: DemoFactory<C>) -> &mut Self {
    self.entries.push(Entry {
      name: name.into(),
      factory,
    });
    self
  }

  pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
    self.entries.iter().map(|entry| entry.name.as_str())
  }

  /// Index of the running demo, if any.
  pub fn active(&self) -> Option<usize> {
    self.running.as_ref().map(|running| running.index)
  }

  /// Run demo `index`.
  ///
  /// Returns `false` and does nothing if that demo is already running or if `index` is out of
  /// range. Otherwise, the running demo is dropped, then demo `index` is built.
  pub fn select(&mut self, ctx: &mut C, index: usize) -> bool {
    if self.active() == Some(index) {
      return false;
    }

    let entry = match self.entries.get(index) {
      Some(entry) => entry,
      None => {
        log::warn!("no demo registered at index {}", index);
        return false;
      }
    };

    if let Some(previous) = self.running.take() {
      log::debug!("stopping demo {}", self.entries[previous.index].name);
      drop(previous);
    }

    log::debug!("starting demo {}", entry.name);
    let demo = (entry.factory)(ctx);

    self.running = Some(Running { index, demo });
    self.selection = index;
    true
  }

  /// Run the update, render and UI steps of the running demo, in that order.
  pub fn frame(&mut self, ctx: &mut C, dt: f32, ui: &mut dyn Ui) {
    if let Some(ref mut running) = self.running {
      running.demo.on_update(dt);
      running.demo.on_render(ctx);
      running.demo.on_ui(ui);
    }
  }

  /// Describe the demo menu, one radio button per demo.
  ///
  /// Returns the selected index, which should then be passed to [`DemoSwitcher::select`].
  pub fn menu(&mut self, ui: &mut dyn Ui) -> usize {
    for (index, entry) in self.entries.iter().enumerate() {
      ui.radio_button(&entry.name, &mut self.selection, index);
    }

    self.selection
  }

  /// Drop the running demo, if any.
  pub fn shutdown(&mut self) {
    if let Some(running) = self.running.take() {
      log::debug!("shutting down demo {}", self.entries[running.index].name);
    }
  }
}

impl<C> Drop for DemoSwitcher<C> {
  fn drop(&mut self) {
    self.shutdown();
  }
}
