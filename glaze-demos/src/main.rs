//! Switchable glaze demos.
//!
//! Run without argument to start with the first demo, or name the demo to start with. Once
//! running, digit keys switch demos, Tab and Up / Down edit the running demo’s controls and
//! Escape quits. The menu and the controls are shown in the window title.

mod demos;
mod keyboard_ui;

use demos::Context;
use glaze::demo::DemoSwitcher;
use glaze::gl_call;
use glaze::probe::ErrorProbe;
use glaze::renderer::Renderer;
use glaze::ui::Ui as _;
use glaze_glfw::{GlfwSurface, GlfwSurfaceError, WindowDim, WindowOpt};
use glfw::{Action, Key, WindowEvent};
use keyboard_ui::KeyboardUi;
use std::time::Instant;
use structopt::StructOpt;

const TITLE: &str = "glaze demos";

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available demos.
  list_demos: bool,

  /// Demo to start with.
  demo: Option<String>,
}

fn show_available_demos(switcher: &DemoSwitcher<Context>) {
  println!("available demos:");

  for name in switcher.names() {
    println!("  - {}", name);
  }
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  let mut switcher = DemoSwitcher::new();
  demos::register(&mut switcher);

  if cli_opts.list_demos {
    show_available_demos(&switcher);
    return;
  }

  let initial = match cli_opts.demo {
    None => 0,
    Some(ref name) => match switcher.names().position(|n| n.eq_ignore_ascii_case(name)) {
      Some(index) => index,
      None => {
        log::error!("no demo named {}", name);
        show_available_demos(&switcher);
        return;
      }
    },
  };

  if let Err(e) = run(switcher, initial) {
    log::error!("{}", e);
    std::process::exit(1);
  }
}

fn run(switcher: DemoSwitcher<Context>, initial: usize) -> Result<(), GlfwSurfaceError> {
  let dim = WindowDim::Windowed {
    width: 1024,
    height: 768,
  };
  let surface = GlfwSurface::new_gl33(TITLE, WindowOpt::default().set_dim(dim))?;
  let mut context = surface.context;
  let events = surface.events_rx;

  // demos own driver objects: declared after the context, the switcher drops before it
  let mut switcher = switcher;
  let probe = ErrorProbe::default();

  let [width, height] = context.framebuffer_size();
  log::info!("framebuffer is {}×{}", width, height);

  gl_call!(probe, &mut context, Renderer::new().enable_alpha_blending(&mut context));

  let mut ui = KeyboardUi::new();
  let mut title = String::new();
  let mut frame_time = 1. / 60.;
  let mut last_t = Instant::now();

  gl_call!(probe, &mut context, switcher.select(&mut context, initial));

  while !context.should_close() && !context.key_pressed(Key::Escape) {
    // handle events
    context.poll_events();

    for (_, event) in glfw::flush_messages(&events) {
      match event {
        WindowEvent::Key(key, _, Action::Press, _) | WindowEvent::Key(key, _, Action::Repeat, _) => {
          log::debug!("key press: {:?}", key);
          ui.key_pressed(key);
        }

        WindowEvent::FramebufferSize(width, height) => {
          log::debug!("framebuffer resized to {}×{}", width, height);
        }

        _ => (),
      }
    }

    let t = Instant::now();
    let dt = t.duration_since(last_t).as_secs_f32();
    last_t = t;
    frame_time = frame_time * 0.95 + dt * 0.05;

    ui.begin_frame();
    ui.text(&format!(
      "{:.3} ms/frame ({:.1} FPS)",
      frame_time * 1000.,
      1. / frame_time
    ));

    let selection = switcher.menu(&mut ui);
    gl_call!(probe, &mut context, switcher.select(&mut context, selection));
    gl_call!(probe, &mut context, switcher.frame(&mut context, dt, &mut ui));

    let text = ui.end_frame();
    if text != title {
      context.set_title(&format!("{} | {}", TITLE, text));
      title = text;
    }

    context.swap_buffers();
  }

  gl_call!(probe, &mut context, switcher.shutdown());

  Ok(())
}
