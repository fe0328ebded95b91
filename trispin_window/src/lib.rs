//! A crate for creating a window and rendering a [trispin_viz] scene with wgpu,
//! with an egui overlay on top.
//!
//! This crate also initializes logging to a file and stderr.
//!
//! # Example
//! ```no_run
//! use trispin_viz::TriangleScene;
//!
//! let config = trispin_window::Config::new().with_title("Minimal example");
//!
//! trispin_window::run(&config, move |env| {
//!     egui::Window::new("Stats").show(env.egui_ctx(), |ui| {
//!         ui.label(format!("{:.3} mspf = {:.1} fps", env.mspf(), env.fps()));
//!     });
//!     env.draw_triangle(TriangleScene::new().at_time(env.elapsed()));
//! })
//! .unwrap();
//! ```

#![warn(rust_2018_idioms, missing_debug_implementations, missing_docs)]

pub use config::*;
pub use error::*;
pub use window_env::*;

mod config;
mod container;
mod egui_state;
mod error;
mod fps_counter;
mod logging;
mod wgpu_util;
mod window;
mod window_env;

/// Initializes logging, opens a window and runs the application until the
/// window is closed.
pub fn run(config: &Config, draw: impl FnMut(&dyn WindowEnv)) -> Result<(), WindowError> {
    logging::init(&config.log_file_path())?;

    logging::print_to_log_file(&"-".repeat(80));
    if !config.title().is_empty() {
        tracing::info!("{}", config.title());
    }
    tracing::info!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    window::open_window_and_run(config, draw)
}
