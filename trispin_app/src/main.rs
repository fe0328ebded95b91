// This prevents the console window from appearing on Windows in release mode.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::process::ExitCode;

use trispin_window::{Config, WindowError};

use crate::{icon::window_icon, panel::TrianglePanel};

mod icon;
mod panel;

fn main() -> ExitCode {
    let config = Config::new()
        .with_title("Rotating Triangle")
        .with_inner_size(800, 600);
    let config = match window_icon() {
        Ok(icon) => config.with_icon(icon),
        Err(error) => {
            eprintln!("failed to build window icon: {}", error);
            config
        }
    };

    let mut panel = TrianglePanel::new();

    let result = trispin_window::run(&config, move |env| {
        panel.show(env.egui_ctx(), env.fps(), env.mspf());
        env.draw_triangle(panel.scene(env.elapsed()));
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // Without a log file there is nowhere for tracing output to go.
            if matches!(error, WindowError::LogFile { .. }) {
                eprintln!("{}", error);
            } else {
                tracing::error!("{}", error);
            }
            ExitCode::FAILURE
        }
    }
}
