// This prevents the console window from appearing on Windows in release mode.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use trispin_viz::TriangleScene;
use trispin_window::Config;

fn main() -> Result<(), trispin_window::WindowError> {
    let config = Config::new().with_title("Minimal example");

    trispin_window::run(&config, move |env| {
        let ctx = env.egui_ctx();

        egui::Window::new("Config").show(ctx, |ui| {
            ui.label(format!("{:#?}", env.config()));
            ui.label(format!("{:.3} mspf = {:.1} fps", env.mspf(), env.fps()));
        });

        env.draw_triangle(TriangleScene::new().with_rotation(-env.elapsed().as_secs_f32()));
    })
}
