use std::time::Duration;

use trispin_viz::TriangleScene;

use crate::Config;

/// Trait defining the interaction between a windowed application and the window.
pub trait WindowEnv {
    /// The config that was used when running the application.
    fn config(&self) -> &Config;

    /// A recent fps measurement.
    fn fps(&self) -> f32;

    /// A recent mspf measurement.
    fn mspf(&self) -> f32;

    /// Time since the window was opened.
    fn elapsed(&self) -> Duration;

    /// The egui context.
    fn egui_ctx(&self) -> &egui::Context;

    /// Draws the triangle behind the egui overlay this frame.
    ///
    /// If called more than once in a frame, the last scene is drawn.
    fn draw_triangle(&self, scene: TriangleScene);

    /// Return details of the most recent panic caught by the panic handler.
    ///
    /// This method also clears the panic details.
    fn take_recent_panic_details(&self) -> Option<String>;
}
