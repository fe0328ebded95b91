use std::time::Duration;

use trispin_viz::{TriangleScene, DEFAULT_COLOR};

/// The overlay window for editing the triangle color.
#[derive(Debug, Clone, PartialEq)]
pub struct TrianglePanel {
    color: [f32; 3],
}

impl Default for TrianglePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl TrianglePanel {
    pub fn new() -> Self {
        Self {
            color: DEFAULT_COLOR,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn show(&mut self, ctx: &egui::Context, fps: f32, mspf: f32) {
        egui::Window::new("Triangle Color")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| self.color_editors(ui));
                ui.weak(format!("{:.3} mspf = {:.1} fps", mspf, fps));
            });
    }

    /// Shows the R/G/B drag values and the color picker, returning the drag
    /// value responses.
    fn color_editors(&mut self, ui: &mut egui::Ui) -> Vec<egui::Response> {
        let responses = self
            .color
            .iter_mut()
            .zip(["R:", "G:", "B:"])
            .map(|(channel, prefix)| {
                ui.add(
                    egui::DragValue::new(channel)
                        .speed(0.005)
                        .clamp_range(0.0..=1.0)
                        .prefix(prefix)
                        .max_decimals(3),
                )
            })
            .collect();

        // The picker round trips through HSVA, so only take its value on an
        // actual edit.
        let mut color = self.color;
        if ui.color_edit_button_rgb(&mut color).changed() {
            self.color = color;
        }
        ui.label("Vertex Color");

        responses
    }

    /// The scene for this frame: the chosen color, rotated by the elapsed time.
    pub fn scene(&self, elapsed: Duration) -> TriangleScene {
        TriangleScene::new()
            .with_color(self.color)
            .at_time(elapsed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_show_without_input_keeps_color() {
        let ctx = egui::Context::default();
        let mut panel = TrianglePanel::new();

        // New windows are invisible on their first frame.
        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                panel.show(ctx, 60.0, 16.667);
            });
            assert_eq!(panel.color(), DEFAULT_COLOR);
        }

        let output = ctx.run(egui::RawInput::default(), |ctx| {
            panel.show(ctx, 60.0, 16.667);
        });
        assert!(!output.shapes.is_empty());
        assert_eq!(panel.color(), DEFAULT_COLOR);
    }

    #[test]
    fn test_dragging_green_lowers_it_within_range() {
        let ctx = egui::Context::default();
        let mut panel = TrianglePanel::new();

        let run_frame = |panel: &mut TrianglePanel, events: Vec<egui::Event>| {
            let input = egui::RawInput {
                events,
                ..Default::default()
            };
            let mut green_rect = egui::Rect::NOTHING;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        green_rect = panel.color_editors(ui)[1].rect;
                    });
                });
            });
            green_rect
        };

        let start = run_frame(&mut panel, Vec::new()).center();
        run_frame(
            &mut panel,
            vec![
                egui::Event::PointerMoved(start),
                egui::Event::PointerButton {
                    pos: start,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    modifiers: egui::Modifiers::default(),
                },
            ],
        );
        for step in 1..=20 {
            let pos = start - egui::vec2(20.0 * step as f32, 0.0);
            run_frame(&mut panel, vec![egui::Event::PointerMoved(pos)]);
        }
        let end = start - egui::vec2(400.0, 0.0);
        run_frame(
            &mut panel,
            vec![egui::Event::PointerButton {
                pos: end,
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::default(),
            }],
        );

        let [red, green, blue] = panel.color();
        assert!(green < DEFAULT_COLOR[1]);
        assert!((0.0..=1.0).contains(&green));
        assert_eq!([red, blue], [DEFAULT_COLOR[0], DEFAULT_COLOR[2]]);
    }

    #[test]
    fn test_scene_uses_panel_color_and_time() {
        let panel = TrianglePanel {
            color: [0.25, 0.75, 1.0],
        };
        let scene = panel.scene(Duration::from_secs(3));
        assert_eq!(scene.color(), [0.25, 0.75, 1.0]);
        assert_eq!(scene.rotation(), 3.0);
    }
}
