use std::{
    fmt,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use trispin_viz::{TriangleScene, CLEAR_COLOR};
use trispin_viz_wgpu::TriangleRenderer;
use winit::{event::WindowEvent, window::Window};

use crate::{
    egui_state::EguiState, fps_counter::FpsCounter, logging, wgpu_util::MsaaTarget, Config,
    WindowEnv,
};

#[derive(Debug)]
struct WindowEnvImpl<'a> {
    config: &'a Config,
    fps: f32,
    mspf: f32,
    elapsed: Duration,
    egui_ctx: egui::Context,
    scene: Mutex<Option<TriangleScene>>,
}

static_assertions::assert_impl_all!(WindowEnvImpl<'_>: Send, Sync);

impl WindowEnvImpl<'_> {
    /// The scene from the last `draw_triangle` call, if any.
    fn into_scene(self) -> Option<TriangleScene> {
        self.scene
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl WindowEnv for WindowEnvImpl<'_> {
    fn config(&self) -> &Config {
        self.config
    }

    fn fps(&self) -> f32 {
        self.fps
    }

    fn mspf(&self) -> f32 {
        self.mspf
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn egui_ctx(&self) -> &egui::Context {
        &self.egui_ctx
    }

    fn draw_triangle(&self, scene: TriangleScene) {
        *self.scene.lock().unwrap_or_else(PoisonError::into_inner) = Some(scene);
    }

    fn take_recent_panic_details(&self) -> Option<String> {
        logging::take_recent_panic_details()
    }
}

/// Owns the per-window rendering state and runs the application callback.
pub struct Container<D> {
    config: Config,
    draw: D,
    egui_state: EguiState,
    triangle_renderer: TriangleRenderer,
    scene: Option<TriangleScene>,
    output_format: wgpu::TextureFormat,
    msaa_samples: u32,
    msaa_target: MsaaTarget,
    fps_counter: FpsCounter,
    start_time: Instant,
}

impl<D: FnMut(&dyn WindowEnv)> Container<D> {
    pub fn new(
        config: &Config,
        draw: D,
        window: &Window,
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        msaa_samples: u32,
    ) -> Self {
        Self {
            config: config.clone(),
            draw,
            egui_state: EguiState::new(window, device, output_format, msaa_samples),
            triangle_renderer: TriangleRenderer::new(device, output_format, msaa_samples),
            scene: None,
            output_format,
            msaa_samples,
            msaa_target: MsaaTarget::new(),
            fps_counter: FpsCounter::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns true if egui consumed the event.
    pub fn window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.window_event(window, event)
    }

    /// Runs the application callback, collecting the UI and the scene for the
    /// next [Self::render].
    pub fn update(&mut self, window: &Window) {
        self.egui_state.run(window, |ctx| {
            let env = WindowEnvImpl {
                config: &self.config,
                fps: self.fps_counter.fps(),
                mspf: self.fps_counter.mspf(),
                elapsed: self.start_time.elapsed(),
                egui_ctx: ctx.clone(),
                scene: Mutex::new(None),
            };

            (self.draw)(&env);

            self.scene = env.into_scene();
        });
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        output_view: &wgpu::TextureView,
        output_size: [u32; 2],
    ) {
        if let Some(scene) = &self.scene {
            self.triangle_renderer.prepare(queue, scene);
        }

        let msaa_output_view = if self.msaa_samples > 1 {
            Some(self.msaa_target.view(
                device,
                self.output_format,
                output_size,
                self.msaa_samples,
            ))
        } else {
            None
        };

        // The first render pass should use LoadOp::Clear and the rest should use
        // LoadOp::Load.
        let mut first_render_pass = true;
        let mut get_color_attachment = || {
            let (view, resolve_target) = match msaa_output_view {
                Some(msaa_output_view) => (msaa_output_view, Some(output_view)),
                None => (output_view, None),
            };

            let load = if first_render_pass {
                first_render_pass = false;
                let [r, g, b, a] = CLEAR_COLOR;
                wgpu::LoadOp::Clear(wgpu::Color {
                    r: r as f64,
                    g: g as f64,
                    b: b as f64,
                    a: a as f64,
                })
            } else {
                wgpu::LoadOp::Load
            };

            wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            }
        };

        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("triangle"),
                color_attachments: &[Some(get_color_attachment())],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.scene.is_some() {
                self.triangle_renderer.render(&mut rp);
            }
        }

        let callback_command_buffers =
            self.egui_state
                .prepare(device, queue, &mut encoder, output_size);

        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui"),
                color_attachments: &[Some(get_color_attachment())],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_state.render(&mut rp);
        }

        queue.submit(
            callback_command_buffers
                .into_iter()
                .chain([encoder.finish()]),
        );
        self.egui_state.end_frame();
        self.fps_counter.end_frame();
    }
}

impl<D> fmt::Debug for Container<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("output_format", &self.output_format)
            .field("msaa_samples", &self.msaa_samples)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn env(config: &Config) -> WindowEnvImpl<'_> {
        WindowEnvImpl {
            config,
            fps: 60.0,
            mspf: 16.0,
            elapsed: Duration::from_secs(2),
            egui_ctx: egui::Context::default(),
            scene: Mutex::new(None),
        }
    }

    #[test]
    fn test_no_draw_means_no_scene() {
        let config = Config::new();
        let env = env(&config);
        assert_eq!(env.elapsed(), Duration::from_secs(2));
        assert_eq!(env.into_scene(), None);
    }

    #[test]
    fn test_last_draw_wins() {
        let config = Config::new();
        let env = env(&config);
        env.draw_triangle(TriangleScene::new().with_rotation(1.0));
        env.draw_triangle(TriangleScene::new().with_color([0.0, 1.0, 0.0]));
        assert_eq!(
            env.into_scene(),
            Some(TriangleScene::new().with_color([0.0, 1.0, 0.0]))
        );
    }
}
