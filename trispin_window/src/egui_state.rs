use std::fmt;

use egui::{ClippedPrimitive, Context, TexturesDelta};
use egui_wgpu::{Renderer, ScreenDescriptor};
use egui_winit::State;
use winit::{event::WindowEvent, window::Window};

pub struct EguiState {
    context: Context,
    state: State,
    renderer: Renderer,
    primitives: Vec<ClippedPrimitive>,
    textures_delta: TexturesDelta,
    pixels_per_point: f32,
    screen_descriptor: Option<ScreenDescriptor>,
}

impl EguiState {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        msaa_samples: u32,
    ) -> Self {
        let context = Context::default();
        context.set_visuals(egui::Visuals::dark());

        let state = State::new(
            context.clone(),
            context.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        EguiState {
            context,
            state,
            renderer: Renderer::new(device, output_format, None, msaa_samples),
            primitives: Vec::new(),
            textures_delta: TexturesDelta::default(),
            pixels_per_point: window.scale_factor() as f32,
            screen_descriptor: None,
        }
    }

    /// Returns true if egui consumed the event.
    pub fn window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        if response.repaint {
            self.context.request_repaint();
        }
        response.consumed
    }

    pub fn run(&mut self, window: &Window, run_ui: impl FnOnce(&Context)) {
        let raw_input = self.state.take_egui_input(window);
        let egui_output = self.context.run(raw_input, run_ui);
        self.state
            .handle_platform_output(window, egui_output.platform_output);
        self.primitives = self
            .context
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);
        self.pixels_per_point = egui_output.pixels_per_point;
        self.textures_delta.append(egui_output.textures_delta);
    }

    /// Uploads textures and buffers for the last [Self::run].
    ///
    /// Returns command buffers from paint callbacks, which must be submitted
    /// before the encoder.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_size: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer> {
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: output_size,
            pixels_per_point: self.pixels_per_point,
        };

        for (id, image_delta) in &self.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let command_buffers = self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &self.primitives,
            &screen_descriptor,
        );

        self.screen_descriptor = Some(screen_descriptor);
        command_buffers
    }

    pub fn render<'rp>(&'rp self, rp: &mut wgpu::RenderPass<'rp>) {
        let screen_descriptor = self
            .screen_descriptor
            .as_ref()
            .expect("missing call to EguiState::prepare");

        self.renderer
            .render(rp, &self.primitives, screen_descriptor);
    }

    /// Frees textures that egui no longer uses. Call after the frame has been
    /// submitted.
    pub fn end_frame(&mut self) {
        let textures_delta = std::mem::take(&mut self.textures_delta);
        for id in &textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

impl fmt::Debug for EguiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EguiState").finish_non_exhaustive()
    }
}
