//! Sets up the main application window and event loop.

use std::sync::Arc;

use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder, WindowLevel},
};

use crate::{
    container::Container,
    wgpu_util::{choose_msaa_samples, choose_present_mode, choose_surface_format},
    Config, WindowEnv, WindowError,
};

#[derive(Debug)]
struct Gpu {
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
}

async fn init_gpu(window: Arc<Window>) -> Result<Gpu, WindowError> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::util::backend_bits_from_env()
            .unwrap_or(wgpu::Backends::PRIMARY | wgpu::Backends::GL),
        ..Default::default()
    });

    let window_size = window.inner_size();
    let surface = instance.create_surface(window)?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(WindowError::NoCompatibleAdapter)?;
    let adapter_info = adapter.get_info();
    tracing::info!(
        "GPU: {}, {:?}, {:?}",
        adapter_info.name,
        adapter_info.device_type,
        adapter_info.backend
    );

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
            },
            None,
        )
        .await?;
    device.on_uncaptured_error(Box::new(|error| {
        panic!("wgpu error: {}", error);
    }));

    let capabilities = surface.get_capabilities(&adapter);
    let output_format =
        choose_surface_format(&capabilities.formats).ok_or(WindowError::UnsupportedSurface)?;
    let present_mode = choose_present_mode(&capabilities.present_modes);
    tracing::info!("Surface: {:?}, {:?}", output_format, present_mode);

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: output_format,
        width: window_size.width,
        height: window_size.height,
        present_mode,
        desired_maximum_frame_latency: 2,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: Vec::new(),
    };
    if surface_config.width > 0 && surface_config.height > 0 {
        surface.configure(&device, &surface_config);
    }

    Ok(Gpu {
        surface,
        adapter,
        device,
        queue,
        surface_config,
    })
}

fn is_escape_press(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}

/// Opens a window and runs the application until the window is closed.
pub fn open_window_and_run(
    config: &Config,
    draw: impl FnMut(&dyn WindowEnv),
) -> Result<(), WindowError> {
    let event_loop = EventLoop::new()?;

    let [width, height] = config.inner_size();
    let mut window_builder = WindowBuilder::new()
        .with_title(config.title())
        .with_inner_size(LogicalSize::new(width, height))
        .with_window_icon(config.icon().cloned())
        .with_maximized(config.maximized())
        .with_visible(false);
    if config.always_on_top() {
        window_builder = window_builder.with_window_level(WindowLevel::AlwaysOnTop);
    }
    let window = Arc::new(window_builder.build(&event_loop)?);

    let Gpu {
        surface,
        adapter,
        device,
        queue,
        mut surface_config,
    } = pollster::block_on(init_gpu(Arc::clone(&window)))?;

    let texture_format_features = adapter.get_texture_format_features(surface_config.format);
    let msaa_samples = choose_msaa_samples(texture_format_features.flags);
    tracing::info!("MSAA samples: {msaa_samples}");

    // Shader compilation and pipeline validation errors are reported here
    // rather than through the uncaptured error handler.
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let mut container = Container::new(
        config,
        draw,
        &window,
        &device,
        surface_config.format,
        msaa_samples,
    );
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(WindowError::Pipeline(error));
    }

    window.set_visible(true);
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut fatal_error = None;

    event_loop.run(|event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            let consumed = container.window_event(&window, &event);
            match event {
                WindowEvent::Resized(size) => {
                    surface_config.width = size.width;
                    surface_config.height = size.height;
                    if surface_config.width > 0 && surface_config.height > 0 {
                        surface.configure(&device, &surface_config);
                    }
                }
                WindowEvent::CloseRequested => {
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. }
                    if !consumed && is_escape_press(&event) =>
                {
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => {
                    container.update(&window);

                    if surface_config.width == 0 || surface_config.height == 0 {
                        return;
                    }
                    match surface.get_current_texture() {
                        Ok(surface_texture) => {
                            let output_view = surface_texture
                                .texture
                                .create_view(&wgpu::TextureViewDescriptor::default());
                            container.render(
                                &device,
                                &queue,
                                &output_view,
                                [surface_config.width, surface_config.height],
                            );
                            window.pre_present_notify();
                            surface_texture.present();
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            surface.configure(&device, &surface_config);
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            tracing::warn!("timed out acquiring the next frame");
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            fatal_error = Some(WindowError::SurfaceOutOfMemory);
                            elwt.exit();
                        }
                    }
                }
                _ => {}
            }
        }
        Event::AboutToWait => {
            window.request_redraw();
        }
        _ => {}
    })?;

    tracing::info!("Window closed");
    match fatal_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
