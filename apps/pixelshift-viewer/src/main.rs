use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use pixelshift_assets::{LoadEvent, ModelLoader};
use pixelshift_common::Viewport;
use pixelshift_render_wgpu::SketchRenderer;
use pixelshift_sketch::Sketch;

/// Pixels of virtual page scroll per wheel line.
const SCROLL_LINE_PX: f32 = 40.0;

#[derive(Parser)]
#[command(name = "pixelshift-viewer", about = "Interactive shaded-model viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the GLB model to load
    #[arg(long, default_value = "assets/model.glb")]
    model: String,

    /// Pixelation cell size in physical pixels
    #[arg(long, default_value_t = 10.0)]
    pixel_size: f32,
}

struct ViewerApp {
    sketch: Sketch,
    loader: Option<ModelLoader>,
    model_path: String,
    pixel_size: f32,
    dragging: bool,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<SketchRenderer>,
}

impl ViewerApp {
    fn new(model_path: String, pixel_size: f32) -> Self {
        Self {
            sketch: Sketch::new(Viewport::default()),
            loader: None,
            model_path,
            pixel_size,
            dragging: false,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }

    /// Drain loader events. The loop keeps running whatever the outcome; a
    /// failed load just leaves the scene empty.
    fn poll_loader(&mut self) {
        let Some(loader) = self.loader.take() else {
            return;
        };
        while let Some(event) = loader.poll() {
            match event {
                LoadEvent::Progress { bytes } => {
                    tracing::debug!(bytes, "model load progress");
                }
                LoadEvent::Complete(model) => {
                    self.sketch.composer.adopt_model(model);
                    if let (Some(device), Some(renderer)) = (&self.device, &mut self.renderer) {
                        renderer.upload_model(device, &self.sketch.composer);
                    }
                    return;
                }
                LoadEvent::Failed(e) => {
                    tracing::error!("model load failed: {e}");
                    return;
                }
            }
        }
        // Still in flight; keep polling next tick.
        self.loader = Some(loader);
    }

    fn redraw(&mut self) {
        self.poll_loader();

        let Some(frame) = self.sketch.advance() else {
            return;
        };

        let (Some(surface), Some(device), Some(queue), Some(renderer)) = (
            &self.surface,
            &self.device,
            &self.queue,
            &mut self.renderer,
        ) else {
            return;
        };

        renderer.push_frame(
            queue,
            self.sketch.composer.camera.view_projection(),
            self.sketch.composer.model_matrix(),
            &frame,
        );

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(config) = &self.config {
                    surface.configure(device, config);
                }
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(device, queue, &view);
        output.present();

        // Reschedule: one tick per display refresh.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Pixelshift")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("pixelshift_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.sketch.resize(Viewport::new(config.width, config.height));

        let mut renderer =
            SketchRenderer::new(&device, surface_format, config.width, config.height);
        renderer.post().set_resolution(&queue, config.width, config.height);
        renderer.post().set_pixel_size(&queue, self.pixel_size);

        // Kick off the background load; rendering starts regardless.
        self.loader = Some(ModelLoader::spawn(self.model_path.clone()));

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.sketch.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(queue), Some(config)) = (
                    &self.surface,
                    &self.device,
                    &self.queue,
                    &mut self.config,
                ) {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.sketch.resize(Viewport::new(config.width, config.height));
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, queue, config.width, config.height);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let mouse = self
                    .sketch
                    .pointer_move(position.x as f32, position.y as f32);
                // The new position goes straight into the post uniform; the
                // lagged velocity follows at the next tick.
                if let (Some(queue), Some(renderer)) = (&self.queue, &mut self.renderer) {
                    renderer.post().set_mouse(queue, mouse);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_px = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * SCROLL_LINE_PX,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                // Wheel down (negative delta) scrolls the virtual page down.
                self.sketch.page.wheel(-delta_px);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.dragging {
                self.sketch
                    .composer
                    .camera
                    .rotate(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("pixelshift-viewer starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(cli.model, cli.pixel_size);
    event_loop.run_app(&mut app)?;

    Ok(())
}
