use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{pick_alpha_mode, pick_format, present_mode, FrameOutcome};

/// wgpu core objects plus the surface of the game window.
///
/// The surface borrows the window for `'w`; the platform keeps both in one
/// self-referencing entry so the window always outlives it.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to the game window.
    ///
    /// The adapter's own limits are requested: atlas pages are sized against
    /// `get_max_texture_size`, which reports them.
    pub async fn new(window: &'w Window, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("nova device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats).context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode: pick_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        if size.width > 0 && size.height > 0 {
            surface.configure(&device, &config);
        }

        log::info!(
            "gpu ready: {}, surface {format:?}, max texture {}",
            adapter.get_info().name,
            device.limits().max_texture_dimension_2d
        );

        Ok(Gpu { surface, device, queue, config, size })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Reconfigures the surface after a resize. A zero size is recorded and
    /// configuration deferred until the window has area again.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Draws and presents one frame cleared to the fog colour. Material passes
    /// are owned by the renderer behind the engine.
    pub fn draw_frame(&mut self, fog: [f64; 3]) -> FrameOutcome {
        if self.size.width == 0 || self.size.height == 0 {
            return FrameOutcome::Skipped;
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                let outcome = FrameOutcome::from_surface_error(&err);
                if outcome == FrameOutcome::Reconfigured {
                    self.surface.configure(&self.device, &self.config);
                }
                return outcome;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("nova frame encoder"),
            });

        let [r, g, b] = fog;
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("nova fog clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        FrameOutcome::Presented
    }
}
