use std::ops::Range;

use glam::Vec2;
use lens_core::{max_points_per_ray, Circle, RayPath, Session, CIRCLE_SEGMENTS};

const RAY_COLOR: [f32; 4] = [0.85, 0.9, 1.0, 0.8];
const HORIZON_COLOR: [f32; 4] = [0.95, 0.3, 0.25, 1.0];
const PREVIEW_COLOR: [f32; 4] = [1.0, 0.75, 0.2, 1.0];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl LineVertex {
    fn new(p: Vec2, color: [f32; 4]) -> Self {
        Self {
            pos: p.to_array(),
            color,
        }
    }
}

/// Vertex ranges of the strips currently sitting in the vertex buffer.
#[derive(Default)]
struct StripLayout {
    rays: Vec<Range<u32>>,
    circles: Vec<Range<u32>>,
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    // rays occupy [0, ray_capacity); circles follow
    ray_capacity: u32,
    circle_capacity: u32,
    layout: StripLayout,
    uploaded_revision: Option<u64>,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window, ray_count: usize) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("[gpu] adapter: {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines"),
            source: wgpu::ShaderSource::Wgsl(lens_core::LINES_WGSL.into()),
        });

        // Worst case for every ray, plus the horizon and the charge preview.
        let ray_capacity = (ray_count * max_points_per_ray()) as u32;
        let circle_capacity = 2 * (CIRCLE_SEGMENTS as u32 + 1);
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line_vb"),
            size: ((ray_capacity + circle_capacity) as usize * std::mem::size_of::<LineVertex>())
                as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 8,
                    shader_location: 1,
                },
            ],
        }];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            ray_capacity,
            circle_capacity,
            layout: StripLayout::default(),
            uploaded_revision: None,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn upload_rays(&mut self, rays: &[RayPath]) {
        let mut vertices = Vec::new();
        self.layout.rays.clear();
        for path in rays {
            let start = vertices.len() as u32;
            let room = (self.ray_capacity - start) as usize;
            if room < path.len() {
                log::warn!("[gpu] ray buffer full, dropping remaining rays");
                break;
            }
            vertices.extend(path.iter().map(|p| LineVertex::new(*p, RAY_COLOR)));
            self.layout.rays.push(start..vertices.len() as u32);
        }
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
    }

    fn upload_circles(&mut self, circles: &[(Circle, [f32; 4])]) {
        let base = self.ray_capacity;
        let mut vertices = Vec::new();
        self.layout.circles.clear();
        for (circle, color) in circles {
            let outline = circle.default_outline();
            let start = vertices.len() as u32;
            if start as usize + outline.len() > self.circle_capacity as usize {
                break;
            }
            vertices.extend(outline.iter().map(|p| LineVertex::new(*p, *color)));
            self.layout.circles.push(base + start..base + vertices.len() as u32);
        }
        if !vertices.is_empty() {
            let offset = base as u64 * std::mem::size_of::<LineVertex>() as u64;
            self.queue
                .write_buffer(&self.vertex_buffer, offset, bytemuck::cast_slice(&vertices));
        }
    }

    /// Re-uploads ray geometry only when the session has rebuilt it; the lens
    /// and preview outlines are refreshed every frame.
    pub fn render(&mut self, session: &Session, now: f64) -> Result<(), wgpu::SurfaceError> {
        if self.uploaded_revision != Some(session.revision()) {
            self.upload_rays(session.rays());
            self.uploaded_revision = Some(session.revision());
        }
        let mut circles = Vec::with_capacity(2);
        if let Some(c) = session.lens_circle() {
            circles.push((c, HORIZON_COLOR));
        }
        if let Some(c) = session.preview_circle(now) {
            circles.push((c, PREVIEW_COLOR));
        }
        self.upload_circles(&circles);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            for strip in self.layout.rays.iter().chain(self.layout.circles.iter()) {
                if strip.len() >= 2 {
                    rpass.draw(strip.clone(), 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
