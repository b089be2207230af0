use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

/// Default edge length of a pixelation cell, in physical pixels.
pub const DEFAULT_PIXEL_SIZE: f32 = 10.0;

/// Uniform set of the post-process stage. Layout matches the WGSL
/// `PostUniforms` struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub mouse_speed: [f32; 2],
    pub time: f32,
    pub pixel_size: f32,
    pub scroll_ratio: f32,
    pub _pad: f32,
}

impl Default for PostUniforms {
    fn default() -> Self {
        Self {
            resolution: [1280.0, 720.0],
            mouse: [0.5, 0.5],
            mouse_speed: [0.0, 0.0],
            time: 0.0,
            pixel_size: DEFAULT_PIXEL_SIZE,
            scroll_ratio: 0.0,
            _pad: 0.0,
        }
    }
}

/// Full-screen pixel/shift pass.
///
/// Pure function of its uniforms each frame: the only state is the uniform
/// buffer and the bind group to the upstream color target.
pub struct PixelShiftPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform: PostUniforms,
    uniform_buffer: wgpu::Buffer,
    fsq_vertex_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
}

impl PixelShiftPass {
    pub fn new(device: &wgpu::Device, dst_format: wgpu::TextureFormat) -> Self {
        let uniform = PostUniforms::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("post_uniform_buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        // Single oversized triangle covering the screen.
        let fsq = [[-1.0_f32, -3.0], [3.0, 1.0], [-1.0, 1.0]];
        let fsq_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("post_fsq_vertex_buffer"),
            contents: bytemuck::cast_slice(&fsq),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pixel_shift_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PIXEL_SHIFT_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("post_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: dst_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("post_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        // Bind a placeholder input until the scene target exists.
        let dummy = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("post_dummy_input"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: dst_format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let dummy_view = dummy.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = Self::build_bind_group(
            device,
            &bind_group_layout,
            &dummy_view,
            &sampler,
            &uniform_buffer,
        );

        Self {
            pipeline,
            bind_group_layout,
            bind_group,
            uniform,
            uniform_buffer,
            fsq_vertex_buffer,
            sampler,
        }
    }

    /// Rebind the upstream rendered image. Called at startup and after every
    /// resize, since the scene target is recreated.
    pub fn set_input(&mut self, device: &wgpu::Device, src_view: &wgpu::TextureView) {
        self.bind_group = Self::build_bind_group(
            device,
            &self.bind_group_layout,
            src_view,
            &self.sampler,
            &self.uniform_buffer,
        );
    }

    pub fn set_resolution(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.uniform.resolution = [width as f32, height as f32];
        self.write(queue);
    }

    /// Pushed immediately from the pointer-move handler.
    pub fn set_mouse(&mut self, queue: &wgpu::Queue, mouse: Vec2) {
        self.uniform.mouse = mouse.to_array();
        self.write(queue);
    }

    pub fn set_mouse_speed(&mut self, queue: &wgpu::Queue, speed: Vec2) {
        self.uniform.mouse_speed = speed.to_array();
        self.write(queue);
    }

    pub fn set_time(&mut self, queue: &wgpu::Queue, time: f32) {
        self.uniform.time = time;
        self.write(queue);
    }

    pub fn set_scroll_ratio(&mut self, queue: &wgpu::Queue, ratio: f32) {
        self.uniform.scroll_ratio = ratio;
        self.write(queue);
    }

    pub fn set_pixel_size(&mut self, queue: &wgpu::Queue, pixel_size: f32) {
        self.uniform.pixel_size = pixel_size;
        self.write(queue);
    }

    pub fn uniforms(&self) -> &PostUniforms {
        &self.uniform
    }

    /// Draw the full-screen pass into `dst_view`.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, dst_view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("post_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: dst_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.fsq_vertex_buffer.slice(..));
        pass.draw(0..3, 0..1);
    }

    fn write(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniform));
    }

    fn build_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        src_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        uniform_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("post_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(src_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_wgsl() {
        // vec2 fields first (align 8), then four scalars: 40 bytes total.
        assert_eq!(std::mem::size_of::<PostUniforms>(), 40);
    }

    #[test]
    fn pixel_size_defaults_to_ten() {
        let u = PostUniforms::default();
        assert_eq!(u.pixel_size, 10.0);
        assert_eq!(u.time, 0.0);
    }
}
