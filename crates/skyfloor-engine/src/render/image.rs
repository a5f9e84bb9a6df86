use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::imaging::{LoadError, PixelSurface};
use crate::render::{RenderCtx, RenderTarget, Texture};

use super::quad::{
    image_blend, viewport_ubo_min_binding_size, ImageInstance, QuadVertex, ViewportUniform,
    QUAD_INDICES, QUAD_VERTICES,
};

/// Format of uploaded images. Decoders produce sRGB-encoded bytes.
const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Instance slots allocated up front; grows by powers of two.
const MIN_INSTANCE_CAPACITY: usize = 8;

/// Draws textures into destination rectangles, one render pass per draw.
///
/// Geometry is provided as logical pixels and converted to NDC in the vertex
/// shader using the viewport uniform. Each draw within a frame takes its own
/// instance slot, so draws keep their call order and a later draw covers an
/// earlier one where they overlap. Images are stretched to the destination.
pub struct ImageRenderer {
    pipeline_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,

    viewport_bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,

    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    instance_vbo: wgpu::Buffer,
    instance_capacity: usize,
    next_slot: usize,
}

impl ImageRenderer {
    /// Builds the pipeline for `surface_format` and its static buffers.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skyfloor image shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/image.wgsl").into()),
        });

        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skyfloor image viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: viewport_ubo_min_binding_size(),
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skyfloor image texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skyfloor image pipeline layout"),
            bind_group_layouts: &[&viewport_layout, &texture_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("skyfloor image pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), ImageInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(image_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("skyfloor image viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("skyfloor image viewport bind group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("skyfloor image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("skyfloor image quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("skyfloor image quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_vbo = create_instance_buffer(device, MIN_INSTANCE_CAPACITY);

        Self {
            pipeline_format: surface_format,
            pipeline,
            viewport_bind_group,
            viewport_ubo,
            texture_layout,
            sampler,
            quad_vbo,
            quad_ibo,
            instance_vbo,
            instance_capacity: MIN_INSTANCE_CAPACITY,
            next_slot: 0,
        }
    }

    /// Surface format the pipeline was built for.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.pipeline_format
    }

    /// Uploads `surface` as a sampled texture.
    ///
    /// Rejects empty images and images larger than `max_dimension` instead of
    /// letting the device raise a validation error.
    pub fn create_texture(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface: &PixelSurface,
        max_dimension: u32,
    ) -> Result<Texture, LoadError> {
        let (width, height) = (surface.width(), surface.height());
        let label = surface.path().display().to_string();

        if width == 0 || height == 0 {
            return Err(LoadError::Upload {
                path: surface.path().to_path_buf(),
                message: "image has no pixels".to_string(),
            });
        }
        if width > max_dimension || height > max_dimension {
            return Err(LoadError::Upload {
                path: surface.path().to_path_buf(),
                message: format!(
                    "{width}x{height} exceeds the device texture limit of {max_dimension}"
                ),
            });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            surface.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("skyfloor image texture bind group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        log::debug!("uploaded texture {label} ({width}x{height})");
        Ok(Texture::new(texture, view, bind_group, label))
    }

    /// Resets per-frame slots and uploads the frame's viewport.
    pub fn begin_frame(&mut self, ctx: &RenderCtx<'_>) {
        self.next_slot = 0;

        let u = ViewportUniform {
            viewport: ctx.viewport.shader_size(),
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(&self.viewport_ubo, 0, bytemuck::bytes_of(&u));
    }

    /// Records one draw of `texture` stretched into `dest`.
    ///
    /// Empty or non-finite rectangles draw nothing.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        texture: &Texture,
        dest: Rect,
    ) {
        let r = dest.normalized();
        if r.is_empty() || !r.is_finite() {
            return;
        }

        let slot = self.next_slot;
        self.next_slot += 1;
        self.ensure_instance_capacity(ctx, slot + 1);

        let instance = ImageInstance {
            origin: [r.x, r.y],
            size: [r.width, r.height],
        };
        let offset = (slot * std::mem::size_of::<ImageInstance>()) as u64;
        ctx.queue
            .write_buffer(&self.instance_vbo, offset, bytemuck::bytes_of(&instance));

        let mut rpass = target.overlay_pass("skyfloor image pass");

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.viewport_bind_group, &[]);
        rpass.set_bind_group(1, &texture.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, self.instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        let slot = slot as u32;
        rpass.draw_indexed(0..6, 0, slot..slot + 1);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity {
            return;
        }

        // Passes already recorded this frame keep the old buffer alive.
        let new_cap = required.next_power_of_two().max(MIN_INSTANCE_CAPACITY);
        self.instance_vbo = create_instance_buffer(ctx.device, new_cap);
        self.instance_capacity = new_cap;
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("skyfloor image instance vbo"),
        size: (capacity * std::mem::size_of::<ImageInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
