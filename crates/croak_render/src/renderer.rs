//! Frog Renderer
//!
//! [`FrogRenderer`] is the [`FrameSink`] that draws the scene: a lit
//! ground plane and every loaded part under the rig node it is bound to.
//!
//! Meshes decoded before the window exists are queued and uploaded in
//! [`WindowSink::attach`]. Each frame the rig's world matrices are copied
//! into one uniform array and every part is drawn with its node's slot as
//! the instance index.

use std::sync::Arc;

use wgpu::util::DeviceExt;

use croak_app::winit::{Window, WindowSink};
use croak_app::{FrameOutput, FrameSink, Input};
use croak_core::{CroakError, Result};
use croak_scene::{NodeHandle, Rig};

use crate::camera::OrbitCamera;
use crate::context::{DEPTH_FORMAT, RenderContext};
use crate::mesh::{MeshData, Vertex};
use crate::style::SceneStyle;
use crate::uniforms::{FrameUniforms, ModelUniforms, NodeSlots};

/// Decoded RGBA8 skin texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SkinImage {
    /// Decodes a PNG or JPEG image.
    ///
    /// # Errors
    ///
    /// Returns [`CroakError::AssetDecode`] if the bytes are not a supported
    /// image.
    pub fn decode(path: &str, bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| CroakError::AssetDecode {
                path: path.to_string(),
                reason: e.to_string(),
            })?
            .to_rgba8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }

    /// A single white texel, used when no skin is available.
    #[must_use]
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, slot: u32) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, slot..slot + 1);
    }
}

/// Everything that needs a device.
struct GpuScene {
    ctx: RenderContext,
    frog_pipeline: wgpu::RenderPipeline,
    ground_pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    model_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    skin_bind_group: wgpu::BindGroup,
    ground: GpuMesh,
    parts: Vec<(NodeHandle, GpuMesh)>,
}

impl GpuScene {
    fn new(ctx: RenderContext, style: &SceneStyle, skin: &SkinImage) -> Self {
        let device = &ctx.device;

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let skin_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skin Layout"),
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

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::new(
                &OrbitCamera::from_style(style),
                style,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Uniforms"),
            contents: bytemuck::bytes_of(&ModelUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: model_buffer.as_entire_binding(),
                },
            ],
        });

        let skin_view = Self::upload_skin(&ctx, skin);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Skin Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });
        let skin_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Skin Bind Group"),
            layout: &skin_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&skin_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Frog Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/frog.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Frog Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &skin_layout],
            immediate_size: 0,
        });

        let frog_pipeline = Self::create_pipeline(
            &ctx,
            &shader,
            &pipeline_layout,
            "fs_frog",
            Some(wgpu::Face::Back),
        );
        // The ground is lit from both sides.
        let ground_pipeline =
            Self::create_pipeline(&ctx, &shader, &pipeline_layout, "fs_ground", None);

        let ground = GpuMesh::new(
            device,
            "Ground",
            &MeshData::plane(style.ground_size, style.ground_height),
        );

        Self {
            ctx,
            frog_pipeline,
            ground_pipeline,
            frame_buffer,
            model_buffer,
            frame_bind_group,
            skin_bind_group,
            ground,
            parts: Vec::new(),
        }
    }

    fn upload_skin(ctx: &RenderContext, skin: &SkinImage) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: skin.width,
            height: skin.height,
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Skin Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &skin.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * skin.width),
                rows_per_image: Some(skin.height),
            },
            size,
        );
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_pipeline(
        ctx: &RenderContext,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        fragment_entry: &str,
        cull_mode: Option<wgpu::Face>,
    ) -> wgpu::RenderPipeline {
        ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("Pipeline ({fragment_entry})")),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.color_format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn upload_part(&mut self, node: NodeHandle, mesh: &MeshData) {
        let part = GpuMesh::new(&self.ctx.device, "Part", mesh);
        self.parts.push((node, part));
    }

    fn render(&mut self, clear: wgpu::Color, slots: &NodeSlots) {
        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => {
                self.ctx.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Render error: {e:?}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frog Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.ctx.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            pass.set_bind_group(1, &self.skin_bind_group, &[]);

            pass.set_pipeline(&self.ground_pipeline);
            self.ground.draw(&mut pass, 0);

            pass.set_pipeline(&self.frog_pipeline);
            for (node, part) in &self.parts {
                if let Some(slot) = slots.slot(*node) {
                    part.draw(&mut pass, slot);
                }
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

/// Draws the frog, its ground and light through an orbit camera.
pub struct FrogRenderer {
    style: SceneStyle,
    camera: OrbitCamera,
    skin: SkinImage,
    gpu: Option<GpuScene>,
    pending: Vec<(NodeHandle, MeshData)>,
    slots: Option<NodeSlots>,
    models: Box<ModelUniforms>,
}

impl FrogRenderer {
    #[must_use]
    pub fn new(style: SceneStyle) -> Self {
        Self {
            camera: OrbitCamera::from_style(&style),
            style,
            skin: SkinImage::white(),
            gpu: None,
            pending: Vec::new(),
            slots: None,
            models: Box::default(),
        }
    }

    /// Uses the image in `bytes` as the frog's skin.
    ///
    /// # Errors
    ///
    /// Returns [`CroakError::AssetDecode`] if the image cannot be decoded.
    pub fn with_skin_texture(mut self, path: &str, bytes: &[u8]) -> Result<Self> {
        self.skin = SkinImage::decode(path, bytes)?;
        log::info!(
            "Skin '{path}': {}x{}",
            self.skin.width,
            self.skin.height
        );
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    #[inline]
    #[must_use]
    pub fn skin(&self) -> &SkinImage {
        &self.skin
    }

    /// Decoded meshes waiting for a device.
    #[must_use]
    pub fn pending_meshes(&self) -> usize {
        self.pending.len()
    }

    fn accept_bound(&mut self, frame: &FrameOutput) {
        for bound in &frame.bound {
            match MeshData::from_glb(&bound.asset.path, &bound.asset.bytes) {
                Ok(mesh) => self.pending.push((bound.node, mesh)),
                Err(e) => log::warn!("{e}"),
            }
        }
    }
}

impl FrameSink for FrogRenderer {
    fn present(&mut self, rig: &Rig, frame: &FrameOutput) {
        self.accept_bound(frame);
        let slots = self.slots.get_or_insert_with(|| NodeSlots::new(rig));
        slots.pack(rig, &mut self.models);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        for (node, mesh) in self.pending.drain(..) {
            gpu.upload_part(node, &mesh);
        }

        let (width, height) = gpu.ctx.size();
        self.camera.set_viewport(width, height);
        self.camera.update(frame.dt);

        let frame_uniforms = FrameUniforms::new(&self.camera, &self.style);
        gpu.ctx
            .queue
            .write_buffer(&gpu.frame_buffer, 0, bytemuck::bytes_of(&frame_uniforms));
        gpu.ctx
            .queue
            .write_buffer(&gpu.model_buffer, 0, bytemuck::bytes_of(self.models.as_ref()));

        let c = self.style.clear_color;
        let clear = wgpu::Color {
            r: f64::from(c.r),
            g: f64::from(c.g),
            b: f64::from(c.b),
            a: 1.0,
        };
        gpu.render(clear, slots);
    }
}

impl WindowSink for FrogRenderer {
    fn attach(&mut self, window: Arc<Window>) -> Result<()> {
        let ctx = RenderContext::new(window)?;
        let mut gpu = GpuScene::new(ctx, &self.style, &self.skin);
        for (node, mesh) in self.pending.drain(..) {
            gpu.upload_part(node, &mesh);
        }
        self.gpu = Some(gpu);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.ctx.resize(width, height);
        }
        self.camera.set_viewport(width, height);
    }

    fn update_input(&mut self, input: &Input) {
        self.camera.handle_input(input);
    }
}
