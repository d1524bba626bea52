//! Rendering of the solar system: star field, bodies and rings

use common::graphics::{create_depth_texture, create_rgba_texture, create_uniform_buffer, create_vertex_buffer, DEPTH_FORMAT};
use common::mesh::{build_sphere, build_torus, ShapeVertex};
use common::GraphicsContext;
use solar_system::body::{Celestial, Planet};
use solar_system::light::Material;
use solar_system::system::SolarSystem;
use solar_system::transform::TransformState;
use solar_system::{Scene, ShaderKind, TextureHandle};

/// Camera and light, shared by every draw
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    /// x: intensity, y: ambient
    pub light: [f32; 4],
}

impl FrameUniform {
    pub fn from_scene(scene: &Scene) -> Self {
        let light = scene.light();
        Self {
            view: scene.camera().view_matrix().to_cols_array_2d(),
            proj: scene.projection().to_cols_array_2d(),
            light_position: scene.light_view_position().extend(1.0).to_array(),
            light: [light.intensity, light.ambient, 0.0, 0.0],
        }
    }
}

/// Matrices and material of one drawable
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub mvp: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub diffuse: [f32; 4],
    /// w: shininess
    pub specular: [f32; 4],
    /// x: texture count, y: lit, z: ring
    pub flags: [u32; 4],
}

impl DrawUniform {
    pub fn new(transform: &TransformState, shader: ShaderKind, material: &Material) -> Self {
        Self {
            mvp: transform.mvp().to_cols_array_2d(),
            model_view: transform.model_view().to_cols_array_2d(),
            normal: transform.normal().to_cols_array_2d(),
            diffuse: material.diffuse.extend(1.0).to_array(),
            specular: material.specular.extend(material.shininess).to_array(),
            flags: [
                shader.texture_count(),
                shader.is_lit() as u32,
                (shader == ShaderKind::Ring) as u32,
                0,
            ],
        }
    }
}

/// What a draw slot renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawTarget {
    Planet(usize),
    Ring(usize),
    Satellite(usize, usize),
}

impl DrawTarget {
    fn resolve(self, system: &SolarSystem) -> Option<(&TransformState, ShaderKind)> {
        match self {
            DrawTarget::Planet(i) => system.get(i).map(|p| (p.transform(), p.shader())),
            DrawTarget::Ring(i) => system
                .get(i)
                .and_then(Planet::ring)
                .map(|r| (r.transform(), ShaderKind::Ring)),
            DrawTarget::Satellite(i, j) => system
                .get(i)
                .and_then(|p| p.satellites().get(j))
                .map(|s| (s.transform(), s.shader())),
        }
    }
}

/// View for `handle`, or `fallback` when the handle is absent or missing
fn texture_view<'t>(
    textures: &'t [wgpu::TextureView],
    fallback: &'t wgpu::TextureView,
    handle: Option<&TextureHandle>,
) -> &'t wgpu::TextureView {
    handle
        .filter(|h| !h.is_missing())
        .and_then(|h| textures.get(h.0 as usize))
        .unwrap_or(fallback)
}

struct Mesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

struct DrawSlot {
    target: DrawTarget,
    mesh: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
}

const SPHERE_MESH: usize = 0;

pub struct Renderer {
    body_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,
    skybox_pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    meshes: Vec<Mesh>,
    slots: Vec<DrawSlot>,
    depth_texture: wgpu::TextureView,
}

impl Renderer {
    /// `textures` is indexed by the scene's texture handles
    pub fn new(ctx: &GraphicsContext, scene: &Scene, textures: &[wgpu::TextureView]) -> Self {
        let device = &ctx.device;

        let body_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Body Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/body.wgsl").into()),
        });
        let skybox_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skybox Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/skybox.wgsl").into()),
        });

        // Frame uniform and sampler
        let frame_buffer = create_uniform_buffer(device, "Frame Buffer", &FrameUniform::from_scene(scene));
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Body Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
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
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
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
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[texture_entry(0), texture_entry(1)],
        });

        let body_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Body Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let skybox_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Skybox Pipeline Layout"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });

        // Body pipeline
        let body_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Body Pipeline"),
            layout: Some(&body_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &body_shader,
                entry_point: "vs_body",
                buffers: &[ShapeVertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &body_shader,
                entry_point: "fs_body",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
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
            multiview: None,
        });

        // Ring pipeline: blended, tested against the bodies but not written
        let ring_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ring Pipeline"),
            layout: Some(&body_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &body_shader,
                entry_point: "vs_body",
                buffers: &[ShapeVertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &body_shader,
                entry_point: "fs_ring",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Skybox pipeline
        let skybox_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Skybox Pipeline"),
            layout: Some(&skybox_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &skybox_shader,
                entry_point: "vs_skybox",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &skybox_shader,
                entry_point: "fs_skybox",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Meshes: one unit-diameter sphere, one torus per ringed planet
        let sphere = build_sphere(0.5, 64, 32);
        let mut meshes = vec![Mesh {
            buffer: create_vertex_buffer(device, "Sphere Buffer", &sphere),
            vertex_count: sphere.len() as u32,
        }];

        let fallback = create_rgba_texture(&ctx.device, &ctx.queue, "Fallback Texture", 1, 1, &[255; 4])
            .create_view(&wgpu::TextureViewDescriptor::default());

        let material = scene.material();
        let mut slots = Vec::new();
        let mut add_slot = |target: DrawTarget, mesh: usize, handles: &[TextureHandle]| {
            let Some((transform, shader)) = target.resolve(scene.system()) else {
                return;
            };
            let uniform_buffer =
                create_uniform_buffer(device, "Draw Buffer", &DrawUniform::new(transform, shader, material));
            let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Draw Bind Group"),
                layout: &draw_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Texture Bind Group"),
                layout: &texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(texture_view(textures, &fallback, handles.first())),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(texture_view(textures, &fallback, handles.get(1))),
                    },
                ],
            });
            slots.push(DrawSlot {
                target,
                mesh,
                uniform_buffer,
                uniform_bind_group,
                texture_bind_group,
            });
        };

        for (i, planet) in scene.system().planets().iter().enumerate() {
            add_slot(DrawTarget::Planet(i), SPHERE_MESH, planet.textures());
            for (j, satellite) in planet.satellites().iter().enumerate() {
                add_slot(DrawTarget::Satellite(i, j), SPHERE_MESH, satellite.textures());
            }
            if let (Some(ring), Some(geometry)) = (planet.ring(), planet.descriptor().ring()) {
                let torus = build_torus(geometry.mid_radius_units(), geometry.thickness_units() / 2.0, 128, 16);
                meshes.push(Mesh {
                    buffer: create_vertex_buffer(device, "Ring Buffer", &torus),
                    vertex_count: torus.len() as u32,
                });
                add_slot(DrawTarget::Ring(i), meshes.len() - 1, ring.textures());
            }
        }
        log::info!("Renderer ready: {} draw slots, {} meshes", slots.len(), meshes.len());

        let depth_texture = create_depth_texture(device, ctx.size.width, ctx.size.height);

        Self {
            body_pipeline,
            ring_pipeline,
            skybox_pipeline,
            frame_buffer,
            frame_bind_group,
            meshes,
            slots,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = create_depth_texture(device, width, height);
    }

    /// Upload this frame's camera, light and per-body matrices
    pub fn update(&self, queue: &wgpu::Queue, scene: &Scene) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[FrameUniform::from_scene(scene)]));

        for slot in &self.slots {
            if let Some((transform, shader)) = slot.target.resolve(scene.system()) {
                let uniform = DrawUniform::new(transform, shader, scene.material());
                queue.write_buffer(&slot.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
            }
        }
    }

    fn draw_slot<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, slot: &'a DrawSlot) {
        let mesh = &self.meshes[slot.mesh];
        pass.set_bind_group(1, &slot.uniform_bind_group, &[]);
        pass.set_bind_group(2, &slot.texture_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.buffer.slice(..));
        pass.draw(0..mesh.vertex_count, 0..1);
    }

    /// Moons are skipped unless `show_satellites` is set
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, show_satellites: bool) {
        // Skybox pass
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Skybox Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
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

            pass.set_pipeline(&self.skybox_pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        // Bodies, then rings on top of the depth they wrote
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Body Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.body_pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for slot in &self.slots {
                match slot.target {
                    DrawTarget::Planet(_) => self.draw_slot(&mut pass, slot),
                    DrawTarget::Satellite(..) if show_satellites => self.draw_slot(&mut pass, slot),
                    _ => {}
                }
            }

            pass.set_pipeline(&self.ring_pipeline);
            for slot in self.slots.iter().filter(|s| matches!(s.target, DrawTarget::Ring(_))) {
                self.draw_slot(&mut pass, slot);
            }
        }
    }
}
