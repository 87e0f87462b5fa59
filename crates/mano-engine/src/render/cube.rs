use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::render::{Material, RenderCtx, RenderTarget, Texture, TextureImage};
use crate::scene::{CubeCmd, DrawList};

/// Instanced unit-cube renderer.
///
/// One pipeline serves both primitive styles; per-instance flags select
/// lighting and texturing in the fragment shader. Geometry is depth tested
/// against the frame's depth attachment.
///
/// GPU resources are created lazily on first use and rebuilt when the surface
/// or depth format changes.
#[derive(Default)]
pub struct CubeRenderer {
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    globals_ubo: Option<wgpu::Buffer>,

    cube_vbo: Option<wgpu::Buffer>,
    cube_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    /// Texture sampled by textured instances. A white texel stands in until set.
    texture: Option<Texture>,
}

impl CubeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the texture sampled by textured cubes.
    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
        self.bind_group = None;
    }

    /// Renders every cube in `draw_list` into `target`.
    ///
    /// Loads (does not clear) the color and depth attachments.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        projection: Mat4,
        material: &Material,
    ) {
        if draw_list.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        let instances: Vec<CubeInstance> =
            draw_list.items().iter().map(CubeInstance::from_cmd).collect();

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.write_globals(ctx, projection, material);
        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(cube_vbo) = self.cube_vbo.as_ref() else { return };
        let Some(cube_ibo) = self.cube_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("mano cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, cube_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(cube_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..CUBE_INDEX_COUNT, 0, 0..instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mano cube shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cube.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mano cube bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<GlobalsUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mano cube pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mano cube pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CubeVertex::layout(), CubeInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);

        self.bind_group = None;
        self.globals_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.globals_ubo.is_some() {
            return;
        }

        if self.texture.is_none() {
            log::debug!("CubeRenderer: no texture set; using a white texel");
            match Texture::from_image(
                ctx.device,
                ctx.queue,
                &TextureImage::white(),
                "mano fallback texture",
            ) {
                Ok(texture) => self.texture = Some(texture),
                Err(err) => {
                    log::error!("CubeRenderer: {err}");
                    return;
                }
            }
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(texture) = self.texture.as_ref() else { return };

        let globals_ubo = match self.globals_ubo.take() {
            Some(ubo) => ubo,
            None => ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("mano cube globals ubo"),
                size: std::mem::size_of::<GlobalsUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mano cube bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        self.globals_ubo = Some(globals_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.cube_vbo.is_some() && self.cube_ibo.is_some() {
            return;
        }

        self.cube_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mano cube vbo"),
            contents: bytemuck::cast_slice(&cube_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.cube_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mano cube ibo"),
            contents: bytemuck::cast_slice(&cube_indices()),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_globals(&self, ctx: &RenderCtx<'_>, projection: Mat4, material: &Material) {
        let Some(ubo) = self.globals_ubo.as_ref() else { return };
        let u = GlobalsUniform::new(projection, material);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<CubeInstance>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mano cube instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── uniforms ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlobalsUniform {
    proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
}

impl GlobalsUniform {
    fn new(projection: Mat4, material: &Material) -> Self {
        let l = material.light_dir.normalize_or_zero();
        let [ar, ag, ab] = material.ambient;
        let [dr, dg, db] = material.diffuse;
        Self {
            proj: projection.to_cols_array_2d(),
            light_dir: [l.x, l.y, l.z, 0.0],
            ambient: [ar, ag, ab, 1.0],
            diffuse: [dr, dg, db, 1.0],
        }
    }
}

// ── cube geometry ─────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CubeVertex {
    pos: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

impl CubeVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Outward normal and corners (counter-clockwise seen from outside) per face.
const CUBE_FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // front
    (
        [0.0, 0.0, 1.0],
        [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
    ),
    // back
    (
        [0.0, 0.0, -1.0],
        [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
    ),
    // left
    (
        [-1.0, 0.0, 0.0],
        [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
    ),
    // right
    (
        [1.0, 0.0, 0.0],
        [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
    ),
    // top
    (
        [0.0, 1.0, 0.0],
        [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
    ),
    // bottom
    (
        [0.0, -1.0, 0.0],
        [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
    ),
];

/// Each face maps the whole texture; image rows run top to bottom.
const FACE_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

const CUBE_INDEX_COUNT: u32 = 36;

fn cube_vertices() -> [CubeVertex; 24] {
    let mut out = [CubeVertex::zeroed(); 24];
    for (f, (normal, corners)) in CUBE_FACES.iter().enumerate() {
        for (c, corner) in corners.iter().enumerate() {
            out[f * 4 + c] = CubeVertex {
                pos: *corner,
                normal: *normal,
                uv: FACE_UVS[c],
            };
        }
    }
    out
}

fn cube_indices() -> [u16; CUBE_INDEX_COUNT as usize] {
    let mut out = [0u16; CUBE_INDEX_COUNT as usize];
    for f in 0..6u16 {
        let base = f * 4;
        let i = f as usize * 6;
        out[i..i + 6].copy_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    out
}

// ── instances ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CubeInstance {
    model_view: [[f32; 4]; 4],
    scale_lit: [f32; 4],
    color_textured: [f32; 4],
}

impl CubeInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        3 => Float32x4, // model_view col 0
        4 => Float32x4, // model_view col 1
        5 => Float32x4, // model_view col 2
        6 => Float32x4, // model_view col 3
        7 => Float32x4, // scale + lit flag
        8 => Float32x4  // color + textured flag
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn from_cmd(cmd: &CubeCmd) -> Self {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let c = cmd.color.clamped();
        Self {
            model_view: cmd.transform.to_cols_array_2d(),
            scale_lit: [cmd.scale.x, cmd.scale.y, cmd.scale.z, flag(cmd.style.is_lit())],
            color_textured: [c.r, c.g, c.b, flag(cmd.style.is_textured())],
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::math::Transform;
    use crate::paint::Color;

    #[test]
    fn every_face_is_on_the_unit_cube_boundary() {
        for (normal, corners) in CUBE_FACES {
            let n = Vec3::from(normal);
            for corner in corners {
                let p = Vec3::from(corner);
                assert_eq!(p.abs(), Vec3::splat(0.5));
                assert!((p.dot(n) - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn face_winding_matches_outward_normal() {
        for (normal, corners) in CUBE_FACES {
            let [a, b, c, _] = corners.map(Vec3::from);
            let winding = (b - a).cross(c - a).normalize();
            assert_eq!(winding, Vec3::from(normal));
        }
    }

    #[test]
    fn indices_cover_all_vertices_in_range() {
        let idx = cube_indices();
        assert!(idx.iter().all(|&i| i < 24));
        let verts = cube_vertices();
        assert_eq!(verts[4].normal, [0.0, 0.0, -1.0]);
        assert_eq!(&idx[6..12], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn instance_flags_follow_style() {
        let t = Transform::IDENTITY.translated(1.0, 2.0, 3.0);
        let scale = Vec3::new(0.1, 0.3, 0.1);

        let unlit = CubeInstance::from_cmd(&CubeCmd {
            transform: t,
            scale,
            color: Color::rgb(0.9, 0.7, 0.5),
            style: crate::scene::CubeStyle::Unlit,
        });
        assert_eq!(unlit.scale_lit, [0.1, 0.3, 0.1, 0.0]);
        assert_eq!(unlit.color_textured, [0.9, 0.7, 0.5, 0.0]);
        assert_eq!(unlit.model_view[3], [1.0, 2.0, 3.0, 1.0]);

        let shell = CubeInstance::from_cmd(&CubeCmd {
            transform: t,
            scale,
            color: Color::WHITE,
            style: crate::scene::CubeStyle::Lit { textured: true },
        });
        assert_eq!(shell.scale_lit[3], 1.0);
        assert_eq!(shell.color_textured[3], 1.0);
    }

    #[test]
    fn globals_carry_normalized_light() {
        let g = GlobalsUniform::new(Mat4::IDENTITY, &Material::default());
        let l = Vec3::new(g.light_dir[0], g.light_dir[1], g.light_dir[2]);
        assert!((l.length() - 1.0).abs() < 1e-6);
        assert_eq!(g.ambient, [0.3, 0.3, 0.3, 1.0]);
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 112);
    }
}
