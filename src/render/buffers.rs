use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use wgpu::*;

use crate::scene::Mesh;

/// Expanded per-face-corner vertex as uploaded for the base geometry
/// passes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl SceneVertex {
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: (2 * std::mem::size_of::<[f32; 3]>()) as BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Homogeneous vertex of the extrusion buffer; `w == 0` marks the
/// extruded copy.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct VolumeVertex {
    pub position: [f32; 4],
}

impl VolumeVertex {
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<VolumeVertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: VertexFormat::Float32x4,
            }],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient: f32,
    pub _padding: [f32; 3],
}

impl SceneUniforms {
    pub fn new(
        view_proj: Mat4,
        model: Mat4,
        light_pos: [f32; 4],
        light_color: [f32; 4],
        ambient: f32,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light_pos,
            light_color,
            ambient,
            _padding: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct VolumeUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Light position in the caster's local space.
    pub light_pos: [f32; 4],
    /// Debug color; ignored when color writes are masked.
    pub color: [f32; 4],
}

pub struct WgpuTexture {
    pub texture: Texture,
    pub view: TextureView,
    pub sampler: Sampler,
}

/// Per-mesh GPU state. The extrusion buffer is static: first half the
/// real vertices with `w = 1`, second half the same positions with
/// `w = 0`, so one buffer serves every light of every frame.
pub struct GpuMesh {
    pub vertex_buffer: Buffer,
    pub vertex_count: u32,
    pub extrude_buffer: Buffer,
    pub real_vert_count: u32,
    pub texture_bind_group: BindGroup,
}

pub fn upload_mesh(
    device: &Device,
    queue: &Queue,
    mesh: &Mesh,
    texture_layout: &BindGroupLayout,
) -> GpuMesh {
    let vertices: Vec<SceneVertex> = (0..mesh.positions.len())
        .map(|i| SceneVertex {
            position: mesh.positions[i].to_array(),
            normal: mesh.normals[i].to_array(),
            uv: if mesh.has_tex_coords {
                mesh.tex_coords[i].to_array()
            } else {
                [0.0, 0.0]
            },
        })
        .collect();

    let vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("Mesh Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: BufferUsages::VERTEX,
    });

    let mut extrude_verts: Vec<VolumeVertex> = Vec::with_capacity(mesh.real_verts.len() * 2);
    for w in [1.0, 0.0] {
        extrude_verts.extend(mesh.real_verts.iter().map(|v| VolumeVertex {
            position: [v.x, v.y, v.z, w],
        }));
    }

    let extrude_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("Mesh Extrusion Buffer"),
        contents: bytemuck::cast_slice(&extrude_verts),
        usage: BufferUsages::VERTEX,
    });

    let texture = match &mesh.texture {
        Some(img) => create_texture(device, queue, img.width(), img.height(), img.as_raw()),
        None => create_texture(device, queue, 1, 1, &[255, 255, 255, 255]),
    };

    let texture_bind_group = device.create_bind_group(&BindGroupDescriptor {
        label: Some("Mesh Texture Bind Group"),
        layout: texture_layout,
        entries: &[
            BindGroupEntry {
                binding: 0,
                resource: BindingResource::TextureView(&texture.view),
            },
            BindGroupEntry {
                binding: 1,
                resource: BindingResource::Sampler(&texture.sampler),
            },
        ],
    });

    GpuMesh {
        vertex_buffer,
        vertex_count: vertices.len() as u32,
        extrude_buffer,
        real_vert_count: mesh.real_verts.len() as u32,
        texture_bind_group,
    }
}

fn create_texture(
    device: &Device,
    queue: &Queue,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> WgpuTexture {
    let size = Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("Mesh Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8UnormSrgb,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: Origin3d::ZERO,
            aspect: TextureAspect::All,
        },
        rgba,
        ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    let view = texture.create_view(&TextureViewDescriptor::default());
    let sampler = device.create_sampler(&SamplerDescriptor {
        address_mode_u: AddressMode::Repeat,
        address_mode_v: AddressMode::Repeat,
        mag_filter: FilterMode::Linear,
        min_filter: FilterMode::Linear,
        ..Default::default()
    });
    WgpuTexture {
        texture,
        view,
        sampler,
    }
}
