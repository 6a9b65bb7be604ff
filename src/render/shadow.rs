use std::collections::HashMap;
use std::sync::Arc;

use glam::Mat4;
use log::{error, trace};
use wgpu::util::DeviceExt;
use wgpu::*;

use crate::config::RenderConfig;
use crate::scene::light::visible_lights;
use crate::scene::{Light, MeshHandle, Scene};
use crate::shapes;

use super::buffers::{self, GpuMesh, SceneUniforms, SceneVertex, VolumeUniforms, VolumeVertex};
use super::pipelines;
use super::shaders::{SCENE_SHADER, VOLUME_SHADER};
use super::volume::{build_light_cap_indices, build_volume_indices};

pub const CLEAR_COLOR: Color = Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

const DEBUG_VOLUME_COLOR: [f32; 4] = [0.8, 0.1, 0.1, 0.2];
const SILHOUETTE_COLOR: [f32; 4] = [1.0, 0.2, 0.0, 1.0];
const LIGHT_MARKER_SIZE: f32 = 0.3;

/// Orchestrates the three-pass stencil-shadow pipeline:
///
/// 1. Ambient: base geometry, fills depth, once per frame.
/// 2. Volume: per light, extruded silhouettes into the stencil buffer
///    with the z-fail increment/decrement rule.
/// 3. Illumination: per light, additive diffuse gated on stencil == 0.
///
/// The passes are strictly ordered; each depends on the depth/stencil
/// state the previous one left behind, so no interleaving across
/// lights.
pub struct ShadowRenderer {
    device: Arc<Device>,
    queue: Arc<Queue>,

    texture_layout: BindGroupLayout,
    uniform_layout: BindGroupLayout,

    ambient_pipeline: RenderPipeline,
    illumination_pipeline: RenderPipeline,
    volume_pipeline: RenderPipeline,
    volume_debug_pipeline: RenderPipeline,
    light_cap_pipeline: RenderPipeline,
    silhouette_pipeline: RenderPipeline,
    light_marker_pipeline: RenderPipeline,

    marker_vertex_buffer: Buffer,
    marker_vertex_count: u32,

    meshes: HashMap<MeshHandle, GpuMesh>,
}

impl ShadowRenderer {
    pub fn new(device: Arc<Device>, queue: Arc<Queue>, surface_format: TextureFormat) -> Self {
        let uniform_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: TextureSampleType::Float { filterable: true },
                        view_dimension: TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let scene_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: ShaderSource::Wgsl(SCENE_SHADER.into()),
        });
        let volume_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Volume Shader"),
            source: ShaderSource::Wgsl(VOLUME_SHADER.into()),
        });

        let scene_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let volume_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Volume Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let scene_pipeline = |label, target: ColorTargetState, depth_stencil| {
            device.create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&scene_layout),
                vertex: VertexState {
                    module: &scene_shader,
                    entry_point: "vs_main",
                    buffers: &[SceneVertex::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: &scene_shader,
                    entry_point: "fs_main",
                    targets: &[Some(target)],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: pipelines::create_primitive_state(Some(Face::Back)),
                depth_stencil: Some(depth_stencil),
                multisample: pipelines::create_multisample_state(),
                multiview: None,
            })
        };

        let ambient_pipeline = scene_pipeline(
            "Ambient Pipeline",
            pipelines::create_opaque_color_target(surface_format),
            pipelines::create_ambient_depth_stencil_state(),
        );
        let illumination_pipeline = scene_pipeline(
            "Illumination Pipeline",
            pipelines::create_additive_color_target(surface_format),
            pipelines::create_illumination_depth_stencil_state(),
        );

        let volume_pipeline_with =
            |label, target: ColorTargetState, primitive: PrimitiveState, depth_stencil| {
                device.create_render_pipeline(&RenderPipelineDescriptor {
                    label: Some(label),
                    layout: Some(&volume_layout),
                    vertex: VertexState {
                        module: &volume_shader,
                        entry_point: "vs_main",
                        buffers: &[VolumeVertex::desc()],
                        compilation_options: PipelineCompilationOptions::default(),
                    },
                    fragment: Some(FragmentState {
                        module: &volume_shader,
                        entry_point: "fs_main",
                        targets: &[Some(target)],
                        compilation_options: PipelineCompilationOptions::default(),
                    }),
                    primitive,
                    depth_stencil: Some(depth_stencil),
                    multisample: pipelines::create_multisample_state(),
                    multiview: None,
                })
            };

        let volume_pipeline = volume_pipeline_with(
            "Volume Pipeline",
            pipelines::create_masked_color_target(surface_format),
            pipelines::create_volume_primitive_state(),
            pipelines::create_volume_depth_stencil_state(),
        );
        let volume_debug_pipeline = volume_pipeline_with(
            "Volume Debug Pipeline",
            pipelines::create_debug_volume_color_target(surface_format),
            pipelines::create_volume_primitive_state(),
            pipelines::create_volume_depth_stencil_state(),
        );
        let light_cap_pipeline = volume_pipeline_with(
            "Light Cap Pipeline",
            pipelines::create_masked_color_target(surface_format),
            pipelines::create_volume_primitive_state(),
            pipelines::create_light_cap_depth_stencil_state(),
        );
        let silhouette_pipeline = volume_pipeline_with(
            "Silhouette Pipeline",
            pipelines::create_opaque_color_target(surface_format),
            pipelines::create_line_primitive_state(),
            pipelines::create_overlay_depth_stencil_state(),
        );
        let light_marker_pipeline = volume_pipeline_with(
            "Light Marker Pipeline",
            pipelines::create_opaque_color_target(surface_format),
            pipelines::create_primitive_state(Some(Face::Back)),
            pipelines::create_overlay_depth_stencil_state(),
        );

        // A small cube, expanded to triangles, drawn once per visible
        // point light through the volume shader's w = 1 path.
        let marker = shapes::cube(LIGHT_MARKER_SIZE);
        let marker_verts: Vec<VolumeVertex> = marker
            .triangles
            .iter()
            .flat_map(|tri| tri.iter().map(|&i| marker.real_verts[i as usize]))
            .map(|v| VolumeVertex {
                position: [v.x, v.y, v.z, 1.0],
            })
            .collect();
        let marker_vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Light Marker Vertex Buffer"),
            contents: bytemuck::cast_slice(&marker_verts),
            usage: BufferUsages::VERTEX,
        });

        Self {
            device,
            queue,
            texture_layout,
            uniform_layout,
            ambient_pipeline,
            illumination_pipeline,
            volume_pipeline,
            volume_debug_pipeline,
            light_cap_pipeline,
            silhouette_pipeline,
            light_marker_pipeline,
            marker_vertex_buffer,
            marker_vertex_count: marker_verts.len() as u32,
            meshes: HashMap::new(),
        }
    }

    /// Uploads every mesh of the scene. Must run before the first
    /// `draw_scene`; drawing a caster whose mesh was never uploaded is
    /// a contract violation and aborts that caster's draw.
    pub fn upload_scene(&mut self, scene: &Scene) {
        for (i, mesh) in scene.meshes.iter().enumerate() {
            let handle = MeshHandle(i);
            if !self.meshes.contains_key(&handle) {
                let gpu = buffers::upload_mesh(&self.device, &self.queue, mesh, &self.texture_layout);
                self.meshes.insert(handle, gpu);
            }
        }
    }

    /// Renders one frame: ambient pass, then volume + illumination per
    /// visible light. Every caster's silhouette cache is invalidated
    /// at the start of each light iteration.
    pub fn draw_scene(
        &self,
        encoder: &mut CommandEncoder,
        color_view: &TextureView,
        depth_view: &TextureView,
        scene: &mut Scene,
        view_proj: Mat4,
        config: &RenderConfig,
    ) {
        self.ambient_pass(encoder, color_view, depth_view, scene, view_proj, config);

        if config.ambient_only {
            return;
        }

        let lights: Vec<Light> =
            visible_lights(&scene.lights, config.max_visible_lights).to_vec();
        for light in &lights {
            // Each light sees its own silhouette; a cache surviving
            // from the previous light would extrude the wrong edges.
            scene.dirty_all_casters();
            if config.draw_shadows {
                self.volume_pass(encoder, color_view, depth_view, scene, view_proj, light, config);
            } else {
                // No volumes were drawn, but the illumination pass
                // still expects a zeroed stencil.
                self.clear_stencil(encoder, color_view, depth_view);
            }
            self.illumination_pass(encoder, color_view, depth_view, scene, view_proj, light);
        }

        if config.draw_light_markers {
            self.marker_pass(encoder, color_view, depth_view, &lights, view_proj);
        }
    }

    fn scene_bind_group(&self, uniforms: SceneUniforms) -> BindGroup {
        let buffer = self.device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: BufferUsages::UNIFORM,
        });
        self.uniform_bind_group("Scene Bind Group", &buffer)
    }

    fn uniform_bind_group(&self, label: &str, buffer: &Buffer) -> BindGroup {
        self.device.create_bind_group(&BindGroupDescriptor {
            label: Some(label),
            layout: &self.uniform_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    /// Per-caster draw data for the base-geometry passes, prepared
    /// ahead of the pass so the bind groups outlive it.
    fn prepare_base_draws(
        &self,
        scene: &mut Scene,
        view_proj: Mat4,
        light_pos: [f32; 4],
        light_color: [f32; 4],
        ambient: f32,
    ) -> Vec<(MeshHandle, BindGroup)> {
        let mut draws = Vec::with_capacity(scene.casters.len());
        for caster in &mut scene.casters {
            if !self.meshes.contains_key(&caster.mesh()) {
                error!("caster references mesh {:?} with no GPU buffers; skipping draw", caster.mesh());
                continue;
            }
            let uniforms = SceneUniforms::new(
                view_proj,
                caster.local_to_world(),
                light_pos,
                light_color,
                ambient,
            );
            draws.push((caster.mesh(), self.scene_bind_group(uniforms)));
        }
        draws
    }

    fn draw_base_geometry<'a>(
        &'a self,
        pass: &mut RenderPass<'a>,
        draws: &'a [(MeshHandle, BindGroup)],
    ) {
        for (handle, bind_group) in draws {
            let Some(gpu) = self.meshes.get(handle) else {
                continue;
            };
            pass.set_bind_group(0, bind_group, &[]);
            pass.set_bind_group(1, &gpu.texture_bind_group, &[]);
            pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            pass.draw(0..gpu.vertex_count, 0..1);
        }
    }

    /// Pass A. Draws every caster with no diffuse contribution and
    /// fills the depth buffer the later stencil comparisons rely on.
    /// Clears color, depth and stencil for the frame.
    fn ambient_pass(
        &self,
        encoder: &mut CommandEncoder,
        color_view: &TextureView,
        depth_view: &TextureView,
        scene: &mut Scene,
        view_proj: Mat4,
        config: &RenderConfig,
    ) {
        let draws = self.prepare_base_draws(
            scene,
            view_proj,
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0, 0.0],
            config.ambient_level,
        );

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Ambient Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(CLEAR_COLOR),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: Some(Operations {
                    load: LoadOp::Clear(0),
                    store: StoreOp::Store,
                }),
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.ambient_pipeline);
        self.draw_base_geometry(&mut pass, &draws);
    }

    /// Pass B. Accumulates every shadow caster's extruded volume into
    /// the stencil buffer under the z-fail rule. The stencil aspect is
    /// cleared here, once per light; depth and color are left alone.
    fn volume_pass(
        &self,
        encoder: &mut CommandEncoder,
        color_view: &TextureView,
        depth_view: &TextureView,
        scene: &mut Scene,
        view_proj: Mat4,
        light: &Light,
        config: &RenderConfig,
    ) {
        struct VolumeDraw {
            mesh: MeshHandle,
            bind_group: BindGroup,
            volume_indices: Buffer,
            volume_count: u32,
            cap_indices: Buffer,
            cap_count: u32,
            silhouette: Option<(BindGroup, Buffer, u32)>,
        }

        let mut draws = Vec::new();
        for caster in &mut scene.casters {
            if !caster.casts_shadow() {
                continue;
            }
            let handle = caster.mesh();
            let Some(gpu) = self.meshes.get(&handle) else {
                error!("caster references mesh {handle:?} with no GPU buffers; skipping volume");
                continue;
            };
            let mesh = &scene.meshes[handle.0];

            let model = caster.local_to_world();
            // The silhouette lives in mesh-local space; bring the
            // light there instead of the mesh into world space. The
            // homogeneous multiply covers both kinds: a directional
            // light (w = 0) only picks up the linear part.
            let light_local = model.inverse() * light.position;

            let silhouette = caster.silhouette(mesh, light_local);
            if silhouette.is_empty() {
                trace!("caster with mesh {handle:?}: empty silhouette, no volume");
                continue;
            }

            // Silhouette overlay indices: the extracted edges as lines
            // over the near-cap half of the extrusion buffer.
            let sil_lines: Option<Vec<u32>> = config.draw_silhouettes.then(|| {
                silhouette
                    .iter()
                    .flat_map(|edge| [edge.v1, edge.v2])
                    .collect()
            });

            let volume = build_volume_indices(silhouette, gpu.real_vert_count, light_local.w);
            let cap = build_light_cap_indices(&mesh.faces, caster.light_facing());

            let sil_overlay = sil_lines.map(|lines| {
                let uniforms = VolumeUniforms {
                    view_proj: view_proj.to_cols_array_2d(),
                    model: model.to_cols_array_2d(),
                    light_pos: light_local.to_array(),
                    color: SILHOUETTE_COLOR,
                };
                let buffer = self.device.create_buffer_init(&util::BufferInitDescriptor {
                    label: Some("Silhouette Uniform Buffer"),
                    contents: bytemuck::cast_slice(&[uniforms]),
                    usage: BufferUsages::UNIFORM,
                });
                let indices = self.device.create_buffer_init(&util::BufferInitDescriptor {
                    label: Some("Silhouette Index Buffer"),
                    contents: bytemuck::cast_slice(&lines),
                    usage: BufferUsages::INDEX,
                });
                (
                    self.uniform_bind_group("Silhouette Bind Group", &buffer),
                    indices,
                    lines.len() as u32,
                )
            });

            let mut indices = volume.sides;
            indices.extend(volume.dark_cap);

            let uniforms = VolumeUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: model.to_cols_array_2d(),
                light_pos: light_local.to_array(),
                color: DEBUG_VOLUME_COLOR,
            };
            let buffer = self.device.create_buffer_init(&util::BufferInitDescriptor {
                label: Some("Volume Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniforms]),
                usage: BufferUsages::UNIFORM,
            });

            draws.push(VolumeDraw {
                mesh: handle,
                bind_group: self.uniform_bind_group("Volume Bind Group", &buffer),
                volume_indices: self.device.create_buffer_init(&util::BufferInitDescriptor {
                    label: Some("Volume Index Buffer"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: BufferUsages::INDEX,
                }),
                volume_count: indices.len() as u32,
                cap_indices: self.device.create_buffer_init(&util::BufferInitDescriptor {
                    label: Some("Light Cap Index Buffer"),
                    contents: bytemuck::cast_slice(&cap),
                    usage: BufferUsages::INDEX,
                }),
                cap_count: cap.len() as u32,
                silhouette: sil_overlay,
            });
        }

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Shadow Volume Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                }),
                stencil_ops: Some(Operations {
                    load: LoadOp::Clear(0),
                    store: StoreOp::Store,
                }),
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let volume_pipeline = if config.draw_shadow_volumes {
            &self.volume_debug_pipeline
        } else {
            &self.volume_pipeline
        };

        for draw in &draws {
            let Some(gpu) = self.meshes.get(&draw.mesh) else {
                continue;
            };

            pass.set_pipeline(volume_pipeline);
            pass.set_bind_group(0, &draw.bind_group, &[]);
            pass.set_vertex_buffer(0, gpu.extrude_buffer.slice(..));
            pass.set_index_buffer(draw.volume_indices.slice(..), IndexFormat::Uint32);
            pass.draw_indexed(0..draw.volume_count, 0, 0..1);

            if draw.cap_count > 0 {
                pass.set_pipeline(&self.light_cap_pipeline);
                pass.set_bind_group(0, &draw.bind_group, &[]);
                pass.set_index_buffer(draw.cap_indices.slice(..), IndexFormat::Uint32);
                pass.draw_indexed(0..draw.cap_count, 0, 0..1);
            }

            if let Some((bind_group, indices, count)) = &draw.silhouette {
                pass.set_pipeline(&self.silhouette_pipeline);
                pass.set_bind_group(0, bind_group, &[]);
                pass.set_index_buffer(indices.slice(..), IndexFormat::Uint32);
                pass.draw_indexed(0..*count, 0, 0..1);
            }
        }
    }

    /// Pass C. Re-draws the base geometry with this light's diffuse
    /// contribution, additively, only where depth matches the ambient
    /// surface and the stencil count is zero.
    fn illumination_pass(
        &self,
        encoder: &mut CommandEncoder,
        color_view: &TextureView,
        depth_view: &TextureView,
        scene: &mut Scene,
        view_proj: Mat4,
        light: &Light,
    ) {
        let draws = self.prepare_base_draws(
            scene,
            view_proj,
            light.position.to_array(),
            light.color.extend(1.0).to_array(),
            0.0,
        );

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Illumination Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                }),
                stencil_ops: Some(Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                }),
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.illumination_pipeline);
        pass.set_stencil_reference(0);
        self.draw_base_geometry(&mut pass, &draws);
    }

    /// Draws a small colored cube at each visible point light's
    /// position, depth-tested against the scene. Directional lights
    /// have no position to mark.
    fn marker_pass(
        &self,
        encoder: &mut CommandEncoder,
        color_view: &TextureView,
        depth_view: &TextureView,
        lights: &[Light],
        view_proj: Mat4,
    ) {
        let mut groups = Vec::with_capacity(lights.len());
        for light in lights {
            if light.is_directional() {
                continue;
            }
            let uniforms = VolumeUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: Mat4::from_translation(light.position.truncate()).to_cols_array_2d(),
                light_pos: [0.0, 0.0, 0.0, 1.0],
                color: light.color.extend(1.0).to_array(),
            };
            let buffer = self.device.create_buffer_init(&util::BufferInitDescriptor {
                label: Some("Light Marker Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniforms]),
                usage: BufferUsages::UNIFORM,
            });
            groups.push(self.uniform_bind_group("Light Marker Bind Group", &buffer));
        }
        if groups.is_empty() {
            return;
        }

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Light Marker Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                }),
                stencil_ops: Some(Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                }),
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.light_marker_pipeline);
        pass.set_vertex_buffer(0, self.marker_vertex_buffer.slice(..));
        for group in &groups {
            pass.set_bind_group(0, group, &[]);
            pass.draw(0..self.marker_vertex_count, 0..1);
        }
    }

    /// With the volume pass disabled the stencil still gates pass C,
    /// so reset it to all-zero (everything lit).
    fn clear_stencil(
        &self,
        encoder: &mut CommandEncoder,
        color_view: &TextureView,
        depth_view: &TextureView,
    ) {
        encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Stencil Clear Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                }),
                stencil_ops: Some(Operations {
                    load: LoadOp::Clear(0),
                    store: StoreOp::Store,
                }),
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
    }
}
