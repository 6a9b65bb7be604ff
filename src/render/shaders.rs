//! Embedded WGSL sources. One scene shader serves both the ambient and
//! the illumination pass (the uniforms select the contribution); the
//! volume shader does the w=0 extrusion trick for shadow volumes.

/// Base geometry shader. The ambient pass sets `light_color` to zero
/// and relies on the `ambient` term; the illumination pass does the
/// opposite and is blended additively by the pipeline.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    ambient: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var mesh_texture: texture_2d<f32>;

@group(1) @binding(1)
var mesh_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) world_pos: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    let world_pos = uniforms.model * vec4<f32>(input.position, 1.0);
    output.clip_position = uniforms.view_proj * world_pos;
    output.normal = (uniforms.model * vec4<f32>(input.normal, 0.0)).xyz;
    output.uv = input.uv;
    output.world_pos = world_pos.xyz;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    var light_dir: vec3<f32>;
    if (uniforms.light_pos.w != 0.0) {
        light_dir = normalize(uniforms.light_pos.xyz - input.world_pos);
    } else {
        // Directional: xyz is the travel direction of the rays, so
        // toward the light is its negation.
        light_dir = normalize(-uniforms.light_pos.xyz);
    }

    let n = normalize(input.normal);
    let diffuse = uniforms.light_color.rgb * max(dot(n, light_dir), 0.0);
    let tex = textureSample(mesh_texture, mesh_sampler, input.uv).rgb;

    let color = tex * (vec3<f32>(uniforms.ambient) + diffuse);
    return vec4<f32>(color, 1.0);
}
"#;

/// Shadow-volume shader. Vertices from the extruded half of the buffer
/// carry `w == 0`; those get projected away from the light. For a
/// point light (`light_pos.w != 0`) the extruded position is the
/// direction from the light through the vertex, at infinity; for a
/// directional light every extruded vertex collapses onto the same
/// point at infinity along the rays' travel direction. The light
/// position uniform is in the caster's local space.
pub const VOLUME_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    light_pos: vec4<f32>,
    color: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec4<f32>) -> @builtin(position) vec4<f32> {
    var p = position;
    if (p.w == 0.0) {
        if (uniforms.light_pos.w != 0.0) {
            p = vec4<f32>(p.xyz * uniforms.light_pos.w - uniforms.light_pos.xyz, 0.0);
        } else {
            p = vec4<f32>(uniforms.light_pos.xyz, 0.0);
        }
    }
    return uniforms.view_proj * (uniforms.model * p);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return uniforms.color;
}
"#;
