/// WGSL shader for the shaded scene pass. Every scene mesh carries this
/// material; its only animated input is the time uniform.
pub const SHADED_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    time: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: SceneUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    let diffuse = max(dot(in.world_normal, light_dir), 0.0);
    let lighting = 0.3 + diffuse * 0.7;

    // Bands drift along world y with time.
    let bands = 0.5 + 0.5 * sin(in.world_pos.y * 12.0 + uniforms.time * 2.0);
    let base = mix(vec3<f32>(0.82, 0.28, 0.24), vec3<f32>(0.95, 0.78, 0.32), bands);
    return vec4<f32>(base * lighting, 1.0);
}
"#;

/// WGSL shader for the full-screen pixel/shift post-process pass.
///
/// Snaps UVs to cells of `pixel_size` physical pixels, then chromatically
/// shifts the samples along the lagged pointer velocity. Scroll progress
/// deepens the shift.
pub const PIXEL_SHIFT_SHADER: &str = r#"
struct PostUniforms {
    resolution: vec2<f32>,
    mouse: vec2<f32>,
    mouse_speed: vec2<f32>,
    time: f32,
    pixel_size: f32,
    scroll_ratio: f32,
    _pad: f32,
};

@group(0) @binding(0) var t_diffuse: texture_2d<f32>;
@group(0) @binding(1) var s_diffuse: sampler;
@group(0) @binding(2) var<uniform> post: PostUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) pos: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(pos, 0.0, 1.0);
    out.uv = vec2<f32>(0.5 * (pos.x + 1.0), 0.5 * (1.0 - pos.y));
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let cell = max(post.pixel_size, 1.0) / post.resolution;
    let snapped = (floor(in.uv / cell) + 0.5) * cell;

    // Shift strength follows the lagged pointer velocity; scroll deepens it.
    let drive = 1.0 + clamp(post.scroll_ratio, 0.0, 1.0);
    let shift = post.mouse_speed * 0.4 * drive;

    // Mild time wobble near the pointer keeps still frames alive.
    let d = distance(in.uv, post.mouse);
    let wobble = 0.002 * sin(post.time * 3.0) * exp(-6.0 * d);
    let ofs = shift + vec2<f32>(wobble, -wobble);

    let cr = textureSample(t_diffuse, s_diffuse, snapped + ofs);
    let cgb = textureSample(t_diffuse, s_diffuse, snapped - ofs);
    return vec4<f32>(cr.r, cgb.g, cgb.b, 1.0);
}
"#;
