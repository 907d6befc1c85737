//! WGSL sources for the three render pipelines.
//!
//! Fade and blit cover the screen with a single oversized triangle built from
//! `vertex_index`; neither needs a vertex buffer.

/// How far the glow halo reaches, in multiples of the core radius.
pub const GLOW_EXTENT: f32 = 4.0;

/// Lays translucent black over the trail texture.
///
/// `fade.a` is the overlay opacity; `fade.rgb` stays black.
pub const FADE_SHADER: &str = r#"
@group(0) @binding(0)
var<uniform> fade: vec4<f32>;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> @builtin(position) vec4<f32> {
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(3.0, -1.0),
        vec2<f32>(-1.0, 3.0),
    );
    return vec4<f32>(positions[vertex_index], 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return fade;
}
"#;

/// Instanced glow discs.
///
/// Each instance is a screen-space quad around the particle. The fragment
/// stage draws a solid core of the particle radius and an exponential halo
/// out to `screen.glow` radii.
pub const GLOW_SHADER: &str = r#"
struct Screen {
    size: vec2<f32>,
    glow: f32,
    _padding: f32,
};

@group(0) @binding(0)
var<uniform> screen: Screen;

struct Instance {
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) alpha: f32,
    @location(3) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) offset: vec2<f32>,
    @location(1) color: vec3<f32>,
    @location(2) alpha: f32,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32, instance: Instance) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    let corner = corners[vertex_index];
    let pixel = instance.center + corner * instance.radius * screen.glow;
    let ndc = vec2<f32>(
        pixel.x / screen.size.x * 2.0 - 1.0,
        1.0 - pixel.y / screen.size.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.offset = corner * screen.glow;
    out.color = instance.color;
    out.alpha = instance.alpha;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.offset);
    if dist > screen.glow {
        discard;
    }
    let core = 1.0 - smoothstep(0.8, 1.0, dist);
    let halo = exp(-dist * dist * 0.5) * 0.5;
    let alpha = clamp(max(core, halo) * in.alpha, 0.0, 1.0);
    return vec4<f32>(in.color, alpha);
}
"#;

/// Copies the trail texture onto the surface.
pub const BLIT_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@group(0) @binding(0)
var trail: texture_2d<f32>;
@group(0) @binding(1)
var trail_sampler: sampler;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(3.0, -1.0),
        vec2<f32>(-1.0, 3.0),
    );
    var uvs = array<vec2<f32>, 3>(
        vec2<f32>(0.0, 1.0),
        vec2<f32>(2.0, 1.0),
        vec2<f32>(0.0, -1.0),
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(positions[vertex_index], 0.0, 1.0);
    out.uv = uvs[vertex_index];
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(trail, trail_sampler, in.uv);
}
"#;
