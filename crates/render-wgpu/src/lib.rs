//! wgpu render backend for the pixelshift viewer.
//!
//! Two stages each frame: the shaded scene pass renders every adopted mesh
//! into an offscreen color target, then the pixel/shift post-process pass
//! consumes that target and writes the composite to the surface.
//!
//! # Invariants
//! - The renderer never mutates sketch state; uniforms flow in, pixels out.
//! - The post stage's input texture is bound here, never pushed by the loop.

mod gpu;
mod post;
mod shaders;

pub use gpu::SketchRenderer;
pub use post::{DEFAULT_PIXEL_SIZE, PixelShiftPass, PostUniforms};
