//! Scene composition and the per-frame update loop.
//!
//! # Invariants
//! - The time accumulator advances by a fixed step exactly once per rendered
//!   frame and never resets during a session.
//! - Every mesh of a loaded model is re-centered and given the shaded
//!   material exactly once, at adoption.
//! - A stopped sketch never ticks again.

pub mod camera;
pub mod composer;
pub mod frame;

pub use camera::OrbitCamera;
pub use composer::{SceneComposer, SceneMesh};
pub use frame::{FrameClock, FrameUniforms, Sketch, TIME_STEP};
