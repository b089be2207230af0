//! Shared types for the pixelshift viewer.
//!
//! # Invariants
//! - Viewport dimensions are physical pixels and never zero.
//! - Normalized pointer coordinates run 0..1 per axis with y flipped so 0 is
//!   the bottom edge.

pub mod viewport;

pub use viewport::Viewport;

/// Linear interpolation between `x` and `y` by factor `a`.
pub fn lerp(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }
}
