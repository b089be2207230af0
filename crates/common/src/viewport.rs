use glam::Vec2;

/// Window content area in physical pixels.
///
/// Mutated on resize; read by the camera for its aspect ratio and by the
/// render targets for their pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport, clamping either dimension to at least one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Aspect ratio, width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Dimensions as a float vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Normalize a raw pointer position to 0..1 per axis.
    ///
    /// The y axis is flipped: y = 0 at the bottom edge, matching the
    /// coordinate convention the shaders expect.
    pub fn normalize_pointer(&self, x_px: f32, y_px: f32) -> Vec2 {
        Vec2::new(
            x_px / self.width as f32,
            (self.height as f32 - y_px) / self.height as f32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_800_by_600() {
        let vp = Viewport::new(800, 600);
        assert!((vp.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let vp = Viewport::new(0, 0);
        assert_eq!(vp.width, 1);
        assert_eq!(vp.height, 1);
        assert!(vp.aspect().is_finite());
    }

    #[test]
    fn pointer_normalization_flips_y() {
        let vp = Viewport::new(800, 600);
        let p = vp.normalize_pointer(400.0, 300.0);
        assert_eq!(p, Vec2::new(0.5, 0.5));

        // Top-left corner maps to (0, 1).
        let corner = vp.normalize_pointer(0.0, 0.0);
        assert_eq!(corner, Vec2::new(0.0, 1.0));
    }
}
