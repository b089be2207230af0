use glam::{Mat4, Vec3};

/// Orbit camera circling a target point.
///
/// Drag gestures rotate yaw/pitch around the target; the distance stays
/// fixed for the session. Projection parameters follow the scene's framing:
/// a narrow 40 degree field of view with the eye starting 25 units out on
/// the +Z axis.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 25.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 40.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 100.0,
            sensitivity: 0.005,
        }
    }
}

impl OrbitCamera {
    /// Eye position derived from yaw/pitch/distance around the target.
    /// At rest (yaw = pitch = 0) the eye sits on the +Z axis.
    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        );
        self.target + dir * self.distance
    }

    /// Rotate by a drag delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Update the aspect ratio; must run before any render affected by a
    /// resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_is_25_units_out_on_z() {
        let cam = OrbitCamera::default();
        let eye = cam.eye();
        assert!((eye.z - 25.0).abs() < 1e-5);
        assert!(eye.x.abs() < 1e-5);
        assert!(eye.y.abs() < 1e-5);
    }

    #[test]
    fn aspect_follows_resize() {
        let mut cam = OrbitCamera::default();
        cam.set_aspect(800, 600);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 100_000.0);
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn view_projection_is_finite() {
        let mut cam = OrbitCamera::default();
        cam.set_aspect(1280, 720);
        cam.rotate(300.0, -150.0);
        let vp = cam.view_projection();
        for c in 0..4 {
            assert!(vp.col(c).is_finite());
        }
    }
}
