use crate::camera::OrbitCamera;
use glam::{Mat4, Vec3};
use pixelshift_assets::{LoadedModel, MeshData};
use pixelshift_common::Viewport;

/// Uniform scale applied to an adopted model.
const MODEL_SCALE: f32 = 0.5;

/// A mesh adopted into the scene, re-centered and carrying the shaded
/// time-uniform material.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub data: MeshData,
    /// Bounding-box center that was subtracted from the vertex positions.
    pub center: Vec3,
}

/// Owns the camera and the loaded model.
///
/// Model adoption happens at most once per load: each mesh is re-centered
/// about its bounding-box center and marked as shaded. The composer never
/// touches the GPU; the render backend uploads from it.
#[derive(Debug)]
pub struct SceneComposer {
    pub camera: OrbitCamera,
    meshes: Vec<SceneMesh>,
    scale: f32,
}

impl SceneComposer {
    pub fn new(viewport: Viewport) -> Self {
        let mut camera = OrbitCamera::default();
        camera.set_aspect(viewport.width, viewport.height);
        Self {
            camera,
            meshes: Vec::new(),
            scale: MODEL_SCALE,
        }
    }

    /// Adopt a loaded model into the scene.
    ///
    /// Consumes the model, so re-centering and material assignment happen
    /// exactly once per mesh.
    pub fn adopt_model(&mut self, model: LoadedModel) {
        for mut data in model.meshes {
            let center = bounding_center(&data.positions);
            for p in &mut data.positions {
                p[0] -= center.x;
                p[1] -= center.y;
                p[2] -= center.z;
            }
            self.meshes.push(SceneMesh { data, center });
        }
        tracing::info!(meshes = self.meshes.len(), "model adopted into scene");
    }

    /// Meshes currently in the scene.
    pub fn meshes(&self) -> &[SceneMesh] {
        &self.meshes
    }

    pub fn has_model(&self) -> bool {
        !self.meshes.is_empty()
    }

    /// Uniform model scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Model matrix for every scene mesh.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale))
    }

    /// Viewport changed; recompute the camera projection inputs.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.width, viewport.height);
    }
}

fn bounding_center(positions: &[[f32; 3]]) -> Vec3 {
    if positions.is_empty() {
        return Vec3::ZERO;
    }
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for p in positions {
        let v = Vec3::from_array(*p);
        min = min.min(v);
        max = max.max(v);
    }
    (min + max) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn off_center_model() -> LoadedModel {
        LoadedModel {
            meshes: vec![MeshData {
                name: "cube_0".into(),
                positions: vec![[9.0, 9.0, 9.0], [11.0, 11.0, 11.0]],
                normals: vec![[0.0, 1.0, 0.0]; 2],
                indices: vec![0, 1, 0],
            }],
        }
    }

    #[test]
    fn adoption_recenters_each_mesh() {
        let mut composer = SceneComposer::new(Viewport::new(800, 600));
        composer.adopt_model(off_center_model());

        let mesh = &composer.meshes()[0];
        assert_eq!(mesh.center, Vec3::splat(10.0));
        let recentered = bounding_center(&mesh.data.positions);
        assert!(recentered.length() < 1e-6);
    }

    #[test]
    fn adopted_model_is_half_scale() {
        let mut composer = SceneComposer::new(Viewport::new(800, 600));
        composer.adopt_model(off_center_model());
        assert_eq!(composer.scale(), 0.5);
        let m = composer.model_matrix();
        assert_eq!(m.transform_vector3(Vec3::ONE), Vec3::splat(0.5));
    }

    #[test]
    fn empty_scene_before_adoption() {
        let composer = SceneComposer::new(Viewport::new(800, 600));
        assert!(!composer.has_model());
        assert!(composer.meshes().is_empty());
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut composer = SceneComposer::new(Viewport::new(800, 600));
        composer.resize(Viewport::new(1920, 1080));
        assert!((composer.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
