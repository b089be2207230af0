//! Background model loading.
//!
//! A worker thread reads and parses a binary glTF (GLB) file and delivers
//! events over a channel: zero or more `Progress`, then exactly one of
//! `Complete` or `Failed`. The render loop polls the channel without
//! blocking, so the completion hand-off is atomic from its perspective.
//!
//! # Invariants
//! - Exactly one terminal event per load; the sender drops afterwards.
//! - Parsing happens off the render path.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

/// Errors from model loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("glTF import error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("model contains no triangle meshes")]
    EmptyModel,
}

/// CPU-side mesh data extracted from one glTF primitive.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// The parsed scene graph, flattened to its meshes.
#[derive(Debug, Clone, Default)]
pub struct LoadedModel {
    pub meshes: Vec<MeshData>,
}

/// Events delivered by the loader worker.
#[derive(Debug)]
pub enum LoadEvent {
    /// Bytes read from disk, sent before parsing begins.
    Progress { bytes: u64 },
    Complete(LoadedModel),
    Failed(AssetError),
}

/// Handle to an in-flight background load.
pub struct ModelLoader {
    rx: Receiver<LoadEvent>,
}

impl ModelLoader {
    /// Spawn a worker that reads and parses the GLB at `path`.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = channel();
        thread::spawn(move || {
            let terminal = match load_blocking(&path, &tx) {
                Ok(model) => LoadEvent::Complete(model),
                Err(e) => LoadEvent::Failed(e),
            };
            // The receiver may already be gone on teardown.
            let _ = tx.send(terminal);
        });
        Self { rx }
    }

    /// Non-blocking poll, intended to run once per render tick.
    pub fn poll(&self) -> Option<LoadEvent> {
        self.rx.try_recv().ok()
    }
}

/// Read and parse a GLB file, reporting read progress on `events`.
pub fn load_blocking(path: &Path, events: &Sender<LoadEvent>) -> Result<LoadedModel, AssetError> {
    let bytes = std::fs::read(path)?;
    let _ = events.send(LoadEvent::Progress {
        bytes: bytes.len() as u64,
    });
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "model read from disk");
    parse_glb(&bytes)
}

/// Parse GLB bytes into flat mesh data.
pub fn parse_glb(bytes: &[u8]) -> Result<LoadedModel, AssetError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let name = mesh.name().unwrap_or("unnamed");
        for (i, primitive) in mesh.primitives().enumerate() {
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(normals) => normals.collect(),
                None => vec![[0.0, 0.0, 1.0]; positions.len()],
            };
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            meshes.push(MeshData {
                name: format!("{name}_{i}"),
                positions,
                normals,
                indices,
            });
        }
    }

    if meshes.is_empty() {
        return Err(AssetError::EmptyModel);
    }
    tracing::info!(meshes = meshes.len(), "model parsed");
    Ok(LoadedModel { meshes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    /// Minimal valid GLB container holding only the given JSON chunk.
    fn glb_with_json(json: &str) -> Vec<u8> {
        let mut chunk = json.as_bytes().to_vec();
        while chunk.len() % 4 != 0 {
            chunk.push(b' ');
        }
        let total = 12 + 8 + chunk.len() as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&total.to_le_bytes());
        out.extend_from_slice(&(chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&chunk);
        out
    }

    fn poll_until_terminal(loader: &ModelLoader) -> LoadEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match loader.poll() {
                Some(ev @ (LoadEvent::Complete(_) | LoadEvent::Failed(_))) => return ev,
                Some(LoadEvent::Progress { .. }) => {}
                None => {
                    assert!(Instant::now() < deadline, "loader never finished");
                    thread::sleep(Duration::from_millis(1));
                }
            }
        }
    }

    #[test]
    fn meshless_model_is_rejected() {
        let glb = glb_with_json(r#"{"asset":{"version":"2.0"}}"#);
        let err = parse_glb(&glb).unwrap_err();
        assert!(matches!(err, AssetError::EmptyModel));
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let err = parse_glb(b"not a model").unwrap_err();
        assert!(matches!(err, AssetError::Gltf(_)));
    }

    #[test]
    fn missing_file_delivers_failed_exactly_once() {
        let loader = ModelLoader::spawn("/nonexistent/model.glb");
        let ev = poll_until_terminal(&loader);
        assert!(matches!(ev, LoadEvent::Failed(AssetError::Io(_))));
        // The worker hangs up after its terminal event.
        thread::sleep(Duration::from_millis(10));
        assert!(loader.poll().is_none());
    }
}
