// Data handed over by the asset loader

use std::collections::HashMap;

use super::AssetError;
use crate::core::Aabb;

/// A skinned character mesh, reduced to what the controller needs
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    pub name: String,
    /// Model-space bounds of the bind pose
    pub bind_bounds: Aabb,
}

impl SkinnedMesh {
    pub fn new(name: &str, bind_bounds: Aabb) -> Self {
        Self {
            name: name.to_string(),
            bind_bounds,
        }
    }
}

/// A single skeletal animation clip
#[derive(Debug, Clone)]
pub struct ClipAsset {
    /// Name of the clip as exported (e.g., "run", "jump")
    pub name: String,
    /// Length of one play-through in seconds
    pub duration: f32,
    /// Model-space envelope of the mesh while this clip plays, if known
    pub extent: Option<Aabb>,
}

impl ClipAsset {
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration,
            extent: None,
        }
    }

    /// Attach the model-space envelope of this pose
    pub fn with_extent(mut self, extent: Aabb) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Reject clips the mixer cannot play
    pub fn validate(&self) -> Result<(), AssetError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(AssetError::InvalidClip {
                name: self.name.clone(),
                reason: format!("duration must be finite and >= 0, got {}", self.duration),
            });
        }
        Ok(())
    }
}

/// Everything the loader produced for the player character
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    /// The character mesh; `None` selects the placeholder capsule
    pub mesh: Option<SkinnedMesh>,
    clips: HashMap<String, ClipAsset>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mesh(mut self, mesh: SkinnedMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Register a clip under a pose name, replacing any previous one
    pub fn with_clip(mut self, pose_name: &str, clip: ClipAsset) -> Self {
        self.insert_clip(pose_name, clip);
        self
    }

    pub fn insert_clip(&mut self, pose_name: &str, clip: ClipAsset) {
        self.clips.insert(pose_name.to_string(), clip);
    }

    pub fn clip(&self, pose_name: &str) -> Option<&ClipAsset> {
        self.clips.get(pose_name)
    }

    /// Names of all registered clips
    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}
