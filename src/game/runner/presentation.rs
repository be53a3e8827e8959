// How the player is drawn: an animated skinned mesh, or a placeholder
// capsule when the loader had no mesh. Chosen once at construction.

use std::f32::consts::PI;

use glam::{Affine3A, Quat, Vec2, Vec3};

use super::animation::{AnimationBackend, AnimationSet, ClipFinished};
use super::config::RunnerConfig;
use super::mixer::ClipMixer;
use super::pose::Pose;
use crate::core::{Aabb, Capsule};
use crate::engine::assets::SkinnedMesh;

#[derive(Debug)]
pub enum Presentation<B: AnimationBackend = ClipMixer> {
    /// Skinned mesh driven by blended clips
    Animated {
        mesh: SkinnedMesh,
        animations: AnimationSet<B>,
    },
    /// Static capsule, no animation support
    Placeholder { capsule: Capsule },
}

impl<B: AnimationBackend> Presentation<B> {
    pub fn animated(mesh: SkinnedMesh, animations: AnimationSet<B>) -> Self {
        Self::Animated { mesh, animations }
    }

    /// Capsule standing on the model origin
    pub fn placeholder(config: &RunnerConfig) -> Self {
        Self::Placeholder {
            capsule: Capsule::upright(
                Vec3::ZERO,
                config.placeholder_radius,
                config.placeholder_height,
            ),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    pub fn animations(&self) -> Option<&AnimationSet<B>> {
        match self {
            Self::Animated { animations, .. } => Some(animations),
            Self::Placeholder { .. } => None,
        }
    }

    /// Pose currently driving the mesh; `None` for the placeholder
    pub fn active_pose(&self) -> Option<Pose> {
        self.animations().map(AnimationSet::active_pose)
    }

    /// Forward a pose request. Returns `true` if a crossfade started.
    pub fn request_pose(&mut self, pose: Pose) -> bool {
        match self {
            Self::Animated { animations, .. } => animations.request_pose(pose),
            Self::Placeholder { .. } => false,
        }
    }

    pub fn hard_cut(&mut self, pose: Pose) {
        if let Self::Animated { animations, .. } = self {
            animations.hard_cut(pose);
        }
    }

    /// Advance clip playback and collect completion events
    pub fn advance(&mut self, dt: f32) -> &[ClipFinished] {
        match self {
            Self::Animated { animations, .. } => animations.advance(dt),
            Self::Placeholder { .. } => &[],
        }
    }

    /// Extent of the rendered geometry in model space
    pub fn local_bounds(&self) -> Aabb {
        match self {
            Self::Animated { mesh, animations } => animations.rendered_extent(mesh.bind_bounds),
            Self::Placeholder { capsule } => capsule.aabb(),
        }
    }

    /// Model-to-world transform for a character at `position` (x lateral, y height).
    ///
    /// The skinned mesh is authored facing the camera, so it is turned half
    /// way round to run down the track.
    pub fn model_transform(&self, config: &RunnerConfig, position: Vec2) -> Affine3A {
        let translation = Vec3::new(position.x, position.y, 0.0);
        match self {
            Self::Animated { .. } => Affine3A::from_scale_rotation_translation(
                Vec3::splat(config.model_scale),
                Quat::from_rotation_y(PI),
                translation,
            ),
            Self::Placeholder { .. } => Affine3A::from_translation(translation),
        }
    }
}
