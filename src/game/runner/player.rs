// The runner character: logical state, presentation and bounding volume

use glam::{Affine3A, Vec2};

use super::animation::{AnimationBackend, AnimationSet, ClipSet};
use super::config::{ConfigError, RunnerConfig};
use super::lane::{Lane, LaneDirection};
use super::mixer::ClipMixer;
use super::pose::Pose;
use super::presentation::Presentation;
use super::state::{RunnerState, RunnerStateMachine};
use crate::core::Aabb;
use crate::engine::assets::{AssetBundle, AssetError};
use crate::engine::input::Action;

/// Reasons a player cannot be built
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("invalid runner configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("incomplete player assets: {0}")]
    Asset(#[from] AssetError),
}

/// The player-controlled runner
#[derive(Debug)]
pub struct Player<B: AnimationBackend = ClipMixer> {
    /// Logical state and kinematics
    motion: RunnerStateMachine,
    /// Mesh and clips, or the placeholder
    presentation: Presentation<B>,
    /// Padded world-space box around the rendered geometry
    bounds: Aabb,
}

impl Player<ClipMixer> {
    /// Build a player from loaded assets.
    ///
    /// Without a mesh the placeholder capsule is used. With a mesh, every
    /// pose needs a clip or construction fails.
    pub fn new(config: RunnerConfig, bundle: AssetBundle) -> Result<Self, PlayerError> {
        config.validate()?;

        let presentation = match bundle.mesh.clone() {
            Some(mesh) => {
                let clips = ClipSet::from_bundle(&bundle)?;
                let mixer = ClipMixer::new(&clips);
                Presentation::animated(
                    mesh,
                    AnimationSet::new(clips, mixer, config.crossfade_duration),
                )
            }
            None => {
                log::warn!("No player mesh supplied, using placeholder capsule");
                Presentation::placeholder(&config)
            }
        };
        Self::with_presentation(config, presentation)
    }
}

impl<B: AnimationBackend> Player<B> {
    /// Build a player around an already assembled presentation
    pub fn with_presentation(
        config: RunnerConfig,
        presentation: Presentation<B>,
    ) -> Result<Self, PlayerError> {
        config.validate()?;

        let mut player = Self {
            motion: RunnerStateMachine::new(config),
            presentation,
            bounds: Aabb::default(),
        };
        player.refresh_bounds();
        log::info!(
            "Player created ({})",
            if player.presentation.is_placeholder() {
                "placeholder"
            } else {
                "animated"
            }
        );
        Ok(player)
    }

    pub fn config(&self) -> &RunnerConfig {
        self.motion.config()
    }

    pub fn state(&self) -> RunnerState {
        self.motion.state()
    }

    pub fn state_machine(&self) -> &RunnerStateMachine {
        &self.motion
    }

    pub fn presentation(&self) -> &Presentation<B> {
        &self.presentation
    }

    pub fn is_alive(&self) -> bool {
        self.motion.state().is_alive()
    }

    pub fn lane(&self) -> Lane {
        self.motion.lane()
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.motion.vertical_velocity()
    }

    pub fn roll_timer(&self) -> f32 {
        self.motion.roll_timer()
    }

    /// Lateral and vertical offset of the character
    pub fn position(&self) -> Vec2 {
        self.motion.position()
    }

    /// Pose currently shown; `None` when drawn as a placeholder
    pub fn active_pose(&self) -> Option<Pose> {
        self.presentation.active_pose()
    }

    /// Padded world-space bounding box, for collision queries
    pub fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    /// Model-to-world transform for the renderer
    pub fn world_transform(&self) -> Affine3A {
        self.presentation
            .model_transform(self.motion.config(), self.motion.position())
    }

    /// Apply a translated input action. Returns `true` if it had any effect.
    pub fn handle_action(&mut self, action: Action) -> bool {
        if !self.is_alive() {
            return false;
        }
        match action {
            Action::Jump => self.jump(),
            Action::Roll => self.roll(),
            Action::StrafeLeft => self.strafe(LaneDirection::Left),
            Action::StrafeRight => self.strafe(LaneDirection::Right),
        }
    }

    pub fn jump(&mut self) -> bool {
        let pose = self.motion.jump();
        self.show(pose)
    }

    pub fn roll(&mut self) -> bool {
        let pose = self.motion.roll();
        self.show(pose)
    }

    /// Change the lane target. Accepted in every living state; the strafe
    /// pose only plays while running.
    pub fn strafe(&mut self, direction: LaneDirection) -> bool {
        if !self.motion.state().can_change_lane() {
            return false;
        }
        let pose = self.motion.strafe(direction);
        self.show(pose);
        true
    }

    /// External death request, e.g. from collision handling
    pub fn die(&mut self) {
        if self.is_alive() {
            log::info!("Player died in lane {}", self.lane().index());
        }
        let pose = self.motion.die();
        self.show(pose);
    }

    /// Start a new life: centre lane, grounded, running, with a hard cut to
    /// the run pose
    pub fn reset(&mut self) {
        log::info!("Resetting player");
        self.motion.reset();
        self.presentation.hard_cut(Pose::Run);
        self.refresh_bounds();
    }

    /// Per-frame update.
    ///
    /// Order: advance animation and feed clip completions back through the
    /// state gate, stop if dead, then lane easing and jump or roll, then
    /// the bounding volume.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        let mut feedback = None;
        for finished in self.presentation.advance(dt) {
            feedback = self.motion.on_clip_finished(finished.pose).or(feedback);
        }
        self.show(feedback);

        if !self.is_alive() {
            return;
        }

        let pose = self.motion.update(dt);
        self.show(pose);
        self.refresh_bounds();
    }

    /// Forward a pose request, if any, and keep the bounds in step
    fn show(&mut self, pose: Option<Pose>) -> bool {
        let Some(pose) = pose else {
            return false;
        };
        if self.presentation.request_pose(pose) {
            self.refresh_bounds();
        }
        true
    }

    fn refresh_bounds(&mut self) {
        let transform = self.world_transform();
        self.bounds = self
            .presentation
            .local_bounds()
            .transformed(&transform)
            .expanded(self.motion.config().bounds_margin);
    }
}
