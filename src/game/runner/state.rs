// Runner state machine and kinematics
//
// The machine owns every piece of logical player state. Transitions return
// the pose they want shown; the caller forwards that request to the
// presentation layer, so this module never touches animation directly.

use glam::Vec2;

use super::config::RunnerConfig;
use super::lane::{Lane, LaneDirection};
use super::pose::Pose;
use crate::core::math::damp;

/// Represents the current state of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunnerState {
    /// On the ground, default locomotion
    #[default]
    Running,
    /// Airborne on a jump arc
    Jumping,
    /// Sliding under an obstacle until the roll timer runs out
    Rolling,
    /// Terminal until reset
    Dead,
}

impl RunnerState {
    pub fn is_alive(self) -> bool {
        self != Self::Dead
    }

    /// Jumps and rolls only start from a plain run
    pub fn can_start_move(self) -> bool {
        self == Self::Running
    }

    /// The lane target follows input in every living state
    pub fn can_change_lane(self) -> bool {
        self.is_alive()
    }

    /// Strafe poses never override a jump or roll
    pub fn shows_strafe(self) -> bool {
        self == Self::Running
    }

    /// Only a plain run lets a finished clip pull the pose back to run
    pub fn accepts_clip_feedback(self) -> bool {
        self == Self::Running
    }
}

/// Whether a clip that just finished should send the pose back to run.
///
/// Judged against the live state, not against which clip ended: a strafe
/// finishing mid-jump must not cut the jump pose.
pub fn returns_to_run(state: RunnerState, finished: Pose) -> bool {
    finished != Pose::Die && state.accepts_clip_feedback()
}

/// State machine that handles runner transitions and motion
#[derive(Debug, Clone)]
pub struct RunnerStateMachine {
    config: RunnerConfig,
    current_state: RunnerState,
    lane: Lane,
    vertical_velocity: f32,
    roll_timer: f32,
    /// Lateral (x) and vertical (y) offset of the rendered character
    position: Vec2,
}

impl RunnerStateMachine {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            current_state: RunnerState::Running,
            lane: Lane::CENTER,
            vertical_velocity: 0.0,
            roll_timer: 0.0,
            position: Vec2::new(0.0, config.ground_level),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn state(&self) -> RunnerState {
        self.current_state
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn roll_timer(&self) -> f32 {
        self.roll_timer
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Lateral offset the character is easing toward
    pub fn target_offset(&self) -> f32 {
        self.lane.offset(self.config.lane_width)
    }

    fn transition(&mut self, new_state: RunnerState) {
        if self.current_state != new_state {
            log::debug!("Runner state {:?} -> {:?}", self.current_state, new_state);
            self.current_state = new_state;
        }
    }

    /// Start a jump; only from a plain run
    pub fn jump(&mut self) -> Option<Pose> {
        if !self.current_state.can_start_move() {
            return None;
        }
        self.transition(RunnerState::Jumping);
        self.vertical_velocity = self.config.jump_strength;
        Some(Pose::Jump)
    }

    /// Start a roll; only from a plain run
    pub fn roll(&mut self) -> Option<Pose> {
        if !self.current_state.can_start_move() {
            return None;
        }
        self.transition(RunnerState::Rolling);
        self.roll_timer = self.config.roll_duration;
        Some(Pose::Roll)
    }

    /// Move the lane target one step; the strafe pose is only requested
    /// while running
    pub fn strafe(&mut self, direction: LaneDirection) -> Option<Pose> {
        if !self.current_state.can_change_lane() {
            return None;
        }
        let from = self.lane;
        self.lane = from.shifted(direction);
        if self.lane != from {
            log::debug!("Lane {} -> {}", from.index(), self.lane.index());
        }

        self.current_state
            .shows_strafe()
            .then(|| Pose::strafe(direction))
    }

    /// Enter the terminal state from anywhere
    pub fn die(&mut self) -> Option<Pose> {
        self.transition(RunnerState::Dead);
        self.vertical_velocity = 0.0;
        self.roll_timer = 0.0;
        Some(Pose::Die)
    }

    /// Advance lane easing and the jump or roll by `dt` seconds
    pub fn update(&mut self, dt: f32) -> Option<Pose> {
        let dt = dt.max(0.0);
        if self.current_state == RunnerState::Dead {
            return None;
        }

        self.position.x = damp(
            self.position.x,
            self.target_offset(),
            self.config.lateral_smoothing,
            dt,
        );

        match self.current_state {
            RunnerState::Jumping => self.integrate_jump(dt),
            RunnerState::Rolling => self.count_down_roll(dt),
            RunnerState::Running | RunnerState::Dead => None,
        }
    }

    fn integrate_jump(&mut self, dt: f32) -> Option<Pose> {
        self.position.y += self.vertical_velocity * dt;
        self.vertical_velocity += self.config.gravity * dt;

        let ground = self.config.ground_level;
        if self.position.y <= ground && self.vertical_velocity <= 0.0 {
            self.position.y = ground;
            self.vertical_velocity = 0.0;
            self.transition(RunnerState::Running);
            return Some(Pose::Run);
        }
        None
    }

    fn count_down_roll(&mut self, dt: f32) -> Option<Pose> {
        self.roll_timer -= dt;
        if self.roll_timer <= 0.0 {
            self.roll_timer = 0.0;
            self.transition(RunnerState::Running);
            return Some(Pose::Run);
        }
        None
    }

    /// Feedback from the presentation layer when a play-once clip ends
    pub fn on_clip_finished(&mut self, finished: Pose) -> Option<Pose> {
        if returns_to_run(self.current_state, finished) {
            Some(Pose::Run)
        } else {
            log::debug!(
                "Ignoring end of `{}` clip while {:?}",
                finished,
                self.current_state
            );
            None
        }
    }

    /// Back to a fresh run in the centre lane
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn machine() -> RunnerStateMachine {
        RunnerStateMachine::new(RunnerConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let sm = machine();
        assert_eq!(sm.state(), RunnerState::Running);
        assert_eq!(sm.lane(), Lane::CENTER);
        assert_eq!(sm.vertical_velocity(), 0.0);
        assert_eq!(sm.roll_timer(), 0.0);
        assert_eq!(sm.position(), Vec2::ZERO);
    }

    #[test]
    fn test_jump_transition() {
        let mut sm = machine();
        assert_eq!(sm.jump(), Some(Pose::Jump));
        assert_eq!(sm.state(), RunnerState::Jumping);
        let strength = RunnerConfig::default().jump_strength;
        assert_eq!(sm.vertical_velocity(), strength);
    }

    #[test]
    fn test_jump_only_from_running() {
        let mut sm = machine();
        sm.roll();
        assert_eq!(sm.jump(), None);
        assert_eq!(sm.state(), RunnerState::Rolling);

        let mut sm = machine();
        sm.jump();
        sm.update(0.05);
        let velocity = sm.vertical_velocity();
        assert_eq!(sm.jump(), None);
        assert_eq!(sm.vertical_velocity(), velocity);
    }

    #[test]
    fn test_jump_lands_in_finite_time() {
        let config = RunnerConfig::default().with_jump(10.0, -30.0);
        let mut sm = RunnerStateMachine::new(config);
        sm.jump();

        let dt = 1.0 / 60.0;
        let mut landed = None;
        let mut max_height: f32 = 0.0;
        for frame in 0..600 {
            let pose = sm.update(dt);
            max_height = max_height.max(sm.position().y);
            if pose == Some(Pose::Run) {
                landed = Some(frame);
                break;
            }
        }

        assert!(landed.is_some(), "jump never landed");
        assert!(max_height > 1.0);
        assert_eq!(sm.state(), RunnerState::Running);
        assert_eq!(sm.position().y, 0.0);
        assert_eq!(sm.vertical_velocity(), 0.0);
        // Analytic flight time is 2v/|g| = 0.667s, about 40 frames
        let frames = landed.unwrap_or_default();
        assert!((38..=42).contains(&frames), "landed after {frames} frames");
    }

    #[test]
    fn test_any_jump_comes_back_down() {
        let dt = 1.0 / 60.0;
        for (strength, gravity) in [(0.001, -1000.0), (50.0, -0.5), (1.0, -9.8)] {
            let config = RunnerConfig::default().with_jump(strength, gravity);
            let mut sm = RunnerStateMachine::new(config);
            sm.jump();

            let mut frames = 0;
            while sm.state() == RunnerState::Jumping && frames < 100_000 {
                sm.update(dt);
                frames += 1;
            }
            assert_eq!(
                sm.state(),
                RunnerState::Running,
                "jump ({strength}, {gravity}) never landed"
            );
            assert_eq!(sm.position().y, 0.0);
            assert_eq!(sm.vertical_velocity(), 0.0);
        }
    }

    #[test]
    fn test_zero_dt_does_not_land_jump() {
        let mut sm = machine();
        sm.jump();
        assert_eq!(sm.update(0.0), None);
        assert_eq!(sm.state(), RunnerState::Jumping);
    }

    #[test]
    fn test_roll_returns_to_running_once() {
        let config = RunnerConfig::default().with_roll_duration(1.0);
        let mut sm = RunnerStateMachine::new(config);
        assert_eq!(sm.roll(), Some(Pose::Roll));
        assert_eq!(sm.roll_timer(), 1.0);

        let mut returns = 0;
        for _ in 0..8 {
            if sm.update(0.25) == Some(Pose::Run) {
                returns += 1;
            }
        }
        assert_eq!(returns, 1);
        assert_eq!(sm.state(), RunnerState::Running);
        assert_eq!(sm.roll_timer(), 0.0);
    }

    #[test]
    fn test_roll_not_finished_early() {
        let config = RunnerConfig::default().with_roll_duration(1.0);
        let mut sm = RunnerStateMachine::new(config);
        sm.roll();
        for _ in 0..3 {
            assert_eq!(sm.update(0.25), None);
        }
        assert_eq!(sm.state(), RunnerState::Rolling);
        assert_relative_eq!(sm.roll_timer(), 0.25);
        assert_eq!(sm.update(0.25), Some(Pose::Run));
    }

    #[test]
    fn test_lane_stays_in_range() {
        let mut sm = machine();
        assert_eq!(sm.strafe(LaneDirection::Left), Some(Pose::StrafeLeft));
        assert_eq!(sm.lane(), Lane::LEFT);
        sm.strafe(LaneDirection::Left);
        assert_eq!(sm.lane(), Lane::LEFT);

        for _ in 0..5 {
            sm.strafe(LaneDirection::Right);
        }
        assert_eq!(sm.lane(), Lane::RIGHT);
    }

    #[test]
    fn test_strafe_while_airborne_moves_lane_without_pose() {
        let mut sm = machine();
        sm.jump();
        assert_eq!(sm.strafe(LaneDirection::Right), None);
        assert_eq!(sm.lane(), Lane::RIGHT);

        let mut sm = machine();
        sm.roll();
        assert_eq!(sm.strafe(LaneDirection::Left), None);
        assert_eq!(sm.lane(), Lane::LEFT);
    }

    #[test]
    fn test_lateral_position_eases_toward_lane() {
        let mut sm = machine();
        sm.strafe(LaneDirection::Right);

        sm.update(0.01);
        let first = sm.position().x;
        assert!(first > 0.0 && first < sm.target_offset());

        for _ in 0..300 {
            sm.update(1.0 / 60.0);
        }
        assert_relative_eq!(sm.position().x, 2.5, epsilon = 1e-3);
    }

    #[test]
    fn test_jump_mid_lane_change() {
        let mut sm = machine();
        sm.strafe(LaneDirection::Left);
        sm.update(0.02);
        assert!(sm.position().x != sm.target_offset());

        assert_eq!(sm.jump(), Some(Pose::Jump));
        assert_eq!(sm.state(), RunnerState::Jumping);
        let strength = RunnerConfig::default().jump_strength;
        assert_eq!(sm.vertical_velocity(), strength);
    }

    #[test]
    fn test_dead_is_absorbing() {
        let mut sm = machine();
        assert_eq!(sm.die(), Some(Pose::Die));

        assert_eq!(sm.jump(), None);
        assert_eq!(sm.roll(), None);
        assert_eq!(sm.strafe(LaneDirection::Left), None);
        sm.die();
        for _ in 0..100 {
            assert_eq!(sm.update(0.1), None);
        }
        assert_eq!(sm.state(), RunnerState::Dead);
        assert_eq!(sm.lane(), Lane::CENTER);
    }

    #[test]
    fn test_die_while_rolling_stops_countdown() {
        let mut sm = machine();
        sm.roll();
        sm.update(0.1);
        sm.die();
        assert_eq!(sm.roll_timer(), 0.0);

        for _ in 0..20 {
            assert_eq!(sm.update(0.1), None);
        }
        assert_eq!(sm.state(), RunnerState::Dead);
    }

    #[test]
    fn test_die_mid_air_freezes_height() {
        let mut sm = machine();
        sm.jump();
        sm.update(0.1);
        let height = sm.position().y;
        sm.die();
        sm.update(0.5);
        assert_eq!(sm.position().y, height);
        assert_eq!(sm.vertical_velocity(), 0.0);
    }

    #[test]
    fn test_clip_feedback_gated_on_running() {
        assert!(returns_to_run(RunnerState::Running, Pose::StrafeLeft));
        assert!(returns_to_run(RunnerState::Running, Pose::Jump));
        assert!(!returns_to_run(RunnerState::Running, Pose::Die));
        assert!(!returns_to_run(RunnerState::Jumping, Pose::StrafeLeft));
        assert!(!returns_to_run(RunnerState::Rolling, Pose::StrafeRight));
        assert!(!returns_to_run(RunnerState::Dead, Pose::Roll));
    }

    #[test]
    fn test_on_clip_finished() {
        let mut sm = machine();
        assert_eq!(sm.on_clip_finished(Pose::StrafeLeft), Some(Pose::Run));

        sm.jump();
        assert_eq!(sm.on_clip_finished(Pose::StrafeLeft), None);
        assert_eq!(sm.state(), RunnerState::Jumping);
    }

    #[test]
    fn test_reset_from_any_state() {
        for setup in [
            RunnerStateMachine::jump as fn(&mut RunnerStateMachine) -> Option<Pose>,
            RunnerStateMachine::roll,
            RunnerStateMachine::die,
        ] {
            let mut sm = machine();
            sm.strafe(LaneDirection::Right);
            setup(&mut sm);
            sm.update(0.1);
            sm.reset();

            assert_eq!(sm.state(), RunnerState::Running);
            assert_eq!(sm.lane(), Lane::CENTER);
            assert_eq!(sm.vertical_velocity(), 0.0);
            assert_eq!(sm.roll_timer(), 0.0);
            assert_eq!(sm.position(), Vec2::ZERO);
        }
    }
}
