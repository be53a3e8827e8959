// Named poses and clip playback policies

use super::lane::LaneDirection;

/// A named animation clip representing one visual behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Run,
    Jump,
    Die,
    Roll,
    StrafeLeft,
    StrafeRight,
}

/// How a clip behaves when it reaches its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap around and keep playing
    Repeat,
    /// Stop after one play-through and report completion
    Once,
}

/// Requested name is not part of the pose set
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown pose `{0}`")]
pub struct UnknownPose(pub String);

impl Pose {
    pub const COUNT: usize = 6;

    pub const ALL: [Pose; Pose::COUNT] = [
        Pose::Run,
        Pose::Jump,
        Pose::Die,
        Pose::Roll,
        Pose::StrafeLeft,
        Pose::StrafeRight,
    ];

    /// Symbolic name used to look the clip up in an asset bundle
    pub fn name(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Die => "die",
            Self::Roll => "roll",
            Self::StrafeLeft => "strafe_left",
            Self::StrafeRight => "strafe_right",
        }
    }

    pub fn from_name(name: &str) -> Result<Pose, UnknownPose> {
        Self::ALL
            .into_iter()
            .find(|pose| pose.name() == name)
            .ok_or_else(|| UnknownPose(name.to_string()))
    }

    /// Dense index, stable for the lifetime of the program
    pub fn index(self) -> usize {
        self as usize
    }

    /// Strafe pose for a lane change
    pub fn strafe(direction: LaneDirection) -> Pose {
        match direction {
            LaneDirection::Left => Self::StrafeLeft,
            LaneDirection::Right => Self::StrafeRight,
        }
    }

    /// Only the locomotion pose loops
    pub fn loop_mode(self) -> LoopMode {
        match self {
            Self::Run => LoopMode::Repeat,
            _ => LoopMode::Once,
        }
    }

    /// Only death holds its last frame
    pub fn clamps_on_finish(self) -> bool {
        self == Self::Die
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
