// Runner character
//
// The player-controlled character of a three-lane endless runner:
// - `config`: tuning constants (lane width, jump, gravity, roll, fades)
// - `lane`: lane indices and lateral offsets
// - `state`: state machine and kinematics, the source of pose requests
// - `pose`: named poses and their playback policies
// - `animation`: backend capability trait, clip set and active-pose policy
// - `mixer`: built-in software clip mixer
// - `presentation`: animated mesh or placeholder capsule
// - `player`: the component tying it all together

pub mod animation;
pub mod config;
pub mod lane;
pub mod mixer;
pub mod player;
pub mod pose;
pub mod presentation;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationBackend, AnimationSet, ClipFinished, ClipSet};
pub use config::{ConfigError, RunnerConfig, BASE_CONFIG};
pub use lane::{Lane, LaneDirection, LANE_COUNT};
pub use mixer::ClipMixer;
pub use player::{Player, PlayerError};
pub use pose::{LoopMode, Pose, UnknownPose};
pub use presentation::Presentation;
pub use state::{returns_to_run, RunnerState, RunnerStateMachine};
