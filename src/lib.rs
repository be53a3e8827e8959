// Lane runner: player controller for a three-lane endless runner
//
// - `core`: math helpers and bounding primitives
// - `engine`: frame clock, input bindings, asset bundle types
// - `game`: the player component (state machine, kinematics, animation)

pub mod core;
pub mod engine;
pub mod game;
