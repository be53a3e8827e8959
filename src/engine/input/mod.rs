// Input handling
//
// Keyboard events from winit are translated into semantic runner actions.
// Translation is immediate: an event either maps to an action on the spot
// or is dropped, nothing is buffered between frames.
//
// - `action`: runner actions and the default key bindings
// - `config`: key -> action table and event translation

pub mod action;
pub mod config;

pub use action::Action;
pub use config::InputConfig;
