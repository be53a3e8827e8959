// Core utilities shared by engine and game code

pub mod math;
pub mod shapes;

pub use shapes::{Aabb, Capsule};
