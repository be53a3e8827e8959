// Engine modules: frame timing, input, asset bundle types

pub mod assets;
pub mod game_loop;
pub mod input;
