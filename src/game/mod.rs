// Game-side modules

pub mod runner;
