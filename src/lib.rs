pub mod config;
pub mod events;
pub mod evolve;
pub mod game;
pub mod grid;
pub mod input;
pub mod menu;
pub mod render;
pub mod seed;
pub mod speed;
pub mod stability;

/// Rows of the field
pub const HEIGHT: usize = 25;

/// Columns of the field
pub const WIDTH: usize = 80;
