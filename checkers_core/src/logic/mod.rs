pub mod board;
pub mod game;
pub mod generator;
pub mod path;
pub mod rules;
