//! Russian checkers on small boards: board model, move rules with forced
//! jump continuation, and an alpha-beta engine to play against.

pub mod engine;
pub mod logic;
pub mod worker;
