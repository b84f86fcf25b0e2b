//! Baseline player that picks a uniformly random first step.
//!
//! Handy as a sparring partner for the alpha-beta engine and for scattering
//! self-play openings. The chosen step is completed into a full path, so a
//! jump still runs its forced continuation.

use crate::engine::{SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, Color};
use crate::logic::generator::MoveGenerator;
use crate::logic::path::find_path;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct RandomSearcher {
    rng: StdRng,
    generator: MoveGenerator,
}

impl Default for RandomSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSearcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            generator: MoveGenerator::new(),
        }
    }

    /// Reproducible sequence of choices.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            generator: MoveGenerator::new(),
        }
    }
}

impl Searcher for RandomSearcher {
    fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        let candidates = self.generator.generate_steps(board, color);
        let action = candidates.steps().choose(&mut self.rng).and_then(|step| {
            let mut next = board.clone();
            find_path(&mut next, step.from, step.to)
        });

        SearchResult {
            action,
            value: 0,
            stats: SearchStats {
                nodes: 1,
                ..SearchStats::default()
            },
        }
    }
}
