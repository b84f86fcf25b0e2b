use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};
use crate::logic::generator::{goal_test, MoveGenerator};
use std::sync::Arc;

/// Material, mobility and capture-potential differential.
pub struct HeuristicEvaluator {
    config: Arc<EngineConfig>,
    generator: MoveGenerator,
}

/// Raw differentials behind a heuristic score, own side minus opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Differentials {
    pub pieces: i32,
    pub moves: i32,
    pub jumps: i32,
}

impl HeuristicEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            generator: MoveGenerator::new(),
        }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn differentials(&self, board: &Board, perspective: Color) -> Differentials {
        let mut delta = Differentials::default();
        for loc in board.locations() {
            let Some(color) = board.color_at(loc) else {
                continue;
            };
            let sign = if color == perspective { 1 } else { -1 };
            delta.pieces += sign;
            delta.moves += sign * self.generator.simple_moves(board, loc).len() as i32;
            delta.jumps += sign * self.generator.jumps(board, loc).len() as i32;
        }
        delta
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board, perspective: Color) -> i32 {
        if goal_test(board, perspective) {
            return self.config.win_score;
        }
        if goal_test(board, perspective.opposite()) {
            return -self.config.win_score;
        }

        let delta = self.differentials(board, perspective);
        self.config.weight_material * delta.pieces
            + self.config.weight_mobility * delta.moves
            + self.config.weight_jumps * delta.jumps
    }
}
