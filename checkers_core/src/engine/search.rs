use crate::engine::config::EngineConfig;
use crate::engine::eval::HeuristicEvaluator;
use crate::engine::{Action, Evaluator, SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, Color};
use crate::logic::generator::{goal_test, MoveGenerator};
use crate::logic::path::find_path;
use std::sync::Arc;

/// Depth-limited minimax with alpha-beta pruning.
///
/// The side to move at the root maximizes; its opponent minimizes. Every
/// candidate is a first step from the generator, completed into a full path
/// (forced jump continuation included) on a private clone of the board.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: HeuristicEvaluator,
    generator: MoveGenerator,
    cutoff_depth: u8,
    // Reset at the start of every top-level search.
    nodes_generated: u64,
    max_depth: u8,
}

/// Outcome of one max or min node. Prunings are summed over the subtree.
struct NodeResult {
    action: Option<Action>,
    value: i32,
    max_prunings: u64,
    min_prunings: u64,
}

impl NodeResult {
    const fn leaf(value: i32) -> Self {
        Self {
            action: None,
            value,
            max_prunings: 0,
            min_prunings: 0,
        }
    }
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(config.clone()),
            generator: MoveGenerator::new(),
            cutoff_depth: config.cutoff_depth(),
            config,
            nodes_generated: 0,
            max_depth: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = HeuristicEvaluator::new(config.clone());
        self.cutoff_depth = config.cutoff_depth();
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn cutoff_depth(&self) -> u8 {
        self.cutoff_depth
    }

    /// Best path for `color` on `board`. The board itself is never touched.
    ///
    /// Node and depth counters are reset here, so each call reports only its
    /// own tree. `action` is `None` when the position is already decided.
    pub fn best_move(&mut self, board: &Board, color: Color) -> SearchResult {
        self.nodes_generated = 0;
        self.max_depth = 0;

        let root = self.max_value(board, color, i32::MIN, i32::MAX, 0);
        let stats = SearchStats {
            nodes: self.nodes_generated,
            max_depth: self.max_depth,
            max_prunings: root.max_prunings,
            min_prunings: root.min_prunings,
        };
        log::debug!(
            "{color} searched to cutoff {}: value {}, {stats}",
            self.cutoff_depth,
            root.value
        );

        SearchResult {
            action: root.action,
            value: root.value,
            stats,
        }
    }

    fn cutoff_test(&mut self, board: &Board, depth: u8) -> bool {
        self.max_depth = self.max_depth.max(depth);
        depth >= self.cutoff_depth
            || goal_test(board, Color::Black)
            || goal_test(board, Color::White)
    }

    fn max_value(
        &mut self,
        board: &Board,
        root: Color,
        mut alpha: i32,
        beta: i32,
        depth: u8,
    ) -> NodeResult {
        self.nodes_generated += 1;
        if self.cutoff_test(board, depth) {
            return NodeResult::leaf(self.evaluator.evaluate(board, root));
        }

        let mut result = NodeResult::leaf(i32::MIN);
        let candidates = self.generator.generate_steps(board, root);
        for step in &candidates {
            let mut next = board.clone();
            let Some(path) = find_path(&mut next, step.from, step.to) else {
                continue;
            };

            let child = self.min_value(&next, root, alpha, beta, depth + 1);
            result.max_prunings += child.max_prunings;
            result.min_prunings += child.min_prunings;
            if child.value > result.value {
                result.value = child.value;
                result.action = Some(path);
            }
            if result.value >= beta {
                result.max_prunings += 1;
                return result;
            }
            alpha = alpha.max(result.value);
        }
        result
    }

    fn min_value(
        &mut self,
        board: &Board,
        root: Color,
        alpha: i32,
        mut beta: i32,
        depth: u8,
    ) -> NodeResult {
        self.nodes_generated += 1;
        if self.cutoff_test(board, depth) {
            return NodeResult::leaf(self.evaluator.evaluate(board, root));
        }

        let mut result = NodeResult::leaf(i32::MAX);
        let candidates = self.generator.generate_steps(board, root.opposite());
        for step in &candidates {
            let mut next = board.clone();
            let Some(path) = find_path(&mut next, step.from, step.to) else {
                continue;
            };

            let child = self.max_value(&next, root, alpha, beta, depth + 1);
            result.max_prunings += child.max_prunings;
            result.min_prunings += child.min_prunings;
            if child.value < result.value {
                result.value = child.value;
                result.action = Some(path);
            }
            if result.value <= alpha {
                result.min_prunings += 1;
                return result;
            }
            beta = beta.min(result.value);
        }
        result
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        self.best_move(board, color)
    }
}
