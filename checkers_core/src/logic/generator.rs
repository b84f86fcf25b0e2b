use crate::engine::{Action, Step, StepKind};
use crate::logic::board::{Board, Color, Location};

/// Jump offsets in enumeration order: up-left, up-right, down-left, down-right.
/// The path builder's forced continuation takes the first hit in this order.
pub const JUMP_OFFSETS: [(isize, isize); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

pub struct MoveGenerator;

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Every simple move and jump available to `color`, piece by piece in
    /// row-major order, simple moves before jumps for each piece.
    #[must_use]
    pub fn generate_steps(&self, board: &Board, color: Color) -> Action {
        let mut steps = Action::new();
        for from in board.pieces(color) {
            self.push_simple_moves(board, from, &mut steps);
            self.push_jumps(board, from, &mut steps);
        }
        steps
    }

    /// Forward diagonal steps into empty squares. Empty when `from` holds no piece.
    #[must_use]
    pub fn simple_moves(&self, board: &Board, from: Location) -> Action {
        let mut steps = Action::new();
        self.push_simple_moves(board, from, &mut steps);
        steps
    }

    /// Captures over an adjacent opposing piece, in any diagonal direction.
    #[must_use]
    pub fn jumps(&self, board: &Board, from: Location) -> Action {
        let mut steps = Action::new();
        self.push_jumps(board, from, &mut steps);
        steps
    }

    fn push_simple_moves(&self, board: &Board, from: Location, steps: &mut Action) {
        let Some(color) = board.color_at(from) else {
            return;
        };
        let forward = color.forward();
        for d_col in [-1, 1] {
            if let Some(to) = from.offset(forward, d_col) {
                if board.is_empty_at(to) {
                    steps.push(Step::new(from, to, StepKind::Simple));
                }
            }
        }
    }

    fn push_jumps(&self, board: &Board, from: Location, steps: &mut Action) {
        let Some(color) = board.color_at(from) else {
            return;
        };
        let enemy = color.opposite();
        for (d_row, d_col) in JUMP_OFFSETS {
            let (Some(to), Some(over)) = (
                from.offset(d_row, d_col),
                from.offset(d_row / 2, d_col / 2),
            ) else {
                continue;
            };
            if board.is_empty_at(to) && board.color_at(over) == Some(enemy) {
                steps.push(Step::new(from, to, StepKind::Jump));
            }
        }
    }

    #[must_use]
    pub fn can_move(&self, board: &Board, from: Location) -> bool {
        let Some(color) = board.color_at(from) else {
            return false;
        };
        [-1, 1].into_iter().any(|d_col| {
            from.offset(color.forward(), d_col)
                .is_some_and(|to| board.is_empty_at(to))
        })
    }

    #[must_use]
    pub fn can_jump(&self, board: &Board, from: Location) -> bool {
        let Some(color) = board.color_at(from) else {
            return false;
        };
        JUMP_OFFSETS.into_iter().any(|(d_row, d_col)| {
            match (from.offset(d_row, d_col), from.offset(d_row / 2, d_col / 2)) {
                (Some(to), Some(over)) => {
                    board.is_empty_at(to) && board.color_at(over) == Some(color.opposite())
                }
                _ => false,
            }
        })
    }

    /// True when the piece on `loc` has any simple move or jump.
    #[must_use]
    pub fn is_movable(&self, board: &Board, loc: Location) -> bool {
        self.can_move(board, loc) || self.can_jump(board, loc)
    }

    #[must_use]
    pub fn has_legal_moves(&self, board: &Board, color: Color) -> bool {
        board
            .pieces(color)
            .any(|loc| self.is_movable(board, loc))
    }
}

/// True when `color` has won: no piece of the opponent can move, which
/// includes the opponent having no pieces at all.
#[must_use]
pub fn goal_test(board: &Board, color: Color) -> bool {
    !MoveGenerator::new().has_legal_moves(board, color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Cell, Layout};

    fn loc(row: usize, col: usize) -> Location {
        Location::new(row, col)
    }

    #[test]
    fn test_opening_steps() {
        let board = Board::opening(Layout::Reference);
        let generator = MoveGenerator::new();

        let black = generator.generate_steps(&board, Color::Black);
        // Only the front row (row 4) can move: (4,1) two ways, (4,3) two ways, (4,5) one way.
        assert_eq!(black.len(), 5);
        assert!(black.iter().all(|s| s.kind == StepKind::Simple && s.from.row == 4));
        assert_eq!(black.first(), Some(&Step::new(loc(4, 1), loc(3, 0), StepKind::Simple)));

        let white = generator.generate_steps(&board, Color::White);
        assert_eq!(white.len(), 5);
        assert!(white.iter().all(|s| s.kind == StepKind::Simple && s.from.row == 1));
    }

    #[test]
    fn test_simple_moves_use_forward_pair() {
        let generator = MoveGenerator::new();
        let mut board = Board::empty(6, 6);
        board.set(loc(2, 3), Cell::Piece(Color::Black));
        board.set(loc(3, 2), Cell::Piece(Color::White));

        let up: Vec<Location> = generator
            .simple_moves(&board, loc(2, 3))
            .iter()
            .map(|s| s.to)
            .collect();
        assert_eq!(up, vec![loc(1, 2), loc(1, 4)]);

        let down: Vec<Location> = generator
            .simple_moves(&board, loc(3, 2))
            .iter()
            .map(|s| s.to)
            .collect();
        assert_eq!(down, vec![loc(4, 1), loc(4, 3)]);
    }

    #[test]
    fn test_jumps_enumeration_order() {
        let generator = MoveGenerator::new();
        let mut board = Board::empty(6, 6);
        board.set(loc(2, 3), Cell::Piece(Color::White));
        for mid in [loc(1, 2), loc(1, 4), loc(3, 2), loc(3, 4)] {
            board.set(mid, Cell::Piece(Color::Black));
        }
        let targets: Vec<Location> = generator
            .jumps(&board, loc(2, 3))
            .iter()
            .map(|s| s.to)
            .collect();
        assert_eq!(targets, vec![loc(0, 1), loc(0, 5), loc(4, 1), loc(4, 5)]);
        assert!(generator
            .jumps(&board, loc(2, 3))
            .iter()
            .all(|s| s.kind == StepKind::Jump));
    }

    #[test]
    fn test_edge_pieces_do_not_leave_board() {
        let generator = MoveGenerator::new();
        let mut board = Board::empty(6, 6);
        board.set(loc(0, 1), Cell::Piece(Color::Black));
        board.set(loc(1, 0), Cell::Piece(Color::White));
        assert!(generator.simple_moves(&board, loc(0, 1)).is_empty());
        // The black piece at (0,1) has nothing behind (1,0) to land on.
        assert!(generator.jumps(&board, loc(0, 1)).is_empty());
        assert!(!generator.is_movable(&board, loc(0, 1)));
        assert!(generator.is_movable(&board, loc(1, 0)));
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        let generator = MoveGenerator::new();
        let board = Board::opening(Layout::Reference);
        assert!(generator.simple_moves(&board, loc(3, 0)).is_empty());
        assert!(generator.jumps(&board, loc(0, 0)).is_empty());
        assert!(generator.jumps(&board, loc(10, 10)).is_empty());
        assert!(!generator.is_movable(&board, loc(3, 0)));
    }

    #[test]
    fn test_no_pieces_yields_empty_set() {
        let generator = MoveGenerator::new();
        let mut board = Board::empty(6, 6);
        board.set(loc(4, 1), Cell::Piece(Color::Black));
        assert!(generator.generate_steps(&board, Color::White).is_empty());
        assert!(goal_test(&board, Color::Black));
        assert!(!goal_test(&board, Color::White));
    }

    #[test]
    fn test_goal_on_blocked_opponent() {
        // White at (0,1) can only move down to (1,0) or (1,2); both are
        // blocked by black pieces backed up so no jump exists either.
        let mut board = Board::empty(6, 6);
        board.set(loc(0, 1), Cell::Piece(Color::White));
        board.set(loc(1, 0), Cell::Piece(Color::Black));
        board.set(loc(1, 2), Cell::Piece(Color::Black));
        board.set(loc(2, 3), Cell::Piece(Color::Black));
        assert!(!MoveGenerator::new().has_legal_moves(&board, Color::White));
        assert!(goal_test(&board, Color::Black));
        assert!(!goal_test(&board, Color::White));
    }

    #[test]
    fn test_opening_is_not_terminal() {
        let board = Board::opening(Layout::Standard);
        assert!(!goal_test(&board, Color::Black));
        assert!(!goal_test(&board, Color::White));
    }
}
