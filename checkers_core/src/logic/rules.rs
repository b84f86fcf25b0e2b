use crate::engine::StepKind;
use crate::logic::board::{Board, Location};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("location {0} is off the board")]
    OutOfBounds(Location),
    #[error("no piece at {0}")]
    NoPieceAtSource(Location),
    #[error("the piece at {0} belongs to the other side")]
    NotYourTurn(Location),
    #[error("no legal step from {from} to {to}")]
    IllegalMove { from: Location, to: Location },
    #[error("the game is already over")]
    GameOver,
    #[error("action has no steps")]
    EmptyAction,
}

/// Classifies a single step of the piece standing on `from`.
///
/// A simple step is one square along the piece's forward diagonals into an
/// empty square. A jump is two squares along any diagonal, over an opposing
/// piece, into an empty square. Anything else, including off-board squares
/// or an empty origin, is `None`.
#[must_use]
pub fn classify(board: &Board, from: Location, to: Location) -> Option<StepKind> {
    if !board.is_empty_at(to) {
        return None;
    }
    let color = board.color_at(from)?;

    let d_row = to.row.abs_diff(from.row);
    let d_col = to.col.abs_diff(from.col);
    let forward = if color.forward() < 0 {
        to.row < from.row
    } else {
        to.row > from.row
    };

    if d_row == 1 && d_col == 1 && forward {
        Some(StepKind::Simple)
    } else if d_row == 2
        && d_col == 2
        && board.color_at(from.midpoint(to)) == Some(color.opposite())
    {
        Some(StepKind::Jump)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Cell, Color, Layout};

    fn loc(row: usize, col: usize) -> Location {
        Location::new(row, col)
    }

    #[test]
    fn test_simple_steps_are_forward_only() {
        let board = Board::opening(Layout::Reference);
        // Black moves up.
        assert_eq!(classify(&board, loc(4, 1), loc(3, 0)), Some(StepKind::Simple));
        assert_eq!(classify(&board, loc(4, 1), loc(3, 2)), Some(StepKind::Simple));
        // White moves down.
        assert_eq!(classify(&board, loc(1, 2), loc(2, 1)), Some(StepKind::Simple));

        let mut board = Board::empty(6, 6);
        board.set(loc(3, 2), Cell::Piece(Color::Black));
        assert_eq!(classify(&board, loc(3, 2), loc(4, 1)), None);
        board.set(loc(3, 2), Cell::Piece(Color::White));
        assert_eq!(classify(&board, loc(3, 2), loc(2, 1)), None);
    }

    #[test]
    fn test_jumps_in_every_direction() {
        let mut board = Board::empty(6, 6);
        board.set(loc(2, 3), Cell::Piece(Color::White));
        for (mid, to) in [
            (loc(1, 2), loc(0, 1)),
            (loc(1, 4), loc(0, 5)),
            (loc(3, 2), loc(4, 1)),
            (loc(3, 4), loc(4, 5)),
        ] {
            assert_eq!(classify(&board, loc(2, 3), to), None);
            board.set(mid, Cell::Piece(Color::Black));
            assert_eq!(classify(&board, loc(2, 3), to), Some(StepKind::Jump));
        }
    }

    #[test]
    fn test_cannot_jump_own_piece_or_onto_occupied() {
        let mut board = Board::empty(6, 6);
        board.set(loc(4, 1), Cell::Piece(Color::Black));
        board.set(loc(3, 2), Cell::Piece(Color::Black));
        assert_eq!(classify(&board, loc(4, 1), loc(2, 3)), None);

        board.set(loc(3, 2), Cell::Piece(Color::White));
        board.set(loc(2, 3), Cell::Piece(Color::White));
        assert_eq!(classify(&board, loc(4, 1), loc(2, 3)), None);
    }

    #[test]
    fn test_fails_closed() {
        let board = Board::opening(Layout::Reference);
        // Empty origin.
        assert_eq!(classify(&board, loc(3, 0), loc(2, 1)), None);
        // Off-board destination.
        assert_eq!(classify(&board, loc(5, 0), loc(6, 1)), None);
        // Unavailable destination.
        assert_eq!(classify(&board, loc(4, 1), loc(3, 1)), None);
        // Too far.
        assert_eq!(classify(&board, loc(4, 1), loc(1, 4)), None);
    }
}
