use crate::engine::Action;
use crate::logic::board::{Board, Cell, Color, Layout, Location};
use crate::logic::generator::{goal_test, MoveGenerator};
use crate::logic::path::find_path;
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub action: Action,
    pub color: Color,
}

/// A game in progress: the board, whose turn it is and the played paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl GameState {
    /// Black always moves first.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self::from_board(Board::opening(layout), Color::Black)
    }

    #[must_use]
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut game = Self {
            board,
            turn,
            status: GameStatus::Playing,
            history: Vec::new(),
        };
        if goal_test(&game.board, turn.opposite()) {
            game.status = GameStatus::Won(turn.opposite());
        }
        game
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Won(_))
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Won(color) => Some(color),
            GameStatus::Playing => None,
        }
    }

    /// First steps available to the side to move.
    #[must_use]
    pub fn legal_steps(&self) -> Action {
        MoveGenerator::new().generate_steps(&self.board, self.turn)
    }

    #[must_use]
    pub fn last_action(&self) -> Option<&Action> {
        self.history.last().map(|record| &record.action)
    }

    /// Plays the path starting with `from -> to` for the side to move.
    ///
    /// Capturing is optional: a simple move is accepted even when a jump is
    /// available. The returned action includes any forced continuation.
    pub fn make_move(&mut self, from: Location, to: Location) -> Result<Action, MoveError> {
        self.check_request(from, to)?;

        let mut next = self.board.clone();
        let action = find_path(&mut next, from, to).ok_or(MoveError::IllegalMove { from, to })?;
        self.commit(next, action.clone());
        Ok(action)
    }

    /// Replays a complete path, e.g. one returned by a searcher.
    ///
    /// The path must be exactly what the first step expands to on the current
    /// board, so a truncated or altered chain is rejected.
    pub fn play_action(&mut self, action: &Action) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let first = action.first().ok_or(MoveError::EmptyAction)?;
        let (from, to) = (first.from, first.to);
        self.check_request(from, to)?;

        let mut next = self.board.clone();
        match find_path(&mut next, from, to) {
            Some(path) if &path == action => {
                self.commit(next, path);
                Ok(())
            }
            _ => Err(MoveError::IllegalMove { from, to }),
        }
    }

    fn check_request(&self, from: Location, to: Location) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        for loc in [from, to] {
            if !self.board.contains(loc) {
                return Err(MoveError::OutOfBounds(loc));
            }
        }
        match self.board.color_at(from) {
            None => Err(MoveError::NoPieceAtSource(from)),
            Some(color) if color != self.turn => Err(MoveError::NotYourTurn(from)),
            Some(_) => Ok(()),
        }
    }

    fn commit(&mut self, board: Board, action: Action) {
        let mover = self.turn;
        log::debug!("{mover} plays {action}");
        self.board = board;
        self.history.push(MoveRecord {
            action,
            color: mover,
        });
        self.turn = mover.opposite();

        if goal_test(&self.board, mover) {
            self.status = GameStatus::Won(mover);
            log::info!("{mover} wins after {} moves", self.history.len());
        }
    }

    /// Takes back the last path, restoring every captured piece.
    pub fn undo_move(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };

        let mover = Cell::Piece(record.color);
        let captured = Cell::Piece(record.color.opposite());
        for step in record.action.iter().rev() {
            self.board.set(step.to, Cell::Empty);
            self.board.set(step.from, mover);
            if let Some(loc) = step.captured() {
                self.board.set(loc, captured);
            }
        }

        self.turn = record.color;
        self.status = GameStatus::Playing;
        true
    }
}
