use crate::engine::{Action, Step, StepKind};
use crate::logic::board::{Board, Cell, Location};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::classify;

/// Moves the piece of `step` and removes the captured piece of a jump.
pub fn apply_step(board: &mut Board, step: &Step) {
    let piece = board.get(step.from).unwrap_or(Cell::Empty);
    board.set(step.to, piece);
    board.set(step.from, Cell::Empty);
    if let Some(captured) = step.captured() {
        board.set(captured, Cell::Empty);
    }
    log::trace!("applied {step}");
}

/// Builds and commits the full path starting with `from -> to`.
///
/// The board is mutated in place; clone it first if the pre-move position is
/// still needed. Returns `None`, leaving the board untouched, when the pair is
/// neither a simple move nor a jump. After a jump the same piece keeps jumping
/// while it can, always taking the first jump in [`JUMP_OFFSETS`] order, so
/// the returned path never ends on a square with a jump still available.
///
/// [`JUMP_OFFSETS`]: crate::logic::generator::JUMP_OFFSETS
pub fn find_path(board: &mut Board, from: Location, to: Location) -> Option<Action> {
    let kind = classify(board, from, to)?;
    let mut step = Step::new(from, to, kind);

    let mut path = Action::new();
    apply_step(board, &step);
    path.push(step);

    if kind == StepKind::Jump {
        let generator = MoveGenerator::new();
        while let Some(&next) = generator.jumps(board, step.to).first() {
            apply_step(board, &next);
            path.push(next);
            step = next;
        }
    }

    Some(path)
}
