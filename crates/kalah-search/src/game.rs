//! Interfaces to the game collaborators the search consumes
//!
//! The search never implements Kalah rules or scoring itself. It drives a
//! [`Rules`] implementation for legality and move application and a
//! [`Heuristic`] for leaf scores.

use crate::types::{Move, Score, Side};

/// Rules engine consumed by the search
///
/// Contract:
/// - `apply` is only called after `is_legal` returned true for the same board and move.
/// - `apply` mutates the given board (always an independent copy owned by a new node)
///   and returns the side that acts next. Returning the mover again means the move
///   earned an extra turn.
/// - All methods are deterministic for a given board.
pub trait Rules: Send + Sync + 'static {
    /// Board snapshot. Each search node owns its own copy.
    type Board: Clone + Send + 'static;

    /// Whether `mv` may be played on `board`
    fn is_legal(&self, board: &Self::Board, mv: Move) -> bool;

    /// Play `mv` on `board` and return the side to act next
    fn apply(&self, board: &mut Self::Board, mv: Move) -> Side;

    /// Whether the game has ended on `board`
    fn is_game_over(&self, board: &Self::Board) -> bool;
}

/// Leaf evaluation consumed by the search
///
/// Returns a score from `side`'s perspective: higher is better for `side`.
/// Must be pure; it is called concurrently from every branch thread.
pub trait Heuristic<B>: Send + Sync + 'static {
    fn evaluate(&self, side: Side, board: &B) -> Score;
}

/// Implement Heuristic for Arc<T> where T: Heuristic
impl<B, T: Heuristic<B> + ?Sized> Heuristic<B> for std::sync::Arc<T> {
    fn evaluate(&self, side: Side, board: &B) -> Score {
        (**self).evaluate(side, board)
    }
}

/// Implement Rules for Arc<T> where T: Rules
impl<T: Rules> Rules for std::sync::Arc<T> {
    type Board = T::Board;

    fn is_legal(&self, board: &Self::Board, mv: Move) -> bool {
        (**self).is_legal(board, mv)
    }

    fn apply(&self, board: &mut Self::Board, mv: Move) -> Side {
        (**self).apply(board, mv)
    }

    fn is_game_over(&self, board: &Self::Board) -> bool {
        (**self).is_game_over(board)
    }
}
