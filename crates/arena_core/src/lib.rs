pub mod cancel;
pub mod game;
pub mod tictactoe;
pub mod types;

pub use cancel::*;
pub use game::*;
pub use tictactoe::*;
pub use types::*;

// =============================================================================
// Policy trait: implemented by every decision maker (scripted, search, human)
// =============================================================================

/// A decision maker that can play either side of a [`Game`].
///
/// Policies only ever see canonical boards, so they always play "as the
/// first mover" and need no notion of which side they are on.
pub trait Policy<G: Game>: Send {
    /// Choose an action for the player to move on `board` (canonical form).
    ///
    /// The arena validates the returned index against the legality mask;
    /// returning an illegal action aborts the tournament.
    fn select_action(&mut self, game: &G, board: &G::Board) -> Action;

    /// Name used in logs, errors and reports.
    fn name(&self) -> &str;

    /// Drop any search memory accumulated during the previous episode.
    ///
    /// Called before the first move of every episode. Stateless policies
    /// keep the default no-op.
    fn reset_search_memory(&mut self) {}
}

impl<G: Game, P: Policy<G> + ?Sized> Policy<G> for Box<P> {
    fn select_action(&mut self, game: &G, board: &G::Board) -> Action {
        (**self).select_action(game, board)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn reset_search_memory(&mut self) {
        (**self).reset_search_memory()
    }
}
