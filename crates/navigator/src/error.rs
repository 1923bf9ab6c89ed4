// Chunk: docs/chunks/selection_session - Selection panel orchestration

use thiserror::Error;

/// Errors surfaced by the navigator's panel callbacks.
///
/// Stale sheets and empty lists are recovered locally and never show up
/// here. Everything in this enum is a breach of the host/navigator contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    /// The host highlighted "nothing" while the panel was open.
    #[error("cannot highlight index -1")]
    NothingHighlighted,
    /// The host reported an index outside the list it was given.
    #[error("index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    /// A panel callback arrived with no selection session open.
    #[error("no selection session is open")]
    NoSession,
}
