/// Misuse of the pager by its caller.
///
/// An out-of-range page is not an error: it is a state, reported through
/// [`PageCallbacks`](super::PageCallbacks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("circular movement needs an upper bound of at least 1")]
    ZeroUpperBound,
    #[error("page length must be at least 1")]
    ZeroPageLength,
}
