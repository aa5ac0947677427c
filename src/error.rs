// Contract violations of the cursor and join protocols. None of these are
// retryable; they mean the caller broke a precondition.

#[derive(thiserror::Error, PartialEq, Eq, Clone, Copy, Debug)]
pub enum Error {
    // Intersecting nothing would produce the "universal" relation, which we
    // can't represent.
    #[error("a join needs at least one input sequence")]
    InvalidArity,

    #[error("cursor is exhausted")]
    OutOfBounds,

    #[error("seek target is behind the current key")]
    NonMonotonicSeek,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
