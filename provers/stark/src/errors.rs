use std::fmt;

/// The specific reason a FRI low-degree test rejected a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriFailure {
    MalformedLastCodeword,
    HighDegreeLastCodeword,
    ColinearityFailure,
    MerklePathFailure,
}

impl fmt::Display for FriFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriFailure::MalformedLastCodeword => write!(f, "last codeword has the wrong length"),
            FriFailure::HighDegreeLastCodeword => {
                write!(f, "last codeword does not interpolate to a low-degree polynomial")
            }
            FriFailure::ColinearityFailure => write!(f, "colinearity check failed"),
            FriFailure::MerklePathFailure => write!(f, "Merkle authentication path failed"),
        }
    }
}

/// Errors raised while proving or verifying a STARK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarkError {
    /// A parameter violated a stated precondition. Fatal; do not retry.
    InvalidArgument(String),
    /// A field operation failed (division by, or inversion of, zero).
    ArithmeticError(String),
    /// The proof stream was read past its last pushed object.
    ProofStreamError,
    /// The FRI low-degree test rejected the proof.
    FriFailure(FriFailure),
    /// A degree or combination check failed at a queried index.
    StarkVerificationFailure(String),
}

impl fmt::Display for StarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarkError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            StarkError::ArithmeticError(msg) => write!(f, "arithmetic error: {msg}"),
            StarkError::ProofStreamError => write!(f, "read past the end of the proof stream"),
            StarkError::FriFailure(reason) => write!(f, "FRI failure: {reason}"),
            StarkError::StarkVerificationFailure(msg) => write!(f, "verification failed: {msg}"),
        }
    }
}

impl std::error::Error for StarkError {}
