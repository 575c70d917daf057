use ecadd_ole::OLEError;

/// An error of the secure arithmetic.
#[derive(Debug, thiserror::Error)]
pub enum ArithError {
    /// The transport failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The peer sent an unexpected number of values.
    #[error("expected {expected} values from peer, got {actual}")]
    LengthMismatch {
        /// Expected number of values.
        expected: usize,
        /// Received number of values.
        actual: usize,
    },
    /// All provisioned triples have been consumed.
    #[error("triple pool exhausted: {provisioned} provisioned, {consumed} consumed")]
    PoolExhausted {
        /// Number of provisioned triples.
        provisioned: usize,
        /// Number of consumed triples.
        consumed: usize,
    },
    /// Attempted to invert zero.
    #[error("attempted to invert zero")]
    ZeroInversion,
}

/// An error of triple generation.
#[derive(Debug, thiserror::Error)]
pub enum TripleError {
    /// The transport failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The OT-multiplication failed.
    #[error(transparent)]
    OLE(#[from] OLEError),
    /// A generation step returned an unexpected number of values.
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Expected number of values.
        expected: usize,
        /// Actual number of values.
        actual: usize,
    },
}

/// An error of a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The transport failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The secure arithmetic failed.
    #[error(transparent)]
    Arith(#[from] ArithError),
    /// Triple generation failed.
    #[error(transparent)]
    Triple(#[from] TripleError),
    /// The input point is not on the curve.
    #[error("input point is not on the curve")]
    InvalidPoint,
}
