/// Errors reported by board construction and coordinate validation.
///
/// Illegal moves are not errors: they are frequent, recoverable outcomes
/// reported through the boolean result of `make_move`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("side length must be even and greater than 2, got {0}")]
    InvalidSideLength(usize),

    #[error("dimension count must be at least 1")]
    InvalidDimensionCount,

    #[error("a board of {size}^{dim} cells does not fit in memory")]
    BoardTooLarge { dim: usize, size: usize },

    #[error("expected {expected} coordinate components, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("coordinate component {value} is out of range 0..{size}")]
    CoordinateOutOfRange { value: usize, size: usize },
}
