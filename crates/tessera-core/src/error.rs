use crate::MAX_DIMS;

/// Raised when a [`crate::Shape`] or [`crate::TensorDescriptor`] is constructed from bad input.
///
/// This is the only failure mode of the crate. Every other operation on a constructed value
/// is total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("Tensor rank must be greater than 0.")]
    ZeroRank,
    #[error("Tensor rank {} exceeds the maximum of {}.", .0, MAX_DIMS)]
    RankTooLarge(usize),
    #[error("Tensor dimensions must not be null.")]
    NullDimensions,
    #[error("Expected {expected} dimensions, got {actual}.")]
    TooFewDimensions { expected: usize, actual: usize },
    #[error("Extent {0} does not fit in 32 bits.")]
    ExtentOverflow(usize),
}

/// # Enforcer
///
/// Checks the rank preconditions shared by every construction path.
pub struct Enforcer;

impl Enforcer {
    pub fn check_rank(rank: usize) -> Result<(), InvalidArgument> {
        if rank < 1 {
            return Err(InvalidArgument::ZeroRank);
        }
        if rank > MAX_DIMS {
            return Err(InvalidArgument::RankTooLarge(rank));
        }
        Ok(())
    }

    pub fn check_dims_len(expected: usize, dims: &[u32]) -> Result<(), InvalidArgument> {
        let actual = dims.len();
        if actual < expected {
            return Err(InvalidArgument::TooFewDimensions { expected, actual });
        }
        Ok(())
    }
}
