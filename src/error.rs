use serde::{Deserialize, Serialize};

/// Errors of the checked entry points
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, thiserror::Error,
)]
#[non_exhaustive]
pub enum Error {
    /// The transform length is zero, not a power of two, or exceeds [`crate::MAX_FFT_LEN`]
    #[error("invalid transform length {0}")]
    InvalidSize(usize),
    /// The argument is outside the domain of the function
    #[error("argument outside of the function domain")]
    Domain,
    /// The result is not representable in the fixed point format
    #[error("result not representable")]
    Overflow,
}
