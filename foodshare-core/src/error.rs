//! Errors raised while validating user submissions.
//!
//! I/O and HTTP failures are reported through [`anyhow`] like everything else in
//! the crate; these are the ones a caller is expected to show back to the user.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was empty or whitespace.
    #[error("please fill in `{0}`")]
    MissingField(&'static str),

    #[error("could not read a price from `{0}`")]
    InvalidPrice(String),

    #[error("rating must be between 1 and 5, got {0}")]
    ScoreOutOfRange(u8),

    #[error("`{0}` is not a valid 6-digit pincode")]
    InvalidPincode(String),

    /// The action needs a signed-in user and the session has none.
    #[error("please sign in to {0}")]
    SignInRequired(&'static str),

    #[error("listing `{0}` has no price and cannot be paid for")]
    Unpriced(String),

    #[error("payment gateway key id is not configured")]
    MissingPaymentKey,
}
