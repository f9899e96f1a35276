pub mod error;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

pub use error::HomeLoanError;
pub use types::*;

/// Standard result type for all homeloan operations
pub type HomeLoanResult<T> = Result<T, HomeLoanError>;
