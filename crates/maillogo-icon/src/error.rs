//! Error types for domain validation.

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Reasons a sender domain is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No domain was supplied.
    #[error("Domain is empty")]
    Empty,

    /// The domain contains a character that cannot appear in a bare hostname.
    #[error("Invalid character in domain: {0:?}")]
    InvalidCharacter(char),

    /// The domain exceeds the DNS name length limit.
    #[error("Domain is too long: {0} bytes")]
    TooLong(usize),
}
