use thiserror::Error;

/// Reasons an input string cannot be read as an e-mail address.
///
/// Every variant is recoverable: callers turn it into an invalid
/// result, never a crash.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("address is empty")]
    EmptyAddress,
    #[error("address must contain '@'")]
    MissingAtSign,
    #[error("address must contain exactly one '@'")]
    MultipleAtSigns,
    #[error("local part is empty")]
    EmptyLocalPart,
    #[error("domain part is empty")]
    EmptyDomainPart,
}
