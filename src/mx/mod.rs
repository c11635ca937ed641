//! MX routability checks.
//!
//! Answers whether a domain publishes mail exchangers, behind a TTL cache
//! and a bounded lookup time. Lookup failures degrade to a low-confidence
//! [`RoutabilityResult`] instead of erroring, so batch validation keeps
//! moving when DNS is unhealthy.

mod checker;
mod error;
mod resolver;
mod types;

pub use checker::RoutabilityChecker;
pub use error::MxError as Error;
pub use types::{MxHost, RoutabilityErrorKind, RoutabilityResult};

pub(crate) use resolver::{LookupMx, is_no_records};

#[cfg(test)]
pub(crate) mod tests;
