//! Structural address parsing.
//!
//! The public entry point is [`parse_address`], which splits a raw string into
//! a [`ParsedAddress`] or fails with a [`ParseError`]. Normalization is
//! lowercase + trim only; no Unicode folding, no sub-address stripping.

mod error;
mod types;

pub use error::ParseError;
pub use types::ParsedAddress;

/// Parse a raw string into its structural parts.
///
/// The input is trimmed and lowercased first. Parsing fails when the result is
/// empty, does not contain exactly one `@`, or has an empty local or domain
/// part. On failure no partial value is returned.
pub fn parse_address(raw: &str) -> Result<ParsedAddress, ParseError> {
    let input = raw.trim().to_lowercase();
    if input.is_empty() {
        return Err(ParseError::EmptyAddress);
    }

    let mut parts = input.splitn(3, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return Err(ParseError::MissingAtSign);
    };
    if parts.next().is_some() {
        return Err(ParseError::MultipleAtSigns);
    }

    if local.is_empty() {
        return Err(ParseError::EmptyLocalPart);
    }
    if domain.is_empty() {
        return Err(ParseError::EmptyDomainPart);
    }

    let tld = domain.rsplit('.').next().unwrap_or(domain).to_string();
    let has_subaddress_tag = local.contains('+');

    Ok(ParsedAddress {
        full: format!("{local}@{domain}"),
        local: local.to_string(),
        domain: domain.to_string(),
        tld,
        has_subaddress_tag,
    })
}

/// Normalized form of an address: parse, then re-serialize.
///
/// Idempotent: normalizing an already-normalized address returns it unchanged.
pub fn normalize_address(raw: &str) -> Result<String, ParseError> {
    parse_address(raw).map(|parsed| parsed.full)
}
