//! Disposable-address detection.
//!
//! Two stages: an exact lookup against a bundled domain list (high
//! confidence), then a small set of named heuristics for list misses
//! (lower confidence). The list errs toward false negatives; a clean
//! verdict is not a guarantee.

mod error;
mod rules;
mod types;

pub use error::DisposableError;
pub use types::{DisposableResult, RiskTier};

use std::collections::HashSet;

use crate::disposable::rules::HeuristicRule;

/// Compiled into the binary; refresh by regenerating the data file.
const BUNDLED_DOMAINS: &str = include_str!("../../data/disposable_domains.txt");

#[derive(Debug)]
pub struct DisposableDetector {
    domains: HashSet<String>,
    rules: Vec<HeuristicRule>,
}

impl DisposableDetector {
    /// Builds a detector over the bundled domain list.
    pub fn new() -> Result<Self, DisposableError> {
        Self::with_list(BUNDLED_DOMAINS)
    }

    /// Builds a detector over a caller-provided list: one domain per line,
    /// `#` comments and blank lines ignored.
    pub fn with_list(list: &str) -> Result<Self, DisposableError> {
        let domains = parse_domain_list(list)?;
        let rules = rules::build_rules()?;
        Ok(Self { domains, rules })
    }

    /// Checks one address. Matching is case-insensitive; an exact list hit
    /// outranks any heuristic.
    pub fn check(&self, domain: &str, local: &str) -> DisposableResult {
        let domain = domain.trim().to_lowercase();
        let local = local.trim().to_lowercase();

        if self.domains.contains(&domain) {
            return DisposableResult::exact(&domain);
        }
        for rule in &self.rules {
            if rule.matches(&domain, &local) {
                return DisposableResult::heuristic(rule.name);
            }
        }
        DisposableResult::clean()
    }

    /// Exact entries plus heuristic rules; feeds engine statistics.
    pub fn rule_count(&self) -> usize {
        self.domains.len() + self.rules.len()
    }

    /// Number of exact list entries.
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }
}

fn parse_domain_list(list: &str) -> Result<HashSet<String>, DisposableError> {
    let mut domains = HashSet::new();
    for line in list.lines() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        let entry = entry.to_lowercase();
        if !looks_like_domain(&entry) {
            tracing::warn!(entry = entry.as_str(), "skipping malformed list entry");
            continue;
        }
        domains.insert(entry);
    }
    if domains.is_empty() {
        return Err(DisposableError::EmptyDomainList);
    }
    Ok(domains)
}

fn looks_like_domain(entry: &str) -> bool {
    entry.contains('.')
        && !entry.starts_with('.')
        && !entry.ends_with('.')
        && entry
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}
