#![forbid(unsafe_code)]
//! mailscore — validation d'adresses e-mail en masse (parsing, correction,
//! jetables, routabilité MX, score de confiance).

pub mod cache;
pub mod corrector;
pub mod disposable;
pub mod engine;
pub mod mx;
pub mod parser;
pub mod scoring;

pub use cache::{CacheStats, TtlCache};
pub use corrector::{
    CorrectionKind, CorrectionResult, DomainCorrector, EmailCorrection, levenshtein,
};
pub use disposable::{DisposableDetector, DisposableResult, RiskTier};
pub use engine::{
    Engine, EngineConfig, EngineError, EngineStats, IssueKind, Signals, ValidationIssue,
    ValidationOptions, ValidationResult,
};
pub use mx::{
    Error as MxError, MxHost, RoutabilityChecker, RoutabilityErrorKind, RoutabilityResult,
};
pub use parser::{ParseError, ParsedAddress, normalize_address, parse_address};
pub use scoring::{QualityTier, Recommendation, ScoreDelta, ScoreOutcome, aggregate};

#[cfg(feature = "with-smtp-probe")]
pub mod smtp_probe;
#[cfg(feature = "with-smtp-probe")]
pub use smtp_probe::{MailboxVerdict, ProbeError, ProbeOptions, ProbeReport, probe_mailbox};
