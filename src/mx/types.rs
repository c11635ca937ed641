const SCORE_ROUTABLE: u8 = 80;
const SCORE_NO_RECORDS: u8 = 20;
const SCORE_LOOKUP_FAILED: u8 = 10;

/// One mail exchanger from a lookup answer.
///
/// Ordering is priority-first, so a sorted list runs from most to least
/// preferred host.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxHost {
    pub priority: u16,
    pub hostname: String,
}

impl MxHost {
    pub fn new(priority: u16, hostname: impl Into<String>) -> Self {
        Self {
            priority,
            hostname: hostname.into(),
        }
    }
}

/// How a lookup concluded. `None` means records were found; `NoRecords` is
/// an authoritative empty answer, not a failure.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutabilityErrorKind {
    #[default]
    None,
    NoRecords,
    ResolutionFailed,
    Timeout,
}

/// Routability verdict for one domain.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutabilityResult {
    /// ASCII (punycode) form of the queried domain.
    pub domain: String,
    pub routable: bool,
    /// Ascending priority, deduplicated. Empty unless records were found.
    pub mail_exchanges: Vec<MxHost>,
    /// Contribution fed to the aggregate score: 80 when routable, 20 on an
    /// authoritative empty answer, 10 when the lookup failed.
    pub score: u8,
    pub error_kind: RoutabilityErrorKind,
}

impl RoutabilityResult {
    pub(crate) fn records(domain: impl Into<String>, mail_exchanges: Vec<MxHost>) -> Self {
        Self {
            domain: domain.into(),
            routable: true,
            mail_exchanges,
            score: SCORE_ROUTABLE,
            error_kind: RoutabilityErrorKind::None,
        }
    }

    pub(crate) fn no_records(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            routable: false,
            mail_exchanges: Vec::new(),
            score: SCORE_NO_RECORDS,
            error_kind: RoutabilityErrorKind::NoRecords,
        }
    }

    pub(crate) fn unreachable(domain: impl Into<String>, kind: RoutabilityErrorKind) -> Self {
        Self {
            domain: domain.into(),
            routable: false,
            mail_exchanges: Vec::new(),
            score: SCORE_LOOKUP_FAILED,
            error_kind: kind,
        }
    }

    /// True when the resolver gave no answer at all (failure or timeout),
    /// as opposed to answering "no records".
    pub fn lookup_failed(&self) -> bool {
        matches!(
            self.error_kind,
            RoutabilityErrorKind::ResolutionFailed | RoutabilityErrorKind::Timeout
        )
    }

    /// Most-preferred exchanger, if any.
    pub fn best_exchange(&self) -> Option<&MxHost> {
        self.mail_exchanges.first()
    }
}
