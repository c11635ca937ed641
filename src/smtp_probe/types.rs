use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Classification of the observed SMTP behaviour for a mailbox.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailboxVerdict {
    /// RCPT for the target was accepted (and random aliases, when probed,
    /// were not).
    Deliverable,
    /// The server rejected the target with a definitive no-such-mailbox
    /// status.
    Rejected,
    /// The server accepts random aliases too; acceptance proves nothing.
    CatchAll,
    /// Transient 4xx on the target; greylisting makes this routine and
    /// inconclusive by design.
    Greylisted,
    /// No exchanger could be contacted at all.
    Unreachable,
    /// Anything else, with a human-readable reason.
    Inconclusive(String),
}

impl MailboxVerdict {
    pub fn is_conclusive(&self) -> bool {
        matches!(self, Self::Deliverable | Self::Rejected)
    }
}

impl fmt::Display for MailboxVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deliverable => f.write_str("Deliverable"),
            Self::Rejected => f.write_str("Rejected"),
            Self::CatchAll => f.write_str("CatchAll"),
            Self::Greylisted => f.write_str("Greylisted"),
            Self::Unreachable => f.write_str("Unreachable"),
            Self::Inconclusive(reason) => write!(f, "Inconclusive ({reason})"),
        }
    }
}

/// Final report produced by [`probe_mailbox`].
///
/// [`probe_mailbox`]: crate::smtp_probe::probe_mailbox
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub verdict: MailboxVerdict,
    /// Exchangers attempted, in preference order.
    pub mx_tried: Vec<String>,
    /// Command/reply log across all attempted hosts.
    pub transcript: Vec<String>,
    pub confidence: f32,
}

impl ProbeReport {
    pub(crate) fn new(
        verdict: MailboxVerdict,
        mx_tried: Vec<String>,
        transcript: Vec<String>,
        confidence: f32,
    ) -> Self {
        Self {
            verdict,
            mx_tried,
            transcript,
            confidence,
        }
    }
}
