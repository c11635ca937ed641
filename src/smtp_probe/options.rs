use std::borrow::Cow;
use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for [`probe_mailbox`].
///
/// [`probe_mailbox`]: crate::smtp_probe::probe_mailbox
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Name announced in EHLO; empty falls back to the target domain.
    pub helo_domain: String,
    /// Envelope sender; empty falls back to `postmaster@<domain>`.
    pub mail_from: String,
    /// Per-step deadline in milliseconds; 0 disables it.
    pub timeout_ms: u64,
    /// Preferred exchangers to try before giving up.
    pub max_hosts: usize,
    /// Random-alias RCPTs sent after the target is accepted, to expose
    /// catch-all servers. 0 skips the refinement.
    pub catch_all_probes: u8,
    /// SMTP port, 25 unless talking to a non-standard listener.
    pub port: u16,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            helo_domain: "localhost".to_string(),
            mail_from: String::new(),
            timeout_ms: 5_000,
            max_hosts: 3,
            catch_all_probes: 1,
            port: 25,
        }
    }
}

impl ProbeOptions {
    /// The per-step deadline as a [`Duration`]; zero disables it.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }

    pub fn helo_name<'a>(&'a self, fallback: &'a str) -> Cow<'a, str> {
        if self.helo_domain.trim().is_empty() {
            Cow::Borrowed(fallback)
        } else {
            Cow::Borrowed(self.helo_domain.as_str())
        }
    }

    pub fn mail_from<'a>(&'a self, fallback: &'a str) -> Cow<'a, str> {
        if self.mail_from.is_empty() {
            Cow::Borrowed(fallback)
        } else {
            Cow::Owned(self.mail_from.clone())
        }
    }
}
