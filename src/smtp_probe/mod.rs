//! Live mailbox probing over SMTP (feature `with-smtp-probe`).
//!
//! [`probe_mailbox`] opens a real SMTP dialogue with the domain's
//! exchangers and stops right after `RCPT TO`, never sending `DATA`.
//! This is a best-effort refinement on top of validation, not a truth
//! oracle: greylisting, catch-all policies and probe-hostile servers all
//! yield non-conclusive verdicts, and many networks block outbound
//! port 25 entirely. Treat [`MailboxVerdict::Deliverable`] and
//! [`MailboxVerdict::Rejected`] as strong signals and everything else
//! as "unknown".

mod error;
mod options;
mod probe;
mod session;
mod types;
mod util;

pub use error::ProbeError;
pub use options::ProbeOptions;
pub use probe::probe_mailbox;
pub use types::{MailboxVerdict, ProbeReport};
