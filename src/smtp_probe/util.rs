use rand::{Rng, distributions::Alphanumeric};

use crate::smtp_probe::types::MailboxVerdict;

/// Random alias local part, sized like the target's so length-based
/// server policies treat both the same.
pub(crate) fn random_local_part(len: usize) -> String {
    let length = len.clamp(6, 32);
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub(crate) fn confidence_for(verdict: &MailboxVerdict) -> f32 {
    match verdict {
        MailboxVerdict::Deliverable | MailboxVerdict::Rejected => 0.95,
        MailboxVerdict::CatchAll => 0.7,
        MailboxVerdict::Greylisted | MailboxVerdict::Inconclusive(_) => 0.4,
        MailboxVerdict::Unreachable => 0.2,
    }
}
