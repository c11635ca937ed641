use std::mem;

use tracing::debug;
use trust_dns_resolver::TokioAsyncResolver;

use crate::mx::{LookupMx, is_no_records};
use crate::parser::parse_address;
use crate::smtp_probe::error::{ProbeError, SessionError};
use crate::smtp_probe::options::ProbeOptions;
use crate::smtp_probe::session::{SmtpReply, SmtpSession};
use crate::smtp_probe::types::{MailboxVerdict, ProbeReport};
use crate::smtp_probe::util::{confidence_for, random_local_part};

/// Outcome of one host's dialogue, before the host loop weighs it.
#[derive(Debug)]
pub(crate) struct HostReport {
    pub(crate) verdict: MailboxVerdict,
    pub(crate) transcript: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RcptOutcome {
    Accepted,
    NoSuchMailbox,
    Greylisted,
    Other,
}

/// Ask the domain's exchangers whether `address` would be accepted at
/// RCPT time, without ever sending DATA.
///
/// Hosts are tried in MX preference order until one yields a conclusive
/// verdict. Connection failures move on to the next host; a server that
/// talks but answers strangely leaves an [`MailboxVerdict::Inconclusive`]
/// behind instead. The report carries the full dialogue transcript.
pub async fn probe_mailbox(
    address: &str,
    options: &ProbeOptions,
) -> Result<ProbeReport, ProbeError> {
    let parsed = parse_address(address).map_err(ProbeError::invalid_address)?;
    let domain = idna::domain_to_ascii(&parsed.domain).map_err(ProbeError::idna)?;
    let resolver =
        TokioAsyncResolver::tokio_from_system_conf().map_err(ProbeError::resolver_init)?;
    let candidates = resolve_candidates(&resolver, &domain, options.max_hosts).await?;

    let mut mx_tried = Vec::new();
    let mut transcript = Vec::new();
    let mut verdict = MailboxVerdict::Unreachable;

    for host in candidates {
        mx_tried.push(host.clone());
        match probe_host(&host, &parsed.local, &domain, options).await {
            Ok(report) => {
                transcript.extend(report.transcript);
                if report.verdict.is_conclusive() {
                    let confidence = confidence_for(&report.verdict);
                    return Ok(ProbeReport::new(
                        report.verdict,
                        mx_tried,
                        transcript,
                        confidence,
                    ));
                }
                verdict = report.verdict;
            }
            Err(err) => {
                debug!(host = %host, error = %err, "probe attempt failed");
                transcript.push(format!("[{host}] ! {err}"));
                if !matches!(err, SessionError::Connect { .. }) {
                    verdict = MailboxVerdict::Inconclusive(err.to_string());
                }
            }
        }
    }

    let confidence = confidence_for(&verdict);
    Ok(ProbeReport::new(verdict, mx_tried, transcript, confidence))
}

/// MX hostnames in preference order, deduplicated and capped. A domain
/// publishing no MX records falls back to its implicit exchanger, the
/// domain itself.
pub(crate) async fn resolve_candidates<R: LookupMx>(
    resolver: &R,
    domain: &str,
    max_hosts: usize,
) -> Result<Vec<String>, ProbeError> {
    let mut hosts = match resolver.lookup_mx(domain).await {
        Ok(hosts) => hosts,
        Err(err) if is_no_records(&err) => Vec::new(),
        Err(err) => return Err(ProbeError::lookup(err)),
    };
    hosts.sort();
    hosts.dedup();
    let mut names: Vec<String> = hosts.into_iter().map(|host| host.hostname).collect();
    if names.is_empty() {
        names.push(domain.to_string());
    }
    names.truncate(max_hosts.max(1));
    Ok(names)
}

pub(crate) async fn probe_host(
    host: &str,
    local: &str,
    domain: &str,
    options: &ProbeOptions,
) -> Result<HostReport, SessionError> {
    let mut session = SmtpSession::connect(host, options.port, options.timeout()).await?;

    let banner = session.read_banner().await?;
    if !banner.is_positive_completion() {
        session.quit().await;
        let reason = format!("unexpected banner {}", banner.code);
        return Ok(finish(&mut session, MailboxVerdict::Inconclusive(reason)));
    }

    let ehlo = session
        .send_command(&format!("EHLO {}", options.helo_name(domain)))
        .await?;
    if !ehlo.is_positive_completion() {
        session.quit().await;
        let reason = format!("EHLO refused with {}", ehlo.code);
        return Ok(finish(&mut session, MailboxVerdict::Inconclusive(reason)));
    }

    let default_sender = format!("postmaster@{domain}");
    let mail = session
        .send_command(&format!("MAIL FROM:<{}>", options.mail_from(&default_sender)))
        .await?;
    if !mail.is_positive_completion() {
        session.quit().await;
        let reason = format!("MAIL FROM refused with {}", mail.code);
        return Ok(finish(&mut session, MailboxVerdict::Inconclusive(reason)));
    }

    let rcpt = session
        .send_command(&format!("RCPT TO:<{local}@{domain}>"))
        .await?;
    match classify_rcpt(&rcpt) {
        RcptOutcome::NoSuchMailbox => {
            session.quit().await;
            return Ok(finish(&mut session, MailboxVerdict::Rejected));
        }
        RcptOutcome::Greylisted => {
            session.quit().await;
            return Ok(finish(&mut session, MailboxVerdict::Greylisted));
        }
        RcptOutcome::Other => {
            session.quit().await;
            let reason = format!("unexpected RCPT reply {}", rcpt.code);
            return Ok(finish(&mut session, MailboxVerdict::Inconclusive(reason)));
        }
        RcptOutcome::Accepted => {}
    }

    // The target was accepted. Random aliases now separate a real mailbox
    // from a catch-all policy that accepts anything.
    let mut accepted = 0u8;
    let mut rejected = 0u8;
    let mut tempfail = 0u8;
    for _ in 0..options.catch_all_probes {
        let alias = random_local_part(local.len());
        if alias == local {
            continue;
        }
        let reply = session
            .send_command(&format!("RCPT TO:<{alias}@{domain}>"))
            .await?;
        match classify_rcpt(&reply) {
            RcptOutcome::Accepted => accepted += 1,
            RcptOutcome::NoSuchMailbox => rejected += 1,
            RcptOutcome::Greylisted | RcptOutcome::Other => tempfail += 1,
        }
    }

    let _ = session.send_command("RSET").await;
    session.quit().await;
    let verdict = aggregate_catch_all(accepted, rejected, tempfail);
    Ok(finish(&mut session, verdict))
}

pub(crate) fn classify_rcpt(reply: &SmtpReply) -> RcptOutcome {
    if reply.is_positive_completion() {
        return RcptOutcome::Accepted;
    }
    match reply.code {
        // No-such-mailbox statuses from RFC 5321 section 4.2.3.
        550 | 551 | 553 => RcptOutcome::NoSuchMailbox,
        _ if reply.is_transient_failure() => RcptOutcome::Greylisted,
        _ => RcptOutcome::Other,
    }
}

/// Weigh the alias replies. Any accepted alias means acceptance of the
/// target proved nothing; a rejected alias shows the server really does
/// distinguish mailboxes.
pub(crate) fn aggregate_catch_all(accepted: u8, rejected: u8, tempfail: u8) -> MailboxVerdict {
    if accepted > 0 {
        MailboxVerdict::CatchAll
    } else if tempfail > 0 && rejected == 0 {
        MailboxVerdict::Inconclusive("temporary failure on catch-all probes".to_string())
    } else {
        MailboxVerdict::Deliverable
    }
}

fn finish(session: &mut SmtpSession, verdict: MailboxVerdict) -> HostReport {
    HostReport {
        verdict,
        transcript: mem::take(&mut session.transcript),
    }
}
