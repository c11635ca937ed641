#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use mailscore::{EngineStats, RoutabilityErrorKind, ValidationResult};

#[cfg(feature = "with-smtp-probe")]
use mailscore::ProbeReport;

use crate::args::Cli;

pub fn write_reports(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_not_accepted(rows: &[ValidationResult]) -> bool {
    rows.iter().any(|row| !row.accepted())
}

fn write_human(rows: &[ValidationResult]) -> Result<()> {
    for row in rows {
        let cached = if row.served_from_cache { " (cache)" } else { "" };
        println!(
            "[{}] {} :: score={} tier={} risk={}{}",
            row.recommendation.to_string().to_uppercase(),
            row.address,
            row.score,
            row.quality_tier,
            row.risk_tier,
            cached,
        );

        if let Some(issue) = &row.error {
            println!("         error: {}", issue.message);
        }
        if let Some(correction) = &row.signals.correction {
            if correction.was_corrected {
                println!(
                    "         correction: {} -> {} (confiance {:.2})",
                    correction.original_domain, correction.corrected_domain, correction.confidence
                );
            }
        }
        if let Some(disposable) = &row.signals.disposable {
            if disposable.is_disposable {
                let rule = disposable.matched_rule.as_deref().unwrap_or("-");
                println!(
                    "         disposable: {rule} (confiance {})",
                    disposable.confidence
                );
            }
        }
        if let Some(mx) = &row.signals.routability {
            if mx.routable {
                println!("         mx: {} serveur(s)", mx.mail_exchanges.len());
            } else {
                println!("         mx: aucun ({})", error_kind_str(mx.error_kind));
            }
        }
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[ValidationResult], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[ValidationResult], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.write_record(&csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        for row in rows {
            wtr.write_record(&csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[ValidationResult], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

// Colonnes stables : adresse, validité, score, tier, recommandation,
// risque, cache, correction, jetable, règle, routable, nb MX, erreur MX,
// erreur.
#[cfg(feature = "with-csv")]
fn csv_record(row: &ValidationResult) -> Vec<String> {
    let correction = row.signals.correction.as_ref();
    let disposable = row.signals.disposable.as_ref();
    let routability = row.signals.routability.as_ref();

    vec![
        row.address.clone(),
        row.is_valid.to_string(),
        row.score.to_string(),
        row.quality_tier.to_string(),
        row.recommendation.to_string(),
        row.risk_tier.to_string(),
        row.served_from_cache.to_string(),
        correction
            .filter(|c| c.was_corrected)
            .map(|c| c.corrected_domain.clone())
            .unwrap_or_default(),
        disposable
            .map(|d| d.is_disposable.to_string())
            .unwrap_or_default(),
        disposable
            .and_then(|d| d.matched_rule.clone())
            .unwrap_or_default(),
        routability
            .map(|r| r.routable.to_string())
            .unwrap_or_default(),
        routability
            .map(|r| r.mail_exchanges.len().to_string())
            .unwrap_or_default(),
        routability
            .map(|r| error_kind_str(r.error_kind).to_string())
            .unwrap_or_default(),
        row.error
            .as_ref()
            .map(|issue| issue.message.clone())
            .unwrap_or_default(),
    ]
}

pub fn write_stats(stats: &EngineStats, cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => {
            println!("result cache entries : {}", stats.cache_size);
            println!("disposable rules     : {}", stats.disposable_rule_count);
            println!("correction rules     : {}", stats.correction_rule_count);
            Ok(())
        }
        "json" | "ndjson" => write_stats_json(stats, cli),
        other => bail!("stats: format '{other}' non géré, utiliser human|json"),
    }
}

#[cfg(feature = "with-serde")]
fn write_stats_json(stats: &EngineStats, cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(stats)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_stats_json(_: &EngineStats, _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-smtp-probe")]
pub fn write_probe(report: &ProbeReport, cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => {
            println!("verdict   : {}", report.verdict);
            println!("confiance : {:.2}", report.confidence);
            println!("mx testés : {}", report.mx_tried.join(", "));
            for line in &report.transcript {
                println!("  {line}");
            }
            Ok(())
        }
        "json" | "ndjson" => write_probe_json(report, cli),
        other => bail!("probe: format '{other}' non géré, utiliser human|json"),
    }
}

#[cfg(all(feature = "with-smtp-probe", feature = "with-serde"))]
fn write_probe_json(report: &ProbeReport, cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(report)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(all(feature = "with-smtp-probe", not(feature = "with-serde")))]
fn write_probe_json(_: &ProbeReport, _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

fn error_kind_str(kind: RoutabilityErrorKind) -> &'static str {
    match kind {
        RoutabilityErrorKind::None => "none",
        RoutabilityErrorKind::NoRecords => "no-records",
        RoutabilityErrorKind::ResolutionFailed => "resolution-failed",
        RoutabilityErrorKind::Timeout => "timeout",
    }
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
