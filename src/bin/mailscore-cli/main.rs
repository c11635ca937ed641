//! Interface ligne de commande du moteur mailscore.

mod args;
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use clap::Parser;
use mailscore::{Engine, ValidationResult};

use crate::args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Validate { address } => {
            let engine = Engine::new(cli.engine_config()).context("démarrage du moteur")?;
            let rows = vec![engine.validate(address, &cli.validation_options()).await];
            finish(&rows, &cli)
        }
        Commands::Batch { file, stdin } => {
            let addresses = read_addresses(file.as_deref(), *stdin)?;
            let engine = Engine::new(cli.engine_config()).context("démarrage du moteur")?;
            let rows = engine
                .validate_batch(&addresses, &cli.validation_options())
                .await;
            finish(&rows, &cli)
        }
        Commands::Stats => {
            let engine = Engine::new(cli.engine_config()).context("démarrage du moteur")?;
            output::write_stats(&engine.stats().await, &cli)
        }
        #[cfg(feature = "with-smtp-probe")]
        Commands::Probe {
            address,
            helo,
            mail_from,
            catchall_probes,
            max_mx,
            timeout_ms,
        } => {
            let mut options = mailscore::ProbeOptions::default();
            if let Some(helo) = helo {
                options.helo_domain = helo.clone();
            }
            if let Some(from) = mail_from {
                options.mail_from = from.clone();
            }
            options.catch_all_probes = *catchall_probes;
            options.max_hosts = *max_mx;
            options.timeout_ms = *timeout_ms;

            let report = mailscore::probe_mailbox(address, &options)
                .await
                .context("sonde SMTP")?;
            output::write_probe(&report, &cli)
        }
    }
}

/// Écrit les rapports puis fixe le code de sortie : 1 dès qu'une adresse
/// n'est pas acceptée.
fn finish(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    output::write_reports(rows, cli)?;
    if output::any_not_accepted(rows) {
        std::process::exit(1);
    }
    Ok(())
}

fn read_addresses(file: Option<&str>, stdin: bool) -> Result<Vec<String>> {
    if stdin {
        let mut addresses = Vec::new();
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                addresses.push(trimmed.to_string());
            }
        }
        Ok(addresses)
    } else if let Some(path) = file {
        let data = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
        Ok(data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    } else {
        bail!("batch attend un fichier d'adresses ou --stdin");
    }
}
