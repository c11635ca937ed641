use clap::{Parser, Subcommand};
use mailscore::{EngineConfig, ValidationOptions};

#[derive(Parser)]
#[command(name = "mailscore-cli", version, about = "Validation d'adresses e-mail en masse")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// format: human|json|ndjson|csv
    #[arg(long, global = true, default_value = "human")]
    pub format: String,

    /// écrit le rapport dans un fichier (écriture atomique)
    #[arg(long, global = true)]
    pub out: Option<String>,

    /// saute la vérification MX
    #[arg(long = "no-dns", global = true)]
    pub no_dns: bool,

    /// saute la détection d'adresses jetables
    #[arg(long = "no-disposable", global = true)]
    pub no_disposable: bool,

    /// ignore le cache de résultats
    #[arg(long = "no-cache", global = true)]
    pub no_cache: bool,

    /// adresses validées en parallèle dans un lot
    #[arg(long, global = true, default_value_t = 10)]
    pub concurrency: usize,

    /// délai maximum d'une résolution MX (ms)
    #[arg(long = "dns-timeout-ms", global = true, default_value_t = 5_000)]
    pub dns_timeout_ms: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// valide une seule adresse
    Validate {
        /// adresse e-mail à valider
        address: String,
    },
    /// valide un lot d'adresses (fichier ou stdin, une par ligne)
    Batch {
        /// fichier d'adresses
        file: Option<String>,
        /// lit les adresses depuis stdin
        #[arg(long)]
        stdin: bool,
    },
    /// affiche les compteurs du moteur
    Stats,
    /// sonde la boîte aux lettres via SMTP (RCPT TO, jamais DATA)
    #[cfg(feature = "with-smtp-probe")]
    Probe {
        /// adresse e-mail à sonder
        address: String,
        /// nom annoncé dans EHLO
        #[arg(long)]
        helo: Option<String>,
        /// enveloppe MAIL FROM (par défaut postmaster@domaine)
        #[arg(long = "from")]
        mail_from: Option<String>,
        /// adresses aléatoires envoyées pour détecter un catch-all
        #[arg(long = "catchall-probes", default_value_t = 1)]
        catchall_probes: u8,
        /// nombre maximum d'MX contactés
        #[arg(long = "max-mx", default_value_t = 3)]
        max_mx: usize,
        /// délai maximum par étape SMTP (ms)
        #[arg(long = "timeout", default_value_t = 5_000)]
        timeout_ms: u64,
    },
}

impl Cli {
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            check_routability: !self.no_dns,
            check_disposable: !self.no_disposable,
            use_cache: !self.no_cache,
            batch_concurrency: self.concurrency,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            dns_timeout_ms: self.dns_timeout_ms,
            ..EngineConfig::default()
        }
    }
}
