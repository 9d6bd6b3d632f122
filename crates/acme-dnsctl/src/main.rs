// # acme-dnsctl - ACME DNS-01 challenge control
//
// This binary is a THIN integration layer:
// - DO NOT add DNS, merge or pagination logic here
// - All challenge record logic lives in acme-dns-core and the provider crates
// - Provider configuration is via environment variables ONLY
// - Command-line arguments select the operation and its record
//
// The acme-dnsctl binary is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Registering providers and building the configured one
// 4. Running one operation under a deadline
//
// ## Configuration
//
// - `ACME_DNS_PROVIDER_TYPE`: Provider type (rcodezero, default)
// - `ACME_DNS_API_TOKEN`: API token (required)
// - `ACME_DNS_BASE_URL`: API endpoint override (optional)
// - `ACME_DNS_TIMEOUT_SECS`: Per-request HTTP timeout (optional)
// - `ACME_DNS_ZONE`: Zone the challenge records live in (required)
// - `ACME_DNS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `ACME_DNS_MODE`: Set to `dry-run` to log mutations without sending them
//
// ## Example
//
// ```bash
// export ACME_DNS_API_TOKEN=your_token
// export ACME_DNS_ZONE=example.com
//
// acme-dnsctl present _acme-challenge.www "gfj9Xq...Rg85nM"
// acme-dnsctl list
// acme-dnsctl cleanup _acme-challenge.www "gfj9Xq...Rg85nM"
// ```

use acme_dns_core::{DnsProvider, ProviderConfig, ProviderRegistry, Record, with_deadline};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Operation completed
/// - 1: Configuration or startup error
/// - 2: Runtime error (provider or API failure, deadline exceeded)
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Manage ACME DNS-01 challenge TXT records
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Abort the operation after this many seconds
    #[arg(long, default_value_t = 60)]
    deadline_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List the challenge TXT records of the zone
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a challenge value, keeping values already present
    Present {
        /// Record name, relative to the zone or absolute with a trailing dot
        name: String,
        /// TXT value
        value: String,
        /// TTL in seconds (0 or unset uses the provider default)
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Remove one challenge value
    Cleanup {
        /// Record name, relative to the zone or absolute with a trailing dot
        name: String,
        /// TXT value
        value: String,
    },

    /// Set the challenge values at a name
    Replace {
        /// Record name, relative to the zone or absolute with a trailing dot
        name: String,
        /// TXT values
        #[arg(required = true)]
        values: Vec<String>,
    },
}

/// Application configuration
#[derive(Clone)]
struct Config {
    provider_type: String,
    api_token: String,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    zone: String,
    log_level: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("provider_type", &self.provider_type)
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("zone", &self.zone)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            provider_type: env::var("ACME_DNS_PROVIDER_TYPE")
                .unwrap_or_else(|_| "rcodezero".to_string()),
            api_token: env::var("ACME_DNS_API_TOKEN").context(
                "ACME_DNS_API_TOKEN is required. Set it via: export ACME_DNS_API_TOKEN=your_token",
            )?,
            base_url: env::var("ACME_DNS_BASE_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            timeout_secs: env::var("ACME_DNS_TIMEOUT_SECS")
                .ok()
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .context("ACME_DNS_TIMEOUT_SECS must be a whole number of seconds")?,
            zone: env::var("ACME_DNS_ZONE")
                .context("ACME_DNS_ZONE is required. Set it via: export ACME_DNS_ZONE=example.com")?,
            log_level: env::var("ACME_DNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let token = self.api_token.trim();
        if token.is_empty() {
            anyhow::bail!(
                "ACME_DNS_API_TOKEN is required. \
                Set it via: export ACME_DNS_API_TOKEN=your_token"
            );
        }

        // Check for obvious placeholder tokens (common mistake)
        let token_lower = token.to_lowercase();
        if token_lower.contains("your_token")
            || token_lower.contains("replace_me")
            || token_lower == "token"
        {
            anyhow::bail!(
                "ACME_DNS_API_TOKEN appears to be a placeholder. \
                Use an actual API token from your DNS provider."
            );
        }

        match self.provider_type.as_str() {
            "rcodezero" => {}
            _ => anyhow::bail!(
                "ACME_DNS_PROVIDER_TYPE '{}' is not supported. \
                Supported providers: rcodezero",
                self.provider_type
            ),
        }

        validate_zone_name(&self.zone)?;

        if let Some(url) = &self.base_url
            && !url.starts_with("https://")
            && !url.starts_with("http://")
        {
            anyhow::bail!("ACME_DNS_BASE_URL must use HTTP or HTTPS scheme. Got: {}", url);
        }

        if let Some(timeout) = self.timeout_secs
            && !(1..=300).contains(&timeout)
        {
            anyhow::bail!(
                "ACME_DNS_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                timeout
            );
        }

        parse_log_level(&self.log_level)?;

        Ok(())
    }

    /// Provider configuration handed to the registry
    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::RcodeZero {
            api_token: self.api_token.trim().to_string(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Basic RFC 1035 checks on the zone name; one trailing dot is allowed
fn validate_zone_name(zone: &str) -> Result<()> {
    let zone = zone.trim();
    let zone = zone.strip_suffix('.').unwrap_or(zone);

    if zone.is_empty() {
        anyhow::bail!("ACME_DNS_ZONE cannot be empty");
    }

    if zone.len() > 253 {
        anyhow::bail!("Zone name too long: {} chars (max 253). Got: {}", zone.len(), zone);
    }

    for label in zone.split('.') {
        if label.is_empty() {
            anyhow::bail!("Zone name has empty label: '{}'", zone);
        }

        if label.len() > 63 {
            anyhow::bail!(
                "Zone label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            );
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            anyhow::bail!(
                "Zone label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            );
        }

        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!("Zone label cannot start or end with hyphen. Label: '{}'", label);
        }
    }

    Ok(())
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "ACME_DNS_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let log_level = parse_log_level(&config.log_level).unwrap_or(Level::INFO);

    // stdout carries command output only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    let provider = match build_provider(&config) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to create provider: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let deadline = Duration::from_secs(cli.deadline_secs);
    let result = rt.block_on(async {
        match run(provider.as_ref(), &config.zone, cli.command, deadline).await {
            Ok(()) => CtlExitCode::Success,
            Err(e) => {
                error!("Operation failed: {:#}", e);
                CtlExitCode::RuntimeError
            }
        }
    });

    result.into()
}

fn build_provider(config: &Config) -> Result<Box<dyn DnsProvider>> {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "rcodezero")]
    acme_dns_provider_rcodezero::register(&registry);

    info!(
        "Using provider {} (registered: {})",
        config.provider_type,
        registry.list_providers().join(", ")
    );

    Ok(registry.create_provider(&config.provider_config())?)
}

/// Run one command against the provider under a deadline
async fn run(provider: &dyn DnsProvider, zone: &str, command: Command, deadline: Duration) -> Result<()> {
    match command {
        Command::List { json } => {
            let records = with_deadline(deadline, provider.get_records(zone)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!("{}", format_record(record));
                }
            }
            info!("Listed {} challenge record(s) in {}", records.len(), zone);
        }
        Command::Present { name, value, ttl } => {
            let record = Record::txt(name, value, Duration::from_secs(ttl.unwrap_or(0)));
            with_deadline(deadline, provider.append_records(zone, &[record])).await?;
            info!("Challenge record presented in {}", zone);
        }
        Command::Cleanup { name, value } => {
            let record = Record::txt(name, value, Duration::ZERO);
            with_deadline(deadline, provider.delete_records(zone, &[record])).await?;
            info!("Challenge record cleaned up in {}", zone);
        }
        Command::Replace { name, values } => {
            let records: Vec<Record> = values
                .into_iter()
                .map(|value| Record::txt(name.clone(), value, Duration::ZERO))
                .collect();
            with_deadline(deadline, provider.set_records(zone, &records)).await?;
            info!("{} challenge value(s) set at {} in {}", records.len(), name, zone);
        }
    }

    Ok(())
}

/// One line per record: name, TTL, quoted value
fn format_record(record: &Record) -> String {
    match record.as_txt() {
        Some(txt) => format!("{}\t{}\tTXT\t\"{}\"", txt.name, txt.ttl.as_secs(), txt.text),
        None => format!(
            "{}\t{}\t{}",
            record.name(),
            record.ttl().as_secs(),
            record.record_type()
        ),
    }
}
