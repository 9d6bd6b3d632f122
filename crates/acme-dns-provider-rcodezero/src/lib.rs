// # RcodeZero ACME DNS Provider
//
// This crate provides a DNS-01 challenge provider for the RcodeZero ACME
// RRset API.
//
// ## Scope
//
// - Only TXT records, only at `_acme-challenge` names (rejected otherwise)
// - The backend mutates whole RRsets, so appends read the current RRset,
//   merge, and write it back; deletes remove one value by content
// - Each record in a batch is validated, read and written on its own, in order
// - NO retry logic: the first failure aborts the batch and is returned
// - NO caching: the zone is re-read on every append and listing
// - NO background tasks
//
// ## Dry-Run Mode
//
// With `ACME_DNS_MODE=dry-run` the factory builds a provider that performs
// every read but only logs the PATCH payload it would have sent.
//
// ## Security
//
// - API token NEVER appears in logs or Debug output
// - Provider construction fails fast if the token is empty
//
// ## API Reference
//
// - List RRsets: GET `/api/v1/acme/zones/{zone}/rrsets?page=&page_size=`
// - Mutate RRsets: PATCH `/api/v1/acme/zones/{zone}/rrsets`

pub mod client;
pub mod reconcile;
pub mod rrsets;
pub mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT, RcodeZeroClient, RrsetApi};
pub use rrsets::{RRSET_PAGE_SIZE, ValueSet};
pub use types::{ApiResponse, ChangeType, RecordEntry, Rrset, RrsetChange, RrsetPage};

use acme_dns_core::config::ProviderConfig;
use acme_dns_core::names::trim_zone;
use acme_dns_core::traits::{DnsProvider, DnsProviderFactory};
use acme_dns_core::{Error, Record, Result, validate_challenge_record};
use async_trait::async_trait;
use std::time::Duration;

/// Provider name used for registration and logging
pub const PROVIDER_NAME: &str = "rcodezero";

/// RcodeZero DNS-01 provider
///
/// Generic over the backend so the reconciliation logic can run against any
/// [`RrsetApi`]; production code uses [`RcodeZeroClient`].
#[derive(Debug)]
pub struct RcodeZeroProvider<A = RcodeZeroClient> {
    /// Backend API
    api: A,

    /// Dry-run mode: if true, perform reads but skip PATCH requests
    dry_run: bool,
}

impl RcodeZeroProvider<RcodeZeroClient> {
    /// Create a new RcodeZero provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: RcodeZero API token with ACME permissions
    /// - `base_url`: Endpoint override (defaults to the public API)
    /// - `timeout`: Per-request HTTP timeout (defaults to 10 seconds)
    /// - `dry_run`: If true, perform reads but skip mutations
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for an empty token or an unusable base URL.
    pub fn new(
        api_token: impl Into<String>,
        base_url: Option<&str>,
        timeout: Option<Duration>,
        dry_run: bool,
    ) -> Result<Self> {
        let client = RcodeZeroClient::new(
            api_token,
            base_url,
            timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT),
        )?;
        Ok(Self::with_api(client, dry_run))
    }

    /// Create a new provider in live mode against the public API
    pub fn new_live(api_token: impl Into<String>) -> Result<Self> {
        Self::new(api_token, None, None, false)
    }

    /// Create a new provider in dry-run mode against the public API
    pub fn new_dry_run(api_token: impl Into<String>) -> Result<Self> {
        Self::new(api_token, None, None, true)
    }
}

impl<A: RrsetApi> RcodeZeroProvider<A> {
    /// Create a provider on top of an existing backend
    pub fn with_api(api: A, dry_run: bool) -> Self {
        Self { api, dry_run }
    }

    /// Whether mutations are only logged
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Validate, read, merge and write one record
    async fn append_one(&self, zone: &str, record: &Record) -> Result<()> {
        let target = validate_challenge_record(zone, record)?;
        let current = rrsets::read_value_set(&self.api, zone, &target.fqdn).await?;
        let change = reconcile::plan_append(&current, &target);
        self.submit(zone, change).await
    }

    /// Validate and delete one record value
    async fn delete_one(&self, zone: &str, record: &Record) -> Result<()> {
        let target = validate_challenge_record(zone, record)?;
        let change = reconcile::plan_delete(&target);
        self.submit(zone, change).await
    }

    async fn submit(&self, zone: &str, change: RrsetChange) -> Result<()> {
        tracing::info!(
            "{} {:?} {} ({} value(s), ttl {}) [mode: {}]",
            if self.dry_run { "Would submit" } else { "Submitting" },
            change.changetype,
            change.name,
            change.records.len(),
            change.ttl,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send PATCH for zone {} with payload: {}",
                zone,
                serde_json::to_string(&[&change])?
            );
            return Ok(());
        }

        let response = self.api.patch_rrsets(zone, &[change]).await?;
        tracing::debug!("RRset mutation accepted: {}", response.message);
        Ok(())
    }
}

/// Trimmed zone, rejecting empty input before any request is made
fn require_zone(zone: &str) -> Result<&str> {
    let trimmed = trim_zone(zone);
    if trimmed.is_empty() {
        return Err(Error::invalid_input("empty zone"));
    }
    Ok(trimmed)
}

#[async_trait]
impl<A: RrsetApi> DnsProvider for RcodeZeroProvider<A> {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        let zone = require_zone(zone)?;
        let records = rrsets::list_challenge_txt(&self.api, zone).await?;
        Ok(records.into_iter().map(Record::Txt).collect())
    }

    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let zone = require_zone(zone)?;
        for record in records {
            self.append_one(zone, record).await?;
        }
        Ok(records.to_vec())
    }

    /// Implemented as [`append_records`](DnsProvider::append_records)
    ///
    /// Values already served at the name but absent from `records` are kept:
    /// the backend has no way to replace an RRset's contents that is safe
    /// against other challenges in flight at the same name, and ACME clients
    /// only ever present and clean up.
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.append_records(zone, records).await
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let zone = require_zone(zone)?;
        for record in records {
            self.delete_one(zone, record).await?;
        }
        Ok(records.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating RcodeZero providers
pub struct RcodeZeroFactory;

impl DnsProviderFactory for RcodeZeroFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::RcodeZero {
                api_token,
                base_url,
                timeout_secs,
            } => {
                if api_token.trim().is_empty() {
                    return Err(Error::config("RcodeZero API token is required"));
                }

                // Check for dry-run mode environment variable
                let dry_run = std::env::var("ACME_DNS_MODE")
                    .unwrap_or_default()
                    .eq_ignore_ascii_case("dry-run");

                if dry_run {
                    tracing::warn!("RcodeZero provider running in DRY-RUN mode - no changes will be made");
                }

                Ok(Box::new(RcodeZeroProvider::new(
                    api_token.clone(),
                    base_url.as_deref(),
                    timeout_secs.map(Duration::from_secs),
                    dry_run,
                )?))
            }
            _ => Err(Error::config("Invalid config for RcodeZero provider")),
        }
    }
}

/// Register the RcodeZero provider with a registry
///
/// # Example
///
/// ```rust
/// use acme_dns_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// acme_dns_provider_rcodezero::register(&registry);
/// assert!(registry.has_provider("rcodezero"));
/// ```
pub fn register(registry: &acme_dns_core::ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(RcodeZeroFactory));
}
