// # DNS Provider Trait
//
// Defines the interface an ACME client uses to present and clean up DNS-01
// challenge records.
//
// ## Implementations
//
// - RcodeZero: `acme-dns-provider-rcodezero` crate
//
// ## Usage
//
// ```rust,ignore
// use acme_dns_core::{DnsProvider, Record};
// use std::time::Duration;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//     let txt = Record::txt("_acme-challenge", "token", Duration::from_secs(60));
//
//     // Present
//     provider.append_records("example.com.", &[txt.clone()]).await?;
//     // ... wait for the CA to validate ...
//     // Clean up
//     provider.delete_records("example.com.", &[txt]).await?;
//
//     Ok(())
// }
// ```

use crate::record::Record;
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// A provider converges the remote zone towards the records the caller
/// hands it. Every call re-reads remote state; nothing is cached between
/// calls.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
/// Operations on different names are independent; concurrent appends to the
/// same name from different processes may race.
///
/// # Batches
///
/// Records in one call are processed strictly in order. The first error
/// aborts the batch and is returned as-is; records processed before it stay
/// applied (no rollback).
///
/// # Retries
///
/// Providers never retry. A failed call returns its error immediately and
/// the caller decides what to do.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List the challenge records currently served for a zone
    ///
    /// Names are returned relative to the zone.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, crate::Error>;

    /// Add records to the zone, merging with values already present
    ///
    /// # Returns
    ///
    /// The input records, unchanged, once all of them have been applied.
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;

    /// Set records in the zone
    ///
    /// Providers for challenge-only APIs may implement this as
    /// [`append_records`](DnsProvider::append_records); see the provider docs.
    async fn set_records(&self, zone: &str, records: &[Record])
    -> Result<Vec<Record>, crate::Error>;

    /// Remove exactly the given values from the zone
    ///
    /// Removing a value that does not exist is not an error.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    ///
    /// # Errors
    ///
    /// Configuration problems (missing credentials, unparsable endpoint) are
    /// reported here, never later at call time.
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}
