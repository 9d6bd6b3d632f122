//! Core traits for ACME DNS providers
//!
//! This module defines the abstract interfaces that all providers must follow.
//!
//! - [`DnsProvider`]: Fetch, append and delete challenge TXT records
//! - [`DnsProviderFactory`]: Build a provider from configuration

pub mod dns_provider;

pub use dns_provider::{DnsProvider, DnsProviderFactory};
