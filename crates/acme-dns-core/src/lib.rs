// # acme-dns-core
//
// Core library for ACME DNS-01 challenge providers.
//
// ## Architecture Overview
//
// This library holds everything a DNS-01 provider needs that is not tied to
// a specific backend API:
// - **Record**: Closed record model supplied by the caller (only TXT is accepted)
// - **names**: Name/value normalization (case folding, trailing dots, quotes)
// - **challenge**: Validation of a record into a canonical challenge key
// - **DnsProvider**: Trait for fetching/appending/deleting challenge records
// - **ProviderRegistry**: Plugin-based registry for DNS providers
// - **with_deadline**: Caller-side deadline for any provider operation
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Validation and normalization live here, backend
//    reconciliation lives in the provider crates
// 2. **Plugin-Based**: Providers are registered dynamically, no hard-coded if-else
// 3. **Library-First**: All core functionality can be used as a library
// 4. **No Hidden State**: Providers re-read the remote zone on every call

pub mod challenge;
pub mod config;
pub mod deadline;
pub mod error;
pub mod names;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use challenge::{ChallengeRecord, DEFAULT_TTL_SECS, validate_challenge_record};
pub use config::ProviderConfig;
pub use deadline::with_deadline;
pub use error::{Error, Result};
pub use record::{Record, TxtRecord};
pub use registry::ProviderRegistry;
pub use traits::{DnsProvider, DnsProviderFactory};
