//! DNS record model
//!
//! Records are supplied by the caller as desired (or undesired) state. The
//! model is a closed set of variants; providers extract the variant they
//! support and reject everything else with a typed error.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// A TXT record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxtRecord {
    /// Record name, relative to the zone or absolute (dot-terminated)
    pub name: String,
    /// Text content
    pub text: String,
    /// Time-to-live (zero means "provider default")
    #[serde(default, with = "ttl_secs")]
    pub ttl: Duration,
}

impl TxtRecord {
    /// Create a new TXT record
    pub fn new(name: impl Into<String>, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ttl,
        }
    }
}

/// A generic DNS record
///
/// The serde `type` tag names the variant (`TXT`, `ADDRESS`, `CNAME`,
/// `OTHER`), not the DNS mnemonic. `ADDRESS` covers both A and AAAA and
/// `OTHER` carries its mnemonic in `rtype`; use [`Record::record_type`] for
/// the wire type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Record {
    /// TXT record
    Txt(TxtRecord),

    /// A or AAAA record, depending on the address family
    Address {
        /// Record name
        name: String,
        /// Address
        ip: IpAddr,
        /// Time-to-live
        #[serde(default, with = "ttl_secs")]
        ttl: Duration,
    },

    /// CNAME record
    Cname {
        /// Record name
        name: String,
        /// Canonical target
        target: String,
        /// Time-to-live
        #[serde(default, with = "ttl_secs")]
        ttl: Duration,
    },

    /// Any other record type, carried as presentation-format data
    Other {
        /// Record name
        name: String,
        /// Record type (e.g. "MX", "CAA")
        rtype: String,
        /// Presentation-format data
        data: String,
        /// Time-to-live
        #[serde(default, with = "ttl_secs")]
        ttl: Duration,
    },
}

impl Record {
    /// Shorthand for a TXT record
    pub fn txt(name: impl Into<String>, text: impl Into<String>, ttl: Duration) -> Self {
        Self::Txt(TxtRecord::new(name, text, ttl))
    }

    /// The record name
    pub fn name(&self) -> &str {
        match self {
            Record::Txt(txt) => &txt.name,
            Record::Address { name, .. }
            | Record::Cname { name, .. }
            | Record::Other { name, .. } => name,
        }
    }

    /// The record time-to-live
    pub fn ttl(&self) -> Duration {
        match self {
            Record::Txt(txt) => txt.ttl,
            Record::Address { ttl, .. } | Record::Cname { ttl, .. } | Record::Other { ttl, .. } => {
                *ttl
            }
        }
    }

    /// The record type mnemonic
    pub fn record_type(&self) -> &str {
        match self {
            Record::Txt(_) => "TXT",
            Record::Address { ip: IpAddr::V4(_), .. } => "A",
            Record::Address { ip: IpAddr::V6(_), .. } => "AAAA",
            Record::Cname { .. } => "CNAME",
            Record::Other { rtype, .. } => rtype,
        }
    }

    /// The TXT payload, if this is a TXT record
    pub fn as_txt(&self) -> Option<&TxtRecord> {
        match self {
            Record::Txt(txt) => Some(txt),
            _ => None,
        }
    }
}

impl From<TxtRecord> for Record {
    fn from(txt: TxtRecord) -> Self {
        Record::Txt(txt)
    }
}

/// Serialize durations as whole seconds
mod ttl_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
