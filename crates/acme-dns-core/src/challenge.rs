//! Challenge record validation
//!
//! Turns a caller-supplied [`Record`] into the canonical challenge key a
//! provider is allowed to mutate: an absolute `_acme-challenge` name, the
//! TXT value and a TTL in whole seconds.

use crate::error::{Error, Result};
use crate::names::{absolute_name, is_challenge_name, trim_zone};
use crate::record::Record;
use std::time::Duration;

/// TTL used when a record does not carry one
pub const DEFAULT_TTL_SECS: u32 = 60;

/// A validated challenge record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRecord {
    /// Absolute, dot-terminated name (caller's casing is kept)
    pub fqdn: String,
    /// TXT value exactly as supplied
    pub value: String,
    /// TTL in whole seconds, never zero
    pub ttl_secs: u32,
}

/// Validate a record against a zone
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the zone is empty
/// - [`Error::UnsupportedRecordType`] for anything but TXT
/// - [`Error::NameNotAllowed`] if the name is not an `_acme-challenge` label
pub fn validate_challenge_record(zone: &str, record: &Record) -> Result<ChallengeRecord> {
    let zone = trim_zone(zone);
    if zone.is_empty() {
        return Err(Error::invalid_input("empty zone"));
    }

    let txt = record
        .as_txt()
        .ok_or_else(|| Error::UnsupportedRecordType(record.record_type().to_string()))?;

    let fqdn = absolute_name(&txt.name, zone);
    if !is_challenge_name(&fqdn) {
        return Err(Error::NameNotAllowed(fqdn));
    }

    let ttl_secs = match duration_to_secs(txt.ttl) {
        0 => DEFAULT_TTL_SECS,
        secs => secs,
    };

    Ok(ChallengeRecord {
        fqdn,
        value: txt.text.clone(),
        ttl_secs,
    })
}

/// Whole seconds, rounding any sub-second remainder up
fn duration_to_secs(ttl: Duration) -> u32 {
    let secs = ttl.as_secs().saturating_add(u64::from(ttl.subsec_nanos() > 0));
    u32::try_from(secs).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    const ZONE: &str = "example.com.";

    #[test]
    fn test_non_txt_rejected() {
        let cname = Record::Cname {
            name: "_acme-challenge".into(),
            target: "x.example.com.".into(),
            ttl: Duration::from_secs(60),
        };
        let err = validate_challenge_record(ZONE, &cname).unwrap_err();
        assert!(matches!(err, Error::UnsupportedRecordType(ref t) if t == "CNAME"));
        assert!(err.is_validation());

        let a = Record::Address {
            name: "_acme-challenge".into(),
            ip: IpAddr::from([192, 0, 2, 1]),
            ttl: Duration::ZERO,
        };
        assert!(matches!(
            validate_challenge_record(ZONE, &a),
            Err(Error::UnsupportedRecordType(_))
        ));
    }

    #[test]
    fn test_wrong_name_rejected() {
        for name in ["www", "@", "acme-challenge", "_acme-challengex", "www._acme-challenge"] {
            let rec = Record::txt(name, "nope", Duration::from_secs(60));
            let err = validate_challenge_record(ZONE, &rec).unwrap_err();
            assert!(matches!(err, Error::NameNotAllowed(_)), "{name} should be rejected");
        }
    }

    #[test]
    fn test_challenge_names_accepted() {
        let rec = Record::txt("_acme-challenge", "ok", Duration::from_secs(60));
        let got = validate_challenge_record(ZONE, &rec).unwrap();
        assert_eq!(got.fqdn, "_acme-challenge.example.com.");
        assert_eq!(got.value, "ok");
        assert_eq!(got.ttl_secs, 60);

        let rec = Record::txt("_ACME-Challenge.servera", "ok", Duration::from_secs(60));
        let got = validate_challenge_record("example.com", &rec).unwrap();
        assert_eq!(got.fqdn, "_ACME-Challenge.servera.example.com.");

        let rec = Record::txt("_acme-challenge.example.com.", "ok", Duration::from_secs(60));
        let got = validate_challenge_record(ZONE, &rec).unwrap();
        assert_eq!(got.fqdn, "_acme-challenge.example.com.");
    }

    #[test]
    fn test_empty_zone_rejected() {
        let rec = Record::txt("_acme-challenge", "ok", Duration::from_secs(60));
        for zone in ["", ".", "  "] {
            let err = validate_challenge_record(zone, &rec).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
    }

    #[test]
    fn test_ttl_rounding_and_default() {
        let ttl_of = |ttl: Duration| {
            let rec = Record::txt("_acme-challenge", "ok", ttl);
            validate_challenge_record(ZONE, &rec).unwrap().ttl_secs
        };

        assert_eq!(ttl_of(Duration::ZERO), DEFAULT_TTL_SECS);
        assert_eq!(ttl_of(Duration::from_millis(1)), 1);
        assert_eq!(ttl_of(Duration::from_millis(1500)), 2);
        assert_eq!(ttl_of(Duration::from_secs(120)), 120);
        assert_eq!(ttl_of(Duration::from_secs(u64::from(u32::MAX) + 1)), u32::MAX);
        assert_eq!(ttl_of(Duration::MAX), u32::MAX);
    }

    #[test]
    fn test_value_not_unquoted() {
        let rec = Record::txt("_acme-challenge", "\"tok1\"", Duration::from_secs(60));
        let got = validate_challenge_record(ZONE, &rec).unwrap();
        assert_eq!(got.value, "\"tok1\"");
    }
}
