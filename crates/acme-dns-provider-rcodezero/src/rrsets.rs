//! RRset reader
//!
//! Walks the paginated RRset listing and folds TXT RRsets at challenge
//! names into caller-facing records or into the value set of one name.
//! Nothing read here outlives the call.

use crate::client::RrsetApi;
use crate::types::{Rrset, RrsetPage};
use acme_dns_core::names::{is_challenge_name, normalize_name, relative_name, unquote_value};
use acme_dns_core::{Result, TxtRecord};
use std::collections::BTreeSet;
use std::time::Duration;

/// Page size used for every listing request
pub const RRSET_PAGE_SIZE: u32 = 100;

/// Enabled values of one RRset plus the TTL it is served with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    /// Unquoted values
    pub values: BTreeSet<String>,
    /// Serving TTL in seconds, 0 if no RRset was found
    pub ttl: u32,
}

impl ValueSet {
    /// No RRset (or no enabled value) exists at the name
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// List the enabled challenge TXT values of a zone
///
/// Every page is fetched on every call. Names are returned relative to the
/// zone, values with one layer of quotes removed, disabled entries skipped.
pub async fn list_challenge_txt<A>(api: &A, zone: &str) -> Result<Vec<TxtRecord>>
where
    A: RrsetApi + ?Sized,
{
    let mut out = Vec::new();
    let mut page = 1;

    loop {
        let resp = api.get_rrsets(zone, page, RRSET_PAGE_SIZE).await?;

        for rrset in resp.data.iter().filter(|rr| is_challenge_txt(rr)) {
            let name = relative_name(&rrset.name, zone);
            let ttl = Duration::from_secs(u64::from(rrset.ttl));

            out.extend(
                rrset
                    .records
                    .iter()
                    .filter(|entry| !entry.disabled)
                    .map(|entry| TxtRecord::new(name.clone(), unquote_value(&entry.content), ttl)),
            );
        }

        if is_last_page(&resp, page) {
            break;
        }
        page += 1;
    }

    tracing::debug!("Found {} challenge TXT value(s) in zone {}", out.len(), zone);
    Ok(out)
}

/// Read the value set currently served at `target`
///
/// Stops at the first TXT RRset whose name matches the target. A missing
/// RRset is not an error: the result is empty with TTL 0.
pub async fn read_value_set<A>(api: &A, zone: &str, target: &str) -> Result<ValueSet>
where
    A: RrsetApi + ?Sized,
{
    let mut page = 1;

    loop {
        let resp = api.get_rrsets(zone, page, RRSET_PAGE_SIZE).await?;

        let found = resp
            .data
            .iter()
            .filter(|rr| rr.rtype.eq_ignore_ascii_case("TXT"))
            .find(|rr| names_match(&rr.name, target, zone));

        if let Some(rrset) = found {
            let values = rrset
                .records
                .iter()
                .filter(|entry| !entry.disabled)
                .map(|entry| unquote_value(&entry.content).to_string())
                .collect();

            tracing::debug!("Found TXT RRset {} (ttl {})", rrset.name, rrset.ttl);
            return Ok(ValueSet {
                values,
                ttl: rrset.ttl,
            });
        }

        if is_last_page(&resp, page) {
            break;
        }
        page += 1;
    }

    tracing::debug!("No TXT RRset at {}", target);
    Ok(ValueSet::default())
}

fn is_challenge_txt(rrset: &Rrset) -> bool {
    rrset.rtype.eq_ignore_ascii_case("TXT") && is_challenge_name(&rrset.name)
}

/// Listing stops once the reported last page is reached or unknown (0)
fn is_last_page(resp: &RrsetPage, requested: u32) -> bool {
    resp.last_page == 0 || resp.last_page <= requested
}

/// Whether a listed RRset name refers to the target name
///
/// Exact match on normalized names first. Challenge names may be reported
/// with or without the zone suffix, so those are also compared in their
/// zone-relative form.
fn names_match(candidate: &str, target: &str, zone: &str) -> bool {
    if normalize_name(candidate) == normalize_name(target) {
        return true;
    }

    is_challenge_name(candidate)
        && is_challenge_name(target)
        && normalize_name(&relative_name(candidate, zone))
            == normalize_name(&relative_name(target, zone))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: &str = "example.com";

    #[test]
    fn test_names_match() {
        let target = "_acme-challenge.example.com.";
        assert!(names_match("_acme-challenge.example.com.", target, ZONE));
        assert!(names_match("_ACME-CHALLENGE.example.com", target, ZONE));
        assert!(names_match("_acme-challenge", target, ZONE));

        assert!(!names_match("_acme-challenge.servera", target, ZONE));
        assert!(!names_match("_acme-challenge.servera.example.com.", target, ZONE));
        assert!(!names_match("www.example.com.", target, ZONE));
    }

    #[test]
    fn test_is_last_page() {
        let page = |last_page| RrsetPage {
            last_page,
            ..RrsetPage::default()
        };

        assert!(is_last_page(&page(0), 1));
        assert!(is_last_page(&page(1), 1));
        assert!(is_last_page(&page(2), 3));
        assert!(!is_last_page(&page(3), 1));
    }

    #[test]
    fn test_is_challenge_txt() {
        let rrset = |name: &str, rtype: &str| Rrset {
            name: name.into(),
            rtype: rtype.into(),
            ttl: 60,
            records: Vec::new(),
        };

        assert!(is_challenge_txt(&rrset("_acme-challenge.example.com.", "TXT")));
        assert!(is_challenge_txt(&rrset("_acme-challenge", "txt")));
        assert!(!is_challenge_txt(&rrset("_acme-challenge.example.com.", "CNAME")));
        assert!(!is_challenge_txt(&rrset("www.example.com.", "TXT")));
    }
}
