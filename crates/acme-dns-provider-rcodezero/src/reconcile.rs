//! Mutation planning
//!
//! The backend mutates whole RRsets. Adding one value to a name that already
//! has values means resubmitting the merged list; removing one value uses a
//! value-targeted delete so that siblings are left alone.
//!
//! Both decisions are pure functions of the validated record and the value
//! set read just before.

use crate::rrsets::ValueSet;
use crate::types::{ChangeType, RecordEntry, RrsetChange};
use acme_dns_core::ChallengeRecord;
use acme_dns_core::names::unquote_value;

/// Only TXT RRsets are ever mutated
pub const TXT: &str = "TXT";

/// Plan the mutation that makes `target` part of the RRset at its name
///
/// - Empty current set: `add` with the single new value and the requested TTL
/// - Otherwise: `update` with the deduplicated union of the current values
///   and the new one, keeping the served TTL unless it is 0
///
/// The update is planned even when the value is already present.
pub fn plan_append(current: &ValueSet, target: &ChallengeRecord) -> RrsetChange {
    let value = unquote_value(&target.value);

    if current.is_empty() {
        return RrsetChange {
            name: target.fqdn.clone(),
            rtype: TXT.to_string(),
            changetype: ChangeType::Add,
            records: vec![RecordEntry::enabled(value)],
            ttl: target.ttl_secs,
        };
    }

    let mut merged = current.values.clone();
    merged.insert(value.to_string());

    let ttl = if current.ttl > 0 {
        current.ttl
    } else {
        target.ttl_secs
    };

    RrsetChange {
        name: target.fqdn.clone(),
        rtype: TXT.to_string(),
        changetype: ChangeType::Update,
        records: merged.into_iter().map(RecordEntry::enabled).collect(),
        ttl,
    }
}

/// Plan the removal of exactly `target`'s value
///
/// Always a `delete` carrying the one value, whether or not it was observed:
/// an `update` that omits a value does not reliably remove it.
pub fn plan_delete(target: &ChallengeRecord) -> RrsetChange {
    RrsetChange {
        name: target.fqdn.clone(),
        rtype: TXT.to_string(),
        changetype: ChangeType::Delete,
        records: vec![RecordEntry::enabled(unquote_value(&target.value))],
        ttl: target.ttl_secs,
    }
}
