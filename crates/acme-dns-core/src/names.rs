//! Name and value normalization
//!
//! Helpers for comparing DNS names the way the backends report them
//! (mixed case, with or without the trailing dot, relative or absolute)
//! and for reading TXT content that some APIs return pre-quoted.
//!
//! Normalized names are for comparisons only. Values sent to a backend keep
//! the form the caller supplied.

/// The DNS-01 challenge label
pub const ACME_CHALLENGE_LABEL: &str = "_acme-challenge";

/// Trim whitespace and a single trailing dot from a zone name
///
/// Returns an empty string for an empty (or root-only) zone.
pub fn trim_zone(zone: &str) -> &str {
    let zone = zone.trim();
    zone.strip_suffix('.').unwrap_or(zone)
}

/// Fully qualified, dot-terminated form of a zone
///
/// `example.com`, `example.com.` and ` example.com ` all become `example.com.`.
pub fn zone_fqdn(zone: &str) -> String {
    format!("{}.", trim_zone(zone))
}

/// Canonical form of a name for equality comparisons
///
/// Trims whitespace, strips a single trailing dot and lower-cases.
pub fn normalize_name(name: &str) -> String {
    let name = name.trim();
    name.strip_suffix('.').unwrap_or(name).to_lowercase()
}

/// Whether a name is the challenge label or a name below it
///
/// True for `_acme-challenge` and anything starting with `_acme-challenge.`,
/// regardless of case or trailing dot.
pub fn is_challenge_name(name: &str) -> bool {
    let normalized = normalize_name(name);
    normalized == ACME_CHALLENGE_LABEL
        || normalized
            .strip_prefix(ACME_CHALLENGE_LABEL)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Strip exactly one layer of surrounding double quotes from TXT content
///
/// Surrounding whitespace is trimmed first. Values that are not wrapped in a
/// pair of quotes are returned unchanged (apart from the trim).
pub fn unquote_value(value: &str) -> &str {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Resolve a possibly zone-relative name into a dot-terminated FQDN
///
/// A name that already ends with a dot is treated as absolute and returned
/// as-is. An empty name or `@` refers to the zone apex.
pub fn absolute_name(name: &str, zone: &str) -> String {
    let name = name.trim();
    let zone = trim_zone(zone);

    if zone.is_empty() {
        return name.trim_matches('.').to_string();
    }
    if name.is_empty() || name == "@" {
        return zone_fqdn(zone);
    }
    if name.ends_with('.') {
        return name.to_string();
    }
    format!("{}.{}.", name, zone)
}

/// Make a name relative to a zone
///
/// The zone suffix is stripped case-insensitively; the zone apex becomes `@`.
/// Names outside the zone are returned without their trailing dot.
pub fn relative_name(name: &str, zone: &str) -> String {
    let name = name.trim();
    let name = name.strip_suffix('.').unwrap_or(name);
    let zone = trim_zone(zone);

    if zone.is_empty() {
        return name.to_string();
    }
    if name.eq_ignore_ascii_case(zone) {
        return "@".to_string();
    }

    if let Some(split) = name.len().checked_sub(zone.len() + 1)
        && name.as_bytes().get(split) == Some(&b'.')
        && name
            .get(split + 1..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(zone))
    {
        return name[..split].to_string();
    }

    name.to_string()
}
