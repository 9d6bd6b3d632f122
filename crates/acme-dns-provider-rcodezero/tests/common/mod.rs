//! Test doubles and common utilities for provider contract tests
//!
//! [`InMemoryBackend`] behaves like the RRset API closely enough to
//! observe what the provider reads and submits: it pages its RRsets,
//! applies add/update/delete changes, counts page fetches and records
//! every submitted change.

#![allow(dead_code)]

use acme_dns_core::names::{normalize_name, unquote_value};
use acme_dns_core::{Error, Record, Result};
use acme_dns_provider_rcodezero::{
    ApiResponse, ChangeType, RecordEntry, Rrset, RrsetApi, RrsetChange, RrsetPage,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ZONE: &str = "example.com.";

#[derive(Default)]
struct BackendState {
    rrsets: Vec<Rrset>,
    page_size: Option<u32>,
    unknown_last_page: bool,
    quote_contents: bool,
    fail_patches_from: Option<usize>,
    page_fetches: usize,
    patches: Vec<RrsetChange>,
}

/// In-memory RRset API
///
/// Cloning shares the state, so a test can keep a handle while the
/// provider owns another.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<BackendState>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an RRset with enabled values
    pub fn with_rrset(self, name: &str, ttl: u32, values: &[&str]) -> Self {
        let records = values.iter().map(|v| RecordEntry::enabled(*v)).collect();
        self.with_entries(name, "TXT", ttl, records)
    }

    /// Seed an RRset with arbitrary entries and type
    pub fn with_entries(self, name: &str, rtype: &str, ttl: u32, records: Vec<RecordEntry>) -> Self {
        self.lock().rrsets.push(Rrset {
            name: name.to_string(),
            rtype: rtype.to_string(),
            ttl,
            records,
        });
        self
    }

    /// Serve pages of `n` RRsets instead of the requested page size
    pub fn with_page_size(self, n: u32) -> Self {
        self.lock().page_size = Some(n);
        self
    }

    /// Report `last_page == 0` on every page
    pub fn with_unknown_last_page(self) -> Self {
        self.lock().unknown_last_page = true;
        self
    }

    /// Store submitted values wrapped in quotes, as some backends do
    pub fn with_quoted_contents(self) -> Self {
        self.lock().quote_contents = true;
        self
    }

    /// Answer the n-th PATCH (0-based) and every later one with a non-ok envelope
    pub fn failing_patches_from(self, n: usize) -> Self {
        self.lock().fail_patches_from = Some(n);
        self
    }

    pub fn page_fetches(&self) -> usize {
        self.lock().page_fetches
    }

    pub fn reset_page_fetches(&self) {
        self.lock().page_fetches = 0;
    }

    pub fn patches(&self) -> Vec<RrsetChange> {
        self.lock().patches.clone()
    }

    /// Enabled values stored at a name, unquoted and sorted
    pub fn values_at(&self, name: &str) -> Vec<String> {
        let state = self.lock();
        let mut values: Vec<String> = state
            .rrsets
            .iter()
            .find(|rr| normalize_name(&rr.name) == normalize_name(name))
            .map(|rr| {
                rr.records
                    .iter()
                    .filter(|r| !r.disabled)
                    .map(|r| unquote_value(&r.content).to_string())
                    .collect()
            })
            .unwrap_or_default();
        values.sort();
        values
    }

    pub fn ttl_at(&self, name: &str) -> Option<u32> {
        self.lock()
            .rrsets
            .iter()
            .find(|rr| normalize_name(&rr.name) == normalize_name(name))
            .map(|rr| rr.ttl)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }
}

impl BackendState {
    fn position(&self, name: &str) -> Option<usize> {
        self.rrsets.iter().position(|rr| {
            rr.rtype.eq_ignore_ascii_case("TXT") && normalize_name(&rr.name) == normalize_name(name)
        })
    }

    fn stored(&self, content: &str) -> RecordEntry {
        if self.quote_contents {
            RecordEntry::enabled(format!("\"{}\"", content))
        } else {
            RecordEntry::enabled(content)
        }
    }

    fn apply(&mut self, change: &RrsetChange) {
        let incoming: Vec<RecordEntry> = change.contents().map(|c| self.stored(c)).collect();

        match change.changetype {
            ChangeType::Add => match self.position(&change.name) {
                Some(i) => {
                    let rrset = &mut self.rrsets[i];
                    for entry in incoming {
                        if !rrset.records.iter().any(|r| same_value(&r.content, &entry.content)) {
                            rrset.records.push(entry);
                        }
                    }
                }
                None => self.rrsets.push(Rrset {
                    name: change.name.clone(),
                    rtype: change.rtype.clone(),
                    ttl: change.ttl,
                    records: incoming,
                }),
            },
            ChangeType::Update => match self.position(&change.name) {
                Some(i) => {
                    self.rrsets[i].records = incoming;
                    self.rrsets[i].ttl = change.ttl;
                }
                None => self.rrsets.push(Rrset {
                    name: change.name.clone(),
                    rtype: change.rtype.clone(),
                    ttl: change.ttl,
                    records: incoming,
                }),
            },
            ChangeType::Delete => {
                if let Some(i) = self.position(&change.name) {
                    if change.records.is_empty() {
                        self.rrsets.remove(i);
                        return;
                    }
                    self.rrsets[i]
                        .records
                        .retain(|r| !change.contents().any(|c| same_value(&r.content, c)));
                    if self.rrsets[i].records.is_empty() {
                        self.rrsets.remove(i);
                    }
                }
            }
        }
    }
}

fn same_value(a: &str, b: &str) -> bool {
    unquote_value(a) == unquote_value(b)
}

#[async_trait::async_trait]
impl RrsetApi for InMemoryBackend {
    async fn get_rrsets(&self, _zone: &str, page: u32, page_size: u32) -> Result<RrsetPage> {
        let mut state = self.lock();
        state.page_fetches += 1;

        let per_page = state.page_size.unwrap_or(page_size).max(1) as usize;
        let total = state.rrsets.len();
        let last_page = if state.unknown_last_page {
            0
        } else {
            total.div_ceil(per_page).max(1) as u32
        };

        let start = (page.max(1) as usize - 1) * per_page;
        let data = state
            .rrsets
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();

        Ok(RrsetPage {
            current_page: page,
            data,
            last_page,
            per_page: per_page as u32,
            total: total as u64,
            next_page_url: None,
        })
    }

    async fn patch_rrsets(&self, _zone: &str, changes: &[RrsetChange]) -> Result<ApiResponse> {
        let mut state = self.lock();
        let index = state.patches.len();
        state.patches.extend(changes.iter().cloned());

        if state.fail_patches_from.is_some_and(|n| index >= n) {
            return Err(Error::api_status("failed", "zone is locked"));
        }

        for change in changes {
            state.apply(change);
        }
        Ok(ApiResponse {
            status: "ok".to_string(),
            message: "RRsets updated".to_string(),
        })
    }
}

/// A TXT record with a 60 second TTL
pub fn txt(name: &str, value: &str) -> Record {
    Record::txt(name, value, Duration::from_secs(60))
}

/// `(name, text, ttl secs)` of every TXT record, sorted
pub fn txt_tuples(records: &[Record]) -> Vec<(String, String, u64)> {
    let mut out: Vec<_> = records
        .iter()
        .filter_map(Record::as_txt)
        .map(|t| (t.name.clone(), t.text.clone(), t.ttl.as_secs()))
        .collect();
    out.sort();
    out
}
