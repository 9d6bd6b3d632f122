//! Wire types for the RcodeZero ACME RRset API

use serde::{Deserialize, Serialize};

/// Mutation verb for a PATCH request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Append values, creating the RRset if needed
    Add,
    /// Replace the full value list
    Update,
    /// Remove the listed values
    Delete,
}

/// One value inside an RRset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub content: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

impl RecordEntry {
    /// An enabled entry
    pub fn enabled(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: false,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// An RRset as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rrset {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<RecordEntry>,
}

/// One page of the RRset listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrsetPage {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub data: Vec<Rrset>,
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub next_page_url: Option<String>,
}

/// A single RRset mutation (PATCH body element)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrsetChange {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub changetype: ChangeType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<RecordEntry>,
    pub ttl: u32,
}

impl RrsetChange {
    /// Values carried by this change
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.content.as_str())
    }
}

/// Response envelope of mutating requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ApiResponse {
    /// Whether the backend reported success ("ok", any case)
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
