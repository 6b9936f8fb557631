// crates/mnemo-types/src/lib.rs
// Shared types for Mnemo (native + WASM compatible)
// No native-only dependencies allowed here

use serde::{Deserialize, Serialize};

/// Category assigned when the caller does not provide one
pub const DEFAULT_CATEGORY: &str = "general";

// ═══════════════════════════════════════
// DOMAIN TYPES
// ═══════════════════════════════════════

/// A memory as returned by listing and search (no row id, no `last_accessed`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryView {
    pub content: String,
    pub category: String,
    pub stored_at: String,
    pub access_count: i64,
}

/// A full row from the memories table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: i64,
    pub content: String,
    pub category: String,
    pub stored_at: String,
    #[serde(default)]
    pub last_accessed: Option<String>,
    #[serde(default)]
    pub access_count: i64,
}

/// How the recent-memories path picks the rows whose access counters it bumps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMatch {
    /// Match on content text. Every row sharing the content of a returned
    /// memory is touched, including ones that were not returned.
    #[default]
    Content,
    /// Match on the row ids captured by the listing query
    Id,
}

impl AccessMatch {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "content" => Some(Self::Content),
            "id" | "identity" => Some(Self::Id),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Id => "id",
        }
    }
}
