//! Pagination types: skip/limit windows over the full record set

use serde::{Deserialize, Serialize};

/// Maximum items per window
const MAX_LIMIT: u64 = 100;

/// Default items per window
const DEFAULT_LIMIT: u64 = 20;

/// A validated pagination window.
#[derive(Debug, Clone, Copy)]
pub struct ListWindow {
    /// Records to skip from the start (0-based)
    pub skip: u64,
    /// Window size, clamped to 1..=100
    pub limit: u64,
}

impl ListWindow {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Paginated response envelope: the window plus the total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub skip: u64,
    pub limit: u64,
}

/// Query parameters for list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl From<ListParams> for ListWindow {
    fn from(params: ListParams) -> Self {
        Self::new(
            params.skip.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
