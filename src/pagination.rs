//! Page/limit normalization and the pagination descriptor.
//!
//! Both the listing query on the server and the envelope normalization in
//! the client compute pagination metadata through this module.

use serde::{Deserialize, Serialize};

/// Page used when the caller supplies none or an unparseable value.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller supplies none or an unparseable value.
pub const DEFAULT_LIMIT: u64 = 10;

/// Smallest accepted page size.
pub const MIN_LIMIT: u64 = 1;

/// Largest accepted page size.
pub const MAX_LIMIT: u64 = 100;

/// Parse the leading integer of `raw`.
///
/// Accepts surrounding whitespace, an optional sign and then the leading run
/// of ASCII digits; anything after the digits is ignored (`"12abc"` is 12,
/// `"3.7"` is 3). Returns `None` when no digit follows the sign. Magnitudes
/// beyond `i64` saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run: &str = {
        let end = digits
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };

    if run.is_empty() {
        return None;
    }

    let magnitude = run.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// Effective page number: missing or invalid input falls back to 1, and
/// anything below 1 is raised to 1.
pub fn normalize_page(raw: Option<&str>) -> u64 {
    match raw.and_then(parse_leading_int) {
        Some(n) if n >= 1 => n as u64,
        _ => DEFAULT_PAGE,
    }
}

/// Effective page size: missing or invalid input falls back to 10, and the
/// result is clamped into `[1, 100]`.
pub fn normalize_limit(raw: Option<&str>) -> u64 {
    match raw.and_then(parse_leading_int) {
        Some(n) => n.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as u64,
        None => DEFAULT_LIMIT,
    }
}

/// Row offset of the first item on `page`.
pub fn offset_for(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Number of pages needed for `total_items`; never less than 1.
pub fn total_pages(total_items: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 1;
    }
    total_items.div_ceil(limit).max(1)
}

/// Pagination metadata returned alongside a page of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Compute the descriptor for an already-normalized page and limit.
    pub fn new(current_page: u64, items_per_page: u64, total_items: u64) -> Self {
        let total_pages = total_pages(total_items, items_per_page);
        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// Descriptor for an unpaginated list of `len` items presented as one page.
    pub fn single_page(len: usize) -> Self {
        let len = len as u64;
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: len,
            items_per_page: len,
            has_next_page: false,
            has_previous_page: false,
        }
    }
}
