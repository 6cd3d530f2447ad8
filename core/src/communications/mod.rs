//! Communications monitor API: recordings and conferences.
//!
//! Both list endpoints page with the same convention: the envelope's `next`
//! field is sent back as the `start` query parameter.

pub mod conferences;
pub mod recordings;

use crate::pagination::PageCursor;

pub(crate) const MONITOR_CURSOR: PageCursor = PageCursor::new("next", "start");

/// Default `to` bound for time-range queries (epoch ms, year 2286).
pub const NO_UPPER_BOUND: u64 = 9_999_999_999_999;

pub(crate) fn time_range_query(from: u64, to: u64) -> Vec<(String, String)> {
    vec![
        ("from".to_string(), from.to_string()),
        ("to".to_string(), to.to_string()),
    ]
}
