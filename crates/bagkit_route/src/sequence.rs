//! Delivery ordering: day first, then van.

use crate::conf::{N_VAN_VOLUNTEER_OFFSET, TUP_VAN_VOLUNTEER_PREFIXES};
use crate::spec::ResolvedRecord;

/// Sort key of a van identifier.
///
/// Numbered vans sort by value, volunteer vans after them, anything else
/// (including unmatched, empty vans) last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumVanSortKey {
    Rank(u128),
    Last,
}

/// Derive the sort key of a van.
///
/// `"7"` ranks 7, `"VOLUNTEER-2"` and `"VOL-2"` rank 102, `""` is last.
/// Matching is exact: case or surrounding whitespace variants sort last.
pub fn derive_van_sort_key(van: &str) -> EnumVanSortKey {
    if let Some(n_rank) = parse_digits(van) {
        return EnumVanSortKey::Rank(n_rank);
    }
    for c_prefix in TUP_VAN_VOLUNTEER_PREFIXES {
        if let Some(c_rest) = van.strip_prefix(c_prefix)
            && let Some(n_idx) = parse_digits(c_rest)
        {
            return EnumVanSortKey::Rank(u128::from(N_VAN_VOLUNTEER_OFFSET).saturating_add(n_idx));
        }
    }
    EnumVanSortKey::Last
}

fn parse_digits(text: &str) -> Option<u128> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overlong digit runs saturate instead of failing.
    Some(text.parse::<u128>().unwrap_or(u128::MAX))
}

/// Stable sort by `(day, van)`; equal keys keep extraction order.
pub fn order_records(mut l_records: Vec<ResolvedRecord>) -> Vec<ResolvedRecord> {
    l_records.sort_by_key(|record| (record.day().sort_key(), derive_van_sort_key(&record.van)));
    l_records
}
