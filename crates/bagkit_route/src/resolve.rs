//! Route name canonicalization and tiered van resolution.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::report::ReportExportBuilder;
use crate::routes::RouteAssignmentTable;
use crate::spec::{ClientRecord, EnumDay, EnumMatchTier, ResolvedRecord};

static RE_PAREN_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\s*\(.*?\)").expect("valid paren regex"));
static RE_FULL_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[FULL\]\s*").expect("valid full-tag regex"));
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static RE_BASE_ROUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+").expect("valid base-route regex"));

/// Van found for one route label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRouteMatch {
    pub van: String,
    pub tier: EnumMatchTier,
}

/// Normalize a route name for lookup.
///
/// Uppercases, drops parenthesized groups and `[FULL]` tags, collapses
/// whitespace and trims. Applying it twice yields the same string.
pub fn canonicalize_route_name(route: &str) -> String {
    let c_upper = route.to_uppercase();
    let c_no_paren = RE_PAREN_GROUP.replace_all(&c_upper, "");
    let mut c_stripped = c_no_paren.into_owned();
    while RE_FULL_TAG.is_match(&c_stripped) {
        c_stripped = RE_FULL_TAG.replace_all(&c_stripped, "").into_owned();
    }
    RE_WHITESPACE
        .replace_all(&c_stripped, " ")
        .trim()
        .to_string()
}

/// Leading alphabetic-and-space prefix of a canonical route, trimmed.
///
/// `"SOUTH BAY-1"` gives `"SOUTH BAY"`. A route without a leading letter run
/// is its own base.
pub fn derive_route_base(route_canonical: &str) -> String {
    match RE_BASE_ROUTE.find(route_canonical) {
        Some(found) => found.as_str().trim().to_string(),
        None => route_canonical.trim().to_string(),
    }
}

/// Split `"<DAY> | <route>"` into its day and raw route text.
pub fn parse_route_label(label: &str) -> Option<(EnumDay, &str)> {
    let (c_day, c_route) = label.split_once('|')?;
    let day = c_day.parse::<EnumDay>().ok()?;
    Some((day, c_route.trim()))
}

/// Resolve a van for `route_text` on `day`.
///
/// Tiers, first hit wins:
/// 1. exact `(day, canonical route)` key;
/// 2. first route of the day (table order) containing the base route;
/// 3. first route of the day where either side contains the other.
///
/// An empty base route is contained in every route, so it takes the first
/// route of the day.
pub fn resolve_route(
    table: &RouteAssignmentTable,
    day: EnumDay,
    route_text: &str,
) -> Option<SpecRouteMatch> {
    let c_route = canonicalize_route_name(route_text);
    if let Some(van) = table.get(day, &c_route) {
        return Some(SpecRouteMatch {
            van: van.to_string(),
            tier: EnumMatchTier::Exact,
        });
    }

    let c_base = derive_route_base(&c_route);

    if let Some((_, van)) = table
        .entries_for(day)
        .find(|(route, _)| route.contains(c_base.as_str()))
    {
        return Some(SpecRouteMatch {
            van: van.to_string(),
            tier: EnumMatchTier::BaseContains,
        });
    }

    table
        .entries_for(day)
        .find(|(route, _)| c_base.contains(route) || route.contains(c_base.as_str()))
        .map(|(_, van)| SpecRouteMatch {
            van: van.to_string(),
            tier: EnumMatchTier::Substring,
        })
}

/// Van for a full `"<DAY> | <route>"` label; empty when nothing matches.
pub fn resolve_van(table: &RouteAssignmentTable, route_label: &str) -> String {
    parse_route_label(route_label)
        .and_then(|(day, c_route)| resolve_route(table, day, c_route))
        .map(|found| found.van)
        .unwrap_or_default()
}

/// Attach a van to every record, counting tiers into `builder`.
pub fn resolve_records(
    l_records: Vec<ClientRecord>,
    table: &RouteAssignmentTable,
    builder: &mut ReportExportBuilder,
) -> Vec<ResolvedRecord> {
    l_records
        .into_iter()
        .map(|client| {
            let found = resolve_route(table, client.day, &client.route_text);
            builder.record_match(found.as_ref().map(|m| m.tier));
            match found {
                Some(SpecRouteMatch { van, tier }) => {
                    debug!(client = %client.client_name, label = %client.route_label, %van, ?tier, "route resolved");
                    ResolvedRecord {
                        client,
                        van,
                        tier: Some(tier),
                    }
                }
                None => {
                    warn!(client = %client.client_name, label = %client.route_label, "route unmatched");
                    ResolvedRecord {
                        client,
                        van: String::new(),
                        tier: None,
                    }
                }
            }
        })
        .collect()
}
