//! Ordered route assignment table and its JSON persistence.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use crate::conf::TUP_DEFAULT_ROUTE_ASSIGNMENTS;
use crate::resolve::canonicalize_route_name;
use crate::sequence::derive_van_sort_key;
use crate::spec::{EnumDay, ExportError, RouteTableError};

/// One `(day, route) -> van` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRouteEntry {
    /// Delivery day.
    pub day: EnumDay,
    /// Canonical route name.
    pub route: String,
    /// Van identifier (`"7"`, `"VOLUNTEER-2"`, ...).
    pub van: String,
}

impl SpecRouteEntry {
    /// Composite `<DAY>_<ROUTE>` key used by the persisted form.
    pub fn key(&self) -> String {
        format!("{}_{}", self.day, self.route)
    }
}

/// Route assignments in stable insertion order.
///
/// Iteration order is the tie-break of the fuzzy resolver tiers, so the table
/// is a sequence rather than a hash map. Re-inserting an existing key replaces
/// the van in place (last write wins, first position kept).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteAssignmentTable {
    l_entries: Vec<SpecRouteEntry>,
}

impl RouteAssignmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the production route sheet.
    pub fn with_defaults() -> Self {
        let mut l_warnings = Vec::new();
        Self::from_keyed_pairs(
            TUP_DEFAULT_ROUTE_ASSIGNMENTS
                .iter()
                .map(|(key, van)| (key.to_string(), van.to_string())),
            &mut l_warnings,
        )
    }

    /// Build from `("<DAY>_<ROUTE>", van)` pairs; malformed keys are skipped
    /// with a message pushed to `warnings`.
    pub fn from_keyed_pairs<I>(pairs: I, warnings: &mut Vec<String>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = Self::new();
        for (c_key, c_van) in pairs {
            match parse_route_key(&c_key) {
                Ok((day, c_route)) => table.insert(day, &c_route, &c_van),
                Err(msg) => {
                    warn!(key = %c_key, "skipping route entry: {msg}");
                    warnings.push(msg);
                }
            }
        }
        table
    }

    /// Insert or replace an assignment. The route is canonicalized first.
    pub fn insert(&mut self, day: EnumDay, route: &str, van: &str) {
        let c_route = canonicalize_route_name(route);
        let c_van = van.trim().to_string();
        if let Some(entry) = self
            .l_entries
            .iter_mut()
            .find(|entry| entry.day == day && entry.route == c_route)
        {
            entry.van = c_van;
            return;
        }
        self.l_entries.push(SpecRouteEntry {
            day,
            route: c_route,
            van: c_van,
        });
    }

    /// Remove an assignment; returns the removed van.
    pub fn remove(&mut self, day: EnumDay, route: &str) -> Option<String> {
        let c_route = canonicalize_route_name(route);
        let n_idx = self
            .l_entries
            .iter()
            .position(|entry| entry.day == day && entry.route == c_route)?;
        Some(self.l_entries.remove(n_idx).van)
    }

    /// Exact lookup by day and canonical route.
    pub fn get(&self, day: EnumDay, route_canonical: &str) -> Option<&str> {
        self.l_entries
            .iter()
            .find(|entry| entry.day == day && entry.route == route_canonical)
            .map(|entry| entry.van.as_str())
    }

    /// `(route, van)` pairs of one day in table order.
    pub fn entries_for(&self, day: EnumDay) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.l_entries
            .iter()
            .filter(move |entry| entry.day == day)
            .map(|entry| (entry.route.as_str(), entry.van.as_str()))
    }

    /// `(route, van)` pairs of one day ordered by van sort key (stable).
    pub fn entries_for_sorted_by_van(&self, day: EnumDay) -> Vec<(&str, &str)> {
        let mut l_pairs: Vec<(&str, &str)> = self.entries_for(day).collect();
        l_pairs.sort_by_key(|(_, van)| derive_van_sort_key(van));
        l_pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecRouteEntry> {
        self.l_entries.iter()
    }

    pub fn len(&self) -> usize {
        self.l_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l_entries.is_empty()
    }

    ////////////////////////////////////////////////////////////////////////////
    // #region JsonPersistence

    /// Parse a JSON object `{"<DAY>_<ROUTE>": "<van>", ...}` in document order.
    ///
    /// Integer vans are stringified; malformed keys and other value types are
    /// skipped with a warning. A non-object document is an error.
    pub fn from_json_str(
        text: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Self, RouteTableError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(dict_routes) = value else {
            return Err(RouteTableError::NotAnObject);
        };

        let mut l_pairs = Vec::with_capacity(dict_routes.len());
        for (c_key, value) in dict_routes {
            let c_van = match value {
                Value::String(s) => s,
                Value::Number(n) if n.is_u64() || n.is_i64() => n.to_string(),
                other => {
                    let msg = format!("Route {c_key:?}: unsupported van value {other}.");
                    warn!("{msg}");
                    warnings.push(msg);
                    continue;
                }
            };
            l_pairs.push((c_key, c_van));
        }
        Ok(Self::from_keyed_pairs(l_pairs, warnings))
    }

    /// Serialize to pretty JSON, preserving table order.
    pub fn to_json_string(&self) -> Result<String, RouteTableError> {
        let mut dict_routes = Map::new();
        for entry in &self.l_entries {
            dict_routes.insert(entry.key(), Value::String(entry.van.clone()));
        }
        Ok(serde_json::to_string_pretty(&Value::Object(dict_routes))?)
    }

    /// Load a route table file.
    pub fn read_json_file<P: AsRef<Path>>(
        path: P,
        warnings: &mut Vec<String>,
    ) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| ExportError::ConfigReadFailure {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&text, warnings).map_err(|err| ExportError::ConfigReadFailure {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Persist the table as pretty JSON.
    pub fn write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let text = self
            .to_json_string()
            .map_err(|err| ExportError::ConfigWriteFailure {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        fs::write(path, text + "\n").map_err(|err| ExportError::ConfigWriteFailure {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
}

/// Split `"<DAY>_<ROUTE>"` at the first underscore.
pub fn parse_route_key(key: &str) -> Result<(EnumDay, String), String> {
    let Some((c_day, c_route)) = key.split_once('_') else {
        return Err(format!("Route key {key:?} lacks the \"<DAY>_\" prefix."));
    };
    let day = c_day
        .parse::<EnumDay>()
        .map_err(|err| format!("Route key {key:?}: {err}"))?;
    if canonicalize_route_name(c_route).is_empty() {
        return Err(format!("Route key {key:?} has an empty route name."));
    }
    Ok((day, c_route.to_string()))
}
