//! Export report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::spec::EnumMatchTier;

/// Aggregate counters and diagnostics for one export run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReportExport {
    /// Marker cells found in the first column.
    pub n_markers: u64,
    /// Client records extracted.
    pub n_extracted: u64,
    /// Markers without a following client-name row.
    pub n_missing_name: u64,
    /// Markers without a route label in the search window.
    pub n_missing_route: u64,
    /// Records matched by exact key.
    pub n_matched_exact: u64,
    /// Records matched by base-route containment.
    pub n_matched_base: u64,
    /// Records matched by two-way substring.
    pub n_matched_substring: u64,
    /// Records left without a van.
    pub n_unmatched: u64,
    /// Separator rows emitted.
    pub n_separators: u64,
    /// Output sheet actually written.
    pub sheet_name_out: String,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
}

impl ReportExport {
    /// Records that received a van through any tier.
    pub fn matched_count(&self) -> u64 {
        self.n_matched_exact + self.n_matched_base + self.n_matched_substring
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("n_markers".to_string(), self.n_markers);
        dict_counts.insert("n_extracted".to_string(), self.n_extracted);
        dict_counts.insert("n_missing_name".to_string(), self.n_missing_name);
        dict_counts.insert("n_missing_route".to_string(), self.n_missing_route);
        dict_counts.insert("n_matched".to_string(), self.matched_count());
        dict_counts.insert("n_matched_exact".to_string(), self.n_matched_exact);
        dict_counts.insert("n_matched_base".to_string(), self.n_matched_base);
        dict_counts.insert("n_matched_substring".to_string(), self.n_matched_substring);
        dict_counts.insert("n_unmatched".to_string(), self.n_unmatched);
        dict_counts.insert("n_separators".to_string(), self.n_separators);
        dict_counts.insert("n_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} extracted={} matched={} unmatched={} missing_name={} missing_route={} separators={} warnings={}",
            self.n_extracted,
            self.matched_count(),
            self.n_unmatched,
            self.n_missing_name,
            self.n_missing_route,
            self.n_separators,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[EXPORT]"))
    }
}

/// Mutable accumulator for export statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportExportBuilder {
    report: ReportExport,
}

impl ReportExportBuilder {
    pub fn add_marker(&mut self) {
        self.report.n_markers += 1;
    }

    pub fn add_extracted(&mut self) {
        self.report.n_extracted += 1;
    }

    pub fn add_missing_name(&mut self) {
        self.report.n_missing_name += 1;
    }

    pub fn add_missing_route(&mut self) {
        self.report.n_missing_route += 1;
    }

    /// Count one resolver outcome; `None` is unmatched.
    pub fn record_match(&mut self, tier: Option<EnumMatchTier>) {
        match tier {
            Some(EnumMatchTier::Exact) => self.report.n_matched_exact += 1,
            Some(EnumMatchTier::BaseContains) => self.report.n_matched_base += 1,
            Some(EnumMatchTier::Substring) => self.report.n_matched_substring += 1,
            None => self.report.n_unmatched += 1,
        }
    }

    pub fn set_separators(&mut self, n_separators: usize) {
        self.report.n_separators = n_separators as u64;
    }

    pub fn set_sheet_name_out(&mut self, sheet_name: impl Into<String>) {
        self.report.sheet_name_out = sheet_name.into();
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.report.warnings.push(warning.into());
    }

    /// Add several warning messages.
    pub fn extend_warnings<I: IntoIterator<Item = String>>(&mut self, warnings: I) {
        self.report.warnings.extend(warnings);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportExport {
        self.report
    }
}
