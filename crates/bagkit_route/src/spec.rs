//! Record models, pipeline options/events and top-level error types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bagkit_io_xlsx::XlsxIoError;

use crate::conf::C_SHEET_NAME_OUT_DEFAULT;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Delivery day. Declaration order is the output order (week starts Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumDay {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl EnumDay {
    /// All days in output order.
    pub const ALL: [EnumDay; 7] = [
        EnumDay::Sun,
        EnumDay::Mon,
        EnumDay::Tue,
        EnumDay::Wed,
        EnumDay::Thu,
        EnumDay::Fri,
        EnumDay::Sat,
    ];

    /// Three-letter uppercase code used in route labels and table keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sun => "SUN",
            Self::Mon => "MON",
            Self::Tue => "TUE",
            Self::Wed => "WED",
            Self::Thu => "THU",
            Self::Fri => "FRI",
            Self::Sat => "SAT",
        }
    }

    /// Output sort key: `SUN=0 .. SAT=6`.
    pub fn sort_key(&self) -> u8 {
        match self {
            Self::Sun => 0,
            Self::Mon => 1,
            Self::Tue => 2,
            Self::Wed => 3,
            Self::Thu => 4,
            Self::Fri => 5,
            Self::Sat => 6,
        }
    }
}

impl fmt::Display for EnumDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnumDay {
    type Err = String;

    /// Parse a three-letter day code, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c_day = s.trim().to_ascii_uppercase();
        EnumDay::ALL
            .into_iter()
            .find(|day| day.as_str() == c_day)
            .ok_or_else(|| format!("Unknown day {s:?}; expected one of SUN..SAT."))
    }
}

/// Resolver tier that produced a van.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumMatchTier {
    /// `(day, canonical route)` key hit.
    Exact,
    /// Table route contains the label's base route.
    BaseContains,
    /// Table route and base route contain one another.
    Substring,
}

/// Milestones reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumExportStage {
    Starting,
    Extracting,
    Matching,
    Ordering,
    Formatting,
    Separating,
    Saving,
    Styling,
    Finalizing,
    Done,
}

impl EnumExportStage {
    /// Progress percentage reached when the stage starts.
    pub fn percent(&self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Extracting => 10,
            Self::Matching => 30,
            Self::Ordering => 50,
            Self::Formatting => 60,
            Self::Separating => 70,
            Self::Saving => 75,
            Self::Styling => 80,
            Self::Finalizing => 90,
            Self::Done => 100,
        }
    }

    /// Status text for the stage.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Starting => "Starting...",
            Self::Extracting => "Extracting client data...",
            Self::Matching => "Matching clients to vans...",
            Self::Ordering => "Ordering by day and van...",
            Self::Formatting => "Formatting output...",
            Self::Separating => "Adding day separators...",
            Self::Saving => "Saving output...",
            Self::Styling => "Applying Excel formatting...",
            Self::Finalizing => "Finalizing...",
            Self::Done => "Done!",
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Records

/// One client found in the source report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    /// Client name from the row after the marker.
    pub client_name: String,
    /// `"<DAY> | <route text>"` as found near the client name.
    pub route_label: String,
    /// Day parsed from the label.
    pub day: EnumDay,
    /// Route text after the `|`, untrimmed.
    pub route_text: String,
}

impl ClientRecord {
    /// Build a record; the label is assembled as `"<DAY> | <route text>"`.
    pub fn new(client_name: impl Into<String>, day: EnumDay, route_text: impl Into<String>) -> Self {
        let route_text = route_text.into();
        Self {
            client_name: client_name.into(),
            route_label: format!("{day} | {route_text}"),
            day,
            route_text,
        }
    }
}

/// Client record enriched with its van assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    /// Source record.
    pub client: ClientRecord,
    /// Assigned van; empty when no tier matched.
    pub van: String,
    /// Tier that produced `van`; `None` when unmatched.
    pub tier: Option<EnumMatchTier>,
}

impl ResolvedRecord {
    pub fn day(&self) -> EnumDay {
        self.client.day
    }

    pub fn is_matched(&self) -> bool {
        !self.van.is_empty()
    }
}

/// Visible data row of the output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOutputRow {
    /// `VAN #` column; empty when unmatched.
    pub van: String,
    /// `Client` column.
    pub client_name: String,
    /// `Route Name & Day` column, the unmodified route label.
    pub route_display: String,
    /// `Notes` column, always empty on export.
    pub notes: String,
    /// Grouping tag, rendered only in the hidden helper column.
    pub day: EnumDay,
}

/// One output table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumOutputRow {
    /// Client row.
    Data(SpecOutputRow),
    /// Group boundary closing the given day.
    Separator {
        /// Day whose group this separator closes.
        day: EnumDay,
    },
}

impl EnumOutputRow {
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator { .. })
    }

    pub fn day(&self) -> EnumDay {
        match self {
            Self::Data(row) => row.day,
            Self::Separator { day } => *day,
        }
    }
}

/// Ordered output rows handed to the sheet renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecOutputTable {
    pub rows: Vec<EnumOutputRow>,
}

impl SpecOutputTable {
    /// Number of client rows (separators excluded).
    pub fn count_data_rows(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_separator()).count()
    }

    /// Number of separator rows.
    pub fn count_separators(&self) -> usize {
        self.rows.iter().filter(|row| row.is_separator()).count()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OptionsAndEvents

/// Input options for `export_birthday_bags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportOptions {
    /// Input sheet; `None` picks `Sheet1` when present, else the first sheet.
    pub sheet_name_in: Option<String>,
    /// Output sheet name.
    pub sheet_name_out: String,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            sheet_name_in: None,
            sheet_name_out: C_SHEET_NAME_OUT_DEFAULT.to_string(),
        }
    }
}

/// Progress event emitted at each pipeline milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportProgress {
    /// Stage just entered.
    pub stage: EnumExportStage,
    /// Percentage for a progress bar.
    pub percent: u8,
    /// Status line for the caller to display.
    pub message: String,
}

impl SpecExportProgress {
    pub fn new(stage: EnumExportStage) -> Self {
        Self {
            stage,
            percent: stage.percent(),
            message: stage.message().to_string(),
        }
    }

    /// Event with a custom status line.
    pub fn with_message(stage: EnumExportStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            percent: stage.percent(),
            message: message.into(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures that abort an export run or a route-table operation.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The source spreadsheet cannot be opened or parsed.
    #[error("Failed to read input: {0}")]
    InputReadFailure(#[source] XlsxIoError),
    /// The output spreadsheet cannot be created or saved.
    #[error("Failed to write output: {0}")]
    OutputWriteFailure(#[source] XlsxIoError),
    /// A route table file cannot be read or is not a JSON object.
    #[error("Failed to read route table {}: {message}", .path.display())]
    ConfigReadFailure {
        /// Route table path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// A route table file cannot be written.
    #[error("Failed to write route table {}: {message}", .path.display())]
    ConfigWriteFailure {
        /// Route table path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
}

/// Route table document that cannot be parsed or serialized.
#[derive(Debug, thiserror::Error)]
pub enum RouteTableError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object of \"<DAY>_<ROUTE>\": \"<van>\" pairs")]
    NotAnObject,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_order_starts_on_sunday() {
        let l_keys: Vec<u8> = EnumDay::ALL.iter().map(EnumDay::sort_key).collect();
        assert_eq!(l_keys, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(EnumDay::Sun < EnumDay::Mon);
        assert_eq!(EnumDay::ALL[0], EnumDay::Sun);
    }

    #[test]
    fn test_day_parse_is_case_insensitive() {
        assert_eq!("mon".parse::<EnumDay>(), Ok(EnumDay::Mon));
        assert_eq!(" SAT ".parse::<EnumDay>(), Ok(EnumDay::Sat));
        assert!("MONDAY".parse::<EnumDay>().is_err());
    }

    #[test]
    fn test_client_record_label_layout() {
        let record = ClientRecord::new("Ada", EnumDay::Wed, "SOUTH BAY-1 (Full Van)");
        assert_eq!(record.route_label, "WED | SOUTH BAY-1 (Full Van)");
        assert_eq!(record.day, EnumDay::Wed);
    }

    #[test]
    fn test_stage_percent_is_monotonic() {
        let l_stages = [
            EnumExportStage::Starting,
            EnumExportStage::Extracting,
            EnumExportStage::Matching,
            EnumExportStage::Ordering,
            EnumExportStage::Formatting,
            EnumExportStage::Separating,
            EnumExportStage::Saving,
            EnumExportStage::Styling,
            EnumExportStage::Finalizing,
            EnumExportStage::Done,
        ];
        assert!(l_stages.windows(2).all(|w| w[0].percent() < w[1].percent()));
        assert_eq!(SpecExportProgress::new(EnumExportStage::Done).percent, 100);
    }
}
