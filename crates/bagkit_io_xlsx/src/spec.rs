//! Shared XLSX specification models.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;

use crate::util::convert_number_to_text;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Horizontal or vertical cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumCellAlign {
    Left,
    Center,
    Right,
    Top,
    VCenter,
    Bottom,
}

/// Cell format preset, mapped onto `rust_xlsxwriter::Format` at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    pub bold: Option<bool>,
    pub align: Option<EnumCellAlign>,
    pub valign: Option<EnumCellAlign>,
    /// Thin border on all four sides.
    pub border: Option<bool>,
    /// Solid background fill, `0xRRGGBB`.
    pub bg_color: Option<u32>,
}

impl SpecCellFormat {
    /// Overlay `other` onto `self`; set fields of `other` win.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            bold: other.bold.or(self.bold),
            align: other.align.or(self.align),
            valign: other.valign.or(self.valign),
            border: other.border.or(self.border),
            bg_color: other.bg_color.or(self.bg_color),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RawGrid

/// Normalized cell value shared by reader and writer.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// Borrow text content; numbers and blanks yield `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Display text of the cell (`12.0` renders as `"12"`, blank as `""`).
    pub fn to_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(s) => s.clone(),
            Self::Number(n) => convert_number_to_text(*n),
        }
    }

    /// Build a text cell, mapping empty text to blank.
    pub fn from_text(value: impl Into<String>) -> Self {
        let c_value: String = value.into();
        if c_value.is_empty() {
            Self::None
        } else {
            Self::String(c_value)
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Untyped rectangular grid read from one worksheet.
///
/// Coordinates are absolute: `(0, 0)` is cell `A1` even when the used range of
/// the source sheet starts further down or right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecRawSheet {
    /// Source sheet name (informational).
    pub sheet_name: String,
    rows: Vec<Vec<EnumCellValue>>,
    n_width: usize,
}

impl SpecRawSheet {
    /// Build a grid from possibly ragged rows; short rows are padded with blanks.
    pub fn from_rows(sheet_name: impl Into<String>, mut rows: Vec<Vec<EnumCellValue>>) -> Self {
        let n_width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(n_width, EnumCellValue::None);
        }
        Self {
            sheet_name: sheet_name.into(),
            rows,
            n_width,
        }
    }

    /// Convenience constructor from text rows; empty strings become blanks.
    pub fn from_text_rows(sheet_name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let l_rows = rows
            .iter()
            .map(|row| row.iter().map(|c| EnumCellValue::from_text(*c)).collect())
            .collect();
        Self::from_rows(sheet_name, l_rows)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.n_width
    }

    pub fn get(&self, row_idx: usize, col_idx: usize) -> Option<&EnumCellValue> {
        self.rows.get(row_idx).and_then(|row| row.get(col_idx))
    }

    /// Text of a string cell; `None` for numbers, blanks and out-of-range.
    pub fn text(&self, row_idx: usize, col_idx: usize) -> Option<&str> {
        self.get(row_idx, col_idx).and_then(EnumCellValue::as_str)
    }

    pub fn row(&self, row_idx: usize) -> Option<&[EnumCellValue]> {
        self.rows.get(row_idx).map(Vec::as_slice)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetLayoutSpecification

/// Structural role of one rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumRowKind {
    /// Full-width black bar above the header; no text, no border.
    Banner,
    /// Column header row.
    Header,
    /// Regular bordered body row.
    Data,
    /// Full-width black bar between groups; no text, no border.
    Separator,
}

impl EnumRowKind {
    /// Whether the styled span of this row renders as one merged black bar.
    pub fn is_bar(&self) -> bool {
        matches!(self, Self::Banner | Self::Separator)
    }
}

/// One row of a declarative sheet layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetRow {
    /// Row role.
    pub kind: EnumRowKind,
    /// Cell values by column. Values inside the styled span of a bar row are ignored.
    pub cells: Vec<EnumCellValue>,
}

/// Per-column presentation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecColumnLayout {
    /// Fixed width in character units; `None` keeps the Excel default.
    pub width: Option<f64>,
    /// Hide the column entirely.
    pub if_hidden: bool,
}

/// Declarative description of one output worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetLayout {
    /// Requested sheet name (sanitized at write time).
    pub sheet_name: String,
    /// Column presentation, left to right.
    pub columns: Vec<SpecColumnLayout>,
    /// Number of leading columns that receive borders and bar merges.
    pub n_cols_styled: usize,
    /// Rows, top to bottom.
    pub rows: Vec<SpecSheetRow>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportAndErrors

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Actual sheet name used in the workbook.
    pub sheet_name: String,
    /// Number of rows written, including banner and header.
    pub n_rows_written: usize,
    /// Number of merged bar ranges written.
    pub n_merges: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// Spreadsheet read/write failures.
#[derive(Debug, thiserror::Error)]
pub enum XlsxIoError {
    /// Workbook could not be opened or parsed.
    #[error("Failed to open workbook {}: {message}", .path.display())]
    OpenFailed {
        /// Input workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Requested sheet is absent.
    #[error("Sheet {sheet:?} not found in {}; available: {available:?}", .path.display())]
    SheetNotFound {
        /// Input workbook path.
        path: PathBuf,
        /// Requested sheet name.
        sheet: String,
        /// Sheet names present in the workbook.
        available: Vec<String>,
    },
    /// Workbook contains no worksheet at all.
    #[error("Workbook {} contains no worksheets", .path.display())]
    NoSheets {
        /// Input workbook path.
        path: PathBuf,
    },
    /// Layout violates structural or Excel-limit constraints.
    #[error("Invalid sheet layout: {0}")]
    InvalidLayout(String),
    /// Writer used after `close()`.
    #[error("Cannot write after close().")]
    Closed,
    /// Worksheet-level write failure.
    #[error("xlsx write error: {0}")]
    Write(#[from] XlsxError),
    /// Workbook could not be saved to disk.
    #[error("Failed to save workbook {}: {source}", .path.display())]
    SaveFailed {
        /// Output workbook path.
        path: PathBuf,
        /// Underlying writer error.
        source: XlsxError,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_sheet_pads_ragged_rows() {
        let sheet = SpecRawSheet::from_rows(
            "Sheet1",
            vec![
                vec![EnumCellValue::from_text("a")],
                vec![
                    EnumCellValue::None,
                    EnumCellValue::Number(3.0),
                    EnumCellValue::from_text("c"),
                ],
            ],
        );
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.get(0, 2), Some(&EnumCellValue::None));
        assert_eq!(sheet.text(0, 0), Some("a"));
        assert_eq!(sheet.text(1, 1), None);
        assert_eq!(sheet.get(5, 0), None);
    }

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(EnumCellValue::Number(12.0).to_text(), "12");
        assert_eq!(EnumCellValue::Number(2.5).to_text(), "2.5");
        assert_eq!(EnumCellValue::None.to_text(), "");
        assert!(EnumCellValue::from_text("").is_blank());
    }

    #[test]
    fn test_format_merge_overlays_right_side() {
        let base = SpecCellFormat {
            border: Some(true),
            align: Some(EnumCellAlign::Left),
            ..Default::default()
        };
        let merged = base.merge(&SpecCellFormat {
            align: Some(EnumCellAlign::Center),
            bold: Some(true),
            ..Default::default()
        });
        assert_eq!(merged.border, Some(true));
        assert_eq!(merged.align, Some(EnumCellAlign::Center));
        assert_eq!(merged.bold, Some(true));
    }
}
