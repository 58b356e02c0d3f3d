//! `bagkit_io_xlsx` v1:
//! Spreadsheet IO kernel for the birthday bag exporter.
//!
//! Module layout:
//! - `conf`   : Excel limits and default format presets
//! - `spec`   : cell/grid/layout models, reports and errors
//! - `util`   : pure helper functions
//! - `reader` : calamine-backed raw grid reader
//! - `writer` : rust_xlsxwriter-backed layout renderer
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, derive_default_xlsx_formats,
};
pub use reader::{derive_raw_sheet_from_range, read_raw_sheet, select_sheet_name};
pub use spec::{
    EnumCellAlign, EnumCellValue, EnumRowKind, SpecCellFormat, SpecColumnLayout, SpecRawSheet,
    SpecSheetLayout, SpecSheetRow, SpecXlsxReport, XlsxIoError,
};
pub use util::{
    convert_number_to_text, derive_bar_merge_range, sanitize_sheet_name, validate_sheet_layout,
};
pub use writer::XlsxWriter;
