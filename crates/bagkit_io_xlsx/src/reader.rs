//! Worksheet reader that loads one sheet into an absolute [`SpecRawSheet`] grid.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::spec::{EnumCellValue, SpecRawSheet, XlsxIoError};

/// Sheet name preferred when the caller does not request one.
pub const C_SHEET_NAME_PREFERRED: &str = "Sheet1";

/// Read one worksheet of `path_file_in` (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
///
/// Sheet selection follows [`select_sheet_name`]. The workbook handle is
/// released before this function returns, on success and on failure.
pub fn read_raw_sheet<P: AsRef<Path>>(
    path_file_in: P,
    sheet_name: Option<&str>,
) -> Result<SpecRawSheet, XlsxIoError> {
    let path_file_in = path_file_in.as_ref();
    let mut workbook =
        open_workbook_auto(path_file_in).map_err(|err| XlsxIoError::OpenFailed {
            path: path_file_in.to_path_buf(),
            message: err.to_string(),
        })?;

    let l_sheet_names = workbook.sheet_names();
    let c_sheet_name = select_sheet_name(&l_sheet_names, sheet_name).map_err(|err| match err {
        None => XlsxIoError::NoSheets {
            path: path_file_in.to_path_buf(),
        },
        Some(sheet) => XlsxIoError::SheetNotFound {
            path: path_file_in.to_path_buf(),
            sheet,
            available: l_sheet_names.clone(),
        },
    })?;
    debug!(sheet = %c_sheet_name, path = %path_file_in.display(), "reading worksheet");

    let range = workbook
        .worksheet_range(&c_sheet_name)
        .map_err(|err| XlsxIoError::OpenFailed {
            path: path_file_in.to_path_buf(),
            message: format!("sheet {c_sheet_name:?}: {err}"),
        })?;

    Ok(derive_raw_sheet_from_range(&c_sheet_name, &range))
}

/// Pick the sheet to read.
///
/// An explicit request must exist. Without one, `Sheet1` wins when present,
/// otherwise the first sheet. `Err(None)` means the workbook has no sheets,
/// `Err(Some(name))` means the requested sheet is missing.
pub fn select_sheet_name(
    sheet_names: &[String],
    sheet_name: Option<&str>,
) -> Result<String, Option<String>> {
    if let Some(c_requested) = sheet_name {
        return sheet_names
            .iter()
            .find(|name| name.as_str() == c_requested)
            .cloned()
            .ok_or_else(|| Some(c_requested.to_string()));
    }
    if let Some(name) = sheet_names
        .iter()
        .find(|name| name.as_str() == C_SHEET_NAME_PREFERRED)
    {
        return Ok(name.clone());
    }
    sheet_names.first().cloned().ok_or(None)
}

/// Convert a calamine range to an absolute grid anchored at `A1`.
pub fn derive_raw_sheet_from_range(sheet_name: &str, range: &Range<Data>) -> SpecRawSheet {
    let Some((n_row_start, n_col_start)) = range.start() else {
        return SpecRawSheet::from_rows(sheet_name, vec![]);
    };
    let n_row_start = n_row_start as usize;
    let n_col_start = n_col_start as usize;

    let mut l_rows: Vec<Vec<EnumCellValue>> = vec![vec![]; n_row_start];
    for row in range.rows() {
        let mut l_cells = vec![EnumCellValue::None; n_col_start];
        l_cells.extend(row.iter().map(convert_calamine_data));
        l_rows.push(l_cells);
    }

    SpecRawSheet::from_rows(sheet_name, l_rows)
}

fn convert_calamine_data(value: &Data) -> EnumCellValue {
    match value {
        Data::Empty | Data::Error(_) => EnumCellValue::None,
        Data::String(val) => EnumCellValue::from_text(val.clone()),
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::Bool(val) => EnumCellValue::String(if *val { "True" } else { "False" }.to_string()),
        Data::DateTime(val) => EnumCellValue::Number(val.as_f64()),
        Data::DateTimeIso(val) | Data::DurationIso(val) => EnumCellValue::String(val.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_select_sheet_name_prefers_request_then_sheet1_then_first() {
        let l_names = names(&["Cover", "Sheet1", "Other"]);
        assert_eq!(select_sheet_name(&l_names, Some("Other")), Ok("Other".to_string()));
        assert_eq!(select_sheet_name(&l_names, None), Ok("Sheet1".to_string()));
        assert_eq!(
            select_sheet_name(&names(&["Report"]), None),
            Ok("Report".to_string())
        );
        assert_eq!(
            select_sheet_name(&l_names, Some("Missing")),
            Err(Some("Missing".to_string()))
        );
        assert_eq!(select_sheet_name(&[], None), Err(None));
    }

    #[test]
    fn test_range_offset_is_padded_to_absolute_coordinates() {
        let mut range = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Happy Birthday!".to_string()));
        range.set_value((3, 2), Data::Float(4.0));

        let sheet = derive_raw_sheet_from_range("Sheet1", &range);
        assert_eq!(sheet.height(), 4);
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.text(2, 1), Some("Happy Birthday!"));
        assert_eq!(sheet.get(3, 2), Some(&EnumCellValue::Number(4.0)));
        assert_eq!(sheet.get(0, 0), Some(&EnumCellValue::None));
    }

    #[test]
    fn test_empty_range_yields_empty_sheet() {
        let range: Range<Data> = Range::empty();
        let sheet = derive_raw_sheet_from_range("Sheet1", &range);
        assert_eq!(sheet.height(), 0);
        assert_eq!(sheet.width(), 0);
    }
}
