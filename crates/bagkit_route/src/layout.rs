//! Output table formatting and its projection onto a sheet layout.

use bagkit_io_xlsx::{
    EnumCellValue, EnumRowKind, SpecColumnLayout, SpecSheetLayout, SpecSheetRow,
};

use crate::conf::{
    C_HEADER_DAY_TAG, C_SEPARATOR_TAG_PREFIX, TUP_OUTPUT_HEADERS, TUP_OUTPUT_WIDTHS,
};
use crate::spec::{EnumDay, EnumOutputRow, ResolvedRecord, SpecOutputRow, SpecOutputTable};

/// Project ordered records onto output rows; notes start empty.
pub fn project_output_rows(l_records: &[ResolvedRecord]) -> Vec<SpecOutputRow> {
    l_records
        .iter()
        .map(|record| SpecOutputRow {
            van: record.van.clone(),
            client_name: record.client.client_name.clone(),
            route_display: record.client.route_label.clone(),
            notes: String::new(),
            day: record.day(),
        })
        .collect()
}

/// Insert one separator after each run of equal days except the last.
///
/// Input must already be grouped by day. The separator carries the day of the
/// group it closes.
pub fn insert_day_separators(l_rows: Vec<SpecOutputRow>) -> SpecOutputTable {
    let mut l_out = Vec::with_capacity(l_rows.len() + EnumDay::ALL.len());
    let mut day_prev: Option<EnumDay> = None;
    for row in l_rows {
        if let Some(day) = day_prev
            && day != row.day
        {
            l_out.push(EnumOutputRow::Separator { day });
        }
        day_prev = Some(row.day);
        l_out.push(EnumOutputRow::Data(row));
    }
    SpecOutputTable { rows: l_out }
}

/// Rows plus separators for already-ordered records.
pub fn format_output_table(l_records: &[ResolvedRecord]) -> SpecOutputTable {
    insert_day_separators(project_output_rows(l_records))
}

/// Helper-column tag of a separator closing `day`.
pub fn derive_separator_tag(day: EnumDay) -> String {
    format!("{C_SEPARATOR_TAG_PREFIX}{day}")
}

/// Sheet layout: banner, header, then one row per table entry.
///
/// Columns A..D are visible and styled; column E carries the day tag and is
/// hidden.
pub fn derive_sheet_layout(table: &SpecOutputTable, sheet_name: &str) -> SpecSheetLayout {
    let n_cols_visible = TUP_OUTPUT_HEADERS.len();

    let mut l_columns: Vec<SpecColumnLayout> = TUP_OUTPUT_WIDTHS
        .iter()
        .map(|n_width| SpecColumnLayout {
            width: Some(*n_width),
            if_hidden: false,
        })
        .collect();
    l_columns.push(SpecColumnLayout {
        width: None,
        if_hidden: true,
    });

    let mut l_rows = Vec::with_capacity(table.rows.len() + 2);
    l_rows.push(SpecSheetRow {
        kind: EnumRowKind::Banner,
        cells: Vec::new(),
    });

    let mut l_header: Vec<EnumCellValue> = TUP_OUTPUT_HEADERS
        .iter()
        .map(|c_header| EnumCellValue::from_text(*c_header))
        .collect();
    l_header.push(EnumCellValue::from_text(C_HEADER_DAY_TAG));
    l_rows.push(SpecSheetRow {
        kind: EnumRowKind::Header,
        cells: l_header,
    });

    for row in &table.rows {
        l_rows.push(match row {
            EnumOutputRow::Data(data) => SpecSheetRow {
                kind: EnumRowKind::Data,
                cells: vec![
                    EnumCellValue::from_text(data.van.clone()),
                    EnumCellValue::from_text(data.client_name.clone()),
                    EnumCellValue::from_text(data.route_display.clone()),
                    EnumCellValue::from_text(data.notes.clone()),
                    EnumCellValue::from_text(data.day.as_str()),
                ],
            },
            EnumOutputRow::Separator { day } => {
                let mut l_cells = vec![EnumCellValue::None; n_cols_visible];
                l_cells.push(EnumCellValue::from_text(derive_separator_tag(*day)));
                SpecSheetRow {
                    kind: EnumRowKind::Separator,
                    cells: l_cells,
                }
            }
        });
    }

    SpecSheetLayout {
        sheet_name: sheet_name.to_string(),
        columns: l_columns,
        n_cols_styled: n_cols_visible,
        rows: l_rows,
    }
}
