//! Stateless helper utilities used by the XLSX reader and writer.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{SpecSheetLayout, SpecSheetRow};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Render a numeric cell as text; integral values drop the fractional part.
pub fn convert_number_to_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{x:.0}")
    } else {
        x.to_string()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Check layout shape against itself and Excel limits before any write.
pub fn validate_sheet_layout(layout: &SpecSheetLayout) -> Result<(), String> {
    let n_cols = layout.columns.len();
    if n_cols == 0 {
        return Err("layout must declare >= 1 column.".to_string());
    }
    if n_cols > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "layout declares {n_cols} columns; Excel allows {N_NCOLS_EXCEL_MAX}."
        ));
    }
    if layout.n_cols_styled == 0 || layout.n_cols_styled > n_cols {
        return Err(format!(
            "n_cols_styled must be within 1..={n_cols}, got {}.",
            layout.n_cols_styled
        ));
    }
    if layout.rows.len() > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "layout has {} rows; Excel allows {N_NROWS_EXCEL_MAX}.",
            layout.rows.len()
        ));
    }
    for (n_idx_row, row) in layout.rows.iter().enumerate() {
        if row.cells.len() > n_cols {
            return Err(format!(
                "row {n_idx_row} has {} cells but only {n_cols} columns are declared.",
                row.cells.len()
            ));
        }
    }
    for (n_idx_col, col) in layout.columns.iter().enumerate() {
        if let Some(n_width) = col.width
            && !(0.0..=255.0).contains(&n_width)
        {
            return Err(format!(
                "column {n_idx_col} width {n_width} is outside 0..=255."
            ));
        }
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeUtils

/// Inclusive column range `(first, last)` covered by the merged bar of `row`.
///
/// Returns `None` for non-bar rows, and for a one-column span where a merge
/// would be a single cell.
pub fn derive_bar_merge_range(row: &SpecSheetRow, n_cols_styled: usize) -> Option<(usize, usize)> {
    if !row.kind.is_bar() || n_cols_styled < 2 {
        return None;
    }
    Some((0, n_cols_styled - 1))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EnumCellValue, EnumRowKind, SpecColumnLayout};

    fn create_layout(n_cols_styled: usize, rows: Vec<SpecSheetRow>) -> SpecSheetLayout {
        SpecSheetLayout {
            sheet_name: "Sheet1".to_string(),
            columns: vec![SpecColumnLayout::default(); 3],
            n_cols_styled,
            rows,
        }
    }

    #[test]
    fn test_sanitize_sheet_name_replaces_illegal_and_truncates() {
        assert_eq!(sanitize_sheet_name("Routes [MON]/TUE", "_"), "Routes _MON__TUE");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(
            sanitize_sheet_name(&"x".repeat(40), "_").chars().count(),
            N_LEN_EXCEL_SHEET_NAME_MAX
        );
    }

    #[test]
    fn test_convert_number_to_text() {
        assert_eq!(convert_number_to_text(7.0), "7");
        assert_eq!(convert_number_to_text(-3.0), "-3");
        assert_eq!(convert_number_to_text(0.25), "0.25");
        assert_eq!(convert_number_to_text(f64::NAN), "NaN");
    }

    #[test]
    fn test_validate_sheet_layout_rejects_bad_shapes() {
        assert!(validate_sheet_layout(&create_layout(2, vec![])).is_ok());
        assert!(validate_sheet_layout(&create_layout(0, vec![])).is_err());
        assert!(validate_sheet_layout(&create_layout(4, vec![])).is_err());

        let row_too_wide = SpecSheetRow {
            kind: EnumRowKind::Data,
            cells: vec![EnumCellValue::None; 4],
        };
        assert!(validate_sheet_layout(&create_layout(2, vec![row_too_wide])).is_err());

        let mut layout = create_layout(2, vec![]);
        layout.columns[1].width = Some(300.0);
        assert!(validate_sheet_layout(&layout).is_err());
    }

    #[test]
    fn test_derive_bar_merge_range_only_for_bars() {
        let bar = SpecSheetRow {
            kind: EnumRowKind::Separator,
            cells: vec![],
        };
        let data = SpecSheetRow {
            kind: EnumRowKind::Data,
            cells: vec![],
        };
        assert_eq!(derive_bar_merge_range(&bar, 4), Some((0, 3)));
        assert_eq!(derive_bar_merge_range(&bar, 1), None);
        assert_eq!(derive_bar_merge_range(&data, 4), None);
    }
}
