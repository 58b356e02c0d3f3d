//! XLSX writer kernel that renders a [`SpecSheetLayout`] into workbook output.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::conf::{EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX, derive_default_xlsx_formats};
use crate::spec::{
    EnumCellAlign, EnumCellValue, EnumRowKind, SpecCellFormat, SpecSheetLayout, SpecXlsxReport,
    XlsxIoError,
};
use crate::util::{derive_bar_merge_range, sanitize_sheet_name, validate_sheet_layout};

static CELL_BLANK: EnumCellValue = EnumCellValue::None;

/// Resolved `rust_xlsxwriter` formats for one sheet write.
struct SpecRowFormats {
    fmt_text: Format,
    fmt_header: Format,
    fmt_bar: Format,
    fmt_plain: Format,
}

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    dict_fmt: BTreeMap<EnumFmtKey, SpecCellFormat>,
    set_sheet_names_existing: BTreeSet<String>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and format presets.
    ///
    /// Missing keys in `dict_fmt` fall back to [`derive_default_xlsx_formats`].
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf, dict_fmt: BTreeMap<EnumFmtKey, SpecCellFormat>) -> Self {
        let mut dict_fmt_full = derive_default_xlsx_formats();
        dict_fmt_full.extend(dict_fmt);
        Self {
            path_file_out,
            workbook: Workbook::new(),
            dict_fmt: dict_fmt_full,
            set_sheet_names_existing: BTreeSet::new(),
            if_closed: false,
        }
    }

    /// Create writer with the default format presets.
    pub fn with_default_formats(path_file_out: PathBuf) -> Self {
        Self::new(path_file_out, BTreeMap::new())
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(|source| XlsxIoError::SaveFailed {
                path: self.path_file_out.clone(),
                source,
            })?;
        self.if_closed = true;
        Ok(())
    }

    /// Render one worksheet from a declarative layout.
    ///
    /// Bar rows (banner/separator) merge the styled column span into a single
    /// black cell without border or text; header and data rows receive the
    /// header/text presets inside the styled span and the plain preset outside.
    pub fn write_sheet_layout(
        &mut self,
        layout: &SpecSheetLayout,
    ) -> Result<SpecXlsxReport, XlsxIoError> {
        if self.if_closed {
            return Err(XlsxIoError::Closed);
        }
        validate_sheet_layout(layout).map_err(XlsxIoError::InvalidLayout)?;

        let mut report = SpecXlsxReport::default();
        let c_sheet_name_clean = sanitize_sheet_name(&layout.sheet_name, "_");
        if c_sheet_name_clean != layout.sheet_name {
            report.warn(format!(
                "Sheet name {:?} sanitized to {c_sheet_name_clean:?}.",
                layout.sheet_name
            ));
        }
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name_clean);
        if sheet_name_unique != c_sheet_name_clean {
            report.warn(format!(
                "Sheet name {c_sheet_name_clean:?} already used; wrote {sheet_name_unique:?}."
            ));
        }

        let fmts = SpecRowFormats {
            fmt_text: derive_rust_xlsx_format(&self.dict_fmt[&EnumFmtKey::Text]),
            fmt_header: derive_rust_xlsx_format(&self.dict_fmt[&EnumFmtKey::Header]),
            fmt_bar: derive_rust_xlsx_format(&self.dict_fmt[&EnumFmtKey::Bar]),
            fmt_plain: derive_rust_xlsx_format(&self.dict_fmt[&EnumFmtKey::Plain]),
        };

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        for (n_idx_col, col) in layout.columns.iter().enumerate() {
            let n_col = cast_col_num(n_idx_col)?;
            if let Some(n_width) = col.width {
                worksheet.set_column_width(n_col, n_width)?;
            }
            if col.if_hidden {
                worksheet.set_column_hidden(n_col)?;
            }
        }

        for (n_idx_row, row) in layout.rows.iter().enumerate() {
            let n_row = cast_row_num(n_idx_row)?;

            if let Some((n_col_first, n_col_last)) =
                derive_bar_merge_range(row, layout.n_cols_styled)
            {
                worksheet.merge_range(
                    n_row,
                    cast_col_num(n_col_first)?,
                    n_row,
                    cast_col_num(n_col_last)?,
                    "",
                    &fmts.fmt_bar,
                )?;
                report.n_merges += 1;
            } else if row.kind.is_bar() {
                worksheet.write_blank(n_row, 0, &fmts.fmt_bar)?;
            }

            for n_idx_col in 0..layout.columns.len() {
                let if_styled = n_idx_col < layout.n_cols_styled;
                if row.kind.is_bar() && if_styled {
                    continue;
                }
                let fmt = match (row.kind, if_styled) {
                    (EnumRowKind::Header, true) => &fmts.fmt_header,
                    (EnumRowKind::Data, true) => &fmts.fmt_text,
                    _ => &fmts.fmt_plain,
                };
                let value = row.cells.get(n_idx_col).unwrap_or(&CELL_BLANK);
                if value.is_blank() && !if_styled {
                    continue;
                }
                write_cell_with_format(worksheet, n_idx_row, n_idx_col, value, fmt)?;
            }
        }

        report.sheet_name = sheet_name_unique;
        report.n_rows_written = layout.rows.len();
        debug!(
            sheet = %report.sheet_name,
            rows = report.n_rows_written,
            merges = report.n_merges,
            "sheet layout rendered"
        );

        Ok(report)
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxIoError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    for align in [spec.align, spec.valign].into_iter().flatten() {
        format = format.set_align(derive_format_align(align));
    }
    if let Some(n_rgb) = spec.bg_color {
        format = format.set_background_color(n_rgb);
    }
    if let Some(if_border) = spec.border {
        format = format.set_border(if if_border {
            FormatBorder::Thin
        } else {
            FormatBorder::None
        });
    }
    format
}

fn derive_format_align(align: EnumCellAlign) -> FormatAlign {
    match align {
        EnumCellAlign::Left => FormatAlign::Left,
        EnumCellAlign::Center => FormatAlign::Center,
        EnumCellAlign::Right => FormatAlign::Right,
        EnumCellAlign::Top => FormatAlign::Top,
        EnumCellAlign::VCenter => FormatAlign::VerticalCenter,
        EnumCellAlign::Bottom => FormatAlign::Bottom,
    }
}

fn cast_row_num(value: usize) -> Result<u32, XlsxIoError> {
    u32::try_from(value)
        .map_err(|_| XlsxIoError::InvalidLayout(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxIoError> {
    u16::try_from(value)
        .map_err(|_| XlsxIoError::InvalidLayout(format!("column index overflow: {value}")))
}
