//! End-to-end export: read, extract, resolve, order, format, render.

use std::path::Path;

use bagkit_io_xlsx::{SpecRawSheet, XlsxWriter, read_raw_sheet};
use tracing::{debug, info};

use crate::extract::extract_client_records;
use crate::layout::{derive_sheet_layout, insert_day_separators, project_output_rows};
use crate::report::{ReportExport, ReportExportBuilder};
use crate::resolve::resolve_records;
use crate::routes::RouteAssignmentTable;
use crate::sequence::order_records;
use crate::spec::{
    EnumExportStage, ExportError, SpecExportOptions, SpecExportProgress, SpecOutputTable,
};

fn emit<F: FnMut(SpecExportProgress)>(on_progress: &mut F, event: SpecExportProgress) {
    debug!(stage = ?event.stage, percent = event.percent, "{}", event.message);
    on_progress(event);
}

/// Build the ordered output table from an in-memory grid.
///
/// Emits the extraction to separator milestones through `on_progress`.
pub fn build_output_table<F>(
    sheet: &SpecRawSheet,
    table: &RouteAssignmentTable,
    builder: &mut ReportExportBuilder,
    on_progress: &mut F,
) -> SpecOutputTable
where
    F: FnMut(SpecExportProgress),
{
    emit(on_progress, SpecExportProgress::new(EnumExportStage::Extracting));
    let l_records = extract_client_records(sheet, builder);

    emit(on_progress, SpecExportProgress::new(EnumExportStage::Matching));
    let l_resolved = resolve_records(l_records, table, builder);

    emit(on_progress, SpecExportProgress::new(EnumExportStage::Ordering));
    let l_ordered = order_records(l_resolved);

    emit(on_progress, SpecExportProgress::new(EnumExportStage::Formatting));
    let l_rows = project_output_rows(&l_ordered);

    emit(on_progress, SpecExportProgress::new(EnumExportStage::Separating));
    let table_out = insert_day_separators(l_rows);
    builder.set_separators(table_out.count_separators());
    table_out
}

/// Export birthday-bag routes from `path_file_in` into `path_file_out`.
///
/// Progress is reported at fixed milestones from 0 to 100. The input workbook
/// is closed before the output is written; a failed export may leave a
/// partial output file behind.
pub fn export_birthday_bags<P, Q, F>(
    path_file_in: P,
    path_file_out: Q,
    table: &RouteAssignmentTable,
    options: &SpecExportOptions,
    mut on_progress: F,
) -> Result<ReportExport, ExportError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(SpecExportProgress),
{
    let path_file_in = path_file_in.as_ref();
    let path_file_out = path_file_out.as_ref();
    let mut builder = ReportExportBuilder::default();

    emit(&mut on_progress, SpecExportProgress::new(EnumExportStage::Starting));
    let sheet = read_raw_sheet(path_file_in, options.sheet_name_in.as_deref())
        .map_err(ExportError::InputReadFailure)?;
    debug!(
        sheet = %sheet.sheet_name,
        rows = sheet.height(),
        cols = sheet.width(),
        "input loaded"
    );

    let table_out = build_output_table(&sheet, table, &mut builder, &mut on_progress);

    emit(
        &mut on_progress,
        SpecExportProgress::with_message(
            EnumExportStage::Saving,
            format!("Saving to {}...", path_file_out.display()),
        ),
    );
    let layout = derive_sheet_layout(&table_out, &options.sheet_name_out);
    let mut writer = XlsxWriter::with_default_formats(path_file_out.to_path_buf());

    emit(&mut on_progress, SpecExportProgress::new(EnumExportStage::Styling));
    let report_sheet = writer
        .write_sheet_layout(&layout)
        .map_err(ExportError::OutputWriteFailure)?;
    builder.set_sheet_name_out(report_sheet.sheet_name.clone());
    builder.extend_warnings(report_sheet.warnings);

    writer.close().map_err(ExportError::OutputWriteFailure)?;
    emit(&mut on_progress, SpecExportProgress::new(EnumExportStage::Finalizing));

    let report = builder.build();
    info!(
        input = %path_file_in.display(),
        output = %path_file_out.display(),
        "{report}"
    );
    emit(
        &mut on_progress,
        SpecExportProgress::with_message(
            EnumExportStage::Done,
            format!("Done! Output saved to {}", path_file_out.display()),
        ),
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EnumDay, EnumOutputRow};

    #[test]
    fn test_build_output_table_end_to_end_in_memory() {
        let sheet = SpecRawSheet::from_text_rows(
            "Sheet1",
            &[
                &["Happy Birthday!", ""],
                &["Zed", ""],
                &["", "MON | MID CITY-1"],
                &["Happy Birthday!", ""],
                &["Amy", ""],
                &["", "SUN | CULVER CITY"],
                &["Happy Birthday!", ""],
                &["Bob", ""],
                &["MON | East LA-1 (Full Van)", ""],
                &["Happy Birthday!", ""],
                &["Ghost", ""],
                &["MON | GHOST ROUTE", ""],
            ],
        );
        let table = RouteAssignmentTable::with_defaults();
        let mut builder = ReportExportBuilder::default();
        let mut l_stages = Vec::new();
        let mut on_progress = |event: SpecExportProgress| l_stages.push(event.percent);
        let table_out = build_output_table(&sheet, &table, &mut builder, &mut on_progress);
        assert_eq!(l_stages, vec![10, 30, 50, 60, 70]);

        let l_names: Vec<(String, String)> = table_out
            .rows
            .iter()
            .map(|row| match row {
                EnumOutputRow::Data(data) => (data.van.clone(), data.client_name.clone()),
                EnumOutputRow::Separator { day } => (String::new(), format!("SEP_{day}")),
            })
            .collect();
        assert_eq!(
            l_names,
            vec![
                ("10".to_string(), "Amy".to_string()),
                (String::new(), "SEP_SUN".to_string()),
                ("2".to_string(), "Bob".to_string()),
                ("5".to_string(), "Zed".to_string()),
                (String::new(), "Ghost".to_string()),
            ]
        );
        assert_eq!(table_out.rows[1].day(), EnumDay::Sun);

        let report = builder.build();
        assert_eq!(report.n_extracted, 4);
        assert_eq!(report.n_unmatched, 1);
        assert_eq!(report.n_separators, 1);
    }

    #[test]
    fn test_export_missing_input_is_input_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = export_birthday_bags(
            dir.path().join("missing.xlsx"),
            dir.path().join("out.xlsx"),
            &RouteAssignmentTable::with_defaults(),
            &SpecExportOptions::default(),
            |_| {},
        )
        .expect_err("missing input");
        assert!(matches!(err, ExportError::InputReadFailure(_)));
        assert!(!dir.path().join("out.xlsx").exists());
    }
}
