use std::fs::File;
use std::io::Read;
use std::path::Path;

use bagkit_io_xlsx::read_raw_sheet;
use bagkit_route::{
    EnumExportStage, ExportError, RouteAssignmentTable, SpecExportOptions, SpecExportProgress,
    export_birthday_bags,
};
use rust_xlsxwriter::Workbook;

fn write_report(path: &Path, sheet_name: &str, rows: &[(u32, u16, &str)]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).expect("sheet name");
    for (n_row, n_col, c_text) in rows {
        worksheet
            .write_string(*n_row, *n_col, *c_text)
            .expect("write cell");
    }
    workbook.save(path).expect("save input");
}

fn read_sheet_xml(path: &Path) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).expect("open output")).expect("zip");
    let mut entry = archive
        .by_name("xl/worksheets/sheet1.xml")
        .expect("sheet1.xml");
    let mut c_xml = String::new();
    entry.read_to_string(&mut c_xml).expect("read sheet1.xml");
    c_xml
}

/// The `<col .../>` element whose range starts at 1-based column `n_col`.
fn find_col_element(c_xml: &str, n_col: u16) -> &str {
    let c_open = format!("<col min=\"{n_col}\" max=\"{n_col}\"");
    let n_start = c_xml
        .find(&c_open)
        .unwrap_or_else(|| panic!("no col element for column {n_col}"));
    let n_len = c_xml[n_start..].find("/>").expect("self-closing col");
    &c_xml[n_start..n_start + n_len]
}

fn sample_rows() -> Vec<(u32, u16, &'static str)> {
    vec![
        (0, 0, "Happy Birthday!"),
        (1, 0, "Zed Zimmer"),
        (3, 2, "MON | MID CITY-1"),
        (5, 0, "Happy Birthday!"),
        (6, 0, "Amy Alvarez"),
        (7, 1, "SUN | CULVER CITY"),
        (10, 0, "Happy Birthday!"),
        (11, 0, "Bob Brown"),
        (12, 0, "MON | East LA-1 (Full Van)"),
        (15, 0, "Happy Birthday!"),
        (16, 0, "Gus Ghost"),
        (17, 0, "MON | GHOST ROUTE"),
        (20, 0, "Happy Birthday!"),
        (21, 0, "No Route"),
    ]
}

#[test]
fn export_writes_grouped_sheet_with_hidden_day_column() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_in = dir.path().join("report.xlsx");
    let path_out = dir.path().join("bags.xlsx");
    write_report(&path_in, "Sheet1", &sample_rows());

    let mut l_events: Vec<SpecExportProgress> = Vec::new();
    let report = export_birthday_bags(
        &path_in,
        &path_out,
        &RouteAssignmentTable::with_defaults(),
        &SpecExportOptions::default(),
        |event| l_events.push(event),
    )
    .expect("export");

    assert_eq!(report.n_markers, 5);
    assert_eq!(report.n_extracted, 4);
    assert_eq!(report.n_missing_route, 1);
    assert_eq!(report.matched_count(), 3);
    assert_eq!(report.n_unmatched, 1);
    assert_eq!(report.n_separators, 1);
    assert_eq!(report.sheet_name_out, "Sheet1");

    let l_percent: Vec<u8> = l_events.iter().map(|e| e.percent).collect();
    assert_eq!(l_percent, vec![0, 10, 30, 50, 60, 70, 75, 80, 90, 100]);
    assert_eq!(l_events.last().map(|e| e.stage), Some(EnumExportStage::Done));

    let sheet = read_raw_sheet(&path_out, None).expect("read output");
    let text = |r: usize, c: usize| {
        sheet
            .get(r, c)
            .map(|cell| cell.to_text())
            .unwrap_or_default()
    };

    assert_eq!(text(0, 0), "");
    assert_eq!(
        (text(1, 0), text(1, 1), text(1, 2), text(1, 3), text(1, 4)),
        (
            "VAN #".to_string(),
            "Client".to_string(),
            "Route Name & Day".to_string(),
            "Notes".to_string(),
            "Day".to_string()
        )
    );

    assert_eq!(text(2, 0), "10");
    assert_eq!(text(2, 1), "Amy Alvarez");
    assert_eq!(text(2, 2), "SUN | CULVER CITY");
    assert_eq!(text(2, 4), "SUN");

    assert_eq!(text(3, 0), "");
    assert_eq!(text(3, 4), "SEPARATOR_SUN");

    assert_eq!(text(4, 1), "Bob Brown");
    assert_eq!(text(4, 2), "MON | East LA-1 (Full Van)");
    assert_eq!(text(4, 0), "2");
    assert_eq!(text(5, 1), "Zed Zimmer");
    assert_eq!(text(5, 0), "5");
    assert_eq!(text(6, 1), "Gus Ghost");
    assert_eq!(text(6, 0), "");
    assert_eq!(sheet.height(), 7);
}

#[test]
fn export_styles_columns_and_merges_banner_and_separator() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_in = dir.path().join("report.xlsx");
    let path_out = dir.path().join("bags.xlsx");
    write_report(&path_in, "Sheet1", &sample_rows());
    export_birthday_bags(
        &path_in,
        &path_out,
        &RouteAssignmentTable::with_defaults(),
        &SpecExportOptions::default(),
        |_| {},
    )
    .expect("export");

    let c_xml = read_sheet_xml(&path_out);
    for (n_col, c_width) in [(1, "10."), (2, "30."), (3, "40."), (4, "15.")] {
        let c_col = find_col_element(&c_xml, n_col);
        assert!(c_col.contains(&format!("width=\"{c_width}")), "{c_col}");
        assert!(c_col.contains("customWidth=\"1\""), "{c_col}");
        assert!(!c_col.contains("hidden="), "{c_col}");
    }
    assert!(find_col_element(&c_xml, 5).contains("hidden=\"1\""));

    // Banner on row 1, the SUN separator on row 4.
    assert!(c_xml.contains("<mergeCell ref=\"A1:D1\"/>"));
    assert!(c_xml.contains("<mergeCell ref=\"A4:D4\"/>"));
    assert_eq!(c_xml.matches("<mergeCell ").count(), 2);
}

#[test]
fn export_honors_explicit_input_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_in = dir.path().join("report.xlsx");
    let path_out = dir.path().join("bags.xlsx");
    write_report(&path_in, "Birthdays", &sample_rows());

    let options = SpecExportOptions {
        sheet_name_in: Some("Missing".to_string()),
        ..SpecExportOptions::default()
    };
    let err = export_birthday_bags(
        &path_in,
        &path_out,
        &RouteAssignmentTable::with_defaults(),
        &options,
        |_| {},
    )
    .expect_err("unknown sheet");
    assert!(matches!(err, ExportError::InputReadFailure(_)));

    let report = export_birthday_bags(
        &path_in,
        &path_out,
        &RouteAssignmentTable::with_defaults(),
        &SpecExportOptions::default(),
        |_| {},
    )
    .expect("falls back to the first sheet");
    assert_eq!(report.n_extracted, 4);
}

#[test]
fn export_with_empty_route_table_leaves_vans_blank() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_in = dir.path().join("report.xlsx");
    let path_out = dir.path().join("bags.xlsx");
    write_report(&path_in, "Sheet1", &sample_rows());

    let report = export_birthday_bags(
        &path_in,
        &path_out,
        &RouteAssignmentTable::new(),
        &SpecExportOptions::default(),
        |_| {},
    )
    .expect("export");
    assert_eq!(report.matched_count(), 0);
    assert_eq!(report.n_unmatched, 4);

    let sheet = read_raw_sheet(&path_out, Some("Sheet1")).expect("read output");
    let l_vans: Vec<String> = (2..sheet.height())
        .map(|r| sheet.get(r, 0).map(|c| c.to_text()).unwrap_or_default())
        .collect();
    assert!(l_vans.iter().all(String::is_empty));
}
