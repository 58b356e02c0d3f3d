//! Client record extraction from the raw report grid.

use bagkit_io_xlsx::SpecRawSheet;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::conf::{C_MARKER_BIRTHDAY, C_PATTERN_ROUTE_LABEL, N_ROWS_ROUTE_WINDOW};
use crate::report::ReportExportBuilder;
use crate::spec::{ClientRecord, EnumDay};

static RE_ROUTE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(C_PATTERN_ROUTE_LABEL).expect("valid route label regex"));

/// Find the first route label in `text`; returns the day and route text.
pub fn parse_route_cell(text: &str) -> Option<(EnumDay, String)> {
    let caps = RE_ROUTE_LABEL.captures(text)?;
    let day = caps.get(1)?.as_str().parse::<EnumDay>().ok()?;
    let c_route = caps.get(2).map_or("", |m| m.as_str());
    Some((day, c_route.to_string()))
}

/// Whether the cell text opens a client block.
fn is_marker(text: Option<&str>) -> bool {
    text.is_some_and(|c| c.contains(C_MARKER_BIRTHDAY))
}

/// First route label in rows `[n_row_first, n_row_end)`, scanned row-major.
fn find_route_label(
    sheet: &SpecRawSheet,
    n_row_first: usize,
    n_row_end: usize,
) -> Option<(EnumDay, String)> {
    (n_row_first..n_row_end).find_map(|n_row| {
        sheet
            .row(n_row)?
            .iter()
            .filter_map(|cell| cell.as_str())
            .find_map(parse_route_cell)
    })
}

/// Scan the grid for client blocks, in row order.
///
/// A block starts at a first-column cell containing the birthday marker. The
/// client name is the first cell of the next row; the route label is searched
/// in the following [`N_ROWS_ROUTE_WINDOW`] rows across all columns. Blocks
/// missing either part are counted and skipped.
pub fn extract_client_records(
    sheet: &SpecRawSheet,
    builder: &mut ReportExportBuilder,
) -> Vec<ClientRecord> {
    let n_height = sheet.height();
    let mut l_records = Vec::new();

    for n_row in 0..n_height {
        if !is_marker(sheet.text(n_row, 0)) {
            continue;
        }
        builder.add_marker();

        if n_row + 1 >= n_height {
            let msg = format!("Marker at row {} has no client-name row.", n_row + 1);
            warn!("{msg}");
            builder.add_missing_name();
            builder.add_warning(msg);
            continue;
        }
        let c_client = sheet
            .get(n_row + 1, 0)
            .map(|cell| cell.to_text())
            .unwrap_or_default();

        let n_row_end = usize::min(n_row + 2 + N_ROWS_ROUTE_WINDOW, n_height);
        match find_route_label(sheet, n_row + 2, n_row_end) {
            Some((day, c_route)) => {
                debug!(row = n_row + 1, client = %c_client, %day, route = %c_route, "client extracted");
                builder.add_extracted();
                l_records.push(ClientRecord::new(c_client, day, c_route));
            }
            None => {
                let msg = format!(
                    "Client {c_client:?} (marker row {}) has no route label within {N_ROWS_ROUTE_WINDOW} rows.",
                    n_row + 1
                );
                warn!("{msg}");
                builder.add_missing_route();
                builder.add_warning(msg);
            }
        }
    }

    l_records
}

/// [`extract_client_records`] without report bookkeeping.
pub fn extract(sheet: &SpecRawSheet) -> Vec<ClientRecord> {
    extract_client_records(sheet, &mut ReportExportBuilder::default())
}
