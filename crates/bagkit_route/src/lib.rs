//! `bagkit_route` v1:
//! Birthday bag route export engine.
//!
//! Pipeline stages:
//! - `extract`  : client blocks from the raw report grid
//! - `resolve`  : route canonicalization and tiered van lookup
//! - `sequence` : day-then-van ordering
//! - `layout`   : output rows, day separators, sheet projection
//! - `pipeline` : end-to-end export with progress events
//!
//! Supporting modules:
//! - `conf`   : constants and the production route sheet
//! - `routes` : ordered route assignment table and its JSON form
//! - `spec`   : record models, options, progress and errors
//! - `report` : run-time report model

pub mod conf;
pub mod extract;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod routes;
pub mod sequence;
pub mod spec;

pub use extract::{extract, extract_client_records, parse_route_cell};
pub use layout::{
    derive_separator_tag, derive_sheet_layout, format_output_table, insert_day_separators,
    project_output_rows,
};
pub use pipeline::{build_output_table, export_birthday_bags};
pub use report::{ReportExport, ReportExportBuilder};
pub use resolve::{
    SpecRouteMatch, canonicalize_route_name, derive_route_base, parse_route_label,
    resolve_records, resolve_route, resolve_van,
};
pub use routes::{RouteAssignmentTable, SpecRouteEntry, parse_route_key};
pub use sequence::{EnumVanSortKey, derive_van_sort_key, order_records};
pub use spec::{
    ClientRecord, EnumDay, EnumExportStage, EnumMatchTier, EnumOutputRow, ExportError,
    ResolvedRecord, RouteTableError, SpecExportOptions, SpecExportProgress, SpecOutputRow,
    SpecOutputTable,
};
