//! XLSX constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::{EnumCellAlign, SpecCellFormat};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Canonical format preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumFmtKey {
    /// Bordered body cell inside the styled column span.
    Text,
    /// Header cell inside the styled column span.
    Header,
    /// Solid black merged bar (banner and separator rows).
    Bar,
    /// Cells outside the styled column span (helper columns).
    Plain,
}

/// Build default named format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_xlsx_formats() -> BTreeMap<EnumFmtKey, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        border: Some(true),
        valign: Some(EnumCellAlign::VCenter),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(EnumFmtKey::Text, cfg_base_fmt_spec);
    dict_fmt.insert(
        EnumFmtKey::Header,
        cfg_base_fmt_spec.merge(&SpecCellFormat {
            bold: Some(true),
            align: Some(EnumCellAlign::Center),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Bar,
        SpecCellFormat {
            border: Some(false),
            bg_color: Some(0x000000),
            ..Default::default()
        },
    );
    dict_fmt.insert(EnumFmtKey::Plain, SpecCellFormat::default());

    dict_fmt
}
