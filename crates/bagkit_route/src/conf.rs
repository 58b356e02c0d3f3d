//! Pipeline constants, output schema and the default route assignment table.

/// Literal text that opens one client block in the source report.
pub const C_MARKER_BIRTHDAY: &str = "Happy Birthday!";
/// Number of rows after the client-name row searched for a route label.
pub const N_ROWS_ROUTE_WINDOW: usize = 5;
/// Route label pattern; group 1 is the day, group 2 the route text.
pub const C_PATTERN_ROUTE_LABEL: &str = r"(MON|TUE|WED|THU|FRI|SAT|SUN)\s+\|\s+(.*?)\n?$";

/// Visible output headers, columns A..D.
pub const TUP_OUTPUT_HEADERS: [&str; 4] = ["VAN #", "Client", "Route Name & Day", "Notes"];
/// Visible output widths in character units, columns A..D.
pub const TUP_OUTPUT_WIDTHS: [f64; 4] = [10.0, 30.0, 40.0, 15.0];
/// Header of the hidden helper column E.
pub const C_HEADER_DAY_TAG: &str = "Day";
/// Helper-column tag prefix of separator rows (`SEPARATOR_MON`).
pub const C_SEPARATOR_TAG_PREFIX: &str = "SEPARATOR_";

/// Default output sheet name.
pub const C_SHEET_NAME_OUT_DEFAULT: &str = "Sheet1";
/// Default output file name.
pub const C_FILE_OUT_DEFAULT: &str = "Birthday_Bag_Routes.xlsx";

/// Sort offset placing volunteer vans after numbered vans.
pub const N_VAN_VOLUNTEER_OFFSET: u64 = 100;
/// Volunteer van prefixes, longest first.
pub const TUP_VAN_VOLUNTEER_PREFIXES: [&str; 2] = ["VOLUNTEER-", "VOL-"];

/// Production route assignments, keyed `<DAY>_<ROUTE NAME>`, in sheet order.
pub const TUP_DEFAULT_ROUTE_ASSIGNMENTS: &[(&str, &str)] = &[
    ("SUN_CANYON COUNTRY-2", "8"),
    ("SUN_NORTHEAST-2", "2"),
    ("SUN_NORTHEAST-3", "3"),
    ("SUN_SOUTH GATE-5", "4"),
    ("SUN_WESTMONT PARK-1", "5"),
    ("SUN_WESTSIDE-1", "6"),
    ("SUN_EAST LA-4", "7"),
    ("SUN_CANYON CNTRY-2", "8"),
    ("SUN_ROSEGATE-1", "9"),
    ("SUN_CULVER CITY", "10"),
    ("SUN_VERDUGO", "11"),
    ("MON_CANYON CNTRY-1", "1"),
    ("MON_EAST LA-1", "2"),
    ("MON_EAST LA-2", "3"),
    ("MON_EAST LA-3", "4"),
    ("MON_MID CITY-1", "5"),
    ("MON_MID CITY-2", "6"),
    ("MON_MID CITY-3", "7"),
    ("MON_ROSECRANS-1", "8"),
    ("MON_SOUTH GATE-1", "9"),
    ("MON_SAN GABRIEL-2", "10"),
    ("MON_ROSECRANS-2", "11"),
    ("MON_MID CITY-4", "VOL-1"),
    ("MON_CANYON CNTRY-3", "VOL-2"),
    ("TUE_NO. HOLLYWOOD-2", "1"),
    ("TUE_NORTH VALLEY-1", "2"),
    ("TUE_NORTH VALLEY-2", "3"),
    ("TUE_SILVERLAKE-1", "4"),
    ("TUE_SOUTH GATE-2", "5"),
    ("TUE_SOUTH GATE-3", "6"),
    ("TUE_VERNON-1", "7"),
    ("TUE_WAC-1", "8"),
    ("TUE_WAC-4", "9"),
    ("TUE_VERNON-2", "10"),
    ("TUE_SOUTH LA-1", "11"),
    ("TUE_NOHO-1", "VOLUNTEER-1"),
    ("TUE_BRAD", "VOLUNTEER-2"),
    ("TUE_THE ELITE", "VOLUNTEER-3"),
    ("TUE_PICK UP LIST", "VOLUNTEER-4"),
    ("WED_SOUTH BAY-4", "1"),
    ("WED_LAUREL-2", "2"),
    ("WED_LONG BEACH-1", "3"),
    ("WED_SAN GABRIEL-1", "4"),
    ("WED_SEPULVEDA-2", "5"),
    ("WED_SILVERLAKE-3", "6"),
    ("WED_SOUTH BAY-1", "7"),
    ("WED_SOUTHEAST-2", "8"),
    ("WED_WAC-2", "9"),
    ("WED_WRHAP-1", "10"),
    ("WED_SOUTHEAST-4", "11"),
    ("WED_LAUREL-1", "VOLUNTEER-1"),
    ("WED_COA NEIGHBORHOOD", "VOLUNTEER-2"),
    ("THU_AGAPE-1", "1"),
    ("THU_DOWNTOWN-1", "2"),
    ("THU_HOLLYWOOD-1", "3"),
    ("THU_LA PUENTE-1", "4"),
    ("THU_LANCASTER-1", "5"),
    ("THU_LANCASTER-2", "6"),
    ("THU_SEPULVEDA-1", "7"),
    ("THU_SOUTH BAY-2", "8"),
    ("THU_SOUTHEAST-1", "9"),
    ("THU_WESTSIDE-2", "10"),
    ("THU_SOUTH BAY PLUS", "11"),
    ("THU_HOLLYWOOD-2", "VOLUNTEER-1"),
    ("THU_PALM PLUS", "VOLUNTEER-2"),
    ("FRI_HOLLYWOOD-3", "1"),
    ("FRI_HUNTINGTON PARK-1", "2"),
    ("FRI_NORTHEAST-1", "3"),
    ("FRI_SOUTH BAY-3", "4"),
    ("FRI_SOUTH GATE-4", "5"),
    ("FRI_WAC-3", "6"),
    ("FRI_WEST VALLEY-1", "7"),
    ("FRI_WEST VALLEY-2", "8"),
    ("FRI_WEST VALLEY-3", "9"),
    ("FRI_SOUTHEAST-3", "10"),
    ("FRI_HUNTINGTON PARK-2", "11"),
];
