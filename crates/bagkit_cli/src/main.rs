//! `bagkit` command-line front end.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bagkit_route::conf::C_FILE_OUT_DEFAULT;
use bagkit_route::{
    EnumDay, RouteAssignmentTable, SpecExportOptions, SpecExportProgress, canonicalize_route_name,
    export_birthday_bags,
};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter directive.
const C_ENV_LOG: &str = "BAGKIT_LOG";

#[derive(Parser)]
#[command(
    name = "bagkit",
    version,
    about = "Export birthday-bag delivery routes from a client report workbook."
)]
struct Args {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the van-ordered route sheet from a report workbook.
    Export {
        /// Source report workbook (.xlsx, .xlsm, .xls, .ods).
        input: PathBuf,

        /// Output workbook.
        #[arg(short, long, default_value = C_FILE_OUT_DEFAULT)]
        output: PathBuf,

        /// Input sheet (default: `Sheet1`, else the first sheet).
        #[arg(long)]
        sheet: Option<String>,

        /// Output sheet name.
        #[arg(long = "output-sheet")]
        output_sheet: Option<String>,

        /// Route table JSON; the built-in table is used when omitted.
        #[arg(long, value_name = "FILE", env = "BAGKIT_ROUTES")]
        routes: Option<PathBuf>,

        /// Print the run report as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Inspect or edit route assignments.
    Routes {
        #[command(subcommand)]
        action: RoutesAction,
    },
}

#[derive(Subcommand)]
enum RoutesAction {
    /// List assignments per day, ordered by van.
    List {
        /// Only this day (SUN..SAT).
        #[arg(long)]
        day: Option<EnumDay>,

        /// Route table JSON; the built-in table is used when omitted.
        #[arg(long, value_name = "FILE", env = "BAGKIT_ROUTES")]
        routes: Option<PathBuf>,
    },
    /// Write the built-in table to a JSON file.
    Init {
        /// Destination file.
        file: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Add or replace one assignment in a route table file.
    Set {
        /// Day code (SUN..SAT).
        day: EnumDay,
        /// Route name; canonicalized before storing.
        route: String,
        /// Van identifier (`7`, `VOLUNTEER-2`, ...).
        van: String,

        /// Route table JSON to update; created from the built-in table when missing.
        #[arg(long, value_name = "FILE", env = "BAGKIT_ROUTES")]
        routes: PathBuf,
    },
    /// Delete one assignment from a route table file.
    Remove {
        /// Day code (SUN..SAT).
        day: EnumDay,
        /// Route name; canonicalized before lookup.
        route: String,

        /// Route table JSON to update.
        #[arg(long, value_name = "FILE", env = "BAGKIT_ROUTES")]
        routes: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Export {
            input,
            output,
            sheet,
            output_sheet,
            routes,
            json,
        } => run_export(&input, &output, sheet, output_sheet, routes.as_deref(), json),
        Command::Routes { action } => match action {
            RoutesAction::List { day, routes } => run_routes_list(day, routes.as_deref()),
            RoutesAction::Init { file, force } => run_routes_init(&file, force),
            RoutesAction::Set {
                day,
                route,
                van,
                routes,
            } => run_routes_set(day, &route, &van, &routes),
            RoutesAction::Remove { day, route, routes } => run_routes_remove(day, &route, &routes),
        },
    }
}

fn init_logging(n_verbose: u8) {
    let c_default = match n_verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env = EnvFilter::try_from_env(C_ENV_LOG).unwrap_or_else(|_| EnvFilter::new(c_default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Route table from `path`, or the built-in one.
fn load_route_table(path: Option<&Path>) -> Result<RouteAssignmentTable> {
    let Some(path) = path else {
        return Ok(RouteAssignmentTable::with_defaults());
    };
    let mut l_warnings = Vec::new();
    let table = RouteAssignmentTable::read_json_file(path, &mut l_warnings)?;
    for msg in &l_warnings {
        warn!("{msg}");
    }
    info!(path = %path.display(), entries = table.len(), "route table loaded");
    Ok(table)
}

fn run_export(
    input: &Path,
    output: &Path,
    sheet: Option<String>,
    output_sheet: Option<String>,
    routes: Option<&Path>,
    if_json: bool,
) -> Result<()> {
    let table = load_route_table(routes)?;
    let mut options = SpecExportOptions {
        sheet_name_in: sheet,
        ..SpecExportOptions::default()
    };
    if let Some(c_sheet) = output_sheet {
        options.sheet_name_out = c_sheet;
    }

    let report = export_birthday_bags(input, output, &table, &options, |event: SpecExportProgress| {
        info!(percent = event.percent, "{}", event.message);
    })
    .with_context(|| format!("export of {} failed", input.display()))?;

    for msg in &report.warnings {
        warn!("{msg}");
    }
    if if_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn run_routes_list(day: Option<EnumDay>, routes: Option<&Path>) -> Result<()> {
    let table = load_route_table(routes)?;
    let l_days: Vec<EnumDay> = match day {
        Some(day) => vec![day],
        None => EnumDay::ALL.to_vec(),
    };
    for day in l_days {
        let l_pairs = table.entries_for_sorted_by_van(day);
        if l_pairs.is_empty() {
            continue;
        }
        println!("{day}");
        for (c_route, c_van) in l_pairs {
            println!("  {c_van:>12}  {c_route}");
        }
    }
    Ok(())
}

fn run_routes_init(file: &Path, if_force: bool) -> Result<()> {
    if file.exists() && !if_force {
        bail!("{} already exists; pass --force to overwrite", file.display());
    }
    let table = RouteAssignmentTable::with_defaults();
    table.write_json_file(file)?;
    info!(path = %file.display(), entries = table.len(), "route table written");
    Ok(())
}

fn run_routes_set(day: EnumDay, route: &str, van: &str, file: &Path) -> Result<()> {
    let c_route = canonicalize_route_name(route);
    if c_route.is_empty() {
        bail!("route name {route:?} is empty after normalization");
    }
    if van.trim().is_empty() {
        bail!("van must not be empty");
    }

    let mut table = if file.exists() {
        load_route_table(Some(file))?
    } else {
        RouteAssignmentTable::with_defaults()
    };
    let c_van_prev = table.get(day, &c_route).map(str::to_string);
    table.insert(day, &c_route, van);
    table.write_json_file(file)?;

    match c_van_prev {
        Some(c_prev) => info!(%day, route = %c_route, from = %c_prev, to = %van.trim(), "route reassigned"),
        None => info!(%day, route = %c_route, van = %van.trim(), "route added"),
    }
    Ok(())
}

fn run_routes_remove(day: EnumDay, route: &str, file: &Path) -> Result<()> {
    let mut table = load_route_table(Some(file))?;
    let Some(c_van) = table.remove(day, route) else {
        bail!("no assignment for {day} | {route} in {}", file.display());
    };
    table.write_json_file(file)?;
    info!(%day, route = %canonicalize_route_name(route), van = %c_van, "route removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_export_defaults() {
        let args = Args::try_parse_from(["bagkit", "export", "report.xlsx"]).expect("parse");
        let Command::Export { output, sheet, json, .. } = args.command else {
            panic!("expected export");
        };
        assert_eq!(output, PathBuf::from(C_FILE_OUT_DEFAULT));
        assert_eq!(sheet, None);
        assert!(!json);
    }

    #[test]
    fn test_routes_set_parses_day_case_insensitively() {
        let args = Args::try_parse_from([
            "bagkit", "routes", "set", "wed", "Laurel-3", "VOLUNTEER-3", "--routes", "r.json",
        ])
        .expect("parse");
        let Command::Routes {
            action: RoutesAction::Set { day, route, van, .. },
        } = args.command
        else {
            panic!("expected routes set");
        };
        assert_eq!(day, EnumDay::Wed);
        assert_eq!(route, "Laurel-3");
        assert_eq!(van, "VOLUNTEER-3");
        assert!(Args::try_parse_from(["bagkit", "routes", "list", "--day", "XYZ"]).is_err());
    }

    #[test]
    fn test_routes_init_then_set_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("routes.json");
        run_routes_init(&path, false).expect("init");
        assert!(run_routes_init(&path, false).is_err());

        run_routes_set(EnumDay::Wed, "laurel-3 (new)", "VOLUNTEER-3", &path).expect("set");
        let table = load_route_table(Some(&path)).expect("reload");
        assert_eq!(table.get(EnumDay::Wed, "LAUREL-3"), Some("VOLUNTEER-3"));
        assert!(run_routes_set(EnumDay::Wed, "(x)", "1", &path).is_err());
    }

    #[test]
    fn test_routes_remove_drops_entry_and_rejects_unknown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("routes.json");
        run_routes_init(&path, false).expect("init");

        let args = Args::try_parse_from([
            "bagkit", "routes", "remove", "sun", "culver city", "--routes", "r.json",
        ])
        .expect("parse");
        assert!(matches!(
            args.command,
            Command::Routes {
                action: RoutesAction::Remove { day: EnumDay::Sun, .. }
            }
        ));

        run_routes_remove(EnumDay::Sun, "Culver City (note)", &path).expect("remove");
        let table = load_route_table(Some(&path)).expect("reload");
        assert_eq!(table.get(EnumDay::Sun, "CULVER CITY"), None);
        assert_eq!(table.len(), RouteAssignmentTable::with_defaults().len() - 1);

        assert!(run_routes_remove(EnumDay::Sun, "CULVER CITY", &path).is_err());
        assert!(run_routes_remove(EnumDay::Sun, "X", &dir.path().join("missing.json")).is_err());
    }
}
