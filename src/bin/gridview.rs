//! gridview - Interactive customer table with a debug viewer.
//!
//! Usage:
//!   gridview                                 # browse the built-in sample data
//!   gridview --seed customers.json           # browse records from a file
//!   gridview --issues concerns.json          # load a concern report for the Debug tab
//!   gridview --filter status=active --sort created:desc --export out.csv

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use gridview::alert::{Alert, AlertStack};
use gridview::clipboard;
use gridview::config::{DEFAULT_PAGE_SIZE, DEFAULT_SERVER, Settings, parse_page_size};
use gridview::debug::{ConcernReport, DebugViewer, HttpIssueClient};
use gridview::models::{Customer, CustomerField, load_seed, sample_customers};
use gridview::table::{DEFAULT_EXPORT_FILE, SortDirection, TableController};
use gridview::tui::{App, AppState};

/// Event loop tick; shorter than the alert fade so fades finish on time.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Interactive customer table.
#[derive(Parser)]
#[command(name = "gridview", about = "Interactive customer table", version)]
struct Args {
    /// JSON file with customer records. Default: built-in sample data.
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// JSON file with element concerns shown in the Debug tab.
    #[arg(long, value_name = "FILE")]
    issues: Option<PathBuf>,

    /// Base URL of the rendering server (clear-issues requests).
    #[arg(long, env = "GRIDVIEW_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    page_size: usize,

    /// Initial search term.
    #[arg(long, value_name = "TERM")]
    search: Option<String>,

    /// Column filter, e.g. `status=active,pending`. Repeatable.
    #[arg(long, value_name = "COLUMN=VALUES", value_parser = parse_filter)]
    filter: Vec<(CustomerField, Vec<String>)>,

    /// Sort column, optionally with direction: `name`, `created:desc`.
    #[arg(long, value_name = "COLUMN[:asc|desc]", value_parser = parse_sort)]
    sort: Option<(CustomerField, SortDirection)>,

    /// Column to hide. Repeatable.
    #[arg(long, value_name = "COLUMN", value_parser = parse_column)]
    hide: Vec<CustomerField>,

    /// Write the filtered rows as CSV to FILE and exit without starting the UI.
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Destination of the in-app CSV export (`x`).
    #[arg(long, value_name = "FILE", default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,

    /// Alert banner, `KIND:MESSAGE` or `KIND:TITLE:MESSAGE`. Repeatable.
    #[arg(long, value_name = "ALERT")]
    alert: Vec<Alert>,

    /// Write logs to FILE. Without it the UI discards logs.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_column(s: &str) -> Result<CustomerField, String> {
    s.parse()
}

/// Parses `column[:asc|desc]`.
fn parse_sort(s: &str) -> Result<(CustomerField, SortDirection), String> {
    let (column, direction) = match s.split_once(':') {
        Some((c, d)) => (c, d),
        None => (s, "asc"),
    };
    let direction = match direction.trim().to_ascii_lowercase().as_str() {
        "asc" => SortDirection::Ascending,
        "desc" => SortDirection::Descending,
        other => return Err(format!("invalid sort direction '{}'", other)),
    };
    Ok((column.parse()?, direction))
}

/// Parses `column=value[,value...]`.
fn parse_filter(s: &str) -> Result<(CustomerField, Vec<String>), String> {
    let (column, values) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{}': expected COLUMN=VALUES", s))?;
    let values: Vec<String> = values
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    Ok((column.parse()?, values))
}

/// Initializes the tracing subscriber.
///
/// The UI owns the terminal, so logs go to `log_file` when given. Export mode
/// logs to stderr. Otherwise no subscriber is installed.
fn init_logging(verbose: u8, log_file: Option<&Path>, to_stderr: bool) -> std::io::Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gridview={}", level)));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if to_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Applies the view arguments to a fresh controller.
fn build_table(customers: Vec<Customer>, args: &Args) -> TableController<Customer> {
    let mut table = TableController::new(customers, CustomerField::Id, args.page_size);

    if let Some((field, direction)) = args.sort {
        if table.view_state().sort_field != field {
            table.set_sort(field);
        }
        if direction == SortDirection::Descending {
            table.set_sort(field);
        }
    }
    for (field, values) in &args.filter {
        table.set_filter(*field, values.iter().cloned());
    }
    for field in &args.hide {
        table.toggle_column(*field);
    }
    if let Some(term) = &args.search {
        table.set_search_term(term.clone());
    }
    table
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.log_file.as_deref(), args.export.is_some()) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    info!("gridview {} starting", env!("CARGO_PKG_VERSION"));

    let customers = match &args.seed {
        Some(path) => match load_seed(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading seed from '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => sample_customers(),
    };
    info!(records = customers.len(), "customers loaded");

    let table = build_table(customers, &args);

    // Non-interactive export
    if let Some(path) = &args.export {
        match table.write_csv(path) {
            Ok(rows) => {
                println!("Exported {} rows to {}", rows, path.display());
                return;
            }
            Err(e) => {
                error!(error = %e, "export failed");
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    let report = match &args.issues {
        Some(path) => match ConcernReport::load(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading issues from '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ConcernReport::default(),
    };

    let settings = Settings {
        server_url: args.server.clone(),
        ..Settings::default()
    };

    let issues = match HttpIssueClient::new(&settings.server_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: cannot create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        table,
        DebugViewer::new(report),
        AlertStack::new(args.alert.clone()),
        settings,
        args.output.clone(),
    );

    let app = App::new(state, clipboard::detect(), Box::new(issues));
    if let Err(e) = app.run(TICK_RATE) {
        error!(error = %e, "terminal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_sort("created:desc"),
            Ok((CustomerField::Created, SortDirection::Descending))
        );
        assert_eq!(
            parse_sort("Name"),
            Ok((CustomerField::Name, SortDirection::Ascending))
        );
        assert!(parse_sort("name:sideways").is_err());
        assert!(parse_sort("age").is_err());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status=active, pending"),
            Ok((
                CustomerField::Status,
                vec!["active".to_string(), "pending".to_string()]
            ))
        );
        assert!(parse_filter("status").is_err());
    }

    #[test]
    fn test_build_table_applies_args() {
        let args = Args::parse_from([
            "gridview",
            "--filter",
            "country=Germany",
            "--sort",
            "id:desc",
            "--hide",
            "email",
        ]);
        let table = build_table(sample_customers(), &args);
        let ids: Vec<u64> = table.view().rows.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![19, 9, 4]);
        assert!(!table.visible_fields().contains(&CustomerField::Email));
    }

    #[test]
    fn test_page_size_zero_rejected() {
        assert!(Args::try_parse_from(["gridview", "--page-size", "0"]).is_err());
    }
}
