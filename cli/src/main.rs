//! Taskdesk record inspector
//!
//! Prints one page of a task, idea or doc list dump, filtered and sorted the
//! same way the list screens do it.
//!
//! Usage:
//!   taskdesk --file tasks.json --kind tasks --filter status=todo --sort updated_at --desc

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use taskdesk_cli::{parse_filter_arg, render_file, Query, RecordKind};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "taskdesk")]
#[command(about = "Filter, sort and page a Taskdesk record dump")]
struct Args {
    /// JSON file holding the rows returned by a list command
    #[arg(short, long)]
    file: PathBuf,

    /// Kind of rows in the file
    #[arg(short, long, value_enum, default_value = "tasks")]
    kind: RecordKind,

    /// Case-insensitive text matched against every filterable column
    #[arg(short, long)]
    search: Option<String>,

    /// Column filter as column=value (repeatable)
    #[arg(long = "filter", value_parser = parse_filter_arg)]
    filters: Vec<(String, String)>,

    /// Column to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show, starting at 1
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Rows per page
    #[arg(long, default_value = "10")]
    page_size: usize,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!(file = %args.file.display(), kind = ?args.kind, "rendering dump");
    let query = Query {
        search: args.search,
        filters: args.filters,
        sort: args.sort,
        descending: args.desc,
        page: args.page,
        page_size: args.page_size,
    };

    print!("{}", render_file(&args.file, args.kind, &query)?);
    Ok(())
}
