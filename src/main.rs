use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use plate_merge::app;
use plate_merge::excel::{self, LoadRequest};
use plate_merge::export::{self, ExportTable};
use plate_merge::plate::Well;
use plate_merge::session::{Mutation, Session};
use plate_merge::ui;
use plate_merge::utils::parse_column;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Excel files to place on the plate, in placement order
    file_paths: Vec<PathBuf>,

    /// Requested start well for each file, in the same order (e.g. -s A1 -s C4)
    #[arg(long = "start", short = 's', value_name = "WELL")]
    start_wells: Vec<Well>,

    /// Sheet to merge, by 0-based position
    #[arg(long, default_value = "0")]
    sheet: usize,

    /// Column shown in the plate preview: a letter (A, B, ...) or a 1-based number
    #[arg(long, short = 'c', default_value = "A", value_parser = parse_column_arg)]
    column: usize,

    /// Print the merged plate as JSON to stdout (for piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Write the merged plate layout to this .xlsx file and exit
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Write logs to this file (the interactive UI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_column_arg(value: &str) -> Result<usize, String> {
    parse_column(value).ok_or_else(|| format!("invalid column '{}'", value))
}

fn init_tracing(log_file: Option<&PathBuf>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // Logging to the terminal would corrupt the UI
        None => {}
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let headless = cli.json || cli.output.is_some();

    if !std::io::stdout().is_terminal() && !headless {
        eprintln!("plate-merge error: Pipe detected but -j/--json or -o/--output not provided.");
        std::process::exit(1);
    }

    init_tracing(cli.log_file.as_ref(), headless)?;

    if cli.start_wells.len() > cli.file_paths.len() {
        anyhow::bail!(
            "{} start well(s) given for {} file(s)",
            cli.start_wells.len(),
            cli.file_paths.len()
        );
    }

    // Start wells pair with files by position, the rest default to A1
    let requests: Vec<LoadRequest> = cli
        .file_paths
        .iter()
        .enumerate()
        .map(|(index, path)| LoadRequest {
            path: path.clone(),
            start_well: cli.start_wells.get(index).copied().unwrap_or_default(),
        })
        .collect();

    let batch = excel::load_batch(&requests);
    for failure in &batch.failures {
        eprintln!(
            "plate-merge: skipping {}: {:#}",
            failure.path.display(),
            failure.error
        );
    }

    if headless && batch.files.is_empty() {
        anyhow::bail!("No input files could be loaded");
    }

    let mut session = Session::with_selection(cli.sheet, cli.column);
    let report = session.apply(Mutation::AddFiles(batch.files));

    if headless {
        for correction in &report.corrections {
            eprintln!(
                "plate-merge: {} moved from {} to {} to avoid an overlap",
                correction.file_name, correction.from, correction.to
            );
        }
        for name in &report.unplaceable {
            eprintln!("plate-merge: {} does not fit on the plate and was left out", name);
        }
        if let Some(overflow) = &session.result().overflow {
            eprintln!("plate-merge: {}", overflow);
        }

        if let Some(path) = &cli.output {
            let table = ExportTable::from_merge(session.result());
            export::write_xlsx(&table, path)?;
            eprintln!("plate-merge: wrote {}", path.display());
        }

        if cli.json {
            let plate = export::build_plate_export(&session);
            println!("{}", export::serialize_to_json(&plate)?);
        }

        return Ok(());
    }

    // Exports from the UI land next to the first input file
    let output_dir = cli
        .file_paths
        .first()
        .and_then(|path| path.parent())
        .map(PathBuf::from)
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."));

    let app_state = app::AppState::new(session, output_dir);
    ui::run_app(app_state)?;

    Ok(())
}
