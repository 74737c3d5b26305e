//! Archived task export CLI
//!
//! Command-line interface for exporting the archived tasks of a queue to a
//! single CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --queue default tasks.csv
//! cargo run -- --queue default --order desc --output-dir exports tasks.csv
//! cargo run -- --queue default --page-size 200 --max-records 5000 --max-concurrent 4 tasks.csv
//! ```
//!
//! The program pages through the queue's archived tasks, writes
//! `archived_tasks_<queue>.csv` into the output directory, and prints the
//! path of the written file to stdout. A notice is printed to stderr when the
//! queue holds more tasks than the export cap.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing input, failed page fetch, cancelled, unwritable output, etc.)

use std::process;
use task_export::cli::{self, CliArgs, SortOrder};
use task_export::core::{run_export, DescendingSource, ExportCoordinator, ExportReport};
use task_export::io::{CsvFileSource, DirectorySink};
use task_export::types::ExportError;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    init_tracing(args.log_level());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {}", e);
            process::exit(1);
        }
    };

    match runtime.block_on(run(&args)) {
        Ok(report) => {
            if let Some(warning) = report.warning {
                eprintln!("Warning: {}", warning);
            }
            let path = DirectorySink::new(&args.output_dir).path_for(&report.filename);
            println!("{}", path.display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run(args: &CliArgs) -> Result<ExportReport, ExportError> {
    let source = CsvFileSource::open(&args.input_file).await?;
    let sink = DirectorySink::new(&args.output_dir);
    let config = args.to_export_config();

    // Ctrl-C abandons in-flight fetches; nothing is written
    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    match args.order {
        SortOrder::Asc => {
            let coordinator = ExportCoordinator::new(source, config).with_cancellation(token);
            run_export(&coordinator, &sink, &args.queue).await
        }
        SortOrder::Desc => {
            let coordinator = ExportCoordinator::new(DescendingSource::new(source), config)
                .with_cancellation(token);
            run_export(&coordinator, &sink, &args.queue).await
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
