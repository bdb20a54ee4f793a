mod cli;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sizetree::core::{
    CancelFlag, FilterSettings, RenderOptions, ScanStatus, Session, spawn_scan, validate_inputs,
    write_tree,
};
use sizetree::fs::RealFileSystem;

use cli::Cli;

const LOG_ENV: &str = "SIZETREE_LOG";

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (root, threshold_mib) = match validate_inputs(&cli.path, &cli.threshold) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("sizetree: {err}");
            return ExitCode::from(1);
        }
    };

    let mut task = spawn_scan(Arc::new(RealFileSystem), root, CancelFlag::new());
    while let Some(path) = task.progress.recv().await {
        debug!(path = %path.display(), "inspecting");
    }
    let report = match task.finish().await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("sizetree: scan failed: {err}");
            return ExitCode::from(1);
        }
    };

    let mut session = Session::new(FilterSettings {
        threshold_mib,
        hide_below: cli.hide_small,
        highlight_above: !cli.no_highlight,
    });
    session.install(report);

    for error in session.errors() {
        eprintln!("sizetree: warning: {error}");
    }

    let Some(tree) = session.tree() else {
        return ExitCode::from(1);
    };
    let options = RenderOptions {
        max_depth: cli.level,
    };
    let mut stdout = io::stdout().lock();
    let written = write_tree(&mut stdout, tree, &options).and_then(|()| {
        match session.status() {
            Some(ScanStatus::SucceededWithErrors) => {
                writeln!(stdout, "\nScan completed with errors")
            }
            _ => writeln!(stdout, "\nScan completed"),
        }
    });
    if let Err(err) = written {
        eprintln!("sizetree: {err}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
