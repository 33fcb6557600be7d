// gridloc_sim/src/main.rs

use std::process::ExitCode;

use clap::Parser;
use gridloc_sim::cli::Cli;
use gridloc_sim::simulation::{self, config::PrefabCatalog};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-filter.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if cli.list {
        let catalog = PrefabCatalog::load(&cli.catalog);
        for key in catalog.keys() {
            println!("{key}");
        }
        return ExitCode::SUCCESS;
    }

    let report = match simulation::run(&cli.run_options()) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    println!("{report}");

    if let Some(path) = &cli.output {
        if let Err(e) = report.write(path) {
            error!("Failed to write report: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
