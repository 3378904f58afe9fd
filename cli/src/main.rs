use clap::Parser;
use colored::Colorize;
use std::io;
use std::path::Path;
use tubegraph::args::Cli;
use tubegraph::exit::TubegraphExit;
use tubegraph::pipeline::{emit, CliError, Pipeline};
use tubegraph_core::config::AppConfig;
use tubegraph_core::error::TubegraphError;

fn main() -> TubegraphExit {
    let cli = Cli::parse();

    let Some(filename) = cli.filename.filter(|p| !p.as_os_str().is_empty()) else {
        eprintln!("No filename provided!");
        return TubegraphExit::Usage;
    };

    match run(&filename) {
        Ok(()) => TubegraphExit::Success,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            TubegraphExit::from(e.error_code())
        }
    }
}

fn run(filename: &Path) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    tubegraph_core::init_tracing(&config.log.level);

    let xml = Pipeline::from_config(&config).render_file(filename)?;
    emit(&xml, &mut io::stdout().lock())?;
    Ok(())
}
