//! # RC Section CLI
//!
//! Analyses every section of a project file and prints a report.
//!
//! ```text
//! rc_cli [--format text|json] [PROJECT.rcs]
//! rc_cli --write-demo PROJECT.rcs
//! ```
//!
//! Without a project file a built-in demo project is analysed. Set
//! `RUST_LOG=debug` to follow the equilibrium search.

mod cli;
mod demo;
mod report;

use std::process::ExitCode;

use clap::Parser;
use log::error;
use rc_core::{load_project, save_project, CalcResult, Project};

use cli::{Cli, OutputFormat};

fn run(cli: Cli) -> CalcResult<bool> {
    if let Some(path) = cli.write_demo {
        save_project(&demo::demo_project()?, &path)?;
        println!("Demo project written to {}", path.display());
        return Ok(true);
    }

    let project: Project = match &cli.project {
        Some(path) => load_project(path)?,
        None => demo::demo_project()?,
    };

    let results = project.analyse_all();
    let all_ok = results.iter().all(|(_, r)| r.is_ok());

    match cli.format {
        OutputFormat::Json => println!("{}", report::json_report(&project, &results)?),
        OutputFormat::Text => print!("{}", report::text_report(&project, &results)),
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("error [{}]: {}", e.error_code(), e);
            ExitCode::from(1)
        }
    }
}
