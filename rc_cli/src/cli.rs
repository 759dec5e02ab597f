use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Banner report for the terminal
    Text,
    /// Pretty-printed JSON of every analysis
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "rc_cli")]
#[command(about = "Reinforced concrete section capacity (IS 456:2000)", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project file to analyse; the built-in demo project when omitted
    #[arg(value_name = "PROJECT")]
    pub project: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the demo project to PATH instead of analysing
    #[arg(long, value_name = "PATH", conflicts_with = "project")]
    pub write_demo: Option<PathBuf>,
}
