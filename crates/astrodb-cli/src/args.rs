//! Command-line argument definitions for the astrodb CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the record files, the query and report
//! mode, configuration file and logging verbosity.

use clap::{Parser, ValueEnum};

use astrodb::ReportMode;

/// Query a personal catalog of astronomical objects and observations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Query selecting the objects to report, e.g. `type in gal mag <= 10`
    #[arg(help = "Query text; every object matches when omitted")]
    pub query: Option<String>,

    /// Path to the objects file
    #[arg(long)]
    pub objects: Option<String>,

    /// Path to the observations file
    #[arg(long)]
    pub observations: Option<String>,

    /// Path to the programs file
    #[arg(long)]
    pub programs: Option<String>,

    /// Report to produce
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Path to write the report to instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report objects that share a position as likely duplicates
    #[arg(long)]
    pub check_likely_duplicates: bool,

    /// List every query keyword with an example and exit
    #[arg(long)]
    pub keywords: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Report modes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    ObservingList,
    ProgramList,
    ObjectList,
    MetaList,
}

impl From<Mode> for ReportMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::ObservingList => ReportMode::ObservingList,
            Mode::ProgramList => ReportMode::ProgramList,
            Mode::ObjectList => ReportMode::ObjectList,
            Mode::MetaList => ReportMode::MetaList,
        }
    }
}
