//! CLI command definitions

use clap::{Parser, ValueEnum};
use scout_application::BrowserProfile;
use scout_domain::Depth;
use std::path::PathBuf;

/// Output format for the finished exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the brief
    Brief,
    /// Brief plus every task with its outcome and live-view link
    Full,
    /// The whole exploration as JSON
    Json,
}

impl From<OutputFormat> for scout_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Brief => scout_domain::OutputFormat::Brief,
            OutputFormat::Full => scout_domain::OutputFormat::Full,
            OutputFormat::Json => scout_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for parallel-scout
#[derive(Parser, Debug)]
#[command(name = "parallel-scout")]
#[command(author, version, about = "Explore the web in parallel and condense it into a brief")]
#[command(long_about = r#"
Parallel Scout turns a handful of topics into a short intelligence brief.

The process has three stages:
1. Planning: a language model picks websites and browsing instructions
2. Browsing: remote browsers run the tasks concurrently, streaming progress
3. Synthesis: the findings are condensed into top findings and insights

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./scout.toml        Project-level config
3. ~/.config/parallel-scout/config.toml   Global config

Example:
  parallel-scout "rust async runtimes" "embedded databases"
  parallel-scout "ai agents, browser automation" --depth deep --time-budget 10
  parallel-scout "climate tech" --chat
"#)]
pub struct Cli {
    /// Topics to explore (separate with spaces or commas)
    pub topics: Vec<String>,

    /// How deep to dig: shallow, medium or deep
    #[arg(short, long, value_name = "DEPTH")]
    pub depth: Option<Depth>,

    /// Overall time budget in minutes
    #[arg(short, long, value_name = "MINUTES")]
    pub time_budget: Option<u32>,

    /// Maximum number of browsing tasks streaming at once
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// Fail a task after this many seconds without any event
    #[arg(long, value_name = "SECONDS")]
    pub inactivity_timeout: Option<u64>,

    /// Browser profile: lite or stealth
    #[arg(long, value_name = "PROFILE")]
    pub browser_profile: Option<BrowserProfile>,

    /// Route browsers through a proxy in this country (ISO code)
    #[arg(long, value_name = "COUNTRY")]
    pub proxy_country: Option<String>,

    /// Ask follow-up questions about the brief when the exploration is done
    #[arg(short, long)]
    pub chat: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write every plan, task event and result as JSON lines
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Also write the rendered result to this file (JSON for *.json)
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Topics from all positional arguments, split on commas.
    pub fn topic_list(&self) -> Vec<String> {
        self.topics
            .iter()
            .flat_map(|arg| arg.split(','))
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .map(str::to_string)
            .collect()
    }
}
