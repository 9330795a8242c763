use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "screening-advisor")]
#[command(about = "Preventive screening eligibility and prioritization for health-plan members")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one member and show priority, additional and completed screenings
    Evaluate {
        /// Member name (case-insensitive)
        member: String,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Number of priority screenings to select
        #[arg(long)]
        top: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Fail on malformed history entries instead of skipping them
        #[arg(long)]
        strict_history: bool,
    },

    /// Render the member's screening report
    Report {
        /// Member name (case-insensitive)
        member: String,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Number of priority screenings to select
        #[arg(long)]
        top: Option<usize>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List members and whether their records are valid
    Members,

    /// List the screening catalog
    Catalog {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate configuration, catalog and member records
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}
