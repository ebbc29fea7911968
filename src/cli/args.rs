//! Command-line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    breakdown::BreakdownArgs, bubble::BubbleArgs, completions::CompletionsArgs,
    dashboard::DashboardArgs, fingerprint::FingerprintArgs, growth::GrowthArgs,
    hierarchy::HierarchyArgs, kpi::KpiArgs, options::OptionsArgs, pivot::PivotArgs,
    records::RecordsArgs, waterfall::WaterfallArgs,
};
use crate::cli::filters::ModeFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mlens",
    version,
    about = "Generate, filter and aggregate a synthetic market-research dataset",
    long_about = "Generate, filter and aggregate a synthetic market-research dataset.\n\n\
        The dataset is deterministic for a given seed: every combination of year, \
        country and product facet appears exactly once, with a randomly drawn \
        segment, channel, brand and pricing."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Measure to aggregate (overrides the config file)
    #[arg(long, short = 'm', global = true, value_enum)]
    pub mode: Option<ModeFilter>,

    /// Config file (default: $MLENS_CONFIG, then the user config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// PRNG seed for dataset generation (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log debug events to stderr
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pick per command (tables for listings)
    #[default]
    Auto,
    /// Aligned table for terminals
    Table,
    Json,
    Yaml,
    Csv,
    /// Markdown table
    Md,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter and list records
    Records(RecordsArgs),

    /// Year × facet pivot of the filtered records
    Pivot(PivotArgs),

    /// Each country's part of its region, per year
    Breakdown(BreakdownArgs),

    /// Every chart of the segment analysis view for one filter state
    Dashboard(DashboardArgs),

    /// Year-over-year and compound growth by solution type
    Growth(GrowthArgs),

    /// Incremental opportunity from the 2024 baseline to 2032
    Waterfall(WaterfallArgs),

    /// Market attractiveness per region over 2025-2032
    Bubble(BubbleArgs),

    /// Headline market value or volume
    Kpi(KpiArgs),

    /// Selectable values per facet
    Options(OptionsArgs),

    /// Print a static taxonomy
    Hierarchy(HierarchyArgs),

    /// Digest the dataset across cache clears to check determinism
    Fingerprint(FingerprintArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
