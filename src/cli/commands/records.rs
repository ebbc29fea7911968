//! `mlens records` command - filter and list records

use console::style;
use miette::Result;

use crate::cli::filters::FilterArgs;
use crate::cli::helpers::truncate_str;
use crate::cli::output::{effective_format, format_measure, print_json, print_yaml, Tabular};
use crate::cli::{GlobalOpts, OutputFormat, Session};
use crate::core::analytics::ValueMode;
use crate::entities::record::MarketRecord;

#[derive(clap::Args, Debug)]
pub struct RecordsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Limit number of results (default: from config, 20)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// List every matching record
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

/// Run the records command
pub fn run(args: RecordsArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let state = args.filter.to_state(&data, session.mode())?;
    let matched = state.apply(&data);

    // Count only
    if args.count {
        println!("{}", matched.len());
        return Ok(());
    }

    let limit = if args.all {
        matched.len()
    } else {
        args.limit.unwrap_or(session.config.default_limit)
    };
    let shown: Vec<&MarketRecord> = matched.iter().copied().take(limit).collect();

    match effective_format(global.output, true) {
        OutputFormat::Json => print_json(&shown)?,
        OutputFormat::Yaml => print_yaml(&shown)?,
        OutputFormat::Csv => record_table(&shown, None).write_csv(std::io::stdout())?,
        OutputFormat::Md => print!("{}", record_table(&shown, None).to_markdown()),
        OutputFormat::Table | OutputFormat::Auto => {
            if shown.is_empty() {
                println!("No records match the current selection.");
                return Ok(());
            }
            println!("{}", record_table(&shown, Some(28)).to_table_string());
            println!(
                "Showing {} of {} matching records ({} total).",
                style(shown.len()).cyan(),
                style(matched.len()).cyan(),
                data.len()
            );
        }
    }
    Ok(())
}

/// One row per record; `width` truncates the long text columns
fn record_table(records: &[&MarketRecord], width: Option<usize>) -> Tabular {
    let cell = |s: &str| match width {
        Some(w) => truncate_str(s, w),
        None => s.to_string(),
    };

    let mut table = Tabular::new([
        "ID",
        "Year",
        "Region",
        "Country",
        "Segment",
        "Product Type",
        "Channel",
        "Brand",
        "Company",
        "Value (US$ M)",
        "Volume",
    ]);
    for r in records {
        table.push([
            r.record_id.to_string(),
            r.year.to_string(),
            r.region.to_string(),
            r.country.to_string(),
            cell(r.segment_kind().label()),
            r.product_type.to_string(),
            cell(r.distribution_channel),
            r.brand.to_string(),
            cell(r.company),
            format_measure(r.value_millions(), ValueMode::ByValue),
            r.volume_units.to_string(),
        ]);
    }
    table
}
