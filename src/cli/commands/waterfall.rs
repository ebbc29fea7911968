//! `mlens waterfall` command - incremental opportunity series

use miette::Result;

use crate::cli::output::{emit, format_measure, Tabular};
use crate::cli::{GlobalOpts, Session};
use crate::core::analytics::{waterfall, ValueMode, WaterfallPoint};
use crate::core::filter::IncrementalFilters;

#[derive(clap::Args, Debug)]
pub struct WaterfallArgs {
    /// Regions to include
    #[arg(long, value_delimiter = ',')]
    pub region: Vec<String>,

    /// Countries to include
    #[arg(long, value_delimiter = ',')]
    pub country: Vec<String>,
}

/// Run the waterfall command
pub fn run(args: WaterfallArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let filters = IncrementalFilters {
        region: args.region,
        country: args.country,
    };
    let records = filters.apply(&data);
    let series = waterfall(&records);

    let title = format!(
        "Incremental opportunity: {} US$ Mn",
        format_measure(series.incremental_opportunity, ValueMode::ByValue)
    );
    emit(global.output, Some(&title), &series, || {
        let mut table = Tabular::new(["Year", "Kind", "Value", "Running Total"]);
        for point in &series.points {
            let (kind, value) = match *point {
                WaterfallPoint::Base { value, .. } => ("base", value),
                WaterfallPoint::Increment { value, .. } => ("increment", value),
                WaterfallPoint::Total { total, .. } => ("total", total),
            };
            table.push([
                point.year().to_string(),
                kind.to_string(),
                format_measure(value, ValueMode::ByValue),
                format_measure(point.running_total(), ValueMode::ByValue),
            ]);
        }
        table
    })
}
