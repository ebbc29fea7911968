//! `mlens breakdown` command - region → country breakdown

use miette::Result;

use crate::cli::filters::FilterArgs;
use crate::cli::output::{emit, format_measure, Tabular};
use crate::cli::{GlobalOpts, Session};
use crate::core::analytics::{region_country_breakdown, ValueMode};
use crate::core::format::format_with_commas;

#[derive(clap::Args, Debug)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Run the breakdown command
pub fn run(args: BreakdownArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let mode = session.mode();
    let state = args.filter.to_state(&data, mode)?;
    let records = state.apply(&data);

    let rows = region_country_breakdown(&records, mode);
    let value_header = match mode {
        ValueMode::ByValue => "Share of Region (%)",
        ValueMode::ByVolume => "Volume (Units)",
    };

    emit(global.output, Some("Region → country breakdown"), &rows, || {
        let mut table = Tabular::new(["Year - Region", "Country", value_header]);
        for row in &rows {
            let value = match mode {
                ValueMode::ByValue => format_with_commas(row.value, 2),
                ValueMode::ByVolume => format_measure(row.value, mode),
            };
            table.push([row.year_region.clone(), row.country.to_string(), value]);
        }
        table
    })
}
