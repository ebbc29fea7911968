//! `mlens bubble` command - market attractiveness by region

use miette::Result;

use crate::cli::filters::SegmentFilter;
use crate::cli::output::{emit, format_measure, Tabular};
use crate::cli::{GlobalOpts, Session};
use crate::core::analytics::{attractiveness, ValueMode};
use crate::core::filter::AttractivenessFilters;
use crate::core::format::format_with_commas;

#[derive(clap::Args, Debug)]
pub struct BubbleArgs {
    /// Regions to include
    #[arg(long, value_delimiter = ',')]
    pub region: Vec<String>,

    /// Segments to include
    #[arg(long, value_enum, value_delimiter = ',')]
    pub segment: Vec<SegmentFilter>,
}

/// Run the bubble command
pub fn run(args: BubbleArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let filters = AttractivenessFilters {
        region: args.region,
        segment: args.segment.iter().map(|s| s.to_segment()).collect(),
    };
    let records = filters.apply(&data);
    let bubbles = attractiveness(&records);

    emit(global.output, Some("Market attractiveness, 2025-2032"), &bubbles, || {
        let mut table = Tabular::new([
            "Region",
            "CAGR Index",
            "Market Share Index",
            "Incremental Opportunity (US$ Mn)",
        ]);
        for bubble in &bubbles {
            table.push([
                bubble.region.to_string(),
                format_with_commas(bubble.cagr_index, 2),
                format_with_commas(bubble.market_share_index, 2),
                format_measure(bubble.incremental_opportunity, ValueMode::ByValue),
            ]);
        }
        table
    })
}
