//! `mlens pivot` command - year × facet pivot of the filtered records

use miette::Result;

use crate::cli::filters::FilterArgs;
use crate::cli::output::{emit_pivot, format_measure};
use crate::cli::{GlobalOpts, Session};
use crate::core::analytics::{pivot_field, stacked_share, yoy_growth};
use crate::core::format::format_with_commas;
use crate::entities::field::Field;

#[derive(clap::Args, Debug)]
pub struct PivotArgs {
    /// Facet to pivot on (e.g. productType, blade_material, country)
    #[arg(long, short = 'b')]
    pub by: Field,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Drop facets with no positive value in any year (stacked share view)
    #[arg(long)]
    pub share: bool,

    /// Show year-over-year growth (%) instead of sums
    #[arg(long, conflicts_with = "share")]
    pub yoy: bool,
}

/// Run the pivot command
pub fn run(args: PivotArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let mode = session.mode();
    let state = args.filter.to_state(&data, mode)?;
    let records = state.apply(&data);

    // the filter's own selection for the pivot field fixes the columns
    let filter = state.to_field_filter();
    let explicit = filter.accepted(args.by);

    if args.yoy {
        let growth = yoy_growth(&pivot_field(&records, args.by, explicit, mode));
        let title = format!("YoY growth (%) by {}", args.by);
        return emit_pivot(global.output, Some(&title), &growth, |v| format_with_commas(v, 2));
    }

    let pivot = if args.share {
        stacked_share(&records, args.by, explicit, mode)
    } else {
        pivot_field(&records, args.by, explicit, mode)
    };
    let title = format!("{} by {}", mode.label(), args.by);
    emit_pivot(global.output, Some(&title), &pivot, |v| format_measure(v, mode))
}
