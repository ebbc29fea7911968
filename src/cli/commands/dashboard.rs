//! `mlens dashboard` command - every chart of the segment analysis view

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::filters::FilterArgs;
use crate::cli::helpers::describe_selection;
use crate::cli::output::{
    effective_format, format_measure, pivot_table, print_json, print_yaml, Tabular,
};
use crate::cli::{GlobalOpts, OutputFormat, Session};
use crate::core::analytics::{Kpi, Pivot, SegmentDashboard, ValueMode};
use crate::core::filter::FilterState;
use crate::core::format::format_with_commas;

#[derive(clap::Args, Debug)]
pub struct DashboardArgs {
    /// Facet selections; without any, the view's defaults apply
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardReport<'a> {
    filters: &'a FilterState,
    kpi: Kpi,
    charts: SegmentDashboard,
}

/// Run the dashboard command
pub fn run(args: DashboardArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let mode = session.mode();

    let state = if args.filter.is_empty() {
        let mut state = FilterState::dashboard_defaults(&data);
        state.value_mode = mode;
        state
    } else {
        args.filter.to_state(&data, mode)?
    };
    let records = state.apply(&data);

    let report = DashboardReport {
        filters: &state,
        kpi: Kpi::compute(&records, mode),
        charts: SegmentDashboard::build(&records, &state),
    };
    let sections = sections(&report.charts);

    match effective_format(global.output, true) {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Yaml => print_yaml(&report)?,
        OutputFormat::Csv => long_table(&sections).write_csv(std::io::stdout())?,
        OutputFormat::Md => {
            println!("**{}**: {}\n", mode.label(), report.kpi.label);
            for (title, pivot) in &sections {
                println!("### {}\n", title);
                print!("{}", pivot_table(pivot, |v| format_measure(v, mode)).to_markdown());
                println!();
            }
            println!("### Region → country breakdown\n");
            print!("{}", breakdown_table(&report.charts, mode).to_markdown());
        }
        OutputFormat::Table | OutputFormat::Auto => {
            println!(
                "{} years: {}  regions: {}  segments: {}",
                style("Selection").bold(),
                describe_selection(&state.years),
                describe_selection(&state.regions),
                describe_selection(state.segments()),
            );
            println!(
                "{}: {} ({} records)",
                style(mode.label()).bold(),
                style(&report.kpi.label).cyan(),
                report.kpi.records
            );
            if records.is_empty() {
                return Ok(());
            }
            for (title, pivot) in &sections {
                if pivot.is_empty() {
                    continue;
                }
                println!();
                println!("{}", style(title).bold());
                println!("{}", pivot_table(pivot, |v| format_measure(v, mode)).to_table_string());
            }
            println!();
            println!("{}", style("Region → country breakdown").bold());
            println!("{}", breakdown_table(&report.charts, mode).to_table_string());
        }
    }
    Ok(())
}

fn sections(charts: &SegmentDashboard) -> Vec<(&'static str, &Pivot)> {
    let mut sections = vec![
        ("Product type", &charts.product_type),
        ("Blade material", &charts.blade_material),
        ("Handle length", &charts.handle_length),
        ("Application", &charts.application),
        ("End user", &charts.end_user),
        ("Country", &charts.country),
        ("Blade material share", &charts.blade_material_share),
        ("Handle length share", &charts.handle_length_share),
        ("Application share", &charts.application_share),
        ("End user share", &charts.end_user_share),
        ("Channel type share", &charts.channel_type_share),
    ];
    if let Some(offline) = &charts.channel_split.offline {
        sections.push(("Offline channels", offline));
    }
    if let Some(online) = &charts.channel_split.online {
        sections.push(("Online channels", online));
    }
    sections
}

/// Every pivot cell as one `chart,year,facet,value` row
fn long_table(sections: &[(&'static str, &Pivot)]) -> Tabular {
    let mut table = Tabular::new(["chart", "year", "facet", "value"]);
    for (title, pivot) in sections {
        for (year, row) in pivot.years.iter().zip(&pivot.values) {
            for (facet, value) in pivot.facets.iter().zip(row) {
                table.push([
                    title.to_string(),
                    year.to_string(),
                    facet.clone(),
                    value.to_string(),
                ]);
            }
        }
    }
    table
}

fn breakdown_table(charts: &SegmentDashboard, mode: ValueMode) -> Tabular {
    let mut table = Tabular::new(["Year - Region", "Country", "Value"]);
    for row in &charts.region_breakdown {
        let value = match mode {
            ValueMode::ByValue => format!("{}%", format_with_commas(row.value, 1)),
            ValueMode::ByVolume => format_measure(row.value, mode),
        };
        table.push([row.year_region.clone(), row.country.to_string(), value]);
    }
    table
}
