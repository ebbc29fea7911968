//! `mlens growth` command - solution-type YoY and CAGR analysis

use console::style;
use miette::Result;

use crate::cli::output::{
    effective_format, format_measure, pivot_table, print_json, print_yaml, Tabular,
};
use crate::cli::{GlobalOpts, OutputFormat, Session};
use crate::core::analytics::{solution_type_growth, GrowthAnalysis, ValueMode};
use crate::core::filter::CagrFilters;
use crate::core::format::format_with_commas;

#[derive(clap::Args, Debug)]
pub struct GrowthArgs {
    /// Regions to include
    #[arg(long, value_delimiter = ',')]
    pub region: Vec<String>,

    /// Solution types to include
    #[arg(long, value_delimiter = ',')]
    pub solution_type: Vec<String>,
}

/// Run the growth command
pub fn run(args: GrowthArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let filters = CagrFilters {
        region: args.region,
        solution_type: args.solution_type,
    };
    let records = filters.apply(&data);
    let analysis = solution_type_growth(&records);

    match effective_format(global.output, true) {
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Yaml => print_yaml(&analysis)?,
        OutputFormat::Csv => cagr_table(&analysis).write_csv(std::io::stdout())?,
        OutputFormat::Md => {
            println!("### {}\n", ValueMode::ByValue.label());
            print!("{}", value_table(&analysis).to_markdown());
            println!("\n### YoY growth (%)\n");
            print!("{}", yoy_table(&analysis).to_markdown());
            println!("\n### CAGR (%)\n");
            print!("{}", cagr_table(&analysis).to_markdown());
        }
        OutputFormat::Table | OutputFormat::Auto => {
            if analysis.pivot.is_empty() {
                println!("No solution-type records match the current selection.");
                return Ok(());
            }
            println!("{}", style(ValueMode::ByValue.label()).bold());
            println!("{}", value_table(&analysis).to_table_string());
            println!("{}", style("YoY growth (%)").bold());
            println!("{}", yoy_table(&analysis).to_table_string());
            println!("{}", style("CAGR (%)").bold());
            println!("{}", cagr_table(&analysis).to_table_string());
        }
    }
    Ok(())
}

fn value_table(analysis: &GrowthAnalysis) -> Tabular {
    pivot_table(&analysis.pivot, |v| format_measure(v, ValueMode::ByValue))
}

fn yoy_table(analysis: &GrowthAnalysis) -> Tabular {
    let yoy = &analysis.yoy;
    let mut headers = vec!["Year".to_string()];
    headers.extend(yoy.facets.iter().cloned());

    let mut table = Tabular::new(headers);
    for (year, row) in yoy.years.iter().zip(&yoy.values) {
        let mut cells = vec![year.to_string()];
        cells.extend(row.iter().map(|v| format_with_commas(*v, 2)));
        table.push(cells);
    }
    table
}

fn cagr_table(analysis: &GrowthAnalysis) -> Tabular {
    let (first, last) = match (analysis.pivot.years.first(), analysis.pivot.years.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => (0, 0),
    };
    let mut table = Tabular::new([
        "Solution Type".to_string(),
        format!("CAGR {}-{} (%)", first, last),
    ]);
    for entry in &analysis.cagr {
        table.push([entry.facet.clone(), format_with_commas(entry.cagr, 2)]);
    }
    table
}
