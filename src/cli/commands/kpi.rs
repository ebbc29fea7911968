//! `mlens kpi` command - headline market value or volume

use console::style;
use miette::Result;

use crate::cli::filters::FilterArgs;
use crate::cli::output::{effective_format, print_json, print_yaml, Tabular};
use crate::cli::{GlobalOpts, OutputFormat, Session};
use crate::core::analytics::Kpi;

#[derive(clap::Args, Debug)]
pub struct KpiArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Run the kpi command
pub fn run(args: KpiArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();
    let state = args.filter.to_state(&data, session.mode())?;
    let records = state.apply(&data);
    let kpi = Kpi::compute(&records, session.mode());

    let table = || {
        let mut table = Tabular::new(["Mode", "Records", "Total"]);
        table.push([kpi.mode.to_string(), kpi.records.to_string(), kpi.label.clone()]);
        table
    };

    match effective_format(global.output, true) {
        OutputFormat::Json => print_json(&kpi)?,
        OutputFormat::Yaml => print_yaml(&kpi)?,
        OutputFormat::Csv => table().write_csv(std::io::stdout())?,
        OutputFormat::Md => print!("{}", table().to_markdown()),
        OutputFormat::Table | OutputFormat::Auto => {
            println!(
                "{}: {} ({} records)",
                style(kpi.mode.label()).bold(),
                style(&kpi.label).cyan(),
                kpi.records
            );
        }
    }
    Ok(())
}
