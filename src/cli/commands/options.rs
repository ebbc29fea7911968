//! `mlens options` command - selectable values per facet
//!
//! Mirrors what the dashboard's selectors would offer: sorted facet values,
//! countries cascaded from the chosen regions and channels grouped by family.

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::filters::ChannelTypeFilter;
use crate::cli::output::{effective_format, print_json, print_yaml, Tabular};
use crate::cli::{GlobalOpts, OutputFormat, Session};
use crate::core::filter::{available_countries, channel_groups, ChannelGroup, FacetOptions};
use crate::entities::field::Field;
use crate::entities::record::ChannelType;

/// Facets listed when `--facet` is not given
const DEFAULT_FACETS: [Field; 11] = [
    Field::Year,
    Field::Region,
    Field::Segment,
    Field::ProductType,
    Field::BladeMaterial,
    Field::HandleLength,
    Field::Application,
    Field::EndUser,
    Field::DistributionChannelType,
    Field::Brand,
    Field::Company,
];

#[derive(clap::Args, Debug)]
pub struct OptionsArgs {
    /// Facets to list (repeatable; default: the main selectors)
    #[arg(long, short = 'f', value_delimiter = ',')]
    pub facet: Vec<Field>,

    /// Restrict the country options to these regions
    #[arg(long, value_delimiter = ',')]
    pub region: Vec<String>,

    /// Restrict the channel options to these families
    #[arg(long, value_enum, value_delimiter = ',')]
    pub channel_type: Vec<ChannelTypeFilter>,
}

#[derive(Serialize)]
struct OptionsReport<'a> {
    facets: &'a FacetOptions,
    countries: Vec<&'static str>,
    channels: Vec<ChannelGroup>,
}

/// Run the options command
pub fn run(args: OptionsArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let data = session.data();

    let fields: Vec<Field> = if args.facet.is_empty() {
        DEFAULT_FACETS.to_vec()
    } else {
        args.facet.clone()
    };
    let channel_types: Vec<ChannelType> =
        args.channel_type.iter().map(|t| t.to_channel_type()).collect();

    let facets = FacetOptions::from_records(data.iter(), &fields);
    let report = OptionsReport {
        facets: &facets,
        countries: available_countries(data.iter(), &args.region),
        channels: channel_groups(data.iter(), &channel_types),
    };

    let table = || {
        let mut table = Tabular::new(["Facet", "Count", "Values"]);
        for (field, values) in facets.iter() {
            let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            table.push([field.to_string(), values.len().to_string(), joined.join("; ")]);
        }
        table.push([
            "country".to_string(),
            report.countries.len().to_string(),
            report.countries.join("; "),
        ]);
        for group in &report.channels {
            table.push([
                format!("{} channels", group.channel_type),
                group.channels.len().to_string(),
                group.channels.join("; "),
            ]);
        }
        table
    };

    match effective_format(global.output, true) {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Yaml => print_yaml(&report)?,
        OutputFormat::Csv => table().write_csv(std::io::stdout())?,
        OutputFormat::Md => print!("{}", table().to_markdown()),
        OutputFormat::Table | OutputFormat::Auto => {
            for (field, values) in facets.iter() {
                println!("{} ({})", style(field).bold(), values.len());
                for value in values {
                    println!("  {}", value);
                }
            }
            println!("{} ({})", style("country").bold(), report.countries.len());
            for country in &report.countries {
                println!("  {}", country);
            }
            for group in &report.channels {
                let heading = format!("{} channels", group.channel_type);
                println!("{} ({})", style(heading).bold(), group.channels.len());
                for channel in &group.channels {
                    println!("  {}", channel);
                }
            }
        }
    }
    Ok(())
}
