//! `mlens hierarchy` command - print a static taxonomy

use clap::ValueEnum;
use console::style;
use miette::Result;

use crate::cli::output::{effective_format, print_json, print_yaml, Tabular};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dimensions::{self, Taxonomy};

/// Which taxonomy to print
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum HierarchyKind {
    /// Component type → category → subcategory
    Component,
    /// Product type and technology cross hierarchy
    CrossTechnology,
    /// Product type and retail format cross hierarchy
    CrossRetail,
    SolutionTypes,
    TechnologyTypes,
    RetailFormats,
    ModelTypes,
}

#[derive(clap::Args, Debug)]
pub struct HierarchyArgs {
    /// Taxonomy to print
    #[arg(value_enum)]
    pub kind: HierarchyKind,
}

enum Listing {
    Tree(Taxonomy),
    Flat(&'static [&'static str]),
}

impl HierarchyKind {
    fn listing(self) -> Listing {
        match self {
            HierarchyKind::Component => Listing::Tree(dimensions::component_hierarchy()),
            HierarchyKind::CrossTechnology => {
                Listing::Tree(dimensions::cross_product_technology_hierarchy())
            }
            HierarchyKind::CrossRetail => Listing::Tree(dimensions::cross_retail_format_hierarchy()),
            HierarchyKind::SolutionTypes => Listing::Flat(dimensions::solution_types()),
            HierarchyKind::TechnologyTypes => Listing::Flat(dimensions::technology_types()),
            HierarchyKind::RetailFormats => Listing::Flat(dimensions::retail_formats()),
            HierarchyKind::ModelTypes => Listing::Flat(dimensions::model_types()),
        }
    }
}

/// Run the hierarchy command
pub fn run(args: HierarchyArgs, global: &GlobalOpts) -> Result<()> {
    let listing = args.kind.listing();

    match (effective_format(global.output, true), &listing) {
        (OutputFormat::Json, Listing::Tree(tree)) => print_json(tree)?,
        (OutputFormat::Json, Listing::Flat(items)) => print_json(items)?,
        (OutputFormat::Yaml, Listing::Tree(tree)) => print_yaml(tree)?,
        (OutputFormat::Yaml, Listing::Flat(items)) => print_yaml(items)?,
        (OutputFormat::Csv, _) => paths(&listing).write_csv(std::io::stdout())?,
        (OutputFormat::Md, _) => print!("{}", paths(&listing).to_markdown()),
        (OutputFormat::Table | OutputFormat::Auto, Listing::Flat(items)) => {
            for item in items.iter() {
                println!("{}", item);
            }
        }
        (OutputFormat::Table | OutputFormat::Auto, Listing::Tree(tree)) => {
            for root in tree.iter() {
                println!("{}", style(root.name).bold());
                for (i, node) in root.nodes.iter().enumerate() {
                    let last_node = i + 1 == root.nodes.len();
                    println!("{} {}", if last_node { "└─" } else { "├─" }, node.name);
                    for (j, leaf) in node.children.iter().enumerate() {
                        let rail = if last_node { "  " } else { "│ " };
                        let branch = if j + 1 == node.children.len() { "└─" } else { "├─" };
                        println!("{} {} {}", rail, branch, leaf);
                    }
                }
            }
        }
    }
    Ok(())
}

/// One row per leaf path; levels without children end the path early
fn paths(listing: &Listing) -> Tabular {
    match listing {
        Listing::Flat(items) => {
            let mut table = Tabular::new(["Level 1"]);
            for item in items.iter() {
                table.push([*item]);
            }
            table
        }
        Listing::Tree(tree) => {
            let mut table = Tabular::new(["Level 1", "Level 2", "Level 3"]);
            for root in tree.iter() {
                for node in root.nodes {
                    if node.children.is_empty() {
                        table.push([root.name, node.name, ""]);
                    }
                    for leaf in node.children {
                        table.push([root.name, node.name, *leaf]);
                    }
                }
            }
            table
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_paths_cover_every_leaf() {
        let listing = HierarchyKind::Component.listing();
        let table = paths(&listing);
        assert_eq!(table.headers.len(), 3);
        let leaves: usize = dimensions::component_hierarchy()
            .iter()
            .flat_map(|root| root.nodes)
            .map(|node| node.children.len().max(1))
            .sum();
        assert_eq!(table.rows.len(), leaves);
    }

    #[test]
    fn test_flat_listing() {
        let table = paths(&HierarchyKind::ModelTypes.listing());
        assert_eq!(table.rows, vec![vec!["Cash Model"], vec!["Cashless Model"]]);
    }
}
