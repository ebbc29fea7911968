//! `mlens fingerprint` command - dataset digest across cache clears
//!
//! Generates the dataset, digests it, clears the cache and repeats. With the
//! default reseed policy every digest matches; `continue-sequence` makes each
//! regeneration differ.

use console::style;
use miette::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::output::{effective_format, print_json, print_yaml, Tabular};
use crate::cli::{GlobalOpts, OutputFormat, Session};
use crate::core::cache::dataset_digest;
use crate::core::generator::ReseedPolicy;

#[derive(clap::Args, Debug)]
pub struct FingerprintArgs {
    /// Number of generations to digest
    #[arg(long, short = 'r', default_value = "2", value_parser = clap::value_parser!(u32).range(1..=16))]
    pub regenerations: u32,
}

#[derive(Debug, Serialize)]
struct Fingerprint {
    seed: u64,
    reseed: ReseedPolicy,
    records: usize,
    digests: Vec<String>,
    stable: bool,
}

/// Run the fingerprint command
pub fn run(args: FingerprintArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let cache = session.cache();

    let mut digests = Vec::new();
    let mut records = 0;
    for generation in 1..=args.regenerations {
        let data = cache.get_data();
        records = data.len();
        let digest = dataset_digest(&data);
        info!(generation, records, digest = %digest, "dataset digested");
        digests.push(digest);
        cache.clear();
    }

    let report = Fingerprint {
        seed: session.config.seed,
        reseed: session.config.reseed,
        records,
        stable: digests.windows(2).all(|w| w[0] == w[1]),
        digests,
    };

    match effective_format(global.output, false) {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            let mut table = Tabular::new(["Generation", "SHA-256"]);
            for (i, digest) in report.digests.iter().enumerate() {
                table.push([(i + 1).to_string(), digest.clone()]);
            }
            println!("{}", table.to_table_string());
            let verdict = if report.stable {
                style("stable").green()
            } else {
                style("differs").yellow()
            };
            println!(
                "{} records, seed {}, reseed {}: {}",
                report.records, report.seed, report.reseed, verdict
            );
        }
        OutputFormat::Csv | OutputFormat::Md => {
            let mut table = Tabular::new(["generation", "sha256"]);
            for (i, digest) in report.digests.iter().enumerate() {
                table.push([(i + 1).to_string(), digest.clone()]);
            }
            if global.output == OutputFormat::Csv {
                table.write_csv(std::io::stdout())?;
            } else {
                print!("{}", table.to_markdown());
            }
        }
        OutputFormat::Yaml | OutputFormat::Auto => print_yaml(&report)?,
    }
    Ok(())
}
