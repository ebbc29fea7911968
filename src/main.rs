use clap::Parser;
use miette::Result;
use mlens::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_tracing(&cli.global);

    match cli.command {
        Commands::Records(args) => mlens::cli::commands::records::run(args, &cli.global),
        Commands::Pivot(args) => mlens::cli::commands::pivot::run(args, &cli.global),
        Commands::Breakdown(args) => mlens::cli::commands::breakdown::run(args, &cli.global),
        Commands::Dashboard(args) => mlens::cli::commands::dashboard::run(args, &cli.global),
        Commands::Growth(args) => mlens::cli::commands::growth::run(args, &cli.global),
        Commands::Waterfall(args) => mlens::cli::commands::waterfall::run(args, &cli.global),
        Commands::Bubble(args) => mlens::cli::commands::bubble::run(args, &cli.global),
        Commands::Kpi(args) => mlens::cli::commands::kpi::run(args, &cli.global),
        Commands::Options(args) => mlens::cli::commands::options::run(args, &cli.global),
        Commands::Hierarchy(args) => mlens::cli::commands::hierarchy::run(args, &cli.global),
        Commands::Fingerprint(args) => mlens::cli::commands::fingerprint::run(args, &cli.global),
        Commands::Completions(args) => mlens::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr; `-v`/`-q` win over `RUST_LOG`, which wins over `warn`
fn init_tracing(global: &GlobalOpts) {
    let filter = if global.verbose {
        EnvFilter::new("mlens=debug")
    } else if global.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
