mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,reportgen=debug,reportgen_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = cli.global();
    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args, &global),
        Commands::Lint { job, specs, json } => commands::lint::run(job, specs, json, &global),
        Commands::Validate { job, json } => commands::validate::run(job, json),
        Commands::Specs { specs, json } => commands::specs::run(specs, json, &global),
        Commands::Sheets { file } => commands::sheets::run(file),
        Commands::Nodes {
            file,
            sheet,
            nodes,
            json,
        } => commands::nodes::run(file, sheet, nodes, json, &global),
        Commands::Convert { input, output } => commands::convert::run(input, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
