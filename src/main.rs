mod cli;
mod engine;
mod error;
mod export;
mod fmt;
mod grid;
mod index;
mod loader;
mod models;
mod normalize;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare(args) => cli::compare::run(&args),
        Commands::Inspect(args) => cli::inspect::run(&args),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
