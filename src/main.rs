//! Simbundle - simulation asset bundler
//!
//! Validates a sourced catkin workspace, resolves the robot description files
//! its launch files use, and stages the assets needed by Gazebo and the GZWeb
//! viewer into one directory.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod copier;
mod error;
mod registry;
mod resolver;
mod ui;
mod validation;
mod workspace;
mod xml;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check => commands::check::run(cli.anchor, cli.config),
        Commands::Deps => commands::deps::run(cli.anchor, cli.config, cli.verbose),
        Commands::Bundle(args) => commands::bundle::run(cli.anchor, cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
