//! CLI definitions using clap derive API
//!
//! Submodules hold the argument types of commands that take arguments:
//! - bundle: Bundle command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod bundle;
pub mod completions;

pub use bundle::BundleArgs;
pub use completions::CompletionsArgs;

/// Simbundle - simulation asset bundler
///
/// Validate a catkin workspace and stage its simulation assets for Gazebo and GZWeb.
#[derive(Parser, Debug)]
#[command(
    name = "simbundle",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Stage Gazebo simulation assets from a catkin workspace",
    long_about = "Simbundle validates a sourced catkin workspace, resolves the xacro and urdf \
                  files used by its launch files and copies everything the simulator and the \
                  GZWeb viewer need into a single staging directory.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  simbundle check                        \x1b[90m# Validate the workspace\x1b[0m\n   \
                  simbundle -v deps                      \x1b[90m# Show required packages and files\x1b[0m\n   \
                  simbundle bundle                       \x1b[90m# Stage into ./simulation_files\x1b[0m\n   \
                  simbundle bundle -o /srv/sim --quiet   \x1b[90m# Stage elsewhere without progress\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Anchor package locating the workspace (overrides the config file)
    #[arg(long, short = 'a', global = true)]
    pub anchor: Option<String>,

    /// Configuration file (defaults to ./simbundle.yaml when present)
    #[arg(long, short = 'c', global = true, env = "SIMBUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the workspace
    Check,

    /// List the packages required by the robot descriptions
    Deps,

    /// Validate the workspace and stage its simulation assets
    Bundle(BundleArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
