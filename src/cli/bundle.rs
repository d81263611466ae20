use clap::Parser;
use std::path::PathBuf;

/// Arguments for bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Stage into ./simulation_files:\n    simbundle bundle\n\n\
                  Refresh an existing staging directory in place:\n    simbundle bundle -o /srv/simulation --no-clean")]
pub struct BundleArgs {
    /// Staging directory (overrides the config file)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Keep directories left over from a previous run
    #[arg(long)]
    pub no_clean: bool,

    /// Do not show copy progress
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
