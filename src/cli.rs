use clap::{Parser, Subcommand};

/// fedora-setup - Fedora post-install setup with Hyprland dotfiles
#[derive(Parser)]
#[command(name = "fedora-setup")]
#[command(about = "Resolves and exposes the configuration for the Fedora setup steps")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved configuration
    Show {
        /// Print as JSON instead of one value per line
        #[arg(long)]
        json: bool,
    },
    /// Print the configuration as KEY=VALUE lines for shell consumers
    Env,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
