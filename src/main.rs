//! fedora-setup - Main entry point
//!
//! Resolves the installer configuration once at startup and prints it in
//! the format the invoking step (human or shell script) asked for.

use anyhow::Context;
use tracing::{debug, info};

use fedora_setup::cli::{Cli, Commands};
use fedora_setup::config::{InstallerConfig, shell_quote};

/// Initialize tracing with appropriate settings
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("fedora-setup starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let config =
        InstallerConfig::resolve().context("failed to resolve installer configuration")?;
    info!(sudo_user = %config.sudo_user, user_home = %config.user_home.display(), "configuration resolved");

    match cli.command {
        Some(Commands::Env) => print_env(&config),
        Some(Commands::Show { json: true }) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Some(Commands::Show { json: false }) | None => print_plain(&config),
    }

    Ok(())
}

/// Print the configuration one value per line, for humans.
fn print_plain(config: &InstallerConfig) {
    println!("log file:          {}", config.log_file.display());
    println!("state file:        {}", config.state_file.display());
    println!("sudo user:         {}", config.sudo_user);
    println!("user home:         {}", config.user_home.display());
    println!("dotfiles dir:      {}", config.dotfiles_dir.display());
    println!("temp build dir:    {}", config.temp_build_dir.display());
    println!("rpmfusion free:    {}", config.rpmfusion_free_url);
    println!("rpmfusion nonfree: {}", config.rpmfusion_nonfree_url);
}

/// Print `KEY=VALUE` lines in a stable order so shell consumers can
/// `eval` the output. Values are single-quoted with embedded quotes
/// escaped.
fn print_env(config: &InstallerConfig) {
    let mut vars: Vec<(String, String)> = config.to_env_vars().into_iter().collect();
    vars.sort();
    for (key, value) in vars {
        println!("{}={}", key, shell_quote(&value));
    }
}
