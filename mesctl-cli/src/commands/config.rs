//! Config file management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mesctl_core::MesConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter config file
    Init(InitArgs),
    /// Print the parsed config
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = MesConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    MesConfig::starter().save()?;
    println!("Wrote starter config to {}", config_path.display());
    println!("Edit [database].url before running `mesctl serve`.");
    Ok(())
}

fn run_show() -> Result<()> {
    let config = MesConfig::load()?;
    let rendered =
        toml::to_string_pretty(&config).context("Failed to render config as TOML")?;
    print!("{}", rendered);
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", MesConfig::config_path().display());
    Ok(())
}
