//! mesctl CLI - work-order backend control
//!
//! This is the main entry point for the mesctl command-line tool, which
//! provides:
//! - The HTTP server (`serve` subcommand, in-memory or Postgres backend)
//! - Work-order CRUD against a running server (`orders` subcommand)
//! - Config file management (`config` subcommand)
//! - Shell completion generation (`completions` subcommand)

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "mesctl",
    author,
    version,
    about = "Manufacturing work-order backend and client",
    long_about = "Run the work-order HTTP service and drive its CRUD API from the \
                  command line. Configuration lives in ~/.mesctl/config.toml; flags \
                  and environment variables take precedence."
)]
struct Cli {
    /// Enable debug logging (or set RUST_LOG for fine-grained control)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the work-order HTTP server
    Serve(commands::serve::ServeArgs),
    /// Work-order operations against a running server
    Orders(commands::orders::OrdersArgs),
    /// Manage ~/.mesctl/config.toml
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Dev-time .env loading; absence is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.debug).ok();

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await?,
        Commands::Orders(args) => commands::orders::run_orders(args).await?,
        Commands::Config(args) => commands::config::run_config(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
