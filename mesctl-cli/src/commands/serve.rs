//! HTTP server command
//!
//! Wires a repository backend into the work-order service and runs the
//! axum server. The backend is chosen here, at process startup, and
//! injected by plain constructor argument.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use mesctl_core::{InMemoryWorkOrderRepository, MesConfig, WorkOrderService};
use mesctl_server::db::{create_pool_with_options, migrations, PgWorkOrderRepository};
use mesctl_server::http::{run_server, ServerConfig};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Ephemeral in-memory store (testing, demos)
    Memory,
    /// Durable Postgres store
    Postgres,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3050, or [server].bind in config)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Storage backend
    #[arg(long, value_enum, default_value = "postgres")]
    pub backend: Backend,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    // Config file is optional; flags and env win over it.
    let config = MesConfig::load().ok();

    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => config
            .as_ref()
            .and_then(|c| c.server.as_ref())
            .and_then(|s| s.bind.as_deref())
            .map(|s| s.parse().context("Invalid [server].bind address in config"))
            .transpose()?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3050))),
    };

    let service = match args.backend {
        Backend::Memory => {
            tracing::warn!("In-memory backend selected; data lives for this process only");
            WorkOrderService::new(Arc::new(InMemoryWorkOrderRepository::new()))
        }
        Backend::Postgres => {
            let database_url = args
                .database_url
                .or_else(|| {
                    config
                        .as_ref()
                        .and_then(|c| c.database_url().map(String::from))
                })
                .context(
                    "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, \
                     or [database].url in ~/.mesctl/config.toml",
                )?;

            let max_connections = config
                .as_ref()
                .and_then(|c| c.database.as_ref())
                .and_then(|d| d.max_connections)
                .unwrap_or(5);

            let pool = create_pool_with_options(&database_url, max_connections)
                .await
                .context("Failed to create database pool")?;

            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;

            WorkOrderService::new(Arc::new(PgWorkOrderRepository::new(pool)))
        }
    };

    tracing::info!("Starting mesctl server on {}", bind_addr);

    let server_config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(service, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
