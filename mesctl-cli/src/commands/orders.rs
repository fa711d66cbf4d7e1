//! Work-order CLI commands - drive the HTTP API
//!
//! Commands: list, get, create, update, delete
//!
//! Designed for scripting as much as for humans: `--json` emits raw API
//! responses for jq, `--quiet` emits ids only.
//!
//! ```bash
//! mesctl orders list --json | jq '.items[] | {order_number, status}'
//! ```

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Main Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct OrdersArgs {
    /// API endpoint (default: http://127.0.0.1:3050)
    #[arg(long, env = "MESCTL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Skip TLS certificate verification (for tunnelled endpoints)
    #[arg(long, global = true)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: OrdersCommands,
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommands {
    /// List work orders (paginated)
    List(ListArgs),
    /// Show one work order
    Get(GetArgs),
    /// Create a work order
    Create(CreateArgs),
    /// Update fields on a work order
    Update(UpdateArgs),
    /// Delete a work order
    Delete(DeleteArgs),
}

// ============================================================================
// Output Format (shared)
// ============================================================================

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - ids only
    Quiet,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Records to skip
    #[arg(long, default_value = "0")]
    pub skip: u64,

    /// Max records to return
    #[arg(long, short, default_value = "20")]
    pub limit: u64,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Shorthand for --output quiet
    #[arg(long, short, conflicts_with = "output")]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Work order id
    pub id: Uuid,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Order number (unique, e.g. WO-2025-001)
    #[arg(long)]
    pub order_number: String,

    /// Product name
    #[arg(long)]
    pub product_name: String,

    /// Quantity to produce (> 0)
    #[arg(long)]
    pub quantity: i32,

    /// Initial status (default PENDING)
    #[arg(long)]
    pub status: Option<String>,

    /// Due date, RFC 3339 (e.g. 2026-12-31T23:59:59Z)
    #[arg(long)]
    pub due_date: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Work order id
    pub id: Uuid,

    /// New order number
    #[arg(long)]
    pub order_number: Option<String>,

    /// New product name
    #[arg(long)]
    pub product_name: Option<String>,

    /// New quantity (> 0)
    #[arg(long)]
    pub quantity: Option<i32>,

    /// New status (PENDING, IN_PROGRESS, COMPLETED, ...)
    #[arg(long)]
    pub status: Option<String>,

    /// New due date, RFC 3339
    #[arg(long)]
    pub due_date: Option<String>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Work order id
    pub id: Uuid,
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct WorkOrderDto {
    id: Uuid,
    order_number: String,
    product_name: String,
    quantity: i32,
    status: String,
    due_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WorkOrderListDto {
    items: Vec<WorkOrderDto>,
    total: i64,
    skip: u64,
    limit: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

// ============================================================================
// Entry Point
// ============================================================================

pub async fn run_orders(args: OrdersArgs) -> Result<()> {
    let endpoint = get_endpoint(&args)?;
    let client = build_client(args.insecure)?;

    match args.command {
        OrdersCommands::List(cmd) => run_list(&client, &endpoint, cmd).await,
        OrdersCommands::Get(cmd) => run_get(&client, &endpoint, cmd).await,
        OrdersCommands::Create(cmd) => run_create(&client, &endpoint, cmd).await,
        OrdersCommands::Update(cmd) => run_update(&client, &endpoint, cmd).await,
        OrdersCommands::Delete(cmd) => run_delete(&client, &endpoint, cmd).await,
    }
}

// ============================================================================
// Config Resolution
// ============================================================================

fn get_endpoint(args: &OrdersArgs) -> Result<String> {
    // Priority: flag/env > config.toml > default
    if let Some(ref ep) = args.endpoint {
        return Ok(ep.trim_end_matches('/').to_string());
    }

    if let Ok(config) = mesctl_core::MesConfig::load() {
        if let Some(endpoint) = config.cli_endpoint() {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }
    }

    Ok("http://127.0.0.1:3050".to_string())
}

fn get_output_format(output: OutputFormat, json_flag: bool, quiet_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else if quiet_flag {
        OutputFormat::Quiet
    } else {
        output
    }
}

/// Build HTTP client with optional TLS verification skip
fn build_client(insecure: bool) -> Result<Client> {
    let builder = Client::builder();
    if insecure {
        builder
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build HTTP client with insecure mode")
    } else {
        builder.build().context("Failed to build HTTP client")
    }
}

fn parse_due_date(raw: &Option<String>) -> Result<Option<DateTime<Utc>>> {
    raw.as_deref()
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .with_context(|| format!("Invalid due date '{}', expected RFC 3339", s))
        })
        .transpose()
}

// ============================================================================
// HTTP Client Helpers
// ============================================================================

async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&error_text) {
            Err(anyhow!("{}: {} ({})", status, error_resp.message, error_resp.error))
        } else {
            Err(anyhow!("{}: {}", status, error_text))
        }
    }
}

fn print_order(order: &WorkOrderDto) {
    println!(
        "{}  {}  {} x {}",
        order.id, order.status, order.quantity, order.product_name
    );
    println!("  order number: {}", order.order_number);
    if let Some(due) = order.due_date {
        println!("  due:          {}", due.to_rfc3339());
    }
    if let Some(ref notes) = order.notes {
        println!("  notes:        {}", notes);
    }
    println!("  created:      {}", order.created_at.to_rfc3339());
    println!("  updated:      {}", order.updated_at.to_rfc3339());
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn run_list(client: &Client, endpoint: &str, args: ListArgs) -> Result<()> {
    let format = get_output_format(args.output, args.json, args.quiet);

    let url = format!(
        "{}/api/v1/work-orders?skip={}&limit={}",
        endpoint, args.skip, args.limit
    );

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to connect to work-order API")?;

    let list: WorkOrderListDto = handle_response(response).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        OutputFormat::Quiet => {
            for order in &list.items {
                println!("{}", order.id);
            }
        }
        OutputFormat::Human => {
            if list.items.is_empty() {
                println!("No work orders (total: {})", list.total);
                return Ok(());
            }
            for order in &list.items {
                println!(
                    "{}  {:<12} {:>6} x {}  [{}]",
                    order.id, order.status, order.quantity, order.product_name, order.order_number
                );
            }
            println!(
                "-- showing {} of {} (skip {}, limit {})",
                list.items.len(),
                list.total,
                list.skip,
                list.limit
            );
        }
    }

    Ok(())
}

async fn run_get(client: &Client, endpoint: &str, args: GetArgs) -> Result<()> {
    let format = get_output_format(args.output, args.json, false);

    let url = format!("{}/api/v1/work-orders/{}", endpoint, args.id);
    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to connect to work-order API")?;

    let order: WorkOrderDto = handle_response(response).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
        OutputFormat::Quiet => println!("{}", order.id),
        OutputFormat::Human => print_order(&order),
    }

    Ok(())
}

async fn run_create(client: &Client, endpoint: &str, args: CreateArgs) -> Result<()> {
    let format = get_output_format(args.output, args.json, false);
    let due_date = parse_due_date(&args.due_date)?;

    let body = serde_json::json!({
        "order_number": args.order_number,
        "product_name": args.product_name,
        "quantity": args.quantity,
        "status": args.status,
        "due_date": due_date,
        "notes": args.notes,
    });

    let url = format!("{}/api/v1/work-orders", endpoint);
    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .context("Failed to connect to work-order API")?;

    let order: WorkOrderDto = handle_response(response).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
        OutputFormat::Quiet => println!("{}", order.id),
        OutputFormat::Human => {
            println!("Created work order {}", order.order_number);
            print_order(&order);
        }
    }

    Ok(())
}

async fn run_update(client: &Client, endpoint: &str, args: UpdateArgs) -> Result<()> {
    let format = get_output_format(args.output, args.json, false);
    let due_date = parse_due_date(&args.due_date)?;

    // Only send what was asked for; the API treats absent fields as
    // "leave unchanged".
    let mut body = serde_json::Map::new();
    if let Some(v) = args.order_number {
        body.insert("order_number".into(), v.into());
    }
    if let Some(v) = args.product_name {
        body.insert("product_name".into(), v.into());
    }
    if let Some(v) = args.quantity {
        body.insert("quantity".into(), v.into());
    }
    if let Some(v) = args.status {
        body.insert("status".into(), v.into());
    }
    if let Some(v) = due_date {
        body.insert("due_date".into(), serde_json::to_value(v)?);
    }
    if let Some(v) = args.notes {
        body.insert("notes".into(), v.into());
    }

    if body.is_empty() {
        return Err(anyhow!("Nothing to update; pass at least one field flag"));
    }

    let url = format!("{}/api/v1/work-orders/{}", endpoint, args.id);
    let response = client
        .put(&url)
        .json(&body)
        .send()
        .await
        .context("Failed to connect to work-order API")?;

    let order: WorkOrderDto = handle_response(response).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
        OutputFormat::Quiet => println!("{}", order.id),
        OutputFormat::Human => {
            println!("Updated work order {}", order.order_number);
            print_order(&order);
        }
    }

    Ok(())
}

async fn run_delete(client: &Client, endpoint: &str, args: DeleteArgs) -> Result<()> {
    let url = format!("{}/api/v1/work-orders/{}", endpoint, args.id);
    let response = client
        .delete(&url)
        .send()
        .await
        .context("Failed to connect to work-order API")?;

    let status = response.status();
    if status.is_success() {
        println!("Deleted {}", args.id);
        Ok(())
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&error_text) {
            Err(anyhow!("{}: {} ({})", status, error_resp.message, error_resp.error))
        } else {
            Err(anyhow!("{}: {}", status, error_text))
        }
    }
}
