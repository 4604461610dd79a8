//! Task Board
//!
//! Runs the task HTTP API, or acts as a command-line client for it.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use task_board::api;
use task_board::cli::add::AddArgs;
use task_board::cli::list::ListArgs;
use task_board::cli::{Cli, Command, IdArgs, ServeArgs};
use task_board::client::TaskClient;
use task_board::config::Config;
use task_board::db::Database;
use task_board::format::{self, OutputFormat};
use task_board::logging::{self, LogTarget};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(ref db_path) = cli.database {
        config.server.db_path = db_path.clone();
    }
    if let Some(ref url) = cli.api_url {
        config.client.base_url = url.clone();
    }

    match cli.command {
        None => run_server(config, ServeArgs::default()).await,
        Some(Command::Serve(args)) => run_server(config, args).await,
        Some(Command::List(args)) => run_list(&config, args).await,
        Some(Command::Add(args)) => run_add(&config, args).await,
        Some(Command::Delete(args)) => run_delete(&config, args).await,
        Some(Command::Toggle(args)) => run_toggle(&config, args).await,
    }
}

async fn run_server(mut config: Config, args: ServeArgs) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    config.ensure_db_dir()?;
    let db = Arc::new(Database::open(&config.server.db_path)?);
    info!("Database opened at {}", config.server.db_path.display());

    let (shutdown_tx, _addr) = api::start_server(db, config.server.socket_addr()).await?;

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl-C");
    let _ = shutdown_tx.send(());

    Ok(())
}

fn client_for(config: &Config) -> TaskClient {
    TaskClient::new(config.client.base_url.clone())
}

async fn run_list(config: &Config, args: ListArgs) -> Result<()> {
    let page = client_for(config)
        .fetch_tasks_with_meta(&args.filters())
        .await?;

    match args.format {
        OutputFormat::Json => println!("{}", format::to_json(&page)?),
        OutputFormat::Text => print!("{}", format::format_task_page(&page)),
    }
    Ok(())
}

async fn run_add(config: &Config, args: AddArgs) -> Result<()> {
    let task = client_for(config).create_task(&args.new_task()).await?;

    match args.format {
        OutputFormat::Json => println!("{}", format::to_json(&task)?),
        OutputFormat::Text => print!("{}", format::format_task_detail(&task)),
    }
    Ok(())
}

async fn run_delete(config: &Config, args: IdArgs) -> Result<()> {
    let response = client_for(config).delete_task(args.id).await?;

    match args.format {
        OutputFormat::Json => println!("{}", format::to_json(&response)?),
        OutputFormat::Text => println!("Deleted task {}", args.id),
    }
    Ok(())
}

async fn run_toggle(config: &Config, args: IdArgs) -> Result<()> {
    let task = client_for(config).toggle_task(args.id).await?;

    match args.format {
        OutputFormat::Json => println!("{}", format::to_json(&task)?),
        OutputFormat::Text => print!("{}", format::format_task_detail(&task)),
    }
    Ok(())
}
