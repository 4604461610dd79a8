//! CLI command definitions for task-board
//!
//! `serve` runs the HTTP API; the remaining subcommands talk to a running
//! server through [`crate::client::TaskClient`].

pub mod add;
pub mod list;

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::format::OutputFormat;
use add::AddArgs;
use list::ListArgs;

/// Task board server and client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// API base URL for client commands (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server (default if no subcommand given)
    Serve(ServeArgs),

    /// List tasks with filters, sorting and pagination
    List(ListArgs),

    /// Create a task
    Add(AddArgs),

    /// Delete a task by id
    Delete(IdArgs),

    /// Flip a task between open and completed
    Toggle(IdArgs),
}

/// Arguments for the serve subcommand
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to listen on (overrides config)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for commands addressing one task
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Task id
    pub id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}
