//! Task Board Library
//!
//! A task list HTTP API over SQLite with filtering, sorting and pagination,
//! plus a client for it.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod pagination;
pub mod types;
