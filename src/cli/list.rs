//! List subcommand for task-board CLI

use clap::Args;

use crate::client::TaskFilters;
use crate::format::OutputFormat;
use crate::types::{Priority, SortField, SortOrder};

/// Arguments for the list subcommand
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only tasks with this priority
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// Only tasks in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only completed tasks
    #[arg(long, conflicts_with = "open")]
    pub done: bool,

    /// Only open tasks
    #[arg(long)]
    pub open: bool,

    /// Substring to look for in title or description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u64>,

    /// Tasks per page (server clamps to 1..=100)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Sort column
    #[arg(long, value_enum)]
    pub sort_by: Option<SortField>,

    /// Sort direction
    #[arg(long, value_enum)]
    pub sort_order: Option<SortOrder>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl ListArgs {
    pub fn filters(&self) -> TaskFilters {
        let completed = match (self.done, self.open) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        TaskFilters {
            priority: self.priority,
            category: self.category.clone(),
            completed,
            search: self.search.clone(),
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}
