//! Add subcommand for task-board CLI

use clap::Args;

use crate::format::OutputFormat;
use crate::types::{NewTask, Priority};

/// Arguments for the add subcommand
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Priority (server default: medium)
    #[arg(short, long, value_enum)]
    pub priority: Option<Priority>,

    /// Category (server default: general)
    #[arg(long)]
    pub category: Option<String>,

    /// Due date, e.g. 2025-03-01
    #[arg(long, value_name = "DATE")]
    pub due_date: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl AddArgs {
    pub fn new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            category: self.category.clone(),
            due_date: self.due_date.clone(),
        }
    }
}
