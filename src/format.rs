//! Output formatting for client commands.

use crate::pagination::Pagination;
use crate::types::{Task, TaskPage};
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render any serializable result as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One task as a single table row.
pub fn format_task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let due = task.due_date.as_deref().unwrap_or("-");
    format!(
        "[{}] {:>5}  {:<6}  {:<12}  {:<10}  {}",
        mark,
        task.id,
        task.priority.as_str(),
        truncate(&task.category, 12),
        due,
        task.title
    )
}

/// Footer describing where a page sits in the listing.
pub fn format_pagination(p: &Pagination) -> String {
    let mut nav = Vec::new();
    if p.has_previous_page {
        nav.push(format!("prev: --page {}", p.current_page.saturating_sub(1)));
    }
    if p.has_next_page {
        nav.push(format!("next: --page {}", p.current_page.saturating_add(1)));
    }

    let mut line = format!(
        "Page {} of {} ({} tasks, {} per page)",
        p.current_page, p.total_pages, p.total_items, p.items_per_page
    );
    if !nav.is_empty() {
        line.push_str(&format!("  [{}]", nav.join(", ")));
    }
    line
}

/// A page of tasks as a text table.
pub fn format_task_page(page: &TaskPage) -> String {
    let mut out = String::new();

    if page.data.is_empty() {
        out.push_str("No tasks found\n");
    } else {
        out.push_str(&format!(
            "    {:>5}  {:<6}  {:<12}  {:<10}  {}\n",
            "ID", "PRIO", "CATEGORY", "DUE", "TITLE"
        ));
        for task in &page.data {
            out.push_str(&format_task_line(task));
            out.push('\n');
        }
    }

    out.push_str(&format_pagination(&page.pagination));
    out.push('\n');
    out
}

/// A single task with all of its fields.
pub fn format_task_detail(task: &Task) -> String {
    let mut out = format!("Task {}: {}\n", task.id, task.title);
    out.push_str(&format!("  priority:  {}\n", task.priority));
    out.push_str(&format!("  category:  {}\n", task.category));
    out.push_str(&format!("  completed: {}\n", task.completed));
    if let Some(ref due) = task.due_date {
        out.push_str(&format!("  due:       {}\n", due));
    }
    out.push_str(&format!("  created:   {}\n", task.created_at));
    if let Some(ref done) = task.completed_at {
        out.push_str(&format!("  done at:   {}\n", done));
    }
    if let Some(ref desc) = task.description {
        out.push_str(&format!("\n  {}\n", desc));
    }
    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}~", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn task(id: i64, title: &str, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            priority: Priority::High,
            category: "work".to_string(),
            completed,
            due_date: Some("2024-06-01".to_string()),
            created_at: "2024-05-01 10:00:00".to_string(),
            completed_at: None,
        }
    }

    #[test]
    fn line_marks_completion() {
        let line = format_task_line(&task(4, "Ship it", true));
        assert!(line.starts_with("[x]"));
        assert!(line.contains("high"));
        assert!(line.contains("2024-06-01"));
        assert!(line.ends_with("Ship it"));
    }

    #[test]
    fn pagination_footer_lists_navigation() {
        let footer = format_pagination(&Pagination::new(2, 10, 35));
        assert_eq!(
            footer,
            "Page 2 of 4 (35 tasks, 10 per page)  [prev: --page 1, next: --page 3]"
        );
        let footer = format_pagination(&Pagination::new(1, 10, 0));
        assert_eq!(footer, "Page 1 of 1 (0 tasks, 10 per page)");
    }

    #[test]
    fn footer_tolerates_inconsistent_foreign_metadata() {
        let p = Pagination {
            current_page: 0,
            total_pages: 1,
            total_items: 0,
            items_per_page: 10,
            has_next_page: false,
            has_previous_page: true,
        };
        assert_eq!(
            format_pagination(&p),
            "Page 0 of 1 (0 tasks, 10 per page)  [prev: --page 0]"
        );
    }

    #[test]
    fn empty_page_says_so() {
        let page = TaskPage {
            data: vec![],
            pagination: Pagination::new(1, 10, 0),
        };
        assert!(format_task_page(&page).starts_with("No tasks found"));
    }

    #[test]
    fn long_categories_are_truncated() {
        assert_eq!(truncate("short", 12), "short");
        assert_eq!(truncate("a-very-long-category", 8), "a-very-~");
    }
}
