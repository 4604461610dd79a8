//! Task listing, creation, deletion and completion toggling.

use super::Database;
use super::query::{TASK_COLUMNS, TaskQuery};
use crate::pagination::Pagination;
use crate::types::{DEFAULT_CATEGORY, NewTask, Priority, Task, TaskPage};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use tracing::debug;

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let priority: String = row.get("priority")?;
    let completed: i64 = row.get("completed")?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        priority: Priority::parse(&priority).unwrap_or_default(),
        category: row.get("category")?,
        completed: completed != 0,
        due_date: row.get("due_date")?,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
    })
}

/// Internal helper to get a task using an existing connection (avoids deadlock).
fn get_task_internal(conn: &Connection, task_id: i64) -> Result<Option<Task>> {
    let sql = format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS);
    let task = conn
        .query_row(&sql, params![task_id], parse_task_row)
        .optional()?;
    Ok(task)
}

impl Database {
    /// List one page of tasks matching `query`.
    ///
    /// Runs the count statement, then the data statement, under one lock.
    pub fn list_tasks(&self, query: &TaskQuery) -> Result<TaskPage> {
        let built = query.build();

        self.with_conn(|conn| {
            let total: i64 = conn.query_row(
                &built.count_sql,
                params_from_iter(built.count_params.iter()),
                |row| row.get(0),
            )?;

            let mut stmt = conn.prepare(&built.data_sql)?;
            let data = stmt
                .query_map(params_from_iter(built.data_params.iter()), parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let total_items = u64::try_from(total).unwrap_or(0);
            debug!(
                total_items,
                returned = data.len(),
                page = query.page,
                limit = query.limit,
                "Listed tasks"
            );

            Ok(TaskPage {
                data,
                pagination: Pagination::new(query.page, query.limit, total_items),
            })
        })
    }

    /// Insert a task and return the stored row.
    pub fn create_task(&self, new_task: NewTask) -> Result<Task> {
        let priority = new_task.priority.unwrap_or_default();
        let category = new_task
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, description, priority, category, due_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new_task.title,
                    new_task.description,
                    priority.as_str(),
                    category,
                    new_task.due_date,
                ],
            )?;

            let id = conn.last_insert_rowid();
            debug!(task_id = id, "Created task");

            get_task_internal(conn, id)?
                .ok_or_else(|| anyhow!("Task {} missing after insert", id))
        })
    }

    /// Get a task by id.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, task_id))
    }

    /// Delete a task. Returns whether a row was removed.
    pub fn delete_task(&self, task_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
            debug!(task_id, removed = rows > 0, "Deleted task");
            Ok(rows > 0)
        })
    }

    /// Flip a task's completion state.
    ///
    /// Completing stamps `completed_at`; reopening clears it.
    pub fn toggle_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let rows = conn.execute(
                "UPDATE tasks
                 SET completed = CASE completed WHEN 0 THEN 1 ELSE 0 END,
                     completed_at = CASE completed WHEN 0 THEN CURRENT_TIMESTAMP ELSE NULL END
                 WHERE id = ?1",
                params![task_id],
            )?;

            if rows == 0 {
                return Ok(None);
            }

            get_task_internal(conn, task_id)
        })
    }
}
