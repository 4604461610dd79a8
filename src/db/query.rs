//! Listing query construction.
//!
//! Raw request parameters are parsed into a [`TaskQuery`] first; SQL text is
//! only ever assembled from that validated form. Caller-supplied values reach
//! SQLite exclusively as bound parameters, and the sort column comes from a
//! fixed set of static names.

use crate::pagination::{normalize_limit, normalize_page, offset_for};
use crate::types::{SortField, SortOrder};
use rusqlite::types::Value;
use serde::Deserialize;

/// Columns returned by the data query, in `parse_task_row` order.
pub const TASK_COLUMNS: &str =
    "id, title, description, priority, category, completed, due_date, created_at, completed_at";

/// Raw listing parameters exactly as received. Every field is optional text
/// so that malformed values never reject a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub priority: Option<String>,
    pub category: Option<String>,
    pub completed: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

impl ListParams {
    /// Build from raw query pairs. When a key repeats, the first occurrence
    /// wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "priority" => &mut params.priority,
                "category" => &mut params.category,
                "completed" => &mut params.completed,
                "search" => &mut params.search,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "sortBy" => &mut params.sort_by,
                "sortOrder" => &mut params.sort_order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub priority: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self::from_params(&ListParams::default())
    }
}

impl TaskQuery {
    /// Normalize raw parameters.
    ///
    /// Empty `priority`, `category` and `search` are treated as absent. A
    /// present `completed` always filters: only a case-insensitive "true"
    /// selects completed tasks, every other value selects open ones.
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            priority: non_empty(params.priority.as_deref()),
            category: non_empty(params.category.as_deref()),
            completed: params
                .completed
                .as_deref()
                .map(|c| c.eq_ignore_ascii_case("true")),
            search: non_empty(params.search.as_deref()),
            page: normalize_page(params.page.as_deref()),
            limit: normalize_limit(params.limit.as_deref()),
            sort_by: SortField::resolve(params.sort_by.as_deref()),
            sort_order: SortOrder::resolve(params.sort_order.as_deref()),
        }
    }

    pub fn offset(&self) -> u64 {
        offset_for(self.page, self.limit)
    }

    /// Assemble the count and data statements for this query.
    pub fn build(&self) -> BuiltQuery {
        let mut conditions: Vec<&'static str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(ref priority) = self.priority {
            conditions.push("priority = ?");
            params.push(Value::Text(priority.clone()));
        }

        if let Some(ref category) = self.category {
            conditions.push("category = ?");
            params.push(Value::Text(category.clone()));
        }

        if let Some(completed) = self.completed {
            conditions.push("completed = ?");
            params.push(Value::Integer(i64::from(completed)));
        }

        if let Some(ref search) = self.search {
            conditions.push("(title LIKE ? OR description LIKE ?)");
            let term = format!("%{}%", search);
            params.push(Value::Text(term.clone()));
            params.push(Value::Text(term));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM tasks{}", where_clause);

        let data_sql = format!(
            "SELECT {} FROM tasks{} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            TASK_COLUMNS,
            where_clause,
            self.sort_by.column(),
            self.sort_order.as_sql(),
        );

        let mut data_params = params.clone();
        data_params.push(Value::Integer(to_sql_int(self.limit)));
        data_params.push(Value::Integer(to_sql_int(self.offset())));

        BuiltQuery {
            count_sql,
            count_params: params,
            data_sql,
            data_params,
        }
    }
}

/// SQL text plus positional parameters for one listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub count_sql: String,
    pub count_params: Vec<Value>,
    pub data_sql: String,
    /// Filter parameters followed by limit, then offset.
    pub data_params: Vec<Value>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn to_sql_int(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
