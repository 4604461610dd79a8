//! HTTP client for the task API.
//!
//! Serializes [`TaskFilters`] into a query string, calls the listing
//! endpoint and normalizes either response shape (a bare list or a
//! `{data, pagination}` envelope) into a [`TaskPage`].

use crate::pagination::Pagination;
use crate::types::{DeleteResponse, NewTask, Priority, SortField, SortOrder, Task, TaskPage};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to fetch tasks")]
    FetchFailed,
    #[error("failed to create task")]
    CreateFailed,
    #[error("failed to delete task")]
    DeleteFailed,
    #[error("failed to toggle task")]
    ToggleFailed,
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Typed listing filters. `None` fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl TaskFilters {
    /// Key/value pairs for every present filter, in wire order and naming.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(p) = self.priority {
            pairs.push(("priority", p.as_str().to_string()));
        }
        if let Some(ref c) = self.category {
            pairs.push(("category", c.clone()));
        }
        if let Some(c) = self.completed {
            pairs.push(("completed", c.to_string()));
        }
        if let Some(ref s) = self.search {
            pairs.push(("search", s.clone()));
        }
        if let Some(p) = self.page {
            pairs.push(("page", p.to_string()));
        }
        if let Some(l) = self.limit {
            pairs.push(("limit", l.to_string()));
        }
        if let Some(s) = self.sort_by {
            pairs.push(("sortBy", s.column().to_string()));
        }
        if let Some(o) = self.sort_order {
            pairs.push(("sortOrder", o.as_str().to_string()));
        }
        pairs
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Either response shape the listing endpoint may produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Bare(Vec<Task>),
    Envelope(TaskPage),
}

impl ListResponse {
    fn into_page(self) -> TaskPage {
        match self {
            ListResponse::Bare(data) => {
                let pagination = Pagination::single_page(data.len());
                TaskPage { data, pagination }
            }
            ListResponse::Envelope(page) => page,
        }
    }
}

/// Client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for TaskClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl TaskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    /// Listing URL; the bare collection URL when no filter is set.
    pub fn list_url(&self, filters: &TaskFilters) -> String {
        let query = filters.to_query_string();
        if query.is_empty() {
            self.tasks_url()
        } else {
            format!("{}?{}", self.tasks_url(), query)
        }
    }

    /// Fetch a page of tasks, discarding pagination metadata.
    pub async fn fetch_tasks(&self, filters: &TaskFilters) -> Result<Vec<Task>, ClientError> {
        Ok(self.fetch_tasks_with_meta(filters).await?.data)
    }

    /// Fetch a page of tasks with pagination metadata.
    ///
    /// A bare list response is presented as a single page holding every item.
    pub async fn fetch_tasks_with_meta(
        &self,
        filters: &TaskFilters,
    ) -> Result<TaskPage, ClientError> {
        let url = self.list_url(filters);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let body: ListResponse = read_json(response, ClientError::FetchFailed).await?;
        Ok(body.into_page())
    }

    /// Create a task and return the row the server stored.
    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let response = self.client.post(self.tasks_url()).json(task).send().await?;
        read_json(response, ClientError::CreateFailed).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<DeleteResponse, ClientError> {
        let url = format!("{}/{}", self.tasks_url(), id);
        let response = self.client.delete(url).send().await?;
        read_json(response, ClientError::DeleteFailed).await
    }

    pub async fn toggle_task(&self, id: i64) -> Result<Task, ClientError> {
        let url = format!("{}/{}/toggle", self.tasks_url(), id);
        let response = self.client.patch(url).send().await?;
        read_json(response, ClientError::ToggleFailed).await
    }
}

/// Decode a successful response; any non-2xx status maps to `on_status`
/// regardless of the body.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    on_status: ClientError,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        warn!("Task API returned {} for {}", status, response.url());
        return Err(on_status);
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_produce_bare_url() {
        let client = TaskClient::new("http://localhost:3000/api/");
        assert_eq!(
            client.list_url(&TaskFilters::default()),
            "http://localhost:3000/api/tasks"
        );
    }

    #[test]
    fn query_string_skips_absent_and_stringifies_present() {
        let filters = TaskFilters {
            priority: Some(Priority::High),
            completed: Some(false),
            page: Some(2),
            sort_by: Some(SortField::DueDate),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query_string(),
            "priority=high&completed=false&page=2&sortBy=due_date&sortOrder=asc"
        );
    }

    #[test]
    fn query_string_percent_encodes_values() {
        let filters = TaskFilters {
            search: Some("a&b c".to_string()),
            category: Some("home/garden".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query_string(),
            "category=home%2Fgarden&search=a%26b%20c"
        );
    }

    #[test]
    fn bare_list_becomes_single_page() {
        let raw = serde_json::json!([
            {"id": 1, "title": "a", "priority": "low", "category": "general",
             "completed": false, "created_at": "2024-01-01 00:00:00"},
            {"id": 2, "title": "b", "priority": "medium", "category": "general",
             "completed": 0, "created_at": "2024-01-01 00:00:00"},
            {"id": 3, "title": "c", "priority": "high", "category": "general",
             "completed": true, "created_at": "2024-01-01 00:00:00"}
        ]);
        let body: ListResponse = serde_json::from_value(raw).unwrap();
        let page = body.into_page();
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.pagination, Pagination::single_page(3));
    }

    #[test]
    fn envelope_passes_through() {
        let raw = serde_json::json!({
            "data": [],
            "pagination": {
                "currentPage": 4, "totalPages": 3, "totalItems": 25,
                "itemsPerPage": 10, "hasNextPage": false, "hasPreviousPage": true
            }
        });
        let body: ListResponse = serde_json::from_value(raw).unwrap();
        let page = body.into_page();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.current_page, 4);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_items, 25);
    }

    #[test]
    fn error_messages_are_generic_per_operation() {
        assert_eq!(ClientError::FetchFailed.to_string(), "failed to fetch tasks");
        assert_eq!(ClientError::CreateFailed.to_string(), "failed to create task");
        assert_eq!(ClientError::DeleteFailed.to_string(), "failed to delete task");
    }
}
