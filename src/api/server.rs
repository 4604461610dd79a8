//! axum-based HTTP server exposing the task endpoints.

use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::{IntoResponse, Json},
    routing::{delete, get, patch},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::db::Database;
use crate::db::query::{ListParams, TaskQuery};
use crate::error::{ApiError, ApiResult};
use crate::types::{DeleteResponse, NewTask, Task, TaskPage};

/// Server state shared across handlers.
#[derive(Clone)]
pub struct ApiServer {
    db: Arc<Database>,
}

impl ApiServer {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn db(&self) -> &Arc<Database> {
        &self.db
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/tasks`: one filtered, sorted page plus pagination metadata.
///
/// The query string is taken as raw pairs so that repeated or malformed
/// keys never reject the request.
async fn list_tasks(
    State(state): State<ApiServer>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<TaskPage>> {
    let Query(pairs) = pairs?;
    let query = TaskQuery::from_params(&ListParams::from_pairs(pairs));
    debug!(?query, "Listing tasks");
    let page = state.db().list_tasks(&query)?;
    Ok(Json(page))
}

/// `POST /api/tasks`: insert and return the stored row.
async fn create_task(
    State(state): State<ApiServer>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(new_task) = body?;
    if new_task.title.trim().is_empty() {
        return Err(ApiError::invalid_value("title", "title must not be blank"));
    }

    let task = state.db().create_task(new_task)?;
    info!(task_id = task.id, "Task created");
    Ok(Json(task))
}

/// `DELETE /api/tasks/{id}`: acknowledged whether or not the row existed.
async fn delete_task(
    State(state): State<ApiServer>,
    task_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(task_id) = task_id?;
    let removed = state.db().delete_task(task_id)?;
    if removed {
        info!(task_id, "Task deleted");
    } else {
        debug!(task_id, "Delete requested for unknown task");
    }
    Ok(Json(DeleteResponse { success: true }))
}

/// `PATCH /api/tasks/{id}/toggle`: flip completion.
async fn toggle_task(
    State(state): State<ApiServer>,
    task_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Task>> {
    let Path(task_id) = task_id?;
    let task = state
        .db()
        .toggle_task(task_id)?
        .ok_or_else(|| ApiError::task_not_found(task_id))?;
    info!(task_id, completed = task.completed, "Task toggled");
    Ok(Json(task))
}

/// Build the router with all routes.
pub fn build_router(state: ApiServer) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{task_id}", delete(delete_task))
        .route("/tasks/{task_id}/toggle", patch(toggle_task))
        .route("/health", get(health));

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server on `addr`.
///
/// Returns a oneshot sender that triggers graceful shutdown, and the address
/// actually bound (port 0 picks an ephemeral port).
pub async fn start_server(
    db: Arc<Database>,
    addr: SocketAddr,
) -> anyhow::Result<(oneshot::Sender<()>, SocketAddr)> {
    let app = build_router(ApiServer::new(db));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Task API listening on http://{}/api", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Task API shutting down");
            })
            .await
        {
            tracing::error!("Task API server error: {}", e);
        }
    });

    Ok((shutdown_tx, bound_addr))
}
