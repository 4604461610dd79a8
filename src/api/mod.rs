//! HTTP API module.
//!
//! Serves the task list/create/delete/toggle endpoints under `/api`.

mod server;

pub use server::{ApiServer, build_router, start_server};
