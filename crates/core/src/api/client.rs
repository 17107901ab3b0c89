//! Typed client for the remote auth and task services
//!
//! A single `reqwest` client with a cookie jar; the session cookie issued by
//! the auth service rides along on every request. No request is retried and
//! no timeout is configured beyond the platform default.

use reqwest::Client;
use tracing::debug;

use crate::auth::{LoginRequest, RegisterRequest, User};
use crate::task::{Task, TaskDraft, TaskStatus};
use crate::Result;

use super::response::ApiResponse;

/// Fixed page size for task listings.
pub const PAGE_LIMIT: u32 = 50;

/// Client for the auth service (`/auth`) and task service (`/tasks`).
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at `base_url`, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .cookie_store(true)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
        }
    }

    /// Check whether the session cookie still identifies a user.
    pub async fn me(&self) -> Result<User> {
        let res = self
            .client
            .get(format!("{}/auth/me", self.base_url))
            .send()
            .await?;
        let body: ApiResponse<User> = res.json().await?;
        body.into_result()
    }

    /// Log in with email and password; the server sets the session cookie.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let res = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let body: ApiResponse<User> = res.json().await?;
        body.into_result()
    }

    /// Register a new account; on success the session cookie is set as well.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let res = self
            .client
            .post(format!("{}/auth/register", self.base_url))
            .json(&RegisterRequest {
                name,
                email,
                password,
            })
            .send()
            .await?;
        let body: ApiResponse<User> = res.json().await?;
        body.into_result()
    }

    /// Discard the server-side session. The response body is ignored.
    pub async fn logout(&self) -> Result<()> {
        self.client
            .post(format!("{}/auth/logout", self.base_url))
            .send()
            .await?;
        Ok(())
    }

    /// List up to [`PAGE_LIMIT`] tasks, optionally constrained by status.
    pub async fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let mut query: Vec<(&str, String)> = vec![("limit", PAGE_LIMIT.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        let res = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .query(&query)
            .send()
            .await?;
        let body: ApiResponse<Vec<Task>> = res.json().await?;
        body.into_result()
    }

    /// Create a new task from a form draft.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        debug!(title = %draft.title, "creating task");
        let res = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .json(draft)
            .send()
            .await?;
        let body: ApiResponse<Task> = res.json().await?;
        body.into_result()
    }

    /// Replace an existing task with the draft's fields.
    pub async fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task> {
        debug!(task = id, "updating task");
        let res = self
            .client
            .put(format!("{}/tasks/{}", self.base_url, id))
            .json(draft)
            .send()
            .await?;
        let body: ApiResponse<Task> = res.json().await?;
        body.into_result()
    }

    /// Delete a task. The response body is ignored; callers refetch the list
    /// regardless of the outcome.
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        debug!(task = id, "deleting task");
        self.client
            .delete(format!("{}/tasks/{}", self.base_url, id))
            .send()
            .await?;
        Ok(())
    }

    /// Ask the server to transition a task to completed.
    pub async fn complete_task(&self, id: i64) -> Result<()> {
        debug!(task = id, "completing task");
        self.client
            .patch(format!("{}/tasks/{}/complete", self.base_url, id))
            .send()
            .await?;
        Ok(())
    }
}
