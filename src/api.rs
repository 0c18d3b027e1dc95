//! HTTP client for the remote task service.
//!
//! The service exposes CRUD over tasks at a configurable base address:
//! GET `/` lists, POST `/` creates, PATCH `/:id` renames, PUT `/:id` marks
//! done, DELETE `/:id` removes. Non-2xx responses are failures regardless
//! of payload, and mutation response bodies are never trusted; callers
//! re-fetch the collection instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::task::Task;

// Fixed failure-message fragments, one per operation.
const LOAD: &str = "load tasks";
const ADD: &str = "add task";
const UPDATE: &str = "update task";
const COMPLETE: &str = "mark task as done";
const DELETE: &str = "delete task";

/// Client for one deployment of the task service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client for the given base URL.
    ///
    /// The timeout is a transport-level cap on each request; there is no
    /// retry or backoff above it.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        if base.is_empty() {
            return Err(Error::InvalidConfig("api base URL is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                Error::InvalidConfig(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.base, id)
    }

    /// GET the full task collection.
    pub async fn fetch_all(&self) -> Result<Vec<Task>> {
        debug!(url = %self.base, "fetching task collection");
        let response = self
            .http
            .get(&self.base)
            .send()
            .await
            .map_err(|source| Error::Http {
                action: LOAD,
                source,
            })?;
        let response = check_status(response, LOAD)?;

        let list: ListResponse = response.json().await.map_err(|source| Error::Http {
            action: LOAD,
            source,
        })?;
        Ok(list.into_tasks())
    }

    /// POST a new task.
    pub async fn create(&self, text: &str) -> Result<()> {
        debug!(url = %self.base, "creating task");
        let response = self
            .http
            .post(&self.base)
            .json(&TextBody { text })
            .send()
            .await
            .map_err(|source| Error::Http {
                action: ADD,
                source,
            })?;
        check_status(response, ADD)?;
        Ok(())
    }

    /// PATCH a task's text.
    pub async fn rename(&self, id: u64, text: &str) -> Result<()> {
        debug!(id, "renaming task");
        let response = self
            .http
            .patch(self.item_url(id))
            .json(&TextBody { text })
            .send()
            .await
            .map_err(|source| Error::Http {
                action: UPDATE,
                source,
            })?;
        check_status(response, UPDATE)?;
        Ok(())
    }

    /// PUT to mark a task done. No body.
    pub async fn complete(&self, id: u64) -> Result<()> {
        debug!(id, "marking task done");
        let response = self
            .http
            .put(self.item_url(id))
            .send()
            .await
            .map_err(|source| Error::Http {
                action: COMPLETE,
                source,
            })?;
        check_status(response, COMPLETE)?;
        Ok(())
    }

    /// DELETE a task.
    pub async fn delete(&self, id: u64) -> Result<()> {
        debug!(id, "deleting task");
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(|source| Error::Http {
                action: DELETE,
                source,
            })?;
        check_status(response, DELETE)?;
        Ok(())
    }
}

fn check_status(response: reqwest::Response, action: &'static str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Api {
            action,
            status: status.as_u16(),
        })
    }
}

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

/// The list endpoint answers with either a bare array or `{data: [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Wrapped { data: Vec<Task> },
    Bare(Vec<Task>),
}

impl ListResponse {
    fn into_tasks(self) -> Vec<Task> {
        match self {
            ListResponse::Wrapped { data } => data,
            ListResponse::Bare(tasks) => tasks,
        }
    }
}
