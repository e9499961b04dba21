// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use projetos_app::{ApiError, NewProject, Project, ProjectId, ProjectUpdate};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REMOTE_USER: &str = "user.test";
pub const DEFAULT_REMOTE_GROUPS: &str = "TI,OUTROS";

/// Placeholder identity forwarded on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub remote_user: String,
    pub remote_groups: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            remote_user: DEFAULT_REMOTE_USER.to_owned(),
            remote_groups: DEFAULT_REMOTE_GROUPS.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    identity: Identity,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, identity: Identity, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url must use http or https, got {:?}",
                parsed.scheme()
            );
        }
        if identity.remote_user.trim().is_empty() {
            bail!("api.remote_user must not be empty");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            identity,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET /projetos`, bounded by `?limit=` when a limit is given.
    pub fn list_projects(&self, limit: Option<u32>) -> Result<Vec<Project>, ApiError> {
        let mut request = self.http.get(format!("{}/projetos", self.base_url));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = self.send("list projects", request)?;
        decode(response)
    }

    pub fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        let request = self
            .http
            .post(format!("{}/projetos/", self.base_url))
            .json(project);
        let response = self.send("create project", request)?;
        decode(response)
    }

    pub fn update_project(
        &self,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, ApiError> {
        let request = self
            .http
            .patch(format!("{}/projetos/{id}", self.base_url))
            .json(update);
        let response = self.send("update project", request)?;
        decode(response)
    }

    /// Only `204 No Content` counts as a completed delete.
    pub fn delete_project(&self, id: ProjectId) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(format!("{}/projetos/{id}", self.base_url));
        let response = self.send("delete project", request)?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        tracing::warn!(project_id = %id, status, "delete not confirmed");
        Err(ApiError::from_response(status, &body))
    }

    fn send(&self, action: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .header("remote-user", &self.identity.remote_user)
            .header("remote-groups", &self.identity.remote_groups)
            .send()
            .map_err(|error| {
                tracing::error!(action, base_url = %self.base_url, %error, "request failed");
                ApiError::Network {
                    message: error.to_string(),
                }
            })?;

        let status = response.status();
        tracing::debug!(action, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body);
        tracing::error!(action, status = status.as_u16(), %error, "request rejected");
        Err(error)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().map_err(|error| ApiError::Network {
        message: error.to_string(),
    })?;
    serde_json::from_str(&body).map_err(|error| {
        tracing::error!(%error, "decode response body");
        ApiError::Decode {
            message: error.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{Client, Identity};
    use std::time::Duration;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = Client::new(
            "http://localhost:8000/api//",
            Identity::default(),
            Duration::from_secs(1),
        )
        .expect("client");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for base in ["", "   ", "not a url", "ftp://example.com"] {
            assert!(
                Client::new(base, Identity::default(), Duration::from_secs(1)).is_err(),
                "{base:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_remote_user() {
        let identity = Identity {
            remote_user: " ".to_owned(),
            ..Identity::default()
        };
        let error = Client::new("http://localhost:8000", identity, Duration::from_secs(1))
            .expect_err("blank user");
        assert!(error.to_string().contains("remote_user"));
    }
}
