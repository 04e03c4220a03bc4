use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use super::submit::NewSubmission;
use crate::problems::{Problem, SortKey, Status};

/// `Api` carries the server's own message (the body's `error` field) so
/// the views can show it inline; anything that never reached the server
/// is `Transport`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Proof of a successful admin login. Handed out by `verify_admin` and
/// passed explicitly into every admin operation; never cached on the
/// client itself.
#[derive(Clone)]
pub struct AdminCredential(String);

impl AdminCredential {
    fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminCredential(..)")
    }
}

/// Mirror of the GET /problems query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub sort_by: Option<SortKey>,
    pub limit: Option<u32>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_problems(&self, params: &ListParams) -> Result<Vec<Problem>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(search) = &params.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = params.status {
            query.push(("status", status.as_str().to_owned()));
        }
        if let Some(sort) = params.sort_by {
            query.push(("sortBy", sort.as_str().to_owned()));
        }
        if let Some(limit) = params.limit {
            query.push(("limit", limit.to_string()));
        }

        let response = self
            .http
            .get(format!("{}/problems", self.base_url))
            .query(&query)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn submit_problem(&self, submission: &NewSubmission) -> Result<Problem, ApiError> {
        let response = self
            .http
            .post(format!("{}/problems", self.base_url))
            .json(submission)
            .send()
            .await?;
        decode(response).await
    }

    /// Exchanges the password for a credential to thread through the
    /// admin operations below.
    pub async fn verify_admin(&self, password: &str) -> Result<AdminCredential, ApiError> {
        let response = self
            .http
            .post(format!("{}/admin/login", self.base_url))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(AdminCredential(password.to_owned()))
        } else {
            Err(api_error(response).await)
        }
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: Status,
        credential: &AdminCredential,
    ) -> Result<Problem, ApiError> {
        let response = self
            .http
            .patch(format!("{}/problems/{id}", self.base_url))
            .json(&serde_json::json!({
                "status": status.as_str(),
                "adminPassword": credential.secret(),
            }))
            .send()
            .await?;
        decode(response).await
    }

    /// Returns the deleted record's prior content, for the undo window.
    pub async fn delete_problem(
        &self,
        id: Uuid,
        credential: &AdminCredential,
    ) -> Result<Problem, ApiError> {
        let response = self
            .http
            .delete(format!("{}/problems/{id}", self.base_url))
            .json(&serde_json::json!({ "adminPassword": credential.secret() }))
            .send()
            .await?;
        let deleted: Deleted = decode(response).await?;
        Ok(deleted.problem)
    }

    /// One delete per record, in order. Not atomic: the first failure
    /// stops the sweep and whatever was already deleted stays deleted.
    /// Returns how many records went through.
    pub async fn clear_all(
        &self,
        problems: &[Problem],
        credential: &AdminCredential,
    ) -> Result<usize, ApiError> {
        let mut deleted = 0;
        for record in problems {
            self.delete_problem(record.id, credential).await?;
            deleted += 1;
        }
        Ok(deleted)
    }
}

#[derive(Deserialize)]
struct Deleted {
    problem: Problem,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("HTTP {status}"));
    ApiError::Api { status, message }
}
