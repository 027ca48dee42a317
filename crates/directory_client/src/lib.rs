use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Employee, EmployeeId},
    protocol::{employee_route, employees_route, EmployeeDraft},
};
use tracing::{debug, warn};

pub mod config;
pub mod directory;
pub mod error;
pub mod form;
pub mod format;
pub mod validation;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use directory::Directory;
pub use error::{ClientError, ClientResult};
pub use form::{EmployeeForm, FormMode, FormPhase, SubmitOutcome, SubmitRequest};
pub use validation::{FieldErrors, FormField, FormValues};

/// CRUD operations against the `employees` resource.
///
/// Every call maps to exactly one HTTP request; failures are returned to the
/// caller immediately and never retried.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Employee>>;
    async fn get(&self, id: EmployeeId) -> ClientResult<Employee>;
    async fn create(&self, draft: &EmployeeDraft) -> ClientResult<Employee>;
    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> ClientResult<Employee>;
    async fn delete(&self, id: EmployeeId) -> ClientResult<()>;
}

pub struct HttpEmployeeApi {
    http: Client,
    base_url: String,
}

impl HttpEmployeeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let base_url = config::prepare_base_url(&settings.api_base_url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> ClientResult<Response> {
        debug!(method, url, "sending employees request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = ClientError::from_transport(&err);
                warn!(method, url, error = %err, "employees request failed");
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = ClientError::from_response(status, &body);
        warn!(method, url, status = status.as_u16(), error = %err, "employees request failed");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = response
            .bytes()
            .await
            .map_err(|err| ClientError::from_transport(&err))?;
        serde_json::from_slice(&body).map_err(|err| ClientError::Decode {
            message: format!("invalid response payload: {err}"),
        })
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        let url = self.url(employees_route());
        let response = self.send("GET", &url, self.http.get(&url)).await?;
        Self::decode(response).await
    }

    async fn get(&self, id: EmployeeId) -> ClientResult<Employee> {
        let url = self.url(&employee_route(id));
        let response = self.send("GET", &url, self.http.get(&url)).await?;
        Self::decode(response).await
    }

    async fn create(&self, draft: &EmployeeDraft) -> ClientResult<Employee> {
        let url = self.url(employees_route());
        let response = self
            .send("POST", &url, self.http.post(&url).json(draft))
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> ClientResult<Employee> {
        let url = self.url(&employee_route(id));
        let response = self
            .send("PUT", &url, self.http.put(&url).json(draft))
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: EmployeeId) -> ClientResult<()> {
        let url = self.url(&employee_route(id));
        self.send("DELETE", &url, self.http.delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
