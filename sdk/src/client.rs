//! HTTP client for the `/vms` resource.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::{NewVirtualMachine, VirtualMachine};

#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: String,
}

/// Client for the fakecloud service.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
    credentials: Option<Credentials>,
}

impl Client {
    /// Create a client for the service at `base_url`, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Create a client that sends HTTP basic credentials with every request.
    pub fn with_credentials(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut client = Self::new(base_url);
        client.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        client
    }

    /// Create a client on top of a caller-configured `reqwest::Client`.
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            credentials: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /vms`; the returned record carries the server-assigned id.
    #[instrument(skip(self))]
    pub async fn create_vm(&self, vm: &NewVirtualMachine) -> Result<VirtualMachine> {
        let request = self.request(Method::POST, "/vms").json(vm);
        let response = self.send(request, StatusCode::CREATED).await?;
        decode(response).await
    }

    /// `GET /vms`
    #[instrument(skip(self))]
    pub async fn list_vms(&self) -> Result<Vec<VirtualMachine>> {
        let request = self.request(Method::GET, "/vms");
        let response = self.send(request, StatusCode::OK).await?;
        decode(response).await
    }

    /// `GET /vms/{id}`; a missing record surfaces as a 404 [`Error::UnexpectedStatus`].
    #[instrument(skip(self))]
    pub async fn get_vm(&self, id: i64) -> Result<VirtualMachine> {
        let request = self.request(Method::GET, &format!("/vms/{id}"));
        let response = self.send(request, StatusCode::OK).await?;
        decode(response).await
    }

    /// `PUT /vms/{id}`
    ///
    /// The service does not check that `id` exists. Updating an unknown id
    /// returns `Ok` with a record that was never stored.
    #[instrument(skip(self))]
    pub async fn update_vm(&self, id: i64, vm: &NewVirtualMachine) -> Result<VirtualMachine> {
        let request = self.request(Method::PUT, &format!("/vms/{id}")).json(vm);
        let response = self.send(request, StatusCode::OK).await?;
        decode(response).await
    }

    /// `DELETE /vms/{id}`; succeeds whether or not the record existed.
    #[instrument(skip(self))]
    pub async fn delete_vm(&self, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/vms/{id}"));
        self.send(request, StatusCode::OK).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, expected: StatusCode) -> Result<Response> {
        let response = request.send().await.map_err(Error::Transport)?;
        let status = response.status();
        debug!(%status, "Received response");

        if status != expected {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read response body: {e}"));
            return Err(Error::UnexpectedStatus { status, body });
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(Error::Decode)
}
