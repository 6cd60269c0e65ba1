//! HTTP adapters for the user and project services.

use crate::config::RemoteServiceConfig;
use crate::lookup::{
    domain::{ManagerDetails, ManagerPayload, ProjectDetails, ServiceResponse, UserDetails},
    ports::{LookupError, LookupResult, ProjectLookup, RemoteService, UserLookup},
    routes,
};
use crate::task::domain::{ProjectCode, Username};
use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde::de::DeserializeOwned;

/// GET client bound to one remote service.
///
/// Sends one request per call. No caching and no retries; the timeout is the
/// configured one or the `reqwest` default.
#[derive(Debug, Clone)]
pub struct RemoteServiceClient {
    service: RemoteService,
    http: reqwest::Client,
    base_url: String,
}

impl RemoteServiceClient {
    /// Builds a client for `service` from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidEndpoint`] when the base URL does not
    /// parse, and [`LookupError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn from_config(
        service: RemoteService,
        config: &RemoteServiceConfig,
    ) -> LookupResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| LookupError::transport(service, err))?;
        Self::with_http_client(service, http, &config.base_url)
    }

    /// Builds a client reusing an existing `reqwest` connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidEndpoint`] when `base_url` is not an
    /// absolute `http` or `https` URL.
    pub fn with_http_client(
        service: RemoteService,
        http: reqwest::Client,
        base_url: &str,
    ) -> LookupResult<Self> {
        let parsed = reqwest::Url::parse(base_url).map_err(|err| LookupError::InvalidEndpoint {
            service,
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LookupError::InvalidEndpoint {
                service,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            service,
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the service this client targets.
    #[must_use]
    pub const fn service(&self) -> RemoteService {
        self.service
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET for `path` and unwraps the response envelope.
    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> LookupResult<Option<T>> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(service = %self.service, %url, "sending lookup request");

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(service = %self.service, %url, error = %err, "lookup request failed");
                LookupError::transport(self.service, err)
            })?;

        read_envelope(self.service, response).await
    }
}

/// Maps a response to present, absent or error.
///
/// 404 is absence. Any other non-success status is an error. A success body
/// must be a [`ServiceResponse`] envelope.
async fn read_envelope<T: DeserializeOwned>(
    service: RemoteService,
    response: reqwest::Response,
) -> LookupResult<Option<T>> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        tracing::debug!(%service, "lookup target not found");
        return Ok(None);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::warn!(%service, status = status.as_u16(), "unexpected lookup status");
        return Err(LookupError::UnexpectedStatus {
            service,
            status: status.as_u16(),
            message,
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| LookupError::transport(service, err))?;
    let envelope: ServiceResponse<T> =
        serde_json::from_slice(&body).map_err(|err| LookupError::decode(service, err))?;
    Ok(envelope.into_data())
}

/// [`UserLookup`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserLookup {
    client: RemoteServiceClient,
}

impl HttpUserLookup {
    /// Wraps a client bound to the user service.
    #[must_use]
    pub const fn new(client: RemoteServiceClient) -> Self {
        Self { client }
    }

    /// Builds the lookup from configuration.
    ///
    /// # Errors
    ///
    /// See [`RemoteServiceClient::from_config`].
    pub fn from_config(config: &RemoteServiceConfig) -> LookupResult<Self> {
        RemoteServiceClient::from_config(RemoteService::User, config).map(Self::new)
    }
}

#[async_trait]
impl UserLookup for HttpUserLookup {
    async fn check_by_username(&self, username: &Username) -> LookupResult<Option<UserDetails>> {
        self.client
            .get_envelope(&routes::user_check_path(username))
            .await
    }
}

/// [`ProjectLookup`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProjectLookup {
    client: RemoteServiceClient,
}

impl HttpProjectLookup {
    /// Wraps a client bound to the project service.
    #[must_use]
    pub const fn new(client: RemoteServiceClient) -> Self {
        Self { client }
    }

    /// Builds the lookup from configuration.
    ///
    /// # Errors
    ///
    /// See [`RemoteServiceClient::from_config`].
    pub fn from_config(config: &RemoteServiceConfig) -> LookupResult<Self> {
        RemoteServiceClient::from_config(RemoteService::Project, config).map(Self::new)
    }
}

#[async_trait]
impl ProjectLookup for HttpProjectLookup {
    async fn check_by_project_code(
        &self,
        project_code: &ProjectCode,
    ) -> LookupResult<Option<ProjectDetails>> {
        self.client
            .get_envelope(&routes::project_check_path(project_code))
            .await
    }

    async fn get_manager_by_project(
        &self,
        project_code: &ProjectCode,
    ) -> LookupResult<Option<ManagerDetails>> {
        let payload: Option<ManagerPayload> = self
            .client
            .get_envelope(&routes::project_manager_path(project_code))
            .await?;
        Ok(payload.and_then(ManagerPayload::into_details))
    }
}
