/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use crate::application::config::Config;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONNECTION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

/// Blocking JSON transport to the gateway
///
/// Every call is a single round trip on a fresh connection: the request asks
/// for `Connection: close` and the pool keeps no idle connections. Nothing is
/// retried and nothing is cached.
pub struct HttpClient {
    http_client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpClient {
    /// Builds the transport for a resolved configuration
    ///
    /// # Errors
    /// [`AppError::Network`] if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls an operation that takes no arguments (bodyless `GET`)
    pub fn get(&self, operation: &str) -> Result<Value, AppError> {
        self.request(Method::GET, operation, None::<&()>)
    }

    /// Calls an operation with a JSON body (`POST`)
    pub fn post<B: Serialize>(&self, operation: &str, body: &B) -> Result<Value, AppError> {
        self.request(Method::POST, operation, Some(body))
    }

    fn request<B: Serialize>(
        &self,
        method: Method,
        operation: &str,
        body: Option<&B>,
    ) -> Result<Value, AppError> {
        let url = format!("{}/{}", self.base_url, operation.trim_start_matches('/'));
        let response = make_http_request(
            &self.http_client,
            method,
            &url,
            (&self.username, &self.password),
            body,
        )?;
        parse_response(response)
    }
}

/// Makes one HTTP request to the gateway
///
/// # Arguments
///
/// * `client` - The HTTP client to use for the request
/// * `method` - `GET` for bodyless calls, `POST` otherwise
/// * `url` - Full URL to request
/// * `credentials` - Basic auth user and password
/// * `body` - Optional request body (will be serialized to JSON)
///
/// # Returns
///
/// * `Ok(Response)` - Response with a success status
/// * `Err(AppError)` - Transport failure, or [`AppError::Http`] carrying the
///   status and raw body of a non-success response
pub fn make_http_request<B: Serialize>(
    client: &Client,
    method: Method,
    url: &str,
    credentials: (&str, &str),
    body: Option<&B>,
) -> Result<Response, AppError> {
    debug!("{} {}", method, url);

    let (username, password) = credentials;
    let mut request = client
        .request(method, url)
        .basic_auth(username, Some(password))
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .header(CONNECTION, "close");

    if let Some(b) = body {
        request = request.json(b);
    }

    let response = request.send()?;
    let status = response.status();
    debug!("Response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    error!("Request failed with status {}: {}", status, body);
    Err(AppError::Http { status, body })
}

fn parse_response(response: Response) -> Result<Value, AppError> {
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}
