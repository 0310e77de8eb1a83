//! Client for the Prisma Access egress address endpoint.

use std::fmt;

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use url::Url;

use crate::edl::RequestParameters;

use super::{ApiError, HttpClient, HttpError, HttpRequest};

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;

/// Header carrying the tenant API key.
pub const API_KEY_HEADER: &str = "header-api-key";

/// Production endpoint.
const PROD_ENDPOINT: &str = "https://api.prod.datapath.prismaaccess.com/getPrismaAccessIP/v2";

/// Alternative endpoint used by some Cloud Managed tenants.
const PROD6_ENDPOINT: &str = "https://api.prod6.datapath.prismaaccess.com/getPrismaAccessIP/v2";

/// Which endpoint to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `api.prod.datapath.prismaaccess.com`
    Prod,
    /// `api.prod6.datapath.prismaaccess.com`
    Prod6,
    /// Any other URL, e.g. from the config file.
    Custom(Url),
}

impl Endpoint {
    /// Returns the endpoint as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Prod => PROD_ENDPOINT,
            Self::Prod6 => PROD6_ENDPOINT,
            Self::Custom(url) => url.as_str(),
        }
    }

    /// Returns the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the text does not parse.
    pub fn url(&self) -> Result<Url, HttpError> {
        match self {
            Self::Custom(url) => Ok(url.clone()),
            Self::Prod | Self::Prod6 => {
                Url::parse(self.as_str()).map_err(|e| HttpError::InvalidUrl(e.to_string()))
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tenant API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key text.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Issues the single POST that retrieves the address list.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
#[derive(Debug)]
pub struct AddressApi<H> {
    client: H,
    endpoint: Endpoint,
    key: ApiKey,
}

impl<H: HttpClient> AddressApi<H> {
    /// Creates an API client.
    pub const fn new(client: H, endpoint: Endpoint, key: ApiKey) -> Self {
        Self {
            client,
            endpoint,
            key,
        }
    }

    /// Returns the configured endpoint.
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Builds the request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidKey`] if the key is not a valid header
    /// value, or [`ApiError::Http`] if the endpoint is not a valid URL.
    pub fn build_request(&self, params: &RequestParameters) -> Result<HttpRequest, ApiError> {
        let mut key =
            HeaderValue::from_str(self.key.expose()).map_err(|_| ApiError::InvalidKey)?;
        key.set_sensitive(true);

        Ok(HttpRequest::post(self.endpoint.url()?)
            .with_header(HeaderName::from_static(API_KEY_HEADER), key)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(params.to_json().into_bytes()))
    }

    /// Sends the request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on HTTP 401
    /// - [`ApiError::Status`] on any other non-2xx status
    /// - [`ApiError::Http`] if no response was received
    pub async fn fetch(&self, params: &RequestParameters) -> Result<Vec<u8>, ApiError> {
        let request = self.build_request(params)?;
        tracing::debug!("Requesting {} with {params}", self.endpoint);

        let response = self.client.request(request).await?;
        tracing::debug!("Received response: {}", response.body_lossy());

        if response.is_success() {
            return Ok(response.body);
        }

        let endpoint = self.endpoint.to_string();
        if response.status == http::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized { endpoint });
        }

        Err(ApiError::Status {
            status: response.status,
            endpoint,
            body: response.body_lossy(),
        })
    }
}
