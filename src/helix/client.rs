//! Typed HTTP client for the Twitch Helix API.
//!
//! `HelixClient` owns the reqwest connection pool and attaches the
//! `Client-Id` and `Authorization` headers to every request. Endpoint
//! functions in [`super::api`] call the request helpers here with a relative
//! path, query pairs, and an optional JSON body.

use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::{HelixError, HelixResult};

/// Production Helix API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.twitch.tv/helix";

/// Query parameters as key/value pairs.
///
/// Pairs rather than a map so repeated keys (`id=1&id=2`) serialize the way
/// Helix expects.
pub type Query<'a> = [(&'a str, String)];

/// Resolved credential set for the Helix API.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// The standard Helix response envelope: `{"data": [...], ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,

    /// Total result count, present on a few paginated endpoints.
    #[serde(default)]
    pub total: Option<u64>,

    /// Subscriber points, only on the broadcaster subscriptions endpoint.
    #[serde(default)]
    pub points: Option<u64>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination cursor returned by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub cursor: Option<String>,
}

impl<T> DataEnvelope<T> {
    /// Take the first (and usually only) entry of the envelope.
    pub fn into_first(self) -> HelixResult<T> {
        self.data.into_iter().next().ok_or(HelixError::EmptyData)
    }
}

/// Shape of a Helix error body: `{"error": ..., "status": ..., "message": ...}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Shared handle to the Helix API.
///
/// Cheap to share behind an `Arc`; reqwest pools connections internally, so
/// concurrent in-flight requests are fine.
pub struct HelixClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl HelixClient {
    /// Create a client against the production API.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate base URL (mock server, tests).
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            base_url: base_url.into(),
        }
    }

    /// The client ID this handle authenticates with.
    pub fn client_id(&self) -> &str {
        &self.credentials.client_id
    }

    /// GET a JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> HelixResult<T> {
        let response = self.run(Method::GET, path, query, None).await?;
        Self::decode(response).await
    }

    /// GET where a 404 is a legitimate "absent" answer rather than a failure.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> HelixResult<Option<T>> {
        match self.run(Method::GET, path, query, None).await {
            Ok(response) => Ok(Some(Self::decode(response).await?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST with an optional JSON body, decoding a JSON response.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
        body: Option<Value>,
    ) -> HelixResult<T> {
        let response = self.run(Method::POST, path, query, body).await?;
        Self::decode(response).await
    }

    /// POST where the API answers 204 No Content.
    pub async fn post_no_content(
        &self,
        path: &str,
        query: &Query<'_>,
        body: Option<Value>,
    ) -> HelixResult<()> {
        self.run(Method::POST, path, query, body).await.map(|_| ())
    }

    /// PATCH with a JSON body, decoding a JSON response.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
        body: Value,
    ) -> HelixResult<T> {
        let response = self.run(Method::PATCH, path, query, Some(body)).await?;
        Self::decode(response).await
    }

    /// PATCH where the API answers 204 No Content.
    pub async fn patch_no_content(
        &self,
        path: &str,
        query: &Query<'_>,
        body: Value,
    ) -> HelixResult<()> {
        self.run(Method::PATCH, path, query, Some(body))
            .await
            .map(|_| ())
    }

    /// PUT with an optional JSON body, decoding a JSON response.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
        body: Option<Value>,
    ) -> HelixResult<T> {
        let response = self.run(Method::PUT, path, query, body).await?;
        Self::decode(response).await
    }

    /// PUT where the API answers 204 No Content.
    pub async fn put_no_content(
        &self,
        path: &str,
        query: &Query<'_>,
        body: Option<Value>,
    ) -> HelixResult<()> {
        self.run(Method::PUT, path, query, body).await.map(|_| ())
    }

    /// DELETE, ignoring any response body.
    pub async fn delete_no_content(&self, path: &str, query: &Query<'_>) -> HelixResult<()> {
        self.run(Method::DELETE, path, query, None).await.map(|_| ())
    }

    /// DELETE, decoding a JSON response.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> HelixResult<T> {
        let response = self.run(Method::DELETE, path, query, None).await?;
        Self::decode(response).await
    }

    /// Send one request and map non-success statuses to [`HelixError::Status`].
    async fn run(
        &self,
        method: Method,
        path: &str,
        query: &Query<'_>,
        body: Option<Value>,
    ) -> HelixResult<Response> {
        debug!(%method, path, "helix request");

        let mut builder = self
            .http
            .request(method, format!("{}/{}", self.base_url, path))
            .header("Client-Id", &self.credentials.client_id)
            .bearer_auth(&self.credentials.access_token);

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    /// Decode a success response body.
    async fn decode<T: DeserializeOwned>(response: Response) -> HelixResult<T> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Build a status error, preferring the message in the error body.
    async fn status_error(status: StatusCode, response: Response) -> HelixError {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        HelixError::status(status.as_u16(), message)
    }
}

impl std::fmt::Debug for HelixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelixClient")
            .field("base_url", &self.base_url)
            .field("client_id", &self.credentials.client_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_credentials() -> Credentials {
        Credentials {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            access_token: "test-access-token".to_string(),
            refresh_token: "test-refresh-token".to_string(),
        }
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let debug_str = format!("{:?}", test_credentials());
        assert!(debug_str.contains("test-client-id"));
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("test-access-token"));
        assert!(!debug_str.contains("test-client-secret"));
    }

    #[test]
    fn test_envelope_into_first() {
        let envelope: DataEnvelope<String> =
            serde_json::from_str(r#"{"data": ["a", "b"]}"#).unwrap();
        assert_eq!(envelope.into_first().unwrap(), "a");

        let empty: DataEnvelope<String> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(matches!(empty.into_first(), Err(HelixError::EmptyData)));
    }

    #[test]
    fn test_envelope_optional_fields() {
        let envelope: DataEnvelope<u32> = serde_json::from_str(
            r#"{"data": [1], "total": 12, "pagination": {"cursor": "abc"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.total, Some(12));
        assert_eq!(envelope.pagination.unwrap().cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_client_debug_omits_tokens() {
        let client = HelixClient::new(test_credentials());
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains(DEFAULT_BASE_URL));
        assert!(!debug_str.contains("test-access-token"));
    }
}
