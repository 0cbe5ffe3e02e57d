//! Upload request construction, execution, and response classification.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::PushError;
use crate::source::SchemaFile;
use crate::types::{Message, PushResult, ServerMessage, Status, Visibility};

/// Timeout for registry HTTP requests (30 seconds).
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully-built upload request. Pure value; building one has no side
/// effects and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    pub url: String,
    pub visibility: Visibility,
    pub body: String,
    pub apikey: String,
}

impl PushRequest {
    /// Build the upload request for one schema.
    ///
    /// The registry path is inferred from the schema's `self` envelope;
    /// visibility travels as the `isPublic` query parameter and the
    /// credential as a bearer authorization header.
    pub fn build(
        registry: &str,
        visibility: Visibility,
        schema: &SchemaFile,
        apikey: &str,
    ) -> PushRequest {
        let url = format!(
            "{}/api/schemas/{}",
            registry.trim_end_matches('/'),
            schema.key.registry_path()
        );
        PushRequest {
            url,
            visibility,
            body: schema.content.to_string(),
            apikey: apikey.to_string(),
        }
    }
}

/// Executes upload requests against the registry.
pub struct Uploader {
    client: Client,
}

impl Uploader {
    /// Create an uploader with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns `PushError::ClientError` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, PushError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|source| PushError::ClientError { source })?;
        Ok(Uploader { client })
    }

    /// Borrow the underlying HTTP client (shared with the credential broker).
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Execute one upload and classify the outcome.
    ///
    /// Never fails: transport errors, rejections, and unreadable bodies all
    /// come back as a classified `PushResult`.
    pub fn execute(&self, request: &PushRequest) -> PushResult {
        let response = self
            .client
            .post(&request.url)
            .query(&[("isPublic", request.visibility.query_value())])
            .bearer_auth(&request.apikey)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send();

        let response = match response {
            Ok(response) => response,
            Err(e) => return PushResult::failed(e.to_string()),
        };

        let success = response.status().is_success();
        let body = match response.text() {
            Ok(body) => body,
            Err(e) => return PushResult::failed(e.to_string()),
        };

        classify(success, body)
    }
}

/// Classify a response body into a push result.
///
/// Non-2xx bodies are preserved verbatim as failures. 2xx bodies that parse
/// as a [`ServerMessage`] are `Updated` when the message text contains the
/// substring `"updated"` and `Created` otherwise; the wording match is the
/// registry's contract, not a heuristic to strengthen. Unparsable 2xx bodies
/// are `Unknown`, never `Failed`.
pub fn classify(success: bool, body: String) -> PushResult {
    if !success {
        return PushResult {
            message: Message::Raw(body),
            status: Status::Failed,
        };
    }

    match serde_json::from_str::<ServerMessage>(&body) {
        Err(_) => PushResult {
            message: Message::Raw(body),
            status: Status::Unknown,
        },
        Ok(msg) => {
            let status = if msg.message.contains("updated") {
                Status::Updated
            } else {
                Status::Created
            };
            PushResult {
                message: Message::Server(msg),
                status,
            }
        }
    }
}
