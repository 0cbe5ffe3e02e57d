//! Core types for schema publishing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a self-describing schema, taken from its `self` envelope.
///
/// Renders as `vendor/name/format/version`, which is also the registry
/// path the schema is published under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaKey {
    pub vendor: String,
    pub name: String,
    pub format: String,
    pub version: String,
}

impl SchemaKey {
    /// Returns the registry path segment for this schema.
    pub fn registry_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.vendor, self.name, self.format, self.version
        )
    }
}

impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.registry_path())
    }
}

/// Visibility of a published schema on the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Readable only by keys scoped to the schema's vendor.
    #[default]
    Private,
    /// Readable without authentication.
    Public,
}

impl Visibility {
    /// Create visibility from a public flag (true = Public, false = Private).
    pub fn from_public_flag(is_public: bool) -> Self {
        if is_public {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    /// Returns the value for the `isPublic` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            Visibility::Public => "true",
            Visibility::Private => "false",
        }
    }
}

/// Structured message returned by the registry on a successful upload.
///
/// Non-2xx responses carry arbitrary text and never parse into this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Status code echoed by the server, if any.
    pub status: Option<u16>,
    pub message: String,
    /// Registry location of the schema, if reported.
    pub location: Option<String>,
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(location) = &self.location {
            write!(f, " at {}", location)?;
        }
        if let Some(status) = self.status {
            write!(f, " ({})", status)?;
        }
        Ok(())
    }
}

/// Classification of a single upload outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Schema already existed and was overwritten.
    Updated,
    /// Schema was created on the registry.
    Created,
    /// 2xx response whose body could not be understood.
    Unknown,
    /// Transport failure, server rejection, or unreadable input file.
    Failed,
}

impl Status {
    /// Returns true for outcomes reported as `SUCCESS:`.
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Updated | Status::Created)
    }
}

/// Payload of a push result: either the raw response body (or error text)
/// or the parsed server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Raw(String),
    Server(ServerMessage),
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Raw(text) => write!(f, "{}", text),
            Message::Server(msg) => write!(f, "{}", msg),
        }
    }
}

/// Outcome of publishing one schema file. Exactly one is produced per file,
/// including files that never reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResult {
    pub message: Message,
    pub status: Status,
}

impl PushResult {
    /// A failed result carrying an error description verbatim.
    pub fn failed(text: impl Into<String>) -> Self {
        PushResult {
            message: Message::Raw(text.into()),
            status: Status::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_key_registry_path() {
        let key = SchemaKey {
            vendor: "com.acme".into(),
            name: "click".into(),
            format: "jsonschema".into(),
            version: "1-0-0".into(),
        };
        assert_eq!(key.registry_path(), "com.acme/click/jsonschema/1-0-0");
        assert_eq!(key.to_string(), "com.acme/click/jsonschema/1-0-0");
    }

    #[test]
    fn visibility_from_public_flag() {
        assert_eq!(Visibility::from_public_flag(true), Visibility::Public);
        assert_eq!(Visibility::from_public_flag(false), Visibility::Private);
        assert_eq!(Visibility::Public.query_value(), "true");
        assert_eq!(Visibility::Private.query_value(), "false");
    }

    #[test]
    fn server_message_display_full() {
        let msg = ServerMessage {
            status: Some(200),
            message: "Schema updated".into(),
            location: Some("/api/schemas/com.acme/click/jsonschema/1-0-0".into()),
        };
        assert_eq!(
            msg.to_string(),
            "Schema updated at /api/schemas/com.acme/click/jsonschema/1-0-0 (200)"
        );
    }

    #[test]
    fn server_message_display_message_only() {
        let msg = ServerMessage {
            status: None,
            message: "Schema created".into(),
            location: None,
        };
        assert_eq!(msg.to_string(), "Schema created");
    }

    #[test]
    fn server_message_parses_without_optional_fields() {
        let msg: ServerMessage = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(msg.message, "ok");
        assert_eq!(msg.status, None);
        assert_eq!(msg.location, None);
    }

    #[test]
    fn status_success_split() {
        assert!(Status::Updated.is_success());
        assert!(Status::Created.is_success());
        assert!(!Status::Unknown.is_success());
        assert!(!Status::Failed.is_success());
    }

    #[test]
    fn raw_message_displays_verbatim() {
        let result = PushResult::failed("server error");
        assert_eq!(result.message.to_string(), "server error");
        assert_eq!(result.status, Status::Failed);
    }
}
