//! Schema registry push pipeline.
//!
//! Publishes self-describing JSON Schema documents to a schema registry:
//! discovers `.json` files under an input directory, optionally mints a
//! temporary write-scoped key (legacy registries), uploads each schema,
//! classifies the server's answer, and aggregates the outcomes into a
//! session total and exit code.
//!
//! # Example
//!
//! ```
//! use schema_push::{classify, Status, Total};
//!
//! // A 2xx body mentioning "updated" classifies as an update; anything
//! // else that parses is a create.
//! let result = classify(true, r#"{"message":"Schema com.acme/click updated"}"#.into());
//! assert_eq!(result.status, Status::Updated);
//!
//! let total = Total::empty().fold(result.status).fold(Status::Created);
//! assert_eq!(total.processed(), 2);
//! assert_eq!(total.exit_code(), 0);
//! ```
//!
//! # Outcome classification
//!
//! | Response | Status |
//! |----------|--------|
//! | transport failure | `Failed` |
//! | non-2xx | `Failed` (body kept verbatim) |
//! | 2xx, unparsable body | `Unknown` |
//! | 2xx, message contains `"updated"` | `Updated` |
//! | 2xx, otherwise | `Created` |
//!
//! The session exit code is 1 if any result was `Failed` or `Unknown`,
//! else 0. Fatal errors (unreadable input tree, credential acquisition)
//! abort the session with their own nonzero codes.

mod broker;
mod client;
mod error;
mod pipeline;
mod report;
mod source;
mod types;

pub use broker::ScopedCredential;
pub use client::{classify, PushRequest, Uploader};
pub use error::{ParseError, PushError};
pub use pipeline::{run, PushConfig};
pub use report::{write_result, write_summary, Total};
pub use source::{parse_schema_file, SchemaFile, SchemaStream};
pub use types::{Message, PushResult, SchemaKey, ServerMessage, Status, Visibility};
