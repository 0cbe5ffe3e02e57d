//! The push session: discovery, credential handling, the per-file upload
//! loop, and summary output.

use std::io::Write;
use std::path::PathBuf;

use crate::broker::ScopedCredential;
use crate::client::{PushRequest, Uploader};
use crate::error::PushError;
use crate::report::{write_result, write_summary, Total};
use crate::source::SchemaStream;
use crate::types::{PushResult, Visibility};

/// Parameters of one push session.
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Directory (or single file) holding the schemas to publish.
    pub input: PathBuf,
    /// Registry root URL.
    pub registry: String,
    /// Master API key.
    pub apikey: String,
    pub visibility: Visibility,
    /// Mint a temporary write key before uploading (older registries).
    pub legacy: bool,
}

/// Run a full push session, writing result and summary lines to `out`.
///
/// Files are processed strictly in discovery order, one at a time; every
/// per-file problem becomes a reported result, so only discovery,
/// client-construction, credential-acquisition, and output errors
/// propagate. In legacy mode the temporary write key is released on every
/// path out of the upload loop, and a release failure is logged to stderr
/// without affecting the session's outcome.
///
/// # Errors
///
/// Returns the fatal `PushError` that aborted the session.
pub fn run(config: &PushConfig, out: &mut impl Write) -> Result<Total, PushError> {
    let stream = SchemaStream::discover(&config.input)?;
    let uploader = Uploader::new()?;

    let total = if config.legacy {
        let credential =
            ScopedCredential::acquire(uploader.client(), &config.registry, &config.apikey)?;
        let outcome = process(stream, &uploader, config, credential.key().to_string(), out);
        if let Err(e) = credential.release() {
            eprintln!("Warning: {}", e);
        }
        outcome?
    } else {
        process(stream, &uploader, config, config.apikey.clone(), out)?
    };

    write_summary(out, &total).map_err(|source| PushError::OutputError { source })?;
    Ok(total)
}

fn process(
    stream: SchemaStream,
    uploader: &Uploader,
    config: &PushConfig,
    apikey: String,
    out: &mut impl Write,
) -> Result<Total, PushError> {
    let mut total = Total::empty();

    for item in stream {
        let result = match item {
            Ok(schema) => {
                let request =
                    PushRequest::build(&config.registry, config.visibility, &schema, &apikey);
                uploader.execute(&request)
            }
            // Unparsable files never reach the network.
            Err(parse_error) => PushResult::failed(parse_error.to_string()),
        };

        write_result(out, &result).map_err(|source| PushError::OutputError { source })?;
        total = total.fold(result.status);
    }

    Ok(total)
}
