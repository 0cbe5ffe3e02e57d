//! Temporary write-credential acquisition for legacy registries.
//!
//! Older registry versions refuse writes with a master key and require a
//! short-lived write-scoped key minted per session. The scoped key must be
//! revoked when the session ends, whatever the per-file outcomes were.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::PushError;

#[derive(Debug, Deserialize)]
struct KeygenResponse {
    write: String,
}

/// A write-scoped registry credential whose lifetime is one push session.
///
/// Acquired from the registry's keygen endpoint with the master key;
/// consumed by [`ScopedCredential::release`], so a session can revoke it
/// at most once by construction.
#[derive(Debug)]
pub struct ScopedCredential {
    client: Client,
    registry: String,
    master: String,
    write_key: String,
}

impl ScopedCredential {
    /// Mint a write-scoped key for `registry` using the master credential.
    ///
    /// # Errors
    ///
    /// Returns `PushError::CredentialAcquire` on transport failure, a
    /// non-2xx response, or an unparsable response body. Acquisition
    /// failure is fatal to the session.
    pub fn acquire(client: &Client, registry: &str, master: &str) -> Result<Self, PushError> {
        let url = keygen_url(registry);

        let response = client
            .post(&url)
            .bearer_auth(master)
            .json(&json!({ "vendorPrefix": "*" }))
            .send()
            .map_err(|e| PushError::CredentialAcquire {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| PushError::CredentialAcquire {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(PushError::CredentialAcquire {
                url,
                message: format!("{}: {}", status, body),
            });
        }

        let keys: KeygenResponse =
            serde_json::from_str(&body).map_err(|e| PushError::CredentialAcquire {
                url,
                message: format!("unexpected keygen response: {}", e),
            })?;

        Ok(ScopedCredential {
            client: client.clone(),
            registry: registry.to_string(),
            master: master.to_string(),
            write_key: keys.write,
        })
    }

    /// The write-scoped key, used for every upload in the session.
    pub fn key(&self) -> &str {
        &self.write_key
    }

    /// Revoke the write-scoped key, consuming the credential.
    ///
    /// # Errors
    ///
    /// Returns `PushError::CredentialRelease` if the revocation call fails;
    /// callers log this and keep the exit code already computed.
    pub fn release(self) -> Result<(), PushError> {
        let url = keygen_url(&self.registry);

        let response = self
            .client
            .delete(&url)
            .query(&[("key", self.write_key.as_str())])
            .bearer_auth(&self.master)
            .send()
            .map_err(|e| PushError::CredentialRelease {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PushError::CredentialRelease {
                message: format!("{}: {}", status, body),
            });
        }

        Ok(())
    }
}

fn keygen_url(registry: &str) -> String {
    format!("{}/api/auth/keygen", registry.trim_end_matches('/'))
}
