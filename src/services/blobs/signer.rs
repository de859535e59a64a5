//! Signed URL generation for artifact access.
//!
//! Reviewers open artifacts through time-limited links instead of holding
//! store credentials. A link is the artifact key plus an expiry timestamp,
//! authenticated with a keyed BLAKE3 hash under a signing credential obtained
//! from an external identity provider.
//!
//! Signing is credential-bound and relatively costly in a hosted deployment,
//! which is why the workflow memoizes results in the link cache.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::RwLock;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Characters escaped inside the key portion of a signed URL. `/` stays
/// literal so the hierarchical key shape survives.
const KEY_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#')
    .add(b'%')
    .add(b'&');

/// Domain separation for link signatures.
const SIGNING_CONTEXT: &str = "reviewd 2024 artifact link v1";

/// How long a credential issued by [`StaticKeyCredentials`] stays usable
/// before the signer re-acquires.
const STATIC_CREDENTIAL_LIFETIME_HOURS: i64 = 12;

/// A signing credential with an explicit expiry.
#[derive(Clone)]
pub struct SigningCredential {
    /// Identifier of the key, embedded in signed URLs for rotation.
    pub key_id: String,
    /// Secret key material.
    pub secret: Vec<u8>,
    /// Point after which this credential must not sign new links.
    pub expires_at: DateTime<Utc>,
}

impl SigningCredential {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Source of signing credentials.
///
/// Stands in for an external identity provider; the signer calls `acquire`
/// only when it holds no credential or the held one has expired.
pub trait CredentialSource: Send + Sync + 'static {
    /// Obtains a fresh signing credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity provider cannot issue one.
    fn acquire(&self) -> Result<SigningCredential>;
}

/// Credential source backed by a fixed local secret.
///
/// Issues time-boxed credentials derived from one long-lived key, so the
/// refresh path is exercised even without a real identity provider.
pub struct StaticKeyCredentials {
    key_id: String,
    secret: Vec<u8>,
}

impl StaticKeyCredentials {
    pub fn new(key_id: impl Into<String>, secret: Vec<u8>) -> Self {
        Self {
            key_id: key_id.into(),
            secret,
        }
    }
}

impl CredentialSource for StaticKeyCredentials {
    fn acquire(&self) -> Result<SigningCredential> {
        if self.secret.is_empty() {
            bail!("signing secret is empty");
        }
        Ok(SigningCredential {
            key_id: self.key_id.clone(),
            secret: self.secret.clone(),
            expires_at: Utc::now() + ChronoDuration::hours(STATIC_CREDENTIAL_LIFETIME_HOURS),
        })
    }
}

/// Mints and verifies time-limited signed artifact URLs.
///
/// `UrlSigner` is shared across requests behind an `Arc`; the credential is
/// cached under a lock and refreshed on demand when it expires.
pub struct UrlSigner {
    host: String,
    source: Arc<dyn CredentialSource>,
    current: RwLock<Option<SigningCredential>>,
    issued: AtomicU64,
}

impl UrlSigner {
    pub fn new(host: impl Into<String>, source: Arc<dyn CredentialSource>) -> Self {
        Self {
            host: host.into(),
            source,
            current: RwLock::new(None),
            issued: AtomicU64::new(0),
        }
    }

    /// Returns a valid credential, refreshing from the source if the cached
    /// one is absent or expired.
    fn credential(&self) -> Result<SigningCredential> {
        {
            let guard = self.current.read();
            if let Some(credential) = guard.as_ref()
                && !credential.is_expired()
            {
                return Ok(credential.clone());
            }
        }

        let mut guard = self.current.write();
        // Another request may have refreshed while we waited for the lock
        if let Some(credential) = guard.as_ref()
            && !credential.is_expired()
        {
            return Ok(credential.clone());
        }

        debug!("Refreshing signing credential");
        let credential = self
            .source
            .acquire()
            .context("Failed to acquire signing credential")?;
        *guard = Some(credential.clone());
        Ok(credential)
    }

    /// Signs a time-limited access URL for an artifact key.
    ///
    /// # Errors
    ///
    /// Returns an error if no signing credential can be obtained or the
    /// validity window is unrepresentable.
    pub fn sign(&self, key: &str, validity: Duration) -> Result<String> {
        let credential = self.credential()?;

        let validity =
            ChronoDuration::from_std(validity).context("Validity window out of range")?;
        let expires = (Utc::now() + validity).timestamp();

        let sig = hex::encode(signature(&credential.secret, key, expires));
        let encoded_key = utf8_percent_encode(key, KEY_ENCODE);

        self.issued.fetch_add(1, Ordering::Relaxed);
        debug!(key, expires, "Signed artifact URL");

        Ok(format!(
            "https://{}/artifacts/{}?expires={}&sig={}&kid={}",
            self.host, encoded_key, expires, sig, credential.key_id
        ))
    }

    /// Verifies a signature produced by [`sign`](Self::sign).
    ///
    /// Returns `Ok(false)` for expired or tampered links; the comparison is
    /// constant-time.
    ///
    /// # Errors
    ///
    /// Returns an error if no signing credential can be obtained.
    pub fn verify(&self, key: &str, expires: i64, sig_hex: &str) -> Result<bool> {
        if Utc::now().timestamp() >= expires {
            return Ok(false);
        }

        let credential = self.credential()?;
        let expected = signature(&credential.secret, key, expires);

        let Ok(provided) = hex::decode(sig_hex) else {
            return Ok(false);
        };

        Ok(expected.ct_eq(provided.as_slice()).into())
    }

    /// Number of URLs signed since startup. Cached listings keep this flat;
    /// every cache miss moves it.
    pub fn issued_count(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

/// Keyed hash over the artifact key and expiry timestamp.
fn signature(secret: &[u8], key: &str, expires: i64) -> [u8; 32] {
    let mac_key = blake3::derive_key(SIGNING_CONTEXT, secret);
    *blake3::keyed_hash(&mac_key, format!("{key}\n{expires}").as_bytes()).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signer() -> UrlSigner {
        UrlSigner::new(
            "files.example.com",
            Arc::new(StaticKeyCredentials::new("k1", b"test secret".to_vec())),
        )
    }

    #[test]
    fn signed_url_carries_key_expiry_and_signature() {
        let signer = test_signer();
        let url = signer
            .sign("processed/inv 1.pdf", Duration::from_secs(3600))
            .unwrap();

        assert!(url.starts_with("https://files.example.com/artifacts/processed/inv%201.pdf?"));
        assert!(url.contains("expires="));
        assert!(url.contains("sig="));
        assert!(url.contains("kid=k1"));
        assert_eq!(signer.issued_count(), 1);
    }

    #[test]
    fn verify_accepts_valid_signature() {
        let signer = test_signer();
        let expires = (Utc::now() + ChronoDuration::hours(1)).timestamp();
        let sig = hex::encode(signature(b"test secret", "processed/inv-1.pdf", expires));

        assert!(signer.verify("processed/inv-1.pdf", expires, &sig).unwrap());
    }

    #[test]
    fn verify_rejects_expired() {
        let signer = test_signer();
        let expires = (Utc::now() - ChronoDuration::hours(1)).timestamp();
        let sig = hex::encode(signature(b"test secret", "processed/inv-1.pdf", expires));

        assert!(!signer.verify("processed/inv-1.pdf", expires, &sig).unwrap());
    }

    #[test]
    fn verify_rejects_tampered_key_and_garbage_sig() {
        let signer = test_signer();
        let expires = (Utc::now() + ChronoDuration::hours(1)).timestamp();
        let sig = hex::encode(signature(b"test secret", "processed/inv-1.pdf", expires));

        assert!(!signer.verify("processed/other.pdf", expires, &sig).unwrap());
        assert!(!signer.verify("processed/inv-1.pdf", expires, "zz-not-hex").unwrap());
    }

    #[test]
    fn empty_secret_fails_signing() {
        let signer = UrlSigner::new(
            "files.example.com",
            Arc::new(StaticKeyCredentials::new("k1", Vec::new())),
        );
        assert!(signer.sign("processed/inv-1.pdf", Duration::from_secs(60)).is_err());
    }
}
