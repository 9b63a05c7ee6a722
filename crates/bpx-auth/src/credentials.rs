//! API credentials for Backpack Exchange
//!
//! Backpack authenticates private requests with an Ed25519 key pair. The
//! secret is a base64-encoded 32-byte seed, decoded once here into a signing
//! key; the public key is sent verbatim in the `X-API-Key` header.
//!
//! # Security
//!
//! The decoded seed only ever lives inside a `secrecy` box or a buffer that
//! is zeroized right after the signing key is derived, and `Debug` never
//! prints key material.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use secrecy::zeroize::Zeroize;
use secrecy::{ExposeSecret, SecretBox, SecretString};

use crate::error::{AuthError, AuthResult};

/// Environment variable holding the public key
pub const PUBLIC_KEY_ENV: &str = "BPX_PUBLIC_KEY";
/// Environment variable holding the base64 secret seed
pub const SECRET_KEY_ENV: &str = "BPX_SECRET_KEY";

/// API credentials for authenticated requests
#[derive(Clone)]
pub struct Credentials {
    /// Public key identifier, sent as-is
    api_key: String,
    /// Ed25519 signing key derived from the secret seed
    signing_key: SigningKey,
}

impl Credentials {
    /// Create new credentials from a public key and a base64 secret seed
    ///
    /// # Arguments
    /// * `api_key` - Your Backpack public key
    /// * `secret_key` - Your Backpack secret key (base64 encoded 32-byte seed)
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if the secret is not valid
    /// base64 or does not decode to exactly 32 bytes. This is the only place
    /// a malformed key can fail; signing itself is infallible.
    pub fn new(api_key: impl Into<String>, secret_key: impl AsRef<str>) -> AuthResult<Self> {
        let decoded = SecretBox::new(Box::new(BASE64.decode(secret_key.as_ref()).map_err(
            |e| AuthError::InvalidCredentials(format!("Invalid base64 secret key: {}", e)),
        )?));

        let bytes = decoded.expose_secret();
        let mut seed: [u8; SECRET_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            AuthError::InvalidCredentials(format!(
                "Secret key must decode to {} bytes, got {}",
                SECRET_KEY_LENGTH,
                bytes.len()
            ))
        })?;

        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();

        Ok(Self {
            api_key: api_key.into(),
            signing_key,
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BPX_PUBLIC_KEY` and `BPX_SECRET_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(PUBLIC_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(PUBLIC_KEY_ENV.to_string()))?;
        let secret_key = SecretString::from(
            std::env::var(SECRET_KEY_ENV)
                .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()))?,
        );

        Self::new(api_key, secret_key.expose_secret())
    }

    /// Get the public key identifier
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the verifying key matching the signing key
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a message and return the base64-encoded signature
    ///
    /// Ed25519 is deterministic: the same key and message always produce
    /// the same signature.
    pub fn sign(&self, message: &str) -> String {
        let signature = self.signing_key.sign(message.as_bytes());
        BASE64.encode(signature.to_bytes())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", self.api_key.chars().take(8).collect::<String>()),
            )
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
