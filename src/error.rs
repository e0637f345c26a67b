//! Error types for payment-gateway signing operations.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`]. The taxonomy is deliberately flat: every failure is
//! terminal for the enclosing operation; there is no retry and no partial
//! recovery.
//!
//! # Error Categories
//!
//! - **I/O** ([`SignError::Io`]): reading key stores or certificates from disk
//! - **Decoding** ([`SignError::KeyLoad`], [`SignError::CertificateDecode`],
//!   [`SignError::SignatureDecode`]): malformed PKCS#12/PEM/DER/base64 input
//! - **Type mismatch** ([`SignError::UnsupportedKeyType`]): non-RSA key material
//! - **Cryptographic** ([`SignError::Signing`]): the RSA operation itself failed
//!
//! A signature that simply does not match is NOT an error: verification
//! returns `Ok(false)` for a structurally valid but mismatching signature,
//! reserving `Err` for malformed input.

use thiserror::Error;

/// Result type alias for signing and verification operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, SignError>;

/// Errors that can occur while loading key material, canonicalizing a
/// message, signing a request, or verifying a response signature.
///
/// All variants include contextual information about what went wrong.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum SignError {
    /// Reading key or certificate material from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key material could not be decoded or decrypted.
    ///
    /// Common causes include a wrong PKCS#12 password, a truncated archive,
    /// or a PEM body that is neither PKCS#1 nor PKCS#8.
    #[error("key material could not be loaded: {0}")]
    KeyLoad(String),

    /// The key store or certificate holds a non-RSA key.
    ///
    /// The contained string is the algorithm OID that was found in place of
    /// `rsaEncryption`.
    #[error("unsupported key type: expected RSA, found {0}")]
    UnsupportedKeyType(String),

    /// The trusted certificate could not be decoded as PEM or DER X.509.
    #[error("certificate could not be decoded: {0}")]
    CertificateDecode(String),

    /// The claimed signature is not valid base64 (or is otherwise
    /// structurally unusable).
    ///
    /// This is distinct from a signature mismatch, which is a normal
    /// `Ok(false)` verification result.
    #[error("signature could not be decoded: {0}")]
    SignatureDecode(String),

    /// The message could not be serialized into its canonical form.
    #[error("message serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The message bytes could not be transcoded to the gateway's charset.
    ///
    /// Raised when the message is not valid UTF-8 or contains characters
    /// outside the target repertoire.
    #[error("message transcoding failed: {0}")]
    Transcode(String),

    /// The RSA signing operation failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The gateway configuration is invalid.
    #[error("invalid gateway configuration: {0}")]
    Config(String),
}
