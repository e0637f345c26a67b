//! Request signing and response verification.
//!
//! Every gateway integration in this crate follows the same pattern: a
//! canonical byte sequence is digested, the digest is signed with RSA
//! PKCS#1 v1.5, and the signature travels base64-encoded next to the
//! message. What varies per integration is captured by
//! [`SignatureScheme`]:
//!
//! - the digest algorithm ([`DigestAlgorithm::Sha1`] for the bank JSON
//!   gateway, [`DigestAlgorithm::Sha256`] for open-API gateways), and
//! - whether response bytes are transcoded to a legacy charset before
//!   hashing during verification ([`ResponseTranscoding`]).
//!
//! [`RequestSigner`] and [`ResponseVerifier`] are implemented once and
//! instantiated per integration with the matching scheme. Both are pure,
//! synchronous, single-attempt operations: no retries, no shared state.
//!
//! # Examples
//!
//! ```
//! use paygate_sign::sign::{DigestAlgorithm, SignatureScheme};
//!
//! let scheme = SignatureScheme::trustpay();
//! assert_eq!(scheme.digest.algorithm_label(), "SHA1withRSA");
//!
//! let scheme = SignatureScheme::open_api();
//! assert_eq!(scheme.digest.algorithm_label(), "SHA256withRSA");
//! ```

use std::borrow::Cow;

use rsa::Pkcs1v15Sign;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{Result, SignError};

mod signer;
mod verifier;

pub use signer::RequestSigner;
pub use verifier::ResponseVerifier;

#[cfg(test)]
mod tests;

/// Message digest computed over the canonical bytes before RSA signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-1, used by the bank JSON gateway (`SHA1withRSA`).
    Sha1,
    /// SHA-256, used by open-API gateways (`sign_type=RSA2`).
    Sha256,
}

impl DigestAlgorithm {
    /// The gateway-facing algorithm label carried in signed envelopes.
    #[must_use]
    pub const fn algorithm_label(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1withRSA",
            Self::Sha256 => "SHA256withRSA",
        }
    }

    /// Digests `message` with this algorithm.
    pub(crate) fn digest(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha1 => Sha1::digest(message).to_vec(),
            Self::Sha256 => Sha256::digest(message).to_vec(),
        }
    }

    /// PKCS#1 v1.5 padding parameterized with this digest's OID.
    pub(crate) fn padding(&self) -> Pkcs1v15Sign {
        match self {
            Self::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
            Self::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        }
    }
}

/// Charset transcoding applied to response bytes before hashing.
///
/// One bank gateway computes its response signature over the GBK encoding
/// of the message rather than the UTF-8 bytes on the wire. The transcoding
/// step is an explicit per-integration flag; it is never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseTranscoding {
    /// Hash the message bytes as received.
    #[default]
    None,
    /// Re-encode the UTF-8 message to GBK before hashing.
    Gbk,
}

impl ResponseTranscoding {
    /// Applies the transcoding to `message`.
    ///
    /// # Errors
    ///
    /// [`SignError::Transcode`] if the message is not valid UTF-8 or
    /// contains characters outside the GBK repertoire.
    pub(crate) fn apply<'a>(&self, message: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        match self {
            Self::None => Ok(Cow::Borrowed(message)),
            Self::Gbk => {
                let text = std::str::from_utf8(message).map_err(|e| {
                    SignError::Transcode(format!("message is not valid UTF-8: {e}"))
                })?;
                let (bytes, _, had_errors) = encoding_rs::GBK.encode(text);
                if had_errors {
                    return Err(SignError::Transcode(
                        "message contains characters outside the GBK repertoire".to_owned(),
                    ));
                }
                Ok(Cow::Owned(bytes.into_owned()))
            }
        }
    }
}

/// Per-integration signing parameters: digest algorithm plus response
/// transcoding.
///
/// Construct one of the presets for a known integration, or assemble a
/// custom scheme for a gateway with different choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureScheme {
    /// Digest computed over the canonical message bytes.
    pub digest: DigestAlgorithm,
    /// Transcoding applied to response bytes before hashing (verification
    /// path only; requests are always signed over the bytes as built).
    pub transcoding: ResponseTranscoding,
}

impl SignatureScheme {
    /// A scheme with the given digest and no response transcoding.
    #[must_use]
    pub const fn new(digest: DigestAlgorithm) -> Self {
        Self { digest, transcoding: ResponseTranscoding::None }
    }

    /// Sets the response transcoding.
    #[must_use]
    pub const fn with_transcoding(mut self, transcoding: ResponseTranscoding) -> Self {
        self.transcoding = transcoding;
        self
    }

    /// The bank JSON gateway: SHA-1 digest, responses hashed over their GBK
    /// encoding.
    #[must_use]
    pub const fn trustpay() -> Self {
        Self { digest: DigestAlgorithm::Sha1, transcoding: ResponseTranscoding::Gbk }
    }

    /// Open-API query-string gateways: SHA-256 digest, no transcoding.
    #[must_use]
    pub const fn open_api() -> Self {
        Self { digest: DigestAlgorithm::Sha256, transcoding: ResponseTranscoding::None }
    }
}
