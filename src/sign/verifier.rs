//! Response signature verification with RSA PKCS#1 v1.5.

use tracing::{debug, instrument, warn};

use crate::cert::TrustedCertificate;
use crate::error::{Result, SignError};
use crate::sign::SignatureScheme;

/// Verifies gateway response signatures against a trusted certificate.
///
/// A mismatching signature is a normal negative result (`Ok(false)`), not a
/// fault; `Err` is reserved for structurally invalid input such as a
/// malformed base64 signature or a message that cannot be transcoded.
///
/// # Examples
///
/// ```no_run
/// use paygate_sign::cert::TrustedCertificate;
/// use paygate_sign::sign::{ResponseVerifier, SignatureScheme};
///
/// # fn example() -> paygate_sign::error::Result<()> {
/// let certificate = TrustedCertificate::from_file("trust_pay.cer")?;
/// let verifier = ResponseVerifier::new(certificate, SignatureScheme::trustpay());
///
/// let authentic = verifier.verify(b"response message", "c2lnbmF0dXJl")?;
/// if !authentic {
///     eprintln!("response signature mismatch");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResponseVerifier {
    certificate: TrustedCertificate,
    scheme: SignatureScheme,
}

impl ResponseVerifier {
    /// Creates a verifier from a trusted certificate and an integration
    /// scheme.
    #[must_use]
    pub fn new(certificate: TrustedCertificate, scheme: SignatureScheme) -> Self {
        Self { certificate, scheme }
    }

    /// The integration scheme this verifier was built with.
    #[must_use]
    pub const fn scheme(&self) -> &SignatureScheme {
        &self.scheme
    }

    /// Checks `signature_b64` against `message`.
    ///
    /// The message is transcoded per the scheme before hashing (one bank
    /// gateway signs the GBK encoding of its responses), then the digest is
    /// verified with PKCS#1 v1.5.
    ///
    /// Returns `Ok(true)` on a match and `Ok(false)` on a mismatch.
    ///
    /// # Errors
    ///
    /// - [`SignError::SignatureDecode`] if `signature_b64` is not valid
    ///   base64
    /// - [`SignError::Transcode`] if the message cannot be transcoded to
    ///   the scheme's charset
    #[instrument(skip(self, message, signature_b64), fields(message_len = message.len()))]
    pub fn verify(&self, message: &[u8], signature_b64: &str) -> Result<bool> {
        let signature = base64::Engine::decode(
            &base64::engine::general_purpose::STANDARD,
            signature_b64.trim(),
        )
        .map_err(|e| SignError::SignatureDecode(e.to_string()))?;

        let canonical = self.scheme.transcoding.apply(message)?;
        let digest = self.scheme.digest.digest(&canonical);

        match self.certificate.rsa_public_key().verify(
            self.scheme.digest.padding(),
            &digest,
            &signature,
        ) {
            Ok(()) => {
                debug!("response signature verified");
                Ok(true)
            }
            Err(err) => {
                warn!(%err, "response signature mismatch");
                Ok(false)
            }
        }
    }
}
