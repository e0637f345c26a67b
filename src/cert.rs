//! Trusted gateway certificates.
//!
//! Inbound gateway responses are verified against the RSA public key of a
//! counterparty X.509 certificate distributed out of band. The certificate
//! is decoded once per verifier and is immutable afterwards; PEM and raw
//! DER containers are auto-detected.

use std::fmt;
use std::path::Path;

use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use tracing::debug;
use x509_parser::pem::parse_x509_pem;
use x509_parser::prelude::{FromDer, X509Certificate};

use crate::error::{Result, SignError};

/// Dotted form of the `rsaEncryption` OID as it appears in a certificate's
/// subject public key info.
const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

/// A counterparty X.509 certificate holding the RSA public key used to
/// verify inbound response signatures.
#[derive(Clone)]
pub struct TrustedCertificate {
    public_key: RsaPublicKey,
}

impl fmt::Debug for TrustedCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustedCertificate").finish_non_exhaustive()
    }
}

impl TrustedCertificate {
    /// Decodes a certificate from PEM or raw DER bytes.
    ///
    /// PEM is attempted first; anything without a PEM header is treated as
    /// DER. The RSA public key is extracted from the certificate's subject
    /// public key info.
    ///
    /// # Errors
    ///
    /// - [`SignError::CertificateDecode`] if the bytes are neither a PEM nor
    ///   a DER X.509 certificate
    /// - [`SignError::UnsupportedKeyType`] if the certificate holds a
    ///   non-RSA public key
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let der = match parse_x509_pem(data) {
            Ok((_, pem)) => pem.contents,
            Err(_) => data.to_vec(),
        };

        let (_, certificate) = X509Certificate::from_der(&der)
            .map_err(|e| SignError::CertificateDecode(format!("X.509 parse failed: {e:?}")))?;

        let spki = certificate.public_key();
        let algorithm = spki.algorithm.algorithm.to_id_string();
        if algorithm != RSA_ENCRYPTION_OID {
            return Err(SignError::UnsupportedKeyType(algorithm));
        }

        let public_key = RsaPublicKey::from_public_key_der(spki.raw)
            .map_err(|e| SignError::CertificateDecode(format!("RSA public key decode failed: {e}")))?;

        debug!(subject = %certificate.subject(), "decoded trusted certificate");
        Ok(Self { public_key })
    }

    /// Reads a certificate from `path` (PEM or DER) and decodes it.
    ///
    /// # Errors
    ///
    /// [`SignError::Io`] on read failure, otherwise as [`Self::from_bytes`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// The extracted RSA public key, for the verification layer.
    pub(crate) fn rsa_public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_decode_error() {
        let result = TrustedCertificate::from_bytes(b"definitely not a certificate");
        assert!(matches!(result, Err(SignError::CertificateDecode(_))));
    }

    #[test]
    fn test_empty_input_is_decode_error() {
        let result = TrustedCertificate::from_bytes(b"");
        assert!(matches!(result, Err(SignError::CertificateDecode(_))));
    }

    #[test]
    fn test_pem_header_with_bad_body_is_decode_error() {
        let pem = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        let result = TrustedCertificate::from_bytes(pem.as_bytes());
        assert!(result.is_err());
    }
}
