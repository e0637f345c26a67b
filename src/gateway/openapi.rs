//! Open-API query-string gateway (Alipay style).
//!
//! Requests are flat `key=value` parameter sets: a handful of system
//! parameters plus a `biz_content` JSON document. The string-to-sign is
//! the sorted, empty-skipping, `&`-joined canonical form of all
//! parameters; the `SHA256withRSA` signature is attached as the `sign`
//! parameter (`sign_type=RSA2`).
//!
//! Asynchronous notifications are verified the same way in reverse: the
//! received parameters minus `sign` and `sign_type` are canonicalized and
//! checked against the gateway's certificate.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::instrument;

use crate::canonical::{JoinStyle, QueryCanonicalizer};
use crate::error::{Result, SignError};
use crate::sign::{RequestSigner, ResponseVerifier};

/// Signature type label for `SHA256withRSA`.
pub const SIGN_TYPE_RSA2: &str = "RSA2";
/// Request charset label.
pub const CHARSET_UTF8: &str = "UTF-8";
/// Request format label.
pub const FORMAT_JSON: &str = "json";
/// Protocol version.
pub const VERSION_1_0: &str = "1.0";

/// Name of the signature parameter.
const PARAM_SIGN: &str = "sign";
/// Name of the signature type parameter, excluded from verification.
const PARAM_SIGN_TYPE: &str = "sign_type";

/// An open-API request under construction.
///
/// # Examples
///
/// ```no_run
/// use paygate_sign::gateway::openapi::OpenApiRequest;
/// use paygate_sign::keys::SigningKeyMaterial;
/// use paygate_sign::sign::{RequestSigner, SignatureScheme};
/// use serde_json::json;
///
/// # fn example() -> paygate_sign::error::Result<()> {
/// let key = SigningKeyMaterial::from_pem_file("private_key.pem")?;
/// let signer = RequestSigner::new(key, SignatureScheme::open_api());
///
/// let mut request = OpenApiRequest::new(
///     "2014072300007148",
///     "alipay.trade.precreate",
///     "2025-01-07 16:05:10",
/// );
/// request.set_biz_content(&json!({
///     "out_trade_no": "987654321",
///     "total_amount": "0.01",
///     "subject": "IoT Card",
///     "product_code": "QR_CODE_OFFLINE",
/// }))?;
///
/// let params = request.into_signed_params(&signer)?;
/// assert!(params.contains_key("sign"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiRequest {
    params: BTreeMap<String, String>,
}

impl OpenApiRequest {
    /// Starts a request with the standard system parameters.
    ///
    /// `timestamp` is caller-supplied (`YYYY-MM-DD HH:MM:SS` gateway-local
    /// time) so that request construction stays deterministic.
    #[must_use]
    pub fn new(app_id: impl Into<String>, method: impl Into<String>, timestamp: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert("app_id".to_owned(), app_id.into());
        params.insert("method".to_owned(), method.into());
        params.insert("charset".to_owned(), CHARSET_UTF8.to_owned());
        params.insert("sign_type".to_owned(), SIGN_TYPE_RSA2.to_owned());
        params.insert("timestamp".to_owned(), timestamp.into());
        params.insert("version".to_owned(), VERSION_1_0.to_owned());
        params.insert("format".to_owned(), FORMAT_JSON.to_owned());
        Self { params }
    }

    /// Sets or replaces a request parameter.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Serializes `content` into the `biz_content` parameter.
    ///
    /// # Errors
    ///
    /// [`SignError::Serialize`] if the content cannot be represented as
    /// JSON.
    pub fn set_biz_content<T: Serialize>(&mut self, content: &T) -> Result<&mut Self> {
        let json = serde_json::to_string(content)?;
        self.params.insert("biz_content".to_owned(), json);
        Ok(self)
    }

    /// The canonical string-to-sign for the current parameter set.
    ///
    /// Sorted lexically, empty values skipped, `&`-joined. The `sign`
    /// parameter itself is never part of the string-to-sign.
    #[must_use]
    pub fn string_to_sign(&self) -> String {
        QueryCanonicalizer::new(JoinStyle::Ampersand).string_to_sign(
            self.params
                .iter()
                .filter(|(key, _)| key.as_str() != PARAM_SIGN)
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }

    /// Signs the request and returns the complete parameter set including
    /// `sign`.
    ///
    /// # Errors
    ///
    /// Signing failures from the underlying layer.
    #[instrument(skip(self, signer), fields(method = %self.params.get("method").map_or("", String::as_str)))]
    pub fn into_signed_params(mut self, signer: &RequestSigner) -> Result<BTreeMap<String, String>> {
        let signature = signer.sign(self.string_to_sign().as_bytes())?;
        self.params.insert(PARAM_SIGN.to_owned(), signature);
        Ok(self.params)
    }
}

/// Verifies a notification callback's parameter set.
///
/// Rebuilds the string-to-sign from `params` minus `sign` and
/// `sign_type` and checks it against the verifier's certificate. A
/// mismatch is `Ok(false)`.
///
/// # Errors
///
/// - [`SignError::SignatureDecode`] if `params` carries no `sign` value or
///   the value is not valid base64
#[instrument(skip(params, verifier), fields(param_count = params.len()))]
pub fn verify_notification(
    params: &BTreeMap<String, String>,
    verifier: &ResponseVerifier,
) -> Result<bool> {
    let signature = params.get(PARAM_SIGN).ok_or_else(|| {
        SignError::SignatureDecode("notification carries no sign parameter".to_owned())
    })?;

    let string_to_sign = QueryCanonicalizer::new(JoinStyle::Ampersand).string_to_sign(
        params
            .iter()
            .filter(|(key, _)| key.as_str() != PARAM_SIGN && key.as_str() != PARAM_SIGN_TYPE)
            .map(|(key, value)| (key.clone(), value.clone())),
    );

    verifier.verify(string_to_sign.as_bytes(), signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_parameters_are_seeded() {
        let request = OpenApiRequest::new("app-1", "alipay.trade.precreate", "2025-01-07 16:05:10");
        let sts = request.string_to_sign();
        assert!(sts.contains("app_id=app-1"));
        assert!(sts.contains("charset=UTF-8"));
        assert!(sts.contains("sign_type=RSA2"));
        assert!(sts.contains("version=1.0"));
        assert!(sts.contains("format=json"));
    }

    #[test]
    fn test_string_to_sign_is_sorted() {
        let mut request = OpenApiRequest::new("app-1", "zzz.method", "2025-01-07 16:05:10");
        request.set_param("aaa_first", "1");
        let sts = request.string_to_sign();
        assert!(sts.starts_with("aaa_first=1&app_id="));
    }

    #[test]
    fn test_empty_params_are_skipped() {
        let mut request = OpenApiRequest::new("app-1", "m", "t");
        request.set_param("return_url", "");
        assert!(!request.string_to_sign().contains("return_url"));
    }

    #[test]
    fn test_biz_content_is_embedded_json() {
        let mut request = OpenApiRequest::new("app-1", "m", "t");
        request
            .set_biz_content(&serde_json::json!({"out_trade_no": "1", "total_amount": "0.01"}))
            .unwrap();
        let sts = request.string_to_sign();
        assert!(sts.contains(r#"biz_content={"out_trade_no":"1","total_amount":"0.01"}"#));
    }

    #[test]
    fn test_verify_notification_without_sign_is_decode_error() {
        use crate::cert::TrustedCertificate;
        use crate::sign::{ResponseVerifier, SignatureScheme};

        let cert_pem = include_bytes!("../../tests/fixtures/gateway_cert.pem");
        let verifier = ResponseVerifier::new(
            TrustedCertificate::from_bytes(cert_pem).unwrap(),
            SignatureScheme::open_api(),
        );

        let params = BTreeMap::from([("out_trade_no".to_owned(), "1".to_owned())]);
        let result = verify_notification(&params, &verifier);
        assert!(matches!(result, Err(SignError::SignatureDecode(_))));
    }
}
