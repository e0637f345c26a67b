//! Gateway integration configuration.
//!
//! Credentials and endpoints are supplied as an explicit, deserializable
//! configuration struct passed into the signer/verifier at construction
//! time, never read from process-global state.

use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::error::{Result, SignError};
use crate::keys::SigningKeyMaterial;

/// Configuration for one payment-gateway integration.
///
/// # Examples
///
/// ```
/// use paygate_sign::gateway::GatewayConfig;
///
/// let toml = r#"
///     name = "trustpay-production"
///     merchant_id = "103882200000958"
///     gateway_url = "https://pay.example.com/trustpay/ReceiveMerchantTrxReqServlet"
///     notify_url = "https://shop.example.com/api/v1/pay/notify"
///
///     [key_store]
///     format = "pkcs12"
///     path = "/etc/paygate/merchant_cert.pfx"
///     passphrase = "secret"
/// "#;
///
/// let config: GatewayConfig = toml::from_str(toml).unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Display name for this integration.
    pub name: String,

    /// Merchant or application identifier issued by the gateway.
    pub merchant_id: String,

    /// Gateway endpoint the signed request is posted to.
    pub gateway_url: String,

    /// Asynchronous notification callback URL, if the integration uses one.
    #[serde(default)]
    pub notify_url: String,

    /// Location and format of the merchant signing key.
    pub key_store: KeyStoreConfig,
}

impl GatewayConfig {
    /// Validates the configuration.
    ///
    /// Checks that the merchant identifier is non-empty and that all
    /// configured URLs parse and use HTTPS.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Config`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(SignError::Config("merchant_id must not be empty".to_owned()));
        }

        validate_https_url("gateway_url", &self.gateway_url)?;
        if !self.notify_url.is_empty() {
            validate_https_url("notify_url", &self.notify_url)?;
        }

        Ok(())
    }

    /// Loads the merchant signing key described by [`Self::key_store`].
    ///
    /// # Errors
    ///
    /// [`SignError::Io`] on read failure, otherwise as the corresponding
    /// [`SigningKeyMaterial`] constructor.
    pub fn load_signing_key(&self) -> Result<SigningKeyMaterial> {
        match &self.key_store {
            KeyStoreConfig::Pkcs12 { path, passphrase } => {
                let passphrase = Zeroizing::new(passphrase.clone());
                SigningKeyMaterial::from_pkcs12_file(path, &passphrase)
            }
            KeyStoreConfig::Pem { path } => SigningKeyMaterial::from_pem_file(path),
        }
    }
}

/// Where and how the merchant signing key is stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum KeyStoreConfig {
    /// Password-protected PKCS#12 archive (bank gateway style).
    Pkcs12 {
        /// Path to the `.pfx`/`.p12` archive.
        path: String,
        /// Archive password.
        passphrase: String,
    },
    /// PEM private key, PKCS#1 or PKCS#8 (open-API gateway style).
    Pem {
        /// Path to the `.pem` file.
        path: String,
    },
}

fn validate_https_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| SignError::Config(format!("invalid {field} '{value}': {e}")))?;

    if url.scheme() != "https" {
        return Err(SignError::Config(format!(
            "{field} must use HTTPS, got: {}",
            url.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pem_config(gateway_url: &str) -> GatewayConfig {
        GatewayConfig {
            name: "test".to_owned(),
            merchant_id: "2014072300007148".to_owned(),
            gateway_url: gateway_url.to_owned(),
            notify_url: String::new(),
            key_store: KeyStoreConfig::Pem { path: "/tmp/key.pem".to_owned() },
        }
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            name = "openapi-sandbox"
            merchant_id = "2014072300007148"
            gateway_url = "https://openapi.example.com/gateway.do"

            [key_store]
            format = "pem"
            path = "/etc/paygate/private_key.pem"
        "#;

        let config: GatewayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name, "openapi-sandbox");
        assert_eq!(config.merchant_id, "2014072300007148");
        assert!(config.notify_url.is_empty());
        assert!(matches!(config.key_store, KeyStoreConfig::Pem { .. }));
    }

    #[test]
    fn test_pkcs12_key_store_from_toml() {
        let toml = r#"
            name = "trustpay"
            merchant_id = "103882200000958"
            gateway_url = "https://pay.example.com/servlet"

            [key_store]
            format = "pkcs12"
            path = "/etc/paygate/cert.pfx"
            passphrase = "secret"
        "#;

        let config: GatewayConfig = toml::from_str(toml).unwrap();
        let KeyStoreConfig::Pkcs12 { path, passphrase } = config.key_store else {
            panic!("expected pkcs12 key store");
        };
        assert_eq!(path, "/etc/paygate/cert.pfx");
        assert_eq!(passphrase, "secret");
    }

    #[test]
    fn test_validate_accepts_https() {
        assert!(pem_config("https://pay.example.com/servlet").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_http() {
        let result = pem_config("http://pay.example.com/servlet").validate();
        assert!(matches!(result, Err(SignError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_malformed_url() {
        let result = pem_config("not a url").validate();
        assert!(matches!(result, Err(SignError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_merchant_id() {
        let mut config = pem_config("https://pay.example.com/servlet");
        config.merchant_id = "  ".to_owned();
        let result = config.validate();
        assert!(matches!(result, Err(SignError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_http_notify_url() {
        let mut config = pem_config("https://pay.example.com/servlet");
        config.notify_url = "http://shop.example.com/notify".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_key_store_fails_to_parse() {
        let toml = r#"
            name = "incomplete"
            merchant_id = "1"
            gateway_url = "https://pay.example.com"
        "#;
        let result: std::result::Result<GatewayConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
