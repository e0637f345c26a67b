//! Request signing and response verification for RSA-based payment
//! gateways.
//!
//! Payment gateways that predate token-based authentication authenticate
//! merchants with detached RSA signatures: the merchant canonicalizes a
//! request payload, signs the bytes with a private key, and verifies the
//! gateway's response signature against a trusted certificate. Each
//! gateway picks its own canonical form, digest, and key-store format.
//! This crate implements the signing and verification flow once and
//! parameterizes the differences.
//!
//! # Supported integrations
//!
//! - **Bank JSON gateway** ([`gateway::trustpay`]): JSON envelope signed
//!   with `SHA1withRSA`, key material from a password-protected PKCS#12
//!   archive, response signatures computed over the GBK encoding of the
//!   message.
//! - **Open-API query gateway** ([`gateway::openapi`]): sorted
//!   `key=value&...` string-to-sign signed with `SHA256withRSA`
//!   (`sign_type=RSA2`), key material from a PEM private key.
//!
//! # Quick Start
//!
//! ## Sign a bank-gateway request
//!
//! ```no_run
//! use paygate_sign::gateway::trustpay::{
//!     Merchant, Order, OrderItem, RequestMessage, SignedRequest, TrxRequest,
//! };
//! use paygate_sign::keys::SigningKeyMaterial;
//! use paygate_sign::sign::{RequestSigner, SignatureScheme};
//!
//! # fn example() -> paygate_sign::error::Result<()> {
//! let archive = std::fs::read("merchant_cert.pfx")?;
//! let key = SigningKeyMaterial::from_pkcs12(&archive, "passphrase")?;
//! let signer = RequestSigner::new(key, SignatureScheme::trustpay());
//!
//! let order = Order {
//!     pay_type_id: paygate_sign::gateway::trustpay::PAY_TYPE_IMMEDIATE.to_owned(),
//!     order_no: "TEST-20250417141600".to_owned(),
//!     order_amount: "0.01".to_owned(),
//!     order_items: vec![OrderItem { product_name: "IoT Card".to_owned(), ..Default::default() }],
//!     ..Default::default()
//! };
//! let trx = TrxRequest {
//!     trx_type: paygate_sign::gateway::trustpay::TRX_TYPE_PAY_REQUEST.to_owned(),
//!     order: Some(order),
//!     ..Default::default()
//! };
//!
//! let message = RequestMessage::new(Merchant::ebus("103882200000958"), trx);
//! let request = SignedRequest::create(message, &signer)?;
//! let body = request.to_json()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Verify a gateway response
//!
//! ```no_run
//! use paygate_sign::cert::TrustedCertificate;
//! use paygate_sign::gateway::trustpay::ResponseEnvelope;
//! use paygate_sign::sign::{ResponseVerifier, SignatureScheme};
//!
//! # fn example(body: &str) -> paygate_sign::error::Result<()> {
//! let certificate = TrustedCertificate::from_file("trust_pay.cer")?;
//! let verifier = ResponseVerifier::new(certificate, SignatureScheme::trustpay());
//!
//! let envelope = ResponseEnvelope::from_json(body)?;
//! if !envelope.verify(&verifier)? {
//!     eprintln!("gateway response signature mismatch");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`sign`]: the parameterized signer/verifier pair and per-integration
//!   [`SignatureScheme`](sign::SignatureScheme)
//! - [`canonical`]: JSON and query-string canonical message forms
//! - [`keys`]: PKCS#12 and PEM key-material loading
//! - [`cert`]: trusted X.509 certificate decoding (PEM or DER)
//! - [`gateway`]: integration profiles, envelope types, and configuration
//! - [`error`]: the flat error taxonomy
//!
//! # Error Handling
//!
//! All operations return [`Result<T, SignError>`](error::Result). Every
//! failure is terminal for the enclosing operation; there are no retries.
//! A response signature that simply does not match is not an error:
//! verification returns `Ok(false)`, while malformed input (bad base64,
//! undecodable certificates, non-RSA keys) is reported as a distinct
//! [`SignError`](error::SignError) variant.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod canonical;
pub mod cert;
pub mod error;
pub mod gateway;
pub mod keys;
pub mod sign;

pub use cert::TrustedCertificate;
pub use error::{Result, SignError};
pub use gateway::GatewayConfig;
pub use keys::SigningKeyMaterial;
pub use sign::{
    DigestAlgorithm, RequestSigner, ResponseTranscoding, ResponseVerifier, SignatureScheme,
};
