//! Per-integration gateway profiles.
//!
//! Each supported gateway pairs a canonical message form with a signature
//! scheme:
//!
//! | Integration | Canonical form | Digest | Key store | Response transcoding |
//! |-------------|----------------|--------|-----------|----------------------|
//! | [`trustpay`] | JSON envelope, declaration order | SHA-1 | PKCS#12 | GBK |
//! | [`openapi`] | sorted query string | SHA-256 | PEM | none |
//!
//! [`GatewayConfig`] carries the credentials and endpoints for one
//! integration as an explicit struct; nothing in this crate reads
//! environment variables.

pub mod config;
pub mod openapi;
pub mod trustpay;

pub use config::{GatewayConfig, KeyStoreConfig};
