//! JSON canonical form.
//!
//! The bank JSON gateway signs the serialized message document as-is:
//! field order follows struct declaration order (not lexical order), and
//! empty optional fields are omitted entirely via
//! `#[serde(skip_serializing_if = ...)]` on the envelope types. Compact
//! separators, no trailing newline.

use serde::Serialize;

use crate::error::Result;

/// Serializes `message` into its canonical JSON bytes.
///
/// This is the exact byte sequence that gets signed and must be
/// transmitted unchanged; re-serializing with different separators or
/// field order would invalidate the signature.
///
/// # Errors
///
/// [`SignError::Serialize`](crate::error::SignError::Serialize) if the
/// message cannot be represented as JSON.
pub fn message_bytes<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(message)?)
}

/// Serializes `message` into its canonical JSON string.
///
/// Identical bytes to [`message_bytes`], for callers embedding the
/// document in a larger envelope.
///
/// # Errors
///
/// As [`message_bytes`].
pub fn message_string<T: Serialize>(message: &T) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Envelope {
        #[serde(rename = "Version")]
        version: String,
        #[serde(rename = "Remark", skip_serializing_if = "String::is_empty")]
        remark: String,
        #[serde(rename = "Amount")]
        amount: String,
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let envelope = Envelope {
            version: "V3.0.0".to_owned(),
            remark: "note".to_owned(),
            amount: "1.00".to_owned(),
        };
        let json = message_string(&envelope).unwrap();
        assert_eq!(json, r#"{"Version":"V3.0.0","Remark":"note","Amount":"1.00"}"#);
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let envelope = Envelope {
            version: "V3.0.0".to_owned(),
            remark: String::new(),
            amount: "1.00".to_owned(),
        };
        let json = message_string(&envelope).unwrap();
        assert_eq!(json, r#"{"Version":"V3.0.0","Amount":"1.00"}"#);
    }

    #[test]
    fn test_bytes_and_string_agree() {
        let envelope = Envelope {
            version: "V1".to_owned(),
            remark: String::new(),
            amount: "0.01".to_owned(),
        };
        assert_eq!(message_bytes(&envelope).unwrap(), message_string(&envelope).unwrap().into_bytes());
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        #[derive(Serialize)]
        struct Message {
            #[serde(rename = "ErrorMessage")]
            error_message: String,
        }
        let json = message_string(&Message { error_message: "交易成功".to_owned() }).unwrap();
        assert_eq!(json, "{\"ErrorMessage\":\"交易成功\"}");
    }
}
