//! Query-string canonical form.
//!
//! Open-API gateways sign a string-to-sign assembled from the request
//! parameters: keys sorted lexically ascending, empty-valued keys skipped
//! entirely, pairs rendered as `key=value` and joined either with `&` or
//! with nothing at all, depending on the integration. The output depends
//! only on the parameter set, never on the insertion order of the source
//! mapping.

use std::collections::BTreeMap;

/// How `key=value` pairs are joined in the string-to-sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStyle {
    /// Pairs joined with `&` (`a=1&b=2`).
    #[default]
    Ampersand,
    /// Pairs concatenated directly (`a=1b=2`).
    Concatenated,
}

/// Builds the canonical string-to-sign from request parameters.
///
/// # Examples
///
/// ```
/// use paygate_sign::canonical::{JoinStyle, QueryCanonicalizer};
///
/// let canonicalizer = QueryCanonicalizer::new(JoinStyle::Ampersand);
/// let out = canonicalizer.string_to_sign([("b", "2"), ("a", "1"), ("empty", "")]);
/// assert_eq!(out, "a=1&b=2");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryCanonicalizer {
    join: JoinStyle,
}

impl QueryCanonicalizer {
    /// Creates a canonicalizer with the given join style.
    #[must_use]
    pub const fn new(join: JoinStyle) -> Self {
        Self { join }
    }

    /// Flattens `params` into the canonical string-to-sign.
    ///
    /// Keys are sorted lexically ascending; duplicate keys keep the last
    /// value; empty-valued keys are skipped entirely. Values are used
    /// verbatim; percent-encoding, if the wire format needs it, happens
    /// after signing, never before.
    pub fn string_to_sign<I, K, V>(&self, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let sorted: BTreeMap<String, String> =
            params.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

        let mut out = String::new();
        for (key, value) in &sorted {
            if value.is_empty() {
                continue;
            }
            if !out.is_empty() && self.join == JoinStyle::Ampersand {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_sorted_lexically() {
        let out = QueryCanonicalizer::default().string_to_sign([("b", "2"), ("a", "1")]);
        assert_eq!(out, "a=1&b=2");
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let canonicalizer = QueryCanonicalizer::default();
        let forward = canonicalizer.string_to_sign([("a", "1"), ("b", "2"), ("c", "3")]);
        let backward = canonicalizer.string_to_sign([("c", "3"), ("b", "2"), ("a", "1")]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let out = QueryCanonicalizer::default()
            .string_to_sign([("a", "1"), ("fee", ""), ("b", "2")]);
        assert_eq!(out, "a=1&b=2");
    }

    #[test]
    fn test_skipped_value_leaves_no_dangling_separator() {
        let out = QueryCanonicalizer::default().string_to_sign([("a", ""), ("b", "2")]);
        assert_eq!(out, "b=2");
    }

    #[test]
    fn test_concatenated_join_style() {
        let out = QueryCanonicalizer::new(JoinStyle::Concatenated)
            .string_to_sign([("b", "2"), ("a", "1")]);
        assert_eq!(out, "a=1b=2");
    }

    #[test]
    fn test_all_empty_yields_empty_string() {
        let out = QueryCanonicalizer::default().string_to_sign([("a", ""), ("b", "")]);
        assert_eq!(out, "");
    }

    #[test]
    fn test_values_are_used_verbatim() {
        let out = QueryCanonicalizer::default()
            .string_to_sign([("biz_content", r#"{"subject":"IoT Card"}"#)]);
        assert_eq!(out, r#"biz_content={"subject":"IoT Card"}"#);
    }
}
