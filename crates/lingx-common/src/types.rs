//! The translation bundle model shared across the lingx runtime

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delimiter separating segments of a translation key path
pub const KEY_DELIMITER: char = '.';

/// A translation bundle: a mapping from key to message text or nested sub-mapping
pub type Bundle = BTreeMap<String, BundleValue>;

/// A single value inside a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleValue {
    /// A translatable message string
    Message(String),
    /// A nested mapping of keys to values
    Nested(Bundle),
}

impl BundleValue {
    /// Get the message text if this value is a leaf
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(text) => Some(text),
            Self::Nested(_) => None,
        }
    }
}

/// Resolve a translation key against a bundle.
///
/// Flat keys take precedence: a bundle entry literally named
/// `"common.greeting"` wins over traversal into `common` then `greeting`.
pub fn resolve_key<'a>(bundle: &'a Bundle, key: &str) -> Option<&'a str> {
    if let Some(value) = bundle.get(key) {
        if let Some(text) = value.as_message() {
            return Some(text);
        }
    }

    let mut current = bundle;
    let mut segments = key.split(KEY_DELIMITER).peekable();
    while let Some(segment) = segments.next() {
        match current.get(segment)? {
            BundleValue::Message(text) => {
                return if segments.peek().is_none() {
                    Some(text)
                } else {
                    None
                };
            }
            BundleValue::Nested(nested) => {
                if segments.peek().is_none() {
                    return None;
                }
                current = nested;
            }
        }
    }
    None
}

/// Merge `incoming` into `target`, recursing into nested mappings.
///
/// Leaf messages from `incoming` overwrite existing entries; nested
/// mappings are combined rather than replaced.
pub fn merge_bundles(target: &mut Bundle, incoming: &Bundle) {
    for (key, value) in incoming {
        match (target.get_mut(key), value) {
            (Some(BundleValue::Nested(existing)), BundleValue::Nested(nested)) => {
                merge_bundles(existing, nested);
            }
            (_, value) => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Prefix every top-level key of `bundle` with `namespace` and the key delimiter.
pub fn prefix_namespace(bundle: Bundle, namespace: &str) -> Bundle {
    bundle
        .into_iter()
        .map(|(key, value)| (format!("{}{}{}", namespace, KEY_DELIMITER, key), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bundle() -> Bundle {
        serde_json::from_str(
            r#"{
                "greeting": "Hello",
                "common": {
                    "farewell": "Goodbye",
                    "deep": { "leaf": "Found" }
                },
                "common.flat": "Flat wins"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_flat_key() {
        let bundle = sample_bundle();
        assert_eq!(resolve_key(&bundle, "greeting"), Some("Hello"));
        assert_eq!(resolve_key(&bundle, "common.flat"), Some("Flat wins"));
    }

    #[test]
    fn test_resolve_nested_path() {
        let bundle = sample_bundle();
        assert_eq!(resolve_key(&bundle, "common.farewell"), Some("Goodbye"));
        assert_eq!(resolve_key(&bundle, "common.deep.leaf"), Some("Found"));
    }

    #[test]
    fn test_resolve_missing_key() {
        let bundle = sample_bundle();
        assert_eq!(resolve_key(&bundle, "nonexistent.key"), None);
        assert_eq!(resolve_key(&bundle, "common"), None);
        assert_eq!(resolve_key(&bundle, "greeting.too.deep"), None);
    }

    #[test]
    fn test_merge_combines_nested_maps() {
        let mut target = sample_bundle();
        let incoming: Bundle = serde_json::from_str(
            r#"{
                "greeting": "Hi",
                "common": { "new": "Added" }
            }"#,
        )
        .unwrap();

        merge_bundles(&mut target, &incoming);

        assert_eq!(resolve_key(&target, "greeting"), Some("Hi"));
        assert_eq!(resolve_key(&target, "common.new"), Some("Added"));
        assert_eq!(resolve_key(&target, "common.farewell"), Some("Goodbye"));
    }

    #[test]
    fn test_prefix_namespace() {
        let bundle: Bundle =
            serde_json::from_str(r#"{"title": "Checkout", "cart": {"empty": "Empty"}}"#).unwrap();
        let prefixed = prefix_namespace(bundle, "shop");

        assert_eq!(resolve_key(&prefixed, "shop.title"), Some("Checkout"));
        assert_eq!(resolve_key(&prefixed, "shop.cart.empty"), Some("Empty"));
        assert_eq!(resolve_key(&prefixed, "title"), None);
    }

    #[test]
    fn test_bundle_round_trips_through_json() {
        let bundle = sample_bundle();
        let json = serde_json::to_string(&bundle).unwrap();
        let back: Bundle = serde_json::from_str(&json).unwrap();
        assert_eq!(bundle, back);
    }
}
