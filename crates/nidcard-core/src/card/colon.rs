//! Colon-delimited fallback extractor.
//!
//! Parses free-form `key: value` text where line boundaries do not always
//! align with label/value pairs, recovering orphaned continuation lines into
//! the last seen key.

use std::collections::HashMap;

use tracing::debug;

use crate::models::record::ColonFields;

use super::vocabulary::{COLON_MISSING_VALUE, FieldVocabulary};

/// Fallback parser splitting `key: value` lines.
pub struct ColonExtractor {
    vocab: FieldVocabulary,
}

impl ColonExtractor {
    pub fn new(vocab: FieldVocabulary) -> Self {
        Self { vocab }
    }

    /// Extract both mappings from the ordered line sequence in one pass.
    ///
    /// A line with a colon is split at the first colon only. A non-empty line
    /// without a colon fills the last key's value when that value is still
    /// the missing placeholder; otherwise it becomes a new key of its own,
    /// even when the key string already exists in the mapping.
    pub fn extract(&self, lines: &[&str]) -> ColonFields {
        let mut fields: HashMap<String, String> = HashMap::new();
        let mut direct: HashMap<String, String> = HashMap::new();
        let mut last_key: Option<String> = None;

        for (i, raw) in lines.iter().enumerate() {
            if let Some((key, value)) = raw.split_once(':') {
                let key = key.trim().to_string();
                let value = value.trim();
                let value = if value.is_empty() {
                    COLON_MISSING_VALUE.to_string()
                } else {
                    value.to_string()
                };
                fields.insert(key.clone(), value);
                last_key = Some(key);
            } else {
                let line = raw.trim();
                if !line.is_empty() {
                    let fillable = last_key
                        .as_ref()
                        .is_some_and(|key| fields.get(key).is_some_and(|v| v == COLON_MISSING_VALUE));
                    if fillable {
                        let key = last_key.as_ref().unwrap().clone();
                        fields.insert(key, line.to_string());
                    } else {
                        fields.insert(line.to_string(), COLON_MISSING_VALUE.to_string());
                    }
                }
            }

            // Secondary output: direct next-line pairing for the whitelist,
            // without dedup or script awareness.
            if self.vocab.is_direct_pair(raw) {
                if let Some(next) = lines.get(i + 1) {
                    direct.insert(raw.to_string(), next.trim().to_string());
                }
            }
        }

        debug!(
            "colon-delimited extraction produced {} fields, {} direct pairs",
            fields.len(),
            direct.len()
        );
        ColonFields { fields, direct }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(lines: &[&str]) -> ColonFields {
        ColonExtractor::new(FieldVocabulary::default()).extract(lines)
    }

    #[test]
    fn splits_key_value_at_first_colon() {
        let out = extract(&["Name: John", "Issued: 10:30"]);
        assert_eq!(out.fields["Name"], "John");
        assert_eq!(out.fields["Issued"], "10:30");
    }

    #[test]
    fn empty_value_becomes_placeholder() {
        let out = extract(&["Name:"]);
        assert_eq!(out.fields["Name"], "N/A");
    }

    #[test]
    fn continuation_line_fills_missing_value() {
        let out = extract(&["Name:", "John Doe"]);
        assert_eq!(out.fields["Name"], "John Doe");
    }

    #[test]
    fn orphan_line_after_filled_key_becomes_new_key() {
        let out = extract(&["Name: John", "", "Doe"]);
        assert_eq!(out.fields["Name"], "John");
        assert_eq!(out.fields["Doe"], "N/A");
    }

    #[test]
    fn blank_lines_are_ignored() {
        let out = extract(&["", "  ", "Name: John", ""]);
        assert_eq!(out.fields.len(), 1);
        assert_eq!(out.fields["Name"], "John");
    }

    #[test]
    fn later_colon_line_overwrites_existing_key() {
        // Re-introducing a key silently overwrites; documented source quirk.
        let out = extract(&["Name: John", "Name:"]);
        assert_eq!(out.fields["Name"], "N/A");
    }

    #[test]
    fn consecutive_orphans_fill_then_fork() {
        let out = extract(&["Name:", "John", "Doe"]);
        assert_eq!(out.fields["Name"], "John");
        assert_eq!(out.fields["Doe"], "N/A");
    }

    #[test]
    fn whitelisted_label_pairs_with_next_line() {
        let out = extract(&["Name(English)", "John Doe"]);
        assert_eq!(out.direct["Name(English)"], "John Doe");
        // The primary mapping still records both lines as keys.
        assert_eq!(out.fields["Name(English)"], "N/A");
        assert_eq!(out.fields["John Doe"], "N/A");
    }

    #[test]
    fn whitelisted_label_at_end_of_input_pairs_nothing() {
        let out = extract(&["Blood Group"]);
        assert!(out.direct.is_empty());
    }

    #[test]
    fn direct_pairing_takes_later_occurrence() {
        let out = extract(&["Gender", "Male", "Gender", "Female"]);
        assert_eq!(out.direct["Gender"], "Female");
    }
}
