//! Output data models for card field extraction.

use std::collections::HashMap;

use serde::de::{Deserializer, Error as DeError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// A single extracted `{label: value}` pair.
///
/// Serialized as a one-key JSON object so a row-wise result renders as
/// `[{"Date of Birth": "01 Jan 1990"}, {"Blood Group": "O-"}]`, matching
/// the card layout order rather than one flat mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// Recognized field label (Latin transliteration).
    pub label: String,
    /// Extracted value, possibly a missing-value placeholder.
    pub value: String,
}

impl FieldRecord {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Serialize for FieldRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((label, value)), None) => Ok(Self { label, value }),
            _ => Err(D::Error::custom("expected a single-key object")),
        }
    }
}

/// Output of the colon-delimited extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonFields {
    /// Free-form `key: value` mapping with continuation-line recovery.
    pub fields: HashMap<String, String>,

    /// Direct next-line pairing for the whitelisted labels.
    pub direct: HashMap<String, String>,
}

/// Parser output, shaped by the strategy that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardData {
    /// Row-wise strategy: ordered single-field records.
    Records(Vec<FieldRecord>),
    /// Colon-delimited strategy: free-form plus direct-pairing mappings.
    Colon(ColonFields),
}

impl CardData {
    /// Whether extraction produced nothing at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Records(records) => records.is_empty(),
            Self::Colon(colon) => colon.fields.is_empty() && colon.direct.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_serializes_as_single_key_object() {
        let record = FieldRecord::new("Date of Birth", "01 Jan 1990");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Date of Birth":"01 Jan 1990"}"#);
    }

    #[test]
    fn records_serialize_as_array_of_objects() {
        let records = vec![
            FieldRecord::new("National ID", "1234567890"),
            FieldRecord::new("Blood Group", "NAN"),
        ];
        let json = serde_json::to_string(&CardData::Records(records)).unwrap();
        assert_eq!(
            json,
            r#"[{"National ID":"1234567890"},{"Blood Group":"NAN"}]"#
        );
    }

    #[test]
    fn record_deserializes_from_single_key_object() {
        let record: FieldRecord = serde_json::from_str(r#"{"Gender":"Male"}"#).unwrap();
        assert_eq!(record, FieldRecord::new("Gender", "Male"));
    }

    #[test]
    fn record_rejects_multi_key_object() {
        let result = serde_json::from_str::<FieldRecord>(r#"{"a":"1","b":"2"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_check_covers_both_shapes() {
        assert!(CardData::Records(Vec::new()).is_empty());
        assert!(CardData::Colon(ColonFields::default()).is_empty());

        let mut colon = ColonFields::default();
        colon.fields.insert("Name".into(), "John".into());
        assert!(!CardData::Colon(colon).is_empty());
    }
}
