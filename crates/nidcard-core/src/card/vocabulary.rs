//! Label vocabularies for the NID card layout.
//!
//! All of the fixed token sets the extractors consult live here as plain
//! configuration data, so a related card layout can swap them out without
//! touching the extraction logic.

use serde::{Deserialize, Serialize};

/// Placeholder for an invalid or substituted value.
pub const MISSING_VALUE: &str = "NAN";

/// Placeholder emitted when the merge field has no usable native-script value.
pub const MERGE_MISSING_VALUE: &str = "NaN";

/// Placeholder used by the colon-delimited extractor for absent values.
pub const COLON_MISSING_VALUE: &str = "N/A";

/// The fixed token sets recognized on an NID card text layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldVocabulary {
    /// Every label the row-wise extractor may pair with a value.
    pub labels: Vec<String>,

    /// Labels whose value requires inspecting two lines ahead.
    pub short_lookahead: Vec<String>,

    /// Labels that conditionally merge two native-script lines into one value.
    pub merge_on_native: Vec<String>,

    /// The label carrying the blood-group value.
    pub blood_group_field: String,

    /// The only tokens accepted as a blood-group value.
    pub blood_groups: Vec<String>,

    /// Literal lines skipped without being treated as label or value.
    pub noise_tokens: Vec<String>,

    /// Skip the current line when the *next* line equals one of these.
    pub lookahead_noise: Vec<String>,

    /// Labels the colon-delimited extractor pairs directly with the next line.
    pub direct_pair_whitelist: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldVocabulary {
    fn default() -> Self {
        Self {
            labels: strings(&[
                "Village/Road",
                "Blood Group",
                "Union/Ward",
                "Home/Holding",
                "National ID",
                "Voter Area",
                "Pin",
                "Postal Code",
                "Voter No",
                "Name(Bangla)",
                "Post Office",
                "Name(English)",
                "Date of Birth",
                "Birth Place",
                "Father Name",
                "Mother Name",
                "Spouse Name",
                "Gender",
                "Marital",
                "Occupation",
                "Division",
                "District",
                "RMO",
                "Upozila",
            ]),
            short_lookahead: strings(&[
                "Upozila",
                "Village/Road",
                "Home/Holding",
                "Union/Ward",
                "Post Office",
                "RMO",
            ]),
            merge_on_native: strings(&["Home/Holding"]),
            blood_group_field: "Blood Group".to_string(),
            blood_groups: strings(&["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]),
            noise_tokens: strings(&["Corporation", "Or", "Municipality", "No"]),
            lookahead_noise: strings(&["Additional"]),
            direct_pair_whitelist: strings(&[
                "National ID",
                "Name(Bangla)",
                "Name(English)",
                "Date of Birth",
                "Birth Place",
                "Father Name",
                "Mother Name",
                "Spouse Name",
                "Blood Group",
                "Gender",
            ]),
        }
    }
}

impl FieldVocabulary {
    /// Whether `line` is a recognized field label.
    pub fn is_label(&self, line: &str) -> bool {
        self.labels.iter().any(|l| l == line)
    }

    /// Whether `label` needs two-line lookahead.
    pub fn is_short_lookahead(&self, label: &str) -> bool {
        self.short_lookahead.iter().any(|l| l == label)
    }

    /// Whether `label` is the residence/holding merge field.
    pub fn is_merge_field(&self, label: &str) -> bool {
        self.merge_on_native.iter().any(|l| l == label)
    }

    /// Whether `token` is a valid blood-group value.
    pub fn is_blood_group(&self, token: &str) -> bool {
        self.blood_groups.iter().any(|g| g == token)
    }

    /// Whether `line` must be skipped outright.
    pub fn is_noise(&self, line: &str) -> bool {
        self.noise_tokens.iter().any(|t| t == line)
    }

    /// Whether the line following the current one marks it as noise.
    pub fn is_lookahead_noise(&self, next_line: &str) -> bool {
        self.lookahead_noise.iter().any(|t| t == next_line)
    }

    /// Whether `label` participates in the direct-pairing secondary output.
    pub fn is_direct_pair(&self, label: &str) -> bool {
        self.direct_pair_whitelist.iter().any(|l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_is_consistent() {
        let vocab = FieldVocabulary::default();

        // Every short-lookahead and merge field must also be a plain label.
        for label in &vocab.short_lookahead {
            assert!(vocab.is_label(label), "{label} missing from labels");
        }
        for label in &vocab.merge_on_native {
            assert!(vocab.is_short_lookahead(label), "{label} must be short-lookahead");
        }
        for label in &vocab.direct_pair_whitelist {
            assert!(vocab.is_label(label), "{label} missing from labels");
        }

        assert!(vocab.is_label(&vocab.blood_group_field));
        assert_eq!(vocab.blood_groups.len(), 8);
        assert_eq!(vocab.direct_pair_whitelist.len(), 10);
    }

    #[test]
    fn noise_tokens_are_not_labels() {
        let vocab = FieldVocabulary::default();
        for token in &vocab.noise_tokens {
            assert!(!vocab.is_label(token));
        }
    }

    #[test]
    fn vocabulary_round_trips_through_json() {
        let vocab = FieldVocabulary::default();
        let json = serde_json::to_string(&vocab).unwrap();
        let back: FieldVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.labels, vocab.labels);
        assert_eq!(back.blood_groups, vocab.blood_groups);
    }
}
