//! Row-wise heuristic field extractor.
//!
//! Scans the text-layer lines once, left to right, pairing recognized labels
//! with the following line(s). Several fields need deeper lookahead because
//! the card layout splits their Bengali values across lines.

use std::collections::HashSet;

use tracing::{debug, error};

use crate::error::ExtractionError;
use crate::models::record::FieldRecord;

use super::Result;
use super::script::contains_bengali;
use super::vocabulary::{FieldVocabulary, MERGE_MISSING_VALUE, MISSING_VALUE};

/// Script-aware extractor producing an ordered list of single-field records.
pub struct RowWiseExtractor {
    vocab: FieldVocabulary,
}

impl RowWiseExtractor {
    pub fn new(vocab: FieldVocabulary) -> Self {
        Self { vocab }
    }

    /// Extract records from the ordered line sequence.
    ///
    /// Each recognized label is emitted at most once; the first occurrence
    /// wins. Lookahead is bounds-checked and an out-of-range read aborts the
    /// whole extraction with an error.
    pub fn extract(&self, lines: &[&str]) -> Result<Vec<FieldRecord>> {
        let mut records = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for i in 0..lines.len().saturating_sub(1) {
            // Boilerplate from the address block and the "Additional
            // information" section never carries a value.
            if self.vocab.is_noise(lines[i]) || self.vocab.is_lookahead_noise(lines[i + 1]) {
                continue;
            }

            let current = lines[i].trim();
            if current.is_empty() || !self.vocab.is_label(current) || seen.contains(current) {
                continue;
            }
            let next = lines[i + 1].trim();

            if self.vocab.is_short_lookahead(current) {
                let two_ahead = line_at(lines, i + 2)?.trim();
                if contains_bengali(two_ahead) {
                    let value = if self.vocab.is_merge_field(current) {
                        let three_ahead = line_at(lines, i + 3)?.trim();
                        match (contains_bengali(two_ahead), contains_bengali(three_ahead)) {
                            (true, true) => format!("{two_ahead} {three_ahead}"),
                            (true, false) => two_ahead.to_string(),
                            (false, _) => MERGE_MISSING_VALUE.to_string(),
                        }
                    } else {
                        format!("{next} {two_ahead}")
                    };

                    seen.insert(current);
                    records.push(FieldRecord::new(current, value));
                    continue;
                }
                // Latin two-ahead line: fall back to plain next-line pairing.
            }

            let mut value = next.to_string();
            if self.vocab.is_merge_field(current) && value.contains("No") {
                value = value.replace("No", MISSING_VALUE).trim().to_string();
            }
            if current == self.vocab.blood_group_field && !self.vocab.is_blood_group(&value) {
                value = MISSING_VALUE.to_string();
            }

            seen.insert(current);
            records.push(FieldRecord::new(current, value));
        }

        debug!("row-wise extraction produced {} records", records.len());
        Ok(records)
    }

    /// Compatibility surface: absorb any extraction error into an empty list.
    ///
    /// Callers that need to tell "parser error" from "no fields found"
    /// should use [`extract`](Self::extract) instead.
    pub fn extract_or_empty(&self, lines: &[&str]) -> Vec<FieldRecord> {
        match self.extract(lines) {
            Ok(records) => records,
            Err(e) => {
                error!("row-wise extraction failed: {e}");
                Vec::new()
            }
        }
    }
}

fn line_at<'a>(lines: &[&'a str], index: usize) -> Result<&'a str> {
    lines
        .get(index)
        .copied()
        .ok_or(ExtractionError::LookaheadOutOfBounds {
            index,
            len: lines.len(),
        })
}
