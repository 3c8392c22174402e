//! Script classification for mixed Latin/Bengali text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Bengali Unicode block (U+0980 - U+09FF).
    static ref BENGALI: Regex = Regex::new(r"[\u{0980}-\u{09FF}]").unwrap();
}

/// True iff `text` contains at least one Bengali-script character.
///
/// Labels on the card are Latin transliterations while most values are in
/// Bengali, so a single native-script character is enough to classify a
/// line as a value candidate.
pub fn contains_bengali(text: &str) -> bool {
    BENGALI.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bengali_text() {
        assert!(contains_bengali("নমুনা"));
        assert!(contains_bengali("মোঃ করিম"));
    }

    #[test]
    fn detects_mixed_script() {
        assert!(contains_bengali("Ward নং ৪"));
    }

    #[test]
    fn rejects_latin_text() {
        assert!(!contains_bengali("Date of Birth"));
        assert!(!contains_bengali("01 Jan 1990"));
        assert!(!contains_bengali(""));
    }

    #[test]
    fn rejects_adjacent_unicode_blocks() {
        // Devanagari sits just below the Bengali block.
        assert!(!contains_bengali("नमूना"));
    }
}
