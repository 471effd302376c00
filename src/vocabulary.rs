//! Vocabulary of recognised areas and crops
//!
//! The model was trained against a fixed set of country/area names and crop
//! names. Free-text input from the form is normalised against that set before
//! it reaches the feature transformer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the vocabulary file
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("vocabulary list '{list}' contains an empty entry at index {index}")]
    EmptyEntry { list: &'static str, index: usize },

    #[error("vocabulary list '{list}' is empty")]
    EmptyList { list: &'static str },
}

/// On-disk shape of `valid_inputs.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidInputs {
    pub areas: Vec<String>,
    pub items: Vec<String>,
}

/// Immutable vocabulary with lower-cased lookup columns
///
/// `areas_lower[i]` is always `areas[i].to_lowercase()`, same for items.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    inputs: ValidInputs,
    areas_lower: Vec<String>,
    items_lower: Vec<String>,
}

impl Vocabulary {
    pub fn new(inputs: ValidInputs) -> Result<Self, VocabularyError> {
        check_list("areas", &inputs.areas)?;
        check_list("items", &inputs.items)?;

        let areas_lower = inputs.areas.iter().map(|a| a.to_lowercase()).collect();
        let items_lower = inputs.items.iter().map(|i| i.to_lowercase()).collect();

        Ok(Self {
            inputs,
            areas_lower,
            items_lower,
        })
    }

    /// Load `valid_inputs.json`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: display.clone(),
            source,
        })?;
        let inputs: ValidInputs =
            serde_json::from_str(&text).map_err(|source| VocabularyError::Parse {
                path: display,
                source,
            })?;
        Self::new(inputs)
    }

    pub fn areas(&self) -> &[String] {
        &self.inputs.areas
    }

    pub fn items(&self) -> &[String] {
        &self.inputs.items
    }

    pub fn valid_inputs(&self) -> &ValidInputs {
        &self.inputs
    }

    pub fn match_area(&self, input: &str) -> Option<&str> {
        find_closest(input, &self.areas_lower, &self.inputs.areas)
    }

    pub fn match_item(&self, input: &str) -> Option<&str> {
        find_closest(input, &self.items_lower, &self.inputs.items)
    }
}

fn check_list(list: &'static str, entries: &[String]) -> Result<(), VocabularyError> {
    if entries.is_empty() {
        return Err(VocabularyError::EmptyList { list });
    }
    // An empty entry would be a substring of every input.
    if let Some(index) = entries.iter().position(|e| e.trim().is_empty()) {
        return Err(VocabularyError::EmptyEntry { list, index });
    }
    Ok(())
}

/// Find the closest vocabulary entry for free-text input
///
/// Exact (case-insensitive, trimmed) match first, then the first entry in list
/// order where either string contains the other. Returns the original-cased
/// entry from `valid_original`.
pub fn find_closest<'a>(
    input: &str,
    valid_lower: &[String],
    valid_original: &'a [String],
) -> Option<&'a str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(idx) = valid_lower.iter().position(|v| *v == needle) {
        return valid_original.get(idx).map(String::as_str);
    }

    valid_lower
        .iter()
        .position(|v| v.contains(&needle) || needle.contains(v.as_str()))
        .and_then(|idx| valid_original.get(idx))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Vocabulary {
        Vocabulary::new(ValidInputs {
            areas: vec![
                "India".to_string(),
                "Indonesia".to_string(),
                "United Kingdom".to_string(),
                "Niger".to_string(),
                "Nigeria".to_string(),
            ],
            items: vec![
                "Maize".to_string(),
                "Potatoes".to_string(),
                "Rice, paddy".to_string(),
                "Sweet potatoes".to_string(),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_exact_match_is_case_and_whitespace_insensitive() {
        let vocab = sample();
        assert_eq!(vocab.match_area("  india "), Some("India"));
        assert_eq!(vocab.match_area("UNITED KINGDOM"), Some("United Kingdom"));
        assert_eq!(vocab.match_item("rice, PADDY"), Some("Rice, paddy"));
    }

    #[test]
    fn test_exact_match_beats_earlier_substring() {
        let vocab = sample();
        // "niger" is contained in "nigeria" but the exact entry wins.
        assert_eq!(vocab.match_area("Nigeria"), Some("Nigeria"));
        assert_eq!(vocab.match_area("niger"), Some("Niger"));
    }

    #[test]
    fn test_substring_match_returns_containing_entry() {
        let vocab = sample();
        assert_eq!(vocab.match_area("kingdom"), Some("United Kingdom"));
        assert_eq!(vocab.match_item("paddy"), Some("Rice, paddy"));
    }

    #[test]
    fn test_input_containing_entry_matches() {
        let vocab = sample();
        assert_eq!(vocab.match_item("yellow maize grain"), Some("Maize"));
    }

    #[test]
    fn test_substring_first_in_list_order_wins() {
        let vocab = sample();
        // Both "Potatoes" and "Sweet potatoes" contain "potato".
        assert_eq!(vocab.match_item("potato"), Some("Potatoes"));
        // "Ind" is in both India and Indonesia.
        assert_eq!(vocab.match_area("ind"), Some("India"));
    }

    #[test]
    fn test_no_match() {
        let vocab = sample();
        assert_eq!(vocab.match_area("Atlantis"), None);
        assert_eq!(vocab.match_item("Quinoa"), None);
    }

    #[test]
    fn test_empty_input_never_matches() {
        let vocab = sample();
        assert_eq!(vocab.match_area(""), None);
        assert_eq!(vocab.match_item("   "), None);
    }

    #[test]
    fn test_rejects_empty_entries() {
        let err = Vocabulary::new(ValidInputs {
            areas: vec!["India".to_string(), " ".to_string()],
            items: vec!["Maize".to_string()],
        })
        .unwrap_err();
        assert!(matches!(
            err,
            VocabularyError::EmptyEntry {
                list: "areas",
                index: 1
            }
        ));

        let err = Vocabulary::new(ValidInputs {
            areas: vec!["India".to_string()],
            items: vec![],
        })
        .unwrap_err();
        assert!(matches!(err, VocabularyError::EmptyList { list: "items" }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid_inputs.json");
        std::fs::write(&path, r#"{"areas": ["Albania"], "items": ["Wheat"]}"#).unwrap();

        let vocab = Vocabulary::from_file(&path).unwrap();
        assert_eq!(vocab.areas(), ["Albania".to_string()]);
        assert_eq!(vocab.match_item("wheat"), Some("Wheat"));

        let missing = Vocabulary::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, VocabularyError::Io { .. }));
    }

    proptest! {
        #[test]
        fn prop_exact_entry_returns_itself(
            entries in proptest::collection::hash_set("[a-z]{3,10}( [a-z]{2,8})?", 1..12),
            pick in any::<proptest::sample::Index>(),
            upper in any::<bool>(),
            pad in "[ \t]{0,3}",
        ) {
            let areas: Vec<String> = entries.into_iter().collect();
            let chosen = pick.get(&areas).clone();
            let vocab = Vocabulary::new(ValidInputs {
                areas: areas.clone(),
                items: vec!["Maize".to_string()],
            }).unwrap();

            let cased = if upper { chosen.to_uppercase() } else { chosen.clone() };
            let input = format!("{pad}{cased}{pad}");
            prop_assert_eq!(vocab.match_area(&input), Some(chosen.as_str()));
        }

        #[test]
        fn prop_unrelated_input_is_not_found(input in "[0-9]{1,6}") {
            let vocab = sample();
            prop_assert_eq!(vocab.match_area(&input), None);
            prop_assert_eq!(vocab.match_item(&input), None);
        }
    }
}
