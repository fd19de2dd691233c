//! Language detection for letter content.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

const TURKISH_WORDS: [&str; 10] = [
    "ve", "ile", "için", "bir", "bu", "şu", "olan", "çok", "değil", "gibi",
];
const ENGLISH_WORDS: [&str; 10] = [
    "and", "with", "for", "the", "this", "that", "which", "very", "not", "like",
];

/// The two languages documents are produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Turkish,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Turkish => "TURKISH",
            Self::English => "ENGLISH",
        }
    }

    /// Parse the lowercase form used by CV requests (`turkish` / `english`).
    pub fn from_cv_param(value: &str) -> Option<Self> {
        match value {
            "turkish" => Some(Self::Turkish),
            "english" => Some(Self::English),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify text by counting stop words of each language.
///
/// Turkish wins only with a strictly higher count, so ties and empty text are English.
pub fn detect(text: &str) -> Language {
    let mut turkish_score = 0usize;
    let mut english_score = 0usize;

    for word in text.split_whitespace() {
        let word = word.to_lowercase();
        if TURKISH_WORDS.contains(&word.as_str()) {
            turkish_score += 1;
        }
        if ENGLISH_WORDS.contains(&word.as_str()) {
            english_score += 1;
        }
    }

    if turkish_score > english_score {
        Language::Turkish
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_resolves_to_english() {
        assert_eq!(detect("ve and"), Language::English);
    }

    #[test]
    fn test_uppercase_tokens_are_lowercased() {
        assert_eq!(detect("VE BİR Gibi"), Language::Turkish);
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&Language::Turkish).unwrap();
        assert_eq!(json, "\"TURKISH\"");
    }
}
