//! Common utilities for document generation.
//!
//! Shared helpers for date lines and bundled asset locations.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::language::Language;

/// Format a date the way the letter's locale writes it.
///
/// Turkish letters use `18.10.2026`, English letters use `10/18/2026`.
pub fn format_letter_date(date: NaiveDate, language: Language) -> String {
    match language {
        Language::Turkish => date.format("%d.%m.%Y").to_string(),
        Language::English => date.format("%-m/%-d/%Y").to_string(),
    }
}

/// Get the bundled assets directory path.
pub fn get_assets_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

/// Candidate font directories, most specific first.
pub fn default_font_dirs(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = configured {
        dirs.push(dir.to_path_buf());
    }
    dirs.push(PathBuf::from("assets").join("fonts"));
    dirs.push(PathBuf::from("src").join("assets").join("fonts"));
    dirs.push(get_assets_dir().join("fonts"));
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_letter_date(date, Language::Turkish), "07.03.2026");
    }

    #[test]
    fn test_english_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_letter_date(date, Language::English), "3/7/2026");
    }

    #[test]
    fn test_configured_font_dir_comes_first() {
        let dirs = default_font_dirs(Some(Path::new("/opt/fonts")));
        assert_eq!(dirs[0], PathBuf::from("/opt/fonts"));
        assert_eq!(dirs.len(), 4);
    }
}
