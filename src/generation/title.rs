//! Display titles and filename tokens.

use lazy_static::lazy_static;
use regex::Regex;

use super::language::Language;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_\s]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize free text into a title.
///
/// Anything outside ASCII word characters and whitespace becomes a space, so Turkish
/// letters do not survive this step.
pub fn format_title(text: &str) -> String {
    let stripped = NON_WORD.replace_all(text, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");

    collapsed
        .trim()
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

fn transliterate_turkish(ch: char) -> char {
    match ch {
        'Ç' => 'C',
        'ç' => 'c',
        'Ğ' => 'G',
        'ğ' => 'g',
        'İ' => 'I',
        'ı' => 'i',
        'Ö' => 'O',
        'ö' => 'o',
        'Ş' => 'S',
        'ş' => 's',
        'Ü' => 'U',
        'ü' => 'u',
        other => other,
    }
}

/// Reduce text to `[A-Za-z0-9_]` for filenames and `Content-Disposition` headers.
///
/// Underscores survive the filter, which keeps the function idempotent.
pub fn ascii_safe(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.chars().map(transliterate_turkish) {
        if ch.is_whitespace() {
            if !in_whitespace {
                result.push('_');
                in_whitespace = true;
            }
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            result.push(ch);
            in_whitespace = false;
        }
    }

    result
}

/// Which cover letter rendering a filename is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverLetterKind {
    Stored,
    Edited,
}

/// `<Company>_<Position>_Cover_Letter.pdf` or the `Edited_` variant.
pub fn cover_letter_filename(company: &str, position: &str, kind: CoverLetterKind) -> String {
    let suffix = match kind {
        CoverLetterKind::Stored => "Cover_Letter",
        CoverLetterKind::Edited => "Edited_Cover_Letter",
    };
    format!(
        "{}_{}_{}.pdf",
        ascii_safe(&format_title(company)),
        ascii_safe(&format_title(position)),
        suffix
    )
}

/// `cv-<id>.pdf`
pub fn cv_filename(id: &impl std::fmt::Display) -> String {
    format!("cv-{}.pdf", id)
}

/// The heading line of the simple cover letter layout.
pub fn cover_letter_heading(company: &str, position: &str, language: Language) -> String {
    match language {
        Language::Turkish => format!("{} - {} Pozisyonu İçin Ön Yazı", company, position),
        Language::English => format!("Cover Letter for {} Position at {}", position, company),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_title_title_cases_words() {
        assert_eq!(format_title("senior   SOFTWARE engineer"), "Senior Software Engineer");
    }

    #[test]
    fn test_format_title_replaces_punctuation() {
        assert_eq!(format_title("R&D / Platform"), "R D Platform");
    }

    #[test]
    fn test_ascii_safe_transliterates() {
        assert_eq!(ascii_safe("Şirket Çalışanı"), "Sirket_Calisani");
    }

    #[test]
    fn test_ascii_safe_collapses_whitespace() {
        assert_eq!(ascii_safe("a  \t b"), "a_b");
    }
}
