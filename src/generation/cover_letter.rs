//! Cover letter layouts.
//!
//! `SimpleLetter` is used when a stored letter is downloaded; `FormattedLetter` renders
//! text the user edited by hand. Both only build blocks, the composer does the rest.

use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::common::format_letter_date;
use super::composer::{
    Align, BlockKind, ComposedDocument, FontStyle, Margins, PageSetup, TextStyle,
};
use super::language::Language;
use super::title::cover_letter_heading;
use super::traits::Layout;

lazy_static! {
    static ref BLANK_LINE: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Paragraph text that marks a greeting or sign-off.
const EMPHASIS_MARKERS: [&str; 4] = ["Saygılarımla", "Best regards", "Merhaba", "Hello"];

/// Split on blank lines; trimmed, empty paragraphs dropped.
pub fn paragraphs(content: &str) -> Vec<&str> {
    BLANK_LINE
        .split(content)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn is_emphasized(paragraph: &str) -> bool {
    EMPHASIS_MARKERS.iter().any(|m| paragraph.contains(m))
}

fn footer_text(language: Language) -> &'static str {
    match language {
        Language::Turkish => "Bu ön yazı ATS sistemleri için optimize edilmiştir.",
        Language::English => "This cover letter is optimized for ATS systems.",
    }
}

#[derive(Debug, Clone)]
pub struct SimpleLetter<'a> {
    pub company: &'a str,
    pub position: &'a str,
    pub content: &'a str,
    pub language: Language,
}

impl Layout for SimpleLetter<'_> {
    fn build(&self) -> ComposedDocument {
        let heading = cover_letter_heading(self.company, self.position, self.language);
        let mut doc = ComposedDocument::new(heading.clone(), PageSetup::a4(Margins::uniform(72.0)));

        doc.text(
            BlockKind::Heading,
            heading,
            TextStyle::new(FontStyle::Bold, 20.0).align(Align::Center),
        );
        doc.space(2.0);

        let body = TextStyle::new(FontStyle::Regular, 12.0).line_gap(4.0);
        for (i, paragraph) in paragraphs(self.content).into_iter().enumerate() {
            if i > 0 {
                doc.space(1.0);
            }
            doc.text(BlockKind::Paragraph, paragraph, body);
        }

        doc.space(2.0);
        doc.text(
            BlockKind::Footer,
            footer_text(self.language),
            TextStyle::new(FontStyle::Italic, 10.0).align(Align::Center),
        );
        doc
    }
}

#[derive(Debug, Clone)]
pub struct FormattedLetter<'a> {
    pub company: &'a str,
    pub position: &'a str,
    pub content: &'a str,
    pub language: Language,
    pub full_name: Option<&'a str>,
    pub date: NaiveDate,
}

impl<'a> FormattedLetter<'a> {
    /// Letter dated today.
    pub fn new(
        company: &'a str,
        position: &'a str,
        content: &'a str,
        language: Language,
        full_name: Option<&'a str>,
    ) -> Self {
        Self {
            company,
            position,
            content,
            language,
            full_name,
            date: Local::now().date_naive(),
        }
    }
}

impl Layout for FormattedLetter<'_> {
    fn build(&self) -> ComposedDocument {
        let heading = format!("{} - {}", self.company, self.position);
        let page = PageSetup::a4(Margins::new(50.0, 60.0, 50.0, 60.0));
        let mut doc = ComposedDocument::new(heading.clone(), page);

        doc.text(
            BlockKind::Heading,
            heading,
            TextStyle::new(FontStyle::Bold, 16.0).align(Align::Center),
        );
        doc.space(1.0);
        doc.text(
            BlockKind::Byline,
            format_letter_date(self.date, self.language),
            TextStyle::new(FontStyle::Regular, 10.0).align(Align::Right),
        );
        doc.space(1.5);

        for (i, paragraph) in paragraphs(self.content).into_iter().enumerate() {
            if i > 0 {
                doc.space(0.8);
            }
            let font = if is_emphasized(paragraph) {
                FontStyle::Bold
            } else {
                FontStyle::Regular
            };
            doc.text(
                BlockKind::Paragraph,
                paragraph,
                TextStyle::new(font, 11.0)
                    .align(Align::Justify)
                    .line_gap(3.0),
            );
        }

        if let Some(name) = self.full_name.map(str::trim).filter(|n| !n.is_empty()) {
            doc.space(1.0);
            doc.text(
                BlockKind::Signature,
                name,
                TextStyle::new(FontStyle::Italic, 9.0),
            );
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_skip_blank_runs() {
        let parts = paragraphs("One.\n\n\n  \nTwo.\n\n   ");
        assert_eq!(parts, vec!["One.", "Two."]);
    }

    #[test]
    fn test_simple_layout_uses_language_heading_and_footer() {
        let doc = SimpleLetter {
            company: "Acme",
            position: "Engineer",
            content: "Bu bir test.",
            language: Language::Turkish,
        }
        .build();

        let heading = doc.blocks_of(BlockKind::Heading).next().unwrap();
        assert_eq!(heading.text(), Some("Acme - Engineer Pozisyonu İçin Ön Yazı"));
        let footer = doc.blocks_of(BlockKind::Footer).next().unwrap();
        assert_eq!(footer.style().unwrap().font, FontStyle::Italic);
    }

    #[test]
    fn test_formatted_layout_skips_empty_signature() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let doc = FormattedLetter {
            company: "Acme",
            position: "Engineer",
            content: "Text.",
            language: Language::English,
            full_name: Some("  "),
            date,
        }
        .build();

        assert_eq!(doc.blocks_of(BlockKind::Signature).count(), 0);
        let byline = doc.blocks_of(BlockKind::Byline).next().unwrap();
        assert_eq!(byline.text(), Some("1/2/2026"));
    }
}
