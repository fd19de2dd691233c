//! `minimalist-turkish`: Turkish labels unless the turkey version asks for English.

use serde_json::Value;
use std::sync::Arc;

use crate::generation::composer::{ComposedDocument, DocumentComposer, Margins, PageSetup};
use crate::generation::language::Language;

use super::common::{document_title, push_header, push_sections, Palette, Section, SectionLabels};
use super::data::CvTemplateData;
use super::{RenderError, RenderOptions, TemplateRenderer};

const SECTIONS: [Section; 7] = [
    Section::Objective,
    Section::Experience,
    Section::Education,
    Section::Skills,
    Section::Languages,
    Section::Certificates,
    Section::References,
];

pub struct MinimalistTurkishTemplate {
    composer: Arc<DocumentComposer>,
}

impl MinimalistTurkishTemplate {
    pub fn new(composer: Arc<DocumentComposer>) -> Self {
        Self { composer }
    }

    pub fn layout(data: &CvTemplateData, language: Language) -> ComposedDocument {
        let palette = Palette::left(18.0, 10.0).contact_separator(" · ");
        let mut doc = ComposedDocument::new(document_title(data), PageSetup::a4(Margins::uniform(60.0)));

        push_header(&mut doc, data, &palette);
        push_sections(
            &mut doc,
            data,
            &SECTIONS,
            SectionLabels::for_language(language),
            &palette,
        );
        doc
    }
}

impl TemplateRenderer for MinimalistTurkishTemplate {
    fn render(&self, data: &Value, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let data = CvTemplateData::from_value(data)?;
        let doc = Self::layout(&data, options.label_language(Language::Turkish));
        Ok(self.composer.compose(&doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::composer::BlockKind;
    use serde_json::json;

    fn headings(language: Language) -> Vec<String> {
        let data = CvTemplateData::from_value(&json!({
            "personalInfo": { "fullName": "Ali Veli" },
            "skills": ["Excel"]
        }))
        .unwrap();
        MinimalistTurkishTemplate::layout(&data, language)
            .blocks_of(BlockKind::Subheading)
            .filter_map(|b| b.text().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_default_labels_are_turkish() {
        let options = RenderOptions::default();
        assert_eq!(headings(options.label_language(Language::Turkish)), vec!["Yetenekler"]);
    }

    #[test]
    fn test_turkey_english_switches_labels() {
        let options = RenderOptions::validate(Some("turkey"), Some("english")).unwrap();
        assert_eq!(headings(options.label_language(Language::Turkish)), vec!["Skills"]);
    }
}
