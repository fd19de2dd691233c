//! `stylish-accounting`: large name, uppercase ruled sections, certificates up front.

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
    Section::Certificates,
    Section::Education,
    Section::Skills,
    Section::Languages,
    Section::References,
];

pub struct StylishAccountingTemplate {
    composer: Arc<DocumentComposer>,
}

impl StylishAccountingTemplate {
    pub fn new(composer: Arc<DocumentComposer>) -> Self {
        Self { composer }
    }

    pub fn layout(data: &CvTemplateData, language: Language) -> ComposedDocument {
        let palette = Palette::left(26.0, 10.0)
            .uppercase_sections()
            .rule_under_sections()
            .contact_separator(" / ");
        let mut doc = ComposedDocument::new(document_title(data), PageSetup::a4(Margins::uniform(50.0)));

        push_header(&mut doc, data, &palette);
        doc.rule();
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

impl TemplateRenderer for StylishAccountingTemplate {
    fn render(&self, data: &Value, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let data = CvTemplateData::from_value(data)?;
        let doc = Self::layout(&data, options.label_language(Language::English));
        Ok(self.composer.compose(&doc)?)
    }
}
