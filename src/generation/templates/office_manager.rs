//! `office-manager`: left aligned header, skills ahead of education.

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
    Section::Skills,
    Section::Education,
    Section::Languages,
    Section::Certificates,
    Section::References,
];

pub struct OfficeManagerTemplate {
    composer: Arc<DocumentComposer>,
}

impl OfficeManagerTemplate {
    pub fn new(composer: Arc<DocumentComposer>) -> Self {
        Self { composer }
    }

    pub fn layout(data: &CvTemplateData, language: Language) -> ComposedDocument {
        let palette = Palette::left(24.0, 10.0)
            .uppercase_sections()
            .contact_separator(" • ");
        let page = PageSetup::a4(Margins::new(45.0, 55.0, 45.0, 55.0));
        let mut doc = ComposedDocument::new(document_title(data), page);

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

impl TemplateRenderer for OfficeManagerTemplate {
    fn render(&self, data: &Value, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let data = CvTemplateData::from_value(data)?;
        let doc = Self::layout(&data, options.label_language(Language::English));
        Ok(self.composer.compose(&doc)?)
    }
}
