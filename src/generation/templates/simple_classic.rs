use serde_json::Value;
use std::sync::Arc;

use crate::generation::composer::{ComposedDocument, DocumentComposer, Margins, PageSetup};
use crate::generation::language::Language;

use super::common::{document_title, push_header, push_sections, Palette, Section, SectionLabels};
use super::data::CvTemplateData;
use super::{RenderError, RenderOptions, TemplateRenderer};

const SECTIONS: [Section; 7] = [
    Section::Objective,
    Section::Education,
    Section::Experience,
    Section::Skills,
    Section::Languages,
    Section::Certificates,
    Section::References,
];

pub struct SimpleClassicTemplate {
    composer: Arc<DocumentComposer>,
}

impl SimpleClassicTemplate {
    pub fn new(composer: Arc<DocumentComposer>) -> Self {
        Self { composer }
    }

    pub fn layout(data: &CvTemplateData, language: Language) -> ComposedDocument {
        let palette = Palette::centered(20.0, 11.0).justify_body();
        let mut doc = ComposedDocument::new(document_title(data), PageSetup::a4(Margins::uniform(72.0)));

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

impl TemplateRenderer for SimpleClassicTemplate {
    fn render(&self, data: &Value, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let data = CvTemplateData::from_value(data)?;
        let doc = Self::layout(&data, options.label_language(Language::English));
        Ok(self.composer.compose(&doc)?)
    }
}
