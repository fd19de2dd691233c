//! `basic-hr`: centered header, ruled section titles.

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

pub struct BasicHrTemplate {
    composer: Arc<DocumentComposer>,
}

impl BasicHrTemplate {
    pub fn new(composer: Arc<DocumentComposer>) -> Self {
        Self { composer }
    }

    pub fn layout(data: &CvTemplateData, language: Language) -> ComposedDocument {
        let palette = Palette::centered(22.0, 10.0).rule_under_sections();
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

impl TemplateRenderer for BasicHrTemplate {
    fn render(&self, data: &Value, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let data = CvTemplateData::from_value(data)?;
        let doc = Self::layout(&data, options.label_language(Language::English));
        Ok(self.composer.compose(&doc)?)
    }
}
