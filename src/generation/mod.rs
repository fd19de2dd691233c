//! Generation module - turns cover letter text and CV data into PDF documents.
//!
//! Leaves first:
//! - `fonts` - process-owned font cache with filesystem probing
//! - `language` - Turkish/English stop-word detection
//! - `title` - display titles and ASCII-safe filename tokens
//! - `composer` - block layout and PDF emission
//! - `cover_letter` - the two cover letter layouts
//! - `templates` - the five CV templates and the dispatcher

pub mod common;
pub mod composer;
pub mod cover_letter;
mod encoding;
pub mod fonts;
pub mod language;
mod metrics;
pub mod templates;
pub mod title;
pub mod traits;
pub mod validation;

pub use composer::{
    Align, Block, BlockKind, ComposedDocument, DocumentComposer, FontNames, FontStyle, Margins,
    PageSetup, TextStyle,
};
pub use fonts::FontCache;
pub use language::{detect, Language};
pub use templates::{
    CvTemplateData, DispatchError, RenderOptions, TemplateDispatcher, TemplateId,
    TemplateRegistry, TemplateRenderer,
};
pub use title::{ascii_safe, format_title};
pub use traits::{Layout, Validator};

use thiserror::Error;

/// Errors that can occur while laying out and writing a PDF.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid page setup: {0}")]
    PageSetup(String),
    #[error("layout failed: {0}")]
    Layout(String),
    #[error("failed to encode content stream: {0}")]
    Encode(String),
    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub language: Language,
}

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
