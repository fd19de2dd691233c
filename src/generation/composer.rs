//! Document composer.
//!
//! A [`ComposedDocument`] is an ordered list of styled blocks. The composer walks the
//! blocks, sets font and size on its canvas before each write, wraps text to the content
//! width and emits PDF content streams through `lopdf`. Nothing leaves the composer until
//! the whole document has been serialized into memory.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use parking_lot::RwLock;
use std::sync::Arc;

use super::encoding::{encode, encoding_dictionary, FIRST_CHAR, LAST_CHAR};
use super::fonts::FontCache;
use super::metrics::ResolvedFont;
use super::GeneratorError;

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;
const LINE_HEIGHT_FACTOR: f32 = 1.2;
const RULE_SPACING: f32 = 6.0;
const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl PageSetup {
    pub const fn a4(margins: Margins) -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margins,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    fn top(&self) -> f32 {
        self.height - self.margins.top
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0) {
            return Err(GeneratorError::PageSetup("margins must not be negative".into()));
        }
        if self.content_width() <= 0.0 || self.height - m.top - m.bottom <= 0.0 {
            return Err(GeneratorError::PageSetup(format!(
                "margins leave no room on a {}x{} page",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    fn resource_key(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size: f32,
    pub align: Align,
    pub line_gap: f32,
}

impl TextStyle {
    pub const fn new(font: FontStyle, size: f32) -> Self {
        Self {
            font,
            size,
            align: Align::Left,
            line_gap: 0.0,
        }
    }

    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub const fn line_gap(mut self, line_gap: f32) -> Self {
        self.line_gap = line_gap;
        self
    }
}

/// What a text block is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Subheading,
    Byline,
    Paragraph,
    Signature,
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text {
        kind: BlockKind,
        text: String,
        style: TextStyle,
    },
    /// Vertical gap measured in lines of the current font size.
    Space { lines: f32 },
    /// Thin horizontal line across the content width.
    Rule,
}

impl Block {
    pub fn style(&self) -> Option<&TextStyle> {
        match self {
            Block::Text { style, .. } => Some(style),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            Block::Text { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Ordered blocks plus page geometry, consumed by [`DocumentComposer::compose`].
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub title: String,
    pub page: PageSetup,
    blocks: Vec<Block>,
}

impl ComposedDocument {
    pub fn new(title: impl Into<String>, page: PageSetup) -> Self {
        Self {
            title: title.into(),
            page,
            blocks: Vec::new(),
        }
    }

    pub fn text(&mut self, kind: BlockKind, text: impl Into<String>, style: TextStyle) -> &mut Self {
        self.blocks.push(Block::Text {
            kind,
            text: text.into(),
            style,
        });
        self
    }

    pub fn space(&mut self, lines: f32) -> &mut Self {
        self.blocks.push(Block::Space { lines });
        self
    }

    pub fn rule(&mut self) -> &mut Self {
        self.blocks.push(Block::Rule);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Text blocks of one kind, in document order.
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| b.kind() == Some(kind))
    }
}

/// Font file names looked up in the [`FontCache`] for each style.
#[derive(Debug, Clone)]
pub struct FontNames {
    pub regular: String,
    pub bold: String,
    pub italic: String,
}

impl Default for FontNames {
    fn default() -> Self {
        Self {
            regular: "NotoSans-Regular".to_string(),
            bold: "NotoSans-Bold".to_string(),
            italic: "NotoSans-Italic".to_string(),
        }
    }
}

struct FontSet {
    regular: ResolvedFont,
    bold: ResolvedFont,
    italic: ResolvedFont,
}

impl FontSet {
    fn resolve(cache: &FontCache, names: &FontNames) -> Self {
        Self {
            regular: ResolvedFont::from_cache(
                &names.regular,
                FontStyle::Regular,
                cache.load(&names.regular),
            ),
            bold: ResolvedFont::from_cache(&names.bold, FontStyle::Bold, cache.load(&names.bold)),
            italic: ResolvedFont::from_cache(
                &names.italic,
                FontStyle::Italic,
                cache.load(&names.italic),
            ),
        }
    }

    fn get(&self, style: FontStyle) -> &ResolvedFont {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

/// Lays out [`ComposedDocument`]s into PDF bytes.
///
/// Fonts are looked up in the cache on the first compose and kept for the composer's
/// lifetime; a font installed later is picked up by a new composer.
pub struct DocumentComposer {
    fonts: Arc<FontCache>,
    font_names: FontNames,
    resolved: RwLock<Option<Arc<FontSet>>>,
}

impl DocumentComposer {
    pub fn new(fonts: Arc<FontCache>) -> Self {
        Self::with_font_names(fonts, FontNames::default())
    }

    pub fn with_font_names(fonts: Arc<FontCache>, font_names: FontNames) -> Self {
        Self {
            fonts,
            font_names,
            resolved: RwLock::new(None),
        }
    }

    fn font_set(&self) -> Arc<FontSet> {
        if let Some(fonts) = self.resolved.read().as_ref() {
            return fonts.clone();
        }

        let fonts = Arc::new(FontSet::resolve(&self.fonts, &self.font_names));
        *self.resolved.write() = Some(fonts.clone());
        fonts
    }

    /// Render the document. On error nothing is returned and the partial buffer is dropped.
    pub fn compose(&self, document: &ComposedDocument) -> Result<Vec<u8>, GeneratorError> {
        document.page.validate()?;

        let fonts = self.font_set();
        let mut canvas = Canvas::new(document.page, &fonts);

        for block in document.blocks() {
            match block {
                Block::Text { text, style, .. } => {
                    canvas.set_font(style.font);
                    canvas.set_font_size(style.size);
                    canvas.write(text, style.align, style.line_gap)?;
                }
                Block::Space { lines } => canvas.move_down(*lines),
                Block::Rule => canvas.rule(),
            }
        }

        canvas.finish(&document.title)
    }
}

/// Mutable drawing state: current font, size, cursor and finished pages.
struct Canvas<'a> {
    page: PageSetup,
    fonts: &'a FontSet,
    pages: Vec<Vec<Operation>>,
    operations: Vec<Operation>,
    cursor_y: f32,
    font: FontStyle,
    size: f32,
}

impl<'a> Canvas<'a> {
    fn new(page: PageSetup, fonts: &'a FontSet) -> Self {
        Self {
            page,
            fonts,
            pages: Vec::new(),
            operations: Vec::new(),
            cursor_y: page.top(),
            font: FontStyle::Regular,
            size: 12.0,
        }
    }

    fn set_font(&mut self, font: FontStyle) {
        self.font = font;
    }

    fn set_font_size(&mut self, size: f32) {
        self.size = size;
    }

    fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_FACTOR
    }

    fn move_down(&mut self, lines: f32) {
        self.cursor_y -= lines * self.line_height();
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.operations));
        self.cursor_y = self.page.top();
    }

    fn write(&mut self, text: &str, align: Align, line_gap: f32) -> Result<(), GeneratorError> {
        if self.size <= 0.0 {
            return Err(GeneratorError::Layout(format!(
                "font size must be positive, got {}",
                self.size
            )));
        }

        let fonts = self.fonts;
        let font = fonts.get(self.font);
        let max_width = self.page.content_width();

        for hard_line in text.split('\n') {
            let words: Vec<Vec<u8>> = hard_line.split_whitespace().map(encode).collect();
            if words.is_empty() {
                self.advance(line_gap)?;
                continue;
            }

            let lines = wrap_words(&words, font, self.size, max_width)?;
            let count = lines.len();
            for (i, line) in lines.into_iter().enumerate() {
                self.emit_line(&line, align, i + 1 == count, line_gap)?;
            }
        }

        Ok(())
    }

    /// Reserve one line of height, breaking the page when it does not fit.
    fn advance(&mut self, line_gap: f32) -> Result<f32, GeneratorError> {
        let height = self.line_height();
        if self.cursor_y - height < self.page.margins.bottom {
            if self.cursor_y >= self.page.top() {
                return Err(GeneratorError::Layout(format!(
                    "a {}pt line does not fit between the page margins",
                    self.size
                )));
            }
            self.new_page();
        }

        let top = self.cursor_y;
        self.cursor_y -= height + line_gap;
        Ok(top)
    }

    fn emit_line(
        &mut self,
        line: &[u8],
        align: Align,
        last_in_paragraph: bool,
        line_gap: f32,
    ) -> Result<(), GeneratorError> {
        let top = self.advance(line_gap)?;
        let font = self.fonts.get(self.font);
        let max_width = self.page.content_width();
        let width = font.text_width(line, self.size);
        let left = self.page.margins.left;

        let x = match align {
            Align::Left | Align::Justify => left,
            Align::Center => left + (max_width - width) / 2.0,
            Align::Right => left + max_width - width,
        };

        let spaces = line.iter().filter(|b| **b == b' ').count();
        let word_spacing = if align == Align::Justify && !last_in_paragraph && spaces > 0 {
            (max_width - width) / spaces as f32
        } else {
            0.0
        };

        let baseline = top - self.size;
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![self.font.resource_key().into(), self.size.into()],
            ),
            Operation::new("Tw", vec![word_spacing.into()]),
            Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    x.into(),
                    baseline.into(),
                ],
            ),
            Operation::new("Tj", vec![Object::string_literal(line.to_vec())]),
            Operation::new("ET", vec![]),
        ]);

        Ok(())
    }

    fn rule(&mut self) {
        if self.cursor_y - RULE_SPACING < self.page.margins.bottom {
            self.new_page();
        }
        let y = self.cursor_y - RULE_SPACING / 2.0;
        let left = self.page.margins.left;
        let right = self.page.width - self.page.margins.right;
        self.operations.extend([
            Operation::new("w", vec![0.5.into()]),
            Operation::new("m", vec![left.into(), y.into()]),
            Operation::new("l", vec![right.into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
        self.cursor_y -= RULE_SPACING;
    }

    fn finish(mut self, title: &str) -> Result<Vec<u8>, GeneratorError> {
        self.pages.push(std::mem::take(&mut self.operations));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let encoding_id = doc.add_object(encoding_dictionary());
        let mut programs = EmbeddedPrograms::default();
        let mut font_resources = lopdf::Dictionary::new();
        for style in [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic] {
            let font_id = add_font(&mut doc, self.fonts.get(style), encoding_id, &mut programs);
            font_resources.set(style.resource_key(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_resources });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| GeneratorError::Encode(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.page.width.into(),
            self.page.height.into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => lopdf::text_string(title),
            "Producer" => Object::string_literal(PRODUCER),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| GeneratorError::Write(e.to_string()))?;
        Ok(buffer)
    }
}

/// `FontFile2` streams already written, keyed by the cached font bytes.
#[derive(Default)]
struct EmbeddedPrograms {
    written: Vec<(Arc<[u8]>, ObjectId)>,
}

impl EmbeddedPrograms {
    fn get_or_add(&mut self, doc: &mut Document, data: &Arc<[u8]>) -> ObjectId {
        if let Some((_, id)) = self.written.iter().find(|(d, _)| Arc::ptr_eq(d, data)) {
            return *id;
        }
        let id = doc.add_object(Stream::new(
            dictionary! { "Length1" => data.len() as i64 },
            data.to_vec(),
        ));
        self.written.push((data.clone(), id));
        id
    }
}

fn add_font(
    doc: &mut Document,
    font: &ResolvedFont,
    encoding_id: ObjectId,
    programs: &mut EmbeddedPrograms,
) -> ObjectId {
    match font {
        ResolvedFont::Standard { base_font, .. } => doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => *base_font,
            "Encoding" => encoding_id,
        }),
        ResolvedFont::TrueType(tt) => {
            let file_id = programs.get_or_add(doc, &tt.data);
            // Nonsymbolic, plus Italic when drawn slanted.
            let flags: i64 = if tt.italic { 32 | 64 } else { 32 };
            let descriptor_id = doc.add_object(dictionary! {
                "Type" => "FontDescriptor",
                "FontName" => tt.base_font.as_str(),
                "Flags" => flags,
                "FontBBox" => tt.bbox.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
                "ItalicAngle" => if tt.italic { -12 } else { 0 },
                "Ascent" => tt.ascent,
                "Descent" => tt.descent,
                "CapHeight" => tt.cap_height,
                "StemV" => 80,
                "FontFile2" => file_id,
            });
            let widths: Vec<Object> = tt
                .widths
                .iter()
                .map(|w| Object::Integer(*w as i64))
                .collect();
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "TrueType",
                "BaseFont" => tt.base_font.as_str(),
                "FirstChar" => FIRST_CHAR as i64,
                "LastChar" => LAST_CHAR as i64,
                "Widths" => widths,
                "FontDescriptor" => descriptor_id,
                "Encoding" => encoding_id,
            })
        }
    }
}

/// Greedy word wrap. Words wider than the line are split between characters.
fn wrap_words(
    words: &[Vec<u8>],
    font: &ResolvedFont,
    size: f32,
    max_width: f32,
) -> Result<Vec<Vec<u8>>, GeneratorError> {
    let space_width = font.text_width(b" ", size);
    let mut lines = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut current_width = 0.0f32;

    for word in words {
        let word_width = font.text_width(word, size);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            let mut pieces = split_long_word(word, font, size, max_width)?;
            if let Some(tail) = pieces.pop() {
                lines.extend(pieces);
                current_width = font.text_width(&tail, size);
                current = tail;
            }
            continue;
        }

        if current.is_empty() {
            current.extend_from_slice(word);
            current_width = word_width;
        } else if current_width + space_width + word_width <= max_width {
            current.push(b' ');
            current.extend_from_slice(word);
            current_width += space_width + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.clone()));
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

fn split_long_word(
    word: &[u8],
    font: &ResolvedFont,
    size: f32,
    max_width: f32,
) -> Result<Vec<Vec<u8>>, GeneratorError> {
    let mut pieces = Vec::new();
    let mut piece = Vec::new();
    let mut width = 0.0f32;

    for &byte in word {
        let w = font.byte_width(byte) as f32 * size / 1000.0;
        if w > max_width {
            return Err(GeneratorError::Layout(format!(
                "a single glyph at {}pt is wider than the {}pt content area",
                size, max_width
            )));
        }
        if width + w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(byte);
        width += w;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    Ok(pieces)
}
