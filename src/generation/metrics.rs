//! Glyph widths for line breaking and the font objects that go with them.
//!
//! A font loaded from the cache is embedded as a simple TrueType font with widths read
//! from its `hmtx` table. An empty or unreadable font falls back to the matching member
//! of the built-in Helvetica family, measured with its published AFM widths.

use std::sync::Arc;
use ttf_parser::{Face, GlyphId};

use super::composer::FontStyle;
use super::encoding::{decode_byte, FIRST_CHAR, LAST_CHAR};

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const DEFAULT_WIDTH: u16 = 556;

/// Font data ready to be measured and written.
#[derive(Debug, Clone)]
pub enum ResolvedFont {
    Standard {
        base_font: &'static str,
        widths: &'static [u16; 95],
    },
    TrueType(TrueTypeFont),
}

/// An embeddable TrueType program with its width table for codes 32..=255.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    pub base_font: String,
    pub data: Arc<[u8]>,
    pub widths: Vec<u16>,
    pub ascent: i64,
    pub descent: i64,
    pub cap_height: i64,
    pub bbox: [i64; 4],
    pub italic: bool,
}

impl ResolvedFont {
    /// Built-in font for a style.
    pub fn standard(style: FontStyle) -> Self {
        match style {
            FontStyle::Regular => Self::Standard {
                base_font: "Helvetica",
                widths: &HELVETICA_WIDTHS,
            },
            FontStyle::Bold => Self::Standard {
                base_font: "Helvetica-Bold",
                widths: &HELVETICA_BOLD_WIDTHS,
            },
            FontStyle::Italic => Self::Standard {
                base_font: "Helvetica-Oblique",
                widths: &HELVETICA_WIDTHS,
            },
        }
    }

    /// Use the cached bytes when they parse as a font, the built-in font otherwise.
    pub fn from_cache(name: &str, style: FontStyle, data: Arc<[u8]>) -> Self {
        if data.is_empty() {
            return Self::standard(style);
        }

        match TrueTypeFont::parse(name, style, data) {
            Ok(font) => Self::TrueType(font),
            Err(e) => {
                log::warn!("Font '{}' could not be parsed ({}), using default font", name, e);
                Self::standard(style)
            }
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::TrueType(_))
    }

    /// Advance width of one encoded byte, in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> u16 {
        match self {
            Self::Standard { widths, .. } => standard_width(widths, byte),
            Self::TrueType(font) => {
                if byte < FIRST_CHAR {
                    return 0;
                }
                font.widths
                    .get((byte - FIRST_CHAR) as usize)
                    .copied()
                    .unwrap_or(DEFAULT_WIDTH)
            }
        }
    }

    /// Width of encoded text at `size` points.
    pub fn text_width(&self, bytes: &[u8], size: f32) -> f32 {
        let units: u32 = bytes.iter().map(|b| self.byte_width(*b) as u32).sum();
        units as f32 * size / 1000.0
    }
}

fn standard_width(widths: &[u16; 95], byte: u8) -> u16 {
    if (32..=126).contains(&byte) {
        return widths[(byte - 32) as usize];
    }

    match decode_byte(byte) {
        Some('\u{A0}') => widths[0],
        Some('…') | Some('—') | Some('‰') | Some('™') => 1000,
        Some('‘') | Some('’') | Some('‚') => 222,
        Some('“') | Some('”') | Some('„') => 333,
        Some('•') => 350,
        Some(ch) => {
            let base = fold_accent(ch);
            if base.is_ascii() && base != ch {
                widths[(base as u8 - 32) as usize]
            } else {
                DEFAULT_WIDTH
            }
        }
        None => DEFAULT_WIDTH,
    }
}

/// Strip the accent off a Latin letter; Helvetica draws them on the base advance.
fn fold_accent(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' | 'İ' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Ğ' => 'G',
        'Ş' | 'Š' => 'S',
        'Ž' => 'Z',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' | 'ı' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ğ' => 'g',
        'ş' | 'š' => 's',
        'ž' => 'z',
        other => other,
    }
}

impl TrueTypeFont {
    fn parse(name: &str, style: FontStyle, data: Arc<[u8]>) -> Result<Self, String> {
        let face = Face::parse(&data, 0).map_err(|e| e.to_string())?;
        let units_per_em = face.units_per_em().max(1) as f32;
        let scale = |v: i32| -> i64 { (v as f32 * 1000.0 / units_per_em).round() as i64 };

        let fallback_advance = face.glyph_hor_advance(GlyphId(0)).unwrap_or(0);
        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                let advance = decode_byte(code)
                    .and_then(|ch| face.glyph_index(ch))
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(if decode_byte(code).is_some() {
                        fallback_advance
                    } else {
                        0
                    });
                scale(advance as i32) as u16
            })
            .collect();

        let bbox = face.global_bounding_box();
        let ascent = scale(face.ascender() as i32);

        Ok(Self {
            base_font: postscript_safe(name),
            widths,
            ascent,
            descent: scale(face.descender() as i32),
            cap_height: face
                .capital_height()
                .map(|h| scale(h as i32))
                .unwrap_or(ascent),
            bbox: [
                scale(bbox.x_min as i32),
                scale(bbox.y_min as i32),
                scale(bbox.x_max as i32),
                scale(bbox.y_max as i32),
            ],
            italic: style == FontStyle::Italic,
            data: data.clone(),
        })
    }
}

fn postscript_safe(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}
