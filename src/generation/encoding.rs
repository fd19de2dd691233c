//! Single-byte text encoding for PDF strings.
//!
//! Text is written with WinAnsiEncoding as the base and a `Differences` array that swaps
//! the six Icelandic code points for the Turkish letters (the Windows-1254 layout), so the
//! built-in fonts and embedded TrueType fonts share one byte mapping.

use lopdf::{dictionary, Dictionary, Object};

/// Code points redefined on top of WinAnsiEncoding.
const TURKISH_OVERRIDES: [(u8, char, &str); 6] = [
    (0xD0, 'Ğ', "Gbreve"),
    (0xDD, 'İ', "Idotaccent"),
    (0xDE, 'Ş', "Scedilla"),
    (0xF0, 'ğ', "gbreve"),
    (0xFD, 'ı', "dotlessi"),
    (0xFE, 'ş', "scedilla"),
];

/// WinAnsi code points 0x80..=0x9F that differ from Latin-1.
const WIN_ANSI_HIGH: [(u8, char); 27] = [
    (0x80, '€'),
    (0x82, '‚'),
    (0x83, 'ƒ'),
    (0x84, '„'),
    (0x85, '…'),
    (0x86, '†'),
    (0x87, '‡'),
    (0x88, 'ˆ'),
    (0x89, '‰'),
    (0x8A, 'Š'),
    (0x8B, '‹'),
    (0x8C, 'Œ'),
    (0x8E, 'Ž'),
    (0x91, '‘'),
    (0x92, '’'),
    (0x93, '“'),
    (0x94, '”'),
    (0x95, '•'),
    (0x96, '–'),
    (0x97, '—'),
    (0x98, '˜'),
    (0x99, '™'),
    (0x9A, 'š'),
    (0x9B, '›'),
    (0x9C, 'œ'),
    (0x9E, 'ž'),
    (0x9F, 'Ÿ'),
];

pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;
const REPLACEMENT: u8 = b'?';

/// Map a char to its byte, if the encoding has one.
pub fn encode_char(ch: char) -> Option<u8> {
    if let Some((code, _, _)) = TURKISH_OVERRIDES.iter().find(|(_, c, _)| *c == ch) {
        return Some(*code);
    }
    if let Some((code, _)) = WIN_ANSI_HIGH.iter().find(|(_, c)| *c == ch) {
        return Some(*code);
    }

    let cp = ch as u32;
    let is_latin1 = (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp);
    if is_latin1 && !TURKISH_OVERRIDES.iter().any(|(code, _, _)| *code as u32 == cp) {
        return Some(cp as u8);
    }

    None
}

/// Inverse of [`encode_char`].
pub fn decode_byte(byte: u8) -> Option<char> {
    if let Some((_, ch, _)) = TURKISH_OVERRIDES.iter().find(|(code, _, _)| *code == byte) {
        return Some(*ch);
    }
    if let Some((_, ch)) = WIN_ANSI_HIGH.iter().find(|(code, _)| *code == byte) {
        return Some(*ch);
    }
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        _ => None,
    }
}

/// Encode a whole string; unmappable chars become `?`, tabs become spaces.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            other => encode_char(other).unwrap_or(REPLACEMENT),
        })
        .collect()
}

/// The `/Encoding` dictionary shared by every font in the document.
pub fn encoding_dictionary() -> Dictionary {
    let mut differences = Vec::new();
    let mut previous: Option<u8> = None;
    for (code, _, glyph) in TURKISH_OVERRIDES.iter() {
        if previous.map(|p| p + 1) != Some(*code) {
            differences.push(Object::Integer(*code as i64));
        }
        differences.push(Object::Name(glyph.as_bytes().to_vec()));
        previous = Some(*code);
    }

    dictionary! {
        "Type" => "Encoding",
        "BaseEncoding" => "WinAnsiEncoding",
        "Differences" => differences,
    }
}
