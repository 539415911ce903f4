//! TrueType font loading, measurement and embedding
//!
//! Tag text is set in a single embedded TrueType font with WinAnsiEncoding,
//! so strings are written as single bytes and the `Widths` array comes from
//! the font's own advances. Measurement shapes with rustybuzz, with kerning
//! and ligatures off so the measured width equals what a viewer draws.

use std::fs;
use std::path::Path;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use rustybuzz::ttf_parser::{self, name_id, Tag};
use rustybuzz::{Feature, UnicodeBuffer};
use crate::error::{Error, Result};
use crate::fit::TextMeasure;

/// First and last character codes in the `Widths` array
const FIRST_CHAR: u8 = 32;
const LAST_CHAR: u8 = 255;

/// Drawn in place of characters WinAnsiEncoding cannot express
const REPLACEMENT: char = '?';

/// Windows-1252 characters in 0x80..0x9F; `None` marks unassigned codes
const CP1252_HIGH: [Option<char>; 32] = [
    Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
    Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
    None, Some('‘'), Some('’'), Some('“'), Some('”'), Some('•'), Some('–'), Some('—'),
    Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
];

/// Character a WinAnsiEncoding code stands for
fn win_ansi_char(code: u8) -> Option<char> {
    match code {
        0x80..=0x9F => CP1252_HIGH[(code - 0x80) as usize],
        _ => Some(code as char),
    }
}

/// WinAnsiEncoding code for a character
fn win_ansi_code(ch: char) -> Option<u8> {
    match ch as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(ch as u32 as u8),
        _ => CP1252_HIGH
            .iter()
            .position(|c| *c == Some(ch))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encode text for a WinAnsiEncoding font, replacing what it cannot express
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| win_ansi_code(ch).unwrap_or(REPLACEMENT as u8))
        .collect()
}

/// Text as it will actually be drawn
fn drawable(text: &str) -> String {
    text.chars()
        .map(|ch| if win_ansi_code(ch).is_some() { ch } else { REPLACEMENT })
        .collect()
}

/// A TrueType font ready to measure and embed
#[derive(Debug, Clone)]
pub struct TagFont {
    data: Vec<u8>,
    postscript_name: String,
    units_per_em: f32,
    ascent: i64,
    descent: i64,
    cap_height: i64,
    bbox: [i64; 4],
    /// Advances for codes `FIRST_CHAR..=LAST_CHAR` in 1/1000 em
    widths: Vec<i64>,
}

impl TagFont {
    /// Load a TrueType font file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let data = fs::read(path)?;
        let font = Self::from_bytes(data)
            .map_err(|e| Error::Font(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded font {} from {}", font.postscript_name, path.display());
        Ok(font)
    }

    /// Parse font data already in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| Error::Font(e.to_string()))?;

        if rustybuzz::Face::from_slice(&data, 0).is_none() {
            return Err(Error::Font("font cannot be shaped".to_string()));
        }

        let units_per_em = face.units_per_em() as f32;
        let scale = |v: i16| (v as f32 * 1000.0 / units_per_em).round() as i64;

        let postscript_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| name.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-').collect::<String>())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "TagFont".to_string());

        let bbox = face.global_bounding_box();
        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                win_ansi_char(code)
                    .and_then(|ch| face.glyph_index(ch))
                    .or_else(|| face.glyph_index(REPLACEMENT))
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|advance| (advance as f32 * 1000.0 / units_per_em).round() as i64)
                    .unwrap_or(0)
            })
            .collect();

        Ok(Self {
            postscript_name,
            units_per_em,
            ascent: scale(face.ascender()),
            descent: scale(face.descender()),
            cap_height: scale(face.capital_height().unwrap_or(face.ascender())),
            bbox: [scale(bbox.x_min), scale(bbox.y_min), scale(bbox.x_max), scale(bbox.y_max)],
            widths,
            data,
        })
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    /// Width of `text` at `size` points from shaping
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let text = drawable(text);
        let Some(face) = rustybuzz::Face::from_slice(&self.data, 0) else {
            return self.table_width(&text, size);
        };

        let features = [
            Feature::new(Tag::from_bytes(b"kern"), 0, ..),
            Feature::new(Tag::from_bytes(b"liga"), 0, ..),
        ];
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(&text);
        let glyphs = rustybuzz::shape(&face, &features, buffer);

        let advance: i32 = glyphs.glyph_positions().iter().map(|p| p.x_advance).sum();
        advance as f32 * size / self.units_per_em
    }

    /// Width of `text` from the embedded `Widths` array
    fn table_width(&self, text: &str, size: f32) -> f32 {
        let total: i64 = encode_win_ansi(text)
            .into_iter()
            .filter(|code| *code >= FIRST_CHAR)
            .map(|code| self.widths[(code - FIRST_CHAR) as usize])
            .sum();
        total as f32 * size / 1000.0
    }

    /// Embed as a WinAnsiEncoding TrueType font, returning the font dictionary id
    pub fn embed(&self, doc: &mut Document) -> ObjectId {
        let font_stream_id = doc.add_object(Stream::new(
            dictionary! { "Length1" => self.data.len() as i64 },
            self.data.clone(),
        ));

        let font_descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => self.postscript_name.as_str(),
            "Flags" => 32, // Nonsymbolic
            "FontBBox" => self.bbox.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
            "ItalicAngle" => 0,
            "Ascent" => self.ascent,
            "Descent" => self.descent,
            "CapHeight" => self.cap_height,
            "StemV" => 80,
            "FontFile2" => font_stream_id,
        });

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => self.postscript_name.as_str(),
            "Encoding" => "WinAnsiEncoding",
            "FirstChar" => FIRST_CHAR as i64,
            "LastChar" => LAST_CHAR as i64,
            "Widths" => self.widths.iter().map(|w| Object::Integer(*w)).collect::<Vec<_>>(),
            "FontDescriptor" => font_descriptor_id,
        })
    }
}

impl TextMeasure for TagFont {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.measure(text, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii_and_latin1() {
        assert_eq!(encode_win_ansi("Bob"), b"Bob".to_vec());
        assert_eq!(encode_win_ansi("Åsa Öberg"), vec![0xC5, b's', b'a', b' ', 0xD6, b'b', b'e', b'r', b'g']);
    }

    #[test]
    fn test_encode_cp1252_specials() {
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
        assert_eq!(encode_win_ansi("–"), vec![0x96]);
        assert_eq!(encode_win_ansi("’"), vec![0x92]);
    }

    #[test]
    fn test_encode_replaces_unsupported() {
        assert_eq!(encode_win_ansi("Łukasz"), b"?ukasz".to_vec());
        assert_eq!(encode_win_ansi("李"), b"?".to_vec());
        assert_eq!(drawable("Łukasz"), "?ukasz");
    }

    #[test]
    fn test_win_ansi_round_trip_table() {
        for code in FIRST_CHAR..=LAST_CHAR {
            if let Some(ch) = win_ansi_char(code) {
                if code == 0x7F {
                    continue;
                }
                assert_eq!(win_ansi_code(ch), Some(code), "code {:#x}", code);
            }
        }
    }

    #[test]
    fn test_missing_font_file() {
        let result = TagFont::load(Path::new("no/such/font.ttf"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_garbage_is_not_a_font() {
        let result = TagFont::from_bytes(b"not a font at all".to_vec());
        assert!(matches!(result, Err(Error::Font(_))));
    }
}
