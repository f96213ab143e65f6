//! Font resolution and text measurement
//!
//! The report is typeset with the built-in Helvetica family, so nothing is
//! embedded. For line wrapping the provider needs advance widths; it tries
//! to read them once from a sans-serif metrics face found on disk (via
//! ttf-parser) and otherwise falls back to approximate per-class widths.
//! The resolved choice lives in the provider for the whole render; there is
//! no global font state.

use std::path::Path;

use log::debug;
use pdf_writer::Name;

use crate::winansi;

/// Style variants of the report family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Candidate metrics faces, most specific first.
const METRIC_FACE_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

pub struct FontProvider {
    /// Advance width in em units per WinAnsi code, when a face was found.
    widths: Option<Box<[f64; 256]>>,
}

impl FontProvider {
    /// Resolve measurement metrics once for this render.
    pub fn new() -> Self {
        for path in METRIC_FACE_PATHS {
            if Path::new(path).exists() {
                if let Some(widths) = load_widths(path) {
                    debug!("text metrics from {path}");
                    return Self {
                        widths: Some(widths),
                    };
                }
            }
        }
        debug!("no metrics face found, using approximate widths");
        Self { widths: None }
    }

    pub fn default_family(&self) -> &'static str {
        "Helvetica"
    }

    /// Page resource name a style is registered under.
    pub fn resource_name(style: FontStyle) -> Name<'static> {
        match style {
            FontStyle::Regular => Name(b"F1"),
            FontStyle::Bold => Name(b"F2"),
            FontStyle::Italic => Name(b"F3"),
        }
    }

    /// Base font of the built-in family for a style.
    pub fn base_font(style: FontStyle) -> Name<'static> {
        match style {
            FontStyle::Regular => Name(b"Helvetica"),
            FontStyle::Bold => Name(b"Helvetica-Bold"),
            FontStyle::Italic => Name(b"Helvetica-Oblique"),
        }
    }

    /// Width in points of a text run at the given size.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().map(|ch| self.char_em(ch)).sum::<f64>() * size
    }

    fn char_em(&self, ch: char) -> f64 {
        match &self.widths {
            Some(widths) => widths[winansi::encode_char(ch) as usize],
            None => approx_char_em(ch),
        }
    }
}

impl Default for FontProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn load_widths(path: &str) -> Option<Box<[f64; 256]>> {
    let data = std::fs::read(path).ok()?;
    let face = ttf_parser::Face::parse(&data, 0).ok()?;
    let upem = face.units_per_em() as f64;
    if upem <= 0.0 {
        return None;
    }
    let mut widths = Box::new([0.5_f64; 256]);
    for code in 0u16..256 {
        let ch = winansi::decode_byte(code as u8);
        let gid = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
        let adv = face
            .glyph_hor_advance(gid)
            .unwrap_or(face.units_per_em() / 2);
        widths[code as usize] = adv as f64 / upem;
    }
    Some(widths)
}

/// Rough Helvetica advances used when no metrics face is available.
/// Overestimating slightly only wraps a little early.
fn approx_char_em(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '\'' | '|' | '!' | ' ' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.67,
        _ => 0.54,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_text_measures_wider() {
        let fonts = FontProvider { widths: None };
        let narrow = fonts.text_width("iiii", 12.0);
        let wide = fonts.text_width("MMMM", 12.0);
        assert!(wide > narrow);
    }

    #[test]
    fn width_scales_with_size() {
        let fonts = FontProvider { widths: None };
        let small = fonts.text_width("hello", 10.0);
        let large = fonts.text_width("hello", 20.0);
        assert!((large - small * 2.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_has_zero_width() {
        let fonts = FontProvider::new();
        assert_eq!(fonts.text_width("", 12.0), 0.0);
    }
}
