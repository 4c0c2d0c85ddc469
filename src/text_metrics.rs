// Text width measurement behind an injectable trait. The font-backed
// implementation resolves a face through fontdb and sums glyph advances with
// ttf-parser, with a precomputed ASCII fast path.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Width a missing glyph contributes, as a fraction of the font size.
const MISSING_GLYPH_EM: f64 = 0.56;

/// Injected text measurement capability: rendered width of `text` in pixels
/// at the given font. Implementations must be pure per (text, font) pair so
/// truncation search stays monotonic.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64, font_family: &str) -> f64;
}

/// Deterministic measurer: every character advances by a fixed fraction of
/// the font size. Good enough for layout tests and benchmarks, and for
/// hosts without font access.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthMeasurer {
    pub char_width_em: f64,
}

impl Default for FixedWidthMeasurer {
    fn default() -> Self {
        Self { char_width_em: 0.6 }
    }
}

impl TextMeasurer for FixedWidthMeasurer {
    fn measure(&self, text: &str, font_size: f64, _font_family: &str) -> f64 {
        let count = text.chars().filter(|c| *c != '\n').count();
        count as f64 * font_size * self.char_width_em
    }
}

static FONT_STORE: Lazy<Mutex<FontStore>> = Lazy::new(|| Mutex::new(FontStore::new()));

/// Measure against the process-wide font database. Returns `None` when no
/// face matches the family or the face fails to parse.
pub fn measure_text_width(text: &str, font_size: f64, font_family: &str) -> Option<f64> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut store = FONT_STORE.lock().ok()?;
    store.measure(text, font_size, font_family)
}

/// [`TextMeasurer`] over the shared font database, with a fixed-width
/// fallback when a family cannot be resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMeasurer;

impl TextMeasurer for FontMeasurer {
    fn measure(&self, text: &str, font_size: f64, font_family: &str) -> f64 {
        measure_text_width(text, font_size, font_family)
            .unwrap_or_else(|| FixedWidthMeasurer::default().measure(text, font_size, font_family))
    }
}

struct FontStore {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl FontStore {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f64, font_family: &str) -> Option<f64> {
        let key = normalize_family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get_mut(&key)?.as_mut()?;
        let normalized = text.replace('\t', "    ");
        Some(face.measure_width(&normalized, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        let mut names: Vec<String> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if !raw.is_empty() {
                names.push(raw.to_string());
            }
        }
        let mut families: Vec<Family<'_>> = Vec::with_capacity(names.len() + 1);
        for name in &names {
            match name.to_ascii_lowercase().as_str() {
                "serif" => families.push(Family::Serif),
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    families.push(Family::SansSerif)
                }
                "monospace" | "ui-monospace" => families.push(Family::Monospace),
                "cursive" => families.push(Family::Cursive),
                "fantasy" => families.push(Family::Fantasy),
                _ => families.push(Family::Name(name.as_str())),
            }
        }
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded: Option<LoadedFace> = None;
        self.db.with_face_data(id, |data, index| {
            loaded = LoadedFace::parse(data.to_vec(), index);
        });
        loaded
    }
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
    advance_cache: HashMap<char, Option<u16>>,
}

impl LoadedFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        drop(face);
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
            advance_cache: HashMap::new(),
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f64) -> f64 {
        let scale = font_size / self.units_per_em as f64;
        let fallback = font_size * MISSING_GLYPH_EM;

        if text.is_ascii() {
            let mut width = 0.0;
            for byte in text.bytes() {
                if byte == b'\n' {
                    continue;
                }
                let advance = self.ascii_advances[byte as usize];
                width += if advance == 0 {
                    fallback
                } else {
                    advance as f64 * scale
                };
            }
            return width.max(0.0);
        }

        // Non-ASCII path: re-parse on cache miss, advances are memoized
        // per character so the parse cost amortizes away.
        let mut width = 0.0;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if let Some(cached) = self.advance_cache.get(&ch) {
                *cached
            } else {
                let advance = Face::parse(&self.data, self.index)
                    .ok()
                    .and_then(|face| {
                        face.glyph_index(ch)
                            .and_then(|glyph| face.glyph_hor_advance(glyph))
                    });
                self.advance_cache.insert(ch, advance);
                advance
            };
            width += match advance {
                Some(units) => units as f64 * scale,
                None => fallback,
            };
        }
        width.max(0.0)
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
