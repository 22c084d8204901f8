//! Convenience entry points: pure wrappers around the core that build
//! and discard a transient `Paragraph`.

use crate::direction::BaseDirection;
use crate::font::FontHandle;
use crate::paragraph::Paragraph;
use crate::shaper::OutputGlyph;

/// `shape_u32`: constructs a transient Paragraph and returns a caller-owned
/// glyph copy. Returns an empty vector if layout fails (e.g. empty text).
pub fn shape_u32(
    text: &[u32],
    font: FontHandle,
    direction: BaseDirection,
    features: &[&str],
) -> Vec<OutputGlyph> {
    let paragraph = Paragraph::create();
    paragraph.set_text(text);
    paragraph.set_base_direction(direction);
    paragraph.set_font(font, 0, text.len());
    for feature in features {
        paragraph.add_feature(feature);
    }
    if !paragraph.layout() {
        return Vec::new();
    }
    paragraph.get_glyphs()
}

/// `shape_u8`: transcodes to UTF-32, runs `shape_u32` once, then rewrites
/// each glyph's `cluster` from a UTF-32 index into the corresponding UTF-8
/// byte offset.
pub fn shape_u8(
    utf8: &str,
    font: FontHandle,
    direction: BaseDirection,
    features: &[&str],
) -> Vec<OutputGlyph> {
    let code_points: Vec<u32> = utf8.chars().map(|c| c as u32).collect();
    let mut glyphs = shape_u32(&code_points, font, direction, features);

    // Byte offset of the code point at each UTF-32 index, for the
    // cluster round-trip below.
    let mut byte_offset_of = Vec::with_capacity(code_points.len() + 1);
    let mut offset = 0usize;
    for c in utf8.chars() {
        byte_offset_of.push(offset);
        offset += c.len_utf8();
    }
    byte_offset_of.push(offset);

    for glyph in &mut glyphs {
        glyph.cluster = byte_offset_of[glyph.cluster];
    }
    glyphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::Paragraph;
    use crate::shaper::EchoShaper;

    #[test]
    fn shape_u8_rewrites_cluster_to_byte_offset() {
        // "é" is two UTF-8 bytes but one code point; "a" follows at byte 2.
        let text = "\u{e9}a";
        let code_points: Vec<u32> = text.chars().map(|c| c as u32).collect();

        let p = Paragraph::with_shaper(EchoShaper);
        p.set_text(&code_points);
        p.set_base_direction(BaseDirection::Ltr);
        p.set_font(FontHandle::from_bytes(Vec::new(), 0), 0, code_points.len());
        assert!(p.layout());
        let mut glyphs = p.get_glyphs();

        let mut byte_offset_of = Vec::with_capacity(code_points.len() + 1);
        let mut offset = 0usize;
        for c in text.chars() {
            byte_offset_of.push(offset);
            offset += c.len_utf8();
        }
        byte_offset_of.push(offset);
        for glyph in &mut glyphs {
            glyph.cluster = byte_offset_of[glyph.cluster];
        }

        let clusters: Vec<usize> = glyphs.iter().map(|g| g.cluster).collect();
        assert_eq!(clusters, vec![0, 2]);
    }
}
