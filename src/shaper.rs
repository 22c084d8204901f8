//! Shaper capability: create a buffer, load it with a run's code points plus
//! surrounding context, set its script/language/direction, shape it, then
//! read back glyph infos and positions. Rust's ownership model makes buffer
//! teardown implicit (`Drop`), so the trait collapses the whole sequence
//! into a single call per run — any implementation satisfying the same
//! observable contract is a drop-in replacement for another.

use std::str::FromStr;

use unicode_script::Script;

use crate::direction::Direction;
use crate::feature::ParsedFeature;
use crate::font::FontHandle;

/// A single positioned glyph produced by shaping. `cluster` is a code-point
/// index into the paragraph's text, identifying which source character(s)
/// this glyph came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputGlyph {
    pub glyph_id: u32,
    pub cluster: usize,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

pub trait Shaper {
    /// Shapes the code points in `text[item_offset..item_offset+item_len]`,
    /// with the full `text` available so an implementation can pull in
    /// surrounding context (cursive joining, mark positioning at run edges).
    fn shape_run(
        &self,
        font: &FontHandle,
        text: &[char],
        item_offset: usize,
        item_len: usize,
        script: Script,
        direction: Direction,
        features: &[ParsedFeature],
    ) -> Vec<OutputGlyph>;
}

/// Builds a byte-offset table for `chars`, mapping code-point index to byte
/// offset in the UTF-8 string that would be built from it (length N+1).
fn byte_offsets(chars: &[char]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(chars.len() + 1);
    let mut len = 0usize;
    for c in chars {
        offsets.push(len);
        len += c.len_utf8();
    }
    offsets.push(len);
    offsets
}

fn byte_to_char_index(offsets: &[usize], byte_idx: usize) -> usize {
    offsets
        .binary_search(&byte_idx)
        .unwrap_or_else(|i| i.saturating_sub(1))
}

/// Default Shaper backed by `rustybuzz`, a complete pure-Rust OpenType
/// shaping engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustybuzzShaper;

impl Shaper for RustybuzzShaper {
    fn shape_run(
        &self,
        font: &FontHandle,
        text: &[char],
        item_offset: usize,
        item_len: usize,
        script: Script,
        direction: Direction,
        features: &[ParsedFeature],
    ) -> Vec<OutputGlyph> {
        let run = &text[item_offset..item_offset + item_len];
        let offsets = byte_offsets(run);
        let run_text: String = run.iter().collect();
        let pre_context: String = text[..item_offset].iter().collect();
        let post_context: String = text[item_offset + item_len..].iter().collect();

        let glyphs = font.with_face(|face| {
            let mut buffer = rustybuzz::UnicodeBuffer::new();
            buffer.push_str(&run_text);
            // Neighbors outside the run, so cursive joining and mark
            // positioning at the run's edges see what comes before/after it.
            buffer.set_pre_context(&pre_context);
            buffer.set_post_context(&post_context);

            if let Ok(rb_script) = rustybuzz::Script::from_str(script.short_name()) {
                buffer.set_script(rb_script);
            }
            buffer.set_direction(match direction {
                Direction::Ltr => rustybuzz::Direction::LeftToRight,
                Direction::Rtl => rustybuzz::Direction::RightToLeft,
                Direction::Ttb => rustybuzz::Direction::TopToBottom,
            });
            // Fills in only the fields left unset above — in practice just
            // the language, defaulting to the host's.
            buffer.guess_segment_properties();

            let rb_features: Vec<rustybuzz::Feature> =
                features.iter().map(|f| f.as_rustybuzz()).collect();
            let glyph_buffer = rustybuzz::shape(face, &rb_features, buffer);

            let infos = glyph_buffer.glyph_infos();
            let positions = glyph_buffer.glyph_positions();
            infos
                .iter()
                .zip(positions.iter())
                .map(|(info, pos)| OutputGlyph {
                    glyph_id: info.glyph_id,
                    cluster: item_offset + byte_to_char_index(&offsets, info.cluster as usize),
                    x_advance: pos.x_advance,
                    y_advance: pos.y_advance,
                    x_offset: pos.x_offset,
                    y_offset: pos.y_offset,
                })
                .collect()
        });

        glyphs.unwrap_or_default()
    }
}

/// Deterministic shaper used by tests: one glyph per code point, so the
/// itemization invariants (coverage, script purity, direction agreement,
/// visual order) can be asserted without bundling a binary font fixture.
/// Shaping-dependent behavior (ligation, real glyph ids) is out of scope
/// here since it depends on a font this crate does not ship.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoShaper;

impl Shaper for EchoShaper {
    fn shape_run(
        &self,
        _font: &FontHandle,
        text: &[char],
        item_offset: usize,
        item_len: usize,
        _script: Script,
        direction: Direction,
        _features: &[ParsedFeature],
    ) -> Vec<OutputGlyph> {
        let indices: Box<dyn Iterator<Item = usize>> = if direction == Direction::Rtl {
            Box::new((item_offset..item_offset + item_len).rev())
        } else {
            Box::new(item_offset..item_offset + item_len)
        };
        indices
            .map(|i| OutputGlyph {
                glyph_id: text[i] as u32,
                cluster: i,
                x_advance: 10,
                y_advance: 0,
                x_offset: 0,
                y_offset: 0,
            })
            .collect()
    }
}
