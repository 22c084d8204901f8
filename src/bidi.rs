//! Bidi Itemizer: runs the Unicode Bidirectional Algorithm (UAX #9) over the
//! paragraph and derives level-runs in visual order, bridging
//! `unicode_bidi`'s byte-indexed `&str` view back to the code-point index
//! space the rest of the pipeline uses.

use unicode_bidi::{BidiInfo, Level};

use crate::direction::BaseDirection;
use crate::error::{Result, ShapeError};

/// A maximal contiguous range of equal bidi embedding level, in visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiRun {
    pub pos: usize,
    pub len: usize,
    pub level: u8,
}

/// Builds a `String` from `text` alongside a table mapping each code-point
/// index to its byte offset in that string (length N+1, final entry is the
/// total byte length). This is the same bridging idiom used for the UTF-8
/// cluster rewrite in `shape_u8`.
fn byte_offsets(text: &[char]) -> (String, Vec<usize>) {
    let mut s = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for &c in text {
        offsets.push(s.len());
        s.push(c);
    }
    offsets.push(s.len());
    (s, offsets)
}

fn byte_to_char_index(offsets: &[usize], byte_idx: usize) -> usize {
    // offsets is sorted and length N+1; binary_search finds an exact run
    // boundary directly, since bidi run boundaries always fall on code
    // point boundaries.
    offsets.binary_search(&byte_idx).unwrap_or_else(|i| i)
}

/// Computes bidi level-runs for `text` under `base_direction`.
pub fn itemize(text: &[char], base_direction: BaseDirection) -> Result<Vec<BidiRun>> {
    if text.is_empty() {
        return Err(ShapeError::EmptyText);
    }

    if base_direction == BaseDirection::Ttb {
        // Every code point forced to strong-LTR, level 0, single run.
        return Ok(vec![BidiRun {
            pos: 0,
            len: text.len(),
            level: 0,
        }]);
    }

    let (s, offsets) = byte_offsets(text);

    // `None` lets unicode_bidi run UBA rule P2/P3 itself (first strong
    // character decides, falling back to LTR when none is found), matching
    // `BaseDirection::Default`. `Ltr`/`Rtl` force an explicit override level.
    let default_level = match base_direction {
        BaseDirection::Default => None,
        BaseDirection::Ltr => Some(Level::ltr()),
        BaseDirection::Rtl => Some(Level::rtl()),
        BaseDirection::Ttb => unreachable!("handled above"),
    };

    let bidi_info = BidiInfo::new(&s, default_level);
    let para = bidi_info
        .paragraphs
        .first()
        .ok_or(ShapeError::BidiFailure)?;
    let (levels, reordered) = bidi_info.visual_runs(para, para.range.clone());

    let mut runs = Vec::with_capacity(reordered.len());
    for byte_range in reordered {
        if byte_range.is_empty() {
            continue;
        }
        let level = levels[byte_range.start].number();
        let start = byte_to_char_index(&offsets, byte_range.start);
        let end = byte_to_char_index(&offsets, byte_range.end);
        runs.push(BidiRun {
            pos: start,
            len: end - start,
            level,
        });
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn pure_ltr_single_run() {
        let runs = itemize(&chars("hello"), BaseDirection::Ltr).unwrap();
        assert_eq!(runs, vec![BidiRun { pos: 0, len: 5, level: 0 }]);
    }

    #[test]
    fn ttb_single_run_level_zero() {
        let runs = itemize(&chars("\u{6f22}\u{5b57}"), BaseDirection::Ttb).unwrap();
        assert_eq!(runs, vec![BidiRun { pos: 0, len: 2, level: 0 }]);
    }

    #[test]
    fn pure_rtl_single_odd_level() {
        let runs = itemize(&chars("\u{0627}\u{0644}"), BaseDirection::Rtl).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].level % 2, 1);
    }

    #[test]
    fn mixed_latin_arabic_latin_produces_three_runs() {
        let runs = itemize(&chars("abc \u{0627}\u{0644}\u{0639} xyz"), BaseDirection::Ltr).unwrap();
        assert_eq!(runs.len(), 3);
    }

    #[test]
    fn empty_text_fails() {
        assert_eq!(itemize(&[], BaseDirection::Ltr), Err(ShapeError::EmptyText));
    }
}
