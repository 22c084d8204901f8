//! Paragraph: the top-level layout session and its public operations.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use unicode_script::Script;

use crate::bidi;
use crate::direction::BaseDirection;
use crate::error::ShapeError;
use crate::feature::{apply_override, ParsedFeature};
use crate::font::FontHandle;
use crate::shaper::{OutputGlyph, RustybuzzShaper, Shaper};
use crate::split;

/// Per-code-point font binding. `None` entries fall back to the single
/// paragraph-wide font, if any.
#[derive(Default)]
struct FontBinding {
    default_font: Option<FontHandle>,
    per_char: Vec<Option<FontHandle>>,
}

impl FontBinding {
    fn reset(&mut self, len: usize) {
        self.default_font = None;
        self.per_char = vec![None; len];
    }

    /// `set_font`: last call wins for any given range; out-of-range
    /// starts are a no-op; length is clipped at N.
    fn set_font(&mut self, font: FontHandle, start: usize, length: usize, n: usize) {
        if start >= n {
            return;
        }
        let end = (start + length).min(n);
        if start == 0 && end == n {
            self.default_font = Some(font.clone());
        }
        for slot in &mut self.per_char[start..end] {
            *slot = Some(font.clone());
        }
    }

    fn font_for(&self, index: usize) -> Option<FontHandle> {
        self.per_char
            .get(index)
            .and_then(|f| f.clone())
            .or_else(|| self.default_font.clone())
    }
}

struct Inner {
    text: Vec<char>,
    base_direction: BaseDirection,
    features: Vec<ParsedFeature>,
    fonts: FontBinding,
    shaper: Rc<dyn Shaper>,
    scripts: Vec<Script>,
    runs: Vec<split::ShapingRun>,
    glyphs: Vec<OutputGlyph>,
}

impl Default for Inner {
    fn default() -> Self {
        Inner {
            text: Vec::new(),
            base_direction: BaseDirection::Default,
            features: Vec::new(),
            fonts: FontBinding::default(),
            shaper: Rc::new(RustybuzzShaper),
            scripts: Vec::new(),
            runs: Vec::new(),
            glyphs: Vec::new(),
        }
    }
}

/// A refcounted layout session. `Clone` is `acquire`; dropping the last
/// clone is `release` — Rust's `Rc` makes both implicit.
#[derive(Clone)]
pub struct Paragraph(Rc<RefCell<Inner>>);

impl Default for Paragraph {
    fn default() -> Self {
        Paragraph::create()
    }
}

impl Paragraph {
    pub fn create() -> Self {
        Paragraph(Rc::new(RefCell::new(Inner::default())))
    }

    /// Constructs a Paragraph driven by a custom Shaper implementation,
    /// e.g. for tests that don't want to bundle a binary font fixture.
    pub fn with_shaper(shaper: impl Shaper + 'static) -> Self {
        let mut inner = Inner::default();
        inner.shaper = Rc::new(shaper);
        Paragraph(Rc::new(RefCell::new(inner)))
    }

    /// Equivalent to `Clone`, named to match the manual-refcount idiom this
    /// type otherwise follows.
    pub fn acquire(&self) -> Self {
        self.clone()
    }

    /// Equivalent to dropping this handle, named for parity with `acquire`.
    pub fn release(self) {
        drop(self);
    }

    /// `set_text`: invalid code points are replaced with U+FFFD (the
    /// caller is expected to pass valid UTF-32, but this keeps the
    /// contract total). Clears all derived state.
    pub fn set_text(&self, code_points: &[u32]) {
        let mut inner = self.0.borrow_mut();
        inner.text = code_points
            .iter()
            .map(|&cp| char::from_u32(cp).unwrap_or('\u{FFFD}'))
            .collect();
        let len = inner.text.len();
        inner.fonts.reset(len);
        inner.scripts.clear();
        inner.runs.clear();
        inner.glyphs.clear();
    }

    pub fn set_base_direction(&self, direction: BaseDirection) {
        self.0.borrow_mut().base_direction = direction;
    }

    /// `add_feature`: returns `false` on bad syntax and leaves the feature
    /// list unchanged.
    pub fn add_feature(&self, feature_string: &str) -> bool {
        match ParsedFeature::parse(feature_string) {
            Some(parsed) => {
                apply_override(&mut self.0.borrow_mut().features, parsed);
                true
            }
            None => {
                let err = ShapeError::InvalidFeatureSyntax(feature_string.to_string());
                debug!("{err}");
                false
            }
        }
    }

    pub fn set_font(&self, font: FontHandle, start: usize, length: usize) {
        let mut inner = self.0.borrow_mut();
        let n = inner.text.len();
        inner.fonts.set_font(font, start, length, n);
    }

    /// `layout`: runs the full pipeline and rebuilds derived state. Returns
    /// `false` on failure (empty text, bidi failure), leaving the
    /// Paragraph's derived state (scripts, runs, glyphs) cleared.
    pub fn layout(&self) -> bool {
        let mut inner = self.0.borrow_mut();
        inner.scripts.clear();
        inner.runs.clear();
        inner.glyphs.clear();

        if inner.text.is_empty() {
            warn!("layout called on empty paragraph");
            return false;
        }

        let scripts = crate::resolve::resolve_scripts(&inner.text);

        let bidi_runs = match bidi::itemize(&inner.text, inner.base_direction) {
            Ok(runs) => runs,
            Err(err) => {
                warn!("bidi itemization failed: {err}");
                return false;
            }
        };

        let shaping_runs = split::split_runs(&scripts, &bidi_runs, inner.base_direction);

        let mut glyphs = Vec::new();
        for run in &shaping_runs {
            let Some(font) = inner.fonts.font_for(run.pos) else {
                debug!("{} (run at {})", ShapeError::NoFontBound, run.pos);
                continue;
            };
            let shaper = Rc::clone(&inner.shaper);
            let run_glyphs = shaper.shape_run(
                &font,
                &inner.text,
                run.pos,
                run.len,
                run.script,
                run.direction,
                &inner.features,
            );
            glyphs.extend(run_glyphs);
        }

        inner.scripts = scripts;
        inner.runs = shaping_runs;
        inner.glyphs = glyphs;
        true
    }

    /// `get_glyphs`: ownership remains with the Paragraph; callers receive
    /// a borrowed slice's worth of data copied out since Rust can't hand
    /// back a `Ref`-borrowed slice across the FFI-shaped boundary this API
    /// mirrors.
    pub fn get_glyphs(&self) -> Vec<OutputGlyph> {
        self.0.borrow().glyphs.clone()
    }

    pub fn scripts(&self) -> Vec<Script> {
        self.0.borrow().scripts.clone()
    }

    pub fn runs(&self) -> Vec<split::ShapingRun> {
        self.0.borrow().runs.clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaper::EchoShaper;

    // EchoShaper never touches the font, so an empty stub stands in for a
    // real one in tests that only exercise itemization, not real glyph ids.
    fn stub_font() -> FontHandle {
        FontHandle::from_bytes(Vec::new(), 0)
    }

    #[test]
    fn empty_text_layout_fails() {
        let p = Paragraph::with_shaper(EchoShaper);
        assert!(!p.layout());
    }

    #[test]
    fn bad_feature_syntax_rejected_and_state_unchanged() {
        let p = Paragraph::with_shaper(EchoShaper);
        p.set_text(&[b'a' as u32]);
        assert!(!p.add_feature("!!not valid!!"));
    }

    #[test]
    fn set_font_out_of_range_is_noop() {
        let p = Paragraph::with_shaper(EchoShaper);
        p.set_text(&[b'a' as u32, b'b' as u32]);
        // Out-of-range start must not panic and must leave bindings empty.
        p.set_font(stub_font(), 10, 1);
        p.layout();
        assert!(p.get_glyphs().is_empty());
    }

    #[test]
    fn full_pipeline_ascii_single_run() {
        let p = Paragraph::with_shaper(EchoShaper);
        p.set_text(&"hello".chars().map(|c| c as u32).collect::<Vec<_>>());
        p.set_base_direction(BaseDirection::Ltr);
        p.set_font(stub_font(), 0, 5);
        assert!(p.layout());
        let runs = p.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len, 5);
        let glyphs = p.get_glyphs();
        let clusters: Vec<usize> = glyphs.iter().map(|g| g.cluster).collect();
        assert_eq!(clusters, vec![0, 1, 2, 3, 4]);
    }
}
