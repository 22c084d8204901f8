//! FontHandle capability: an opaque, reference-counted font reference. The
//! Paragraph acquires a reference on bind and releases it on destruction or
//! rebind; in Rust this is `Rc`'s `Clone`/`Drop`, not a manual refcount.
//!
//! Font loading and validation are not this crate's concern: construction is
//! infallible and parsing is deferred to `with_face`, so an unparseable font
//! degrades the same way the rest of the pipeline degrades on shaper-internal
//! failure — as an empty glyph buffer for the affected run, not a
//! constructor error.

use std::rc::Rc;

struct FontData {
    bytes: Vec<u8>,
    face_index: u32,
}

/// A reference-counted font reference. Cloning a `FontHandle` acquires a
/// reference to the same underlying bytes; dropping the last clone
/// releases them.
#[derive(Clone)]
pub struct FontHandle(Rc<FontData>);

impl FontHandle {
    pub fn from_bytes(bytes: Vec<u8>, face_index: u32) -> Self {
        FontHandle(Rc::new(FontData { bytes, face_index }))
    }

    /// Runs `f` with a borrowed, parsed `rustybuzz::Face` scoped to the
    /// closure. Faces borrow from the font's bytes and so cannot be stored
    /// on `FontHandle` directly without a self-referential struct; this
    /// closure-scoped access is the idiomatic way around that. Returns
    /// `None` if the bytes don't parse as a font.
    pub(crate) fn with_face<R>(&self, f: impl FnOnce(&rustybuzz::Face) -> R) -> Option<R> {
        rustybuzz::Face::from_slice(&self.0.bytes, self.0.face_index).map(|face| f(&face))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_bytes_yield_no_face() {
        let handle = FontHandle::from_bytes(vec![0u8; 4], 0);
        assert!(handle.with_face(|_| ()).is_none());
    }
}
