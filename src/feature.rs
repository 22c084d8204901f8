//! OpenType feature toggles: opaque strings in the shaper's textual
//! grammar, parsed eagerly so `add_feature` can report syntax failures.

use std::str::FromStr;

/// A feature string that has already been validated against the shaper's
/// textual grammar.
#[derive(Clone)]
pub struct ParsedFeature {
    tag: [u8; 4],
    inner: rustybuzz::Feature,
}

impl ParsedFeature {
    /// Parses `text` per the OpenType feature string grammar (e.g. `"dlig"`,
    /// `"-liga"`, `"ss01=1"`). Returns `None` on bad syntax, matching
    /// `add_feature`'s `ok?` contract.
    pub fn parse(text: &str) -> Option<Self> {
        let inner = rustybuzz::Feature::from_str(text).ok()?;
        Some(ParsedFeature {
            tag: inner.tag().to_bytes(),
            inner,
        })
    }

    pub(crate) fn as_rustybuzz(&self) -> rustybuzz::Feature {
        self.inner.clone()
    }
}

/// Appends `feature` to `features`, with later entries overriding earlier
/// ones that share the same four-byte tag: repeated calls append, with the
/// most recent call for a given tag winning.
pub fn apply_override(features: &mut Vec<ParsedFeature>, feature: ParsedFeature) {
    features.retain(|f| f.tag != feature.tag);
    features.push(feature);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_syntax_is_rejected() {
        assert!(ParsedFeature::parse("not a feature!!").is_none());
    }

    #[test]
    fn good_syntax_parses() {
        assert!(ParsedFeature::parse("dlig").is_some());
        assert!(ParsedFeature::parse("-liga").is_some());
        assert!(ParsedFeature::parse("ss01=1").is_some());
    }

    #[test]
    fn later_call_overrides_earlier_same_tag() {
        let mut features = Vec::new();
        apply_override(&mut features, ParsedFeature::parse("liga").unwrap());
        apply_override(&mut features, ParsedFeature::parse("-liga").unwrap());
        assert_eq!(features.len(), 1);
    }
}
