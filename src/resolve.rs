//! Script Resolver: assigns a script to every code point, folding
//! Common/Inherited into their neighbors and anchoring paired punctuation
//! to the script of its bracketed content.

use unicode_script::{Script, UnicodeScript};

use crate::pairing::{classify, PairClass, PairedScriptStack};

/// Resolves a script array for `text`, one entry per code point.
///
/// Never fails: a paragraph that is entirely Common/Inherited is returned
/// unchanged, which is itself the intended behavior rather than an error.
pub fn resolve_scripts(text: &[char]) -> Vec<Script> {
    let mut scripts: Vec<Script> = text.iter().map(|c| c.script()).collect();
    let mut stack = PairedScriptStack::new(text.len());

    let mut last_script_value: Option<Script> = None;
    let mut last_set_index: Option<usize> = None;

    for i in 0..text.len() {
        let current = scripts[i];
        if current == Script::Common {
            if let Some(last) = last_script_value {
                match classify(text[i]) {
                    PairClass::Opener(pair_index) => {
                        scripts[i] = last;
                        stack.push(i, pair_index);
                    }
                    PairClass::Closer(pair_index) => {
                        if let Some(matched) = stack.pop_until_match(pair_index, &scripts) {
                            scripts[i] = matched;
                            last_script_value = Some(matched);
                        } else {
                            scripts[i] = last;
                        }
                        // A closer's resolution is final: unlike a plain
                        // Common/Inherited fill-in, it must not be
                        // retroactively overwritten by a later strong
                        // script's backfill.
                        last_set_index = Some(i);
                    }
                    PairClass::NotPaired => {
                        scripts[i] = last;
                    }
                }
            }
        } else if current == Script::Inherited {
            if let Some(last) = last_script_value {
                scripts[i] = last;
            }
        } else {
            if let Some(prev_set) = last_set_index {
                for j in (prev_set + 1)..i {
                    scripts[j] = current;
                }
            } else {
                for j in 0..i {
                    scripts[j] = current;
                }
            }
            last_script_value = Some(current);
            last_set_index = Some(i);
        }
    }

    scripts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn pure_latin() {
        let scripts = resolve_scripts(&chars("hello"));
        assert!(scripts.iter().all(|&s| s == Script::Latin));
    }

    #[test]
    fn combining_mark_adopts_preceding_script() {
        // "e" + combining acute accent (Inherited).
        let scripts = resolve_scripts(&chars("e\u{0301}"));
        assert_eq!(scripts, vec![Script::Latin, Script::Latin]);
    }

    #[test]
    fn all_common_stays_common() {
        let scripts = resolve_scripts(&chars("123 "));
        assert!(scripts.iter().all(|&s| s == Script::Common));
    }

    #[test]
    fn paired_quotes_adopt_enclosed_script() {
        // "a " + U+201C + arabic letter + U+201D + " c"
        let text = chars("a \u{201C}\u{0628}\u{201D} c");
        let scripts = resolve_scripts(&text);
        assert_eq!(scripts[2], Script::Arabic); // opening curly quote
        assert_eq!(scripts[3], Script::Arabic); // arabic beh
        assert_eq!(scripts[4], Script::Arabic); // closing curly quote
    }

    #[test]
    fn leading_common_backfills_from_first_strong_script() {
        let text = chars("  abc");
        let scripts = resolve_scripts(&text);
        assert!(scripts.iter().all(|&s| s == Script::Latin));
    }
}
