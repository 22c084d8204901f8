//! Run Splitter: subdivides each bidi level-run on script boundaries,
//! producing shaping-ready runs in visual order.

use unicode_script::Script;

use crate::bidi::BidiRun;
use crate::direction::{BaseDirection, Direction};

/// A contiguous, script-pure, direction-pure range ready to hand to the shaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapingRun {
    pub pos: usize,
    pub len: usize,
    pub direction: Direction,
    pub script: Script,
}

/// Splits `bidi_runs` on script boundaries using `scripts` (one entry
/// per code point), walking each bidi run in its resolved direction.
pub fn split_runs(
    scripts: &[Script],
    bidi_runs: &[BidiRun],
    paragraph_direction: BaseDirection,
) -> Vec<ShapingRun> {
    let mut out = Vec::new();

    for bidi_run in bidi_runs {
        let direction = Direction::from_level(bidi_run.level, paragraph_direction);
        let indices: Box<dyn Iterator<Item = usize>> = if direction == Direction::Rtl {
            Box::new((bidi_run.pos..bidi_run.pos + bidi_run.len).rev())
        } else {
            Box::new(bidi_run.pos..bidi_run.pos + bidi_run.len)
        };

        let mut current: Option<ShapingRun> = None;
        for i in indices {
            let script = scripts[i];
            match &mut current {
                Some(run) if run.script == script => {
                    run.len += 1;
                    // When walking backward (RTL), pos must stay the low end
                    // of the range regardless of which direction we extend it.
                    if i < run.pos {
                        run.pos = i;
                    }
                }
                _ => {
                    if let Some(run) = current.take() {
                        out.push(run);
                    }
                    current = Some(ShapingRun {
                        pos: i,
                        len: 1,
                        direction,
                        script,
                    });
                }
            }
        }
        if let Some(run) = current {
            out.push(run);
        }
    }

    out
}
