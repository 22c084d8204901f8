/// Resolved writing direction of a shaping-ready run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
    Ttb,
}

/// Paragraph-level direction request, as set via `set_base_direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    #[default]
    Default,
    Ltr,
    Rtl,
    Ttb,
}

impl Direction {
    /// Resolved run direction for a bidi embedding level under a paragraph's
    /// requested base direction: an odd level is RTL, an even level is LTR,
    /// and a top-to-bottom paragraph forces every run to TTB regardless of
    /// level.
    pub fn from_level(level: u8, paragraph: BaseDirection) -> Direction {
        if paragraph == BaseDirection::Ttb {
            Direction::Ttb
        } else if level % 2 == 1 {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }
}
