#![forbid(unsafe_code)]

//! Viewport classification for the card grid.
//!
//! Half-width cards only sit side by side on a wide container. Below the
//! configured width every card collapses to a full row. The collapse is a
//! presentation concern applied after planning; the planner's decisions are
//! the same for every viewport.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default container width (cells) from which two columns are shown.
pub const DEFAULT_WIDE_MIN_WIDTH: u16 = 80;

/// Container width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewport {
    /// Single column: every card spans the row.
    Narrow,
    /// Two columns: half-width cards pair up.
    Wide,
}

impl Viewport {
    /// Classify a container width against the wide threshold (inclusive).
    #[must_use]
    pub const fn classify(width: u16, wide_min_width: u16) -> Self {
        if width >= wide_min_width {
            Self::Wide
        } else {
            Self::Narrow
        }
    }

    /// Whether a card planned at half width keeps its half width here.
    #[must_use]
    pub const fn keeps_half_width(self) -> bool {
        matches!(self, Self::Wide)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narrow => f.write_str("narrow"),
            Self::Wide => f.write_str("wide"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_inclusive() {
        assert_eq!(Viewport::classify(79, 80), Viewport::Narrow);
        assert_eq!(Viewport::classify(80, 80), Viewport::Wide);
        assert_eq!(Viewport::classify(0, 80), Viewport::Narrow);
    }

    #[test]
    fn only_wide_keeps_half_width() {
        assert!(!Viewport::Narrow.keeps_half_width());
        assert!(Viewport::Wide.keeps_half_width());
    }

    #[test]
    fn display_names() {
        assert_eq!(Viewport::Narrow.to_string(), "narrow");
        assert_eq!(Viewport::Wide.to_string(), "wide");
    }
}
