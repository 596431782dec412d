#![forbid(unsafe_code)]

//! Card grid adapter: turns planner decisions into card rectangles.
//!
//! [`CardGrid`] places one card per planned theme, in input order. On a wide
//! container full-width cards span the row and half-width cards fill the left
//! then right column. A full-width card arriving while only the left column
//! of a row is taken closes that row. On a narrow container every card spans
//! the row.
//!
//! Inner card content is the caller's business: [`CardGrid::render`] hands
//! each theme and its rectangle to a callback and does nothing else.
//!
//! # Invariants
//!
//! 1. One rectangle per input entry, in input order.
//! 2. Full-width cards are exactly as wide as the inner area; half-width
//!    cards are `(inner_width - gap) / 2` wide.
//! 3. No two rectangles overlap.
//!
//! # Failure Modes
//!
//! - Zero-width area: every rectangle has zero width.
//! - Rows past the area's bottom edge are still produced (with `y` clamped
//!   at `u16::MAX`); clipping or scrolling is up to the caller.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Sides};
use crate::planner::{PlannedTheme, ThemeDescriptor};
use crate::responsive::{DEFAULT_WIDE_MIN_WIDTH, Viewport};

/// Grid presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells between columns and between rows. Default: 1.
    pub gap: u16,
    /// Height of every card in cells. Default: 5.
    pub card_height: u16,
    /// Container width from which half cards pair up. Default: 80.
    pub wide_min_width: u16,
    /// Margin inside the container. Default: none.
    pub margin: Sides,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 1,
            card_height: 5,
            wide_min_width: DEFAULT_WIDE_MIN_WIDTH,
            margin: Sides::default(),
        }
    }
}

/// Result of arranging a planned list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridArrangement {
    /// Viewport the arrangement was made for.
    pub viewport: Viewport,
    /// One rectangle per entry, in input order.
    pub rects: Vec<Rect>,
    /// Number of card rows used.
    pub rows: u16,
}

impl GridArrangement {
    /// Total height in cells, without trailing gap. Saturates at `u32::MAX`.
    #[must_use]
    pub fn height(&self, config: &GridConfig) -> u32 {
        let rows = u32::from(self.rows);
        if rows == 0 {
            return 0;
        }
        rows.saturating_mul(u32::from(config.card_height))
            .saturating_add((rows - 1).saturating_mul(u32::from(config.gap)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Full,
    Left,
    Right,
}

/// Responsive two-column card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardGrid {
    config: GridConfig,
}

impl CardGrid {
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Viewport for a container of the given width.
    #[must_use]
    pub fn viewport(&self, width: u16) -> Viewport {
        Viewport::classify(width, self.config.wide_min_width)
    }

    /// Arrange cards from per-entry full-width flags.
    pub fn arrange<I>(&self, area: Rect, full_width: I) -> GridArrangement
    where
        I: IntoIterator<Item = bool>,
    {
        let viewport = self.viewport(area.width);
        let inner = area.inner(self.config.margin);
        let gap = self.config.gap;
        let half = inner.width.saturating_sub(gap) / 2;

        let mut rects = Vec::new();
        let mut row: u32 = 0;
        let mut left_open = false;

        for is_full in full_width {
            let slot = if is_full || !viewport.keeps_half_width() {
                if left_open {
                    row += 1;
                    left_open = false;
                }
                Slot::Full
            } else if left_open {
                Slot::Right
            } else {
                Slot::Left
            };

            let y = self.row_y(inner, row);
            let rect = match slot {
                Slot::Full => Rect::new(inner.x, y, inner.width, self.config.card_height),
                Slot::Left => Rect::new(inner.x, y, half, self.config.card_height),
                Slot::Right => Rect::new(
                    inner.x.saturating_add(half).saturating_add(gap),
                    y,
                    half,
                    self.config.card_height,
                ),
            };
            rects.push(rect);

            match slot {
                Slot::Left => left_open = true,
                Slot::Full | Slot::Right => {
                    row += 1;
                    left_open = false;
                }
            }
        }

        let rows = row + u32::from(left_open);
        GridArrangement {
            viewport,
            rects,
            rows: u16::try_from(rows).unwrap_or(u16::MAX),
        }
    }

    /// Arrange cards for a planned theme list.
    pub fn arrange_planned<Id>(&self, area: Rect, planned: &[PlannedTheme<'_, Id>]) -> GridArrangement {
        self.arrange(area, planned.iter().map(PlannedTheme::is_full_width))
    }

    /// Arrange, then call `draw` once per theme with its card rectangle.
    pub fn render<Id, F>(
        &self,
        area: Rect,
        planned: &[PlannedTheme<'_, Id>],
        mut draw: F,
    ) -> GridArrangement
    where
        F: FnMut(&ThemeDescriptor<Id>, Rect),
    {
        let arrangement = self.arrange_planned(area, planned);
        tracing::debug!(
            target: "shelf.layout.grid",
            viewport = %arrangement.viewport,
            cards = arrangement.rects.len(),
            rows = arrangement.rows,
            "rendering card grid"
        );
        for (entry, rect) in planned.iter().zip(&arrangement.rects) {
            draw(entry.theme, *rect);
        }
        arrangement
    }

    fn row_y(&self, inner: Rect, row: u32) -> u16 {
        let pitch = u32::from(self.config.card_height) + u32::from(self.config.gap);
        let y = u32::from(inner.y).saturating_add(row.saturating_mul(pitch));
        u16::try_from(y).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::LayoutPlanner;

    fn grid() -> CardGrid {
        CardGrid::new(GridConfig {
            gap: 2,
            card_height: 4,
            wide_min_width: 80,
            margin: Sides::default(),
        })
    }

    #[test]
    fn halves_pair_up_on_wide() {
        let a = grid().arrange(Rect::from_size(100, 50), [false, false]);
        assert_eq!(a.viewport, Viewport::Wide);
        assert_eq!(a.rects[0], Rect::new(0, 0, 49, 4));
        assert_eq!(a.rects[1], Rect::new(51, 0, 49, 4));
        assert_eq!(a.rows, 1);
    }

    #[test]
    fn full_card_closes_open_row() {
        let a = grid().arrange(Rect::from_size(100, 50), [false, true, false]);
        assert_eq!(a.rects[0], Rect::new(0, 0, 49, 4));
        assert_eq!(a.rects[1], Rect::new(0, 6, 100, 4));
        assert_eq!(a.rects[2], Rect::new(0, 12, 49, 4));
        assert_eq!(a.rows, 3);
    }

    #[test]
    fn narrow_collapses_halves() {
        let a = grid().arrange(Rect::from_size(60, 50), [false, false, true]);
        assert_eq!(a.viewport, Viewport::Narrow);
        assert!(a.rects.iter().all(|r| r.width == 60));
        let ys: Vec<u16> = a.rects.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![0, 6, 12]);
    }

    #[test]
    fn margin_shrinks_cards_not_viewport() {
        let g = CardGrid::new(GridConfig {
            margin: Sides::all(2),
            ..GridConfig::default()
        });
        let a = g.arrange(Rect::from_size(80, 30), [true]);
        assert_eq!(a.viewport, Viewport::Wide);
        assert_eq!(a.rects[0], Rect::new(2, 2, 76, 5));
    }

    #[test]
    fn empty_input_has_no_rows() {
        let a = grid().arrange(Rect::from_size(100, 10), []);
        assert!(a.rects.is_empty());
        assert_eq!(a.rows, 0);
        assert_eq!(a.height(grid().config()), 0);
    }

    #[test]
    fn height_counts_gaps_between_rows() {
        let a = grid().arrange(Rect::from_size(100, 10), [true, true]);
        assert_eq!(a.height(grid().config()), 4 + 2 + 4);
    }

    #[test]
    fn huge_rows_clamp_instead_of_overflowing() {
        let config = GridConfig {
            gap: u16::MAX,
            card_height: u16::MAX,
            ..GridConfig::default()
        };
        let a = CardGrid::new(config)
            .arrange(Rect::from_size(100, 10), std::iter::repeat_n(true, 40_000));
        assert_eq!(a.rects.len(), 40_000);
        assert_eq!(a.rows, 40_000);
        assert_eq!(a.rects[0].y, 0);
        assert!(a.rects[1..].iter().all(|r| r.y == u16::MAX));
        assert_eq!(a.height(&config), u32::MAX);
    }

    #[test]
    fn render_visits_every_theme_in_order() {
        let themes = vec![
            ThemeDescriptor::new(1u32, 2),
            ThemeDescriptor::new(2, 3),
            ThemeDescriptor::new(3, 2),
        ];
        let planned = LayoutPlanner::default().plan(&themes).unwrap();
        let mut seen = Vec::new();
        let a = grid().render(Rect::from_size(100, 40), &planned, |theme, rect| {
            seen.push((theme.id, rect.width));
        });
        assert_eq!(seen, vec![(1, 49), (2, 49), (3, 100)]);
        assert_eq!(a.rows, 2);
    }
}
