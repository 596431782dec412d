//! ASCII preview of the card grid.
//!
//! Draws each card as a box labelled with its id and item count. The card
//! grid only hands out rectangles; all drawing happens here, in the render
//! callback.

use std::io::Write;

use shelf_layout::{CardGrid, GridArrangement, PlannedTheme, Rect};

use crate::error::Result;
use crate::input::{Theme, ThemeId};

/// A character canvas in grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; usize::from(width) * usize::from(height)],
        }
    }

    fn put(&mut self, x: u16, y: u16, ch: char) {
        if x < self.width && y < self.height {
            let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
            self.cells[idx] = ch;
        }
    }

    /// Draw a bordered box with `label` on its first inner line, clipped to
    /// the box and the canvas.
    pub fn draw_card(&mut self, rect: Rect, label: &str) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        for x in rect.x..=right {
            let edge = if x == rect.x || x == right { '+' } else { '-' };
            self.put(x, rect.y, edge);
            self.put(x, bottom, edge);
        }
        for y in rect.y.saturating_add(1)..bottom {
            self.put(rect.x, y, '|');
            self.put(right, y, '|');
        }
        if rect.height > 2 {
            let room = usize::from(rect.width.saturating_sub(4));
            for (offset, ch) in label.chars().take(room).enumerate() {
                // offset < room <= u16::MAX
                self.put(
                    rect.x.saturating_add(2 + offset as u16),
                    rect.y.saturating_add(1),
                    ch,
                );
            }
        }
    }

    /// Canvas rows with trailing blanks trimmed.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(usize::from(self.width.max(1)))
            .take(usize::from(self.height))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
    }
}

fn card_label(theme: &Theme) -> String {
    match &theme.id {
        ThemeId::Number(n) => format!("#{n} ({} sets)", theme.item_count),
        ThemeId::Slug(s) => format!("{s} ({} sets)", theme.item_count),
    }
}

/// Arrange the planned themes at `width` cells and draw them.
pub fn render_preview(
    grid: &CardGrid,
    width: u16,
    planned: &[PlannedTheme<'_, ThemeId>],
) -> (Canvas, GridArrangement) {
    let probe = grid.arrange_planned(Rect::from_size(width, u16::MAX), planned);
    let margin = grid.config().margin;
    let height = probe
        .height(grid.config())
        .saturating_add(u32::from(margin.top) + u32::from(margin.bottom));
    let height = u16::try_from(height).unwrap_or(u16::MAX);

    let mut canvas = Canvas::new(width, height);
    let arrangement = grid.render(Rect::from_size(width, height), planned, |theme, rect| {
        canvas.draw_card(rect, &card_label(theme));
    });
    (canvas, arrangement)
}

pub fn write_preview(out: &mut dyn Write, canvas: &Canvas, arrangement: &GridArrangement) -> Result<()> {
    writeln!(
        out,
        "viewport: {} ({} cards, {} rows)",
        arrangement.viewport,
        arrangement.rects.len(),
        arrangement.rows
    )?;
    for line in canvas.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_themes;
    use shelf_layout::{GridConfig, LayoutPlanner, Viewport};

    fn small_grid() -> CardGrid {
        CardGrid::new(GridConfig {
            gap: 1,
            card_height: 3,
            wide_min_width: 20,
            ..GridConfig::default()
        })
    }

    #[test]
    fn draws_box_with_label() {
        let mut canvas = Canvas::new(12, 3);
        canvas.draw_card(Rect::new(0, 0, 12, 3), "#1 (3 sets)");
        let lines: Vec<String> = canvas.lines().collect();
        assert_eq!(lines[0], "+----------+");
        assert_eq!(lines[1], "| #1 (3 se |");
        assert_eq!(lines[2], "+----------+");
    }

    #[test]
    fn tiny_rect_draws_nothing() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_card(Rect::new(0, 0, 1, 4), "x");
        assert!(canvas.lines().all(|l| l.is_empty()));
    }

    #[test]
    fn preview_pairs_half_cards_on_wide_canvas() {
        let themes = parse_themes(r#"[{"id": 1, "itemCount": 2}, {"id": 2, "itemCount": 3}]"#).unwrap();
        let planned = LayoutPlanner::default().plan(&themes).unwrap();
        let (canvas, arrangement) = render_preview(&small_grid(), 21, &planned);
        assert_eq!(arrangement.viewport, Viewport::Wide);
        assert_eq!(arrangement.rows, 1);
        let lines: Vec<String> = canvas.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "+--------+ +--------+");
    }

    #[test]
    fn preview_stacks_on_narrow_canvas() {
        let themes = parse_themes(r#"[{"id": 1, "itemCount": 2}, {"id": 2, "itemCount": 3}]"#).unwrap();
        let planned = LayoutPlanner::default().plan(&themes).unwrap();
        let (canvas, arrangement) = render_preview(&small_grid(), 10, &planned);
        assert_eq!(arrangement.viewport, Viewport::Narrow);
        assert_eq!(canvas.lines().count(), 3 + 1 + 3);
    }

    #[test]
    fn write_preview_prints_summary_first() {
        let themes = parse_themes(r#"[{"id": "city", "itemCount": 9}]"#).unwrap();
        let planned = LayoutPlanner::default().plan(&themes).unwrap();
        let (canvas, arrangement) = render_preview(&small_grid(), 30, &planned);
        let mut out = Vec::new();
        write_preview(&mut out, &canvas, &arrangement).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("viewport: wide (1 cards, 1 rows)"));
        assert!(text.contains("city (9 sets)"));
    }
}
