//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{BoxChars, CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, Position, TileFace};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_W: u16 = 16;
const PANEL_GAP: u16 = 2;
const HIDDEN_FILL: char = '░';
/// Rows used by the side panel, scroll block included.
const PANEL_H: u16 = 22;

/// Where the grid landed for a given snapshot and viewport.
///
/// Tiles are boxed when the boxed grid fits, otherwise each tile is a single
/// row of `symbol + 1` columns. A grid that still does not fit is shown
/// through a window of `visible_rows` x `visible_cols` tiles starting at
/// (`scroll_row`, `scroll_col`), kept around the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub tile_w: u16,
    pub tile_h: u16,
    pub boxed: bool,
    pub rows: u16,
    pub cols: u16,
    pub scroll_row: u16,
    pub scroll_col: u16,
    pub visible_rows: u16,
    pub visible_cols: u16,
    pub panel_x: u16,
    pub panel_y: u16,
}

impl TileLayout {
    pub fn grid_w(&self) -> u16 {
        self.tile_w.saturating_mul(self.visible_cols)
    }

    pub fn grid_h(&self) -> u16 {
        self.tile_h.saturating_mul(self.visible_rows)
    }

    pub fn is_scrolled(&self) -> bool {
        self.visible_rows < self.rows || self.visible_cols < self.cols
    }

    /// Whether the tile at `pos` is inside the drawn window.
    pub fn is_visible(&self, pos: Position) -> bool {
        let (row, col) = (pos.row, pos.col);
        row >= usize::from(self.scroll_row)
            && row < usize::from(self.scroll_row) + usize::from(self.visible_rows)
            && col >= usize::from(self.scroll_col)
            && col < usize::from(self.scroll_col) + usize::from(self.visible_cols)
    }

    /// Top-left terminal cell of the tile at `pos`, if it is drawn.
    pub fn tile_origin(&self, pos: Position) -> Option<(u16, u16)> {
        if !self.is_visible(pos) {
            return None;
        }
        let col = (pos.col - usize::from(self.scroll_col)) as u16;
        let row = (pos.row - usize::from(self.scroll_row)) as u16;
        let x = self.origin_x.saturating_add(col.saturating_mul(self.tile_w));
        let y = self.origin_y.saturating_add(row.saturating_mul(self.tile_h));
        Some((x, y))
    }
}

/// First index of a `visible`-wide window over `total` that keeps `focus` near the middle.
fn window_start(focus: u16, visible: u16, total: u16) -> u16 {
    if visible >= total {
        return 0;
    }
    focus.saturating_sub(visible / 2).min(total - visible)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    background: CellStyle,
    hidden: CellStyle,
    shown: CellStyle,
    cleared: CellStyle,
    border: CellStyle,
    cursor: CellStyle,
    label: CellStyle,
    value: CellStyle,
}

impl Default for Palette {
    fn default() -> Self {
        let black = Rgb::new(0, 0, 0);
        Self {
            background: CellStyle::default(),
            hidden: CellStyle::new(Rgb::new(90, 110, 160), Rgb::new(20, 24, 40)),
            shown: CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 70, 120)).bold(),
            cleared: CellStyle::new(Rgb::new(110, 110, 110), black).dim(),
            border: CellStyle::new(Rgb::new(150, 150, 160), black),
            cursor: CellStyle::new(Rgb::new(255, 210, 60), black).bold(),
            label: CellStyle::new(Rgb::new(150, 150, 160), black),
            value: CellStyle::new(Rgb::new(255, 255, 255), black).bold(),
        }
    }
}

/// Terminal renderer for the tile grid and its side panel.
#[derive(Debug, Clone, Default)]
pub struct GameView {
    palette: Palette,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute where tiles go for this snapshot. Pure function of its inputs,
    /// shared by rendering and [`hit_test`](Self::hit_test).
    pub fn layout(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> TileLayout {
        let rows = snap.rows.min(u16::MAX as usize) as u16;
        let cols = snap.cols.min(u16::MAX as usize) as u16;
        let sym = snap.max_symbol_len().min(64) as u16;

        let avail_w = viewport.width.saturating_sub(PANEL_GAP + PANEL_W);
        let avail_h = viewport.height.saturating_sub(1);

        let boxed_w = sym + 4;
        let boxed_h = 3;
        let fits = |tile_w: u16, tile_h: u16| {
            u32::from(tile_w) * u32::from(cols) <= u32::from(avail_w)
                && u32::from(tile_h) * u32::from(rows) <= u32::from(avail_h)
        };

        let (tile_w, tile_h, boxed) = if fits(boxed_w, boxed_h) {
            (boxed_w, boxed_h, true)
        } else {
            (sym + 1, 1, false)
        };

        let visible_cols = (avail_w / tile_w).max(1).min(cols);
        let visible_rows = (avail_h / tile_h).max(1).min(rows);
        let focus = cursor.unwrap_or_default();
        let focus_row = focus.row.min(u16::MAX as usize) as u16;
        let focus_col = focus.col.min(u16::MAX as usize) as u16;
        let scroll_row = window_start(focus_row, visible_rows, rows);
        let scroll_col = window_start(focus_col, visible_cols, cols);

        let grid_w = tile_w.saturating_mul(visible_cols);
        let grid_h = tile_h.saturating_mul(visible_rows);
        let total_w = grid_w.saturating_add(PANEL_GAP + PANEL_W);
        let origin_x = viewport.width.saturating_sub(total_w) / 2;
        let origin_y = viewport.height.saturating_sub(grid_h) / 2;

        TileLayout {
            origin_x,
            origin_y,
            tile_w,
            tile_h,
            boxed,
            rows,
            cols,
            scroll_row,
            scroll_col,
            visible_rows,
            visible_cols,
            panel_x: origin_x.saturating_add(grid_w).saturating_add(PANEL_GAP),
            panel_y: origin_y.min(viewport.height.saturating_sub(PANEL_H)),
        }
    }

    /// Map a terminal cell back to the tile drawn there.
    pub fn hit_test(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<Position> {
        let layout = self.layout(snap, cursor, viewport);
        if layout.tile_w == 0 || x < layout.origin_x || y < layout.origin_y {
            return None;
        }
        let dx = x - layout.origin_x;
        let dy = y - layout.origin_y;
        if dx >= layout.grid_w() || dy >= layout.grid_h() {
            return None;
        }
        // The unboxed layout reserves the last column of each tile as a gap.
        if !layout.boxed && dx % layout.tile_w == layout.tile_w - 1 {
            return None;
        }
        let pos = Position::new(
            usize::from(layout.scroll_row + dy / layout.tile_h),
            usize::from(layout.scroll_col + dx / layout.tile_w),
        );
        snap.face(pos).map(|_| pos)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.palette.background.into_cell(' '));

        let layout = self.layout(snap, cursor, viewport);
        let first_row = usize::from(layout.scroll_row);
        let first_col = usize::from(layout.scroll_col);
        for row in first_row..first_row + usize::from(layout.visible_rows) {
            for col in first_col..first_col + usize::from(layout.visible_cols) {
                let pos = Position::new(row, col);
                if let (Some(face), Some(origin)) = (snap.face(pos), layout.tile_origin(pos)) {
                    self.draw_tile(fb, &layout, origin, face, cursor == Some(pos));
                }
            }
        }
        self.draw_side_panel(fb, snap, &layout);
    }

    pub fn render(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &TileLayout,
        (x, y): (u16, u16),
        face: &TileFace,
        is_cursor: bool,
    ) {
        let p = &self.palette;
        let fill = match face {
            TileFace::Hidden => p.hidden,
            TileFace::Shown(_) => p.shown,
            TileFace::Cleared(_) => p.cleared,
        };

        if layout.boxed {
            let (chars, border) = if is_cursor {
                (BoxChars::HEAVY, p.cursor)
            } else {
                (BoxChars::LIGHT, p.border)
            };
            let inner_w = layout.tile_w - 2;
            let inner_y = y.saturating_add(1);
            let inner_x = x.saturating_add(1);
            fb.draw_box(x, y, layout.tile_w, layout.tile_h, chars, border);
            match face {
                TileFace::Hidden => fb.fill_rect(inner_x, inner_y, inner_w, 1, HIDDEN_FILL, fill),
                TileFace::Shown(s) | TileFace::Cleared(s) => {
                    fb.fill_rect(inner_x, inner_y, inner_w, 1, ' ', fill);
                    fb.put_str_centered(inner_x, inner_y, inner_w, s, fill);
                }
            }
        } else {
            let w = layout.tile_w - 1;
            let style = if is_cursor {
                CellStyle { bg: p.cursor.fg, fg: Rgb::new(0, 0, 0), ..fill }
            } else {
                fill
            };
            match face {
                TileFace::Hidden => fb.fill_rect(x, y, w, 1, HIDDEN_FILL, style),
                TileFace::Shown(s) | TileFace::Cleared(s) => {
                    fb.fill_rect(x, y, w, 1, ' ', style);
                    fb.put_str(x, y, s, style);
                }
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, layout: &TileLayout) {
        let x = layout.panel_x;
        let mut y = layout.panel_y;
        let p = &self.palette;

        fb.put_str(x, y, "SCORE", p.label);
        fb.put_u32(x, y + 1, snap.score, p.value);
        y += 3;

        fb.put_str(x, y, "GROUPS", p.label);
        let cx = fb.put_u32(x, y + 1, snap.score, p.value);
        let cx = fb.put_str(cx, y + 1, "/", p.label);
        fb.put_u32(cx, y + 1, snap.total_groups, p.value);
        y += 3;

        fb.put_str(x, y, "FLIPS", p.label);
        fb.put_u32(x, y + 1, snap.flips, p.value);
        y += 3;

        fb.put_str(x, y, "TIME", p.label);
        let secs = format!("{:.1}s", snap.elapsed_ms as f64 / 1000.0);
        fb.put_str(x, y + 1, &secs, p.value);
        y += 3;

        let status = match snap.phase {
            Phase::AwaitingSelection => format!("PICK {}/{}", snap.selected, snap.group_size),
            Phase::Evaluating => "CHECKING...".to_string(),
            Phase::Finished => "CLEARED!".to_string(),
        };
        fb.put_str(x, y, &status, p.cursor);
        y += 2;

        if layout.is_scrolled() {
            let span = |first: u16, shown: u16, total: u16| {
                format!("{}-{}/{}", first + 1, first + shown, total)
            };
            fb.put_str(x, y, "VIEW", p.label);
            let rows = span(layout.scroll_row, layout.visible_rows, layout.rows);
            fb.put_str(x, y + 1, &format!("r {}", rows), p.value);
            let cols = span(layout.scroll_col, layout.visible_cols, layout.cols);
            fb.put_str(x, y + 2, &format!("c {}", cols), p.value);
            y += 4;
        }

        for line in ["arrows: move", "space: flip", ".: resolve", "q: quit"] {
            fb.put_str(x, y, line, p.label);
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap_2x2() -> SessionSnapshot {
        SessionSnapshot {
            rows: 2,
            cols: 2,
            tiles: vec![
                TileFace::Hidden,
                TileFace::Shown("A".into()),
                TileFace::Cleared("B".into()),
                TileFace::Hidden,
            ],
            total_groups: 2,
            group_size: 2,
            ..Default::default()
        }
    }

    #[test]
    fn small_grid_is_boxed_and_centered() {
        let view = GameView::new();
        let layout = view.layout(&snap_2x2(), None, Viewport::new(80, 24));
        assert!(layout.boxed);
        assert_eq!((layout.tile_w, layout.tile_h), (5, 3));
        let total = layout.grid_w() + PANEL_GAP + PANEL_W;
        assert_eq!(layout.origin_x, (80 - total) / 2);
        assert_eq!(layout.origin_y, (24 - 6) / 2);
    }

    #[test]
    fn large_grid_falls_back_to_compact() {
        let snap = SessionSnapshot {
            rows: 37,
            cols: 54,
            tiles: vec![TileFace::Hidden; 37 * 54],
            total_groups: 999,
            group_size: 2,
            ..Default::default()
        };
        let layout = GameView::new().layout(&snap, None, Viewport::new(250, 60));
        assert!(!layout.boxed);
        assert_eq!(layout.tile_h, 1);
        // Three-letter labels plus a one-column gap.
        assert_eq!(layout.tile_w, 4);
    }

    #[test]
    fn faces_are_drawn() {
        let view = GameView::new();
        let vp = Viewport::new(80, 24);
        let snap = snap_2x2();
        let fb = view.render(&snap, None, vp);
        let layout = view.layout(&snap, None, vp);

        let (x, y) = layout.tile_origin(Position::new(0, 1)).unwrap();
        assert_eq!(fb.get(x + 2, y + 1).unwrap().ch, 'A');
        let (x, y) = layout.tile_origin(Position::new(0, 0)).unwrap();
        assert_eq!(fb.get(x + 1, y + 1).unwrap().ch, HIDDEN_FILL);
        let (x, y) = layout.tile_origin(Position::new(1, 0)).unwrap();
        let cleared = fb.get(x + 2, y + 1).unwrap();
        assert_eq!(cleared.ch, 'B');
        assert!(cleared.style.dim);
    }

    #[test]
    fn cursor_uses_heavy_border() {
        let view = GameView::new();
        let vp = Viewport::new(80, 24);
        let snap = snap_2x2();
        let fb = view.render(&snap, Some(Position::new(1, 1)), vp);
        let layout = view.layout(&snap, None, vp);
        let (x, y) = layout.tile_origin(Position::new(1, 1)).unwrap();
        assert_eq!(fb.get(x, y).unwrap().ch, '┏');
        let (x, y) = layout.tile_origin(Position::new(0, 0)).unwrap();
        assert_eq!(fb.get(x, y).unwrap().ch, '┌');
    }

    #[test]
    fn panel_shows_counters() {
        let mut snap = snap_2x2();
        snap.score = 1;
        snap.flips = 7;
        snap.elapsed_ms = 2_500;
        let fb = GameView::new().render(&snap, None, Viewport::new(80, 24));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("1/2"));
        assert!(fb.contains_text("FLIPS"));
        assert!(fb.contains_text("2.5s"));
    }

    #[test]
    fn hit_test_round_trips_every_tile() {
        let view = GameView::new();
        let vp = Viewport::new(80, 24);
        let snap = snap_2x2();
        let layout = view.layout(&snap, None, vp);
        for row in 0..2 {
            for col in 0..2 {
                let pos = Position::new(row, col);
                let (x, y) = layout.tile_origin(pos).unwrap();
                assert_eq!(view.hit_test(&snap, None, vp, x, y), Some(pos));
                assert_eq!(
                    view.hit_test(&snap, None, vp, x + layout.tile_w - 1, y + layout.tile_h - 1),
                    Some(pos)
                );
            }
        }
    }

    #[test]
    fn hit_test_outside_grid() {
        let view = GameView::new();
        let vp = Viewport::new(80, 24);
        let snap = snap_2x2();
        let layout = view.layout(&snap, None, vp);
        assert_eq!(view.hit_test(&snap, None, vp, 0, 0), None);
        assert_eq!(
            view.hit_test(&snap, None, vp, layout.origin_x + layout.grid_w(), layout.origin_y),
            None
        );
        assert_eq!(view.hit_test(&snap, None, vp, layout.panel_x, layout.origin_y), None);
    }

    fn wide_snap() -> SessionSnapshot {
        SessionSnapshot {
            rows: 2,
            cols: 997,
            tiles: vec![TileFace::Hidden; 2 * 997],
            total_groups: 997,
            group_size: 2,
            ..Default::default()
        }
    }

    #[test]
    fn window_start_centers_and_clamps() {
        assert_eq!(window_start(0, 45, 997), 0);
        assert_eq!(window_start(100, 45, 997), 78);
        assert_eq!(window_start(996, 45, 997), 952);
        assert_eq!(window_start(7, 45, 10), 0);
    }

    #[test]
    fn wide_grid_window_follows_cursor() {
        let view = GameView::new();
        let vp = Viewport::new(200, 50);
        let snap = wide_snap();

        let home = view.layout(&snap, None, vp);
        assert!(home.is_scrolled());
        assert_eq!((home.scroll_row, home.scroll_col), (0, 0));
        assert_eq!(home.visible_cols, (200 - PANEL_GAP - PANEL_W) / 4);
        assert!(home.tile_origin(Position::new(1, 996)).is_none());

        let cursor = Position::new(1, 996);
        let far = view.layout(&snap, Some(cursor), vp);
        assert_eq!(far.scroll_col, 997 - far.visible_cols);
        let (x, y) = far.tile_origin(cursor).unwrap();
        assert_eq!(view.hit_test(&snap, Some(cursor), vp, x, y), Some(cursor));

        let fb = view.render(&snap, Some(cursor), vp);
        assert_eq!(fb.get(x, y).unwrap().style.bg, view.palette.cursor.fg);
        assert!(fb.contains_text("c 953-997/997"));
    }

    #[test]
    fn fitting_grid_reports_no_scroll() {
        let view = GameView::new();
        let vp = Viewport::new(80, 24);
        let layout = view.layout(&snap_2x2(), Some(Position::new(1, 1)), vp);
        assert!(!layout.is_scrolled());
        assert_eq!((layout.scroll_row, layout.scroll_col), (0, 0));
        assert!(!view.render(&snap_2x2(), None, vp).contains_text("VIEW"));
    }
}
