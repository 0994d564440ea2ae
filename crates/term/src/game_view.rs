//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The field is drawn with row 0 at the bottom. When the field is taller than
//! the viewport the top rows are cropped, so the stack and the landing area
//! stay visible; pieces above the visible area appear as they fall into it.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Cell, PieceKind};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 10;

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

/// Placement of the field inside the framebuffer, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Top-left corner of the border
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Field rows that fit; rows at or above this are cropped
    pub visible_rows: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Where the field lands for a given snapshot and viewport
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> FieldLayout {
        let fit_rows = viewport.height.saturating_sub(2) / self.cell_h;
        let visible_rows = snap.height.min(fit_rows);

        let frame_w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = visible_rows.saturating_mul(self.cell_h).saturating_add(2);

        FieldLayout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
            visible_rows,
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let layout = self.layout(snap, viewport);
        let inner_w = layout.frame_w.saturating_sub(2);
        let inner_h = layout.frame_h.saturating_sub(2);

        let empty = Style::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        fb.fill_rect(layout.x + 1, layout.y + 1, inner_w, inner_h, ' ', empty);
        for row in 0..layout.visible_rows as i32 {
            for col in 0..snap.width as i32 {
                self.fill_field_cell(fb, &layout, (col, row), '·', empty);
            }
        }

        draw_border(
            fb,
            layout.x,
            layout.y,
            layout.frame_w,
            layout.frame_h,
            Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)),
        );

        let settled = Style::new(Rgb::new(170, 170, 180), FIELD_BG);
        for &cell in &snap.settled {
            self.fill_field_cell(fb, &layout, cell, '█', settled);
        }

        if let Some(kind) = snap.active_kind {
            let style = Style::new(piece_color(kind), FIELD_BG).bold();
            for &cell in &snap.active {
                self.fill_field_cell(fb, &layout, cell, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if let Some(text) = overlay_text(snap) {
            draw_overlay_text(fb, &layout, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left corner of a field cell, if visible
    pub fn cell_origin(&self, snap: &GameSnapshot, layout: &FieldLayout, cell: Cell) -> Option<(u16, u16)> {
        let (col, row) = cell;
        if col < 0 || col >= snap.width as i32 || row < 0 || row >= layout.visible_rows as i32 {
            return None;
        }
        let from_top = (layout.visible_rows as i32 - 1 - row) as u16;
        Some((
            layout.x + 1 + col as u16 * self.cell_w,
            layout.y + 1 + from_top * self.cell_h,
        ))
    }

    fn fill_field_cell(&self, fb: &mut FrameBuffer, layout: &FieldLayout, cell: Cell, ch: char, style: Style) {
        let (col, row) = cell;
        if col < 0 || row < 0 || row >= layout.visible_rows as i32 {
            return;
        }
        let px = (col as u16)
            .saturating_mul(self.cell_w)
            .saturating_add(layout.x + 1);
        if px >= layout.x + layout.frame_w - 1 {
            return;
        }
        let from_top = (layout.visible_rows as i32 - 1 - row) as u16;
        let py = layout.y + 1 + from_top * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: &FieldLayout) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATUS", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, status_text(snap), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.active_kind.map_or("-", piece_letter), value);
    }
}

/// Side panel status line
pub fn status_text(snap: &GameSnapshot) -> &'static str {
    if snap.game_over {
        "GAME OVER"
    } else if snap.paused {
        "PAUSED"
    } else if snap.running {
        "RUNNING"
    } else {
        "STOPPED"
    }
}

/// Centered overlay text, if any
pub fn overlay_text(snap: &GameSnapshot) -> Option<&'static str> {
    if snap.game_over {
        Some("GAME OVER")
    } else if snap.paused {
        Some("PAUSED")
    } else if !snap.running {
        Some("PRESS ENTER")
    } else {
        None
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: &FieldLayout, text: &str) {
    let mid_y = layout.y.saturating_add(layout.frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout
        .x
        .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
    let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}
