//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is drawn as a 4x4 grid of `cell_w` x `cell_h` terminal cells
//! inside a one-character border. The same layout math backs [`GameView::geometry`],
//! which the input layer uses to turn mouse coordinates into board-space points.

use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    BoardGeometry, DragRect, PhaseKind, CELL_SIZE, COMPACT_CELL_SIZE, GRID_SIZE,
};

const N: u16 = GRID_SIZE as u16;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const HIGHLIGHT_BG: Rgb = Rgb::new(90, 80, 20);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const DRAG_FG: Rgb = Rgb::new(250, 210, 90);

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

/// What the side panel shows about the TCP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AdapterStatusView {
    pub client_count: u16,
    pub listen_port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the sum-ten board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    /// Board-space pixels per cell reported to the session.
    cell_size: u32,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2:1 width to height keeps cells roughly square on typical fonts.
        Self {
            cell_w: 6,
            cell_h: 3,
            cell_size: CELL_SIZE,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    /// Smaller cells for narrow terminals.
    pub fn compact() -> Self {
        Self {
            cell_w: 4,
            cell_h: 2,
            cell_size: COMPACT_CELL_SIZE,
            anchor_y: AnchorY::Center,
        }
    }

    /// Pick the default layout when it fits, the compact one otherwise.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let full = Self::default();
        let (w, h) = full.frame_size();
        if viewport.width >= w && viewport.height >= h {
            full
        } else {
            Self::compact()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Board plus border, in terminal cells.
    fn frame_size(&self) -> (u16, u16) {
        (N * self.cell_w + 2, N * self.cell_h + 2)
    }

    /// Top-left corner of the border.
    fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (start_x, start_y)
    }

    /// Where the board lands in `viewport`, for mapping mouse input.
    pub fn geometry(&self, viewport: Viewport) -> BoardGeometry {
        let (start_x, start_y) = self.frame_origin(viewport);
        BoardGeometry {
            origin_x: start_x + 1,
            origin_y: start_y + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            cell_size: self.cell_size,
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_adapter(snap, None, viewport, fb);
    }

    pub fn render_into_with_adapter(
        &self,
        snap: &SessionSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);
        let geo = self.geometry(viewport);

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            geo.origin_x,
            geo.origin_y,
            geo.width(),
            geo.height(),
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let frozen = snap.phase == PhaseKind::Over;
        for row in 0..N {
            for col in 0..N {
                match snap.board {
                    Some(rows) => {
                        let value = rows[row as usize][col as usize];
                        let lit = snap.is_highlighted(row as usize, col as usize);
                        self.draw_value_cell(fb, &geo, row, col, value, lit, frozen);
                    }
                    None => self.draw_empty_cell(fb, &geo, row, col),
                }
            }
        }

        if let Some(rect) = snap.drag {
            self.draw_drag_outline(fb, &geo, rect);
        }

        self.draw_side_panel(fb, snap, adapter, viewport, start_x, start_y, frame_w);

        match snap.phase {
            PhaseKind::Idle => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "PRESS ENTER TO START");
            }
            PhaseKind::Over => {
                let final_score = snap.final_score.unwrap_or(snap.score);
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "TIME UP!");
                draw_overlay_score(fb, start_x, start_y, frame_w, frame_h, final_score);
            }
            PhaseKind::Running => {}
        }

        let hint = CellStyle::new(Rgb::new(150, 150, 150), PANEL_BG).dim();
        if viewport.height > start_y + frame_h {
            let hint_text = "drag to select  ENTER start  Q quit";
            let hint_w = hint_text.len() as u16;
            let hx = viewport.width.saturating_sub(hint_w) / 2;
            fb.put_str(hx, start_y + frame_h, hint_text, hint);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_adapter(
        &self,
        snap: &SessionSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_adapter(snap, adapter, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, geo: &BoardGeometry, row: u16, col: u16) -> (u16, u16) {
        (
            geo.origin_x + col * self.cell_w,
            geo.origin_y + row * self.cell_h,
        )
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, geo: &BoardGeometry, row: u16, col: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        let (px, py) = self.cell_origin(geo, row, col);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_value_cell(
        &self,
        fb: &mut FrameBuffer,
        geo: &BoardGeometry,
        row: u16,
        col: u16,
        value: u8,
        highlighted: bool,
        frozen: bool,
    ) {
        let bg = if highlighted { HIGHLIGHT_BG } else { BOARD_BG };
        let (px, py) = self.cell_origin(geo, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(BOARD_BG, bg));

        let mut style = CellStyle::new(value_color(value), bg).bold();
        if frozen {
            style.bold = false;
            style.dim = true;
        }
        let ch = char::from_digit(value as u32, 10).unwrap_or('?');
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, ch, style);
    }

    /// Outline the provisional rectangle, clipped to the board.
    fn draw_drag_outline(&self, fb: &mut FrameBuffer, geo: &BoardGeometry, rect: DragRect) {
        let size = self.cell_size.max(1) as i64;
        let to_term = |px: i64, len: u16, extent: u16| -> u16 {
            let t = (px * len as i64).div_euclid(size);
            t.clamp(0, extent as i64 - 1) as u16
        };

        let left = rect.left as i64;
        let top = rect.top as i64;
        let x0 = geo.origin_x + to_term(left, self.cell_w, geo.width());
        let x1 = geo.origin_x + to_term(left + rect.width as i64, self.cell_w, geo.width());
        let y0 = geo.origin_y + to_term(top, self.cell_h, geo.height());
        let y1 = geo.origin_y + to_term(top + rect.height as i64, self.cell_h, geo.height());

        let mut mark = |x: u16, y: u16, ch: char| {
            let Some(cell) = fb.get(x, y) else {
                return;
            };
            // Keep values readable under the outline.
            if cell.ch.is_ascii_digit() {
                return;
            }
            let style = CellStyle::new(DRAG_FG, cell.style.bg).bold();
            fb.put_char(x, y, ch, style);
        };

        if x0 == x1 && y0 == y1 {
            mark(x0, y0, '+');
            return;
        }
        for x in x0..=x1 {
            mark(x, y0, '─');
            mark(x, y1, '─');
        }
        for y in y0..=y1 {
            mark(x0, y, '│');
            mark(x1, y, '│');
        }
        if x0 != x1 && y0 != y1 {
            mark(x0, y0, '┌');
            mark(x1, y0, '┐');
            mark(x0, y1, '└');
            mark(x1, y1, '┘');
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COMBO", label);
        y = y.saturating_add(1);
        let end = fb.put_u32(panel_x, y, snap.combo, value);
        if snap.combo >= 2 {
            fb.put_char(end, y, 'x', CellStyle::new(DRAG_FG, PANEL_BG).bold());
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let time_style = if snap.phase == PhaseKind::Running && snap.time_left <= 5 {
            CellStyle::new(Rgb::new(240, 90, 80), PANEL_BG).bold()
        } else {
            value
        };
        let end = fb.put_u32(panel_x, y, snap.time_left, time_style);
        fb.put_char(end, y, 's', time_style);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MATCHES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.matches, value);
        y = y.saturating_add(2);

        if y >= viewport.height {
            return;
        }
        fb.put_str(panel_x, y, "AI", label);
        y = y.saturating_add(1);
        match adapter {
            Some(st) => {
                let end = fb.put_str(panel_x, y, "ON", value);
                if let Some(port) = st.listen_port {
                    let dim = value.dim();
                    let end = fb.put_str(end + 1, y, ":", dim);
                    fb.put_u32(end, y, port as u32, dim);
                }
                y = y.saturating_add(1);
                let end = fb.put_str(panel_x, y, "C ", value);
                fb.put_u32(end, y, st.client_count as u32, value);
            }
            None => {
                fb.put_str(panel_x, y, "OFF", value);
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn overlay_style() -> CellStyle {
    CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold()
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    line: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2).saturating_add(line);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    fb.put_str(x, mid_y, text, overlay_style());
}

/// "FINAL SCORE n" on the line under the main overlay.
fn draw_overlay_score(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    score: u32,
) {
    const LABEL: &str = "FINAL SCORE ";
    let digits = decimal_width(score);
    let text_w = LABEL.len() as u16 + digits;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let y = start_y.saturating_add(frame_h / 2).saturating_add(1);
    let end = fb.put_str(x, y, LABEL, overlay_style());
    fb.put_u32(end, y, score, overlay_style());
}

fn decimal_width(mut v: u32) -> u16 {
    let mut w = 1;
    while v >= 10 {
        v /= 10;
        w += 1;
    }
    w
}

fn value_color(value: u8) -> Rgb {
    match value {
        1 => Rgb::new(120, 200, 250),
        2 => Rgb::new(110, 220, 160),
        3 => Rgb::new(170, 230, 100),
        4 => Rgb::new(240, 220, 80),
        5 => Rgb::new(250, 170, 70),
        6 => Rgb::new(240, 120, 90),
        7 => Rgb::new(230, 100, 160),
        8 => Rgb::new(190, 120, 230),
        9 => Rgb::new(140, 140, 250),
        _ => Rgb::new(200, 200, 200),
    }
}
