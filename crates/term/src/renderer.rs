//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Owns the terminal modes the game needs (raw mode, alternate screen, mouse
//! capture). After the first frame only changed cells are written, and style
//! escapes are emitted only for the attributes that differ from the last cell.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Unchanged cells shorter than this between two dirty runs are rewritten
/// instead of paying for another cursor move.
const MERGE_GAP: usize = 4;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then hand the previous frame back through `fb`.
    ///
    /// Callers keep one framebuffer and re-render into it every frame; the
    /// renderer keeps the drawn frame as the diff base without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.as_ref() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &mut self.buf)?;
            }
            _ => encode_full_into(fb, &mut self.buf)?,
        }
        self.flush_buf()?;

        let (w, h) = (fb.width(), fb.height());
        let mut spare = self
            .last
            .replace(std::mem::replace(fb, FrameBuffer::new(0, 0)))
            .unwrap_or_else(|| FrameBuffer::new(w, h));
        spare.resize(w, h);
        *fb = spare;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = StylePen::default();
    for y in 0..fb.height() {
        if let Some(row) = fb.row(y) {
            out.queue(cursor::MoveTo(0, y))?;
            pen.print(out, row)?;
        }
    }
    pen.finish(out)
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
///
/// Frames of different sizes are encoded in full.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut pen = StylePen::default();
    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        if old == new {
            continue;
        }
        for (start, end) in ChangedRuns::new(old, new) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            pen.print(out, &new[start..end])?;
        }
    }
    pen.finish(out)
}

/// Tracks the terminal's current style so only differences are emitted.
#[derive(Default)]
struct StylePen {
    current: Option<CellStyle>,
}

impl StylePen {
    fn print(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            self.set(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current.replace(style);
        if prev == Some(style) {
            return Ok(());
        }
        if prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(truecolor(style.fg)))?;
        }
        if prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(truecolor(style.bg)))?;
        }
        let intensity = |s: CellStyle| (s.bold, s.dim);
        if prev.map(intensity) != Some(intensity(style)) {
            // Bold and dim share one reset.
            out.queue(SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Half-open `[start, end)` column ranges where two equal-length rows differ,
/// with short clean gaps folded into the surrounding runs.
struct ChangedRuns<'a> {
    old: &'a [Cell],
    new: &'a [Cell],
    x: usize,
}

impl<'a> ChangedRuns<'a> {
    fn new(old: &'a [Cell], new: &'a [Cell]) -> Self {
        Self { old, new, x: 0 }
    }

    fn dirty(&self, x: usize) -> bool {
        self.old.get(x) != self.new.get(x)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let w = self.new.len().min(self.old.len());
        while self.x < w && !self.dirty(self.x) {
            self.x += 1;
        }
        if self.x >= w {
            return None;
        }

        let start = self.x;
        let mut end = start + 1;
        let mut x = end;
        while x < w {
            if self.dirty(x) {
                end = x + 1;
            } else if x - end >= MERGE_GAP {
                break;
            }
            x += 1;
        }
        self.x = end;
        Some((start, end))
    }
}
