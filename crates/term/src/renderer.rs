//! TerminalRenderer: flushes a pixel surface to a real terminal.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper half
//! block (`▀`): foreground is the top pixel, background the bottom one. The
//! first frame (and any size change) is a full redraw; after that only changed
//! runs are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use fieldview_types::{Rgb, BORDER_COLOR};

use crate::surface::PixelSurface;

const UPPER_HALF: char = '▀';

/// Terminal viewport dimensions (columns x rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Pixel capacity: one pixel per column, two per row.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32 * 2)
    }
}

/// One terminal cell: two stacked pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfBlock {
    pub top: Rgb,
    pub bottom: Rgb,
}

impl Default for HalfBlock {
    fn default() -> Self {
        Self {
            top: BORDER_COLOR,
            bottom: BORDER_COLOR,
        }
    }
}

/// Grid of half-block cells ready to be encoded for the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TermFrame {
    width: u16,
    height: u16,
    cells: Vec<HalfBlock>,
}

impl TermFrame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![HalfBlock::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<HalfBlock> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[(y as usize) * (self.width as usize) + (x as usize)])
    }

    fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize((width as usize) * (height as usize), HalfBlock::default());
    }

    /// Fold `surface` into half blocks, cropped to `viewport`.
    pub fn fold(&mut self, surface: &PixelSurface, viewport: Viewport) {
        let cols = surface.width().min(viewport.width);
        let rows = surface.height().div_ceil(2).min(viewport.height);
        self.resize(cols, rows);
        for y in 0..rows {
            for x in 0..cols {
                let top = surface.get(x as u32, 2 * y as u32).unwrap_or(BORDER_COLOR);
                let bottom = surface
                    .get(x as u32, 2 * y as u32 + 1)
                    .unwrap_or(BORDER_COLOR);
                let i = (y as usize) * (cols as usize) + (x as usize);
                self.cells[i] = HalfBlock { top, bottom };
            }
        }
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    next: TermFrame,
    last: Option<TermFrame>,
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
            next: TermFrame::default(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present `surface`, diffing against the previously presented frame.
    pub fn draw(&mut self, surface: &PixelSurface, viewport: Viewport) -> Result<()> {
        self.encode_into(surface, viewport)?;
        self.flush_buf()
    }

    /// Encode the bytes `draw` would write and mark the frame as presented.
    ///
    /// The first frame, and any frame whose size differs from the last one, is a
    /// full redraw; otherwise only changed runs are encoded.
    pub fn encode_into(&mut self, surface: &PixelSurface, viewport: Viewport) -> Result<&[u8]> {
        self.next.fold(surface, viewport);

        self.buf.clear();
        match self.last.as_mut() {
            Some(prev)
                if prev.width() == self.next.width() && prev.height() == self.next.height() =>
            {
                encode_diff_into(prev, &self.next, &mut self.buf)?;
                // Swap so the next call folds into the old frame without allocating.
                std::mem::swap(prev, &mut self.next);
            }
            _ => {
                encode_full_into(&self.next, &mut self.buf)?;
                self.last = Some(self.next.clone());
            }
        }
        Ok(&self.buf)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(frame: &TermFrame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<HalfBlock> = None;
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let cell = frame.get(x, y).unwrap_or_default();
            if current != Some(cell) {
                apply_colors_into(out, cell)?;
                current = Some(cell);
            }
            out.queue(Print(UPPER_HALF))?;
        }
        if y + 1 < frame.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
pub fn encode_diff_into(prev: &TermFrame, next: &TermFrame, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<HalfBlock> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current != Some(cell) {
                apply_colors_into(out, cell)?;
                current = Some(cell);
            }
            out.queue(Print(UPPER_HALF))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn apply_colors_into(out: &mut Vec<u8>, cell: HalfBlock) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(cell.top)))?;
    out.queue(SetBackgroundColor(rgb_to_color(cell.bottom)))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &TermFrame,
    next: &TermFrame,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawSurface;

    fn surface_with(pixels: &[(u32, u32, Rgb)], w: u16, h: u16) -> PixelSurface {
        let mut s = PixelSurface::new(w, h);
        for &(x, y, c) in pixels {
            s.set_fill_color(c);
            s.fill_rect(x, y, 1, 1);
        }
        s
    }

    #[test]
    fn fold_pairs_rows_and_pads_odd_height() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let s = surface_with(&[(1, 0, red), (1, 1, blue), (0, 2, red)], 2, 3);

        let mut frame = TermFrame::default();
        frame.fold(&s, Viewport::new(80, 24));
        assert_eq!((frame.width(), frame.height()), (2, 2));
        assert_eq!(frame.get(1, 0), Some(HalfBlock { top: red, bottom: blue }));
        assert_eq!(
            frame.get(0, 1),
            Some(HalfBlock {
                top: red,
                bottom: BORDER_COLOR
            })
        );
    }

    #[test]
    fn fold_crops_to_viewport() {
        let s = PixelSurface::new(513, 513);
        let mut frame = TermFrame::default();
        frame.fold(&s, Viewport::new(80, 24));
        assert_eq!((frame.width(), frame.height()), (80, 24));
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let white = Rgb::new(255, 255, 255);
        let a = TermFrame::new(5, 1);
        let s = surface_with(&[(1, 0, white), (2, 0, white), (3, 1, white)], 5, 2);
        let mut b = TermFrame::default();
        b.fold(&s, Viewport::new(5, 1));

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn unchanged_frame_encodes_no_cells() {
        let frame = TermFrame::new(4, 2);
        let mut out = Vec::new();
        encode_diff_into(&frame, &frame.clone(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains(UPPER_HALF));
    }

    #[test]
    fn full_encode_prints_every_cell() {
        let frame = TermFrame::new(3, 2);
        let mut out = Vec::new();
        encode_full_into(&frame, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(UPPER_HALF).count(), 6);
    }

    fn encoded(r: &mut TerminalRenderer, s: &PixelSurface, viewport: Viewport) -> String {
        String::from_utf8(r.encode_into(s, viewport).unwrap().to_vec()).unwrap()
    }

    #[test]
    fn first_frame_is_full_then_only_changes() {
        const CLEAR: &str = "\x1b[2J";
        let viewport = Viewport::new(80, 24);
        let mut r = TerminalRenderer::new();

        let s = PixelSurface::new(4, 4);
        let first = encoded(&mut r, &s, viewport);
        assert!(first.contains(CLEAR));
        assert_eq!(first.matches(UPPER_HALF).count(), 8);

        let same = encoded(&mut r, &s, viewport);
        assert!(!same.contains(CLEAR));
        assert_eq!(same.matches(UPPER_HALF).count(), 0);

        // After the swap the diff base must be the frame just presented.
        let changed = surface_with(&[(2, 3, Rgb::new(9, 9, 9))], 4, 4);
        assert_eq!(encoded(&mut r, &changed, viewport).matches(UPPER_HALF).count(), 1);
        assert_eq!(encoded(&mut r, &changed, viewport).matches(UPPER_HALF).count(), 0);
        assert_eq!(encoded(&mut r, &s, viewport).matches(UPPER_HALF).count(), 1);
    }

    #[test]
    fn size_change_and_invalidate_force_full_redraw() {
        const CLEAR: &str = "\x1b[2J";
        let mut r = TerminalRenderer::new();
        let s = PixelSurface::new(4, 4);
        encoded(&mut r, &s, Viewport::new(80, 24));

        let cropped = encoded(&mut r, &s, Viewport::new(3, 24));
        assert!(cropped.contains(CLEAR));
        assert_eq!(cropped.matches(UPPER_HALF).count(), 6);

        r.invalidate();
        let again = encoded(&mut r, &s, Viewport::new(3, 24));
        assert!(again.contains(CLEAR));
        assert_eq!(again.matches(UPPER_HALF).count(), 6);
    }
}
