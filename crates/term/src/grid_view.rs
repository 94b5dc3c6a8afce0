//! GridRenderer: paints a picture's cells onto a drawing surface.
//!
//! This module is pure (no I/O). It can be unit-tested against a
//! [`PixelSurface`](crate::PixelSurface) or any recording [`DrawSurface`].

use fieldview_core::{BufferView, ColorMapper, FieldError, Result};
use fieldview_types::{RenderMode, GRIDLINE_COLOR};

use crate::surface::DrawSurface;

/// Cell placement on the surface.
///
/// Without gridlines the pitch equals the cell size; with gridlines every cell
/// gets one extra pixel for the separator. Cell `(row, col)` starts at
/// `(col * pitch + 1, row * pitch + 1)`, leaving the first pixel row and column
/// as a border (or the first gridline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    cell_size: u16,
    gridlines: bool,
}

impl GridGeometry {
    pub fn new(cell_size: u16, gridlines: bool) -> Result<Self> {
        if cell_size == 0 {
            return Err(FieldError::ZeroCellSize);
        }
        Ok(Self {
            cell_size,
            gridlines,
        })
    }

    pub fn cell_size(&self) -> u16 {
        self.cell_size
    }

    pub fn gridlines(&self) -> bool {
        self.gridlines
    }

    #[inline(always)]
    pub fn pitch(&self) -> u32 {
        self.cell_size as u32 + u32::from(self.gridlines)
    }

    /// Saturates at `u32::MAX` for cells far outside any addressable surface.
    #[inline(always)]
    pub fn cell_origin(&self, row: u32, col: u32) -> (u32, u32) {
        let pitch = self.pitch();
        let at = |i: u32| i.saturating_mul(pitch).saturating_add(1);
        (at(col), at(row))
    }

    /// Pixel size of a surface holding a `width x height` grid.
    pub fn surface_size(&self, width: u32, height: u32) -> Result<(u16, u16)> {
        let w = self.pitch() as u64 * width as u64 + 1;
        let h = self.pitch() as u64 * height as u64 + 1;
        match (u16::try_from(w), u16::try_from(h)) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(FieldError::SurfaceTooLarge {
                width: w,
                height: h,
            }),
        }
    }

    fn with_gridlines(self, gridlines: bool) -> Self {
        Self { gridlines, ..self }
    }
}

/// Paints one filled rectangle per cell, row 0 first, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRenderer {
    geometry: GridGeometry,
    mapper: ColorMapper,
}

impl GridRenderer {
    pub fn new(geometry: GridGeometry, mode: RenderMode) -> Self {
        Self {
            geometry,
            mapper: ColorMapper::new(mode),
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn mode(&self) -> RenderMode {
        self.mapper.mode()
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mapper = ColorMapper::new(mode);
    }

    /// Advance to the next render mode. Counter mode is skipped when the
    /// picture has no counter array.
    pub fn cycle_mode(&mut self, has_counter: bool) -> RenderMode {
        let mut next = self.mode().next();
        if next.needs_counter() && !has_counter {
            next = next.next();
        }
        self.set_mode(next);
        next
    }

    /// Flip gridlines. The surface must be rebuilt afterwards since the pitch changes.
    pub fn toggle_gridlines(&mut self) -> bool {
        self.geometry = self.geometry.with_gridlines(!self.geometry.gridlines());
        self.geometry.gridlines()
    }

    /// Paint every cell of `view` onto `surface`.
    ///
    /// Every call overwrites all pixels it touches, so repeated calls with
    /// unchanged buffers leave the surface identical. `surface` is expected to
    /// be sized by [`GridGeometry::surface_size`] for the view; anything beyond
    /// it is clipped by the surface.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, view: &BufferView<'_>) {
        let width = view.width();
        let height = view.height();
        if self.geometry.gridlines() {
            self.draw_gridlines(surface, width, height);
        }

        let size = self.geometry.cell_size() as u32;
        for row in 0..height {
            for col in 0..width {
                let (x, y) = self.geometry.cell_origin(row, col);
                surface.set_fill_color(self.mapper.cell_color(view, row, col));
                surface.fill_rect(x, y, size, size);
            }
        }
    }

    fn draw_gridlines<S: DrawSurface + ?Sized>(&self, surface: &mut S, width: u32, height: u32) {
        let pitch = self.geometry.pitch();
        let right = pitch.saturating_mul(width);
        let bottom = pitch.saturating_mul(height);
        surface.set_stroke_color(GRIDLINE_COLOR);

        // Vertical.
        for i in 0..=width {
            let x = i.saturating_mul(pitch);
            surface.stroke_line(x, 0, x, bottom);
        }
        // Horizontal.
        for j in 0..=height {
            let y = j.saturating_mul(pitch);
            surface.stroke_line(0, y, right, y);
        }
    }
}
