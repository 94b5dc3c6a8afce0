//! Pixel raster and the drawing contract the grid renderer paints through.

use fieldview_core::{FieldError, Result};
use fieldview_types::{Rgb, BORDER_COLOR};

use crate::grid_view::GridGeometry;

/// 2-D drawing context: a current fill color, a current stroke color, filled
/// rectangles and 1-pixel lines. Coordinates are in pixels, origin top-left.
pub trait DrawSurface {
    fn set_fill_color(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32);
    fn set_stroke_color(&mut self, color: Rgb);
    fn stroke_line(&mut self, x0: u32, y0: u32, x1: u32, y1: u32);
}

/// In-memory RGB raster. Writes outside the raster are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
    fill: Rgb,
    stroke: Rgb,
}

impl PixelSurface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![BORDER_COLOR; len],
            fill: BORDER_COLOR,
            stroke: BORDER_COLOR,
        }
    }

    /// Surface sized for a `width x height` grid: one pixel of padding on
    /// each axis on top of the cells (and gridlines, when enabled).
    pub fn for_grid(width: u32, height: u32, geometry: &GridGeometry) -> Result<Self> {
        let mut surface = Self::new(0, 0);
        surface.fit_grid(width, height, geometry)?;
        Ok(surface)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Resize for a `width x height` grid under `geometry`, keeping the
    /// allocation when possible. All pixels are reset to the border color. On
    /// error the surface is left as it was.
    pub fn fit_grid(&mut self, width: u32, height: u32, geometry: &GridGeometry) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyGrid { width, height });
        }
        let (w, h) = geometry.surface_size(width, height)?;
        self.width = w;
        self.height = h;
        self.pixels.clear();
        self.pixels.resize((w as usize) * (h as usize), BORDER_COLOR);
        Ok(())
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width as u32 || y >= self.height as u32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    #[inline(always)]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

}

impl DrawSurface for PixelSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x_end = x.saturating_add(w).min(self.width as u32);
        let y_end = y.saturating_add(h).min(self.height as u32);
        for py in y..y_end {
            let row = (py as usize) * (self.width as usize);
            for px in x..x_end {
                self.pixels[row + px as usize] = self.fill;
            }
        }
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke = color;
    }

    /// Bresenham; axis-aligned lines degenerate to a straight run.
    fn stroke_line(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        let (mut x, mut y) = (x0 as i64, y0 as i64);
        let (x1, y1) = (x1 as i64, y1 as i64);
        let dx = (x1 - x).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let dy = -(y1 - y).abs();
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put_pixel(x as u32, y as u32, self.stroke);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
