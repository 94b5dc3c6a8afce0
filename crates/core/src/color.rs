//! Cell value to display color mapping.

use crate::buffer_view::BufferView;
use fieldview_types::{RenderMode, Rgb, BICOLOR_TOUCHED, BICOLOR_UNTOUCHED};

/// Clamp to `[0, 1]`. NaN maps to 0.
#[inline(always)]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline(always)]
fn to_byte(v: f32) -> u8 {
    // clamp01 keeps the product in [0, 255].
    (255.0 * clamp01(v)).floor() as u8
}

/// `floor(255 * clamp01(c))` per channel.
#[inline(always)]
pub fn map_color(r: f32, g: f32, b: f32) -> Rgb {
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// Inverted single-channel brightness: `floor(255 * (1 - clamp01(v)))`.
#[inline(always)]
pub fn map_gray(v: f32) -> u8 {
    (255.0 * (1.0 - clamp01(v))).floor() as u8
}

/// Per-cell color strategy selected by [`RenderMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorMapper {
    mode: RenderMode,
}

impl ColorMapper {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    #[inline]
    pub fn cell_color(&self, view: &BufferView<'_>, row: u32, col: u32) -> Rgb {
        match self.mode {
            RenderMode::FullColor => {
                let (r, g, b) = view.color(row, col);
                map_color(r, g, b)
            }
            RenderMode::Grayscale => Rgb::gray(map_gray(view.alpha(row, col))),
            RenderMode::BicolorCounter => match view.counter(row, col) {
                Some(n) if n != 1 => BICOLOR_TOUCHED,
                _ => BICOLOR_UNTOUCHED,
            },
        }
    }
}
