//! Zero-copy read projection over a picture's shared memory region.

use crate::error::Result;
use crate::picture::{cell_index, PictureHandle, ALPHA_STRIDE, COLOR_STRIDE, COUNTER_STRIDE};

/// Typed reads over the alpha, color and (optional) counter arrays.
///
/// The view borrows the region, so every read reflects the simulation's latest
/// in-place write and nothing can mutate the buffers while a view is alive.
/// Indices must lie in `[0, height) x [0, width)`; callers derive their loop
/// bounds from [`BufferView::width`] / [`BufferView::height`].
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    width: u32,
    height: u32,
    alpha: &'a [u8],
    color: &'a [u8],
    counter: Option<&'a [u8]>,
}

impl<'a> BufferView<'a> {
    /// Project `region` through `handle`.
    ///
    /// Fails when the region no longer holds the arrays the handle describes.
    pub fn new(handle: &PictureHandle, region: &'a [u8]) -> Result<Self> {
        let len = region.len();
        let alpha = handle.array_range("alpha", handle.alpha_offset(), ALPHA_STRIDE, len)?;
        let color = handle.array_range("color", handle.color_offset(), COLOR_STRIDE, len)?;
        let counter = match handle.counter_offset() {
            Some(offset) => {
                let range = handle.array_range("counter", offset, COUNTER_STRIDE, len)?;
                Some(&region[range])
            }
            None => None,
        };
        Ok(Self {
            width: handle.width(),
            height: handle.height(),
            alpha: &region[alpha],
            color: &region[color],
            counter,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_counter(&self) -> bool {
        self.counter.is_some()
    }

    #[inline(always)]
    fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.height && col < self.width, "cell ({row}, {col}) out of range");
        cell_index(self.width, row, col)
    }

    #[inline(always)]
    pub fn alpha(&self, row: u32, col: u32) -> f32 {
        read_f32(self.alpha, self.index(row, col) * ALPHA_STRIDE)
    }

    #[inline(always)]
    pub fn color(&self, row: u32, col: u32) -> (f32, f32, f32) {
        let base = self.index(row, col) * COLOR_STRIDE;
        (
            read_f32(self.color, base),
            read_f32(self.color, base + 4),
            read_f32(self.color, base + 8),
        )
    }

    #[inline(always)]
    pub fn counter(&self, row: u32, col: u32) -> Option<u32> {
        let idx = self.index(row, col);
        self.counter
            .map(|bytes| read_u32(bytes, idx * COUNTER_STRIDE))
    }
}

#[inline(always)]
fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_ne_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline(always)]
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_ne_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
