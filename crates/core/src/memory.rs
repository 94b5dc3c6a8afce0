//! Owned shared-memory region in the layout the renderer reads.
//!
//! Simulations that do not manage their own memory can keep a `PictureMemory`
//! and hand out [`PictureMemory::bytes`] plus the offsets from
//! [`PictureMemory::handle`]. The region is laid out as
//! `alpha (4n) | color (12n) | counter (4n, optional)` for `n = width * height`.

use crate::buffer_view::BufferView;
use crate::error::{FieldError, Result};
use crate::picture::{cell_index, PictureHandle, ALPHA_STRIDE, COLOR_STRIDE, COUNTER_STRIDE};

#[derive(Debug, Clone)]
pub struct PictureMemory {
    handle: PictureHandle,
    bytes: Vec<u8>,
}

impl PictureMemory {
    /// Allocate a zeroed region for a `width x height` grid.
    pub fn new(width: u32, height: u32, with_counter: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyGrid { width, height });
        }
        let too_large = FieldError::GridTooLarge { width, height };
        let stride = ALPHA_STRIDE + COLOR_STRIDE + if with_counter { COUNTER_STRIDE } else { 0 };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|cells| cells.checked_mul(stride))
            .ok_or(too_large)?;
        let cells = (width as usize) * (height as usize);
        let alpha_offset = 0;
        let color_offset = cells * ALPHA_STRIDE;
        let counter_offset = color_offset + cells * COLOR_STRIDE;
        let bytes = vec![0u8; len];
        let handle = PictureHandle::new(
            width,
            height,
            alpha_offset,
            color_offset,
            with_counter.then_some(counter_offset),
            len,
        )?;
        Ok(Self { handle, bytes })
    }

    pub fn handle(&self) -> &PictureHandle {
        &self.handle
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn view(&self) -> Result<BufferView<'_>> {
        BufferView::new(&self.handle, &self.bytes)
    }

    fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.handle.height() && col < self.handle.width());
        cell_index(self.handle.width(), row, col)
    }

    pub fn set_alpha(&mut self, row: u32, col: u32, v: f32) {
        let at = self.handle.alpha_offset() + self.index(row, col) * ALPHA_STRIDE;
        write_f32(&mut self.bytes, at, v);
    }

    pub fn set_color(&mut self, row: u32, col: u32, (r, g, b): (f32, f32, f32)) {
        let at = self.handle.color_offset() + self.index(row, col) * COLOR_STRIDE;
        write_f32(&mut self.bytes, at, r);
        write_f32(&mut self.bytes, at + 4, g);
        write_f32(&mut self.bytes, at + 8, b);
    }

    /// No-op when the region has no counter array.
    pub fn set_counter(&mut self, row: u32, col: u32, n: u32) {
        if let Some(offset) = self.handle.counter_offset() {
            let at = offset + self.index(row, col) * COUNTER_STRIDE;
            self.bytes[at..at + 4].copy_from_slice(&n.to_ne_bytes());
        }
    }

    pub fn counter(&self, row: u32, col: u32) -> Option<u32> {
        self.handle.counter_offset().map(|offset| {
            let at = offset + self.index(row, col) * COUNTER_STRIDE;
            u32::from_ne_bytes([
                self.bytes[at],
                self.bytes[at + 1],
                self.bytes[at + 2],
                self.bytes[at + 3],
            ])
        })
    }

    pub fn fill_alpha(&mut self, v: f32) {
        for i in 0..self.handle.cell_count() {
            write_f32(&mut self.bytes, self.handle.alpha_offset() + i * ALPHA_STRIDE, v);
        }
    }

    pub fn fill_color(&mut self, (r, g, b): (f32, f32, f32)) {
        for i in 0..self.handle.cell_count() {
            let at = self.handle.color_offset() + i * COLOR_STRIDE;
            write_f32(&mut self.bytes, at, r);
            write_f32(&mut self.bytes, at + 4, g);
            write_f32(&mut self.bytes, at + 8, b);
        }
    }

    pub fn fill_counter(&mut self, n: u32) {
        if let Some(offset) = self.handle.counter_offset() {
            for i in 0..self.handle.cell_count() {
                let at = offset + i * COUNTER_STRIDE;
                self.bytes[at..at + 4].copy_from_slice(&n.to_ne_bytes());
            }
        }
    }
}

#[inline(always)]
fn write_f32(bytes: &mut [u8], at: usize, v: f32) {
    bytes[at..at + 4].copy_from_slice(&v.to_ne_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_places_arrays_back_to_back() {
        let mem = PictureMemory::new(4, 3, true).unwrap();
        let h = mem.handle();
        assert_eq!(h.alpha_offset(), 0);
        assert_eq!(h.color_offset(), 48);
        assert_eq!(h.counter_offset(), Some(48 + 144));
        assert_eq!(mem.bytes().len(), 48 + 144 + 48);
    }

    #[test]
    fn without_counter_region_ends_after_color() {
        let mem = PictureMemory::new(2, 2, false).unwrap();
        assert_eq!(mem.handle().counter_offset(), None);
        assert_eq!(mem.bytes().len(), 16 + 48);
    }

    #[test]
    fn fills_cover_every_cell() {
        let mut mem = PictureMemory::new(3, 2, true).unwrap();
        mem.fill_alpha(0.5);
        mem.fill_color((1.0, 1.0, 1.0));
        mem.fill_counter(1);
        let view = mem.view().unwrap();
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(view.alpha(row, col), 0.5);
                assert_eq!(view.color(row, col), (1.0, 1.0, 1.0));
                assert_eq!(view.counter(row, col), Some(1));
            }
        }
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(
            PictureMemory::new(0, 1, false),
            Err(FieldError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn rejects_grid_beyond_addressable_memory() {
        assert_eq!(
            PictureMemory::new(u32::MAX, u32::MAX, true).unwrap_err(),
            FieldError::GridTooLarge {
                width: u32::MAX,
                height: u32::MAX
            }
        );
    }
}
