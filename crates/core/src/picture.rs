//! The simulation collaborator contract and the handle describing its memory.

use crate::error::{FieldError, Result};

/// Bytes per `f32` alpha value.
pub const ALPHA_STRIDE: usize = 4;
/// Bytes per RGB triple (three `f32`).
pub const COLOR_STRIDE: usize = 12;
/// Bytes per `u32` counter value.
pub const COUNTER_STRIDE: usize = 4;

/// An external simulation exposing a fixed-size picture in a shared memory region.
///
/// The renderer only ever reads [`Simulation::memory`]; the simulation mutates
/// it in place during [`Simulation::paint`] and [`Simulation::tick`]. Offsets
/// are byte offsets into that single region. Values are native-endian.
pub trait Simulation {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// The whole shared region the offsets point into.
    fn memory(&self) -> &[u8];

    /// Offset of `width * height` alpha values (`f32`).
    fn cell_alpha(&self) -> usize;

    /// Offset of `3 * width * height` color values (`f32` red, green, blue per cell).
    fn cell_color(&self) -> usize;

    /// Offset of `width * height` hit counters (`u32`), when the simulation keeps them.
    fn cell_counter(&self) -> Option<usize> {
        None
    }

    /// Initialize (or recompute) the picture once.
    fn paint(&mut self) -> anyhow::Result<()>;

    /// Advance the simulation by one step.
    fn tick(&mut self) -> anyhow::Result<()>;
}

/// Row-major cell index: `row * width + col`.
#[inline(always)]
pub fn cell_index(width: u32, row: u32, col: u32) -> usize {
    (row as usize) * (width as usize) + (col as usize)
}

/// Validated snapshot of a simulation's grid dimensions and buffer offsets.
///
/// Dimensions never change after creation; every [`crate::BufferView`] is
/// derived from the handle plus the current memory region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureHandle {
    width: u32,
    height: u32,
    alpha_offset: usize,
    color_offset: usize,
    counter_offset: Option<usize>,
}

impl PictureHandle {
    /// Build and validate a handle from raw parts.
    pub fn new(
        width: u32,
        height: u32,
        alpha_offset: usize,
        color_offset: usize,
        counter_offset: Option<usize>,
        region_len: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyGrid { width, height });
        }
        let handle = Self {
            width,
            height,
            alpha_offset,
            color_offset,
            counter_offset,
        };
        handle.check_region(region_len)?;
        Ok(handle)
    }

    /// Snapshot the handle a simulation currently exposes.
    pub fn from_simulation<S: Simulation + ?Sized>(sim: &S) -> Result<Self> {
        Self::new(
            sim.width(),
            sim.height(),
            sim.cell_alpha(),
            sim.cell_color(),
            sim.cell_counter(),
            sim.memory().len(),
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn alpha_offset(&self) -> usize {
        self.alpha_offset
    }

    pub fn color_offset(&self) -> usize {
        self.color_offset
    }

    pub fn counter_offset(&self) -> Option<usize> {
        self.counter_offset
    }

    pub fn has_counter(&self) -> bool {
        self.counter_offset.is_some()
    }

    /// Byte range of one array inside the region, checked against its length.
    pub(crate) fn array_range(
        &self,
        array: &'static str,
        offset: usize,
        stride: usize,
        region_len: usize,
    ) -> Result<std::ops::Range<usize>> {
        let needed = self.cell_count().saturating_mul(stride);
        let end = offset.checked_add(needed).filter(|&end| end <= region_len);
        match end {
            Some(end) => Ok(offset..end),
            None => Err(FieldError::RegionTooSmall {
                array,
                offset,
                needed,
                available: region_len,
            }),
        }
    }

    pub(crate) fn check_region(&self, region_len: usize) -> Result<()> {
        self.array_range("alpha", self.alpha_offset, ALPHA_STRIDE, region_len)?;
        self.array_range("color", self.color_offset, COLOR_STRIDE, region_len)?;
        if let Some(offset) = self.counter_offset {
            self.array_range("counter", offset, COUNTER_STRIDE, region_len)?;
        }
        Ok(())
    }
}
