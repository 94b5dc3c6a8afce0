//! Built-in collaborator so the viewer can run without an external simulation.
//!
//! `RippleField` drifts three sine waves across the grid. Cells whose mean
//! brightness crosses a threshold bump their hit counter, which gives the
//! counter render mode something to show.

use anyhow::Result;

use fieldview_core::{PictureMemory, Simulation};

const PHASE_STEP: f32 = 0.08;
const HIT_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct RippleField {
    mem: PictureMemory,
    phase: f32,
    steps: u64,
}

impl RippleField {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            mem: PictureMemory::new(width, height, true)?,
            phase: 0.0,
            steps: 0,
        })
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn sample(&mut self) {
        let w = self.mem.handle().width();
        let h = self.mem.handle().height();
        let t = self.phase;
        for row in 0..h {
            let v = row as f32 / h as f32;
            for col in 0..w {
                let u = col as f32 / w as f32;
                let r = 0.5 + 0.5 * (6.0 * u + t).sin();
                let g = 0.5 + 0.5 * (6.0 * v - 1.3 * t).sin();
                let b = 0.5 + 0.5 * (4.0 * (u + v) + 0.7 * t).sin();
                let alpha = (r + g + b) / 3.0;
                self.mem.set_color(row, col, (r, g, b));
                self.mem.set_alpha(row, col, alpha);
                if alpha > HIT_THRESHOLD {
                    let n = self.mem.counter(row, col).unwrap_or(1);
                    self.mem.set_counter(row, col, n.saturating_add(1));
                }
            }
        }
    }
}

impl Simulation for RippleField {
    fn width(&self) -> u32 {
        self.mem.handle().width()
    }

    fn height(&self) -> u32 {
        self.mem.handle().height()
    }

    fn memory(&self) -> &[u8] {
        self.mem.bytes()
    }

    fn cell_alpha(&self) -> usize {
        self.mem.handle().alpha_offset()
    }

    fn cell_color(&self) -> usize {
        self.mem.handle().color_offset()
    }

    fn cell_counter(&self) -> Option<usize> {
        self.mem.handle().counter_offset()
    }

    fn paint(&mut self) -> Result<()> {
        self.phase = 0.0;
        self.mem.fill_counter(1);
        self.sample();
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        self.phase += PHASE_STEP;
        self.steps += 1;
        self.sample();
        Ok(())
    }
}
