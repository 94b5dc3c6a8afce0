//! Viewer: one simulation, one grid renderer, one pixel surface, one animation loop.
//!
//! This is the embedding the binary drives. It is free of terminal I/O so the
//! whole paint / toggle / frame cycle can be tested headless.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use fieldview_core::{BufferView, FieldError, PictureHandle, Simulation};
use fieldview_engine::{AnimationController, FrameClock};
use fieldview_term::{GridRenderer, PixelSurface};
use fieldview_types::{AnimationState, ControlAction, RenderMode, GRIDLINE_COLOR};

use crate::config::ViewerConfig;

pub struct Viewer<Sim: Simulation> {
    sim: Sim,
    handle: PictureHandle,
    grid: GridRenderer,
    surface: PixelSurface,
    anim: AnimationController<FrameClock>,
}

impl<Sim: Simulation> Viewer<Sim> {
    /// Validate the picture, size the surface, `paint()` once and render the
    /// first static frame. With `autoplay` the loop starts `Playing`.
    pub fn new(mut sim: Sim, config: &ViewerConfig, now_ms: u64) -> Result<Self> {
        let handle = PictureHandle::from_simulation(&sim)?;
        if config.mode.needs_counter() && !handle.has_counter() {
            return Err(FieldError::MissingCounter(config.mode.as_str()).into());
        }
        let geometry = config.geometry()?;
        let surface = PixelSurface::for_grid(handle.width(), handle.height(), &geometry)?;

        sim.paint().context("simulation paint failed")?;

        let mut viewer = Self {
            sim,
            handle,
            grid: GridRenderer::new(geometry, config.mode),
            surface,
            anim: AnimationController::new(FrameClock::new(config.frame_ms)),
        };
        viewer.render()?;
        info!(
            width = handle.width(),
            height = handle.height(),
            mode = %config.mode,
            gridlines = geometry.gridlines(),
            "viewer ready"
        );

        if config.autoplay {
            viewer.anim.play(now_ms);
        }
        Ok(viewer)
    }

    pub fn simulation(&self) -> &Sim {
        &self.sim
    }

    pub fn handle(&self) -> &PictureHandle {
        &self.handle
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn mode(&self) -> RenderMode {
        self.grid.mode()
    }

    pub fn state(&self) -> AnimationState {
        self.anim.state()
    }

    pub fn frames(&self) -> u64 {
        self.anim.frames()
    }

    pub fn time_until_next_frame(&self, now_ms: u64) -> Option<Duration> {
        self.anim.time_until_next_frame(now_ms)
    }

    /// Repaint the surface from the current buffers without advancing.
    pub fn render(&mut self) -> Result<()> {
        paint_surface(&self.grid, &self.handle, &mut self.surface, &self.sim)
    }

    /// Run the scheduled frame if it is due. Returns true when the surface changed.
    pub fn pump(&mut self, now_ms: u64) -> Result<bool> {
        let grid = &self.grid;
        let handle = &self.handle;
        let surface = &mut self.surface;
        self.anim
            .pump(now_ms, &mut self.sim, |sim| paint_surface(grid, handle, surface, sim))
            .inspect_err(|err| warn!(error = %err, "animation halted"))
    }

    /// Apply one input action. Returns true when the surface changed.
    pub fn apply(&mut self, action: ControlAction, now_ms: u64) -> Result<bool> {
        match action {
            ControlAction::TogglePlay => {
                let state = self.anim.toggle(now_ms);
                debug!(?state, "toggled");
                Ok(false)
            }
            ControlAction::CycleMode => {
                let mode = self.grid.cycle_mode(self.handle.has_counter());
                debug!(%mode, "render mode");
                self.render()?;
                Ok(true)
            }
            ControlAction::ToggleGridlines => {
                self.grid.toggle_gridlines();
                let (width, height) = (self.handle.width(), self.handle.height());
                if let Err(err) = self.surface.fit_grid(width, height, self.grid.geometry()) {
                    warn!(error = %err, "gridlines unavailable for this grid");
                    self.grid.toggle_gridlines();
                    return Ok(false);
                }
                debug!(
                    gridlines = self.grid.geometry().gridlines(),
                    color = %GRIDLINE_COLOR,
                    "gridlines"
                );
                self.render()?;
                Ok(true)
            }
        }
    }
}

fn paint_surface<Sim: Simulation + ?Sized>(
    grid: &GridRenderer,
    handle: &PictureHandle,
    surface: &mut PixelSurface,
    sim: &Sim,
) -> Result<()> {
    debug_assert_eq!((sim.width(), sim.height()), (handle.width(), handle.height()));
    let view = BufferView::new(handle, sim.memory())?;
    grid.render(surface, &view);
    Ok(())
}
