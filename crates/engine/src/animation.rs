//! Play/pause animation loop.
//!
//! `Playing` holds exactly when a refresh request is pending. Each due refresh
//! runs one frame, `tick()` then render, and only then requests the next
//! refresh. Pausing cancels the pending request; a frame already running
//! always completes.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use fieldview_core::Simulation;
use fieldview_types::AnimationState;

use crate::scheduler::{FrameClock, FrameId, FrameScheduler};

#[derive(Debug, Clone)]
pub struct AnimationController<S: FrameScheduler = FrameClock> {
    scheduler: S,
    pending: Option<FrameId>,
    frames: u64,
}

impl<S: FrameScheduler> AnimationController<S> {
    /// Starts `Paused`.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> AnimationState {
        if self.pending.is_some() {
            AnimationState::Playing
        } else {
            AnimationState::Paused
        }
    }

    pub fn is_paused(&self) -> bool {
        !self.state().is_playing()
    }

    /// Completed frames since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// `Paused -> Playing`. Returns false if already playing.
    pub fn play(&mut self, now_ms: u64) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let id = self.scheduler.request_frame(now_ms);
        self.pending = Some(id);
        debug!(frame = id.get(), "animation playing");
        true
    }

    /// `Playing -> Paused`. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        let Some(id) = self.pending.take() else {
            return false;
        };
        self.scheduler.cancel(id);
        debug!(frames = self.frames, "animation paused");
        true
    }

    /// Flip the state; this is what the toggle input event drives.
    pub fn toggle(&mut self, now_ms: u64) -> AnimationState {
        if self.pending.is_some() {
            self.pause();
        } else {
            self.play(now_ms);
        }
        self.state()
    }

    /// How long the host may wait before the pending refresh is due.
    pub fn time_until_next_frame(&self, now_ms: u64) -> Option<Duration> {
        self.pending?;
        self.scheduler
            .next_due_ms()
            .map(|due| Duration::from_millis(due.saturating_sub(now_ms)))
    }

    /// The pending refresh, if it is due at `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> Option<FrameId> {
        self.pending?;
        self.scheduler
            .take_due(now_ms)
            .filter(|&id| self.pending == Some(id))
    }

    /// Run the frame for refresh `id`: tick, render, schedule the next refresh.
    ///
    /// Returns `Ok(false)` for a refresh that is no longer pending (cancelled
    /// by a pause). If tick or render fails the error is returned and nothing
    /// is rescheduled, leaving the controller `Paused`.
    pub fn run_frame<Sim, F>(
        &mut self,
        id: FrameId,
        now_ms: u64,
        sim: &mut Sim,
        render: F,
    ) -> Result<bool>
    where
        Sim: Simulation + ?Sized,
        F: FnOnce(&Sim) -> Result<()>,
    {
        if self.pending != Some(id) {
            return Ok(false);
        }
        self.pending = None;

        sim.tick()
            .with_context(|| format!("simulation tick failed on frame {}", self.frames + 1))?;
        render(&*sim).with_context(|| format!("render failed on frame {}", self.frames + 1))?;
        self.frames += 1;
        trace!(frame = self.frames, "frame complete");

        self.pending = Some(self.scheduler.request_frame(now_ms));
        Ok(true)
    }

    /// `take_due` + `run_frame` in one call.
    pub fn pump<Sim, F>(&mut self, now_ms: u64, sim: &mut Sim, render: F) -> Result<bool>
    where
        Sim: Simulation + ?Sized,
        F: FnOnce(&Sim) -> Result<()>,
    {
        match self.take_due(now_ms) {
            Some(id) => self.run_frame(id, now_ms, sim, render),
            None => Ok(false),
        }
    }
}
