//! Animation engine: refresh scheduling and the play/pause frame loop.
//!
//! - [`scheduler`]: [`FrameScheduler`] and the host-time driven [`FrameClock`]
//! - [`animation`]: [`AnimationController`], the `Paused`/`Playing` state machine
//!
//! Everything runs on the caller's thread. Within a frame the simulation tick
//! completes before rendering starts, and a frame completes before the next
//! one is scheduled.
//!
//! # Example
//!
//! ```
//! use fieldview_engine::{AnimationController, FrameClock, FrameScheduler};
//! use fieldview_types::AnimationState;
//!
//! let mut anim = AnimationController::new(FrameClock::new(16));
//! assert_eq!(anim.toggle(0), AnimationState::Playing);
//! assert_eq!(anim.scheduler().pending(), 1);
//! assert_eq!(anim.toggle(1), AnimationState::Paused);
//! assert_eq!(anim.scheduler().pending(), 0);
//! ```

pub mod animation;
pub mod scheduler;

pub use fieldview_core as core;
pub use fieldview_types as types;

pub use animation::AnimationController;
pub use scheduler::{FrameClock, FrameId, FrameScheduler};
