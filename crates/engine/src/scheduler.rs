//! Refresh scheduling driven by host time.
//!
//! The host owns the clock: it passes the current time in milliseconds and
//! asks which request, if any, is due. That keeps scheduling deterministic and
//! lets tests step time by hand.

/// Handle for one requested refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// "Call me on the next display refresh", with cancellation.
pub trait FrameScheduler {
    /// Schedule a refresh after `now_ms`. Replaces any request still pending.
    fn request_frame(&mut self, now_ms: u64) -> FrameId;

    /// Cancel a pending request. Returns false when `id` is not pending.
    fn cancel(&mut self, id: FrameId) -> bool;

    /// Remove and return the pending request if it is due at `now_ms`.
    fn take_due(&mut self, now_ms: u64) -> Option<FrameId>;

    /// When the pending request fires, if any.
    fn next_due_ms(&self) -> Option<u64>;

    /// Number of pending requests (0 or 1).
    fn pending(&self) -> usize;
}

/// Single-slot scheduler firing a fixed interval after each request.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: u64,
    next_id: u64,
    slot: Option<(FrameId, u64)>,
}

impl FrameClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as u64,
            next_id: 0,
            slot: None,
        }
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self, now_ms: u64) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.slot = Some((id, now_ms.saturating_add(self.interval_ms)));
        id
    }

    fn cancel(&mut self, id: FrameId) -> bool {
        match self.slot {
            Some((pending, _)) if pending == id => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }

    fn take_due(&mut self, now_ms: u64) -> Option<FrameId> {
        match self.slot {
            Some((id, due)) if now_ms >= due => {
                self.slot = None;
                Some(id)
            }
            _ => None,
        }
    }

    fn next_due_ms(&self) -> Option<u64> {
        self.slot.map(|(_, due)| due)
    }

    fn pending(&self) -> usize {
        usize::from(self.slot.is_some())
    }
}
