//! Shared types and constants for the field viewer.
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions can be used by the buffer/color core, the terminal renderer, the
//! input mapping and the animation engine.
//!
//! # Display Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CELL_SIZE` | 1 | Pixels per grid cell edge |
//! | `FRAME_MS` | 16 | Refresh interval while playing (~60 Hz) |
//! | `IDLE_POLL_MS` | 250 | Input poll timeout while paused |
//!
//! The display surface is always one pixel larger than the grid in each
//! dimension: cells start at `(1, 1)` and the top row / left column stay as a
//! border.
//!
//! # Examples
//!
//! ```
//! use fieldview_types::{AnimationState, RenderMode, Rgb};
//!
//! let mode = RenderMode::from_str("gray").unwrap();
//! assert_eq!(mode, RenderMode::Grayscale);
//! assert_eq!(mode.next(), RenderMode::BicolorCounter);
//!
//! assert!(!AnimationState::default().is_playing());
//!
//! assert_eq!(Rgb::new(255, 0, 16).to_string(), "#ff0010");
//! ```

use std::fmt;

/// Pixels per grid cell edge.
pub const CELL_SIZE: u16 = 1;

/// Refresh interval while playing (16ms ≈ 60 Hz display refresh).
pub const FRAME_MS: u32 = 16;

/// How long the runner waits for input when no frame is scheduled.
pub const IDLE_POLL_MS: u32 = 250;

/// Bicolor counter mode: cell never hit past its initial count.
pub const BICOLOR_UNTOUCHED: Rgb = Rgb::new(0x33, 0x33, 0x33);

/// Bicolor counter mode: cell hit at least once.
pub const BICOLOR_TOUCHED: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

/// Separator color used when gridlines are enabled.
pub const GRIDLINE_COLOR: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

/// Color of the one-pixel border the grid is offset by.
pub const BORDER_COLOR: Rgb = Rgb::new(0, 0, 0);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// Hex notation, e.g. `#ff0000`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Strategy used to turn one cell's buffers into a display color.
///
/// - **FullColor**: the per-cell RGB triple, clamped and scaled to 8 bits
/// - **Grayscale**: the per-cell alpha, inverted (higher alpha is darker)
/// - **BicolorCounter**: dark for cells whose hit counter is still 1, light otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    #[default]
    FullColor,
    Grayscale,
    BicolorCounter,
}

impl RenderMode {
    /// Parse a render mode (case-insensitive).
    ///
    /// ```
    /// use fieldview_types::RenderMode;
    ///
    /// assert_eq!(RenderMode::from_str("fullColor"), Some(RenderMode::FullColor));
    /// assert_eq!(RenderMode::from_str("COUNTER"), Some(RenderMode::BicolorCounter));
    /// assert_eq!(RenderMode::from_str("sepia"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "color" | "fullcolor" | "full_color" => Some(RenderMode::FullColor),
            "gray" | "grey" | "grayscale" => Some(RenderMode::Grayscale),
            "counter" | "bicolor" | "bicolorcounter" | "bicolor_counter" => {
                Some(RenderMode::BicolorCounter)
            }
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::FullColor => "fullColor",
            RenderMode::Grayscale => "grayscale",
            RenderMode::BicolorCounter => "bicolorCounter",
        }
    }

    /// Next mode in cycling order.
    pub fn next(self) -> Self {
        match self {
            RenderMode::FullColor => RenderMode::Grayscale,
            RenderMode::Grayscale => RenderMode::BicolorCounter,
            RenderMode::BicolorCounter => RenderMode::FullColor,
        }
    }

    /// Whether this mode reads the discrete counter array.
    pub fn needs_counter(self) -> bool {
        matches!(self, RenderMode::BicolorCounter)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Play/pause state of the animation loop.
///
/// `Playing` holds exactly when a refresh is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Paused,
    Playing,
}

impl AnimationState {
    pub fn is_playing(self) -> bool {
        matches!(self, AnimationState::Playing)
    }
}

/// Discrete input events understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Flip between `Paused` and `Playing`.
    TogglePlay,
    /// Switch to the next render mode.
    CycleMode,
    /// Enable or disable the gridline separators.
    ToggleGridlines,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_defaults() {
        assert_eq!(CELL_SIZE, 1);
        assert_eq!(FRAME_MS, 16);
        assert_eq!(RenderMode::default(), RenderMode::FullColor);
        assert_eq!(AnimationState::default(), AnimationState::Paused);
    }

    #[test]
    fn mode_cycle_visits_every_mode() {
        let mut mode = RenderMode::FullColor;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(mode, RenderMode::FullColor);
        assert_eq!(
            seen,
            vec![
                RenderMode::FullColor,
                RenderMode::Grayscale,
                RenderMode::BicolorCounter
            ]
        );
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in [
            RenderMode::FullColor,
            RenderMode::Grayscale,
            RenderMode::BicolorCounter,
        ] {
            assert_eq!(RenderMode::from_str(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn only_counter_mode_needs_counter() {
        assert!(!RenderMode::FullColor.needs_counter());
        assert!(!RenderMode::Grayscale.needs_counter());
        assert!(RenderMode::BicolorCounter.needs_counter());
    }

    #[test]
    fn color_strings() {
        assert_eq!(Rgb::new(255, 0, 0).to_string(), "#ff0000");
        assert_eq!(BICOLOR_UNTOUCHED.to_string(), "#333333");
        assert_eq!(format!("{}", BICOLOR_TOUCHED), "#cccccc");
    }
}
