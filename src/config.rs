//! Viewer configuration, read from `FIELDVIEW_*` environment variables.

use anyhow::{anyhow, Result};

use fieldview_core::FieldError;
use fieldview_term::{GridGeometry, Viewport};
use fieldview_types::{RenderMode, CELL_SIZE, FRAME_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Grid columns; `None` fits the terminal.
    pub width: Option<u32>,
    /// Grid rows; `None` fits the terminal.
    pub height: Option<u32>,
    pub cell_size: u16,
    pub mode: RenderMode,
    pub gridlines: bool,
    /// Start `Playing` instead of rendering one static frame.
    pub autoplay: bool,
    pub frame_ms: u32,
    pub log_path: Option<String>,
    pub log_filter: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            cell_size: CELL_SIZE,
            mode: RenderMode::FullColor,
            gridlines: false,
            autoplay: false,
            frame_ms: FRAME_MS,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (environment-shaped).
    ///
    /// Unparseable numbers fall back to defaults; an unknown render mode is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        let mode = match lookup("FIELDVIEW_MODE") {
            Some(s) => RenderMode::from_str(&s)
                .ok_or_else(|| anyhow!("FIELDVIEW_MODE: unknown render mode: {}", s))?,
            None => defaults.mode,
        };

        let log_path = lookup("FIELDVIEW_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Ok(Self {
            width: number("FIELDVIEW_WIDTH").and_then(|n| u32::try_from(n).ok()),
            height: number("FIELDVIEW_HEIGHT").and_then(|n| u32::try_from(n).ok()),
            cell_size: number("FIELDVIEW_CELL_SIZE")
                .and_then(|n| u16::try_from(n).ok())
                .unwrap_or(defaults.cell_size),
            mode,
            gridlines: flag("FIELDVIEW_GRIDLINES"),
            autoplay: flag("FIELDVIEW_AUTOPLAY"),
            frame_ms: number("FIELDVIEW_FRAME_MS")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.frame_ms),
            log_path,
            log_filter: lookup("FIELDVIEW_LOG").unwrap_or(defaults.log_filter),
        })
    }

    pub fn geometry(&self) -> Result<GridGeometry> {
        Ok(GridGeometry::new(self.cell_size, self.gridlines)?)
    }

    /// Grid dimensions: configured values, or the largest grid whose surface
    /// fits `viewport` (two pixels per terminal row).
    ///
    /// Fails before anything is allocated when the grid is empty or its surface
    /// would not be addressable.
    pub fn grid_size(&self, viewport: Viewport) -> Result<(u32, u32)> {
        let geometry = self.geometry()?;
        let pitch = geometry.pitch();
        let (px_w, px_h) = viewport.pixel_size();
        let fit = |px: u32| (px.saturating_sub(1) / pitch).max(1);
        let width = self.width.unwrap_or_else(|| fit(px_w));
        let height = self.height.unwrap_or_else(|| fit(px_h));
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyGrid { width, height }.into());
        }
        geometry.surface_size(width, height)?;
        Ok((width, height))
    }
}
