//! Terminal rendering for simulation pictures.
//!
//! The pipeline is split into a pure part and an I/O part:
//!
//! - [`grid_view`]: [`GridRenderer`] maps every cell through the color mapper
//!   and paints it onto a [`DrawSurface`]
//! - [`surface`]: [`PixelSurface`], an in-memory RGB raster implementing the
//!   drawing contract
//! - [`renderer`]: [`TerminalRenderer`], which folds the raster into half-block
//!   terminal cells and flushes only what changed
//!
//! Goals:
//! - Keep the grid/pixel mapping deterministic and testable
//! - Never touch simulation memory beyond a borrowed read view
//! - Two pixels per terminal cell so square cells look square

pub mod grid_view;
pub mod renderer;
pub mod surface;

pub use fieldview_core as core;
pub use fieldview_types as types;

pub use grid_view::{GridGeometry, GridRenderer};
pub use renderer::{
    encode_diff_into, encode_full_into, HalfBlock, TermFrame, TerminalRenderer, Viewport,
};
pub use surface::{DrawSurface, PixelSurface};
