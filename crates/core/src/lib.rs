//! Buffer and color core for the field viewer - pure and I/O free.
//!
//! This crate owns the contract between an external simulation and the
//! renderer:
//!
//! - [`picture`]: the [`Simulation`] collaborator trait and the validated [`PictureHandle`]
//! - [`buffer_view`]: [`BufferView`], a zero-copy typed read view over the shared region
//! - [`color`]: [`map_color`], [`map_gray`] and the mode-driven [`ColorMapper`]
//! - [`memory`]: [`PictureMemory`], an owned region in the layout the view expects
//! - [`error`]: configuration errors ([`FieldError`])
//!
//! The renderer never writes to simulation memory. Views borrow the region, so
//! a view can only exist between simulation steps, never across one.
//!
//! # Example
//!
//! ```
//! use fieldview_core::{ColorMapper, PictureMemory};
//! use fieldview_types::{RenderMode, Rgb};
//!
//! let mut mem = PictureMemory::new(2, 1, false).unwrap();
//! mem.set_color(0, 0, (1.0, 0.0, 0.0));
//! mem.set_color(0, 1, (0.0, 1.0, 0.0));
//!
//! let view = mem.view().unwrap();
//! let mapper = ColorMapper::new(RenderMode::FullColor);
//! assert_eq!(mapper.cell_color(&view, 0, 0), Rgb::new(255, 0, 0));
//! assert_eq!(mapper.cell_color(&view, 0, 1), Rgb::new(0, 255, 0));
//! ```

pub mod buffer_view;
pub mod color;
pub mod error;
pub mod memory;
pub mod picture;

pub use fieldview_types as types;

pub use buffer_view::BufferView;
pub use color::{clamp01, map_color, map_gray, ColorMapper};
pub use error::{FieldError, Result};
pub use memory::PictureMemory;
pub use picture::{cell_index, PictureHandle, Simulation};
