//! Field viewer (workspace facade crate).
//!
//! Renders a simulation-owned 2-D color field onto a pixel surface and, while
//! playing, advances the simulation one step per display refresh. The
//! implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `fieldview::{core,engine,input,term,types}` and adds the
//! embedding: configuration, logging, the [`Viewer`] and a demo collaborator.

pub use fieldview_core as core;
pub use fieldview_engine as engine;
pub use fieldview_input as input;
pub use fieldview_term as term;
pub use fieldview_types as types;

pub mod config;
pub mod demo;
pub mod logging;
pub mod viewer;

pub use config::ViewerConfig;
pub use demo::RippleField;
pub use logging::init_logging;
pub use viewer::Viewer;
