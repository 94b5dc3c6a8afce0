//! Terminal field viewer (default binary).
//!
//! Paints the demo field once and shows it statically. Space / `p` toggles
//! the animation, `m` cycles render modes, `g` toggles gridlines, `q` quits.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use fieldview::input::{handle_key_event, should_quit};
use fieldview::term::{TerminalRenderer, Viewport};
use fieldview::types::IDLE_POLL_MS;
use fieldview::{init_logging, RippleField, Viewer, ViewerConfig};

fn main() -> Result<()> {
    let config = ViewerConfig::from_env()?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %err, "viewer stopped");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &ViewerConfig) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(cols, rows);
    let (width, height) = config.grid_size(viewport)?;

    let start = Instant::now();
    let now_ms = || start.elapsed().as_millis() as u64;

    let mut viewer = Viewer::new(RippleField::new(width, height)?, config, now_ms())?;
    term.draw(viewer.surface(), viewport)?;

    loop {
        // Input with timeout until the next scheduled frame.
        let timeout = viewer
            .time_until_next_frame(now_ms())
            .unwrap_or_else(|| Duration::from_millis(IDLE_POLL_MS as u64));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(frames = viewer.frames(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if viewer.apply(action, now_ms())? {
                            term.draw(viewer.surface(), viewport)?;
                        }
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    term.draw(viewer.surface(), viewport)?;
                }
                _ => {}
            }
        }

        // Frame.
        if viewer.pump(now_ms())? {
            term.draw(viewer.surface(), viewport)?;
        }
    }
}
