//! Rendering utilities for diagnostics
//!
//! This module turns diagnostic fields into message text: the section-by-section
//! message renderer and the cursor block drawn under positional errors.

pub mod cursor;
pub mod renderer;

pub use cursor::render_cursor;
pub use renderer::{MessageRenderer, render_message};
