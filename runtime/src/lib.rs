//! Render loop and input queue around the `hexcat-core` engine.
//!
//! Input arrives from any thread through an [`InputHandle`]; a single render
//! worker drains it once per tick, advances the game and presents the result
//! to a [`Surface`].

pub use board::*;
pub use config::*;
pub use error::*;
pub use queue::*;
pub use render_loop::*;
pub use surface::*;
pub use timers::*;

mod board;
mod config;
mod error;
mod queue;
mod render_loop;
mod surface;
mod timers;
