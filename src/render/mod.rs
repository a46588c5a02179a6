//! Rendering side of the game: the contract the tick loop drives, and the
//! terminal implementation of it.

pub mod renderer;

pub use renderer::TerminalRenderer;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::game::{Board, Event};

/// Something that can feed input events to the game and draw its board
#[async_trait]
pub trait Renderer: Send + Sync + 'static {
    /// Translate raw input into events until the player quits.
    ///
    /// Returns `Ok` on a clean quit and an error if the input source fails.
    async fn listen(&self, events: mpsc::Sender<Event>) -> Result<()>;

    /// Draw a board snapshot. Must not keep a reference to it.
    fn render(&self, board: &Board) -> Result<()>;
}
