//! The running game: a tick loop that moves, paints and renders, and an
//! event router that applies input under the shared lock.

use anyhow::{Context, Result, anyhow, bail};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Notify, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{
    action::Event,
    board::Board,
    config::{GameConfig, MIN_HEIGHT, MIN_WIDTH, Speed},
    engine::{Advance, GameEngine, Transition},
    error::GameError,
};
use crate::render::Renderer;

/// Shown on the board when the snake has filled every cell
pub const BOARD_FILLED_MESSAGE: &str = "board filled, you win";

type SharedEngine = Arc<Mutex<GameEngine>>;

/// A game wired to a renderer, ready to run
pub struct Game<R> {
    ui: Arc<R>,
    engine: SharedEngine,
    speed: Speed,
}

impl<R: Renderer> Game<R> {
    pub fn new(config: GameConfig, ui: R) -> Result<Self> {
        validate(&config)?;
        Ok(Self::from_engine(GameEngine::new(config), ui))
    }

    /// Same as [`Game::new`], with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64, ui: R) -> Result<Self> {
        validate(&config)?;
        Ok(Self::from_engine(GameEngine::with_seed(config, seed), ui))
    }

    pub fn from_engine(engine: GameEngine, ui: R) -> Self {
        let speed = engine.config().speed;
        Self {
            ui: Arc::new(ui),
            engine: Arc::new(Mutex::new(engine)),
            speed,
        }
    }

    /// Handle to the shared engine
    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    /// Run until the player quits (`Ok`) or input/rendering fails (`Err`)
    pub async fn run(self) -> Result<()> {
        let (events_tx, events_rx) = mpsc::channel(1);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (failure_tx, failure_rx) = mpsc::channel(1);
        let hold = Arc::new(Notify::new());

        let listener = spawn_listener(Arc::clone(&self.ui), events_tx.clone(), failure_tx);
        let router = tokio::spawn(route_events(
            Arc::clone(&self.engine),
            events_rx,
            Arc::clone(&hold),
            cancel_tx,
        ));

        info!(speed = %self.speed, "game started");

        let mut ticker = TickLoop {
            ui: self.ui,
            engine: self.engine,
            speed: self.speed,
            events: events_tx,
            hold,
            cancelled: cancel_rx,
            failures: failure_rx,
        };
        let result = ticker.run().await;

        listener.abort();
        router.abort();

        result
    }
}

fn validate(config: &GameConfig) -> Result<()> {
    if config.width < MIN_WIDTH || config.height < MIN_HEIGHT {
        bail!(
            "board {}x{} is smaller than the minimum {}x{}",
            config.width,
            config.height,
            MIN_WIDTH,
            MIN_HEIGHT
        );
    }
    Ok(())
}

fn lock(engine: &Mutex<GameEngine>) -> Result<MutexGuard<'_, GameEngine>> {
    engine
        .lock()
        .map_err(|_| anyhow!("game state lock poisoned"))
}

fn spawn_listener<R: Renderer>(
    ui: Arc<R>,
    events: mpsc::Sender<Event>,
    failures: mpsc::Sender<anyhow::Error>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match ui.listen(events).await {
            Ok(()) => debug!("input listener finished"),
            Err(err) => {
                if let Err(unsent) = failures.send(err).await {
                    debug!(err = %unsent.0, "tick loop gone, listener failure dropped");
                }
            }
        }
    })
}

/// Apply events one at a time under the shared lock
async fn route_events(
    engine: SharedEngine,
    mut events: mpsc::Receiver<Event>,
    hold: Arc<Notify>,
    cancel: watch::Sender<bool>,
) {
    let mut cancelled = cancel.subscribe();

    loop {
        let event = tokio::select! {
            _ = cancelled.changed() => break,
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        let transition = match engine.lock() {
            Ok(mut engine) => engine.apply(event),
            Err(_) => {
                error!("game state lock poisoned, router stopping");
                break;
            }
        };

        match transition {
            Transition::Quit => {
                info!("quit requested");
                cancel.send_replace(true);
                hold.notify_one();
            }
            Transition::Resume => {
                debug!(?event, "resuming");
                hold.notify_one();
            }
            Transition::Paused => debug!("paused"),
            Transition::Turned | Transition::Ignored => {}
        }
    }

    events.close();
}

/// What one step produced, with the snapshot to draw
enum Tick {
    Moved(Result<Board>),
    Stopped(Result<Board, GameError>),
}

struct TickLoop<R> {
    ui: Arc<R>,
    engine: SharedEngine,
    speed: Speed,
    events: mpsc::Sender<Event>,
    hold: Arc<Notify>,
    cancelled: watch::Receiver<bool>,
    failures: mpsc::Receiver<anyhow::Error>,
}

impl<R: Renderer> TickLoop<R> {
    async fn run(&mut self) -> Result<()> {
        let board = {
            let mut engine = lock(&self.engine)?;
            engine.paint().context("failed to paint initial board")?;
            engine.board().clone()
        };
        self.ui
            .render(&board)
            .context("failed to render initial board")?;

        loop {
            if self.is_cancelled() {
                info!("game stopped");
                return Ok(());
            }

            if let Ok(err) = self.failures.try_recv() {
                error!(%err, "input listener failed");
                return Err(err.context("input listener failed"));
            }

            let paused = lock(&self.engine)?.is_paused();
            if paused {
                if let Err(err) = self.show_paused() {
                    warn!(%err, "could not draw paused board");
                    self.requeue_pause().await;
                    self.sleep().await;
                    continue;
                }
                self.wait_for_release().await?;
                continue;
            }

            match self.step()? {
                Tick::Moved(board) => {
                    self.ui.render(&board?).context("failed to render board")?;
                    self.sleep().await;
                }
                Tick::Stopped(snapshot) => {
                    let drawn = snapshot
                        .map_err(anyhow::Error::from)
                        .and_then(|board| self.ui.render(&board));
                    if let Err(err) = drawn {
                        warn!(%err, "could not draw stopped board");
                    }
                    self.requeue_pause().await;
                }
            }
        }
    }

    /// Advance the snake and paint the result under one lock.
    /// A snake that cannot move is paused with a message on the board.
    fn step(&self) -> Result<Tick> {
        let mut engine = lock(&self.engine)?;

        let message = match engine.advance() {
            Ok(Advance::Moved | Advance::Ate) => None,
            Ok(Advance::BoardFilled) => Some(BOARD_FILLED_MESSAGE.to_string()),
            Err(err) => Some(err.to_string()),
        };

        let tick = match message {
            None => {
                engine.set_board_paused(false);
                let board = engine
                    .paint()
                    .map(|()| engine.board().clone())
                    .context("failed to paint board");
                Tick::Moved(board)
            }
            Some(message) => {
                info!(%message, "snake stopped");
                engine.set_error_message(message);
                engine.apply(Event::Pause);
                Tick::Stopped(engine.paint().map(|()| engine.board().clone()))
            }
        };
        Ok(tick)
    }

    fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow() || self.cancelled.has_changed().is_err()
    }

    fn show_paused(&self) -> Result<()> {
        let board = {
            let mut engine = lock(&self.engine)?;
            engine.set_board_paused(true);
            engine.paint()?;
            engine.board().clone()
        };
        self.ui.render(&board)
    }

    /// Block until Start, Restart or Quit releases the loop.
    /// A stale release that arrives while still paused is skipped.
    async fn wait_for_release(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                _ = self.hold.notified() => {
                    if !lock(&self.engine)?.is_paused() {
                        return Ok(());
                    }
                }
                _ = self.cancelled.changed() => return Ok(()),
                Some(err) = self.failures.recv() => {
                    error!(%err, "input listener failed");
                    return Err(err.context("input listener failed"));
                }
            }
        }
    }

    async fn requeue_pause(&self) {
        if self.events.send(Event::Pause).await.is_err() {
            debug!("event queue closed, pause dropped");
        }
    }

    async fn sleep(&mut self) {
        tokio::select! {
            _ = tokio::time::sleep(self.speed.tick_interval()) => {}
            _ = self.cancelled.changed() => {}
        }
    }
}
