//! Platform layer: the single-threaded event loop
//!
//! One task owns the [`Game`] and serializes every mutation: input commands,
//! the fixed ticker and the slow-time expiry. Commands win ties against
//! timers so an input edge always lands before the next tick.
//!
//! The ticker only exists while the PLAYING screen is up. It is dropped the
//! moment the screen changes, so no tick can reach a finished or rebuilt
//! session.

use std::future::pending;
use std::pin::Pin;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior, Sleep};

use crate::sim::{Game, Screen, SlowTimeTimer, Snapshot};

/// Queue depth for input commands
const COMMAND_BUFFER: usize = 64;

/// Input and control messages for the loop
#[derive(Debug)]
pub enum Command {
    Login(String),
    Hold(bool),
    SlowTime,
    Shield,
    Restart,
    /// Reply with the snapshot after all earlier commands
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown,
}

/// The loop is gone; nothing more can be sent
#[derive(Debug, Error)]
#[error("game loop has shut down")]
pub struct LoopClosed;

/// Cheap, cloneable front door to a running [`GameLoop`]
#[derive(Debug, Clone)]
pub struct GameHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

impl GameHandle {
    pub async fn send(&self, command: Command) -> Result<(), LoopClosed> {
        self.commands.send(command).await.map_err(|_| LoopClosed)
    }

    pub async fn submit_login(&self, username: impl Into<String>) -> Result<(), LoopClosed> {
        self.send(Command::Login(username.into())).await
    }

    pub async fn set_hold(&self, active: bool) -> Result<(), LoopClosed> {
        self.send(Command::Hold(active)).await
    }

    pub async fn activate_slow_time(&self) -> Result<(), LoopClosed> {
        self.send(Command::SlowTime).await
    }

    pub async fn activate_shield(&self) -> Result<(), LoopClosed> {
        self.send(Command::Shield).await
    }

    pub async fn restart(&self) -> Result<(), LoopClosed> {
        self.send(Command::Restart).await
    }

    /// Snapshot reflecting every command sent before this call
    pub async fn snapshot(&self) -> Result<Snapshot, LoopClosed> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| LoopClosed)
    }

    /// Latest-value feed for renderers; updated after every state change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub async fn shutdown(&self) -> Result<(), LoopClosed> {
        self.send(Command::Shutdown).await
    }
}

/// Slow-time expiry waiting to fire
struct PendingExpiry {
    sleep: Pin<Box<Sleep>>,
    timer: SlowTimeTimer,
}

/// Event loop owning the game
pub struct GameLoop {
    game: Game,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Snapshot>,
    ticker: Option<Interval>,
    slow_time: Option<PendingExpiry>,
}

impl GameLoop {
    pub fn new(game: Game) -> (Self, GameHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(game.snapshot());

        let game_loop = Self {
            game,
            commands: command_rx,
            snapshots: snapshot_tx,
            ticker: None,
            slow_time: None,
        };
        let handle = GameHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (game_loop, handle)
    }

    /// Run until shutdown or until every handle is dropped. Returns the game
    /// so the host can inspect its final state.
    pub async fn run(mut self) -> Game {
        log::info!("Game loop started");

        loop {
            self.sync_ticker();

            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => {
                        if self.handle(command) {
                            self.publish();
                        }
                    }
                },

                timer = next_expiry(&mut self.slow_time) => {
                    self.slow_time = None;
                    if self.game.expire_slow_time(timer) {
                        self.publish();
                    }
                },

                _ = next_tick(&mut self.ticker) => {
                    let report = self.game.tick();
                    if !report.is_idle() {
                        self.publish();
                    }
                },
            }
        }

        self.ticker = None;
        self.slow_time = None;
        log::info!("Game loop stopped");
        self.game
    }

    /// Arm the ticker on the PLAYING screen, drop it everywhere else
    fn sync_ticker(&mut self) {
        let playing = self.game.screen() == Screen::Playing;
        match (&self.ticker, playing) {
            (None, true) => {
                let period = self.game.settings().tick_period();
                let mut ticker = time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.ticker = Some(ticker);
                log::debug!("Ticker started ({:?} period)", period);
            }
            (Some(_), false) => {
                self.ticker = None;
                log::debug!("Ticker stopped on {:?}", self.game.screen());
            }
            _ => {}
        }
    }

    /// Apply one command. Returns true if the game changed.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Login(username) => self.game.submit_login(&username),
            Command::Hold(active) => self.game.set_hold(active),
            Command::SlowTime => match self.game.activate_slow_time() {
                Some(timer) => {
                    self.slow_time = Some(PendingExpiry {
                        sleep: Box::pin(time::sleep(timer.duration)),
                        timer,
                    });
                    true
                }
                None => false,
            },
            Command::Shield => self.game.activate_shield(),
            Command::Restart => {
                let restarted = self.game.restart();
                if restarted {
                    // Expiry belongs to the old session
                    self.slow_time = None;
                }
                restarted
            }
            Command::Snapshot(reply) => {
                // Requester may have given up; nothing to do then
                let _ = reply.send(self.game.snapshot());
                false
            }
            Command::Shutdown => false,
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.game.snapshot());
    }
}

async fn next_expiry(pending_expiry: &mut Option<PendingExpiry>) -> SlowTimeTimer {
    match pending_expiry {
        Some(expiry) => {
            expiry.sleep.as_mut().await;
            expiry.timer
        }
        None => pending().await,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending().await,
    }
}
