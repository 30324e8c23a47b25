//! TimeTap - a hold-to-move-time reflex game
//!
//! Time only flows for the obstacle while the player holds input. Release
//! and the world freezes; hold and it rushes toward the avatar.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state, motion, collisions, skills)
//! - `platform`: tokio event loop driving ticks, timers and input commands
//! - `settings`: Data-driven tuning and layout

pub mod platform;
pub mod settings;
pub mod sim;

pub use platform::{Command, GameHandle, GameLoop, LoopClosed};
pub use settings::{ConfigError, Settings};
pub use sim::{Game, Screen, Snapshot};

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Fixed tick period in milliseconds (~60 Hz)
    pub const TICK_PERIOD_MS: u64 = 16;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Avatar is a square fixed at the screen center
    pub const AVATAR_SIZE: f32 = 40.0;

    /// Obstacle is a tall bar scrolling right to left
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 140.0;
    /// How far above the avatar's top edge the obstacle's top edge sits
    pub const OBSTACLE_RISE: f32 = 50.0;

    /// Obstacle displacement per tick (distance units)
    pub const BASE_SPEED: f32 = 4.0;
    pub const SLOW_SPEED: f32 = 2.0;

    /// Recycle spacing is drawn uniformly from [0, RECYCLE_JITTER)
    pub const RECYCLE_JITTER: f32 = 200.0;
    /// Distance past the right edge where a shield hit throws the obstacle
    pub const SHIELD_KNOCKBACK: f32 = 200.0;

    /// Slow-time lasts this long in wall-clock time
    pub const SLOW_TIME_MS: u64 = 3000;

    /// One coin per this many active ticks
    pub const COIN_INTERVAL: u64 = 60;
    /// Price of a shield
    pub const SHIELD_COST: u32 = 1;
}
