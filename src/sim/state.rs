//! Session state and render snapshot
//!
//! A session exists from login until the app quits; restart rebuilds it in
//! place with the same username.

use serde::{Deserialize, Serialize};

use super::geometry::Layout;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    /// Waiting for a username, no session
    Login,
    /// Session live, ticks advance it
    Playing,
    /// Session frozen after an unshielded hit
    GameOver,
}

/// The single live game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Set at login, never changes afterward
    username: String,
    /// True while the dodge input is held
    pub hold_active: bool,
    /// Leading (left) edge of the obstacle
    pub obstacle_x: f32,
    pub score: u64,
    pub coins: u32,
    pub shield_active: bool,
    pub slow_time_active: bool,
    /// Terminal flag; only restart clears it
    pub game_over: bool,
}

impl Session {
    /// Fresh session with every field at its starting value
    pub fn new(username: String, layout: &Layout) -> Self {
        Self {
            username,
            hold_active: false,
            obstacle_x: layout.spawn_x(),
            score: 0,
            coins: 0,
            shield_active: false,
            slow_time_active: false,
            game_over: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Reinitialize in place, keeping the username
    pub fn reset(&mut self, layout: &Layout) {
        let username = std::mem::take(&mut self.username);
        *self = Self::new(username, layout);
    }

    pub fn screen(&self) -> Screen {
        if self.game_over {
            Screen::GameOver
        } else {
            Screen::Playing
        }
    }

    /// A tick changes something only when play is live and time is held
    pub fn is_advancing(&self) -> bool {
        self.hold_active && !self.game_over
    }
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub username: Option<String>,
    pub score: u64,
    pub coins: u32,
    pub obstacle_x: f32,
    pub shield_active: bool,
    pub slow_time_active: bool,
    pub hold_active: bool,
    pub game_over: bool,
    pub layout: Layout,
}

impl Snapshot {
    /// Login screen: no session to show
    pub fn login(layout: Layout) -> Self {
        Self {
            screen: Screen::Login,
            username: None,
            score: 0,
            coins: 0,
            obstacle_x: layout.spawn_x(),
            shield_active: false,
            slow_time_active: false,
            hold_active: false,
            game_over: false,
            layout,
        }
    }

    pub fn of(session: &Session, layout: Layout) -> Self {
        Self {
            screen: session.screen(),
            username: Some(session.username.clone()),
            score: session.score,
            coins: session.coins,
            obstacle_x: session.obstacle_x,
            shield_active: session.shield_active,
            slow_time_active: session.slow_time_active,
            hold_active: session.hold_active,
            game_over: session.game_over,
            layout,
        }
    }
}
