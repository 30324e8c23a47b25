//! Game state machine
//!
//! LOGIN -> PLAYING -> GAME_OVER -> (restart) -> PLAYING. Requests that make
//! no sense on the current screen are ignored, never errors; the `bool`
//! returns only say whether anything happened.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::Layout;
use super::skills::{self, Activation, Rejection, SkillKind};
use super::state::{Screen, Session, Snapshot};
use super::tick::{self, TickReport};
use crate::settings::{ConfigError, Settings};

/// A pending slow-time expiry, tagged with the session it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowTimeTimer {
    pub generation: u64,
    pub duration: Duration,
}

/// Owns the one live session and everything needed to advance it
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    layout: Layout,
    rng: Pcg32,
    session: Option<Session>,
    /// Bumped every time a session is (re)initialized
    generation: u64,
}

impl Game {
    /// Build a game on the LOGIN screen. Settings the simulation cannot
    /// honor are rejected here, whichever way they were produced.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::debug!("Game seeded with {}", seed);
        Ok(Self {
            layout: settings.layout(),
            settings,
            rng: Pcg32::seed_from_u64(seed),
            session: None,
            generation: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn screen(&self) -> Screen {
        self.session.as_ref().map_or(Screen::Login, Session::screen)
    }

    pub fn snapshot(&self) -> Snapshot {
        match &self.session {
            Some(session) => Snapshot::of(session, self.layout),
            None => Snapshot::login(self.layout),
        }
    }

    /// Session, only while on the PLAYING screen
    fn playing_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut().filter(|s| !s.game_over)
    }

    /// LOGIN -> PLAYING. Empty usernames are ignored.
    pub fn submit_login(&mut self, username: &str) -> bool {
        if self.session.is_some() {
            log::trace!("Login ignored: session already running");
            return false;
        }
        if username.is_empty() {
            log::trace!("Login ignored: empty username");
            return false;
        }

        self.generation += 1;
        self.session = Some(Session::new(username.to_owned(), &self.layout));
        log::info!("{} logged in, session {}", username, self.generation);
        true
    }

    /// Hold input edge. Returns true if the value changed.
    pub fn set_hold(&mut self, active: bool) -> bool {
        match self.playing_mut() {
            Some(session) if session.hold_active != active => {
                session.hold_active = active;
                true
            }
            _ => false,
        }
    }

    /// Activate slow-time. On success the caller must schedule the returned
    /// timer and hand it back to [`Game::expire_slow_time`] when it fires.
    pub fn activate_slow_time(&mut self) -> Option<SlowTimeTimer> {
        match self.activate(SkillKind::SlowTime) {
            Ok(Activation::Expires(duration)) => Some(SlowTimeTimer {
                generation: self.generation,
                duration,
            }),
            _ => None,
        }
    }

    pub fn activate_shield(&mut self) -> bool {
        self.activate(SkillKind::Shield).is_ok()
    }

    fn activate(&mut self, kind: SkillKind) -> Result<Activation, Rejection> {
        let result = match self.session.as_mut() {
            Some(session) => skills::activate(session, &self.settings, kind),
            None => Err(Rejection::NotPlaying),
        };
        if let Err(reason) = result {
            log::trace!("{} request ignored: {:?}", kind, reason);
        }
        result
    }

    /// Slow-time timer fired. Timers from an earlier session are ignored.
    /// The timer runs on wall-clock time, so it clears the flag on the
    /// game over screen too.
    pub fn expire_slow_time(&mut self, timer: SlowTimeTimer) -> bool {
        if timer.generation != self.generation {
            log::trace!(
                "Stale slow-time timer from session {} ignored (current {})",
                timer.generation,
                self.generation
            );
            return false;
        }
        self.session.as_mut().is_some_and(skills::expire_slow_time)
    }

    /// GAME_OVER -> PLAYING with a fresh session and the same username
    pub fn restart(&mut self) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.game_over) else {
            log::trace!("Restart ignored: not on game over screen");
            return false;
        };

        session.reset(&self.layout);
        self.generation += 1;
        log::info!("{} restarted, session {}", session.username(), self.generation);
        true
    }

    /// One fixed tick. No-op unless PLAYING.
    pub fn tick(&mut self) -> TickReport {
        match self.session.as_mut() {
            Some(session) => tick::tick(session, &self.settings, &self.layout, &mut self.rng),
            None => TickReport::default(),
        }
    }
}
