//! Skill controller
//!
//! Both skills share one activation contract ([`Ability`]) but differ in
//! lifecycle: slow-time expires on a wall-clock timer, the shield lasts until
//! a collision consumes it.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::economy;
use super::state::Session;
use crate::settings::Settings;

/// Skills the player can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    SlowTime,
    Shield,
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillKind::SlowTime => f.write_str("slow-time"),
            SkillKind::Shield => f.write_str("shield"),
        }
    }
}

/// Why an activation request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Session is over; wait for restart
    NotPlaying,
    AlreadyActive,
    InsufficientCoins { have: u32, need: u32 },
}

/// Lifetime of an accepted activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Stays on until something consumes it
    UntilConsumed,
    /// Must be switched off after this much wall-clock time
    Expires(Duration),
}

/// An activatable ability
pub trait Ability {
    fn kind(&self) -> SkillKind;

    fn is_active(&self, session: &Session) -> bool;

    /// Preconditions beyond "not already active"
    fn check_cost(&self, _session: &Session, _settings: &Settings) -> Result<(), Rejection> {
        Ok(())
    }

    /// Turn the ability on. Fails without touching the session if the
    /// ability cannot be paid for.
    fn apply(&self, session: &mut Session, settings: &Settings) -> Result<Activation, Rejection>;
}

/// Halves obstacle speed for a fixed duration. Free, reusable once expired.
pub struct SlowTime;

impl Ability for SlowTime {
    fn kind(&self) -> SkillKind {
        SkillKind::SlowTime
    }

    fn is_active(&self, session: &Session) -> bool {
        session.slow_time_active
    }

    fn apply(&self, session: &mut Session, settings: &Settings) -> Result<Activation, Rejection> {
        session.slow_time_active = true;
        Ok(Activation::Expires(settings.slow_time_duration()))
    }
}

/// Absorbs exactly one collision. Costs coins.
pub struct Shield;

impl Ability for Shield {
    fn kind(&self) -> SkillKind {
        SkillKind::Shield
    }

    fn is_active(&self, session: &Session) -> bool {
        session.shield_active
    }

    fn check_cost(&self, session: &Session, settings: &Settings) -> Result<(), Rejection> {
        if session.coins < settings.shield_cost {
            return Err(Rejection::InsufficientCoins {
                have: session.coins,
                need: settings.shield_cost,
            });
        }
        Ok(())
    }

    fn apply(&self, session: &mut Session, settings: &Settings) -> Result<Activation, Rejection> {
        if !economy::try_spend(session, settings.shield_cost) {
            return Err(Rejection::InsufficientCoins {
                have: session.coins,
                need: settings.shield_cost,
            });
        }
        session.shield_active = true;
        Ok(Activation::UntilConsumed)
    }
}

/// Look up the ability behind a skill kind
pub fn ability(kind: SkillKind) -> &'static dyn Ability {
    match kind {
        SkillKind::SlowTime => &SlowTime,
        SkillKind::Shield => &Shield,
    }
}

/// Try to activate a skill on a live session
pub fn activate(
    session: &mut Session,
    settings: &Settings,
    kind: SkillKind,
) -> Result<Activation, Rejection> {
    if session.game_over {
        return Err(Rejection::NotPlaying);
    }

    let ability = ability(kind);
    if ability.is_active(session) {
        return Err(Rejection::AlreadyActive);
    }
    ability.check_cost(session, settings)?;

    let activation = ability.apply(session, settings)?;
    log::info!("{} activated (coins={})", kind, session.coins);
    Ok(activation)
}

/// Timer callback: switch slow-time off. Idempotent.
pub fn expire_slow_time(session: &mut Session) -> bool {
    let was_active = session.slow_time_active;
    session.slow_time_active = false;
    if was_active {
        log::info!("slow-time expired");
    }
    was_active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Session, Settings) {
        let settings = Settings::default();
        let session = Session::new("tester".into(), &settings.layout());
        (session, settings)
    }

    #[test]
    fn test_slow_time_lifecycle() {
        let (mut session, settings) = setup();
        assert_eq!(
            activate(&mut session, &settings, SkillKind::SlowTime),
            Ok(Activation::Expires(Duration::from_millis(3000)))
        );
        assert!(session.slow_time_active);
        assert_eq!(
            activate(&mut session, &settings, SkillKind::SlowTime),
            Err(Rejection::AlreadyActive)
        );

        assert!(expire_slow_time(&mut session));
        assert!(!session.slow_time_active);
        // Second expiry is harmless
        assert!(!expire_slow_time(&mut session));

        // Reusable after expiry, still free
        assert!(activate(&mut session, &settings, SkillKind::SlowTime).is_ok());
        assert_eq!(session.coins, 0);
    }

    #[test]
    fn test_shield_needs_coins() {
        let (mut session, settings) = setup();
        assert_eq!(
            activate(&mut session, &settings, SkillKind::Shield),
            Err(Rejection::InsufficientCoins { have: 0, need: 1 })
        );
        assert!(!session.shield_active);
        assert_eq!(session.coins, 0);
    }

    #[test]
    fn test_shield_costs_one_coin() {
        let (mut session, settings) = setup();
        session.coins = 2;
        assert_eq!(
            activate(&mut session, &settings, SkillKind::Shield),
            Ok(Activation::UntilConsumed)
        );
        assert!(session.shield_active);
        assert_eq!(session.coins, 1);

        // Already up: no second charge
        assert_eq!(
            activate(&mut session, &settings, SkillKind::Shield),
            Err(Rejection::AlreadyActive)
        );
        assert_eq!(session.coins, 1);
    }

    #[test]
    fn test_unpaid_shield_stays_down() {
        // Applying directly skips check_cost; the spend still gates it
        let (mut session, settings) = setup();
        assert_eq!(
            Shield.apply(&mut session, &settings),
            Err(Rejection::InsufficientCoins { have: 0, need: 1 })
        );
        assert!(!session.shield_active);
        assert_eq!(session.coins, 0);

        session.coins = 1;
        assert_eq!(Shield.apply(&mut session, &settings), Ok(Activation::UntilConsumed));
        assert!(session.shield_active);
        assert_eq!(session.coins, 0);
    }

    #[test]
    fn test_skills_ignored_after_game_over() {
        let (mut session, settings) = setup();
        session.coins = 5;
        session.game_over = true;
        assert_eq!(
            activate(&mut session, &settings, SkillKind::Shield),
            Err(Rejection::NotPlaying)
        );
        assert_eq!(
            activate(&mut session, &settings, SkillKind::SlowTime),
            Err(Rejection::NotPlaying)
        );
        assert_eq!(session.coins, 5);
        assert!(!session.shield_active);
        assert!(!session.slow_time_active);
    }

    #[test]
    fn test_ability_lookup() {
        assert_eq!(ability(SkillKind::Shield).kind(), SkillKind::Shield);
        assert_eq!(ability(SkillKind::SlowTime).kind(), SkillKind::SlowTime);
    }
}
