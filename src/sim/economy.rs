//! Score and coin economy
//!
//! Score counts active ticks. A coin is minted each time the score reaches a
//! multiple of the coin interval (tick 60, 120, ...), never at zero.

use super::state::Session;

/// Count one active tick. Returns true if a coin was minted.
pub fn award_tick(session: &mut Session, coin_interval: u64) -> bool {
    if !session.is_advancing() {
        return false;
    }

    session.score += 1;
    if session.score % coin_interval == 0 {
        session.coins = session.coins.saturating_add(1);
        log::debug!("Coin minted at score {} (coins={})", session.score, session.coins);
        return true;
    }
    false
}

/// Spend coins if the balance allows it
pub fn try_spend(session: &mut Session, cost: u32) -> bool {
    match session.coins.checked_sub(cost) {
        Some(left) => {
            session.coins = left;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COIN_INTERVAL;
    use crate::settings::Settings;

    fn live_session() -> Session {
        let layout = Settings::default().layout();
        let mut session = Session::new("tester".into(), &layout);
        session.hold_active = true;
        session
    }

    #[test]
    fn test_first_coin_at_sixty() {
        let mut session = live_session();
        for _ in 0..59 {
            assert!(!award_tick(&mut session, COIN_INTERVAL));
        }
        assert_eq!(session.coins, 0);
        assert!(award_tick(&mut session, COIN_INTERVAL));
        assert_eq!(session.score, 60);
        assert_eq!(session.coins, 1);
    }

    #[test]
    fn test_coins_track_score() {
        let mut session = live_session();
        for _ in 0..185 {
            award_tick(&mut session, COIN_INTERVAL);
        }
        assert_eq!(session.score, 185);
        assert_eq!(session.coins, 3);
    }

    #[test]
    fn test_no_award_when_frozen() {
        let mut session = live_session();
        session.hold_active = false;
        assert!(!award_tick(&mut session, COIN_INTERVAL));
        assert_eq!(session.score, 0);

        session.hold_active = true;
        session.game_over = true;
        assert!(!award_tick(&mut session, COIN_INTERVAL));
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_spend() {
        let mut session = live_session();
        assert!(!try_spend(&mut session, 1));
        session.coins = 2;
        assert!(try_spend(&mut session, 1));
        assert_eq!(session.coins, 1);
        assert!(!try_spend(&mut session, 2));
        assert_eq!(session.coins, 1);
    }
}
