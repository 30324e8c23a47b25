//! Obstacle motion model
//!
//! The obstacle only moves while time is held. Once it leaves the left edge
//! it respawns past the right edge with random spacing.

use rand::Rng;

use super::geometry::Layout;
use super::state::Session;
use crate::settings::Settings;

/// What the obstacle did this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    /// Distance moved left (0 when frozen)
    pub moved: f32,
    /// Respawned off-screen right after exiting left
    pub recycled: bool,
}

/// Step the obstacle for one tick
pub fn advance<R: Rng>(
    session: &mut Session,
    settings: &Settings,
    layout: &Layout,
    rng: &mut R,
) -> Motion {
    if !session.is_advancing() {
        return Motion::default();
    }

    let speed = settings.obstacle_speed(session.slow_time_active);
    session.obstacle_x -= speed;

    let mut motion = Motion {
        moved: speed,
        recycled: false,
    };

    if session.obstacle_x < layout.exit_x() {
        session.obstacle_x = recycle_x(layout, settings.recycle_jitter, rng);
        motion.recycled = true;
        log::debug!("Obstacle recycled to x={:.1}", session.obstacle_x);
    }

    motion
}

/// Fresh off-screen position: right edge plus uniform jitter in [0, jitter)
pub fn recycle_x<R: Rng>(layout: &Layout, jitter: f32, rng: &mut R) -> f32 {
    let offset = if jitter > 0.0 {
        rng.random_range(0.0..jitter)
    } else {
        0.0
    };
    layout.spawn_x() + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Session, Settings, Layout, Pcg32) {
        let settings = Settings::default();
        let layout = settings.layout();
        let session = Session::new("tester".into(), &layout);
        (session, settings, layout, Pcg32::seed_from_u64(42))
    }

    #[test]
    fn test_frozen_without_hold() {
        let (mut session, settings, layout, mut rng) = setup();
        let motion = advance(&mut session, &settings, &layout, &mut rng);
        assert_eq!(motion, Motion::default());
        assert_eq!(session.obstacle_x, 400.0);
    }

    #[test]
    fn test_base_and_slow_speed() {
        let (mut session, settings, layout, mut rng) = setup();
        session.hold_active = true;

        advance(&mut session, &settings, &layout, &mut rng);
        assert_eq!(session.obstacle_x, 396.0);

        session.slow_time_active = true;
        let motion = advance(&mut session, &settings, &layout, &mut rng);
        assert_eq!(motion.moved, 2.0);
        assert_eq!(session.obstacle_x, 394.0);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let (mut session, settings, layout, mut rng) = setup();
        session.hold_active = true;
        session.game_over = true;
        advance(&mut session, &settings, &layout, &mut rng);
        assert_eq!(session.obstacle_x, 400.0);
    }

    #[test]
    fn test_recycle_after_exit() {
        let (mut session, settings, layout, mut rng) = setup();
        session.hold_active = true;

        // Exactly at the exit threshold: not yet gone
        session.obstacle_x = -46.0;
        let motion = advance(&mut session, &settings, &layout, &mut rng);
        assert!(!motion.recycled);
        assert_eq!(session.obstacle_x, -50.0);

        let motion = advance(&mut session, &settings, &layout, &mut rng);
        assert!(motion.recycled);
        assert!(session.obstacle_x >= 400.0 && session.obstacle_x < 600.0);
    }

    #[test]
    fn test_recycle_without_jitter() {
        let (_, _, layout, mut rng) = setup();
        assert_eq!(recycle_x(&layout, 0.0, &mut rng), 400.0);
    }

    #[test]
    fn test_recycle_is_seeded() {
        let (_, _, layout, _) = setup();
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(recycle_x(&layout, 200.0, &mut a), recycle_x(&layout, 200.0, &mut b));
        }
    }
}
