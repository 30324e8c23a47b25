//! Collision detection and resolution
//!
//! The avatar and obstacle are vertically aligned by layout, so a hit is
//! decided on the horizontal axis alone. Resolution consults the shield.

use super::geometry::Layout;
use super::state::Session;
use crate::settings::Settings;

/// How a collision was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Shield consumed, obstacle thrown off-screen
    ShieldAbsorbed,
    /// No shield: the run is over
    Fatal,
}

/// Does the obstacle at `obstacle_x` overlap the avatar?
#[inline]
pub fn avatar_hit(layout: &Layout, obstacle_x: f32) -> bool {
    layout.avatar.overlaps_x(&layout.obstacle_at(obstacle_x))
}

/// Where a shield hit throws the obstacle
pub fn knockback_x(layout: &Layout, settings: &Settings) -> f32 {
    layout.spawn_x() + settings.shield_knockback
}

/// Check the current obstacle position against the avatar and apply the result
pub fn resolve(session: &mut Session, settings: &Settings, layout: &Layout) -> Option<CollisionOutcome> {
    if session.game_over || !avatar_hit(layout, session.obstacle_x) {
        return None;
    }

    if session.shield_active {
        session.shield_active = false;
        // Relocate so the same obstacle cannot hit again next tick
        session.obstacle_x = knockback_x(layout, settings);
        log::info!("Shield absorbed a hit, obstacle thrown to x={:.1}", session.obstacle_x);
        Some(CollisionOutcome::ShieldAbsorbed)
    } else {
        session.game_over = true;
        log::info!(
            "Game over for {}: score={} coins={}",
            session.username(),
            session.score,
            session.coins
        );
        Some(CollisionOutcome::Fatal)
    }
}
