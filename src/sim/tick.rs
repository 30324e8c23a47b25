//! Fixed timestep simulation tick
//!
//! Order within a tick is fixed: obstacle motion, then collision against the
//! moved obstacle, then score and economy. A hit that ends the run stops the
//! same tick from scoring.

use rand::Rng;

use super::collision::{self, CollisionOutcome};
use super::economy;
use super::geometry::Layout;
use super::obstacle::{self, Motion};
use super::state::Session;
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub motion: Motion,
    pub collision: Option<CollisionOutcome>,
    pub coin_minted: bool,
}

impl TickReport {
    /// Nothing changed (time frozen or run over)
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the session by one tick
pub fn tick<R: Rng>(
    session: &mut Session,
    settings: &Settings,
    layout: &Layout,
    rng: &mut R,
) -> TickReport {
    // Released hold or finished run: time stands still
    if !session.is_advancing() {
        return TickReport::default();
    }

    let motion = obstacle::advance(session, settings, layout, rng);
    let collision = collision::resolve(session, settings, layout);
    let coin_minted = economy::award_tick(session, settings.coin_interval);

    TickReport {
        motion,
        collision,
        coin_minted,
    }
}
