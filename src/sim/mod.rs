//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only; wall-clock timers are owned by the caller
//! - Seeded RNG only
//! - Fixed per-tick order: motion, collision, economy
//! - No rendering or platform dependencies

pub mod collision;
pub mod economy;
pub mod game;
pub mod geometry;
pub mod obstacle;
pub mod skills;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, avatar_hit};
pub use game::{Game, SlowTimeTimer};
pub use geometry::{Layout, Rect};
pub use obstacle::Motion;
pub use skills::{Ability, Activation, Rejection, SkillKind};
pub use state::{Screen, Session, Snapshot};
pub use tick::{TickReport, tick};
