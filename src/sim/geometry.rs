//! Axis-aligned geometry for the avatar and obstacle
//!
//! Screen space: origin top-left, x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, max: min + size }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict horizontal overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        other.min.x < self.max.x && other.max.x > self.min.x
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && other.min.y < self.max.y && other.max.y > self.min.y
    }
}

/// Static scene layout derived from settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub screen: Vec2,
    /// Avatar box, fixed at screen center
    pub avatar: Rect,
    /// Obstacle top edge (constant; only x moves)
    pub obstacle_top: f32,
    pub obstacle_size: Vec2,
}

impl Layout {
    pub fn from_settings(settings: &Settings) -> Self {
        let screen = Vec2::new(settings.screen_width, settings.screen_height);
        let avatar_size = Vec2::splat(settings.avatar_size);
        let avatar = Rect::from_min_size(screen * 0.5 - avatar_size * 0.5, avatar_size);

        Self {
            screen,
            avatar,
            obstacle_top: avatar.min.y - settings.obstacle_rise,
            obstacle_size: Vec2::new(settings.obstacle_width, settings.obstacle_height),
        }
    }

    /// Obstacle box with its leading edge at `x`
    pub fn obstacle_at(&self, x: f32) -> Rect {
        Rect::from_min_size(Vec2::new(x, self.obstacle_top), self.obstacle_size)
    }

    /// Fully off-screen right: where a fresh session parks the obstacle
    pub fn spawn_x(&self) -> f32 {
        self.screen.x
    }

    /// Once the leading edge passes this, the obstacle is gone off the left
    pub fn exit_x(&self) -> f32 {
        -self.obstacle_size.x
    }
}
