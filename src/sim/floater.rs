//! Fish and hazards ("floaters")
//!
//! Every floater shares the same motion state; what differs per kind (points,
//! rod-level gate, catch effect, sprites) is matched on [`FloaterKind`].
//!
//! `position` is the anchor corner the renderer draws from. Collision and
//! placement code treats it with the same convention the renderer uses, so
//! don't "fix" the leading-edge math in `mouth_hitbox` without the renderer.

use serde::{Deserialize, Serialize};

use super::collision::MouthHitbox;
use super::scale::ScaleContext;
use super::vector::Vector2D;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FloaterKind {
    SmallFish,
    MediumFish,
    BigFish,
    /// Barracuda: knocked off on contact, costs score
    NormalHazard,
    /// Hooks onto the rod and slows reeling until released at the surface
    HeavyHazard { slow_factor: f32 },
    /// Stuns the rod and snaps it back to the top
    ShockHazard,
}

impl FloaterKind {
    pub fn heavy() -> Self {
        FloaterKind::HeavyHazard {
            slow_factor: HEAVY_HAZARD_SLOW_FACTOR,
        }
    }

    pub fn is_fish(&self) -> bool {
        matches!(
            self,
            FloaterKind::SmallFish | FloaterKind::MediumFish | FloaterKind::BigFish
        )
    }

    pub fn is_hazard(&self) -> bool {
        !self.is_fish()
    }

    /// Points for landing this fish above the surface line
    pub fn points(&self) -> u32 {
        match self {
            FloaterKind::SmallFish => 1,
            FloaterKind::MediumFish => 2,
            FloaterKind::BigFish => 3,
            _ => 0,
        }
    }

    /// Minimum rod level that can hook this fish
    pub fn required_rod_level(&self) -> u32 {
        match self {
            FloaterKind::MediumFish => MEDIUM_FISH_ROD_LEVEL,
            FloaterKind::BigFish => BIG_FISH_ROD_LEVEL,
            _ => 0,
        }
    }

    pub fn catchable_with(&self, rod_level: u32) -> bool {
        rod_level >= self.required_rod_level()
    }

    /// Fish swim speed band upper bound (pixels/tick at reference width)
    pub fn max_fish_speed(&self) -> Option<i32> {
        match self {
            FloaterKind::SmallFish => Some(MAX_FISH_SPEED),
            FloaterKind::MediumFish => Some(MAX_MEDIUM_FISH_SPEED),
            FloaterKind::BigFish => Some(MAX_BIG_FISH_SPEED),
            _ => None,
        }
    }

    /// Creation-time speed factor on top of the tier hazard speed
    pub fn hazard_speed_factor(&self) -> f32 {
        match self {
            FloaterKind::NormalHazard => NORMAL_HAZARD_SPEED_FACTOR,
            FloaterKind::HeavyHazard { .. } => {
                NORMAL_HAZARD_SPEED_FACTOR * HEAVY_HAZARD_SPEED_FACTOR
            }
            FloaterKind::ShockHazard => NORMAL_HAZARD_SPEED_FACTOR * SHOCK_HAZARD_SPEED_FACTOR,
            _ => 1.0,
        }
    }

    /// Size as (width, height) fractions of the screen
    pub fn size_percent(&self) -> (f32, f32) {
        match self {
            FloaterKind::SmallFish => (FISH_WIDTH_PERCENT, FISH_HEIGHT_PERCENT),
            FloaterKind::MediumFish => (MEDIUM_FISH_WIDTH_PERCENT, MEDIUM_FISH_HEIGHT_PERCENT),
            FloaterKind::BigFish => (BIG_FISH_WIDTH_PERCENT, BIG_FISH_HEIGHT_PERCENT),
            FloaterKind::NormalHazard => (HAZARD_WIDTH_PERCENT, HAZARD_HEIGHT_PERCENT),
            FloaterKind::HeavyHazard { .. } => {
                (HEAVY_HAZARD_WIDTH_PERCENT, HEAVY_HAZARD_HEIGHT_PERCENT)
            }
            FloaterKind::ShockHazard => (SHOCK_HAZARD_WIDTH_PERCENT, SHOCK_HAZARD_HEIGHT_PERCENT),
        }
    }

    pub fn sprite_id(&self) -> &'static str {
        match self {
            FloaterKind::SmallFish => "fish_small",
            FloaterKind::MediumFish => "fish_medium",
            FloaterKind::BigFish => "fish_big",
            FloaterKind::NormalHazard => "hazard_barracuda",
            FloaterKind::HeavyHazard { .. } => "hazard_cannon",
            FloaterKind::ShockHazard => "hazard_skelly",
        }
    }

    /// Two animation frames; static sprites repeat their sprite id
    pub fn anim_frame_ids(&self) -> (&'static str, &'static str) {
        match self {
            FloaterKind::SmallFish => ("fish_small_anim1", "fish_small_anim2"),
            FloaterKind::MediumFish => ("fish_medium_anim1", "fish_medium_anim2"),
            FloaterKind::BigFish => ("fish_big_anim1", "fish_big_anim2"),
            FloaterKind::NormalHazard => ("hazard_barracuda_anim1", "hazard_barracuda_anim2"),
            other => (other.sprite_id(), other.sprite_id()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floater {
    pub kind: FloaterKind,
    pub position: Vector2D,
    pub direction: Vector2D,
    pub speed: Vector2D,
    pub dimens: Vector2D,
    /// Horizontal speed assigned at creation (hazards reuse it on every spawn)
    pub base_speed: f32,
    pub active: bool,
    pub caught: bool,
}

impl Floater {
    pub fn new(kind: FloaterKind, width: f32, height: f32, x_speed: f32) -> Self {
        Self {
            kind,
            position: Vector2D::new(PARK_POSITION.0, PARK_POSITION.1),
            direction: Vector2D::new(1.0, 1.0),
            speed: Vector2D::new(x_speed, 0.0),
            dimens: Vector2D::new(width, height),
            base_speed: x_speed,
            active: false,
            caught: false,
        }
    }

    /// Build a floater sized for the screen. `hazard_speed` is the tier speed
    /// (already multiplied by the day's hazard multiplier); fish ignore it.
    pub fn scaled(kind: FloaterKind, scale: &ScaleContext, hazard_speed: f32) -> Self {
        let (w, h) = kind.size_percent();
        let speed = match kind.max_fish_speed() {
            Some(max) => max as f32 * scale.width_scale_factor(),
            None => hazard_speed * kind.hazard_speed_factor(),
        };
        Self::new(kind, scale.scale_w(w), scale.scale_h(h), speed)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.dimens.x()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.dimens.y()
    }

    pub fn sprite_id(&self) -> &'static str {
        self.kind.sprite_id()
    }

    pub fn anim_frame_ids(&self) -> (&'static str, &'static str) {
        self.kind.anim_frame_ids()
    }

    /// One tick of linear motion
    pub fn update(&mut self) {
        self.position += self.direction * self.speed;
    }

    /// Deactivate and move off-screen
    pub fn park(&mut self) {
        self.active = false;
        self.position.set_xy(PARK_POSITION.0, PARK_POSITION.1);
    }

    /// True once the floater has fully crossed the screen in its travel direction
    pub fn is_out_of_bounds(&self, screen_w: f32) -> bool {
        if self.direction.x() > 0.0 {
            self.position.x() >= screen_w
        } else if self.direction.x() < 0.0 {
            self.position.x() + self.width() <= 0.0
        } else {
            false
        }
    }

    /// Hooked floaters hang rotated: width and height trade places
    pub fn swap_dimens(&mut self) {
        self.dimens = self.dimens.swapped();
    }

    /// Square hitbox at the floater's mouth (leading edge, vertically centered)
    pub fn mouth_hitbox(&self) -> MouthHitbox {
        let size = self.height() / 2.0;
        let x = if self.direction.x() > 0.0 {
            self.position.x() + self.width() - size - MOUTH_INSET
        } else {
            self.position.x() + MOUTH_INSET
        };
        let y = self.position.y() + (self.height() - size) / 2.0;
        MouthHitbox { x, y, size }
    }
}
