//! The player's rod hook
//!
//! The hook stays at the horizontal center and moves along a vertical track
//! between the minimum and maximum line length.

use serde::{Deserialize, Serialize};

use super::scale::ScaleContext;
use super::vector::Vector2D;
use crate::consts::{ROD_LEVEL_SPEED_STEP, ROD_MAX_LENGTH_PERCENT, ROD_MIN_LENGTH_PERCENT, ROD_SPEED};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rod {
    /// Hook position (x fixed at screen center)
    pub position: Vector2D,
    /// Vertical sign of the last cast (-1 up, +1 down)
    pub direction: Vector2D,
    /// Signed vertical speed in pixels per tick (0 when idle)
    pub velocity: f32,
    max_velocity: f32,
    min_y: f32,
    max_y: f32,
}

impl Rod {
    /// Rod for the given upgrade level, centered on screen
    pub fn new(scale: &ScaleContext, rod_level: u32) -> Self {
        let speed_multiplier = 1.0 + rod_level as f32 * ROD_LEVEL_SPEED_STEP;
        Self {
            position: Vector2D::new(scale.center_x(), scale.center_y()),
            direction: Vector2D::new(0.0, 1.0),
            velocity: 0.0,
            max_velocity: ROD_SPEED * scale.height_scale_factor() * speed_multiplier,
            min_y: scale.scale_h(ROD_MIN_LENGTH_PERCENT),
            max_y: scale.scale_h(ROD_MAX_LENGTH_PERCENT),
        }
    }

    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    pub fn min_y(&self) -> f32 {
        self.min_y
    }

    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != 0.0
    }

    pub fn cast_up(&mut self) {
        self.cast_up_with(self.max_velocity);
    }

    pub fn cast_down(&mut self) {
        self.cast_down_with(self.max_velocity);
    }

    /// Reel up at a custom speed (heavy hazard drag)
    pub fn cast_up_with(&mut self, speed: f32) {
        self.velocity = -speed;
        self.direction[1] = -1.0;
    }

    /// Let out line at a custom speed
    pub fn cast_down_with(&mut self, speed: f32) {
        self.velocity = speed;
        self.direction[1] = 1.0;
    }

    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    /// Snap to the top of the track and stop
    pub fn snap_to_top(&mut self) {
        self.position[1] = self.min_y;
        self.velocity = 0.0;
    }

    /// Apply velocity, pinning to the track ends. Hitting an end stops the rod.
    pub fn update_pos(&mut self) {
        if self.velocity == 0.0 {
            return;
        }
        let new_y = self.position.y() + self.velocity;
        if new_y > self.min_y && new_y < self.max_y {
            self.position[1] = new_y;
        } else {
            self.position[1] = new_y.clamp(self.min_y, self.max_y);
            self.velocity = 0.0;
        }
    }

    /// Re-derive the track for a new resolution, keeping relative depth
    pub fn rescale(&mut self, old: &ScaleContext, new: &ScaleContext, rod_level: u32) {
        let ratio_y = new.screen_h / old.screen_h;
        let fresh = Rod::new(new, rod_level);
        let y = (self.position.y() * ratio_y).clamp(fresh.min_y, fresh.max_y);
        self.position.set_xy(fresh.position.x(), y);
        self.velocity *= fresh.max_velocity / self.max_velocity;
        self.max_velocity = fresh.max_velocity;
        self.min_y = fresh.min_y;
        self.max_y = fresh.max_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rod() -> Rod {
        Rod::new(&ScaleContext::new(1024.0, 768.0), 0)
    }

    #[test]
    fn test_starts_centered_and_idle() {
        let rod = rod();
        assert_eq!(rod.position, Vector2D::new(512.0, 384.0));
        assert!(!rod.is_moving());
        assert_eq!(rod.max_velocity(), 2.0);
    }

    #[test]
    fn test_level_speeds_up_rod() {
        let rod = Rod::new(&ScaleContext::new(1024.0, 768.0), 5);
        assert!((rod.max_velocity() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_cast_and_stop() {
        let mut rod = rod();
        rod.cast_down();
        rod.update_pos();
        assert_eq!(rod.position.y(), 386.0);
        assert_eq!(rod.direction.y(), 1.0);
        rod.cast_up_with(0.5);
        rod.update_pos();
        assert_eq!(rod.position.y(), 385.5);
        rod.stop();
        rod.update_pos();
        assert_eq!(rod.position.y(), 385.5);
    }

    #[test]
    fn test_clamps_at_track_ends() {
        let mut rod = rod();
        rod.cast_up();
        for _ in 0..1000 {
            rod.update_pos();
        }
        assert_eq!(rod.position.y(), rod.min_y());
        assert_eq!(rod.velocity, 0.0);

        rod.cast_down();
        for _ in 0..1000 {
            rod.update_pos();
        }
        assert_eq!(rod.position.y(), rod.max_y());
        assert!(!rod.is_moving());
    }
}
