//! Catch collision between a floater's mouth and the rod hook
//!
//! The hook is an ellipse approximated by its bounding rectangle; the mouth is
//! an axis-aligned square. A catch needs overlap on both axes.

use super::scale::ScaleContext;
use super::vector::Vector2D;
use crate::consts::{ROD_HITBOX_SCALE, ROD_RADIUSX_PERCENT, ROD_RADIUSY_PERCENT};

/// Square hitbox at a floater's mouth (top-left corner + side length)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthHitbox {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Hook hitbox centered on the rod position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodHitbox {
    pub x: f32,
    pub y: f32,
    /// Horizontal radius
    pub rx: f32,
    /// Vertical radius
    pub ry: f32,
}

impl RodHitbox {
    /// Hitbox for a hook at `position`, enlarged past the drawn rod so near
    /// misses still count
    pub fn at(position: Vector2D, scale: &ScaleContext) -> Self {
        Self {
            x: position.x(),
            y: position.y(),
            rx: scale.scale_w(ROD_RADIUSX_PERCENT) * ROD_HITBOX_SCALE,
            ry: scale.scale_h(ROD_RADIUSY_PERCENT) * ROD_HITBOX_SCALE,
        }
    }
}

/// Check whether a mouth hitbox touches the hook
pub fn mouth_rod_overlap(mouth: &MouthHitbox, rod: &RodHitbox) -> bool {
    let vertical = rod.y + rod.ry > mouth.y && rod.y - rod.ry < mouth.y + mouth.size;
    let horizontal = mouth.x + mouth.size > rod.x - rod.rx && mouth.x < rod.x + rod.rx;
    vertical && horizontal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook() -> RodHitbox {
        RodHitbox {
            x: 500.0,
            y: 300.0,
            rx: 6.0,
            ry: 18.0,
        }
    }

    #[test]
    fn test_mouth_on_hook_overlaps() {
        let mouth = MouthHitbox {
            x: 495.0,
            y: 295.0,
            size: 10.0,
        };
        assert!(mouth_rod_overlap(&mouth, &hook()));
    }

    #[test]
    fn test_miss_horizontal() {
        // Right depth, but the mouth ends before the hook's left edge
        let mouth = MouthHitbox {
            x: 480.0,
            y: 295.0,
            size: 10.0,
        };
        assert!(!mouth_rod_overlap(&mouth, &hook()));
    }

    #[test]
    fn test_miss_vertical() {
        let mouth = MouthHitbox {
            x: 498.0,
            y: 318.0,
            size: 10.0,
        };
        assert!(!mouth_rod_overlap(&mouth, &hook()));
    }

    #[test]
    fn test_hitbox_is_enlarged() {
        let scale = ScaleContext::new(1000.0, 1000.0);
        let rod = RodHitbox::at(Vector2D::new(10.0, 20.0), &scale);
        assert!((rod.rx - 6.0).abs() < 1e-4);
        assert!((rod.ry - 24.0).abs() < 1e-4);
    }
}
