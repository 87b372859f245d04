//! Resolution scaling
//!
//! Every size, speed and depth in the simulation is authored either as a
//! fraction of the screen or in pixels at the 1024x768 reference resolution.

use serde::{Deserialize, Serialize};

use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH, ROD_MAX_LENGTH_PERCENT, SURFACE_POND_PERCENT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleContext {
    pub screen_w: f32,
    pub screen_h: f32,
}

impl Default for ScaleContext {
    fn default() -> Self {
        Self::new(1263.0, 924.0)
    }
}

impl ScaleContext {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        Self { screen_w, screen_h }
    }

    /// Both sides finite and positive
    pub fn is_valid(&self) -> bool {
        self.screen_w.is_finite()
            && self.screen_h.is_finite()
            && self.screen_w > 0.0
            && self.screen_h > 0.0
    }

    /// Fraction of screen width in pixels
    #[inline]
    pub fn scale_w(&self, width_percent: f32) -> f32 {
        self.screen_w * width_percent
    }

    /// Fraction of screen height in pixels
    #[inline]
    pub fn scale_h(&self, height_percent: f32) -> f32 {
        self.screen_h * height_percent
    }

    #[inline]
    pub fn width_scale_factor(&self) -> f32 {
        self.screen_w / REFERENCE_WIDTH
    }

    #[inline]
    pub fn height_scale_factor(&self) -> f32 {
        self.screen_h / REFERENCE_HEIGHT
    }

    pub fn center_x(&self) -> f32 {
        self.screen_w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.screen_h / 2.0
    }

    /// Waterline y; above it is the scoring zone
    pub fn surface_line(&self) -> f32 {
        self.scale_h(SURFACE_POND_PERCENT)
    }

    /// Deepest point the rod can reach
    pub fn max_depth(&self) -> f32 {
        self.scale_h(ROD_MAX_LENGTH_PERCENT)
    }
}
