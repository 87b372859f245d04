//! Day-based difficulty progression
//!
//! Ten tiers; days past 10 keep the day-10 tier and days below 1 use day 1.

use serde::{Deserialize, Serialize};

/// Pool sizes and hazard speed for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTier {
    pub small_fish: usize,
    pub medium_fish: usize,
    pub big_fish: usize,
    pub normal_hazards: usize,
    pub heavy_hazards: usize,
    pub shock_hazards: usize,
    pub hazard_speed_multiplier: f32,
}

pub const MAX_TIER_DAY: i32 = 10;

const fn tier(fish: [usize; 3], hazards: [usize; 3], hazard_speed_multiplier: f32) -> DayTier {
    DayTier {
        small_fish: fish[0],
        medium_fish: fish[1],
        big_fish: fish[2],
        normal_hazards: hazards[0],
        heavy_hazards: hazards[1],
        shock_hazards: hazards[2],
        hazard_speed_multiplier,
    }
}

/// Fish counts are small/medium/big, hazards normal/heavy/shock
const DAY_TIERS: [DayTier; MAX_TIER_DAY as usize] = [
    tier([4, 0, 0], [2, 0, 0], 1.0),
    tier([5, 0, 0], [2, 0, 0], 1.1),
    tier([5, 2, 0], [2, 2, 0], 1.2),
    tier([5, 3, 0], [2, 2, 0], 1.3),
    tier([6, 4, 0], [3, 2, 0], 1.4),
    tier([6, 4, 2], [3, 2, 2], 1.5),
    tier([7, 4, 3], [3, 3, 3], 1.6),
    tier([8, 5, 4], [4, 3, 3], 1.7),
    tier([9, 6, 5], [4, 4, 3], 1.8),
    tier([10, 7, 6], [5, 4, 4], 2.0),
];

/// Clamp any day number onto the tier table
pub fn effective_day(day: i32) -> i32 {
    day.clamp(1, MAX_TIER_DAY)
}

/// Tier for a day number
pub fn tier_for_day(day: i32) -> DayTier {
    DAY_TIERS[(effective_day(day) - 1) as usize]
}

impl DayTier {
    pub fn fish_count(&self) -> usize {
        self.small_fish + self.medium_fish + self.big_fish
    }

    pub fn hazard_count(&self) -> usize {
        self.normal_hazards + self.heavy_hazards + self.shock_hazards
    }

    /// Same fish population with every hazard removed (post-victory rounds)
    pub fn hazard_free(self) -> Self {
        Self {
            normal_hazards: 0,
            heavy_hazards: 0,
            shock_hazards: 0,
            ..self
        }
    }
}
