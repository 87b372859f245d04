//! Spawn scheduler
//!
//! Every spawn interval a random number of pool slots is sampled; inactive
//! slots are (re)launched from a screen edge, active ones are left alone.
//! Pools never grow.

use rand::Rng;

use super::clock::Clock;
use super::floater::FloaterKind;
use super::logic::FishingLogic;
use crate::consts::{FISH_SPEED_BAND, MAX_FISH_SPEED, SPAWN_SURFACE_MARGIN};

impl<C: Clock> FishingLogic<C> {
    /// Launch some inactive fish from the left or right edge
    pub fn spawn_new_floaters(&mut self) {
        if self.fish.is_empty() {
            return;
        }
        let screen_w = self.scale.screen_w;
        let attempts = self.rng.random_range(1..=self.fish.len());
        let mut launched = 0;
        for _ in 0..attempts {
            let i = self.rng.random_range(0..self.fish.len());
            if self.fish[i].active {
                continue;
            }
            let dir = self.random_direction();
            let y = self.random_spawn_y(self.fish[i].height());
            let speed = self.random_fish_speed(self.fish[i].kind);

            let fish = &mut self.fish[i];
            let x = if dir > 0.0 { 0.0 } else { screen_w - fish.width() };
            fish.direction.set_xy(dir, 1.0);
            fish.position.set_xy(x, y);
            fish.speed.set_xy(speed, 0.0);
            fish.active = true;
            launched += 1;
        }
        log::debug!("Spawned {launched} fish ({attempts} attempts)");
    }

    /// Launch some inactive hazards from just off-screen
    pub fn spawn_hazards(&mut self) {
        if self.hazards.is_empty() {
            return;
        }
        let screen_w = self.scale.screen_w;
        let attempts = self.rng.random_range(1..=self.hazards.len());
        let mut launched = 0;
        for _ in 0..attempts {
            let i = self.rng.random_range(0..self.hazards.len());
            if self.hazards[i].active {
                continue;
            }
            let dir = self.random_direction();
            let y = self.random_spawn_y(self.hazards[i].height());

            let hazard = &mut self.hazards[i];
            let x = if dir > 0.0 { -hazard.width() } else { screen_w };
            hazard.direction.set_xy(dir, 0.0);
            hazard.position.set_xy(x, y);
            hazard.speed.set_xy(hazard.base_speed, 0.0);
            hazard.active = true;
            launched += 1;
        }
        log::debug!("Spawned {launched} hazards ({attempts} attempts)");
    }

    /// +1 (rightward) or -1 (leftward)
    pub(super) fn random_direction(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }

    /// Horizontal fish speed: an integer draw from the kind's band, scaled to
    /// the screen width
    pub(super) fn random_fish_speed(&mut self, kind: FloaterKind) -> f32 {
        let max = kind.max_fish_speed().unwrap_or(MAX_FISH_SPEED);
        let draw = self.rng.random_range(max - FISH_SPEED_BAND..=max);
        draw as f32 * self.scale.width_scale_factor()
    }

    /// Top edge within the water band, keeping the whole body above max depth
    fn random_spawn_y(&mut self, height: f32) -> f32 {
        let top = self.scale.surface_line() + SPAWN_SURFACE_MARGIN;
        let bottom = self.scale.max_depth() - height;
        if top.is_finite() && bottom.is_finite() && bottom > top {
            self.rng.random_range(top..=bottom)
        } else {
            top
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::clock::ManualClock;
    use crate::sim::logic::{FishingLogic, RoundConfig};
    use crate::sim::scale::ScaleContext;

    fn logic(day: i32, seed: u64) -> FishingLogic<ManualClock> {
        let config = RoundConfig {
            day,
            ..Default::default()
        };
        FishingLogic::with_seed(config, ScaleContext::new(1024.0, 768.0), ManualClock::new(0), seed)
    }

    #[test]
    fn test_spawned_fish_start_at_edge_in_band() {
        for seed in 0..20 {
            let mut logic = logic(6, seed);
            logic.spawn_new_floaters();
            let scale = *logic.scale();
            let active: Vec<_> = logic.fish().iter().filter(|f| f.active).collect();
            assert!(!active.is_empty());
            for fish in active {
                let expected_x = if fish.direction.x() > 0.0 {
                    0.0
                } else {
                    scale.screen_w - fish.width()
                };
                assert_eq!(fish.position.x(), expected_x);
                assert_eq!(fish.direction.y(), 1.0);
                assert!(fish.position.y() >= scale.surface_line() + 10.0);
                assert!(fish.position.y() + fish.height() <= scale.max_depth() + 1e-3);
                let max = fish.kind.max_fish_speed().unwrap_or(4) as f32;
                assert!(fish.speed.x() >= max - 2.0 && fish.speed.x() <= max);
            }
        }
    }

    #[test]
    fn test_spawned_hazards_start_off_screen() {
        for seed in 0..20 {
            let mut logic = logic(8, seed);
            logic.spawn_hazards();
            let screen_w = logic.scale().screen_w;
            for hazard in logic.hazards().iter().filter(|h| h.active) {
                if hazard.direction.x() > 0.0 {
                    assert_eq!(hazard.position.x(), -hazard.width());
                } else {
                    assert_eq!(hazard.position.x(), screen_w);
                }
                assert_eq!(hazard.direction.y(), 0.0);
                assert_eq!(hazard.speed.x(), hazard.base_speed);
            }
        }
    }

    #[test]
    fn test_active_slots_are_not_relaunched() {
        let mut logic = logic(1, 3);
        for fish in logic.fish_mut().iter_mut() {
            fish.active = true;
            fish.position.set_xy(300.0, 500.0);
        }
        logic.spawn_new_floaters();
        assert!(logic.fish().iter().all(|f| f.position.x() == 300.0));
        assert_eq!(logic.fish().len(), 4);
    }

    #[test]
    fn test_hazard_free_round_spawns_no_hazards() {
        let config = RoundConfig {
            day: 10,
            hazard_free: true,
            ..Default::default()
        };
        let mut logic =
            FishingLogic::with_seed(config, ScaleContext::default(), ManualClock::new(0), 9);
        logic.spawn_hazards();
        logic.spawn_new_floaters();
        assert!(logic.hazards().is_empty());
        assert!(logic.fish().iter().any(|f| f.active));
    }
}
