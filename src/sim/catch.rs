//! Catch detection, release and hazard effects

use super::clock::Clock;
use super::collision::{RodHitbox, mouth_rod_overlap};
use super::floater::FloaterKind;
use super::logic::FishingLogic;
use crate::consts::{HAZARD_PENALTY, ROD_RADIUSX_PERCENT, ROD_RADIUSY_PERCENT, STUN_DURATION_MS};

impl<C: Clock> FishingLogic<C> {
    /// Check every active floater's mouth against the hook.
    ///
    /// At most one fish is hooked at a time and only if the rod level allows
    /// it. Hazards are always checked, even with a fish on the line.
    pub fn handle_catch(&mut self) {
        if self.caught_fish.is_none() {
            let hook = RodHitbox::at(self.rod.position, &self.scale);
            let rod_level = self.rod_level;
            let mut hooked = None;
            for (i, fish) in self.fish.iter().enumerate() {
                if !fish.active || fish.caught || !mouth_rod_overlap(&fish.mouth_hitbox(), &hook) {
                    continue;
                }
                if fish.kind.catchable_with(rod_level) {
                    hooked = Some(i);
                    break;
                }
                log::trace!(
                    "{:?} needs rod level {}, have {}",
                    fish.kind,
                    fish.kind.required_rod_level(),
                    rod_level
                );
            }
            if let Some(i) = hooked {
                self.hook_fish(i);
            }
        }

        for i in 0..self.hazards.len() {
            // The hook may have moved (shock snap) earlier in this pass
            let hook = RodHitbox::at(self.rod.position, &self.scale);
            let hazard = &self.hazards[i];
            if !hazard.active || hazard.caught || !mouth_rod_overlap(&hazard.mouth_hitbox(), &hook) {
                continue;
            }
            self.hit_hazard(i);
        }
    }

    fn hook_fish(&mut self, i: usize) {
        let rod_pos = self.rod.position;
        let fish = &mut self.fish[i];
        fish.caught = true;
        fish.swap_dimens();
        let x = rod_pos.x() + fish.width() / 2.0;
        fish.position.set_xy(x, rod_pos.y());
        fish.speed.set_xy(0.0, 0.0);
        self.caught_fish = Some(i);
        log::debug!("Hooked {:?} at depth {:.1}", fish.kind, rod_pos.y());
    }

    fn hit_hazard(&mut self, i: usize) {
        let kind = self.hazards[i].kind;
        self.summary.hazard_hits += 1;
        if self.caught_fish.is_some() {
            self.release_fish();
        }
        self.catch_score = self.catch_score.saturating_sub(HAZARD_PENALTY);
        log::debug!("Hit {kind:?}, score now {}", self.catch_score);

        match kind {
            FloaterKind::HeavyHazard { slow_factor } if self.caught_heavy_hazard.is_none() => {
                let reduced = self.rod.max_velocity() * slow_factor;
                let rod_pos = self.rod.position;
                let rod_dir = self.rod.direction;
                let hazard = &mut self.hazards[i];
                hazard.caught = true;
                hazard.position = rod_pos;
                hazard.direction.set_xy(0.0, rod_dir.y());
                hazard.speed.set_xy(0.0, reduced);
                self.caught_heavy_hazard = Some(i);
                if self.rod.is_moving() {
                    if rod_dir.y() < 0.0 {
                        self.rod.cast_up_with(reduced);
                    } else {
                        self.rod.cast_down_with(reduced);
                    }
                }
            }
            FloaterKind::ShockHazard => {
                self.hazards[i].park();
                self.rod.snap_to_top();
                self.stunned = true;
                self.stun_end_time = self.clock.now_ms() + STUN_DURATION_MS;
                self.summary.stuns += 1;
                log::debug!("Stunned until {}", self.stun_end_time);
            }
            _ => self.hazards[i].park(),
        }
    }

    /// Let go of the hooked fish. Above the surface line it scores and leaves
    /// the pond; below it swims off from just past the rod.
    pub fn release_fish(&mut self) {
        let Some(i) = self.caught_fish.take() else {
            return;
        };
        let rod_pos = self.rod.position;
        let rod_half_h = self.scale.scale_h(ROD_RADIUSY_PERCENT) / 2.0;
        let landed = rod_pos.y() + rod_half_h < self.scale.surface_line();
        let rod_rx = self.scale.scale_w(ROD_RADIUSX_PERCENT);
        let speed = self.random_fish_speed(self.fish[i].kind);

        let fish = &mut self.fish[i];
        fish.caught = false;
        fish.swap_dimens();
        if landed {
            let kind = fish.kind;
            fish.park();
            self.catch_score += kind.points();
            self.summary.record_landed(kind);
            log::debug!("Landed {kind:?}, score now {}", self.catch_score);
        } else {
            let x = if fish.direction.x() > 0.0 {
                rod_pos.x() + rod_rx
            } else {
                rod_pos.x() - rod_rx - fish.width()
            };
            fish.position.set_xy(x, rod_pos.y());
            fish.direction[1] = 1.0;
            fish.speed.set_xy(speed, 0.0);
            fish.update();
            log::debug!("Released {:?} underwater", fish.kind);
        }
    }

    /// Drop the hooked heavy hazard. Only works at or above the surface line;
    /// returns whether it came off.
    pub fn release_heavy_hazard(&mut self) -> bool {
        let Some(i) = self.caught_heavy_hazard else {
            return false;
        };
        if self.rod.position.y() > self.scale.surface_line() {
            log::trace!("Heavy hazard too deep to release");
            return false;
        }
        self.caught_heavy_hazard = None;
        let hazard = &mut self.hazards[i];
        hazard.caught = false;
        hazard.park();
        log::debug!("Released heavy hazard");
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::clock::ManualClock;
    use crate::sim::floater::FloaterKind;
    use crate::sim::logic::{FishingLogic, RoundConfig};
    use crate::sim::scale::ScaleContext;

    fn logic(day: i32, rod_level: u32) -> FishingLogic<ManualClock> {
        let config = RoundConfig {
            day,
            rod_level,
            ..Default::default()
        };
        FishingLogic::with_seed(config, ScaleContext::new(1024.0, 768.0), ManualClock::new(0), 11)
    }

    /// Lower the rod well under the waterline
    fn sink_rod(logic: &mut FishingLogic<ManualClock>) {
        logic.rod_mut().position.set_xy(512.0, 600.0);
    }

    /// Park a floater so its mouth sits on the hook
    fn place_on_hook(logic: &mut FishingLogic<ManualClock>, hazard: bool, i: usize) {
        let rod = logic.rod().position;
        let pool = if hazard { logic.hazards_mut() } else { logic.fish_mut() };
        let floater = &mut pool[i];
        floater.active = true;
        floater.direction.set_xy(1.0, if hazard { 0.0 } else { 1.0 });
        floater.speed.set_xy(0.0, 0.0);
        let size = floater.height() / 2.0;
        let x = rod.x() - floater.width() + size / 2.0 + 5.0;
        let y = rod.y() - floater.height() / 2.0;
        floater.position.set_xy(x, y);
    }

    #[test]
    fn test_hook_fish() {
        let mut logic = logic(1, 0);
        place_on_hook(&mut logic, false, 2);
        let (w, h) = (logic.fish()[2].width(), logic.fish()[2].height());
        logic.handle_catch();
        let caught = logic.caught_fish().expect("fish should be hooked");
        assert!(caught.caught);
        assert_eq!((caught.width(), caught.height()), (h, w));
        assert_eq!(caught.position.y(), logic.rod().position.y());
    }

    #[test]
    fn test_rod_level_gate() {
        let mut logic = logic(3, 1);
        let medium = logic
            .fish()
            .iter()
            .position(|f| f.kind == FloaterKind::MediumFish)
            .expect("day 3 has medium fish");
        place_on_hook(&mut logic, false, medium);
        logic.handle_catch();
        assert!(logic.caught_fish().is_none());
        assert!(logic.fish()[medium].active);
    }

    #[test]
    fn test_landing_scores() {
        let mut logic = logic(1, 0);
        place_on_hook(&mut logic, false, 0);
        logic.handle_catch();
        let surface = logic.scale().surface_line();
        logic.rod_mut().position.set_xy(512.0, surface - 50.0);
        logic.release_fish();
        assert_eq!(logic.catch_score(), 1);
        assert!(logic.caught_fish().is_none());
        assert!(!logic.fish()[0].active);
        assert_eq!(logic.summary().small_landed, 1);
    }

    #[test]
    fn test_underwater_release_swims_off() {
        let mut logic = logic(1, 0);
        sink_rod(&mut logic);
        place_on_hook(&mut logic, false, 0);
        let w = logic.fish()[0].width();
        logic.handle_catch();
        logic.release_fish();
        let fish = &logic.fish()[0];
        assert_eq!(logic.catch_score(), 0);
        assert!(fish.active && !fish.caught);
        assert_eq!(fish.width(), w);
        assert!(fish.position.x() > logic.rod().position.x());
        assert!(fish.speed.x() >= 2.0);
    }

    #[test]
    fn test_normal_hazard_penalty_floors_at_zero() {
        let mut logic = logic(1, 0);
        logic.catch_score = 1;
        place_on_hook(&mut logic, true, 0);
        logic.handle_catch();
        assert_eq!(logic.catch_score(), 0);
        assert!(!logic.hazards()[0].active);
        assert_eq!(logic.summary().hazard_hits, 1);
    }

    #[test]
    fn test_hazard_knocks_fish_off() {
        let mut logic = logic(1, 0);
        sink_rod(&mut logic);
        place_on_hook(&mut logic, false, 0);
        logic.handle_catch();
        assert!(logic.caught_fish().is_some());
        logic.catch_score = 5;
        place_on_hook(&mut logic, true, 1);
        logic.handle_catch();
        assert!(logic.caught_fish().is_none());
        assert_eq!(logic.catch_score(), 3);
    }

    #[test]
    fn test_heavy_hazard_slows_and_releases_at_surface() {
        let mut logic = logic(3, 0);
        let heavy = logic
            .hazards()
            .iter()
            .position(|h| h.kind == FloaterKind::heavy())
            .expect("day 3 has heavy hazards");
        sink_rod(&mut logic);
        logic.rod_mut().cast_down();
        place_on_hook(&mut logic, true, heavy);
        logic.handle_catch();
        assert!(logic.caught_heavy_hazard().is_some());
        let reduced = logic.rod().max_velocity() * 0.3;
        assert!((logic.rod().velocity - reduced).abs() < 1e-6);

        assert!(!logic.release_heavy_hazard());
        let surface = logic.scale().surface_line();
        logic.rod_mut().position.set_xy(512.0, surface);
        assert!(logic.release_heavy_hazard());
        assert!(logic.caught_heavy_hazard().is_none());
        assert!(!logic.hazards()[heavy].active);
    }

    #[test]
    fn test_shock_stuns() {
        let mut logic = logic(6, 0);
        let shock = logic
            .hazards()
            .iter()
            .position(|h| h.kind == FloaterKind::ShockHazard)
            .expect("day 6 has shock hazards");
        place_on_hook(&mut logic, true, shock);
        logic.handle_catch();
        assert!(logic.is_stunned());
        assert_eq!(logic.stun_end_time(), 2_000);
        assert_eq!(logic.rod().position.y(), logic.rod().min_y());
        assert!(!logic.hazards()[shock].active);
    }
}
