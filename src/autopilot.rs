//! Idle/demo mode: a bot that plays a fishing round
//!
//! Produces one [`Action`] per tick from the engine's public state, so the
//! same loop drives a human or the bot.

use std::cmp::Ordering;

use crate::consts::ROD_RADIUSY_PERCENT;
use crate::sim::{Action, Clock, Floater, FishingLogic};

/// How far ahead (fraction of screen width) a hazard is considered a threat
const DODGE_LOOKAHEAD_PERCENT: f32 = 0.15;

/// Pick this tick's input
pub fn next_action<C: Clock>(logic: &FishingLogic<C>) -> Action {
    if !logic.is_running() || logic.is_paused() || logic.is_stunned() {
        return Action::None;
    }

    let scale = logic.scale();
    let rod = logic.rod();
    let rod_y = rod.position.y();
    let surface = scale.surface_line();

    // Reel in whatever is on the line
    if logic.caught_fish().is_some() {
        let half_hook = scale.scale_h(ROD_RADIUSY_PERCENT) / 2.0;
        return if rod_y + half_hook < surface {
            Action::Release
        } else {
            Action::MoveUp
        };
    }
    if logic.caught_heavy_hazard().is_some() {
        return if rod_y <= surface {
            Action::Release
        } else {
            Action::MoveUp
        };
    }

    if let Some(hazard) = incoming_hazard(logic) {
        let hazard_mid = hazard.position.y() + hazard.height() / 2.0;
        let go_up = hazard_mid >= rod_y;
        return match (go_up, rod_y <= rod.min_y(), rod_y >= rod.max_y()) {
            (true, false, _) | (false, _, true) => Action::MoveUp,
            _ => Action::MoveDown,
        };
    }

    // Chase the closest catchable fish, otherwise hover mid-water
    let target_y = target_fish(logic)
        .map(|fish| fish.position.y() + fish.height() / 2.0)
        .or_else(|| {
            let depths = logic.spawn_locations();
            depths.get(depths.len() / 2).copied()
        });

    match target_y {
        Some(y) if y < rod_y - rod.max_velocity() => Action::MoveUp,
        Some(y) if y > rod_y + rod.max_velocity() => Action::MoveDown,
        _ => Action::None,
    }
}

/// Horizontal distance from a floater's mouth to the hook, if it is swimming
/// towards it
fn approach_distance(floater: &Floater, rod_x: f32) -> Option<f32> {
    let mouth = floater.mouth_hitbox();
    let mouth_mid = mouth.x + mouth.size / 2.0;
    let gap = rod_x - mouth_mid;
    if gap * floater.direction.x() >= 0.0 {
        Some(gap.abs())
    } else {
        None
    }
}

fn target_fish<C: Clock>(logic: &FishingLogic<C>) -> Option<&Floater> {
    let rod_x = logic.rod().position.x();
    let rod_level = logic.rod_level();
    logic
        .fish()
        .iter()
        .filter(|f| f.active && !f.caught && f.kind.catchable_with(rod_level))
        .filter_map(|f| approach_distance(f, rod_x).map(|d| (f, d)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(f, _)| f)
}

/// Nearest hazard about to cross the hook at its current depth
fn incoming_hazard<C: Clock>(logic: &FishingLogic<C>) -> Option<&Floater> {
    let scale = logic.scale();
    let rod_x = logic.rod().position.x();
    let rod_y = logic.rod().position.y();
    let lookahead = scale.scale_w(DODGE_LOOKAHEAD_PERCENT);
    let reach = scale.scale_h(ROD_RADIUSY_PERCENT) * 2.0;
    logic
        .hazards()
        .iter()
        .filter(|h| h.active && !h.caught)
        .filter(|h| {
            let top = h.position.y() - reach;
            let bottom = h.position.y() + h.height() + reach;
            rod_y >= top && rod_y <= bottom
        })
        .filter_map(|h| approach_distance(h, rod_x).map(|d| (h, d)))
        .filter(|(_, d)| *d <= lookahead)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(h, _)| h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ManualClock, RoundConfig, ScaleContext};

    fn logic(day: i32) -> FishingLogic<ManualClock> {
        let config = RoundConfig {
            day,
            ..Default::default()
        };
        FishingLogic::with_seed(config, ScaleContext::new(1024.0, 768.0), ManualClock::new(0), 5)
    }

    #[test]
    fn test_chases_fish_below() {
        let mut logic = logic(1);
        let fish = &mut logic.fish_mut()[0];
        fish.active = true;
        fish.direction.set_xy(1.0, 1.0);
        fish.position.set_xy(100.0, 650.0);
        assert_eq!(next_action(&logic), Action::MoveDown);
    }

    #[test]
    fn test_ignores_fish_swimming_away() {
        let mut logic = logic(1);
        let fish = &mut logic.fish_mut()[0];
        fish.active = true;
        fish.direction.set_xy(1.0, 1.0);
        fish.position.set_xy(900.0, 650.0);
        assert_eq!(target_fish(&logic).map(|f| f.position.x()), None);
    }

    #[test]
    fn test_reels_in_and_releases() {
        let mut logic = logic(1);
        logic.rod_mut().position.set_xy(512.0, 600.0);
        let rod = logic.rod().position;
        let fish = &mut logic.fish_mut()[0];
        fish.active = true;
        fish.direction.set_xy(1.0, 1.0);
        fish.speed.set_xy(0.0, 0.0);
        let size = fish.height() / 2.0;
        let (w, h) = (fish.width(), fish.height());
        fish.position
            .set_xy(rod.x() - w + size / 2.0 + 5.0, rod.y() - h / 2.0);
        logic.handle_catch();
        assert!(logic.caught_fish().is_some());
        assert_eq!(next_action(&logic), Action::MoveUp);

        logic.rod_mut().position.set_xy(512.0, 300.0);
        assert_eq!(next_action(&logic), Action::Release);
    }

    #[test]
    fn test_dodges_hazard_at_depth() {
        let mut logic = logic(1);
        let rod_y = logic.rod().position.y();
        let hazard = &mut logic.hazards_mut()[0];
        hazard.active = true;
        hazard.direction.set_xy(-1.0, 0.0);
        hazard.position.set_xy(560.0, rod_y - 5.0);
        assert_eq!(next_action(&logic), Action::MoveUp);
    }

    #[test]
    fn test_idle_when_paused() {
        let mut logic = logic(1);
        logic.pause_game();
        assert_eq!(next_action(&logic), Action::None);
    }
}
