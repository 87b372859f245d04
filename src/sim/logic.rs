//! Fishing-phase engine
//!
//! Owns the floater pools and the rod for one round. The driver loop calls
//! [`FishingLogic::dispatch_input`] and then [`FishingLogic::update`] once per
//! frame from a single thread; the renderer reads the pools back afterwards.
//!
//! Per-tick order: stun expiry, rod motion, hooked floaters follow the rod,
//! round clock, spawn scheduler, floater motion, throttled catch check.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::difficulty::{effective_day, tier_for_day};
use super::floater::{Floater, FloaterKind};
use super::rod::Rod;
use super::scale::ScaleContext;
use super::vector::Vector2D;
use crate::consts::*;

/// Discretized player input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Pause toggle
    Start,
    Quit,
    MoveUp,
    MoveDown,
    Release,
    None,
}

/// Outbound events for the screen state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    PauseFishing,
    ResumeFishing,
    ReturnMenu,
}

impl Notification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Notification::PauseFishing => "PauseFishing",
            Notification::ResumeFishing => "ResumeFishing",
            Notification::ReturnMenu => "ReturnMenu",
        }
    }
}

/// Everything needed to set up a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Day number (any value; clamped onto the difficulty table)
    pub day: i32,
    pub round_duration_ms: u64,
    pub rod_level: u32,
    /// Post-victory mode: fish only
    pub hazard_free: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            day: 1,
            round_duration_ms: ROUND_DURATION_MS,
            rod_level: 0,
            hazard_free: false,
        }
    }
}

/// Tally of what happened during a round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub day: i32,
    pub catch_score: u32,
    pub small_landed: u32,
    pub medium_landed: u32,
    pub big_landed: u32,
    pub hazard_hits: u32,
    pub stuns: u32,
}

impl RoundSummary {
    pub fn fish_landed(&self) -> u32 {
        self.small_landed + self.medium_landed + self.big_landed
    }

    pub(super) fn record_landed(&mut self, kind: FloaterKind) {
        match kind {
            FloaterKind::SmallFish => self.small_landed += 1,
            FloaterKind::MediumFish => self.medium_landed += 1,
            FloaterKind::BigFish => self.big_landed += 1,
            _ => {}
        }
    }
}

type NotificationCallback = Box<dyn FnMut(Notification)>;

/// Simulation state for one fishing round
pub struct FishingLogic<C: Clock = SystemClock> {
    pub(super) running: bool,
    pub(super) paused: bool,
    pub(super) fish: Vec<Floater>,
    pub(super) hazards: Vec<Floater>,
    pub(super) rod: Rod,
    /// Index into `fish` of the hooked fish
    pub(super) caught_fish: Option<usize>,
    /// Index into `hazards` of the hooked heavy hazard
    pub(super) caught_heavy_hazard: Option<usize>,
    pub(super) stunned: bool,
    pub(super) stun_end_time: u64,
    pub(super) catch_score: u32,
    pub(super) spawn_locations: Vec<f32>,
    pub(super) round_start_time: u64,
    pub(super) elapsed_time: u64,
    pub(super) pause_start_time: Option<u64>,
    pub(super) total_pause_time: u64,
    pub(super) spawn_interval: u64,
    pub(super) last_spawn_time: u64,
    pub(super) last_check_time: u64,
    last_trace_time: u64,
    pub(super) round_duration: u64,
    pub(super) rod_level: u32,
    pub(super) scale: ScaleContext,
    pub(super) summary: RoundSummary,
    pub(super) rng: Pcg32,
    pub(super) clock: C,
    notifier: Option<NotificationCallback>,
}

impl FishingLogic<SystemClock> {
    /// Round driven by the real clock
    pub fn new(config: RoundConfig, scale: ScaleContext) -> Self {
        Self::with_clock(config, scale, SystemClock::new())
    }
}

impl<C: Clock> FishingLogic<C> {
    pub fn with_clock(config: RoundConfig, scale: ScaleContext, clock: C) -> Self {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::build(config, scale, clock, rng)
    }

    /// Reproducible spawns and speeds (tests, tuning runs)
    pub fn with_seed(config: RoundConfig, scale: ScaleContext, clock: C, seed: u64) -> Self {
        Self::build(config, scale, clock, Pcg32::seed_from_u64(seed))
    }

    fn build(config: RoundConfig, scale: ScaleContext, clock: C, rng: Pcg32) -> Self {
        let mut logic = Self {
            running: true,
            paused: false,
            fish: Vec::new(),
            hazards: Vec::new(),
            rod: Rod::new(&scale, config.rod_level),
            caught_fish: None,
            caught_heavy_hazard: None,
            stunned: false,
            stun_end_time: 0,
            catch_score: 0,
            spawn_locations: spawn_depths(&scale),
            round_start_time: 0,
            elapsed_time: 0,
            pause_start_time: None,
            total_pause_time: 0,
            spawn_interval: SPAWN_INTERVAL_MS,
            last_spawn_time: 0,
            last_check_time: 0,
            last_trace_time: 0,
            round_duration: config.round_duration_ms,
            rod_level: config.rod_level,
            scale,
            summary: RoundSummary {
                day: config.day,
                ..Default::default()
            },
            rng,
            clock,
            notifier: None,
        };
        logic.populate(config.day, config.hazard_free);
        logic.reset_round_start_time();
        logic
    }

    /// Fill the floater pools from the day's tier
    fn populate(&mut self, day: i32, hazard_free: bool) {
        let tier = tier_for_day(day);
        log::info!(
            "Initializing fishing for day {} (clamped to {})",
            day,
            effective_day(day)
        );

        let fish_kinds = [
            (FloaterKind::SmallFish, tier.small_fish),
            (FloaterKind::MediumFish, tier.medium_fish),
            (FloaterKind::BigFish, tier.big_fish),
        ];
        for (kind, count) in fish_kinds {
            self.fish
                .extend((0..count).map(|_| Floater::scaled(kind, &self.scale, 0.0)));
        }
        log::info!(
            "Fish pool: {} small, {} medium, {} big",
            tier.small_fish,
            tier.medium_fish,
            tier.big_fish
        );

        if hazard_free {
            log::info!("Creating hazard-free fishing round");
            return;
        }

        let hazard_speed =
            MAX_HAZARD_SPEED * self.scale.width_scale_factor() * tier.hazard_speed_multiplier;
        let hazard_kinds = [
            (FloaterKind::NormalHazard, tier.normal_hazards),
            (FloaterKind::heavy(), tier.heavy_hazards),
            (FloaterKind::ShockHazard, tier.shock_hazards),
        ];
        for (kind, count) in hazard_kinds {
            self.hazards
                .extend((0..count).map(|_| Floater::scaled(kind, &self.scale, hazard_speed)));
        }
        log::info!(
            "Hazard pool: {} normal, {} heavy, {} shock (speed x{})",
            tier.normal_hazards,
            tier.heavy_hazards,
            tier.shock_hazards,
            tier.hazard_speed_multiplier
        );
    }

    /// Register the handler for pause/resume/menu events
    pub fn set_callback(&mut self, callback: impl FnMut(Notification) + 'static) {
        self.notifier = Some(Box::new(callback));
    }

    fn notify(&mut self, notification: Notification) {
        if let Some(callback) = self.notifier.as_mut() {
            callback(notification);
        }
    }

    /// Apply one tick's input
    ///
    /// While stunned only [`Action::Quit`] gets through; while paused only
    /// [`Action::Start`] (resume) does.
    pub fn dispatch_input(&mut self, action: Action) {
        if self.stunned {
            match action {
                Action::Quit => {
                    log::info!("Fishing round quit by player");
                    self.running = false;
                }
                // Paused from outside mid-stun; the stun can't expire until resumed
                Action::Start if self.paused => self.resume_game(),
                _ => {}
            }
            return;
        }

        if action == Action::Start {
            if self.paused {
                self.resume_game();
            } else {
                self.pause_game();
            }
            return;
        }

        if self.paused {
            return;
        }

        match action {
            Action::Release => {
                if self.caught_fish.is_some() {
                    self.release_fish();
                } else if self.caught_heavy_hazard.is_some() {
                    self.release_heavy_hazard();
                }
            }
            Action::MoveUp => {
                match self.heavy_drag_speed() {
                    Some(speed) => self.rod.cast_up_with(speed),
                    None => self.rod.cast_up(),
                }
                self.sync_hooked_motion();
            }
            Action::MoveDown => {
                match self.heavy_drag_speed() {
                    Some(speed) => self.rod.cast_down_with(speed),
                    None => self.rod.cast_down(),
                }
                self.sync_hooked_motion();
            }
            Action::None => self.rod.stop(),
            Action::Quit => {
                log::info!("Fishing round quit by player");
                self.running = false;
            }
            Action::Start => {}
        }
    }

    /// Rod speed while dragging a heavy hazard
    fn heavy_drag_speed(&self) -> Option<f32> {
        let index = self.caught_heavy_hazard?;
        match self.hazards[index].kind {
            FloaterKind::HeavyHazard { slow_factor } => Some(self.rod.max_velocity() * slow_factor),
            _ => None,
        }
    }

    /// Hooked floater mirrors the rod's vertical motion
    fn sync_hooked_motion(&mut self) {
        let dir_y = self.rod.direction.y();
        let magnitude = self.rod.velocity.abs();
        let hooked = if let Some(i) = self.caught_fish {
            Some(&mut self.fish[i])
        } else if let Some(i) = self.caught_heavy_hazard {
            Some(&mut self.hazards[i])
        } else {
            None
        };
        if let Some(floater) = hooked {
            floater.direction[1] = dir_y;
            floater.speed.set_xy(0.0, magnitude);
        }
    }

    /// Advance the simulation by one frame
    pub fn update(&mut self) {
        if !self.running || self.paused {
            return;
        }

        let now = self.clock.now_ms();
        if self.stunned && now >= self.stun_end_time {
            self.stunned = false;
            log::debug!("Stun wore off");
        }

        self.rod.update_pos();
        self.follow_rod();

        self.refresh_elapsed(now);
        if now.saturating_sub(self.last_trace_time) > 1000 {
            log::trace!(
                "Time remaining: {}s (elapsed {}s of {}s, paused {}s)",
                self.time_remaining() / 1000,
                self.elapsed_time / 1000,
                self.round_duration / 1000,
                self.total_pause_time / 1000
            );
            self.last_trace_time = now;
        }
        if self.elapsed_time >= self.round_duration {
            log::info!(
                "Round time expired: elapsed={} duration={} score={}",
                self.elapsed_time,
                self.round_duration,
                self.catch_score
            );
            self.running = false;
            return;
        }

        if now.saturating_sub(self.last_spawn_time) > self.spawn_interval {
            self.spawn_new_floaters();
            self.spawn_hazards();
            self.last_spawn_time = now;
        }

        self.move_floaters();

        if now.saturating_sub(self.last_check_time) > CATCH_CHECK_INTERVAL_MS {
            self.handle_catch();
            self.last_check_time = now;
        }
    }

    /// Hooked floaters hang from the rod instead of swimming
    fn follow_rod(&mut self) {
        let rod_pos = self.rod.position;
        if let Some(i) = self.caught_fish {
            let fish = &mut self.fish[i];
            let x = rod_pos.x() + fish.width() / 2.0;
            fish.position.set_xy(x, rod_pos.y());
        }
        if let Some(i) = self.caught_heavy_hazard {
            self.hazards[i].position = rod_pos;
        }
    }

    fn move_floaters(&mut self) {
        let screen_w = self.scale.screen_w;
        for floater in self.fish.iter_mut().chain(self.hazards.iter_mut()) {
            if !floater.active || floater.caught {
                continue;
            }
            floater.update();
            if floater.is_out_of_bounds(screen_w) {
                floater.park();
            }
        }
    }

    fn refresh_elapsed(&mut self, now: u64) {
        self.elapsed_time = now
            .saturating_sub(self.round_start_time)
            .saturating_sub(self.total_pause_time);
    }

    /// Enter or leave pause. Paused wall-clock time never counts against the round.
    pub fn set_paused(&mut self, paused: bool) {
        if paused == self.paused {
            return;
        }
        let now = self.clock.now_ms();
        if paused {
            self.pause_start_time = Some(now);
        } else {
            if let Some(start) = self.pause_start_time.take() {
                self.total_pause_time += now.saturating_sub(start);
            }
            self.refresh_elapsed(now);
        }
        self.paused = paused;
    }

    pub fn pause_game(&mut self) {
        self.set_paused(true);
        log::debug!("Fishing paused");
        self.notify(Notification::PauseFishing);
    }

    pub fn resume_game(&mut self) {
        self.set_paused(false);
        log::debug!("Fishing resumed (total pause {}ms)", self.total_pause_time);
        self.notify(Notification::ResumeFishing);
    }

    /// Abandon the round and hand control back to the menu
    pub fn quit_to_menu(&mut self) {
        self.running = false;
        self.notify(Notification::ReturnMenu);
    }

    /// Re-anchor the round clock to now.
    ///
    /// Call this when the fishing screen actually becomes active, not just at
    /// construction; otherwise loading or popup time is charged to the round.
    pub fn reset_round_start_time(&mut self) {
        let now = self.clock.now_ms();
        self.round_start_time = now;
        self.last_spawn_time = now;
        self.elapsed_time = 0;
        self.total_pause_time = 0;
        self.pause_start_time = if self.paused { Some(now) } else { None };
        log::debug!("Round start time reset to {now}");
    }

    /// Adapt to a new window size, keeping every floater's relative placement
    ///
    /// Degenerate sizes (zero, negative, non-finite) are ignored; a minimized
    /// window keeps the last real layout.
    pub fn resize(&mut self, scale: ScaleContext) {
        if !scale.is_valid() {
            log::warn!(
                "Ignoring resize to {}x{}",
                scale.screen_w,
                scale.screen_h
            );
            return;
        }
        let old = self.scale;
        let rx = scale.screen_w / old.screen_w;
        let ry = scale.screen_h / old.screen_h;
        for floater in self.fish.iter_mut().chain(self.hazards.iter_mut()) {
            let hooked_fish = floater.caught && floater.kind.is_fish();
            if hooked_fish {
                floater.swap_dimens();
            }
            let stretch = Vector2D::new(rx, ry);
            floater.dimens = floater.dimens * stretch;
            if hooked_fish {
                floater.swap_dimens();
            }
            if floater.active {
                floater.position = floater.position * stretch;
            }
            floater.speed = floater.speed * stretch;
            floater.base_speed *= rx;
        }
        self.rod.rescale(&old, &scale, self.rod_level);
        self.spawn_locations = spawn_depths(&scale);
        self.scale = scale;
        self.follow_rod();
        log::info!("Resized fishing round to {}x{}", scale.screen_w, scale.screen_h);
    }

    pub fn fish(&self) -> &[Floater] {
        &self.fish
    }

    pub fn fish_mut(&mut self) -> &mut Vec<Floater> {
        &mut self.fish
    }

    pub fn hazards(&self) -> &[Floater] {
        &self.hazards
    }

    pub fn hazards_mut(&mut self) -> &mut Vec<Floater> {
        &mut self.hazards
    }

    pub fn rod(&self) -> &Rod {
        &self.rod
    }

    pub fn rod_mut(&mut self) -> &mut Rod {
        &mut self.rod
    }

    pub fn rod_level(&self) -> u32 {
        self.rod_level
    }

    pub fn caught_fish(&self) -> Option<&Floater> {
        self.caught_fish.map(|i| &self.fish[i])
    }

    pub fn caught_heavy_hazard(&self) -> Option<&Floater> {
        self.caught_heavy_hazard.map(|i| &self.hazards[i])
    }

    pub fn catch_score(&self) -> u32 {
        self.catch_score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned
    }

    pub fn stun_end_time(&self) -> u64 {
        self.stun_end_time
    }

    pub fn round_start_time(&self) -> u64 {
        self.round_start_time
    }

    /// Active round time in ms, as of the last tick or resume
    pub fn elapsed_time(&self) -> u64 {
        self.elapsed_time
    }

    pub fn total_pause_time(&self) -> u64 {
        self.total_pause_time
    }

    pub fn round_duration(&self) -> u64 {
        self.round_duration
    }

    pub fn time_remaining(&self) -> u64 {
        self.round_duration.saturating_sub(self.elapsed_time)
    }

    /// Candidate spawn depths, shallow to deep
    pub fn spawn_locations(&self) -> &[f32] {
        &self.spawn_locations
    }

    pub fn scale(&self) -> &ScaleContext {
        &self.scale
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            catch_score: self.catch_score,
            ..self.summary.clone()
        }
    }
}

/// Eight depths between the waterline and the bottom of the rod track
fn spawn_depths(scale: &ScaleContext) -> Vec<f32> {
    let surface = scale.surface_line();
    let h = scale.height_scale_factor();
    [50.0, 130.0, 200.0, 280.0, 330.0, 400.0, 480.0]
        .iter()
        .map(|offset| surface + offset * h)
        .chain(std::iter::once(scale.max_depth()))
        .collect()
}
