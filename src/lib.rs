//! Fishing Day - a real-time fishing arcade game core
//!
//! Core modules:
//! - `sim`: Fishing-phase simulation (floaters, rod, catch resolution, round clock)
//! - `player`: Cross-round economy (cash, rent, loan, store upgrades)
//! - `settings`: Resolution and runtime configuration
//! - `autopilot`: Idle/demo bot that plays a round
//!
//! Rendering, UI widgets and the screen state machine live outside this crate.
//! They drive [`sim::FishingLogic`] through [`sim::Action`] inputs and read its
//! entity pools back for drawing.

pub mod autopilot;
pub mod error;
pub mod player;
pub mod settings;
pub mod sim;

pub use error::{PersistError, SimError, StoreError};
pub use player::{DayOutcome, DayReport, PlayerData, Upgrade};
pub use settings::{ResolutionPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Reference resolution the speed/size scale factors are relative to
    pub const REFERENCE_WIDTH: f32 = 1024.0;
    pub const REFERENCE_HEIGHT: f32 = 768.0;

    /// Base round length (ms); each clock upgrade adds `CLOCK_UPGRADE_MS`
    pub const ROUND_DURATION_MS: u64 = 30_000;
    pub const CLOCK_UPGRADE_MS: u64 = 10_000;

    /// Rod track and hitbox, as fractions of screen height/width
    pub const ROD_MAX_LENGTH_PERCENT: f32 = 0.99;
    pub const ROD_MIN_LENGTH_PERCENT: f32 = 0.195;
    pub const ROD_RADIUSX_PERCENT: f32 = 0.005;
    pub const ROD_RADIUSY_PERCENT: f32 = 0.02;
    /// Rod speed in pixels per tick at reference height
    pub const ROD_SPEED: f32 = 2.0;
    /// Rod speed bonus per rod level
    pub const ROD_LEVEL_SPEED_STEP: f32 = 0.1;
    /// Catch hitbox is slightly larger than the drawn rod
    pub const ROD_HITBOX_SCALE: f32 = 1.2;

    /// Floater speeds in pixels per tick at reference width
    pub const MAX_FISH_SPEED: i32 = 4;
    pub const MAX_MEDIUM_FISH_SPEED: i32 = 5;
    pub const MAX_BIG_FISH_SPEED: i32 = 6;
    pub const MAX_HAZARD_SPEED: f32 = 2.0;
    /// Width of the randomized fish speed band below the max
    pub const FISH_SPEED_BAND: i32 = 2;

    /// Per-kind hazard speed factors applied at creation
    pub const NORMAL_HAZARD_SPEED_FACTOR: f32 = 2.5;
    pub const HEAVY_HAZARD_SPEED_FACTOR: f32 = 0.75;
    pub const SHOCK_HAZARD_SPEED_FACTOR: f32 = 1.25;
    pub const HEAVY_HAZARD_SLOW_FACTOR: f32 = 0.3;

    /// Floater sizes as fractions of screen width/height
    pub const FISH_WIDTH_PERCENT: f32 = 0.065;
    pub const FISH_HEIGHT_PERCENT: f32 = 0.035;
    pub const MEDIUM_FISH_WIDTH_PERCENT: f32 = 0.08;
    pub const MEDIUM_FISH_HEIGHT_PERCENT: f32 = 0.05;
    pub const BIG_FISH_WIDTH_PERCENT: f32 = 0.1;
    pub const BIG_FISH_HEIGHT_PERCENT: f32 = 0.06;
    pub const HAZARD_WIDTH_PERCENT: f32 = 0.1;
    pub const HAZARD_HEIGHT_PERCENT: f32 = 0.04;
    pub const HEAVY_HAZARD_WIDTH_PERCENT: f32 = 0.11;
    pub const HEAVY_HAZARD_HEIGHT_PERCENT: f32 = 0.1;
    pub const SHOCK_HAZARD_WIDTH_PERCENT: f32 = 0.07;
    pub const SHOCK_HAZARD_HEIGHT_PERCENT: f32 = 0.15;

    /// Waterline as a fraction of screen height
    pub const SURFACE_POND_PERCENT: f32 = 0.54;
    /// Fish never spawn closer than this to the waterline (pixels)
    pub const SPAWN_SURFACE_MARGIN: f32 = 10.0;
    /// Inactive floaters wait here
    pub const PARK_POSITION: (f32, f32) = (-100.0, -100.0);

    /// Scheduler and catch-check cadence (ms)
    pub const SPAWN_INTERVAL_MS: u64 = 2_000;
    pub const CATCH_CHECK_INTERVAL_MS: u64 = 80;
    pub const STUN_DURATION_MS: u64 = 2_000;

    /// Mouth hitbox sits this far inside the floater's leading edge
    pub const MOUTH_INSET: f32 = 5.0;

    /// Rod levels that unlock bigger fish
    pub const MEDIUM_FISH_ROD_LEVEL: u32 = 2;
    pub const BIG_FISH_ROD_LEVEL: u32 = 4;
    /// Score lost on any hazard contact
    pub const HAZARD_PENALTY: u32 = 2;

    /// Store prices and economy
    pub const ROD_PRICE: i32 = 20;
    pub const CLOCK_PRICE: i32 = 10;
    pub const LEDGER_PRICE: i32 = 15;
    pub const REGISTER_PRICE: i32 = 10;
    pub const LOAN_PAYMENT: i32 = 25;
    pub const BASE_SCORE_MULTIPLIER: i32 = 2;
    pub const RENT_INCREASE: f32 = 1.05;
    pub const REGISTER_UPGRADE_VALUE: f32 = 0.1;
    pub const LEDGER_INCOME: i32 = 2;
    pub const STARTING_CASH: i32 = 100;
    pub const STARTING_LOAN: i32 = 400;
    pub const STARTING_RENT: i32 = 10;
}
