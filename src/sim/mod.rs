//! Fishing simulation module
//!
//! All gameplay logic for the fishing phase lives here:
//! - Time comes from an injected [`Clock`], never read directly
//! - Randomness comes from the engine's own PCG stream
//! - Pools are created once per round and never grow
//! - No rendering or platform dependencies

pub mod catch;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod floater;
pub mod logic;
pub mod rod;
pub mod scale;
pub mod spawn;
pub mod vector;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{MouthHitbox, RodHitbox, mouth_rod_overlap};
pub use difficulty::{DayTier, MAX_TIER_DAY, effective_day, tier_for_day};
pub use floater::{Floater, FloaterKind};
pub use logic::{Action, FishingLogic, Notification, RoundConfig, RoundSummary};
pub use rod::Rod;
pub use scale::ScaleContext;
pub use vector::{AXIS_X, AXIS_Y, Vector2D};
