//! Player economy across days
//!
//! Between fishing rounds the catch is sold, rent is paid and upgrades are
//! bought from the store. Paying off the loan wins the game; from then on
//! rounds are hazard-free.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PersistError, StoreError};
use crate::sim::RoundConfig;

/// Store items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// Faster reeling, unlocks medium (level 2) and big (level 4) fish
    Rod,
    /// +10 s per round
    Clock,
    /// +10% earnings
    Register,
    /// Passive income every day
    Ledger,
}

impl Upgrade {
    pub const ALL: [Upgrade; 4] = [Upgrade::Rod, Upgrade::Clock, Upgrade::Register, Upgrade::Ledger];

    pub fn price(&self) -> i32 {
        match self {
            Upgrade::Rod => ROD_PRICE,
            Upgrade::Clock => CLOCK_PRICE,
            Upgrade::Register => REGISTER_PRICE,
            Upgrade::Ledger => LEDGER_PRICE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Upgrade::Rod => "Rod",
            Upgrade::Clock => "Clock",
            Upgrade::Register => "Register",
            Upgrade::Ledger => "Ledger",
        }
    }
}

/// How the day ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOutcome {
    Continue,
    /// Broke with the loan still owed
    GameOver,
    /// Broke after paying off the loan
    SecretEnding,
}

/// End-of-day ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: i32,
    pub catch_score: u32,
    pub ledger_income: i32,
    pub gross: i32,
    pub rent: i32,
    pub profit: i32,
    pub cash: i32,
    pub loan: i32,
    pub outcome: DayOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub cash: i32,
    pub day: i32,
    pub total_fish: u32,
    pub rent: i32,
    pub loan: i32,
    pub tutorial_seen: bool,
    pub rod_level: u32,
    pub clock_level: u32,
    pub register_level: u32,
    pub ledger_level: u32,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            cash: STARTING_CASH,
            day: 1,
            total_fish: 0,
            rent: STARTING_RENT,
            loan: STARTING_LOAN,
            tutorial_seen: false,
            rod_level: 0,
            clock_level: 0,
            register_level: 0,
            ledger_level: 0,
        }
    }
}

const KEYS: [&str; 10] = [
    "cash",
    "day",
    "total_fish",
    "rent",
    "loan",
    "tutorial_seen",
    "rod_level",
    "clock_level",
    "register_level",
    "ledger_level",
];

impl PlayerData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loan_paid(&self) -> bool {
        self.loan <= 0
    }

    pub fn level(&self, upgrade: Upgrade) -> u32 {
        match upgrade {
            Upgrade::Rod => self.rod_level,
            Upgrade::Clock => self.clock_level,
            Upgrade::Register => self.register_level,
            Upgrade::Ledger => self.ledger_level,
        }
    }

    pub fn ledger_income(&self) -> i32 {
        self.ledger_level as i32 * LEDGER_INCOME
    }

    pub fn round_duration_ms(&self) -> u64 {
        ROUND_DURATION_MS + u64::from(self.clock_level) * CLOCK_UPGRADE_MS
    }

    /// Earnings multiplier from register upgrades
    pub fn earnings_multiplier(&self) -> f32 {
        1.0 + self.register_level as f32 * REGISTER_UPGRADE_VALUE
    }

    /// Sale value of a catch, rounded down
    pub fn gross_for(&self, catch_score: u32) -> i32 {
        // Tenths keep the register bonus exact
        let tenths = 10 + self.register_level as i64;
        (i64::from(catch_score) * i64::from(BASE_SCORE_MULTIPLIER) * tenths / 10) as i32
    }

    pub fn buy(&mut self, upgrade: Upgrade) -> Result<(), StoreError> {
        let price = upgrade.price();
        if self.cash < price {
            return Err(StoreError::InsufficientCash {
                needed: price,
                available: self.cash,
            });
        }
        self.cash -= price;
        match upgrade {
            Upgrade::Rod => self.rod_level += 1,
            Upgrade::Clock => self.clock_level += 1,
            Upgrade::Register => self.register_level += 1,
            Upgrade::Ledger => self.ledger_level += 1,
        }
        log::info!(
            "Bought {} upgrade (level {}), cash left ${}",
            upgrade.as_str(),
            self.level(upgrade),
            self.cash
        );
        Ok(())
    }

    /// Pay one loan installment. Returns true once the loan is cleared.
    pub fn pay_loan(&mut self) -> Result<bool, StoreError> {
        if self.loan_paid() {
            return Err(StoreError::LoanAlreadyPaid);
        }
        if self.cash < LOAN_PAYMENT {
            return Err(StoreError::InsufficientCash {
                needed: LOAN_PAYMENT,
                available: self.cash,
            });
        }
        let payment = LOAN_PAYMENT.min(self.loan);
        self.cash -= payment;
        self.loan -= payment;
        log::info!("Paid ${payment} on the loan, ${} left", self.loan);
        if self.loan_paid() {
            log::info!("Loan paid off");
        }
        Ok(self.loan_paid())
    }

    /// Engine setup for today's round
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            day: self.day,
            round_duration_ms: self.round_duration_ms(),
            rod_level: self.rod_level,
            hazard_free: self.loan_paid(),
        }
    }

    /// Sell the catch, pay rent and move to the next day
    pub fn settle_day(&mut self, catch_score: u32) -> DayReport {
        let day = self.day;
        let ledger_income = self.ledger_income();
        self.cash += ledger_income;
        self.total_fish += catch_score;

        let gross = self.gross_for(catch_score);
        let rent = self.rent;
        let profit = gross - rent;
        self.cash += profit;

        let outcome = if self.cash >= 0 {
            DayOutcome::Continue
        } else if self.loan_paid() {
            DayOutcome::SecretEnding
        } else {
            DayOutcome::GameOver
        };

        self.rent = (rent as f32 * RENT_INCREASE).round() as i32;
        self.day += 1;
        log::info!(
            "Day {day} settled: catch {catch_score}, gross ${gross}, rent ${rent}, cash ${} ({outcome:?})",
            self.cash
        );

        DayReport {
            day,
            catch_score,
            ledger_income,
            gross,
            rent,
            profit,
            cash: self.cash,
            loan: self.loan,
            outcome,
        }
    }

    pub fn to_kv_string(&self) -> String {
        let values = [
            self.cash.to_string(),
            self.day.to_string(),
            self.total_fish.to_string(),
            self.rent.to_string(),
            self.loan.to_string(),
            self.tutorial_seen.to_string(),
            self.rod_level.to_string(),
            self.clock_level.to_string(),
            self.register_level.to_string(),
            self.ledger_level.to_string(),
        ];
        KEYS.iter()
            .zip(values)
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }

    pub fn from_kv_str(text: &str) -> Result<Self, PersistError> {
        let pairs: HashMap<&str, &str> = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim(), v.trim()))
            .collect();

        Ok(Self {
            cash: field(&pairs, "cash")?,
            day: field(&pairs, "day")?,
            total_fish: field(&pairs, "total_fish")?,
            rent: field(&pairs, "rent")?,
            loan: field(&pairs, "loan")?,
            tutorial_seen: field(&pairs, "tutorial_seen")?,
            rod_level: field(&pairs, "rod_level")?,
            clock_level: field(&pairs, "clock_level")?,
            register_level: field(&pairs, "register_level")?,
            ledger_level: field(&pairs, "ledger_level")?,
        })
    }
}

fn field<T: FromStr>(pairs: &HashMap<&str, &str>, key: &'static str) -> Result<T, PersistError> {
    let value = pairs.get(key).ok_or(PersistError::MissingKey(key))?;
    value.parse().map_err(|_| PersistError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_values() {
        let player = PlayerData::new();
        assert_eq!(player.cash, 100);
        assert_eq!(player.loan, 400);
        assert_eq!(player.rent, 10);
        assert_eq!(player.round_duration_ms(), 30_000);
        assert!(!player.round_config().hazard_free);
    }

    #[test]
    fn test_buy_upgrades() {
        let mut player = PlayerData::new();
        player.buy(Upgrade::Rod).unwrap();
        player.buy(Upgrade::Clock).unwrap();
        assert_eq!(player.cash, 70);
        assert_eq!(player.round_config().rod_level, 1);
        assert_eq!(player.round_duration_ms(), 40_000);

        player.cash = 5;
        assert_eq!(
            player.buy(Upgrade::Ledger),
            Err(StoreError::InsufficientCash {
                needed: 15,
                available: 5
            })
        );
        assert_eq!(player.ledger_level, 0);
    }

    #[test]
    fn test_settle_day() {
        let mut player = PlayerData::new();
        player.register_level = 1;
        player.ledger_level = 2;
        let report = player.settle_day(5);
        // 5 * 2 * 1.1 = 11
        assert_eq!(report.gross, 11);
        assert_eq!(report.ledger_income, 4);
        assert_eq!(report.profit, 1);
        assert_eq!(player.cash, 105);
        assert_eq!(player.rent, 11);
        assert_eq!(player.day, 2);
        assert_eq!(player.total_fish, 5);
        assert_eq!(report.outcome, DayOutcome::Continue);
    }

    #[test]
    fn test_broke_outcomes() {
        let mut player = PlayerData::new();
        player.cash = 3;
        assert_eq!(player.settle_day(0).outcome, DayOutcome::GameOver);

        let mut player = PlayerData::new();
        player.cash = 3;
        player.loan = 0;
        assert_eq!(player.settle_day(0).outcome, DayOutcome::SecretEnding);
    }

    #[test]
    fn test_pay_off_loan() {
        let mut player = PlayerData::new();
        player.cash = 1_000;
        for _ in 0..15 {
            assert_eq!(player.pay_loan(), Ok(false));
        }
        assert_eq!(player.pay_loan(), Ok(true));
        assert_eq!(player.cash, 600);
        assert_eq!(player.pay_loan(), Err(StoreError::LoanAlreadyPaid));
        assert!(player.round_config().hazard_free);
    }

    #[test]
    fn test_kv_round_trip() {
        let mut player = PlayerData::new();
        player.tutorial_seen = true;
        player.ledger_level = 3;
        player.settle_day(4);
        let parsed = PlayerData::from_kv_str(&player.to_kv_string()).unwrap();
        assert_eq!(parsed, player);
    }

    #[test]
    fn test_kv_errors() {
        assert_eq!(
            PlayerData::from_kv_str("cash=10\n"),
            Err(PersistError::MissingKey("day"))
        );
        let text = PlayerData::new().to_kv_string().replace("rent=10", "rent=ten");
        assert_eq!(
            PlayerData::from_kv_str(&text),
            Err(PersistError::InvalidValue {
                key: "rent".into(),
                value: "ten".into()
            })
        );
    }
}
