//! Fishing Day headless runner
//!
//! Plays whole days with the autopilot on a simulated clock: fish a round,
//! settle the books, shop, repeat. Useful for balancing and smoke tests.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use fishing_day::autopilot::next_action;
use fishing_day::consts::LOAN_PAYMENT;
use fishing_day::sim::{FishingLogic, ManualClock, RoundSummary};
use fishing_day::{DayOutcome, DayReport, PlayerData, Settings, Upgrade};

/// Stop buying rod levels once big fish are unlocked
const ROD_LEVEL_GOAL: u32 = 4;

#[derive(Parser, Debug)]
#[command(name = "fishing-day")]
#[command(about = "Run fishing days headless with the autopilot")]
struct Cli {
    /// Window width (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,
    /// Window height (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,
    /// Flat key=value settings file
    #[arg(long, default_value = "game_config.txt")]
    config: PathBuf,
    /// Day to start on
    #[arg(long, default_value_t = 1)]
    day: i32,
    /// Number of days to play
    #[arg(long, default_value_t = 1)]
    days: u32,
    /// Starting rod level
    #[arg(long)]
    rod_level: Option<u32>,
    /// Fish-only rounds
    #[arg(long)]
    hazard_free: bool,
    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,
    /// Print one JSON object per day
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct DayLine<'a> {
    report: &'a DayReport,
    summary: &'a RoundSummary,
    rod_level: u32,
    loan_paid: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.config);
    if cli.width.is_some() {
        settings.width = cli.width;
    }
    if cli.height.is_some() {
        settings.height = cli.height;
    }
    settings.hazard_free |= cli.hazard_free;
    let (w, h) = settings.dimensions();
    log::info!("Fishing Day starting at {w}x{h}, {} ticks/s", settings.tick_rate);

    let mut player = PlayerData {
        day: cli.day,
        rod_level: cli.rod_level.unwrap_or(0),
        ..PlayerData::default()
    };

    for _ in 0..cli.days {
        let summary = play_round(&player, &settings, cli.seed);
        let report = player.settle_day(summary.catch_score);
        if report.outcome == DayOutcome::Continue {
            shop(&mut player);
        }
        print_day(&report, &summary, &player, cli.json);
        if report.outcome != DayOutcome::Continue {
            log::info!("Run over: {:?}", report.outcome);
            break;
        }
    }
}

/// Fish one round on a simulated clock
fn play_round(player: &PlayerData, settings: &Settings, seed: Option<u64>) -> RoundSummary {
    let mut config = player.round_config();
    config.hazard_free |= settings.hazard_free;
    let clock = ManualClock::new(0);
    let scale = settings.scale_context();
    let mut logic = match seed {
        Some(seed) => {
            FishingLogic::with_seed(config, scale, clock.clone(), seed.wrapping_add(player.day as u64))
        }
        None => FishingLogic::with_clock(config, scale, clock.clone()),
    };

    let tick_ms = settings.tick_period_ms();
    let max_ticks = config.round_duration_ms / tick_ms + 1;
    for _ in 0..=max_ticks {
        if !logic.is_running() {
            break;
        }
        let action = next_action(&logic);
        logic.dispatch_input(action);
        logic.update();
        clock.advance(tick_ms);
    }
    logic.summary()
}

/// Spend spare cash: rod upgrades first, then loan payments, always keeping
/// tomorrow's rent in hand
fn shop(player: &mut PlayerData) {
    while player.rod_level < ROD_LEVEL_GOAL && player.cash - Upgrade::Rod.price() >= player.rent {
        if let Err(err) = player.buy(Upgrade::Rod) {
            log::warn!("Store refused rod upgrade: {err}");
            break;
        }
    }
    while !player.loan_paid() && player.cash - LOAN_PAYMENT >= player.rent {
        if let Err(err) = player.pay_loan() {
            log::warn!("Loan payment refused: {err}");
            break;
        }
    }
}

fn print_day(report: &DayReport, summary: &RoundSummary, player: &PlayerData, json: bool) {
    if json {
        let line = DayLine {
            report,
            summary,
            rod_level: player.rod_level,
            loan_paid: player.loan_paid(),
        };
        match serde_json::to_string(&line) {
            Ok(text) => println!("{text}"),
            Err(err) => log::error!("Failed to serialize day report: {err}"),
        }
        return;
    }

    println!(
        "Day {:>3}: caught {:>2} ({} small, {} medium, {} big), hazards {}, stuns {}",
        report.day,
        report.catch_score,
        summary.small_landed,
        summary.medium_landed,
        summary.big_landed,
        summary.hazard_hits,
        summary.stuns
    );
    println!(
        "         gross ${}, rent ${}, profit ${}, cash ${}, loan ${}, rod level {}",
        report.gross, report.rent, report.profit, player.cash, player.loan, player.rod_level
    );
}
