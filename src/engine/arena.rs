//! Trial runner: N independent matches and their aggregated statistics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::board::Board;
use crate::engine::config::{PlayerSpec, SimConfig};
use crate::engine::error::SimError;
use crate::engine::events::{EventSink, NullSink, TracingSink};
use crate::engine::player::Player;
use crate::engine::simulator::{run_match, MatchOutcome};
use crate::engine::strategy::StrategyKind;

/// Aggregated results from a trial run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialResult {
    pub num_trials: usize,
    /// The roster the trials were played with, in seat order.
    pub roster: Vec<PlayerSpec>,
    /// Win counts keyed by player name.
    pub wins: HashMap<String, usize>,
    /// Rounds to termination, one entry per trial.
    pub round_counts: Vec<u32>,
    /// Matches that hit the round cap without a sole survivor.
    pub timeouts: usize,
}

impl TrialResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_trials.max(1) as f64
    }

    pub fn mean_rounds(&self) -> f64 {
        if self.round_counts.is_empty() {
            return 0.0;
        }
        self.round_counts.iter().map(|&r| r as f64).sum::<f64>() / self.round_counts.len() as f64
    }

    /// Win counts folded by strategy, for rosters fielding a strategy more
    /// than once.
    pub fn wins_by_strategy(&self) -> HashMap<StrategyKind, usize> {
        let mut totals = HashMap::new();
        for spec in &self.roster {
            *totals.entry(spec.strategy).or_insert(0) +=
                *self.wins.get(&spec.name).unwrap_or(&0);
        }
        totals
    }

    /// The player with the most wins; earlier seats win ties.
    pub fn champion(&self) -> Option<&PlayerSpec> {
        let mut best: Option<(&PlayerSpec, usize)> = None;
        for spec in &self.roster {
            let wins = *self.wins.get(&spec.name).unwrap_or(&0);
            match best {
                Some((_, top)) if top >= wins => {}
                _ => best = Some((spec, wins)),
            }
        }
        best.map(|(spec, _)| spec)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Trial Results ({} matches)", self.num_trials)];
        lines.push("=".repeat(60));
        for spec in &self.roster {
            let wins = *self.wins.get(&spec.name).unwrap_or(&0);
            lines.push(format!(
                "  {:>12}: {:4} wins ({:5.1}%)  strategy={}",
                spec.name,
                wins,
                self.win_rate(&spec.name) * 100.0,
                spec.strategy,
            ));
        }
        lines.push(format!(
            "  Timed out: {} of {}  |  Avg match: {:.1} rounds",
            self.timeouts,
            self.num_trials,
            self.mean_rounds(),
        ));
        if let Some(champion) = self.champion() {
            let wins = *self.wins.get(&champion.name).unwrap_or(&0);
            lines.push(format!("  Champion: {} with {} wins", champion.name, wins));
        }
        lines.join("\n")
    }
}

/// Run `config.trials` independent matches and aggregate their outcomes.
///
/// Trial `i` plays on private board/roster copies with its own RNG stream
/// seeded `base_seed + i`, so a run is reproducible and the sequential and
/// parallel paths produce identical results. Win counters are merged into the
/// long-lived roster in a single-threaded pass after all matches finish.
pub fn run_trials(
    config: &SimConfig,
    base_seed: u64,
    narrate: bool,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> Result<TrialResult, SimError> {
    config.validate()?;
    let board = Board::new(&config.board)?;
    let roster: Vec<Player> = config
        .players
        .iter()
        .map(|spec| Player::new(&spec.name, spec.strategy))
        .collect();

    tracing::info!(
        trials = config.trials,
        round_limit = config.round_limit,
        parallel = config.parallel,
        "starting trial run"
    );

    let play_trial = |trial: usize| -> Result<MatchOutcome, SimError> {
        let mut board = board.clone();
        let mut players = roster.clone();
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
        let mut sink: Box<dyn EventSink> = if narrate {
            Box::new(TracingSink)
        } else {
            Box::new(NullSink)
        };
        run_match(
            &mut board,
            &mut players,
            config.round_limit,
            &mut rng,
            sink.as_mut(),
        )
    };

    let outcomes: Vec<MatchOutcome> = if config.parallel {
        let completed = AtomicUsize::new(0);
        (0..config.trials)
            .into_par_iter()
            .map(|trial| {
                let outcome = play_trial(trial);
                if let Some(cb) = progress_callback {
                    cb(completed.fetch_add(1, Ordering::Relaxed) + 1, config.trials);
                }
                outcome
            })
            .collect::<Result<Vec<_>, SimError>>()?
    } else {
        let mut collected = Vec::with_capacity(config.trials);
        for trial in 0..config.trials {
            collected.push(play_trial(trial)?);
            if let Some(cb) = progress_callback {
                cb(trial + 1, config.trials);
            }
        }
        collected
    };

    let mut players = roster;
    let mut round_counts = Vec::with_capacity(outcomes.len());
    let mut timeouts = 0;
    for outcome in &outcomes {
        players[outcome.winner].total_wins += 1;
        round_counts.push(outcome.rounds);
        if outcome.timed_out {
            timeouts += 1;
        }
    }

    let wins = players
        .iter()
        .map(|player| (player.name.clone(), player.total_wins as usize))
        .collect();

    Ok(TrialResult {
        num_trials: config.trials,
        roster: config.players.clone(),
        wins,
        round_counts,
        timeouts,
    })
}
