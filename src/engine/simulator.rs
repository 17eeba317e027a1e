//! One match: the turn-based state machine.
//!
//! Setup resets every player and clears ownership, shuffles the turn order once,
//! then rounds run until a sole survivor emerges or the round cap is hit. The
//! order of operations inside a turn is fixed: move, rent, bankruptcy check,
//! purchase decision. A player bankrupted by rent this turn must not then buy
//! the cell that bankrupted them.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::board::{Board, LAP_BONUS};
use crate::engine::error::{ConfigError, SimError};
use crate::engine::events::{EventSink, MatchEvent};
use crate::engine::player::Player;

/// Outcome of one complete match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Roster index of the winner.
    pub winner: usize,
    /// Rounds played; equals the round limit when the match timed out.
    pub rounds: u32,
    pub timed_out: bool,
}

/// Play one match to termination. Resets ownership and every player first; the
/// winner's `total_wins` is incremented before returning.
pub fn run_match(
    board: &mut Board,
    players: &mut [Player],
    round_limit: u32,
    rng: &mut StdRng,
    sink: &mut dyn EventSink,
) -> Result<MatchOutcome, SimError> {
    if players.is_empty() {
        return Err(ConfigError::EmptyRoster.into());
    }
    if round_limit == 0 {
        return Err(ConfigError::ZeroRoundLimit.into());
    }

    board.reset_ownership();
    for player in players.iter_mut() {
        player.reset();
    }

    // Turn order is drawn once and holds for the whole match.
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.shuffle(rng);

    let mut round = 0u32;
    loop {
        round += 1;
        if round > round_limit {
            let winner = timeout_winner(players);
            players[winner].total_wins += 1;
            sink.emit(MatchEvent::TimedOut {
                winner: players[winner].name.clone(),
                round: round_limit,
                balance: players[winner].balance,
            });
            return Ok(MatchOutcome {
                winner,
                rounds: round_limit,
                timed_out: true,
            });
        }

        sink.emit(MatchEvent::RoundStarted { round });
        for &idx in &order {
            if !players[idx].active {
                continue;
            }
            let roll: u8 = rng.gen_range(1..=6);
            sink.emit(MatchEvent::DiceRolled {
                player: players[idx].name.clone(),
                roll,
            });
            take_turn(board, players, idx, roll, rng, sink)?;

            // Survivor detection runs mid-round, so it always precedes the
            // round-boundary timeout check.
            if let Some(winner) = sole_survivor(players) {
                players[winner].total_wins += 1;
                sink.emit(MatchEvent::Won {
                    player: players[winner].name.clone(),
                    round,
                });
                return Ok(MatchOutcome {
                    winner,
                    rounds: round,
                    timed_out: false,
                });
            }
        }
    }
}

/// One player's turn with a known dice roll: move, rent, bankruptcy check,
/// purchase decision, in that order.
pub fn take_turn(
    board: &mut Board,
    players: &mut [Player],
    idx: usize,
    roll: u8,
    rng: &mut StdRng,
    sink: &mut dyn EventSink,
) -> Result<(), SimError> {
    let (position, passed_start) = board.advance_from(players[idx].position, roll);
    players[idx].position = position;
    if passed_start {
        players[idx].balance += LAP_BONUS;
        sink.emit(MatchEvent::PassedStart {
            player: players[idx].name.clone(),
            bonus: LAP_BONUS,
            balance: players[idx].balance,
        });
    }

    if let Some(owner) = board.cell(position).owner() {
        if owner != idx {
            if let Some(amount) = board.charge_rent(position, idx, players)? {
                sink.emit(MatchEvent::RentPaid {
                    tenant: players[idx].name.clone(),
                    owner: players[owner].name.clone(),
                    property: board.cell(position).name.clone(),
                    amount,
                    balance: players[idx].balance,
                });
            }
        }
    }

    if players[idx].balance < 0 {
        let released = liquidate(board, &mut players[idx]);
        sink.emit(MatchEvent::Bankrupted {
            player: players[idx].name.clone(),
            released,
        });
    }

    if players[idx].active && board.cell(position).is_available() {
        let wants = players[idx]
            .strategy
            .decide_to_buy(players[idx].balance, board.cell(position), rng);
        if wants {
            if board.purchase(position, idx, players)? {
                sink.emit(MatchEvent::Purchased {
                    player: players[idx].name.clone(),
                    property: board.cell(position).name.clone(),
                    cost: board.cell(position).cost,
                    balance: players[idx].balance,
                });
            } else {
                sink.emit(MatchEvent::InsufficientFunds {
                    player: players[idx].name.clone(),
                    property: board.cell(position).name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Release every owned cell back to the market and retire the player. The
/// player stays in the roster so the remaining-player count is preserved.
fn liquidate(board: &mut Board, player: &mut Player) -> usize {
    for &cell in &player.owned {
        board.release(cell);
    }
    let released = player.owned.len();
    player.owned.clear();
    player.active = false;
    released
}

/// The sole active player, if the field has narrowed to one.
fn sole_survivor(players: &[Player]) -> Option<usize> {
    let mut survivor = None;
    for (idx, player) in players.iter().enumerate() {
        if player.active {
            if survivor.is_some() {
                return None;
            }
            survivor = Some(idx);
        }
    }
    survivor
}

/// Highest-balance active player; earlier roster slots win ties.
fn timeout_winner(players: &[Player]) -> usize {
    let mut best: Option<usize> = None;
    for (idx, player) in players.iter().enumerate() {
        if !player.active {
            continue;
        }
        match best {
            Some(current) if players[current].balance >= player.balance => {}
            _ => best = Some(idx),
        }
    }
    best.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::board::PropertySpec;
    use crate::engine::config::SimConfig;
    use crate::engine::events::{NullSink, RecordingSink};
    use crate::engine::player::STARTING_BALANCE;
    use crate::engine::strategy::StrategyKind;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn spec(name: &str, cost: i64, rent: i64) -> PropertySpec {
        PropertySpec {
            name: name.into(),
            cost,
            rent,
        }
    }

    fn three_cell_board() -> Board {
        Board::new(&[
            spec("Alpha", 60, 2),
            spec("Beira", 100, 4),
            spec("Cedro", 120, 8),
        ])
        .unwrap()
    }

    #[test]
    fn impulsive_player_buys_the_cell_it_lands_on() {
        let mut board = three_cell_board();
        let mut players = vec![Player::new("impulsive", StrategyKind::Impulsive)];
        let mut sink = RecordingSink::default();

        take_turn(&mut board, &mut players, 0, 1, &mut rng(), &mut sink).unwrap();

        assert_eq!(players[0].position, 1);
        assert_eq!(players[0].balance, 200);
        assert_eq!(board.cell(1).owner(), Some(0));
        assert_eq!(players[0].owned, vec![1]);
        assert!(sink
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::Purchased { .. })));
    }

    #[test]
    fn wrapping_past_start_credits_the_lap_bonus() {
        let specs: Vec<PropertySpec> = (0..20)
            .map(|i| spec(&format!("Cell {i}"), 1000, 10))
            .collect();
        let mut board = Board::new(&specs).unwrap();
        let mut players = vec![Player::new("cautious", StrategyKind::Cautious)];
        players[0].position = 19;
        let mut sink = RecordingSink::default();

        take_turn(&mut board, &mut players, 0, 3, &mut rng(), &mut sink).unwrap();

        assert_eq!(players[0].position, 2);
        assert_eq!(players[0].balance, STARTING_BALANCE + LAP_BONUS);
        assert!(sink
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::PassedStart { .. })));
    }

    #[test]
    fn rent_bankruptcy_liquidates_before_any_purchase() {
        let mut board = Board::new(&[
            spec("Alpha", 60, 2),
            spec("Beira", 100, 400),
            spec("Cedro", 120, 8),
        ])
        .unwrap();
        let mut players = vec![
            Player::new("victim", StrategyKind::Impulsive),
            Player::new("landlord", StrategyKind::Impulsive),
        ];
        board.purchase(0, 0, &mut players).unwrap();
        board.purchase(1, 1, &mut players).unwrap();
        players[0].balance = 100;
        let landlord_before = players[1].balance;
        let mut sink = RecordingSink::default();

        take_turn(&mut board, &mut players, 0, 1, &mut rng(), &mut sink).unwrap();

        assert_eq!(players[0].balance, -300);
        assert!(!players[0].active);
        assert!(players[0].owned.is_empty());
        assert!(board.cell(0).is_available());
        assert_eq!(players[1].balance, landlord_before + 400);
        assert!(sink
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::Bankrupted { .. })));
        assert!(!sink
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::Purchased { .. })));
    }

    #[test]
    fn sole_survivor_wins_mid_round() {
        // Single-cell board: every move laps back onto the same cell, so the
        // first mover buys it and the second mover pays a ruinous rent.
        let mut board = Board::new(&[spec("Unico", 60, 500)]).unwrap();
        let mut players = vec![
            Player::new("a", StrategyKind::Impulsive),
            Player::new("b", StrategyKind::Impulsive),
        ];
        let mut rng = rng();

        let outcome = run_match(&mut board, &mut players, 100, &mut rng, &mut NullSink).unwrap();

        assert!(!outcome.timed_out);
        assert_eq!(outcome.rounds, 1);
        assert!(players[outcome.winner].active);
        assert_eq!(players[outcome.winner].total_wins, 1);
        assert_eq!(players.iter().filter(|p| p.active).count(), 1);
    }

    #[test]
    fn no_purchases_means_timeout_at_the_round_limit() {
        // Demanding players never buy rent-2 cells, so nobody ever pays rent
        // and the match must run out the clock.
        let mut board = three_cell_board();
        let mut players = vec![
            Player::new("a", StrategyKind::Demanding),
            Player::new("b", StrategyKind::Demanding),
        ];
        let mut sink = RecordingSink::default();
        let mut rng = rng();

        let outcome = run_match(&mut board, &mut players, 5, &mut rng, &mut sink).unwrap();

        assert!(outcome.timed_out);
        assert_eq!(outcome.rounds, 5);
        assert_eq!(players[outcome.winner].total_wins, 1);
        assert!(sink
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::TimedOut { .. })));
    }

    #[test]
    fn timeout_winner_takes_the_highest_balance() {
        let mut players = vec![
            Player::new("a", StrategyKind::Impulsive),
            Player::new("b", StrategyKind::Impulsive),
            Player::new("c", StrategyKind::Impulsive),
        ];
        players[0].balance = 300;
        players[1].balance = 500;
        players[2].balance = 400;
        assert_eq!(timeout_winner(&players), 1);
    }

    #[test]
    fn timeout_ties_break_toward_the_earlier_roster_slot() {
        let mut players = vec![
            Player::new("a", StrategyKind::Impulsive),
            Player::new("b", StrategyKind::Impulsive),
            Player::new("c", StrategyKind::Impulsive),
        ];
        players[0].balance = 200;
        players[1].balance = 500;
        players[2].balance = 500;
        assert_eq!(timeout_winner(&players), 1);
    }

    #[test]
    fn bankrupt_players_cannot_win_on_timeout() {
        let mut players = vec![
            Player::new("a", StrategyKind::Impulsive),
            Player::new("b", StrategyKind::Impulsive),
        ];
        players[0].balance = 900;
        players[0].active = false;
        players[1].balance = 50;
        assert_eq!(timeout_winner(&players), 1);
    }

    #[test]
    fn empty_roster_is_rejected() {
        let mut board = three_cell_board();
        let mut players: Vec<Player> = Vec::new();
        let err = run_match(&mut board, &mut players, 10, &mut rng(), &mut NullSink).unwrap_err();
        assert!(matches!(err, SimError::Config(ConfigError::EmptyRoster)));
    }

    #[test]
    fn zero_round_limit_is_rejected() {
        let mut board = three_cell_board();
        let mut players = vec![Player::new("a", StrategyKind::Impulsive)];
        let err = run_match(&mut board, &mut players, 0, &mut rng(), &mut NullSink).unwrap_err();
        assert!(matches!(err, SimError::Config(ConfigError::ZeroRoundLimit)));
    }

    #[test]
    fn total_wins_accumulates_across_matches() {
        let mut board = three_cell_board();
        let mut players = vec![Player::new("solo", StrategyKind::Impulsive)];
        let mut rng = rng();

        run_match(&mut board, &mut players, 10, &mut rng, &mut NullSink).unwrap();
        run_match(&mut board, &mut players, 10, &mut rng, &mut NullSink).unwrap();

        assert_eq!(players[0].total_wins, 2);
    }

    #[test]
    fn ownership_stays_exclusive_through_a_full_match() {
        let config = SimConfig::default();
        let mut board = Board::new(&config.board).unwrap();
        let mut players: Vec<Player> = config
            .players
            .iter()
            .map(|s| Player::new(&s.name, s.strategy))
            .collect();
        let mut rng = StdRng::seed_from_u64(11);

        run_match(&mut board, &mut players, 200, &mut rng, &mut NullSink).unwrap();

        for cell in 0..board.len() {
            if let Some(owner) = board.cell(cell).owner() {
                assert!(players[owner].owns(cell));
                assert!(players[owner].active);
            }
        }
        for (idx, player) in players.iter().enumerate() {
            for &cell in &player.owned {
                assert_eq!(board.cell(cell).owner(), Some(idx));
            }
        }
    }
}
