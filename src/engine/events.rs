//! Narrative events and pluggable sinks.
//!
//! Every state-changing moment of a match is emitted as a typed event. This is
//! an observability side channel: sinks may drop events without affecting
//! simulation outcomes.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    RoundStarted {
        round: u32,
    },
    DiceRolled {
        player: String,
        roll: u8,
    },
    PassedStart {
        player: String,
        bonus: i64,
        balance: i64,
    },
    RentPaid {
        tenant: String,
        owner: String,
        property: String,
        amount: i64,
        balance: i64,
    },
    Purchased {
        player: String,
        property: String,
        cost: i64,
        balance: i64,
    },
    /// The defensive purchase path: the buyer passed the strategy check but
    /// could not pay. Reported, not an error.
    InsufficientFunds {
        player: String,
        property: String,
    },
    Bankrupted {
        player: String,
        released: usize,
    },
    Won {
        player: String,
        round: u32,
    },
    TimedOut {
        winner: String,
        round: u32,
        balance: i64,
    },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchEvent::RoundStarted { round } => write!(f, "round {round}"),
            MatchEvent::DiceRolled { player, roll } => write!(f, "{player} rolled a {roll}"),
            MatchEvent::PassedStart {
                player,
                bonus,
                balance,
            } => write!(
                f,
                "{player} passed start and collected ${bonus} (balance ${balance})"
            ),
            MatchEvent::RentPaid {
                tenant,
                owner,
                property,
                amount,
                balance,
            } => write!(
                f,
                "{tenant} paid ${amount} rent to {owner} for {property} (balance ${balance})"
            ),
            MatchEvent::Purchased {
                player,
                property,
                cost,
                balance,
            } => write!(
                f,
                "{player} bought {property} for ${cost} (balance ${balance})"
            ),
            MatchEvent::InsufficientFunds { player, property } => {
                write!(f, "{player} cannot afford {property}")
            }
            MatchEvent::Bankrupted { player, released } => write!(
                f,
                "{player} went bankrupt and returned {released} properties to the market"
            ),
            MatchEvent::Won { player, round } => write!(f, "{player} won in round {round}"),
            MatchEvent::TimedOut {
                winner,
                round,
                balance,
            } => write!(
                f,
                "no survivor after {round} rounds; {winner} wins on balance ${balance}"
            ),
        }
    }
}

/// Where narrative events go.
pub trait EventSink {
    fn emit(&mut self, event: MatchEvent);
}

/// Forwards each narrative line to `tracing` at INFO.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: MatchEvent) {
        tracing::info!(target: "narrative", "{event}");
    }
}

/// Swallows every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: MatchEvent) {}
}

/// Buffers events for inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<MatchEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: MatchEvent) {
        self.events.push(event);
    }
}
