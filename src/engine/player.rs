//! Player state: long-lived identity plus match-scoped game state.

use crate::engine::strategy::StrategyKind;

/// Balance every player starts a match with.
pub const STARTING_BALANCE: i64 = 300;

/// One participant. The identity (`name`, `strategy`, `total_wins`) lives for
/// the whole simulation run; everything else is reinitialized by [`Player::reset`]
/// at the start of each match.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub strategy: StrategyKind,
    /// Board cell index, always `< board.len()`.
    pub position: usize,
    /// May go negative transiently; that is the bankruptcy signal, not an error.
    pub balance: i64,
    /// Board cell indices currently owned.
    pub owned: Vec<usize>,
    /// False once bankrupt; the player stays in the roster but takes no turns.
    pub active: bool,
    pub total_wins: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: StrategyKind) -> Self {
        Player {
            name: name.into(),
            strategy,
            position: 0,
            balance: STARTING_BALANCE,
            owned: Vec::new(),
            active: true,
            total_wins: 0,
        }
    }

    /// Match-scoped reset; the win counter survives across matches.
    pub fn reset(&mut self) {
        self.position = 0;
        self.balance = STARTING_BALANCE;
        self.owned.clear();
        self.active = true;
    }

    pub fn owns(&self, cell: usize) -> bool {
        self.owned.contains(&cell)
    }
}
