//! The four purchasing heuristics.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::board::Property;

/// Rent floor below which a demanding buyer will not bid.
const MIN_APPEALING_RENT: i64 = 50;

/// Cash a cautious buyer keeps in reserve after any purchase.
const CASH_RESERVE: i64 = 80;

/// Purchasing temperament of an automated player. Selected by name in the
/// simulation config (`strategy = "cautious"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Buys anything it can afford.
    Impulsive,
    /// Buys affordable cells only when the rent yield is high.
    Demanding,
    /// Buys only while a cash reserve survives the purchase.
    Cautious,
    /// Flips a fair coin on every affordable cell.
    Random,
}

impl StrategyKind {
    /// Whether to buy the landed, unowned property. Pure in `(balance, cost,
    /// rent)` for every variant except `Random`, which draws one coin from the
    /// shared match RNG.
    pub fn decide_to_buy<R: Rng>(self, balance: i64, property: &Property, rng: &mut R) -> bool {
        if balance < property.cost {
            return false;
        }
        match self {
            StrategyKind::Impulsive => true,
            StrategyKind::Demanding => property.rent > MIN_APPEALING_RENT,
            StrategyKind::Cautious => balance - property.cost >= CASH_RESERVE,
            StrategyKind::Random => rng.gen::<bool>(),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::Impulsive => "impulsive",
            StrategyKind::Demanding => "demanding",
            StrategyKind::Cautious => "cautious",
            StrategyKind::Random => "random",
        })
    }
}
