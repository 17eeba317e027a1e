//! Board and property state: ownership, purchases, rent transfers, movement.

use serde::{Deserialize, Serialize};

use crate::engine::error::{ConfigError, RulesError};
use crate::engine::player::Player;

/// Currency credited when a move wraps past the start cell.
pub const LAP_BONUS: i64 = 100;

/// Roster index of a player. Ownership is tracked by handle rather than by
/// reference, so clearing it on bankruptcy or match reset is a plain assignment.
pub type PlayerIdx = usize;

/// Catalog entry for one board cell, as it appears in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    pub cost: i64,
    pub rent: i64,
}

/// A board cell in play. At most one owner at any time.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub cost: i64,
    pub rent: i64,
    owner: Option<PlayerIdx>,
}

impl Property {
    pub fn is_available(&self) -> bool {
        self.owner.is_none()
    }

    pub fn owner(&self) -> Option<PlayerIdx> {
        self.owner
    }
}

impl From<&PropertySpec> for Property {
    fn from(spec: &PropertySpec) -> Self {
        Property {
            name: spec.name.clone(),
            cost: spec.cost,
            rent: spec.rent,
            owner: None,
        }
    }
}

/// Cyclic, fixed-length sequence of properties. Immutable after construction
/// except for the ownership column.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Vec<Property>,
}

impl Board {
    pub fn new(specs: &[PropertySpec]) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyBoard);
        }
        Ok(Board {
            cells: specs.iter().map(Property::from).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> &Property {
        &self.cells[index]
    }

    /// Position arithmetic for one move. Wrapping past the last cell flags a
    /// completed lap; the caller credits the bonus and resolves rent.
    pub fn advance_from(&self, position: usize, roll: u8) -> (usize, bool) {
        let sum = position + roll as usize;
        (sum % self.cells.len(), sum >= self.cells.len())
    }

    /// Clear every owner. Runs at match setup.
    pub fn reset_ownership(&mut self) {
        for cell in &mut self.cells {
            cell.owner = None;
        }
    }

    /// Return a cell to the market. Used by bankruptcy liquidation.
    pub(crate) fn release(&mut self, index: usize) {
        self.cells[index].owner = None;
    }

    /// Transfer the purchase price and record ownership. Returns `false` when
    /// the buyer cannot afford the cell — a reported no-op, reachable only if a
    /// caller skipped the strategy check. Buying an owned cell is an invariant
    /// violation.
    pub fn purchase(
        &mut self,
        index: usize,
        buyer: PlayerIdx,
        players: &mut [Player],
    ) -> Result<bool, RulesError> {
        let cell = &mut self.cells[index];
        if cell.owner.is_some() {
            return Err(RulesError::PurchaseOwned {
                property: cell.name.clone(),
            });
        }
        if players[buyer].balance < cell.cost {
            return Ok(false);
        }
        players[buyer].balance -= cell.cost;
        cell.owner = Some(buyer);
        players[buyer].owned.push(index);
        Ok(true)
    }

    /// Move rent from tenant to owner. `None` when nobody owns the cell. The
    /// tenant's balance may go negative — that is the bankruptcy signal. Asking
    /// the owner to pay themselves is an invariant violation; the turn loop
    /// skips rent on owner-occupied cells.
    pub fn charge_rent(
        &self,
        index: usize,
        tenant: PlayerIdx,
        players: &mut [Player],
    ) -> Result<Option<i64>, RulesError> {
        let cell = &self.cells[index];
        let owner = match cell.owner {
            Some(owner) => owner,
            None => return Ok(None),
        };
        if owner == tenant {
            return Err(RulesError::RentToSelf {
                property: cell.name.clone(),
            });
        }
        players[tenant].balance -= cell.rent;
        players[owner].balance += cell.rent;
        Ok(Some(cell.rent))
    }
}
