//! Built-in board catalog and roster, used when no config file is given.

use once_cell::sync::Lazy;

use crate::engine::board::PropertySpec;
use crate::engine::config::PlayerSpec;
use crate::engine::strategy::StrategyKind;

fn prop(name: &str, cost: i64, rent: i64) -> PropertySpec {
    PropertySpec {
        name: name.into(),
        cost,
        rent,
    }
}

static DEFAULT_BOARD: Lazy<Vec<PropertySpec>> = Lazy::new(|| {
    vec![
        prop("Pinheiro Machado", 60, 2),
        prop("Tancredo Neves", 100, 4),
        prop("Menino Jesus", 120, 8),
        prop("Itararé", 140, 10),
        prop("Dores", 140, 10),
        prop("Lurdes", 160, 12),
        prop("Nonoai", 180, 14),
        prop("Urlândia", 180, 14),
        prop("Patronato", 200, 16),
        prop("Caturrita", 220, 18),
        prop("Divina Providência", 220, 18),
        prop("Carolina", 240, 20),
        prop("Noal", 260, 22),
        prop("São José", 260, 22),
        prop("Santa Marta", 280, 24),
        prop("Camobi", 300, 26),
        prop("Caxias", 300, 26),
        prop("Medianeira", 320, 28),
        prop("Rosário", 350, 35),
        prop("Santa Maria", 400, 50),
    ]
});

pub fn default_board() -> Vec<PropertySpec> {
    DEFAULT_BOARD.clone()
}

/// One player per strategy, named after its temperament.
pub fn default_roster() -> Vec<PlayerSpec> {
    [
        ("impulsive", StrategyKind::Impulsive),
        ("demanding", StrategyKind::Demanding),
        ("cautious", StrategyKind::Cautious),
        ("random", StrategyKind::Random),
    ]
    .into_iter()
    .map(|(name, strategy)| PlayerSpec {
        name: name.into(),
        strategy,
    })
    .collect()
}
