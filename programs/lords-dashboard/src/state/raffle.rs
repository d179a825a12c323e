//! src/state/raffle.rs
//!
//! @description
//! Prize categories and the winners drawn for them.
//!
//! A draw walks the categories in the order given. Winners are removed from the pool
//! as they are drawn, so one address can win at most once per draw, across all
//! categories.

use serde::{Deserialize, Serialize};

use super::participant::Participant;

/// A prize tier, such as "Guarantee WL" or "FCFS WL".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeCategory {
    pub name: String,
    pub slot_count: usize,
}

impl PrizeCategory {
    pub fn new(name: impl Into<String>, slot_count: usize) -> Self {
        Self {
            name: name.into(),
            slot_count,
        }
    }
}

/// Snapshot of a participant at the moment they were drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub address: String,
    pub raffle_power: f64,
    /// Win chance over the whole participant pool, not the pool left at draw time.
    pub win_chance: f64,
}

impl From<&Participant> for Winner {
    fn from(participant: &Participant) -> Self {
        Self {
            address: participant.address.clone(),
            raffle_power: participant.raffle_power,
            win_chance: participant.win_chance,
        }
    }
}

/// Winners of one category, in draw order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraw {
    pub name: String,
    /// Slots asked for. May exceed `winners.len()` when the pool ran dry.
    pub requested: usize,
    pub winners: Vec<Winner>,
}

/// Result of one draw, aligned with the categories it was given.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOutcome {
    pub categories: Vec<CategoryDraw>,
    /// Set when some category stopped early because nobody eligible was left.
    pub pool_exhausted: bool,
}

impl DrawOutcome {
    pub fn total_winners(&self) -> usize {
        self.categories.iter().map(|c| c.winners.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_winners() == 0
    }

    /// Every winner with its category name, in category then draw order.
    pub fn winners(&self) -> impl Iterator<Item = (&str, &Winner)> {
        self.categories
            .iter()
            .flat_map(|c| c.winners.iter().map(move |w| (c.name.as_str(), w)))
    }
}
