//! src/state/participant.rs
//!
//! @description
//! Raffle participants and the pool they are drawn from.
//!
//! Key features:
//! - `Participant`: one address with its raffle power and derived win chance.
//! - `ParticipantPool`: the participants sorted by power, with win chances that
//!   always sum to 100 whenever the pool has any power at all.
//! - `AddressList`: the result of validating a pasted list of wallet addresses.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantStatus {
    Eligible,
    #[serde(rename = "No Raffle Power")]
    NoRafflePower,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Lower-cased wallet address.
    pub address: String,
    pub raffle_power: f64,
    /// Percentage of the pool's total raffle power. Derived; see `ParticipantPool::new`.
    #[serde(default)]
    pub win_chance: f64,
    pub status: ParticipantStatus,
}

impl Participant {
    pub fn new(address: impl Into<String>, raffle_power: f64) -> Self {
        let raffle_power = if raffle_power.is_finite() && raffle_power > 0.0 {
            raffle_power
        } else {
            0.0
        };
        let status = if raffle_power > 0.0 {
            ParticipantStatus::Eligible
        } else {
            ParticipantStatus::NoRafflePower
        };
        Self {
            address: address.into().to_lowercase(),
            raffle_power,
            win_chance: 0.0,
            status,
        }
    }

    /// A participant can only be drawn with a positive, finite raffle power.
    pub fn is_eligible(&self) -> bool {
        self.raffle_power.is_finite() && self.raffle_power > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleStats {
    pub total: usize,
    pub eligible: usize,
    pub ineligible: usize,
    pub total_raffle_power: f64,
}

/// Participants sorted by raffle power, highest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPool {
    pub participants: Vec<Participant>,
    pub stats: RaffleStats,
}

impl ParticipantPool {
    /// Builds the pool, recomputing every win chance from the pool's own total.
    pub fn new(mut participants: Vec<Participant>) -> Self {
        let total_raffle_power: f64 = participants
            .iter()
            .filter(|p| p.is_eligible())
            .map(|p| p.raffle_power)
            .sum();

        for participant in &mut participants {
            participant.win_chance = if total_raffle_power > 0.0 && participant.is_eligible() {
                participant.raffle_power / total_raffle_power * 100.0
            } else {
                0.0
            };
        }
        participants.sort_by(|a, b| b.raffle_power.total_cmp(&a.raffle_power));

        let eligible = participants.iter().filter(|p| p.is_eligible()).count();
        let stats = RaffleStats {
            total: participants.len(),
            eligible,
            ineligible: participants.len() - eligible,
            total_raffle_power,
        };
        Self { participants, stats }
    }

    pub fn eligible(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_eligible())
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Counts shown next to the address input box.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationInfo {
    /// Non-blank lines.
    pub lines: usize,
    pub valid_addresses: usize,
    pub unique_addresses: usize,
    pub duplicates: usize,
}

/// A validated address list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressList {
    /// Unique, lower-cased, in order of first appearance.
    pub addresses: Vec<String>,
    /// Trimmed lines that are not valid addresses.
    pub invalid: Vec<String>,
    pub info: ValidationInfo,
}
