//! src/state/owner.rs
//!
//! @description
//! Token and owner records as they arrive from the indexer, plus the aggregation
//! that turns a flat token list into one `OwnerRecord` per wallet.
//!
//! @logic
//! 1. A token's raffle power is 0 unless it is staked and has a known rarity.
//!    Otherwise it is the rarity multiplier times the staking duration in days,
//!    or the bare multiplier when the duration is 0 or unknown.
//! 2. Owners are keyed by lower-cased address. Each record counts total tokens,
//!    tokens per rarity and staked tokens, and sums the raffle power.
//! 3. The aggregated list is sorted by raffle power, highest first. Ties keep the
//!    order in which the owners first appeared.
//! 4. Staking stats count staked tokens, distinct staking wallets and the mean
//!    staking duration rounded to whole days (0 when nothing is staked).
//! 5. The token filter matches specie and rarity case-insensitively. Unstaked
//!    tokens pass only when `only_staked` is off; staked tokens must reach
//!    `min_duration`.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lord rarity tiers, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Rare,
    Epic,
    Legendary,
    Mystic,
}

impl Rarity {
    /// Raffle power multiplier for a staked token of this rarity.
    pub fn multiplier(self) -> f64 {
        match self {
            Rarity::Rare => 1.0,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 4.0,
            Rarity::Mystic => 8.0,
        }
    }
}

impl FromStr for Rarity {
    type Err = ();

    fn from_str(rank: &str) -> Result<Self, Self::Err> {
        match rank.trim().to_ascii_lowercase().as_str() {
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            "mystic" => Ok(Rarity::Mystic),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LordAttributes {
    #[serde(default)]
    pub rank: Vec<String>,
    #[serde(default)]
    pub specie: Vec<String>,
}

/// One Lord NFT with its staking status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LordToken {
    pub token_id: String,
    #[serde(default)]
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub is_staked: bool,
    /// Days staked. `None` when the staking contract has no record.
    #[serde(default)]
    pub staking_duration: Option<f64>,
    #[serde(default)]
    pub attributes: LordAttributes,
}

impl LordToken {
    /// Rarity taken from the first rank attribute.
    pub fn rarity(&self) -> Option<Rarity> {
        self.attributes.rank.first()?.parse().ok()
    }

    pub fn raffle_power(&self) -> f64 {
        if !self.is_staked {
            return 0.0;
        }
        let Some(rarity) = self.rarity() else {
            return 0.0;
        };
        match self.staking_duration {
            Some(days) if days > 0.0 => rarity.multiplier() * days,
            _ => rarity.multiplier(),
        }
    }
}

/// Aggregated holdings of one wallet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRecord {
    /// Lower-cased wallet address.
    pub address: String,
    #[serde(default)]
    pub total_lords: u32,
    #[serde(alias = "staked")]
    pub staked_count: u32,
    #[serde(default)]
    pub rare: u32,
    #[serde(default)]
    pub epic: u32,
    #[serde(default)]
    pub legendary: u32,
    #[serde(default)]
    pub mystic: u32,
    #[serde(default)]
    pub raffle_power: f64,
}

impl OwnerRecord {
    fn new(address: String) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    fn add_token(&mut self, token: &LordToken) {
        self.total_lords += 1;
        match token.rarity() {
            Some(Rarity::Rare) => self.rare += 1,
            Some(Rarity::Epic) => self.epic += 1,
            Some(Rarity::Legendary) => self.legendary += 1,
            Some(Rarity::Mystic) => self.mystic += 1,
            None => {}
        }
        if token.is_staked {
            self.staked_count += 1;
        }
        self.raffle_power += token.raffle_power();
    }
}

/// Headline numbers for the owners page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStats {
    pub unique_owners: usize,
    pub highest_lord_count: u32,
    pub highest_lord_owner: String,
}

/// Groups `tokens` by owner and sorts the result by raffle power, highest first.
pub fn aggregate_owners(tokens: &[LordToken]) -> Vec<OwnerRecord> {
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut owners: Vec<OwnerRecord> = Vec::new();

    for token in tokens {
        let address = token.owner.trim().to_lowercase();
        let index = *index_of.entry(address.clone()).or_insert_with(|| {
            owners.push(OwnerRecord::new(address));
            owners.len() - 1
        });
        owners[index].add_token(token);
    }

    owners.sort_by(|a, b| b.raffle_power.total_cmp(&a.raffle_power));
    owners
}

/// Address to raffle power lookup used when building raffle participants.
pub fn power_by_owner(owners: &[OwnerRecord]) -> HashMap<String, f64> {
    owners
        .iter()
        .map(|owner| (owner.address.to_lowercase(), owner.raffle_power))
        .collect()
}

/// The first owner with the most tokens wins ties.
pub fn owner_stats(owners: &[OwnerRecord]) -> OwnerStats {
    let mut stats = OwnerStats {
        unique_owners: owners.len(),
        ..OwnerStats::default()
    };
    for owner in owners {
        if owner.total_lords > stats.highest_lord_count {
            stats.highest_lord_count = owner.total_lords;
            stats.highest_lord_owner = owner.address.clone();
        }
    }
    stats
}

/// Headline numbers for the Lords page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingStats {
    pub unique_stakers: usize,
    pub total_staked: usize,
    /// Mean staking duration in whole days.
    pub average_duration: f64,
}

pub fn staking_stats(tokens: &[LordToken]) -> StakingStats {
    let staked: Vec<&LordToken> = tokens.iter().filter(|t| t.is_staked).collect();
    if staked.is_empty() {
        return StakingStats::default();
    }
    let stakers: HashSet<String> = staked.iter().map(|t| t.owner.trim().to_lowercase()).collect();
    let total_duration: f64 = staked
        .iter()
        .map(|t| t.staking_duration.filter(|d| d.is_finite()).unwrap_or(0.0))
        .sum();
    StakingStats {
        unique_stakers: stakers.len(),
        total_staked: staked.len(),
        average_duration: (total_duration / staked.len() as f64).round(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenSort {
    DurationHighToLow,
    DurationLowToHigh,
    TokenIdAsc,
    TokenIdDesc,
}

/// Filters of the Lords list. `None` means "all".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenFilter {
    pub specie: Option<String>,
    pub rarity: Option<Rarity>,
    /// Minimum staking duration in days for staked tokens.
    pub min_duration: f64,
    pub only_staked: bool,
    pub sort_by: Option<TokenSort>,
}

impl TokenFilter {
    pub fn matches(&self, token: &LordToken) -> bool {
        if self.only_staked && !token.is_staked {
            return false;
        }
        if let Some(specie) = &self.specie {
            let token_specie = token.attributes.specie.first().map(|s| s.trim().to_lowercase());
            if token_specie.as_deref() != Some(specie.trim().to_lowercase().as_str()) {
                return false;
            }
        }
        if let Some(rarity) = self.rarity {
            if token.rarity() != Some(rarity) {
                return false;
            }
        }
        !token.is_staked || token.staking_duration.unwrap_or(0.0) >= self.min_duration
    }
}

fn token_number(token: &LordToken) -> u64 {
    token.token_id.trim().parse().unwrap_or(0)
}

/// Staked tokens first, by duration; unstaked tokens keep their order at the end.
fn by_duration(a: &LordToken, b: &LordToken, descending: bool) -> Ordering {
    match (a.is_staked, b.is_staked) {
        (false, false) => Ordering::Equal,
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (true, true) => {
            let (a, b) = (a.staking_duration.unwrap_or(0.0), b.staking_duration.unwrap_or(0.0));
            if descending {
                b.total_cmp(&a)
            } else {
                a.total_cmp(&b)
            }
        }
    }
}

/// Tokens matching `filter`, sorted by `filter.sort_by` when set.
pub fn filter_tokens(tokens: &[LordToken], filter: &TokenFilter) -> Vec<LordToken> {
    let mut matched: Vec<LordToken> = tokens.iter().filter(|t| filter.matches(t)).cloned().collect();
    match filter.sort_by {
        Some(TokenSort::DurationHighToLow) => matched.sort_by(|a, b| by_duration(a, b, true)),
        Some(TokenSort::DurationLowToHigh) => matched.sort_by(|a, b| by_duration(a, b, false)),
        Some(TokenSort::TokenIdAsc) => matched.sort_by_key(token_number),
        Some(TokenSort::TokenIdDesc) => matched.sort_by_key(|t| std::cmp::Reverse(token_number(t))),
        None => {}
    }
    matched
}
