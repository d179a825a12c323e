//! src/instructions/draw_winners.rs
//!
//! @description
//! Draws raffle winners for a list of prize categories, weighted by raffle power
//! and without replacement across the whole draw.
//!
//! @logic
//! 1. Keeps only eligible participants. An empty pool fails the whole draw with
//!    `NoEligibleParticipants` before any category is touched.
//! 2. For each category in order:
//!    a. If the remaining pool is empty or has no power left, the draw stops here.
//!       This and every later category keep no winners, and `pool_exhausted` is set.
//!    b. Otherwise draws `min(slot_count, pool size)` winners one at a time. Each
//!       pick builds a fresh alias table over the remaining pool, samples one index,
//!       records a `Winner` snapshot and removes that participant from the pool.
//!       Table weights are the powers divided by the largest remaining power, so
//!       powers near `f64::MAX` never overflow the table total.
//! 3. The input participants are never modified.
//!
//! @dependencies
//! - `staking_logic::AliasTable`: The weighted index sampler.
//! - `rand::Rng`: Injected randomness, seeded in tests.

use rand::Rng;
use staking_logic::AliasTable;
use tracing::{info, warn};

use crate::error::{DashboardError, Result};
use crate::state::{CategoryDraw, DrawOutcome, Participant, PrizeCategory, Winner};

/// Draws winners for `categories` from `participants`.
pub fn draw_winners<R: Rng + ?Sized>(
    participants: &[Participant],
    categories: &[PrizeCategory],
    rng: &mut R,
) -> Result<DrawOutcome> {
    let mut pool: Vec<&Participant> = participants.iter().filter(|p| p.is_eligible()).collect();

    // --- Validation ---
    if pool.is_empty() {
        return Err(DashboardError::NoEligibleParticipants);
    }

    info!(
        eligible = pool.len(),
        categories = categories.len(),
        "Starting raffle draw"
    );

    let mut outcome = DrawOutcome::default();
    for category in categories {
        let mut draw = CategoryDraw {
            name: category.name.clone(),
            requested: category.slot_count,
            winners: Vec::new(),
        };

        let total_power: f64 = pool.iter().map(|p| p.raffle_power).sum();
        if outcome.pool_exhausted || pool.is_empty() || total_power <= 0.0 {
            if !outcome.pool_exhausted {
                warn!(category = %category.name, "No more eligible participants; remaining categories stay empty");
            }
            outcome.pool_exhausted = true;
            outcome.categories.push(draw);
            continue;
        }

        let picks = category.slot_count.min(pool.len());
        for _ in 0..picks {
            // Scaled by the largest power so the table's total stays finite.
            let largest = pool.iter().map(|p| p.raffle_power).fold(0.0, f64::max);
            let weights: Vec<f64> = pool.iter().map(|p| p.raffle_power / largest).collect();
            let table = AliasTable::new(&weights)?;
            let selected = pool.remove(table.sample(rng));
            draw.winners.push(Winner::from(selected));
        }

        info!(
            category = %draw.name,
            requested = draw.requested,
            drawn = draw.winners.len(),
            "Drew category winners"
        );
        outcome.categories.push(draw);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ParticipantPool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool(powers: &[f64]) -> Vec<Participant> {
        let participants = powers
            .iter()
            .enumerate()
            .map(|(i, &power)| Participant::new(format!("0x{i:040x}"), power))
            .collect();
        ParticipantPool::new(participants).participants
    }

    #[test]
    fn test_winners_are_distinct_across_categories() {
        let participants = pool(&[5.0, 1.0, 3.0, 8.0, 2.0, 2.0, 9.0, 4.0]);
        let categories = [PrizeCategory::new("Guarantee WL", 4), PrizeCategory::new("FCFS WL", 3)];
        let mut rng = StdRng::seed_from_u64(42);

        let outcome = draw_winners(&participants, &categories, &mut rng).unwrap();
        assert_eq!(outcome.categories[0].winners.len(), 4);
        assert_eq!(outcome.categories[1].winners.len(), 3);
        assert!(!outcome.pool_exhausted);

        let unique: HashSet<&str> = outcome.winners().map(|(_, w)| w.address.as_str()).collect();
        assert_eq!(unique.len(), 7);
    }

    #[test]
    fn test_insufficient_pool_exhausts_later_categories() {
        let participants = pool(&[1.0, 2.0, 3.0, 0.0]);
        let categories = [PrizeCategory::new("A", 10), PrizeCategory::new("B", 2)];
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = draw_winners(&participants, &categories, &mut rng).unwrap();
        assert_eq!(outcome.categories[0].winners.len(), 3);
        assert_eq!(outcome.categories[0].requested, 10);
        assert!(outcome.categories[1].winners.is_empty());
        assert!(outcome.pool_exhausted);
    }

    #[test]
    fn test_zero_eligible_fails_without_drawing() {
        let participants = pool(&[0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(1);
        let result = draw_winners(&participants, &[PrizeCategory::new("A", 1)], &mut rng);
        assert!(matches!(result, Err(DashboardError::NoEligibleParticipants)));
    }

    #[test]
    fn test_winner_snapshot_copies_participant() {
        let participants = pool(&[0.0, 7.0]);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = draw_winners(&participants, &[PrizeCategory::new("A", 1)], &mut rng).unwrap();
        let winner = &outcome.categories[0].winners[0];
        assert_eq!(winner.raffle_power, 7.0);
        assert!((winner.win_chance - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_heavier_participant_wins_more_often() {
        let participants = pool(&[1.0, 9.0]);
        let mut rng = StdRng::seed_from_u64(5);
        let heavy = participants[0].address.clone();
        let mut heavy_wins = 0;
        for _ in 0..5_000 {
            let outcome = draw_winners(&participants, &[PrizeCategory::new("A", 1)], &mut rng).unwrap();
            if outcome.categories[0].winners[0].address == heavy {
                heavy_wins += 1;
            }
        }
        let share = heavy_wins as f64 / 5_000.0;
        assert!((share - 0.9).abs() < 0.03, "heavy share {share:.3}");
    }

    #[test]
    fn test_zero_slot_category_draws_nothing() {
        let participants = pool(&[1.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(2);
        let categories = [PrizeCategory::new("Empty", 0), PrizeCategory::new("B", 2)];
        let outcome = draw_winners(&participants, &categories, &mut rng).unwrap();
        assert!(outcome.categories[0].winners.is_empty());
        assert_eq!(outcome.categories[1].winners.len(), 2);
    }

    #[test]
    fn test_huge_powers_still_draw() {
        let participants = pool(&[f64::MAX / 2.0, f64::MAX / 2.0, f64::MAX, 1.0]);
        let mut rng = StdRng::seed_from_u64(11);
        let outcome = draw_winners(&participants, &[PrizeCategory::new("A", 3)], &mut rng).unwrap();
        let unique: HashSet<&str> = outcome.winners().map(|(_, w)| w.address.as_str()).collect();
        assert_eq!(unique.len(), 3);
        assert!(!outcome.pool_exhausted);
    }
}
