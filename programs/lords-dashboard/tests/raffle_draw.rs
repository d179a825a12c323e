//! Raffle flow from token data to exported winners.

use std::collections::HashSet;

use lords_dashboard::{
    aggregate_owners, build_participants, draw_winners, parse_address_list, power_by_owner, winners_to_csv,
    DashboardError, LordAttributes, LordToken, Participant, ParticipantPool, PrizeCategory,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn address(i: usize) -> String {
    format!("0x{i:040x}")
}

fn lord(owner: &str, rank: &str, days: Option<f64>) -> LordToken {
    LordToken {
        token_id: format!("{owner}-{rank}"),
        name: "Lord".into(),
        owner: owner.to_uppercase().replacen("0X", "0x", 1),
        is_staked: days.is_some(),
        staking_duration: days,
        attributes: LordAttributes {
            rank: vec![rank.into()],
            specie: vec!["Owl".into()],
        },
    }
}

fn random_pool(rng: &mut StdRng, size: usize) -> ParticipantPool {
    let participants = (0..size)
        .map(|i| Participant::new(address(i), rng.gen_range(0..20) as f64))
        .collect();
    ParticipantPool::new(participants)
}

#[test]
fn test_tokens_to_csv() {
    let tokens = vec![
        lord(&address(1), "Mystic", Some(10.0)),
        lord(&address(2), "Rare", Some(3.0)),
        lord(&address(2), "Epic", None),
        lord(&address(3), "Legendary", None),
    ];
    let owners = aggregate_owners(&tokens);
    let list = parse_address_list(&format!("{}\n{}\n{}\n", address(1), address(2), address(9)));
    let pool = build_participants(&list.addresses, &power_by_owner(&owners));

    assert_eq!(pool.stats.eligible, 2);
    assert_eq!(pool.stats.total_raffle_power, 83.0);

    let mut rng = StdRng::seed_from_u64(2024);
    let categories = [
        PrizeCategory::new("Guarantee WL", 1),
        PrizeCategory::new("FCFS WL", 5),
        PrizeCategory::new("Waitlist", 3),
    ];
    let outcome = draw_winners(&pool.participants, &categories, &mut rng).unwrap();
    assert_eq!(outcome.total_winners(), 2);
    assert_eq!(outcome.categories[1].winners.len(), 1);
    assert!(outcome.categories[2].winners.is_empty());
    assert!(outcome.pool_exhausted);

    let csv = winners_to_csv(&outcome).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().skip(1).all(|line| line.contains(&address(1)) || line.contains(&address(2))));
}

#[test]
fn test_win_chances_sum_to_hundred() {
    let mut rng = StdRng::seed_from_u64(17);
    for size in [1, 5, 60, 400] {
        let pool = random_pool(&mut rng, size);
        if pool.stats.total_raffle_power == 0.0 {
            continue;
        }
        let sum: f64 = pool.participants.iter().map(|p| p.win_chance).sum();
        assert!((sum - 100.0).abs() < 1e-9, "size {size}: {sum}");
    }
}

#[test]
fn test_draws_never_repeat_an_address() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let pool = random_pool(&mut rng, 30);
        let categories = [
            PrizeCategory::new("A", rng.gen_range(0..15)),
            PrizeCategory::new("B", rng.gen_range(0..15)),
            PrizeCategory::new("C", rng.gen_range(0..15)),
        ];
        let outcome = match draw_winners(&pool.participants, &categories, &mut rng) {
            Ok(outcome) => outcome,
            Err(DashboardError::NoEligibleParticipants) => continue,
            Err(err) => panic!("unexpected error: {err}"),
        };

        let winners: Vec<&str> = outcome.winners().map(|(_, w)| w.address.as_str()).collect();
        let unique: HashSet<&str> = winners.iter().copied().collect();
        assert_eq!(unique.len(), winners.len());

        let eligible = pool.stats.eligible;
        let requested: usize = categories.iter().map(|c| c.slot_count).sum();
        assert_eq!(winners.len(), requested.min(eligible));
        assert!(outcome
            .winners()
            .all(|(_, w)| pool.participants.iter().any(|p| p.address == w.address && p.is_eligible())));
    }
}

#[test]
fn test_small_pool_fills_what_it_can() {
    let pool = ParticipantPool::new(vec![
        Participant::new(address(1), 4.0),
        Participant::new(address(2), 1.0),
        Participant::new(address(3), 2.0),
    ]);
    let mut rng = StdRng::seed_from_u64(5);
    let outcome = draw_winners(&pool.participants, &[PrizeCategory::new("WL", 10)], &mut rng).unwrap();
    assert_eq!(outcome.categories[0].winners.len(), 3);
}

#[test]
fn test_all_zero_pool_is_rejected() {
    let pool = ParticipantPool::new((0..5).map(|i| Participant::new(address(i), 0.0)).collect());
    let mut rng = StdRng::seed_from_u64(5);
    let result = draw_winners(
        &pool.participants,
        &[PrizeCategory::new("A", 2), PrizeCategory::new("B", 2)],
        &mut rng,
    );
    assert!(matches!(result, Err(DashboardError::NoEligibleParticipants)));
}

#[test]
fn test_first_pick_follows_raffle_power() {
    let pool = ParticipantPool::new(vec![
        Participant::new(address(1), 1.0),
        Participant::new(address(2), 1.0),
        Participant::new(address(3), 2.0),
    ]);
    let mut rng = StdRng::seed_from_u64(77);
    let mut heavy = 0;
    let draws = 20_000;
    for _ in 0..draws {
        let outcome = draw_winners(&pool.participants, &[PrizeCategory::new("A", 1)], &mut rng).unwrap();
        if outcome.categories[0].winners[0].address == address(3) {
            heavy += 1;
        }
    }
    let share = heavy as f64 / draws as f64;
    assert!((share - 0.5).abs() < 0.02, "heavy share {share:.3}");
}
