//! src/instructions/export_winners.rs
//!
//! @description
//! Flattens a draw into table rows and renders them as CSV.
//!
//! Win chances are printed with 2 decimals. Small chances that would print as zero
//! get more decimals, up to 8, until a non-zero digit shows. Below 1e-8 they switch
//! to exponential notation.

use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::state::{
    DrawOutcome, WINNERS_CSV_HEADERS, WIN_CHANCE_EXPONENTIAL_BELOW, WIN_CHANCE_MAX_DECIMALS,
    WIN_CHANCE_MIN_DECIMALS,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRow {
    pub category: String,
    /// 1-based position within the category.
    pub number: usize,
    pub address: String,
    pub raffle_power: f64,
    pub win_chance: String,
}

pub fn format_win_chance(value: f64) -> String {
    if value != 0.0 && value.abs() < WIN_CHANCE_EXPONENTIAL_BELOW {
        return format!("{value:.2e}");
    }
    let mut text = String::new();
    for decimals in WIN_CHANCE_MIN_DECIMALS..=WIN_CHANCE_MAX_DECIMALS {
        text = format!("{value:.decimals$}");
        if value == 0.0 || text.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            break;
        }
    }
    text
}

/// One row per winner, in category order then draw order.
pub fn winner_rows(outcome: &DrawOutcome) -> Vec<WinnerRow> {
    outcome
        .categories
        .iter()
        .flat_map(|category| {
            category.winners.iter().enumerate().map(|(index, winner)| WinnerRow {
                category: category.name.clone(),
                number: index + 1,
                address: winner.address.clone(),
                raffle_power: winner.raffle_power,
                win_chance: format_win_chance(winner.win_chance),
            })
        })
        .collect()
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders every winner as CSV with a header line. Lines end with `\n`.
pub fn winners_to_csv(outcome: &DrawOutcome) -> Result<String> {
    // --- Validation ---
    if outcome.is_empty() {
        return Err(DashboardError::NoWinnersToExport);
    }

    let mut csv = WINNERS_CSV_HEADERS.join(",");
    csv.push('\n');
    for row in winner_rows(outcome) {
        let fields = [
            csv_field(&row.category),
            row.number.to_string(),
            csv_field(&row.address),
            row.raffle_power.to_string(),
            row.win_chance,
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CategoryDraw, Winner};

    fn winner(address: &str, power: f64, chance: f64) -> Winner {
        Winner {
            address: address.into(),
            raffle_power: power,
            win_chance: chance,
        }
    }

    #[test]
    fn test_format_win_chance() {
        assert_eq!(format_win_chance(12.3456), "12.35");
        assert_eq!(format_win_chance(0.0), "0.00");
        assert_eq!(format_win_chance(0.004), "0.004");
        assert_eq!(format_win_chance(0.000_012_3), "0.00001");
        assert_eq!(format_win_chance(0.000_000_05), "0.00000005");
        assert_eq!(format_win_chance(3.0e-9), "3.00e-9");
    }

    #[test]
    fn test_csv_layout_and_quoting() {
        let outcome = DrawOutcome {
            categories: vec![
                CategoryDraw {
                    name: "Guarantee WL".into(),
                    requested: 2,
                    winners: vec![winner("0xa", 80.0, 66.666), winner("0xb", 40.0, 33.333)],
                },
                CategoryDraw {
                    name: "Tier \"1\", extra".into(),
                    requested: 1,
                    winners: vec![winner("0xc", 1.5, 0.5)],
                },
            ],
            pool_exhausted: false,
        };
        let csv = winners_to_csv(&outcome).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Type,Number,Address,Raffle Power,Win Chance (%)");
        assert_eq!(lines[1], "Guarantee WL,1,0xa,80,66.67");
        assert_eq!(lines[2], "Guarantee WL,2,0xb,40,33.33");
        assert_eq!(lines[3], "\"Tier \"\"1\"\", extra\",1,0xc,1.5,0.50");
    }

    #[test]
    fn test_empty_outcome_cannot_be_exported() {
        let outcome = DrawOutcome {
            categories: vec![CategoryDraw {
                name: "A".into(),
                requested: 3,
                winners: vec![],
            }],
            pool_exhausted: true,
        };
        assert!(matches!(winners_to_csv(&outcome), Err(DashboardError::NoWinnersToExport)));
    }
}
