//! src/bin/lords-dashboard.rs
//!
//! @description
//! Command-line host for the dashboard library. Reads owner data exported by the
//! indexer as JSON and either runs a raffle draw or computes the stakers map.
//!
//! @logic
//! - `draw`: builds the participant pool from an address list (or every staker
//!   when no list is given), draws the requested categories, and prints the
//!   winners as JSON. `--csv` also writes the winners file.
//! - `layout`: packs the stakers map for a container size and prints the layout
//!   together with its initial viewport.
//! - `lords`: prints staking stats and the tokens matching the list filters.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use staking_logic::Size;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lords_dashboard::{
    aggregate_owners, all_staker_addresses, build_participants, draw_winners, filter_tokens, initial_viewport,
    pack_bubbles, parse_address_list, power_by_owner, staking_stats, validation_info_for, winners_to_csv,
    DashboardConfig, DashboardError, LordToken, OwnerRecord, PrizeCategory, Rarity, Result, TokenFilter, TokenSort,
    ValidationInfo,
};

#[derive(Parser, Debug)]
#[command(name = "lords-dashboard", about = "Wild Forest Lords staking raffle and stakers map")]
struct Cli {
    /// JSON file overriding packer and viewport tunables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct OwnerSource {
    /// JSON array of aggregated owner records.
    #[arg(long, conflicts_with = "tokens", required_unless_present = "tokens")]
    owners: Option<PathBuf>,

    /// JSON array of Lord tokens, aggregated into owners on load.
    #[arg(long)]
    tokens: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw raffle winners.
    Draw {
        #[command(flatten)]
        source: OwnerSource,

        /// One wallet address per line. Defaults to every staker.
        #[arg(long)]
        addresses: Option<PathBuf>,

        /// Prize category as `name=count`, in draw order. Repeatable.
        #[arg(long = "category", value_parser = parse_category, required = true)]
        categories: Vec<PrizeCategory>,

        #[arg(long)]
        seed: Option<u64>,

        /// Also write the winners as CSV to this file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Compute the stakers bubble map.
    Layout {
        #[command(flatten)]
        source: OwnerSource,

        #[arg(long)]
        width: f64,

        #[arg(long)]
        height: f64,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Staking stats and the filtered Lords list.
    Lords {
        /// JSON array of Lord tokens.
        #[arg(long)]
        tokens: PathBuf,

        #[arg(long)]
        specie: Option<String>,

        #[arg(long, value_parser = parse_rarity)]
        rarity: Option<Rarity>,

        /// Minimum staking duration in days.
        #[arg(long, default_value_t = 0.0)]
        min_duration: f64,

        #[arg(long)]
        only_staked: bool,

        #[arg(long, value_parser = parse_sort)]
        sort_by: Option<TokenSort>,
    },
}

fn parse_category(text: &str) -> std::result::Result<PrizeCategory, String> {
    let (name, count) = text
        .rsplit_once('=')
        .ok_or_else(|| format!("expected name=count, got `{text}`"))?;
    let count = count
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid slot count in `{text}`: {e}"))?;
    Ok(PrizeCategory::new(name.trim(), count))
}

fn parse_rarity(text: &str) -> std::result::Result<Rarity, String> {
    text.parse()
        .map_err(|_| format!("unknown rarity `{text}`; expected rare, epic, legendary or mystic"))
}

fn parse_sort(text: &str) -> std::result::Result<TokenSort, String> {
    match text {
        "duration-desc" => Ok(TokenSort::DurationHighToLow),
        "duration-asc" => Ok(TokenSort::DurationLowToHigh),
        "id-asc" => Ok(TokenSort::TokenIdAsc),
        "id-desc" => Ok(TokenSort::TokenIdDesc),
        _ => Err(format!("unknown sort `{text}`; expected duration-desc, duration-asc, id-asc or id-desc")),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_owners(source: &OwnerSource) -> Result<Vec<OwnerRecord>> {
    if let Some(path) = &source.tokens {
        let tokens: Vec<LordToken> = serde_json::from_str(&fs::read_to_string(path)?)?;
        info!(tokens = tokens.len(), "Loaded Lord tokens");
        return Ok(aggregate_owners(&tokens));
    }
    match &source.owners {
        Some(path) => {
            let owners: Vec<OwnerRecord> = serde_json::from_str(&fs::read_to_string(path)?)?;
            info!(owners = owners.len(), "Loaded owner records");
            Ok(owners)
        }
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The pasted address list when given, otherwise every staker.
fn resolve_addresses(owners: &[OwnerRecord], text: Option<&str>) -> (Vec<String>, ValidationInfo) {
    match text {
        Some(text) => {
            let list = parse_address_list(text);
            for line in &list.invalid {
                warn!(line = %line, "Skipping invalid address");
            }
            (list.addresses, list.info)
        }
        None => {
            let addresses = all_staker_addresses(owners);
            let info = validation_info_for(&addresses);
            (addresses, info)
        }
    }
}

fn run_draw(
    owners: &[OwnerRecord],
    addresses: Option<&Path>,
    categories: &[PrizeCategory],
    seed: Option<u64>,
    csv: Option<&Path>,
) -> Result<()> {
    let text = match addresses {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };
    let (addresses, info) = resolve_addresses(owners, text.as_deref());
    info!(
        lines = info.lines,
        unique = info.unique_addresses,
        duplicates = info.duplicates,
        "Address list ready"
    );

    let pool = build_participants(&addresses, &power_by_owner(owners));
    info!(
        eligible = pool.stats.eligible,
        ineligible = pool.stats.ineligible,
        total_raffle_power = pool.stats.total_raffle_power,
        "Participant pool built"
    );

    let outcome = draw_winners(&pool.participants, categories, &mut rng_from(seed))?;
    if let Some(path) = csv {
        fs::write(path, winners_to_csv(&outcome)?)?;
        info!(path = %path.display(), "Wrote winners CSV");
    }
    print_json(&outcome)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LordsReport {
    stats: lords_dashboard::StakingStats,
    lords: Vec<LordToken>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutReport<'a> {
    layout: &'a lords_dashboard::BubbleLayout,
    viewport: lords_dashboard::ViewportState,
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    match cli.command {
        Command::Draw {
            source,
            addresses,
            categories,
            seed,
            csv,
        } => {
            let owners = load_owners(&source)?;
            run_draw(&owners, addresses.as_deref(), &categories, seed, csv.as_deref())
        }
        Command::Layout {
            source,
            width,
            height,
            seed,
        } => {
            let owners = load_owners(&source)?;
            let layout = pack_bubbles(&owners, Size::new(width, height), &config.packer, &mut rng_from(seed))?;
            let viewport = initial_viewport(&layout, &config.viewport);
            print_json(&LayoutReport {
                layout: &layout,
                viewport,
            })
        }
        Command::Lords {
            tokens,
            specie,
            rarity,
            min_duration,
            only_staked,
            sort_by,
        } => {
            let tokens: Vec<LordToken> = serde_json::from_str(&fs::read_to_string(&tokens)?)?;
            let filter = TokenFilter {
                specie,
                rarity,
                min_duration,
                only_staked,
                sort_by,
            };
            print_json(&LordsReport {
                stats: staking_stats(&tokens),
                lords: filter_tokens(&tokens, &filter),
            })
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        let code = match err {
            DashboardError::NoEligibleParticipants | DashboardError::NoWinnersToExport => 2,
            _ => 1,
        };
        eprintln!("error: {err}");
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staker(address: &str, power: f64) -> OwnerRecord {
        OwnerRecord {
            address: address.into(),
            staked_count: 1,
            raffle_power: power,
            ..OwnerRecord::default()
        }
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Guarantee WL=10").unwrap(), PrizeCategory::new("Guarantee WL", 10));
        assert_eq!(parse_category(" FCFS = 3 ").unwrap(), PrizeCategory::new("FCFS", 3));
        // Only the last `=` separates the count.
        assert_eq!(parse_category("Tier=A=3").unwrap(), PrizeCategory::new("Tier=A", 3));
    }

    #[test]
    fn test_parse_category_rejects_bad_counts() {
        assert!(parse_category("Guarantee WL").is_err());
        assert!(parse_category("WL=").is_err());
        assert!(parse_category("WL=-1").is_err());
        assert!(parse_category("WL=many").is_err());
    }

    #[test]
    fn test_draw_arguments() {
        let cli = Cli::try_parse_from([
            "lords-dashboard",
            "draw",
            "--owners",
            "owners.json",
            "--category",
            "Guarantee WL=2",
            "--category",
            "FCFS WL=5",
            "--seed",
            "7",
        ])
        .unwrap();
        match cli.command {
            Command::Draw {
                source,
                addresses,
                categories,
                seed,
                csv,
            } => {
                assert_eq!(source.owners, Some(PathBuf::from("owners.json")));
                assert!(source.tokens.is_none());
                assert!(addresses.is_none());
                assert_eq!(categories.len(), 2);
                assert_eq!(categories[1], PrizeCategory::new("FCFS WL", 5));
                assert_eq!(seed, Some(7));
                assert!(csv.is_none());
            }
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn test_owner_source_is_exactly_one_of_owners_or_tokens() {
        let both = Cli::try_parse_from([
            "lords-dashboard",
            "layout",
            "--owners",
            "a.json",
            "--tokens",
            "b.json",
            "--width",
            "800",
            "--height",
            "600",
        ]);
        assert!(both.is_err());

        let neither = Cli::try_parse_from(["lords-dashboard", "layout", "--width", "800", "--height", "600"]);
        assert!(neither.is_err());

        let tokens_only = Cli::try_parse_from([
            "lords-dashboard",
            "layout",
            "--tokens",
            "b.json",
            "--width",
            "800",
            "--height",
            "600",
        ]);
        assert!(tokens_only.is_ok());
    }

    #[test]
    fn test_draw_requires_a_category() {
        let result = Cli::try_parse_from(["lords-dashboard", "draw", "--owners", "owners.json"]);
        assert!(result.is_err());
        let result = Cli::try_parse_from(["lords-dashboard", "draw", "--owners", "o.json", "--category", "WL"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lords_filter_arguments() {
        let cli = Cli::try_parse_from([
            "lords-dashboard",
            "lords",
            "--tokens",
            "lords.json",
            "--rarity",
            "Mystic",
            "--only-staked",
            "--sort-by",
            "duration-desc",
        ])
        .unwrap();
        match cli.command {
            Command::Lords {
                rarity,
                only_staked,
                sort_by,
                min_duration,
                ..
            } => {
                assert_eq!(rarity, Some(Rarity::Mystic));
                assert!(only_staked);
                assert_eq!(sort_by, Some(TokenSort::DurationHighToLow));
                assert_eq!(min_duration, 0.0);
            }
            other => panic!("parsed as {other:?}"),
        }
        let bad = Cli::try_parse_from(["lords-dashboard", "lords", "--tokens", "l.json", "--rarity", "common"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_missing_address_list_uses_every_staker() {
        let owners = vec![staker("0xa", 4.0), staker("0xb", 0.0), staker("0xc", 1.0)];
        let (addresses, info) = resolve_addresses(&owners, None);
        assert_eq!(addresses, vec!["0xa".to_string(), "0xc".to_string()]);
        assert_eq!(info.unique_addresses, 2);

        let pasted = "0x1111111111111111111111111111111111111111\nnope\n";
        let (addresses, info) = resolve_addresses(&owners, Some(pasted));
        assert_eq!(addresses, vec!["0x1111111111111111111111111111111111111111".to_string()]);
        assert_eq!(info.lines, 2);
    }
}
