//! src/instructions/build_participants.rs
//!
//! @description
//! Turns a pasted list of wallet addresses into the raffle's participant pool.
//!
//! @logic
//! 1. `parse_address_list` drops blank lines, trims the rest, and keeps the lines
//!    that look like `0x` followed by 40 hex digits. Addresses are lower-cased
//!    before de-duplication, so the same wallet pasted with different casing
//!    counts once.
//! 2. `build_participants` looks each address up in the owner power map. Unknown
//!    addresses get 0 power and are listed as "No Raffle Power".
//! 3. The pool recomputes win chances from its own total and sorts by power.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::state::{AddressList, OwnerRecord, Participant, ParticipantPool, ValidationInfo, ADDRESS_HEX_DIGITS};

/// Whether `line` is `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(line: &str) -> bool {
    match line.strip_prefix("0x") {
        Some(digits) => digits.len() == ADDRESS_HEX_DIGITS && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validates and de-duplicates one address per line.
pub fn parse_address_list(text: &str) -> AddressList {
    let mut list = AddressList::default();
    let mut seen: HashSet<String> = HashSet::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        list.info.lines += 1;
        if !is_valid_address(line) {
            list.invalid.push(line.to_string());
            continue;
        }
        list.info.valid_addresses += 1;
        let address = line.to_lowercase();
        if seen.insert(address.clone()) {
            list.addresses.push(address);
        }
    }

    list.info.unique_addresses = list.addresses.len();
    list.info.duplicates = list.info.valid_addresses - list.info.unique_addresses;
    debug!(
        lines = list.info.lines,
        unique = list.info.unique_addresses,
        invalid = list.invalid.len(),
        "Parsed address list"
    );
    list
}

/// Every owner with raffle power, for the "use all stakers" shortcut.
pub fn all_staker_addresses(owners: &[OwnerRecord]) -> Vec<String> {
    owners
        .iter()
        .filter(|owner| owner.raffle_power > 0.0)
        .map(|owner| owner.address.to_lowercase())
        .collect()
}

/// Builds the participant pool for `addresses` from the owner power map.
pub fn build_participants<S: AsRef<str>>(addresses: &[S], power_by_owner: &HashMap<String, f64>) -> ParticipantPool {
    let participants = addresses
        .iter()
        .map(|address| {
            let address = address.as_ref().to_lowercase();
            let power = power_by_owner.get(&address).copied().unwrap_or(0.0);
            Participant::new(address, power)
        })
        .collect();
    ParticipantPool::new(participants)
}

/// Recounts `ValidationInfo` for an address list that did not come from text,
/// such as the "all stakers" shortcut.
pub fn validation_info_for(addresses: &[String]) -> ValidationInfo {
    let unique: HashSet<String> = addresses.iter().map(|a| a.to_lowercase()).collect();
    ValidationInfo {
        lines: addresses.len(),
        valid_addresses: addresses.len(),
        unique_addresses: unique.len(),
        duplicates: addresses.len() - unique.len(),
    }
}
