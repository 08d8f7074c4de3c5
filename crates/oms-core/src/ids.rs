//! Human-readable ID prefixes.
//!
//! Integer-keyed tables get their ids from the store. Ledgers are keyed by a
//! readable `ledger_id` which is generated as `{prefix}-{8 hex chars}` when the
//! creating form leaves it blank.

pub const PREFIX_LEDGER: &str = "LED";

/// Returns true if `id` looks like a generated ledger id (`LED-xxxxxxxx`).
#[must_use]
pub fn is_generated_ledger_id(id: &str) -> bool {
    id.strip_prefix(PREFIX_LEDGER)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ledger_id_shape() {
        assert!(is_generated_ledger_id("LED-a3f8b2c1"));
        assert!(!is_generated_ledger_id("LED-a3f8"));
        assert!(!is_generated_ledger_id("VEN-a3f8b2c1"));
        assert!(!is_generated_ledger_id("LED-zzzzzzzz"));
    }
}
