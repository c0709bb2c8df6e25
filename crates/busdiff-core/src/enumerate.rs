//! Load enumeration against an opened case.
//!
//! The external case reader only has to answer point lookups; everything
//! else this module does is derived from that. Backends that can list the
//! loads at a bus directly should override [`CaseLoads::loads_at_bus`] —
//! the probing fallback cannot see identifiers outside the conventional
//! space.

use once_cell::sync::Lazy;

use crate::LoadRecord;

/// Conventional load identifier space, in probe order: the single digits
/// "1".."9", the uppercase letters "A".."Z", then the two-digit
/// zero-padded strings "01".."99".
static CANDIDATE_IDS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut ids = Vec::with_capacity(9 + 26 + 99);
    ids.extend((1..=9).map(|d| d.to_string()));
    ids.extend(('A'..='Z').map(String::from));
    ids.extend((1..=99).map(|n| format!("{n:02}")));
    ids
});

/// Read-only view of the loads an opened case defines.
pub trait CaseLoads {
    /// Look up one load by bus number and identifier.
    ///
    /// `None` means the case has no such load; an unknown bus number
    /// behaves like any other miss.
    fn get_load(&self, bus: usize, load_id: &str) -> Option<LoadRecord>;

    /// All loads at `bus`.
    ///
    /// The default implementation probes the conventional identifier
    /// space via [`enumerate_loads`]; identifiers outside that space are
    /// invisible to it. Backends that know the full load table should
    /// override this with a direct listing.
    fn loads_at_bus(&self, bus: usize) -> Vec<LoadRecord> {
        enumerate_loads(self, bus)
    }
}

/// Collect every load at `bus` that resolves for one of the candidate
/// identifiers, in probe order.
///
/// Each identifier is queried exactly once, so the result never repeats a
/// `(bus, load_id)` key. A miss is the expected outcome for most of the
/// space and is silently skipped.
pub fn enumerate_loads<C: CaseLoads + ?Sized>(case: &C, bus: usize) -> Vec<LoadRecord> {
    CANDIDATE_IDS
        .iter()
        .filter_map(|id| case.get_load(bus, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Megavars, Megawatts};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Accessor backed by a fixed table, recording every probe it sees.
    struct FakeCase {
        loads: HashMap<(usize, String), LoadRecord>,
        probed: RefCell<Vec<String>>,
    }

    impl FakeCase {
        fn with_ids(bus: usize, ids: &[&str]) -> Self {
            let loads = ids
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    let record = LoadRecord {
                        bus,
                        load_id: id.to_string(),
                        active_power: Megawatts(i as f64 + 1.0),
                        reactive_power: Megavars(0.0),
                        status: 1,
                    };
                    ((bus, id.to_string()), record)
                })
                .collect();
            Self {
                loads,
                probed: RefCell::new(Vec::new()),
            }
        }
    }

    impl CaseLoads for FakeCase {
        fn get_load(&self, bus: usize, load_id: &str) -> Option<LoadRecord> {
            self.probed.borrow_mut().push(load_id.to_string());
            self.loads.get(&(bus, load_id.to_string())).cloned()
        }
    }

    #[test]
    fn test_finds_exactly_the_present_ids() {
        let case = FakeCase::with_ids(42, &["3", "K", "07"]);
        let loads = enumerate_loads(&case, 42);

        let ids: Vec<&str> = loads.iter().map(|ld| ld.load_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "K", "07"]);
    }

    #[test]
    fn test_probe_order_is_digits_letters_padded() {
        // "07" sorts before "3" lexicographically but probes after it
        let case = FakeCase::with_ids(1, &["07", "Z", "2"]);
        let ids: Vec<String> = enumerate_loads(&case, 1)
            .into_iter()
            .map(|ld| ld.load_id)
            .collect();
        assert_eq!(ids, vec!["2", "Z", "07"]);
    }

    #[test]
    fn test_each_candidate_probed_exactly_once() {
        let case = FakeCase::with_ids(7, &["1"]);
        let _ = enumerate_loads(&case, 7);

        let probed = case.probed.borrow();
        assert_eq!(probed.len(), 9 + 26 + 99);
        let unique: std::collections::HashSet<&String> = probed.iter().collect();
        assert_eq!(unique.len(), probed.len());
    }

    #[test]
    fn test_unknown_bus_yields_nothing() {
        let case = FakeCase::with_ids(1, &["1", "2"]);
        assert!(enumerate_loads(&case, 999_999).is_empty());
    }

    #[test]
    fn test_trait_default_delegates_to_probing() {
        let case = FakeCase::with_ids(3, &["A"]);
        let via_trait = case.loads_at_bus(3);
        assert_eq!(via_trait.len(), 1);
        assert_eq!(via_trait[0].load_id, "A");
    }
}
