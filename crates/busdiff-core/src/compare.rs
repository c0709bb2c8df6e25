//! Set comparison between two load collections.
//!
//! Records are matched by `(bus, load_id)` key; a pair present on both
//! sides is flagged changed when P, Q, or status differ. P and Q are
//! floating point straight out of a case file, so they are compared with
//! an absolute tolerance rather than exact equality.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{LoadKey, LoadRecord};

/// Absolute tolerance for P/Q equality, in MW / Mvar. Differences at or
/// below this are treated as equal.
pub const POWER_TOLERANCE: f64 = 1e-6;

/// A load present in both cases whose P, Q, or status differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedLoad {
    pub base: LoadRecord,
    pub scenario: LoadRecord,
}

/// Partition of one scenario's loads against BASE.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadDiff {
    /// Key present on both sides, at least one field differs. Sorted by key.
    pub changed: Vec<ChangedLoad>,
    /// Keys only in BASE, ascending by `(bus, load_id)`.
    pub only_base: Vec<LoadRecord>,
    /// Keys only in the scenario, ascending by `(bus, load_id)`.
    pub only_scenario: Vec<LoadRecord>,
}

impl LoadDiff {
    /// True when the two sides agree on every load.
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty() && self.only_base.is_empty() && self.only_scenario.is_empty()
    }
}

fn differs(base: &LoadRecord, scenario: &LoadRecord) -> bool {
    (base.active_power.value() - scenario.active_power.value()).abs() > POWER_TOLERANCE
        || (base.reactive_power.value() - scenario.reactive_power.value()).abs() > POWER_TOLERANCE
        || base.status != scenario.status
}

/// Compare two load collections (BASE vs scenario) keyed by `(bus, load_id)`.
///
/// Duplicate keys within one input are collapsed last-write-wins while
/// building the per-side lookup. Inputs are not mutated; the result is
/// deterministic, with every group sorted ascending by key.
pub fn compare_load_sets(base: &[LoadRecord], scenario: &[LoadRecord]) -> LoadDiff {
    let base_by_key: BTreeMap<LoadKey, &LoadRecord> =
        base.iter().map(|ld| (ld.key(), ld)).collect();
    let scenario_by_key: BTreeMap<LoadKey, &LoadRecord> =
        scenario.iter().map(|ld| (ld.key(), ld)).collect();

    let mut diff = LoadDiff::default();
    for (key, base_load) in &base_by_key {
        match scenario_by_key.get(key) {
            Some(scenario_load) if differs(base_load, scenario_load) => {
                diff.changed.push(ChangedLoad {
                    base: (*base_load).clone(),
                    scenario: (*scenario_load).clone(),
                });
            }
            Some(_) => {}
            None => diff.only_base.push((*base_load).clone()),
        }
    }
    for (key, scenario_load) in &scenario_by_key {
        if !base_by_key.contains_key(key) {
            diff.only_scenario.push((*scenario_load).clone());
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Megavars, Megawatts};

    fn load(bus: usize, id: &str, p: f64, q: f64, status: i32) -> LoadRecord {
        LoadRecord {
            bus,
            load_id: id.to_string(),
            active_power: Megawatts(p),
            reactive_power: Megavars(q),
            status,
        }
    }

    #[test]
    fn test_disjoint_key_sets() {
        let base = vec![load(2, "B", 1.0, 0.0, 1), load(1, "A", 1.0, 0.0, 1)];
        let scenario = vec![load(3, "Z", 2.0, 0.0, 1), load(3, "C", 2.0, 0.0, 1)];

        let diff = compare_load_sets(&base, &scenario);
        assert!(diff.changed.is_empty());

        let base_ids: Vec<(usize, &str)> = diff
            .only_base
            .iter()
            .map(|ld| (ld.bus, ld.load_id.as_str()))
            .collect();
        assert_eq!(base_ids, vec![(1, "A"), (2, "B")]);

        let scen_ids: Vec<(usize, &str)> = diff
            .only_scenario
            .iter()
            .map(|ld| (ld.bus, ld.load_id.as_str()))
            .collect();
        assert_eq!(scen_ids, vec![(3, "C"), (3, "Z")]);
    }

    #[test]
    fn test_identical_copies_compare_clean() {
        let loads = vec![load(1, "A", 10.0, 5.0, 1), load(1, "B", 2.0, 1.0, 0)];
        let diff = compare_load_sets(&loads, &loads.clone());
        assert!(diff.is_unchanged());
    }

    #[test]
    fn test_tolerance_boundary() {
        // anchored at zero so the P difference is exact in f64
        let base = vec![load(1, "A", 0.0, 5.0, 1)];

        // difference of exactly 1e-6 is NOT a change
        let at_tolerance = vec![load(1, "A", 1e-6, 5.0, 1)];
        assert!(compare_load_sets(&base, &at_tolerance).is_unchanged());

        // strictly past the tolerance is
        let past_tolerance = vec![load(1, "A", 1.000_001_1e-6, 5.0, 1)];
        let diff = compare_load_sets(&base, &past_tolerance);
        assert_eq!(diff.changed.len(), 1);
    }

    #[test]
    fn test_status_mismatch_alone_is_a_change() {
        let base = vec![load(1, "A", 10.0, 5.0, 1)];
        let scenario = vec![load(1, "A", 10.0, 5.0, 0)];
        let diff = compare_load_sets(&base, &scenario);
        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].base.status, 1);
        assert_eq!(diff.changed[0].scenario.status, 0);
    }

    #[test]
    fn test_power_mismatch_alone_is_a_change() {
        let base = vec![load(1, "A", 10.0, 5.0, 1)];
        let p_shift = vec![load(1, "A", 11.0, 5.0, 1)];
        let q_shift = vec![load(1, "A", 10.0, 5.5, 1)];
        assert_eq!(compare_load_sets(&base, &p_shift).changed.len(), 1);
        assert_eq!(compare_load_sets(&base, &q_shift).changed.len(), 1);
    }

    #[test]
    fn test_output_sorted_despite_scrambled_input() {
        let base = vec![
            load(9, "2", 1.0, 0.0, 1),
            load(1, "B", 1.0, 0.0, 1),
            load(1, "A", 1.0, 0.0, 1),
        ];
        let diff = compare_load_sets(&base, &[]);
        let keys: Vec<(usize, &str)> = diff
            .only_base
            .iter()
            .map(|ld| (ld.bus, ld.load_id.as_str()))
            .collect();
        assert_eq!(keys, vec![(1, "A"), (1, "B"), (9, "2")]);
    }

    #[test]
    fn test_changed_sorted_by_key() {
        let base = vec![load(2, "A", 1.0, 0.0, 1), load(1, "A", 1.0, 0.0, 1)];
        let scenario = vec![load(1, "A", 2.0, 0.0, 1), load(2, "A", 2.0, 0.0, 1)];
        let diff = compare_load_sets(&base, &scenario);
        let buses: Vec<usize> = diff.changed.iter().map(|c| c.base.bus).collect();
        assert_eq!(buses, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let base = vec![load(1, "A", 1.0, 0.0, 1), load(1, "A", 99.0, 0.0, 1)];
        let scenario = vec![load(1, "A", 99.0, 0.0, 1)];
        assert!(compare_load_sets(&base, &scenario).is_unchanged());
    }

    #[test]
    fn test_end_to_end_partition() {
        let base = vec![load(1, "A", 10.0, 5.0, 1), load(1, "B", 2.0, 1.0, 1)];
        let scenario = vec![load(1, "A", 10.0, 5.0, 0), load(1, "C", 3.0, 0.0, 1)];

        let diff = compare_load_sets(&base, &scenario);

        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].base.load_id, "A");
        assert_eq!(diff.changed[0].scenario.status, 0);

        assert_eq!(diff.only_base.len(), 1);
        assert_eq!(diff.only_base[0].load_id, "B");

        assert_eq!(diff.only_scenario.len(), 1);
        assert_eq!(diff.only_scenario[0].load_id, "C");
    }
}
