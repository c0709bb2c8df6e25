//! # busdiff-core: Bus Load Comparison Core
//!
//! Data model and the two routines everything else in busdiff wraps:
//! enumerating the loads a case defines at a bus, and diffing two load
//! collections keyed by `(bus, load_id)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use busdiff_core::{compare_load_sets, LoadRecord, Megavars, Megawatts};
//!
//! let base = vec![LoadRecord {
//!     bus: 1,
//!     load_id: "A".to_string(),
//!     active_power: Megawatts(10.0),
//!     reactive_power: Megavars(5.0),
//!     status: 1,
//! }];
//! let scenario = vec![LoadRecord {
//!     status: 0,
//!     ..base[0].clone()
//! }];
//!
//! let diff = compare_load_sets(&base, &scenario);
//! assert_eq!(diff.changed.len(), 1);
//! assert!(diff.only_base.is_empty());
//! ```
//!
//! ## Core Data Structures
//!
//! - [`LoadRecord`] - One load at one bus in one case snapshot
//! - [`LoadKey`] - The `(bus, load_id)` identity of a load across cases
//! - [`LoadDiff`] - Changed / base-only / scenario-only partition
//!
//! ## Modules
//!
//! - [`enumerate`] - The [`CaseLoads`] accessor seam and candidate-id probing
//! - [`compare`] - The set comparator
//! - [`units`] - Compile-time power-unit newtypes
//!
//! ## Integration with busdiff-io
//!
//! The busdiff-io crate opens PSS/E RAW files and implements [`CaseLoads`]
//! for the opened case, so everything here stays free of I/O.

use serde::{Deserialize, Serialize};

pub mod compare;
pub mod enumerate;
pub mod units;

pub use compare::{compare_load_sets, ChangedLoad, LoadDiff, POWER_TOLERANCE};
pub use enumerate::{enumerate_loads, CaseLoads};
pub use units::{Megavars, Megawatts};

/// Identity of a load across cases.
///
/// Two records describe "the same load" iff their keys match; they may
/// still differ in power draw or status. The derived `Ord` sorts by bus
/// number, then lexicographically by identifier, which is the order the
/// comparator emits its only-base / only-scenario groups in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadKey {
    pub bus: usize,
    pub id: String,
}

/// One electrical load at one bus in one case snapshot.
///
/// Immutable once built; constructed fresh per case and discarded after
/// the comparison that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    pub bus: usize,
    /// Short identifier, unique per bus within a case.
    pub load_id: String,
    /// Active power demand (MW)
    pub active_power: Megawatts,
    /// Reactive power demand (Mvar)
    pub reactive_power: Megavars,
    /// In-service flag (0 = out of service)
    pub status: i32,
}

impl LoadRecord {
    /// The `(bus, load_id)` identity of this record.
    pub fn key(&self) -> LoadKey {
        LoadKey {
            bus: self.bus,
            id: self.load_id.clone(),
        }
    }

    pub fn is_in_service(&self) -> bool {
        self.status != 0
    }
}
