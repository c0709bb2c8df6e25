//! # busdiff-io: Case File Access
//!
//! Opens PSS/E RAW case files and exposes their load tables through the
//! narrow accessor contract busdiff-core defines.
//!
//! ## Design Philosophy
//!
//! **Single Responsibility**: this crate answers exactly two questions
//! about a case file — "does bus B define load ID?" and "what loads does
//! bus B define?". It is an adapter over the on-disk format, not a power
//! system model; nothing here knows about branches, generators, or
//! solving.
//!
//! **Error Recovery**: an individually malformed data record is skipped;
//! only a file that cannot be read or is structurally truncated fails the
//! open. Whether such a failure is fatal for the whole run or only for
//! one scenario is the caller's decision.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use busdiff_core::CaseLoads;
//! use busdiff_io::{Case, DEFAULT_RAW_VERSION};
//!
//! fn main() -> Result<(), busdiff_io::CaseError> {
//!     let case = Case::open("peak.raw".as_ref(), DEFAULT_RAW_VERSION)?;
//!     for load in case.loads_at_bus(888888) {
//!         println!("{}: {} / {}", load.load_id, load.active_power, load.reactive_power);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Format
//!
//! PSS/E RAW revisions 29-35. Only the header, bus, and load sections are
//! read; parsing stops at the end of the load section.

pub mod error;
pub mod raw;

pub use error::{CaseError, CaseResult};
pub use raw::{BusRecord, Case, DEFAULT_RAW_VERSION, MAX_RAW_VERSION, MIN_RAW_VERSION};
