//! PSS/E RAW case reading.
//!
//! Reads only what a load comparison needs: the case identification
//! header, the bus section, and the load section. Parsing stops at the
//! end of the load section; generators, branches, and everything after
//! are never interpreted.
//!
//! Section layout follows the RAW revision 29-35 convention: three header
//! lines, then record sections each terminated by a line whose data part
//! is a bare `0` (usually written `0 / END OF ... DATA`). Trailing
//! `/ comment` text is stripped before a line is parsed. Individually
//! malformed records are skipped; a file missing a section terminator is
//! rejected as truncated.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use busdiff_core::{CaseLoads, LoadKey, LoadRecord, Megavars, Megawatts};

use crate::error::{CaseError, CaseResult};

/// RAW revision assumed when the caller does not say otherwise.
pub const DEFAULT_RAW_VERSION: u32 = 35;
/// Oldest RAW revision the section reader accepts.
pub const MIN_RAW_VERSION: u32 = 29;
/// Newest RAW revision the section reader accepts.
pub const MAX_RAW_VERSION: u32 = 35;

/// One bus record, as far as this tool reads it.
#[derive(Debug, Clone)]
pub struct BusRecord {
    pub number: usize,
    pub name: String,
}

/// An opened case: the buses and loads one RAW file defines.
///
/// A `Case` is an immutable snapshot of the file at open time. Comparing
/// against another case means opening that file as a fresh `Case`; the
/// previous one is simply dropped.
#[derive(Debug)]
pub struct Case {
    path: PathBuf,
    raw_version: u32,
    buses: HashMap<usize, BusRecord>,
    loads: HashMap<LoadKey, LoadRecord>,
    /// Keys in file order, for direct listing.
    load_order: Vec<LoadKey>,
}

#[derive(Debug, PartialEq)]
enum Section {
    Bus,
    Load,
    Done,
}

impl Case {
    /// Open a RAW case file.
    ///
    /// `raw_version` must be within 29..=35; the bus and load sections
    /// this reader extracts are laid out identically across that span.
    pub fn open(path: &Path, raw_version: u32) -> CaseResult<Case> {
        if !(MIN_RAW_VERSION..=MAX_RAW_VERSION).contains(&raw_version) {
            return Err(CaseError::UnsupportedVersion {
                version: raw_version,
            });
        }

        let contents = fs::read_to_string(path).map_err(|source| CaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = contents.lines();
        // case identification line plus two title lines
        for _ in 0..3 {
            if lines.next().is_none() {
                return Err(parse_error(path, "missing case identification header"));
            }
        }

        let mut buses = HashMap::new();
        let mut loads: HashMap<LoadKey, LoadRecord> = HashMap::new();
        let mut load_order = Vec::new();
        let mut section = Section::Bus;

        for raw_line in lines {
            let line = raw_line.split('/').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line == "0" {
                section = match section {
                    Section::Bus => Section::Load,
                    Section::Load | Section::Done => Section::Done,
                };
                if section == Section::Done {
                    break;
                }
                continue;
            }

            match section {
                Section::Bus => {
                    if let Some(bus) = parse_bus_line(line) {
                        buses.insert(bus.number, bus);
                    }
                }
                Section::Load => {
                    if let Some(load) = parse_load_line(line) {
                        let key = load.key();
                        // duplicate (bus, id) records keep the first occurrence
                        if !loads.contains_key(&key) {
                            load_order.push(key.clone());
                            loads.insert(key, load);
                        }
                    }
                }
                Section::Done => {}
            }
        }

        if section != Section::Done {
            let which = match section {
                Section::Bus => "bus data not terminated",
                _ => "load data not terminated",
            };
            return Err(parse_error(path, which));
        }

        Ok(Case {
            path: path.to_path_buf(),
            raw_version,
            buses,
            loads,
            load_order,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw_version(&self) -> u32 {
        self.raw_version
    }

    pub fn num_buses(&self) -> usize {
        self.buses.len()
    }

    pub fn num_loads(&self) -> usize {
        self.loads.len()
    }

    /// Name of a bus, when the case defines it.
    pub fn bus_name(&self, bus: usize) -> Option<&str> {
        self.buses.get(&bus).map(|b| b.name.as_str())
    }
}

impl CaseLoads for Case {
    fn get_load(&self, bus: usize, load_id: &str) -> Option<LoadRecord> {
        let key = LoadKey {
            bus,
            id: load_id.to_string(),
        };
        self.loads.get(&key).cloned()
    }

    /// Direct listing in file order; the load table is fully indexed at
    /// open time, so identifier probing is unnecessary here.
    fn loads_at_bus(&self, bus: usize) -> Vec<LoadRecord> {
        self.load_order
            .iter()
            .filter(|key| key.bus == bus)
            .map(|key| self.loads[key].clone())
            .collect()
    }
}

fn parse_error(path: &Path, message: &str) -> CaseError {
    CaseError::Parse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn trim_quotes(field: &str) -> &str {
    field.trim_matches('"').trim_matches('\'').trim()
}

/// Bus record: I, 'NAME', BASKV, ... — only number and name are read.
fn parse_bus_line(line: &str) -> Option<BusRecord> {
    let columns: Vec<&str> = line.split(',').map(str::trim).collect();
    if columns.len() < 2 {
        return None;
    }

    let number = columns[0].parse::<usize>().ok()?;
    let name = trim_quotes(columns[1]).to_string();

    Some(BusRecord { number, name })
}

/// Load record: I, ID, STAT, AREA, ZONE, PL, QL, ... — columns past QL
/// are ignored.
fn parse_load_line(line: &str) -> Option<LoadRecord> {
    let columns: Vec<&str> = line.split(',').map(str::trim).collect();
    if columns.len() < 7 {
        return None;
    }

    let bus = columns[0].parse::<usize>().ok()?;
    let load_id = trim_quotes(columns[1]).to_string();
    if load_id.is_empty() {
        return None;
    }
    let status = columns[2].parse::<i32>().ok()?;
    let active_power = columns[5].parse::<f64>().ok()?;
    let reactive_power = columns[6].parse::<f64>().ok()?;

    Some(LoadRecord {
        bus,
        load_id,
        active_power: Megawatts(active_power),
        reactive_power: Megavars(reactive_power),
        status,
    })
}
