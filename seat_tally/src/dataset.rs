use log::{debug, info, warn};
use snafu::OptionExt;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::records::*;
use crate::winners::resolve;

pub const COL_STATE: &str = "State";
pub const COL_PC_NO: &str = "PC No";
pub const COL_PC_NAME: &str = "PC Name";
pub const COL_SERIAL: &str = "Sl no";
pub const COL_CANDIDATE: &str = "Candidate";
pub const COL_PARTY: &str = "Party";
pub const COL_TOTAL_VOTES: &str = "Total Votes";

/// The columns every input table must carry, in the order of the published results.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_STATE,
    COL_PC_NO,
    COL_PC_NAME,
    COL_SERIAL,
    COL_CANDIDATE,
    COL_PARTY,
    COL_TOTAL_VOTES,
];

/// The loaded results: every usable row, and the winner of each constituency.
///
/// A `Dataset` is immutable once loaded. It is meant to be wrapped in an `Arc`
/// and shared by any number of sessions.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    records: Vec<VoteRecord>,
    winners: BTreeMap<ConstituencyKey, VoteRecord>,
    // state -> constituency names
    constituencies: BTreeMap<String, BTreeSet<String>>,
    dropped_rows: usize,
}

// Position of each required column in the raw rows.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    state: usize,
    pc_no: usize,
    pc_name: usize,
    serial: usize,
    candidate: usize,
    party: usize,
    total_votes: usize,
}

#[derive(Debug)]
enum Rejection {
    Votes(String),
    Serial(String),
}

impl ColumnIndex {
    fn find(headers: &[String]) -> Result<ColumnIndex, DatasetError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        debug!("ColumnIndex::find: headers: {:?}", normalized);
        let position = |column: &str| -> Result<usize, DatasetError> {
            let wanted = normalize_header(column);
            normalized
                .iter()
                .position(|h| *h == wanted)
                .context(MissingColumnSnafu {
                    column,
                    found: headers.to_vec(),
                })
        };
        Ok(ColumnIndex {
            state: position(COL_STATE)?,
            pc_no: position(COL_PC_NO)?,
            pc_name: position(COL_PC_NAME)?,
            serial: position(COL_SERIAL)?,
            candidate: position(COL_CANDIDATE)?,
            party: position(COL_PARTY)?,
            total_votes: position(COL_TOTAL_VOTES)?,
        })
    }

    fn read(&self, row: &[String]) -> Result<VoteRecord, Rejection> {
        let cell = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");
        let votes = cell(self.total_votes);
        let total_votes = parse_votes(votes).ok_or_else(|| Rejection::Votes(votes.to_string()))?;
        let serial = cell(self.serial);
        let serial_no = parse_count(serial)
            .and_then(|x| u32::try_from(x).ok())
            .ok_or_else(|| Rejection::Serial(serial.to_string()))?;
        Ok(VoteRecord {
            state: cell(self.state).to_string(),
            constituency_code: cell(self.pc_no).to_string(),
            constituency_name: cell(self.pc_name).to_string(),
            serial_no,
            candidate: cell(self.candidate).to_string(),
            party: cell(self.party).to_string(),
            total_votes,
        })
    }
}

/// Trims, collapses inner whitespace and lowercases a column header.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Reads a vote count out of a cell.
///
/// Any finite non-negative number is accepted, fractional ones included.
/// Empty cells, text, `NaN`, infinities and negative numbers are `None`: the
/// row is unusable.
pub fn parse_votes(cell: &str) -> Option<f64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        // -0 is read as 0
        Ok(f) if f.is_finite() && f >= 0.0 => Some(if f == 0.0 { 0.0 } else { f }),
        _ => None,
    }
}

/// Reads a serial number out of a cell.
///
/// Accepts non-negative integers, and floating point notations of them
/// (`"12.0"`, `"1e1"`). Everything else is `None`: the row is unusable.
pub fn parse_count(cell: &str) -> Option<u64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(x) = s.parse::<u64>() {
        return Some(x);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => {
            Some(f as u64)
        }
        _ => None,
    }
}

fn code_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl Dataset {
    /// Loads a raw table.
    ///
    /// Fails if one of the [`REQUIRED_COLUMNS`] cannot be found. Rows with an
    /// unreadable vote count or serial number are dropped for good: they are not
    /// part of any lookup, tally or winner computation.
    pub fn load(table: &RawTable) -> Result<Dataset, DatasetError> {
        let columns = ColumnIndex::find(&table.headers)?;

        let mut records: Vec<VoteRecord> = Vec::with_capacity(table.rows.len());
        let mut dropped_rows = 0;
        for (idx, row) in table.rows.iter().enumerate() {
            match columns.read(row) {
                Ok(record) => records.push(record),
                Err(rejection) => {
                    debug!("load: dropping row {}: {:?}", idx + 1, rejection);
                    dropped_rows += 1;
                }
            }
        }
        if dropped_rows > 0 {
            warn!(
                "load: dropped {} of {} rows without a usable vote count or serial number",
                dropped_rows,
                table.rows.len()
            );
        }

        let mut constituencies: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for r in records.iter().filter(|r| !r.state.is_empty()) {
            let names = constituencies.entry(r.state.clone()).or_default();
            if !r.constituency_name.is_empty() {
                names.insert(r.constituency_name.clone());
            }
        }

        let winners = resolve(&records);
        info!(
            "load: {} records, {} states, {} constituencies with a winner",
            records.len(),
            constituencies.len(),
            winners.len()
        );
        Ok(Dataset {
            records,
            winners,
            constituencies,
            dropped_rows,
        })
    }

    pub fn records(&self) -> &[VoteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of input rows that were discarded at load.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// All the records of a state, in input order.
    pub fn records_by_state(&self, state: &str) -> Vec<&VoteRecord> {
        self.records.iter().filter(|r| r.state == state).collect()
    }

    /// The records of one constituency, selected by name, in input order.
    pub fn records_of_constituency(&self, state: &str, name: &str) -> Vec<&VoteRecord> {
        self.records
            .iter()
            .filter(|r| r.state == state && r.constituency_name == name)
            .collect()
    }

    /// Distinct non-empty state names, ascending.
    pub fn all_states(&self) -> Vec<String> {
        self.constituencies.keys().cloned().collect()
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.constituencies.contains_key(state)
    }

    /// Distinct constituency names of a state, ascending. Empty for an unknown state.
    pub fn constituencies_of_state(&self, state: &str) -> Vec<String> {
        self.constituencies
            .get(state)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn winners(&self) -> &BTreeMap<ConstituencyKey, VoteRecord> {
        &self.winners
    }

    /// The winner of a constituency. `None` means there is no data for it.
    pub fn winner_of(&self, key: &ConstituencyKey) -> Option<&VoteRecord> {
        self.winners.get(key)
    }

    /// The winners of a state, ordered by constituency code.
    ///
    /// Numeric codes come first and compare as numbers (`"2"` before `"10"`).
    pub fn winners_in_state(&self, state: &str) -> Vec<&VoteRecord> {
        let mut winners: Vec<&VoteRecord> = self
            .winners
            .iter()
            .filter(|(k, _)| k.state == state)
            .map(|(_, w)| w)
            .collect();
        winners.sort_by(|a, b| code_order(&a.constituency_code, &b.constituency_code));
        winners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut t = RawTable::new(headers);
        for row in rows {
            t.rows.push(row.iter().map(|s| s.to_string()).collect());
        }
        t
    }

    #[test]
    fn headers_are_matched_loosely() {
        let t = table(
            &[
                "  State ",
                "PC  No",
                "pc name",
                "SL NO",
                "Candidate\t",
                " Party",
                "Total Votes ",
                "% of Votes",
            ],
            &[&["Goa", "1", "North Goa", "1", "Shripad Naik", "BJP", "257326", "57.1"]],
        );
        let ds = Dataset::load(&t).unwrap();
        assert_eq!(ds.len(), 1);
        let r = &ds.records()[0];
        assert_eq!(r.constituency_name, "North Goa");
        assert_eq!(r.total_votes, 257326.0);
        assert_eq!(r.serial_no, 1);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let t = table(
            &["State", "PC No", "PC Name", "Sl no", "Candidate", "Party"],
            &[&["Goa", "1", "North Goa", "1", "Shripad Naik", "BJP"]],
        );
        match Dataset::load(&t) {
            Err(DatasetError::MissingColumn { column, found }) => {
                assert_eq!(column, "Total Votes");
                assert_eq!(found.len(), 6);
            }
            x => panic!("unexpected load result: {:?}", x),
        }
    }

    #[test]
    fn invalid_votes_are_dropped_not_zeroed() {
        let mut b = Builder::new();
        b.add_raw(&["S1", "1", "C1", "1", "Alice", "PartyA", "100"]);
        b.add_raw(&["S1", "1", "C1", "2", "Bob", "PartyB", ""]);
        b.add_raw(&["S1", "1", "C1", "3", "Carol", "PartyC", "n/a"]);
        b.add_raw(&["S1", "1", "C1", "4", "Dan", "PartyD", "-5"]);
        b.add_raw(&["S1", "1", "C1", "5", "Eve", "PartyE", "NaN"]);
        b.add_raw(&["S1", "1", "C1", "6", "Fay", "PartyF", "250.0"]);
        b.add_raw(&["S1", "1", "C1", "x", "Gus", "PartyG", "999"]);
        let ds = b.build().unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows(), 5);
        let names: Vec<&str> = ds.records().iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Fay"]);
        let winner = ds.winners_in_state("S1");
        assert_eq!(winner.len(), 1);
        assert_eq!(winner[0].candidate, "Fay");
    }

    #[test]
    fn fractional_votes_are_kept() {
        let mut b = Builder::new();
        b.add_raw(&["S1", "1", "C1", "1", "Alice", "PartyA", "12.5"]);
        b.add_raw(&["S1", "1", "C1", "2", "Bob", "PartyB", "10"]);
        let ds = b.build().unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows(), 0);
        assert_eq!(ds.records()[0].total_votes, 12.5);
        assert_eq!(ds.winners_in_state("S1")[0].candidate, "Alice");
    }

    #[test]
    fn winners_follow_numeric_codes() {
        let mut b = Builder::new();
        b.add_result("S1", "10", "Ten", "Y", "PartyY", 5);
        b.add_result("S1", "2", "Two", "X", "PartyX", 5);
        b.add_result("S1", "A", "Lettered", "Z", "PartyZ", 5);
        let ds = b.build().unwrap();
        let codes: Vec<&str> = ds
            .winners_in_state("S1")
            .iter()
            .map(|w| w.constituency_code.as_str())
            .collect();
        assert_eq!(codes, vec!["2", "10", "A"]);
    }

    #[test]
    fn short_rows_are_dropped() {
        let t = table(
            &REQUIRED_COLUMNS,
            &[&["S1", "1", "C1", "1", "Alice"], &["S1", "1", "C1", "2", "Bob", "PartyB", "7"]],
        );
        let ds = Dataset::load(&t).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_rows(), 1);
    }

    #[test]
    fn states_are_sorted_distinct_and_non_empty() {
        let mut b = Builder::new();
        b.add_result("Kerala", "1", "Kasaragod", "A", "INC", 10);
        b.add_result("Goa", "2", "South Goa", "B", "INC", 10);
        b.add_result("Kerala", "2", "Kannur", "C", "INC", 10);
        b.add_result("", "9", "Nowhere", "D", "IND", 10);
        let ds = b.build().unwrap();
        assert_eq!(ds.all_states(), vec!["Goa".to_string(), "Kerala".to_string()]);
        assert!(!ds.has_state(""));
        // The record without a state is still loaded.
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn constituencies_are_sorted_and_distinct() {
        let mut b = Builder::new();
        b.add_result("Kerala", "2", "Kasaragod", "A", "INC", 10);
        b.add_result("Kerala", "2", "Kasaragod", "B", "CPI(M)", 5);
        b.add_result("Kerala", "1", "Alappuzha", "C", "INC", 10);
        b.add_result("Goa", "1", "North Goa", "D", "BJP", 10);
        let ds = b.build().unwrap();
        assert_eq!(
            ds.constituencies_of_state("Kerala"),
            vec!["Alappuzha".to_string(), "Kasaragod".to_string()]
        );
        assert!(ds.constituencies_of_state("Atlantis").is_empty());
    }

    #[test]
    fn lookups_keep_input_order() {
        let mut b = Builder::new();
        b.add_result("S1", "1", "C1", "Zed", "PartyA", 1);
        b.add_result("S2", "1", "D1", "Other", "PartyA", 1);
        b.add_result("S1", "1", "C1", "Amy", "PartyB", 2);
        let ds = b.build().unwrap();
        let names: Vec<&str> = ds
            .records_by_state("S1")
            .iter()
            .map(|r| r.candidate.as_str())
            .collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
        assert_eq!(ds.records_of_constituency("S1", "C1").len(), 2);
        assert!(ds.records_of_constituency("S2", "C1").is_empty());
    }

    #[test]
    fn votes_are_parsed_once() {
        assert_eq!(parse_votes("42"), Some(42.0));
        assert_eq!(parse_votes(" 12.5 "), Some(12.5));
        assert_eq!(parse_votes("1e3"), Some(1000.0));
        assert_eq!(parse_votes("-0"), Some(0.0));
        assert_eq!(parse_votes("-1"), None);
        assert_eq!(parse_votes("NaN"), None);
        assert_eq!(parse_votes("inf"), None);
        assert_eq!(parse_votes("1,234"), None);
        assert_eq!(parse_votes(""), None);
    }

    #[test]
    fn counts_are_parsed_once() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count(" 42 "), Some(42));
        assert_eq!(parse_count("42.0"), Some(42));
        assert_eq!(parse_count("1e3"), Some(1000));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_count("inf"), None);
        assert_eq!(parse_count("1,234"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("0.5"), None);
        assert_eq!(parse_count(""), None);
    }
}
