// ********* Input data structures ***********

use snafu::Snafu;

/// A table as it comes out of a reader: one header row and string cells.
///
/// Readers do not interpret anything. Header matching, trimming and numeric
/// coercion all happen in [`crate::Dataset::load`].
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: &[&str]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// One candidate's result in one constituency.
///
/// Only rows with a readable vote count become a `VoteRecord`, so
/// `total_votes` is always finite and non-negative.
#[derive(PartialEq, Debug, Clone)]
pub struct VoteRecord {
    pub state: String,
    pub constituency_code: String,
    pub constituency_name: String,
    pub serial_no: u32,
    pub candidate: String,
    pub party: String,
    pub total_votes: f64,
}

impl VoteRecord {
    pub fn key(&self) -> ConstituencyKey {
        ConstituencyKey {
            state: self.state.clone(),
            code: self.constituency_code.clone(),
        }
    }
}

/// Identifies a constituency. The constituency name is not part of the key.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct ConstituencyKey {
    pub state: String,
    pub code: String,
}

// ******** Output data structures *********

/// A labelled series, in display order.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<(String, f64)>,
}

impl ChartSeries {
    pub fn placeholder(title: &str) -> ChartSeries {
        ChartSeries {
            title: title.to_string(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, v)| *v).sum()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartyRow {
    pub party: String,
    pub seats_won: u64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CandidateRow {
    pub serial_no: u32,
    pub candidate: String,
    pub party: String,
    pub total_votes: f64,
}

/// The materialized output of one view node.
#[derive(PartialEq, Debug, Clone)]
pub enum ViewPayload {
    ConstituencyOptions(Vec<String>),
    Chart(ChartSeries),
    PartyTable(Vec<PartyRow>),
    CandidateTable(Vec<CandidateRow>),
}

// ********* Errors **********

/// Errors that prevent a dataset from being loaded.
///
/// No partial dataset is ever returned alongside one of these.
#[derive(Eq, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DatasetError {
    #[snafu(display("Required column {column:?} is missing, found columns: {found:?}"))]
    MissingColumn { column: String, found: Vec<String> },
}

/// A selection that was refused. The selection is left as it was.
#[derive(Eq, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SelectionError {
    #[snafu(display("Unknown state {state:?}"))]
    UnknownState { state: String },
    #[snafu(display("Select a state before selecting constituency {constituency:?}"))]
    NoStateSelected { constituency: String },
    #[snafu(display("Constituency {constituency:?} does not belong to {state}"))]
    NotInState { state: String, constituency: String },
}
