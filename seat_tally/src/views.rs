//! The projections behind every view of the dashboard.
//!
//! All of them are pure functions of the dataset and of the selection. A
//! missing selection is not an error: it produces the placeholder payload.

use log::debug;

use crate::dataset::Dataset;
use crate::records::*;

pub const STATE_CHART_PLACEHOLDER: &str = "Select a State to View Party Wins";
pub const SEAT_CHART_PLACEHOLDER: &str = "Select a Constituency to View Vote Share";
/// Label of the trailer row of the party table.
pub const TOTAL_SEATS: &str = "Total Seats";

pub fn constituency_options(dataset: &Dataset, state: Option<&str>) -> Vec<String> {
    match state {
        Some(s) => dataset.constituencies_of_state(s),
        None => Vec::new(),
    }
}

// Seats won per party, most seats first. Equal counts keep the order in which
// the parties first appear among the winners, taken by constituency code.
fn party_tally(dataset: &Dataset, state: &str) -> Vec<(String, u64)> {
    let mut tally: Vec<(String, u64)> = Vec::new();
    for winner in dataset.winners_in_state(state) {
        match tally.iter_mut().find(|(party, _)| *party == winner.party) {
            Some((_, seats)) => *seats += 1,
            None => tally.push((winner.party.clone(), 1)),
        }
    }
    // sort_by is stable
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    debug!("party_tally: {}: {:?}", state, tally);
    tally
}

pub fn state_pie_chart(dataset: &Dataset, state: Option<&str>) -> ChartSeries {
    match state {
        Some(s) => ChartSeries {
            title: format!("Seats Won by Each Party in {}", s),
            points: party_tally(dataset, s)
                .into_iter()
                .map(|(party, seats)| (party, seats as f64))
                .collect(),
        },
        None => ChartSeries::placeholder(STATE_CHART_PLACEHOLDER),
    }
}

/// The party tally as table rows, followed by the total number of seats.
pub fn state_party_table(dataset: &Dataset, state: Option<&str>) -> Vec<PartyRow> {
    let state = match state {
        Some(s) => s,
        None => return Vec::new(),
    };
    let mut rows: Vec<PartyRow> = party_tally(dataset, state)
        .into_iter()
        .map(|(party, seats_won)| PartyRow { party, seats_won })
        .collect();
    rows.push(PartyRow {
        party: TOTAL_SEATS.to_string(),
        seats_won: dataset.winners_in_state(state).len() as u64,
    });
    rows
}

/// Votes of every candidate of a constituency, not only the winner.
///
/// A candidate name that appears twice in the same constituency gets a single
/// slice holding the sum.
pub fn seat_pie_chart(
    dataset: &Dataset,
    state: Option<&str>,
    constituency: Option<&str>,
) -> ChartSeries {
    let (state, constituency) = match (state, constituency) {
        (Some(s), Some(c)) => (s, c),
        _ => return ChartSeries::placeholder(SEAT_CHART_PLACEHOLDER),
    };
    let mut points: Vec<(String, f64)> = Vec::new();
    for r in dataset.records_of_constituency(state, constituency) {
        match points.iter_mut().find(|(name, _)| *name == r.candidate) {
            Some((_, votes)) => *votes += r.total_votes,
            None => points.push((r.candidate.clone(), r.total_votes)),
        }
    }
    ChartSeries {
        title: format!("Vote Share in {} ({})", constituency, state),
        points,
    }
}

pub fn candidate_table(
    dataset: &Dataset,
    state: Option<&str>,
    constituency: Option<&str>,
) -> Vec<CandidateRow> {
    match (state, constituency) {
        (Some(s), Some(c)) => dataset
            .records_of_constituency(s, c)
            .into_iter()
            .map(|r| CandidateRow {
                serial_no: r.serial_no,
                candidate: r.candidate.clone(),
                party: r.party.clone(),
                total_votes: r.total_votes,
            })
            .collect(),
        _ => Vec::new(),
    }
}
