use log::debug;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::records::{ConstituencyKey, VoteRecord};

/// Resolves the winner of every constituency present in the records.
///
/// The winner has the most votes. Equal vote counts go to the lexicographically
/// smaller candidate name, then to the smaller serial number. A constituency
/// without any record is simply absent from the result.
pub fn resolve<'a, I>(records: I) -> BTreeMap<ConstituencyKey, VoteRecord>
where
    I: IntoIterator<Item = &'a VoteRecord>,
{
    let mut winners: BTreeMap<ConstituencyKey, VoteRecord> = BTreeMap::new();
    for record in records {
        match winners.get_mut(&record.key()) {
            Some(holder) => {
                if winner_order(record, holder) == Ordering::Less {
                    debug!(
                        "resolve: {:?}: {} ({}) overtakes {} ({})",
                        record.key(),
                        record.candidate,
                        record.total_votes,
                        holder.candidate,
                        holder.total_votes
                    );
                    *holder = record.clone();
                }
            }
            None => {
                winners.insert(record.key(), record.clone());
            }
        }
    }
    debug!("resolve: {} constituencies resolved", winners.len());
    winners
}

/// Orders two records of the same constituency so that the winner comes first.
///
/// Vote counts are finite and non-negative, so `total_cmp` is their numeric order.
pub fn winner_order(a: &VoteRecord, b: &VoteRecord) -> Ordering {
    b.total_votes
        .total_cmp(&a.total_votes)
        .then_with(|| a.candidate.cmp(&b.candidate))
        .then_with(|| a.serial_no.cmp(&b.serial_no))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(state: &str, code: &str, serial_no: u32, candidate: &str, party: &str, votes: u64) -> VoteRecord {
        VoteRecord {
            state: state.to_string(),
            constituency_code: code.to_string(),
            constituency_name: format!("{}-{}", state, code),
            serial_no,
            candidate: candidate.to_string(),
            party: party.to_string(),
            total_votes: votes as f64,
        }
    }

    fn key(state: &str, code: &str) -> ConstituencyKey {
        ConstituencyKey {
            state: state.to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn strict_maximum_wins() {
        let records = vec![
            rec("S1", "1", 1, "Alice", "PartyA", 100),
            rec("S1", "1", 2, "Bob", "PartyB", 300),
            rec("S1", "1", 3, "Carol", "PartyC", 200),
        ];
        let winners = resolve(&records);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[&key("S1", "1")].candidate, "Bob");
    }

    #[test]
    fn equal_votes_go_to_smaller_name() {
        let records = vec![
            rec("S1", "C1", 1, "Alice", "PartyA", 100),
            rec("S1", "C1", 3, "Carol", "PartyA", 150),
            rec("S1", "C1", 2, "Bob", "PartyB", 150),
        ];
        let winners = resolve(&records);
        let w = &winners[&key("S1", "C1")];
        assert_eq!(w.candidate, "Bob");
        assert_eq!(w.party, "PartyB");
    }

    #[test]
    fn equal_votes_and_name_go_to_smaller_serial() {
        let records = vec![
            rec("S1", "1", 7, "Ram", "PartyA", 10),
            rec("S1", "1", 4, "Ram", "PartyB", 10),
        ];
        let winners = resolve(&records);
        assert_eq!(winners[&key("S1", "1")].serial_no, 4);
        assert_eq!(winners[&key("S1", "1")].party, "PartyB");
    }

    #[test]
    fn fractional_counts_take_part() {
        let mut half = rec("S1", "1", 2, "Bob", "PartyB", 0);
        half.total_votes = 100.5;
        let records = vec![rec("S1", "1", 1, "Alice", "PartyA", 100), half];
        let winners = resolve(&records);
        assert_eq!(winners[&key("S1", "1")].candidate, "Bob");
        assert_eq!(winners[&key("S1", "1")].total_votes, 100.5);
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let mut records = vec![
            rec("S1", "1", 1, "Zed", "PartyA", 50),
            rec("S1", "1", 2, "Amy", "PartyB", 50),
            rec("S1", "1", 3, "Kim", "PartyC", 49),
        ];
        let forward = resolve(&records);
        records.reverse();
        let backward = resolve(&records);
        assert_eq!(forward, backward);
        assert_eq!(forward[&key("S1", "1")].candidate, "Amy");
    }

    #[test]
    fn same_code_in_two_states_are_two_constituencies() {
        let records = vec![
            rec("S1", "1", 1, "Alice", "PartyA", 10),
            rec("S2", "1", 1, "Bob", "PartyB", 20),
        ];
        let winners = resolve(&records);
        assert_eq!(winners.len(), 2);
        assert_eq!(winners[&key("S1", "1")].candidate, "Alice");
        assert_eq!(winners[&key("S2", "1")].candidate, "Bob");
    }

    #[test]
    fn no_records_no_winners() {
        let records: Vec<VoteRecord> = Vec::new();
        assert!(resolve(&records).is_empty());
        assert!(!resolve(&records).contains_key(&key("S1", "1")));
    }
}
