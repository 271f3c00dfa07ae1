use crate::dataset::{Dataset, REQUIRED_COLUMNS};
use crate::records::*;

/// A builder for assembling a results table in code.
///
/// Rows are stored as strings, exactly as a reader would produce them, so a
/// built dataset goes through the same validation as a loaded file.
///
/// ```
/// use seat_tally::builder::Builder;
/// # use seat_tally::DatasetError;
///
/// let mut builder = Builder::new();
/// builder.add_result("Goa", "1", "North Goa", "Shripad Yesso Naik", "BJP", 257326);
/// builder.add_result("Goa", "1", "North Goa", "Ramakant Khalap", "INC", 141311);
///
/// let dataset = builder.build()?;
/// assert_eq!(dataset.constituencies_of_state("Goa"), vec!["North Goa".to_string()]);
///
/// # Ok::<(), DatasetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) _table: RawTable,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _table: RawTable::new(&REQUIRED_COLUMNS),
        }
    }

    /// Adds the result of one candidate.
    ///
    /// The serial number is the position of the candidate within its
    /// constituency, starting at 1.
    pub fn add_result(
        &mut self,
        state: &str,
        pc_no: &str,
        pc_name: &str,
        candidate: &str,
        party: &str,
        total_votes: u64,
    ) -> &mut Builder {
        let serial_no = self
            ._table
            .rows
            .iter()
            .filter(|row| {
                row.first().map(String::as_str) == Some(state)
                    && row.get(1).map(String::as_str) == Some(pc_no)
            })
            .count()
            + 1;
        self.add_raw(&[
            state,
            pc_no,
            pc_name,
            serial_no.to_string().as_str(),
            candidate,
            party,
            total_votes.to_string().as_str(),
        ])
    }

    /// Adds a row of raw cells, in the order of [`REQUIRED_COLUMNS`].
    ///
    /// Nothing is checked here: bad cells are dropped when the dataset is built.
    pub fn add_raw(&mut self, cells: &[&str]) -> &mut Builder {
        self._table
            .rows
            .push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn table(&self) -> &RawTable {
        &self._table
    }

    pub fn into_table(self) -> RawTable {
        self._table
    }

    pub fn build(&self) -> Result<Dataset, DatasetError> {
        Dataset::load(&self._table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_numbers_restart_per_constituency() {
        let mut b = Builder::new();
        b.add_result("Goa", "1", "North Goa", "A", "P1", 10)
            .add_result("Goa", "1", "North Goa", "B", "P2", 20)
            .add_result("Goa", "2", "South Goa", "C", "P1", 30);
        let serials: Vec<&str> = b.table().rows.iter().map(|r| r[3].as_str()).collect();
        assert_eq!(serials, vec!["1", "2", "1"]);
    }

    #[test]
    fn raw_rows_are_validated_on_build() {
        let mut b = Builder::new();
        b.add_raw(&["Goa", "1", "North Goa", "1", "A", "P1", "n/a"]);
        b.add_raw(&["Goa", "1", "North Goa", "2", "B", "P2", "12.0"]);
        let ds = b.build().unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_rows(), 1);
        assert_eq!(ds.records()[0].total_votes, 12.0);
        assert_eq!(b.into_table().rows.len(), 2);
    }
}
