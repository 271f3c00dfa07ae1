use log::debug;
use snafu::ensure;

use crate::dataset::Dataset;
use crate::records::*;

/// An immutable view of what the user has selected.
///
/// Invariant: when a constituency is set, it is one of the constituencies of
/// the state. Snapshots are only produced by the transitions below, which
/// check it. Every change produces a new snapshot with a larger generation, so
/// results computed for an older snapshot can be recognized and discarded. A
/// transition that changes nothing returns the same snapshot, generation
/// included.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SelectionState {
    state: Option<String>,
    constituency: Option<String>,
    generation: u64,
}

impl SelectionState {
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn constituency(&self) -> Option<&str> {
        self.constituency.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn advance(&self, state: Option<String>, constituency: Option<String>) -> SelectionState {
        if state == self.state && constituency == self.constituency {
            return self.clone();
        }
        SelectionState {
            state,
            constituency,
            generation: self.generation + 1,
        }
    }

    /// The snapshot after selecting a state whose constituencies are `options`.
    ///
    /// The current constituency survives only if it is part of `options`.
    pub fn with_state(&self, state: Option<&str>, options: &[String]) -> SelectionState {
        let constituency = match (state, self.constituency.as_ref()) {
            (Some(_), Some(c)) if options.contains(c) => Some(c.clone()),
            (_, Some(c)) => {
                debug!(
                    "with_state: clearing constituency {:?} which is not part of {:?}",
                    c, state
                );
                None
            }
            (_, None) => None,
        };
        self.advance(state.map(|s| s.to_string()), constituency)
    }

    /// The snapshot after selecting a constituency of the current state.
    ///
    /// `options` are the constituencies of the current state. `None` clears the
    /// constituency and always succeeds.
    pub fn with_constituency(
        &self,
        constituency: Option<&str>,
        options: &[String],
    ) -> Result<SelectionState, SelectionError> {
        if let Some(c) = constituency {
            let state = match self.state.as_ref() {
                Some(s) => s,
                None => {
                    return NoStateSelectedSnafu { constituency: c }.fail();
                }
            };
            ensure!(
                options.iter().any(|o| o == c),
                NotInStateSnafu {
                    state: state.clone(),
                    constituency: c,
                }
            );
        }
        Ok(self.advance(self.state.clone(), constituency.map(|c| c.to_string())))
    }

    pub fn cleared(&self) -> SelectionState {
        self.advance(None, None)
    }
}

/// The selection of one session, validated against a dataset.
///
/// Every mutation swaps in a whole new snapshot and returns a copy of it. A
/// refused mutation leaves the current snapshot untouched.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: SelectionState,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    pub fn current(&self) -> &SelectionState {
        &self.current
    }

    /// Selects a state, or clears it with `None`.
    ///
    /// A constituency that does not belong to the new state is cleared.
    pub fn set_state(
        &mut self,
        dataset: &Dataset,
        state: Option<&str>,
    ) -> Result<SelectionState, SelectionError> {
        let options = match state {
            Some(s) => {
                ensure!(dataset.has_state(s), UnknownStateSnafu { state: s });
                dataset.constituencies_of_state(s)
            }
            None => Vec::new(),
        };
        self.current = self.current.with_state(state, &options);
        Ok(self.current.clone())
    }

    /// Selects a constituency of the current state, or clears it with `None`.
    pub fn set_constituency(
        &mut self,
        dataset: &Dataset,
        constituency: Option<&str>,
    ) -> Result<SelectionState, SelectionError> {
        let options = self
            .current
            .state()
            .map(|s| dataset.constituencies_of_state(s))
            .unwrap_or_default();
        self.current = self.current.with_constituency(constituency, &options)?;
        Ok(self.current.clone())
    }

    pub fn clear(&mut self) -> SelectionState {
        self.current = self.current.cleared();
        self.current.clone()
    }
}
