//! The reactive view graph.
//!
//! Every view of the dashboard is a node that declares which parts of the
//! selection it reads. When the selection changes, a node is recomputed only if
//! the values of its own inputs changed. Nodes are visited in a fixed order in
//! which the constituency options always come first.
//!
//! Events are validated by the [`Selection`] the graph owns. A state change
//! that orphans the selected constituency is settled there, against the
//! constituencies of the new state, which are exactly the options the first
//! node then shows. No view reading the constituency ever sees a dangling one.

use log::{debug, info};

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::records::*;
use crate::selection::{Selection, SelectionState};
use crate::views;

/// The parts of a selection a view may depend on.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum ViewInput {
    State,
    Constituency,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum ViewNode {
    ConstituencyOptions,
    StatePieChart,
    StatePartyTable,
    SeatPieChart,
    CandidateTable,
}

impl ViewNode {
    /// All the nodes, each one after the nodes whose results it relies on.
    pub const ALL: [ViewNode; 5] = [
        ViewNode::ConstituencyOptions,
        ViewNode::StatePieChart,
        ViewNode::StatePartyTable,
        ViewNode::SeatPieChart,
        ViewNode::CandidateTable,
    ];

    pub fn inputs(&self) -> &'static [ViewInput] {
        match self {
            ViewNode::ConstituencyOptions | ViewNode::StatePieChart | ViewNode::StatePartyTable => {
                &[ViewInput::State]
            }
            ViewNode::SeatPieChart | ViewNode::CandidateTable => {
                &[ViewInput::State, ViewInput::Constituency]
            }
        }
    }

    pub fn depends_on(&self, input: ViewInput) -> bool {
        self.inputs().contains(&input)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewNode::ConstituencyOptions => "constituencyOptions",
            ViewNode::StatePieChart => "statePieChart",
            ViewNode::StatePartyTable => "statePartyTable",
            ViewNode::SeatPieChart => "seatPieChart",
            ViewNode::CandidateTable => "candidateTable",
        }
    }

    fn compute(&self, dataset: &Dataset, inputs: &InputValues) -> ViewPayload {
        let state = inputs.state.as_deref();
        let constituency = inputs.constituency.as_deref();
        match self {
            ViewNode::ConstituencyOptions => {
                ViewPayload::ConstituencyOptions(views::constituency_options(dataset, state))
            }
            ViewNode::StatePieChart => ViewPayload::Chart(views::state_pie_chart(dataset, state)),
            ViewNode::StatePartyTable => {
                ViewPayload::PartyTable(views::state_party_table(dataset, state))
            }
            ViewNode::SeatPieChart => {
                ViewPayload::Chart(views::seat_pie_chart(dataset, state, constituency))
            }
            ViewNode::CandidateTable => {
                ViewPayload::CandidateTable(views::candidate_table(dataset, state, constituency))
            }
        }
    }
}

/// A user action on the selection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SelectionEvent {
    SetState(Option<String>),
    SetConstituency(Option<String>),
    Clear,
}

/// What an applied event did.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Recomputation {
    pub snapshot: SelectionState,
    /// The recomputed nodes, in the order they were recomputed.
    pub recomputed: Vec<ViewNode>,
}

// The selection as seen by one node: the inputs it does not declare are blanked.
#[derive(Eq, PartialEq, Debug, Clone)]
struct InputValues {
    state: Option<String>,
    constituency: Option<String>,
}

impl InputValues {
    fn project(node: ViewNode, selection: &SelectionState) -> InputValues {
        InputValues {
            state: if node.depends_on(ViewInput::State) {
                selection.state().map(|s| s.to_string())
            } else {
                None
            },
            constituency: if node.depends_on(ViewInput::Constituency) {
                selection.constituency().map(|c| c.to_string())
            } else {
                None
            },
        }
    }
}

#[derive(Debug, Clone)]
struct ComputedView {
    inputs: InputValues,
    payload: ViewPayload,
}

/// The views of one session.
///
/// The dataset is shared read-only; the selection belongs to this graph.
#[derive(Debug, Clone)]
pub struct ViewGraph {
    dataset: Arc<Dataset>,
    selection: Selection,
    views: BTreeMap<ViewNode, ComputedView>,
}

impl ViewGraph {
    /// Creates the graph with nothing selected. All the nodes start with their placeholder.
    pub fn new(dataset: Arc<Dataset>) -> ViewGraph {
        let mut graph = ViewGraph {
            dataset,
            selection: Selection::new(),
            views: BTreeMap::new(),
        };
        let initial = graph.selection.current().clone();
        for node in ViewNode::ALL {
            graph.refresh(node, &initial);
        }
        graph
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.current()
    }

    pub fn payload(&self, node: ViewNode) -> Option<&ViewPayload> {
        self.views.get(&node).map(|v| &v.payload)
    }

    /// The current payloads, in node order.
    pub fn payloads(&self) -> Vec<(ViewNode, &ViewPayload)> {
        ViewNode::ALL
            .iter()
            .filter_map(|node| self.payload(*node).map(|p| (*node, p)))
            .collect()
    }

    /// The constituencies that can currently be selected.
    pub fn constituency_options(&self) -> &[String] {
        match self.payload(ViewNode::ConstituencyOptions) {
            Some(ViewPayload::ConstituencyOptions(options)) => options,
            _ => &[],
        }
    }

    /// Applies an event and recomputes the affected views.
    ///
    /// A refused event changes nothing, neither the selection nor any payload.
    pub fn apply(&mut self, event: &SelectionEvent) -> Result<Recomputation, SelectionError> {
        debug!("apply: {:?} on {:?}", event, self.selection.current());
        let next = match event {
            SelectionEvent::SetState(state) => {
                self.selection.set_state(&self.dataset, state.as_deref())?
            }
            SelectionEvent::SetConstituency(constituency) => self
                .selection
                .set_constituency(&self.dataset, constituency.as_deref())?,
            SelectionEvent::Clear => self.selection.clear(),
        };

        let mut recomputed: Vec<ViewNode> = Vec::new();
        for node in ViewNode::ALL {
            if self.refresh(node, &next) {
                recomputed.push(node);
            }
        }

        info!(
            "apply: selection {:?} / {:?} (generation {}), recomputed {:?}",
            next.state(),
            next.constituency(),
            next.generation(),
            recomputed
        );
        Ok(Recomputation {
            snapshot: next,
            recomputed,
        })
    }

    // Recomputes a node if its inputs changed. Returns true if it was recomputed.
    fn refresh(&mut self, node: ViewNode, selection: &SelectionState) -> bool {
        let inputs = InputValues::project(node, selection);
        if let Some(current) = self.views.get(&node) {
            if current.inputs == inputs {
                return false;
            }
        }
        debug!("refresh: {} with {:?}", node.name(), inputs);
        let payload = node.compute(&self.dataset, &inputs);
        self.views.insert(node, ComputedView { inputs, payload });
        true
    }
}
