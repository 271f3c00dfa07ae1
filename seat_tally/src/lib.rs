/*!
Winner-takes-constituency tallies of the Lok Sabha 2024 results, and the
reactive views of an interactive results explorer.

The crate is organized leaves first:
- [`Dataset`] holds the results loaded from a [`RawTable`] and the winner of
  every constituency (see [`winners`]).
- [`Selection`] holds what a user selected: a state, then a constituency of
  that state.
- [`ViewGraph`] turns the selection into the payloads of the five views of the
  explorer, recomputing only the views whose inputs changed.

```
use std::sync::Arc;
use seat_tally::builder::Builder;
use seat_tally::{SelectionEvent, ViewGraph, ViewNode, ViewPayload};

let mut builder = Builder::new();
builder.add_result("Goa", "1", "North Goa", "Shripad Yesso Naik", "BJP", 257326);
builder.add_result("Goa", "1", "North Goa", "Ramakant Khalap", "INC", 141311);
builder.add_result("Goa", "2", "South Goa", "Viriato Fernandes", "INC", 217836);
builder.add_result("Goa", "2", "South Goa", "Pallavi Dempo", "BJP", 204301);
let dataset = Arc::new(builder.build()?);

let mut graph = ViewGraph::new(dataset);
graph.apply(&SelectionEvent::SetState(Some("Goa".to_string())))?;
if let Some(ViewPayload::Chart(chart)) = graph.payload(ViewNode::StatePieChart) {
    assert_eq!(chart.points.len(), 2);
}
# Ok::<(), Box<dyn std::error::Error>>(())
```

See the [`manual`] for the input format and the rules applied.
*/

pub mod builder;
pub mod dataset;
pub mod graph;
pub mod manual;
mod records;
pub mod selection;
pub mod views;
pub mod winners;

pub use crate::dataset::Dataset;
pub use crate::graph::{Recomputation, SelectionEvent, ViewGraph, ViewInput, ViewNode};
pub use crate::records::*;
pub use crate::selection::{Selection, SelectionState};
