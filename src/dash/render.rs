// JSON rendering of the views. The column names of the tables are the ones of
// the published results.

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::dash::*;

fn selection_js(selection: &SelectionState) -> JSValue {
    json!({
        "state": selection.state(),
        "constituency": selection.constituency(),
        "generation": selection.generation(),
    })
}

// Whole numbers are written as integers, as in the published results.
fn number_js(x: f64) -> JSValue {
    if x.fract() == 0.0 && x >= 0.0 && x < u64::MAX as f64 {
        json!(x as u64)
    } else {
        json!(x)
    }
}

fn chart_js(chart: &ChartSeries) -> JSValue {
    let series: Vec<JSValue> = chart
        .points
        .iter()
        .map(|(label, value)| json!({"label": label, "value": number_js(*value)}))
        .collect();
    json!({"title": chart.title, "series": series})
}

pub fn payload_js(payload: &ViewPayload) -> JSValue {
    match payload {
        ViewPayload::ConstituencyOptions(options) => json!(options),
        ViewPayload::Chart(chart) => chart_js(chart),
        ViewPayload::PartyTable(rows) => JSValue::Array(
            rows.iter()
                .map(|r| json!({"Party": r.party, "Seats Won": r.seats_won}))
                .collect(),
        ),
        ViewPayload::CandidateTable(rows) => JSValue::Array(
            rows.iter()
                .map(|r| {
                    json!({
                        "Sl no": r.serial_no,
                        "Candidate": r.candidate,
                        "Party": r.party,
                        "Total Votes": number_js(r.total_votes),
                    })
                })
                .collect(),
        ),
    }
}

fn views_js<'a, I>(payloads: I) -> JSValue
where
    I: IntoIterator<Item = (ViewNode, &'a ViewPayload)>,
{
    let mut views: JSMap<String, JSValue> = JSMap::new();
    for (node, payload) in payloads {
        views.insert(node.name().to_string(), payload_js(payload));
    }
    JSValue::Object(views)
}

/// The selection and all the views.
pub fn summary_js(graph: &ViewGraph, title: Option<&str>) -> JSValue {
    let mut js = json!({
        "selection": selection_js(graph.selection()),
        "views": views_js(graph.payloads()),
    });
    if let Some(t) = title {
        js["title"] = json!(t);
    }
    js
}

/// The selection and the views that an event recomputed.
pub fn recomputation_js(graph: &ViewGraph, recomputation: &Recomputation) -> JSValue {
    let changed = recomputation
        .recomputed
        .iter()
        .filter_map(|node| graph.payload(*node).map(|p| (*node, p)));
    json!({
        "selection": selection_js(&recomputation.snapshot),
        "views": views_js(changed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use seat_tally::builder::Builder;

    fn graph() -> ViewGraph {
        let mut b = Builder::new();
        b.add_result("Kerala", "4", "Wayanad", "Rahul Gandhi", "INC", 647445);
        b.add_result("Kerala", "4", "Wayanad", "Annie Raja", "CPI", 283023);
        b.add_result("Kerala", "1", "Kasaragod", "Rajmohan Unnithan", "INC", 490659);
        ViewGraph::new(Arc::new(b.build().unwrap()))
    }

    #[test]
    fn numbers() {
        assert_eq!(number_js(647445.0), json!(647445));
        assert_eq!(number_js(12.5), json!(12.5));
        assert_eq!(number_js(0.0), json!(0));
    }

    #[test]
    fn placeholders() {
        let g = graph();
        let js = summary_js(&g, Some("Lok Sabha 2024"));
        assert_eq!(js["title"], json!("Lok Sabha 2024"));
        assert_eq!(
            js["selection"],
            json!({"state": null, "constituency": null, "generation": 0})
        );
        assert_eq!(js["views"]["constituencyOptions"], json!([]));
        assert_eq!(
            js["views"]["statePieChart"],
            json!({"title": "Select a State to View Party Wins", "series": []})
        );
        assert_eq!(js["views"]["candidateTable"], json!([]));
    }

    #[test]
    fn tables_use_the_result_columns() {
        let mut g = graph();
        g.apply(&SelectionEvent::SetState(Some("Kerala".to_string())))
            .unwrap();
        let r = g
            .apply(&SelectionEvent::SetConstituency(Some("Wayanad".to_string())))
            .unwrap();
        let js = recomputation_js(&g, &r);
        let views = js["views"].as_object().unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(
            views["candidateTable"][1],
            json!({"Sl no": 2, "Candidate": "Annie Raja", "Party": "CPI", "Total Votes": 283023})
        );
        assert_eq!(
            views["seatPieChart"]["series"][0],
            json!({"label": "Rahul Gandhi", "value": 647445})
        );

        let js = summary_js(&g, None);
        assert!(js.get("title").is_none());
        assert_eq!(
            js["views"]["statePartyTable"],
            json!([
                {"Party": "INC", "Seats Won": 2},
                {"Party": "Total Seats", "Seats Won": 2},
            ])
        );
        assert_eq!(js["views"]["constituencyOptions"], json!(["Kasaragod", "Wayanad"]));
    }
}
