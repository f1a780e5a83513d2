//! Sub-agent routing
//!
//! Decides which "sub-agent" a question is handed to (shown in step 2 of
//! the turn script) and which dataset a chart would draw from.

use crate::chat::ChartKind;

pub const GENERAL_AGENT: &str = "General Lab Agent";

/// Words that make a turn end with a chart message
const CHART_WORDS: &[&str] = &["chart", "plot", "visualize", "graph", "trend"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub source: &'static str,
    pub chart: Option<ChartKind>,
}

/// First match wins, in inventory, reagents, results, operations order
pub fn route(question: &str) -> Route {
    let q = question.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| q.contains(w));

    let (source, chart) = if any(&["glove", "stock"]) {
        ("Inventory sub-agent", Some(ChartKind::Inventory))
    } else if any(&["reagent"]) {
        ("Reagents sub-agent", Some(ChartKind::Reagents))
    } else if any(&["result"]) {
        ("Results sub-agent", Some(ChartKind::Results))
    } else if any(&["test", "tat", "downtime"]) {
        ("Operations sub-agent", Some(ChartKind::Operations))
    } else {
        (GENERAL_AGENT, None)
    };

    Route { source, chart }
}

pub fn is_root_cause(question: &str) -> bool {
    question.to_lowercase().contains("root cause")
}

pub fn wants_chart(question: &str) -> bool {
    let q = question.to_lowercase();
    CHART_WORDS.iter().any(|w| q.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_takes_precedence() {
        // "stock" beats "reagent"
        let r = route("Reagent stock levels");
        assert_eq!(r.source, "Inventory sub-agent");
        assert_eq!(r.chart, Some(ChartKind::Inventory));
    }

    #[test]
    fn test_each_sub_agent() {
        assert_eq!(route("reorder gloves").chart, Some(ChartKind::Inventory));
        assert_eq!(route("Reagent A usage").chart, Some(ChartKind::Reagents));
        assert_eq!(route("abnormal results").chart, Some(ChartKind::Results));
        assert_eq!(route("tests yesterday").chart, Some(ChartKind::Operations));
        assert_eq!(route("analyzer downtime").source, "Operations sub-agent");
    }

    #[test]
    fn test_tat_substring_routes_to_operations() {
        // "status" contains "tat"
        assert_eq!(route("status please").chart, Some(ChartKind::Operations));
    }

    #[test]
    fn test_general_agent_has_no_chart() {
        let r = route("hello there");
        assert_eq!(r.source, GENERAL_AGENT);
        assert_eq!(r.chart, None);
    }

    #[test]
    fn test_chart_words() {
        assert!(wants_chart("Plot the inventory"));
        assert!(wants_chart("show the trend"));
        assert!(wants_chart("can you visualize it"));
        assert!(!wants_chart("how many tests yesterday"));
    }

    #[test]
    fn test_root_cause() {
        assert!(is_root_cause("Root Cause of delays"));
        assert!(!is_root_cause("cause of delays"));
    }
}
