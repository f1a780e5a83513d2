//! Keyword responder regression tests
//!
//! Each documented phrase must map to its exact canned answer.

use lab_common::responder::{respond, FALLBACK_ANSWER};

#[test]
fn test_root_cause_answers() {
    assert_eq!(
        respond("What is the root cause of delayed turnaround?"),
        "Root cause of delayed turnaround times: (1) Reagent B near expiry causing reruns, (2) Analyzer downtime of 1.5 hours, (3) Increased test load (20% higher than average)."
    );
    assert_eq!(
        respond("root cause of inventory delays"),
        "Inventory-related delays were caused by stock-outs of gloves and syringes, forcing manual handling."
    );
    assert_eq!(
        respond("Root cause for late results"),
        "Result delays were linked to high abnormal rate in Glucose FBS tests, requiring retests."
    );
}

#[test]
fn test_chart_answers() {
    assert_eq!(
        respond("Show me a reagent chart"),
        "Here’s a summary of reagent consumption trends. See chart below."
    );
    assert_eq!(
        respond("tests chart please"),
        "Here’s the daily test trend for the last 7 days. See chart below."
    );
    assert_eq!(
        respond("results chart"),
        "Here’s the distribution of normal vs abnormal results. See chart below."
    );
    assert_eq!(
        respond("inventory chart"),
        "Here’s the stock vs threshold levels for key items. See chart below."
    );
}

#[test]
fn test_reagent_answers() {
    assert_eq!(
        respond("How fast is Reagent A used?"),
        "Reagent A is consumed at 150 ml/day. Stock lasts ~13 days."
    );
    assert_eq!(
        respond("Which items are near expiry?"),
        "Reagent B and Reagent H are near expiry (2025-11-30, 2025-12-05)."
    );
    assert_eq!(
        respond("highest consumption?"),
        "Top consumers: Reagent A (150 ml/day), Reagent C (120 ml/day)."
    );
}

#[test]
fn test_operations_answers() {
    assert_eq!(
        respond("How many tests yesterday?"),
        "Yesterday, 1,220 tests were performed."
    );
    assert_eq!(
        respond("total tests last week"),
        "A total of 8,765 tests were performed last week (avg 1,252/day)."
    );
    assert_eq!(
        respond("average turnaround?"),
        "Average turnaround time last week was 48 minutes."
    );
    assert_eq!(
        respond("analyzer downtime"),
        "Total downtime in the last 7 days was 2.5 hours."
    );
}

#[test]
fn test_results_answers() {
    assert_eq!(
        respond("any abnormal glucose readings?"),
        "46 abnormal Glucose FBS results detected this week (21%)."
    );
    assert_eq!(
        respond("show abnormal results"),
        "2 abnormal results detected today: Hemoglobin (Low), Glucose FBS (High)."
    );
    assert_eq!(
        respond("Hemoglobin out of range?"),
        "12% of Hemoglobin results are outside the normal range."
    );
}

#[test]
fn test_inventory_answers() {
    assert_eq!(
        respond("When should I reorder gloves?"),
        "Gloves will last ~8 days. Reorder within 3 days."
    );
    assert_eq!(
        respond("what is below threshold"),
        "Gloves, Syringes, and Test Tubes are below safety threshold."
    );
    assert_eq!(
        respond("syringe stock"),
        "Syringe stock will last for 14 days at current usage rate."
    );
}

#[test]
fn test_priority_order() {
    // chart rules shadow single-topic rules
    assert_eq!(
        respond("reagent a chart"),
        "Here’s a summary of reagent consumption trends. See chart below."
    );
    // "abnormal glucose" comes before "abnormal results"
    assert_eq!(
        respond("abnormal glucose and abnormal results"),
        "46 abnormal Glucose FBS results detected this week (21%)."
    );
}

#[test]
fn test_unmatched_falls_back() {
    assert_eq!(respond("What's the weather like?"), FALLBACK_ANSWER);
    assert_eq!(respond("   "), FALLBACK_ANSWER);
    assert_eq!(
        FALLBACK_ANSWER,
        "I checked across the datasets, but I don’t have a precise answer for that. Try asking about reagents, inventory levels, test results, or lab operations."
    );
}
