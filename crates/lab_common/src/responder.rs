//! Keyword Responder - canned answers selected by substring rules
//!
//! Rules are checked top to bottom against the lowercased question. The
//! first rule whose keywords are all present wins. There is no scoring.

/// Returned when no rule matches
pub const FALLBACK_ANSWER: &str = "I checked across the datasets, but I don’t have a precise answer for that. Try asking about reagents, inventory levels, test results, or lab operations.";

/// A rule fires when every keyword is a substring of the question
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

impl Rule {
    fn matches(&self, question_lower: &str) -> bool {
        self.keywords.iter().all(|k| question_lower.contains(k))
    }
}

/// Priority order matters: root-cause rules shadow chart rules, which
/// shadow the single-topic answers.
pub const RULES: &[Rule] = &[
    // Root cause analysis
    Rule {
        keywords: &["root cause", "turnaround"],
        answer: "Root cause of delayed turnaround times: (1) Reagent B near expiry causing reruns, (2) Analyzer downtime of 1.5 hours, (3) Increased test load (20% higher than average).",
    },
    Rule {
        keywords: &["root cause", "inventory"],
        answer: "Inventory-related delays were caused by stock-outs of gloves and syringes, forcing manual handling.",
    },
    Rule {
        keywords: &["root cause", "results"],
        answer: "Result delays were linked to high abnormal rate in Glucose FBS tests, requiring retests.",
    },
    // Charts
    Rule {
        keywords: &["reagent", "chart"],
        answer: "Here’s a summary of reagent consumption trends. See chart below.",
    },
    Rule {
        keywords: &["tests", "chart"],
        answer: "Here’s the daily test trend for the last 7 days. See chart below.",
    },
    Rule {
        keywords: &["results", "chart"],
        answer: "Here’s the distribution of normal vs abnormal results. See chart below.",
    },
    Rule {
        keywords: &["inventory", "chart"],
        answer: "Here’s the stock vs threshold levels for key items. See chart below.",
    },
    // Reagents
    Rule {
        keywords: &["reagent a"],
        answer: "Reagent A is consumed at 150 ml/day. Stock lasts ~13 days.",
    },
    Rule {
        keywords: &["near expiry"],
        answer: "Reagent B and Reagent H are near expiry (2025-11-30, 2025-12-05).",
    },
    Rule {
        keywords: &["consumption"],
        answer: "Top consumers: Reagent A (150 ml/day), Reagent C (120 ml/day).",
    },
    // Operations
    Rule {
        keywords: &["tests yesterday"],
        answer: "Yesterday, 1,220 tests were performed.",
    },
    Rule {
        keywords: &["tests last week"],
        answer: "A total of 8,765 tests were performed last week (avg 1,252/day).",
    },
    Rule {
        keywords: &["turnaround"],
        answer: "Average turnaround time last week was 48 minutes.",
    },
    Rule {
        keywords: &["downtime"],
        answer: "Total downtime in the last 7 days was 2.5 hours.",
    },
    // Results
    Rule {
        keywords: &["abnormal glucose"],
        answer: "46 abnormal Glucose FBS results detected this week (21%).",
    },
    Rule {
        keywords: &["abnormal results"],
        answer: "2 abnormal results detected today: Hemoglobin (Low), Glucose FBS (High).",
    },
    Rule {
        keywords: &["hemoglobin"],
        answer: "12% of Hemoglobin results are outside the normal range.",
    },
    // Inventory
    Rule {
        keywords: &["reorder gloves"],
        answer: "Gloves will last ~8 days. Reorder within 3 days.",
    },
    Rule {
        keywords: &["below threshold"],
        answer: "Gloves, Syringes, and Test Tubes are below safety threshold.",
    },
    Rule {
        keywords: &["syringe stock"],
        answer: "Syringe stock will last for 14 days at current usage rate.",
    },
];

/// Pick the canned answer for a question
pub fn respond(question: &str) -> &'static str {
    let q = question.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&q))
        .map(|rule| rule.answer)
        .unwrap_or(FALLBACK_ANSWER)
}
