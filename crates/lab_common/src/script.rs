//! Turn script - the staged "thinking" playback for one question
//!
//! A script is planned up front as a list of (delay, message) steps so the
//! timing and content can be inspected without running any timers. Each
//! delay is relative to the previous step.

use crate::chat::ChatMessage;
use crate::responder::respond;
use crate::router::{is_root_cause, route, wants_chart};
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;

pub const STEP1_DELAY_MS: RangeInclusive<u64> = 2000..=4000;
pub const STEP2_DELAY_MS: RangeInclusive<u64> = 2000..=5000;
pub const STEP3_DELAY_MS: RangeInclusive<u64> = 2000..=5000;
pub const CORRELATE_DELAY_MS: RangeInclusive<u64> = 2000..=4000;
pub const ANSWER_DELAY_MS: RangeInclusive<u64> = 2000..=4000;
pub const CHART_DELAY_MS: RangeInclusive<u64> = 1000..=5000;

/// Slowest accepted pace multiplier
pub const MAX_PACE: f64 = 100.0;

pub const ANALYZING: &str = "Step 1: Analyzing your question…";
pub const COLLECTING: &str = "Step 3: Collecting response from dataset…";
pub const CORRELATING: &str =
    "Step 4: Correlating metrics across Operations, Reagents, and Inventory…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub delay: Duration,
    pub message: ChatMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnScript {
    pub steps: Vec<ScriptStep>,
}

impl TurnScript {
    pub fn plan<R: Rng>(question: &str, rng: &mut R) -> Self {
        let route = route(question);
        let mut steps = Vec::with_capacity(6);
        let mut step = |range: RangeInclusive<u64>, message: ChatMessage| {
            steps.push(ScriptStep {
                delay: Duration::from_millis(rng.gen_range(range)),
                message,
            });
        };

        step(STEP1_DELAY_MS, ChatMessage::ai(ANALYZING));
        step(
            STEP2_DELAY_MS,
            ChatMessage::ai(format!("Step 2: Connecting to {}…", route.source)),
        );
        step(STEP3_DELAY_MS, ChatMessage::ai(COLLECTING));
        if is_root_cause(question) {
            step(CORRELATE_DELAY_MS, ChatMessage::ai(CORRELATING));
        }
        step(
            ANSWER_DELAY_MS,
            ChatMessage::ai(format!("Final Answer: {}", respond(question))),
        );
        if wants_chart(question) {
            step(CHART_DELAY_MS, ChatMessage::chart(route.chart));
        }

        Self { steps }
    }

    /// Multiply every delay by `factor`; 0 makes the script instant.
    /// The factor is clamped to `0..=MAX_PACE`.
    pub fn scaled(mut self, factor: f64) -> Self {
        let factor = clamp_pace(factor);
        for step in &mut self.steps {
            step.delay = step.delay.mul_f64(factor);
        }
        self
    }

    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Non-finite values fall back to normal speed
pub fn clamp_pace(pace: f64) -> f64 {
    if pace.is_finite() {
        pace.clamp(0.0, MAX_PACE)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChartKind, Role};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn texts(script: &TurnScript) -> Vec<String> {
        script.steps.iter().map(|s| s.message.text().to_string()).collect()
    }

    #[test]
    fn test_plain_question_has_four_steps() {
        let mut rng = StdRng::seed_from_u64(7);
        let script = TurnScript::plan("How many tests yesterday?", &mut rng);
        assert_eq!(
            texts(&script),
            vec![
                ANALYZING.to_string(),
                "Step 2: Connecting to Operations sub-agent…".to_string(),
                COLLECTING.to_string(),
                "Final Answer: Yesterday, 1,220 tests were performed.".to_string(),
            ]
        );
    }

    #[test]
    fn test_root_cause_adds_correlation_step() {
        let mut rng = StdRng::seed_from_u64(7);
        let script = TurnScript::plan("root cause of inventory delays", &mut rng);
        assert_eq!(script.len(), 5);
        assert_eq!(script.steps[3].message.text(), CORRELATING);
        assert!(script.steps[4].message.text().starts_with("Final Answer: Inventory-related"));
    }

    #[test]
    fn test_chart_question_ends_with_chart() {
        let mut rng = StdRng::seed_from_u64(7);
        let script = TurnScript::plan("Show inventory stock chart", &mut rng);
        let last = script.steps.last().unwrap();
        assert_eq!(last.message.role, Role::Chart);
        assert_eq!(last.message.chart, Some(ChartKind::Inventory));
    }

    #[test]
    fn test_unrouted_chart_question_has_empty_chart() {
        let mut rng = StdRng::seed_from_u64(7);
        let script = TurnScript::plan("graph something", &mut rng);
        let last = script.steps.last().unwrap();
        assert_eq!(last.message.role, Role::Chart);
        assert_eq!(last.message.chart, None);
    }

    #[test]
    fn test_delays_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let script = TurnScript::plan("root cause of turnaround, show trend", &mut rng);
            let ranges = [
                STEP1_DELAY_MS,
                STEP2_DELAY_MS,
                STEP3_DELAY_MS,
                CORRELATE_DELAY_MS,
                ANSWER_DELAY_MS,
                CHART_DELAY_MS,
            ];
            assert_eq!(script.len(), ranges.len());
            for (step, range) in script.steps.iter().zip(ranges) {
                let ms = step.delay.as_millis() as u64;
                assert!(range.contains(&ms), "{} not in {:?}", ms, range);
            }
        }
    }

    #[test]
    fn test_scaled_zero_is_instant() {
        let mut rng = StdRng::seed_from_u64(1);
        let script = TurnScript::plan("downtime", &mut rng).scaled(0.0);
        assert_eq!(script.total_delay(), Duration::ZERO);
    }

    #[test]
    fn test_scaled_half() {
        let mut rng = StdRng::seed_from_u64(1);
        let script = TurnScript::plan("downtime", &mut rng);
        let total = script.total_delay();
        let halved = script.scaled(0.5).total_delay();
        let diff = (total.as_secs_f64() / 2.0 - halved.as_secs_f64()).abs();
        assert!(diff < 0.001);
    }

    #[test]
    fn test_huge_pace_is_capped() {
        let mut rng = StdRng::seed_from_u64(5);
        let script = TurnScript::plan("downtime", &mut rng);
        let normal = script.total_delay();

        let slow = script.scaled(1e30).total_delay();
        assert!(slow > normal * 99 && slow < normal * 101);
        assert_eq!(clamp_pace(f64::MAX), MAX_PACE);
        assert_eq!(clamp_pace(f64::NAN), 1.0);
    }
}
