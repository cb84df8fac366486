//! Property tests for response parsing and order normalization.

use goalsplit::domain::models::{EstimatedTime, MicroGoal};
use goalsplit::services::{normalize_order, ResponseParser};
use proptest::prelude::*;

fn title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,30}".prop_map(|s| s.trim().to_string())
}

proptest! {
    /// normalize_order always yields 1..N in list position, all undone.
    #[test]
    fn prop_normalize_order_is_contiguous(
        orders in proptest::collection::vec((0u32..1000, any::<bool>()), 0..40)
    ) {
        let goals: Vec<MicroGoal> = orders
            .iter()
            .enumerate()
            .map(|(i, (order, done))| {
                let mut goal = MicroGoal::new(format!("Step {i}"), "", *order);
                goal.is_done = *done;
                goal
            })
            .collect();

        let normalized = normalize_order(goals);

        for (i, goal) in normalized.iter().enumerate() {
            prop_assert_eq!(goal.order as usize, i + 1);
            prop_assert!(!goal.is_done);
            prop_assert_eq!(&goal.title, &format!("Step {i}"));
        }
    }

    /// Every bullet line with a non-empty title becomes one micro-goal, in
    /// order, with the fixed heuristic defaults.
    #[test]
    fn prop_bullet_lists_round_out(titles in proptest::collection::vec(title_strategy(), 1..15)) {
        let text = titles
            .iter()
            .map(|t| format!("- {t}"))
            .collect::<Vec<_>>()
            .join("\n");

        let goals = ResponseParser::new().parse(&text);
        let expected: Vec<&String> = titles.iter().filter(|t| !t.is_empty()).collect();

        prop_assert_eq!(goals.len(), expected.len());
        for (goal, title) in goals.iter().zip(expected) {
            prop_assert_eq!(&goal.title, title);
            prop_assert_eq!(goal.estimated_time, EstimatedTime::Min30);
            prop_assert!(!goal.is_done);
        }
    }

    /// Arbitrary text never panics and never produces done items.
    #[test]
    fn prop_parse_never_panics(text in ".{0,400}") {
        let goals = ResponseParser::new().parse(&text);
        prop_assert!(goals.iter().all(|g| !g.is_done && !g.title.is_empty()));
    }

    /// Nearest-label mapping stays within the supported set.
    #[test]
    fn prop_from_minutes_picks_a_closest_label(minutes in 0u32..500) {
        let picked = EstimatedTime::from_minutes(minutes);
        let best = EstimatedTime::ALL
            .iter()
            .map(|t| t.minutes().abs_diff(minutes))
            .min()
            .unwrap();
        prop_assert_eq!(picked.minutes().abs_diff(minutes), best);
    }
}
