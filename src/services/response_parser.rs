//! Recovery of micro-goals from free-form provider output.
//!
//! Parsing runs an ordered list of strategies; the first one that yields a
//! non-empty list wins:
//!
//! 1. [`ParseTier::Structured`] - the text between the first `[` and the last
//!    `]` decoded as a JSON array of micro-goal objects
//! 2. [`ParseTier::Heuristic`] - bullet (`-`, `*`) and numbered (`1.`) lines
//!
//! Whatever the tier, `is_done` is forced to `false`. An empty result is a
//! valid outcome here; deciding what to do about it is the orchestrator's job.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::models::{EstimatedTime, MicroGoal, MicroGoalDifficulty};

/// Which parsing strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseTier {
    Structured,
    Heuristic,
}

impl ParseTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Heuristic => "heuristic",
        }
    }
}

type Strategy = fn(&str) -> Option<Vec<MicroGoal>>;

/// Strategies in priority order.
const STRATEGIES: [(ParseTier, Strategy); 2] = [
    (ParseTier::Structured, parse_structured),
    (ParseTier::Heuristic, parse_list_items),
];

/// Micro-goal object as a provider may emit it. Every field is optional and
/// loosely typed; conversion coerces to the closed value sets.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMicroGoal {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default, alias = "estimated_time", alias = "time")]
    estimated_time: Option<Value>,
    #[serde(default)]
    difficulty: Option<Value>,
    #[serde(default)]
    order: Option<Value>,
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RawMicroGoal {
    fn into_micro_goal(self, position: u32) -> Option<MicroGoal> {
        let title = value_text(self.title.as_ref()).filter(|t| !t.is_empty())?;
        let description = value_text(self.description.as_ref()).unwrap_or_default();

        let estimated_time = match self.estimated_time.as_ref() {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|m| u32::try_from(m).ok())
                .map(EstimatedTime::from_minutes)
                .unwrap_or_default(),
            other => value_text(other)
                .and_then(|s| EstimatedTime::parse_lenient(&s))
                .unwrap_or_default(),
        };

        let difficulty = value_text(self.difficulty.as_ref())
            .and_then(|s| MicroGoalDifficulty::from_str(&s))
            .unwrap_or_default();

        let order = match self.order.as_ref() {
            Some(Value::Number(n)) => n.as_u64().and_then(|o| u32::try_from(o).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .unwrap_or(position);

        Some(MicroGoal {
            title,
            description,
            estimated_time,
            difficulty,
            order,
            is_done: false,
            due_date: None,
        })
    }
}

/// Slice from the first `[` to the last `]`, if both exist in that order.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Tier 1: decode an embedded JSON array.
fn parse_structured(text: &str) -> Option<Vec<MicroGoal>> {
    let json = extract_json_array(text)?;

    let items: Vec<Value> = match serde_json::from_str(json) {
        Ok(items) => items,
        Err(e) => {
            debug!(error = %e, "structured parse failed");
            return None;
        }
    };

    let goals: Vec<MicroGoal> = items
        .into_iter()
        .zip(1u32..)
        .filter_map(|(item, position)| {
            serde_json::from_value::<RawMicroGoal>(item)
                .ok()?
                .into_micro_goal(position)
        })
        .collect();

    (!goals.is_empty()).then_some(goals)
}

/// Strip a list marker (`-`, `*`, `12.`) from a trimmed line.
fn strip_list_marker(line: &str) -> Option<&str> {
    if line.starts_with(['-', '*']) {
        return Some(line.trim_start_matches(['-', '*']));
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        return line[digits..].strip_prefix('.');
    }

    None
}

/// Drop markdown bold/italic stars wrapping a list fragment.
fn strip_emphasis(fragment: &str) -> &str {
    fragment.trim().trim_matches('*').trim()
}

/// Tier 2: bullet and numbered lines, `title: description` split on the
/// first colon.
fn parse_list_items(text: &str) -> Option<Vec<MicroGoal>> {
    let goals: Vec<MicroGoal> = text
        .lines()
        .filter_map(|line| strip_list_marker(line.trim()))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once(':') {
            Some((title, description)) if !strip_emphasis(title).is_empty() => (
                strip_emphasis(title).to_string(),
                strip_emphasis(description).to_string(),
            ),
            Some((_, description)) => (strip_emphasis(description).to_string(), String::new()),
            None => (strip_emphasis(item).to_string(), String::new()),
        })
        .filter(|(title, _)| !title.is_empty())
        .zip(1u32..)
        .map(|((title, description), order)| {
            MicroGoal::new(title, description, order)
                .with_estimated_time(EstimatedTime::Min30)
                .with_difficulty(MicroGoalDifficulty::Medium)
        })
        .collect();

    (!goals.is_empty()).then_some(goals)
}

/// Multi-tier parser for provider output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse provider text, reporting the tier that succeeded.
    pub fn parse_with_tier(&self, text: &str) -> Option<(ParseTier, Vec<MicroGoal>)> {
        STRATEGIES.iter().find_map(|(tier, strategy)| {
            let mut goals = strategy(text)?;
            for goal in &mut goals {
                goal.is_done = false;
            }
            debug!(tier = tier.as_str(), count = goals.len(), "parsed provider response");
            Some((*tier, goals))
        })
    }

    /// Parse provider text. Returns an empty list when no tier finds
    /// anything.
    pub fn parse(&self, text: &str) -> Vec<MicroGoal> {
        self.parse_with_tier(text)
            .map(|(_, goals)| goals)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_ignores_surrounding_prose() {
        let text = "Here is the plan:\n[{\"title\":\"A\",\"description\":\"B\",\"estimatedTime\":\"30min\",\"difficulty\":\"Easy\",\"order\":1}]\nEnjoy!";
        let (tier, goals) = ResponseParser::new().parse_with_tier(text).unwrap();

        assert_eq!(tier, ParseTier::Structured);
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].title, "A");
        assert_eq!(goals[0].description, "B");
        assert_eq!(goals[0].estimated_time, EstimatedTime::Min30);
        assert_eq!(goals[0].difficulty, MicroGoalDifficulty::Easy);
        assert_eq!(goals[0].order, 1);
    }

    #[test]
    fn test_heuristic_numbered_list() {
        let text = "1. Research topic: read three articles\n2. Draft outline";
        let (tier, goals) = ResponseParser::new().parse_with_tier(text).unwrap();

        assert_eq!(tier, ParseTier::Heuristic);
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].title, "Research topic");
        assert_eq!(goals[0].description, "read three articles");
        assert_eq!(goals[0].order, 1);
        assert_eq!(goals[1].title, "Draft outline");
        assert_eq!(goals[1].description, "");
        assert_eq!(goals[1].order, 2);
        assert!(goals.iter().all(|g| g.estimated_time == EstimatedTime::Min30));
        assert!(goals.iter().all(|g| g.difficulty == MicroGoalDifficulty::Medium));
    }

    #[test]
    fn test_heuristic_splits_on_first_colon_only() {
        let goals = ResponseParser::new().parse("- Plan week: Monday: gym, Tuesday: rest");
        assert_eq!(goals[0].title, "Plan week");
        assert_eq!(goals[0].description, "Monday: gym, Tuesday: rest");
    }

    #[test]
    fn test_heuristic_strips_markdown_emphasis() {
        let text = "1. **Step 1**: Warm up\n2. **Stretch:** hamstrings\n- *Cool down*";
        let goals = ResponseParser::new().parse(text);

        let titles: Vec<&str> = goals.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Step 1", "Stretch", "Cool down"]);
        assert_eq!(goals[0].description, "Warm up");
        assert_eq!(goals[1].description, "hamstrings");
        assert_eq!(goals[2].description, "");
    }

    #[test]
    fn test_heuristic_skips_prose_and_numbers_surviving_lines() {
        let text = "Sure! Here you go:\n\n  * Buy shoes\nSome commentary\n- Jog 1km\n10. Stretch\n1.5 is not a list";
        let goals = ResponseParser::new().parse(text);

        let titles: Vec<&str> = goals.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy shoes", "Jog 1km", "Stretch", "5 is not a list"]);
        let orders: Vec<u32> = goals.iter().map(|g| g.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_json_falls_through_to_heuristic() {
        let text = "[not json\n- Step one\n- Step two]";
        let (tier, goals) = ResponseParser::new().parse_with_tier(text).unwrap();
        assert_eq!(tier, ParseTier::Heuristic);
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[1].title, "Step two]");
    }

    #[test]
    fn test_structured_coerces_loose_fields() {
        let text = r#"[
            {"title": "  Warm up  ", "estimatedTime": "1 hour", "difficulty": "very hard", "order": "3"},
            {"title": "", "description": "dropped"},
            {"title": "Cool down", "estimatedTime": 20, "isDone": true},
            "stray string"
        ]"#;
        let goals = ResponseParser::new().parse(text);

        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].title, "Warm up");
        assert_eq!(goals[0].description, "");
        assert_eq!(goals[0].estimated_time, EstimatedTime::Min60);
        assert_eq!(goals[0].difficulty, MicroGoalDifficulty::Hard);
        assert_eq!(goals[0].order, 3);
        assert_eq!(goals[1].estimated_time, EstimatedTime::Min20);
        assert_eq!(goals[1].order, 3);
        assert!(goals.iter().all(|g| !g.is_done));
    }

    #[test]
    fn test_nothing_parsable_yields_empty() {
        let parser = ResponseParser::new();
        assert!(parser.parse("I'm sorry, I can't help with that.").is_empty());
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("[]").is_empty());
        assert!(parser.parse("] backwards [").is_empty());
    }

    #[test]
    fn test_extract_json_array() {
        assert_eq!(extract_json_array("x [1, [2]] y"), Some("[1, [2]]"));
        assert_eq!(extract_json_array("no brackets"), None);
        assert_eq!(extract_json_array("]["), None);
    }
}
