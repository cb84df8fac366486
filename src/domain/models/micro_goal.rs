//! Micro-goal domain model.
//!
//! Micro-goals are the small, time-boxed steps a macro goal is broken into.
//! The breakdown pipeline creates them with `is_done = false`; after that the
//! completion flag belongs to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Supported duration labels for a single micro-goal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum EstimatedTime {
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "20min")]
    Min20,
    #[serde(rename = "25min")]
    Min25,
    #[default]
    #[serde(rename = "30min")]
    Min30,
    #[serde(rename = "45min")]
    Min45,
    #[serde(rename = "60min")]
    Min60,
    #[serde(rename = "90min")]
    Min90,
}

impl EstimatedTime {
    pub const ALL: [EstimatedTime; 7] = [
        Self::Min15,
        Self::Min20,
        Self::Min25,
        Self::Min30,
        Self::Min45,
        Self::Min60,
        Self::Min90,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min15 => "15min",
            Self::Min20 => "20min",
            Self::Min25 => "25min",
            Self::Min30 => "30min",
            Self::Min45 => "45min",
            Self::Min60 => "60min",
            Self::Min90 => "90min",
        }
    }

    pub fn minutes(&self) -> u32 {
        match self {
            Self::Min15 => 15,
            Self::Min20 => 20,
            Self::Min25 => 25,
            Self::Min30 => 30,
            Self::Min45 => 45,
            Self::Min60 => 60,
            Self::Min90 => 90,
        }
    }

    /// Closest supported label to a number of minutes. Ties resolve to the
    /// shorter label.
    pub fn from_minutes(minutes: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .min_by_key(|t| t.minutes().abs_diff(minutes))
            .unwrap_or_default()
    }

    /// Parse free-form duration text such as `"45min"`, `"45 minutes"`,
    /// `"1 hour"` or `"1.5 hrs"`. Returns `None` when no number is present.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let start = lower.find(|c: char| c.is_ascii_digit())?;
        let number: String = lower[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let value: f64 = number.parse().ok()?;
        let unit = &lower[start + number.len()..];
        let is_hours = unit.trim_start().starts_with('h');
        let minutes = if is_hours { value * 60.0 } else { value };
        if !minutes.is_finite() || minutes < 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = minutes.round() as u32;
        Some(Self::from_minutes(rounded))
    }
}

impl From<String> for EstimatedTime {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s).unwrap_or_default()
    }
}

impl std::fmt::Display for EstimatedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty of a single micro-goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum MicroGoalDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl MicroGoalDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "easy" => Some(Self::Easy),
            "medium" | "moderate" => Some(Self::Medium),
            "hard" | "very-hard" | "veryhard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl From<String> for MicroGoalDifficulty {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

impl std::fmt::Display for MicroGoalDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One actionable step toward a macro goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroGoal {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_time: EstimatedTime,
    #[serde(default)]
    pub difficulty: MicroGoalDifficulty,
    /// Position in the execution sequence, 1-based
    pub order: u32,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl MicroGoal {
    pub fn new(title: impl Into<String>, description: impl Into<String>, order: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            estimated_time: EstimatedTime::default(),
            difficulty: MicroGoalDifficulty::default(),
            order,
            is_done: false,
            due_date: None,
        }
    }

    pub fn with_estimated_time(mut self, estimated_time: EstimatedTime) -> Self {
        self.estimated_time = estimated_time;
        self
    }

    pub fn with_difficulty(mut self, difficulty: MicroGoalDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Flip the completion flag.
    pub fn toggle(&mut self) {
        self.is_done = !self.is_done;
    }

    /// Apply a partial update. Blank strings do not overwrite.
    pub fn apply_patch(&mut self, patch: &MicroGoalPatch) {
        if let Some(title) = patch.title.as_deref().filter(|t| !t.trim().is_empty()) {
            self.title = title.to_string();
        }
        if let Some(description) = patch.description.as_deref().filter(|d| !d.is_empty()) {
            self.description = description.to_string();
        }
        if let Some(is_done) = patch.is_done {
            self.is_done = is_done;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
    }
}

/// Partial update to a micro-goal, as sent by a list UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroGoalPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_done: Option<bool>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// A pre-authored micro-goal with `{GOAL}` / `{DESCRIPTION}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroGoalTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub estimated_time: EstimatedTime,
    pub difficulty: MicroGoalDifficulty,
    pub order: u32,
}

/// Coarse progress band, used for colouring progress in list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    /// Below 25%
    Low,
    /// 25% to 49%
    Fair,
    /// 50% to 74%
    Good,
    /// 75% and above
    Strong,
}

impl ProgressBand {
    pub fn for_percent(percent: u32) -> Self {
        match percent {
            0..=24 => Self::Low,
            25..=49 => Self::Fair,
            50..=74 => Self::Good,
            _ => Self::Strong,
        }
    }
}

/// Completion summary over a list of micro-goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent_complete: u32,
    pub band: ProgressBand,
}

impl Progress {
    pub fn of(micro_goals: &[MicroGoal]) -> Self {
        let total = micro_goals.len();
        let completed = micro_goals.iter().filter(|m| m.is_done).count();
        // round half up
        let percent_complete = if total == 0 {
            0
        } else {
            u32::try_from((completed * 200 + total) / (total * 2)).unwrap_or(100)
        };
        Self {
            completed,
            total,
            percent_complete,
            band: ProgressBand::for_percent(percent_complete),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_time_parse_lenient() {
        assert_eq!(EstimatedTime::parse_lenient("45min"), Some(EstimatedTime::Min45));
        assert_eq!(EstimatedTime::parse_lenient("45 minutes"), Some(EstimatedTime::Min45));
        assert_eq!(EstimatedTime::parse_lenient("1 hour"), Some(EstimatedTime::Min60));
        assert_eq!(EstimatedTime::parse_lenient("1.5 hrs"), Some(EstimatedTime::Min90));
        assert_eq!(EstimatedTime::parse_lenient("10min"), Some(EstimatedTime::Min15));
        assert_eq!(EstimatedTime::parse_lenient("3 hours"), Some(EstimatedTime::Min90));
        assert_eq!(EstimatedTime::parse_lenient("a while"), None);
    }

    #[test]
    fn test_from_minutes_ties_prefer_shorter() {
        // 75 is equidistant from 60 and 90
        assert_eq!(EstimatedTime::from_minutes(75), EstimatedTime::Min60);
        assert_eq!(EstimatedTime::from_minutes(0), EstimatedTime::Min15);
    }

    #[test]
    fn test_micro_goal_serializes_camel_case() {
        let goal = MicroGoal::new("Draft outline", "", 2)
            .with_estimated_time(EstimatedTime::Min45)
            .with_difficulty(MicroGoalDifficulty::Hard);
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["estimatedTime"], "45min");
        assert_eq!(json["difficulty"], "Hard");
        assert_eq!(json["isDone"], false);
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn test_apply_patch_ignores_blank_fields() {
        let mut goal = MicroGoal::new("Original", "Keep me", 1);
        goal.apply_patch(&MicroGoalPatch {
            title: Some("  ".to_string()),
            description: Some(String::new()),
            is_done: Some(true),
            due_date: NaiveDate::from_ymd_opt(2026, 11, 1),
        });
        assert_eq!(goal.title, "Original");
        assert_eq!(goal.description, "Keep me");
        assert!(goal.is_done);
        assert_eq!(goal.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));
    }

    #[test]
    fn test_progress() {
        let mut goals: Vec<MicroGoal> = (1..=3).map(|i| MicroGoal::new("Step", "", i)).collect();
        assert_eq!(Progress::of(&goals).percent_complete, 0);
        assert_eq!(Progress::of(&goals).band, ProgressBand::Low);

        goals[0].toggle();
        let progress = Progress::of(&goals);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.percent_complete, 33);
        assert_eq!(progress.band, ProgressBand::Fair);

        goals[1].toggle();
        assert_eq!(Progress::of(&goals).percent_complete, 67);
        assert_eq!(Progress::of(&goals).band, ProgressBand::Good);

        goals[2].toggle();
        assert_eq!(Progress::of(&goals).band, ProgressBand::Strong);
        assert_eq!(Progress::of(&[]).percent_complete, 0);
    }
}
