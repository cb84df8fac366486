//! Macro goal domain model.
//!
//! A macro goal is the user's top-level objective. `GoalDetails` carries the
//! metadata the breakdown pipeline reads; it is never mutated by the pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};

/// Normalize an enum spelling: lowercase, `_` and spaces become `-`.
fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', ' '], "-")
}

/// Deserialize an enum field leniently: `null`, non-strings and unknown
/// spellings all become the default variant.
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => T::from(s),
        _ => T::default(),
    })
}

/// Deserialize a target date from its leading `YYYY-MM-DD`, so full
/// timestamps such as `2026-05-01T00:00:00.000Z` are accepted. Anything
/// else becomes `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s
            .trim()
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()),
        _ => None,
    })
}

/// How hard the user expects the macro goal to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum GoalDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
}

impl GoalDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::VeryHard => "very-hard",
        }
    }

    /// Human label used when rendering prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::VeryHard => "Very Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match normalize_key(s).as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "very-hard" | "veryhard" => Some(Self::VeryHard),
            _ => None,
        }
    }
}

impl From<String> for GoalDifficulty {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

/// Weekly time budget the user can commit to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum TimeAvailable {
    Minimal,
    Limited,
    #[default]
    Medium,
    Substantial,
    Dedicated,
}

impl TimeAvailable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Limited => "limited",
            Self::Medium => "medium",
            Self::Substantial => "substantial",
            Self::Dedicated => "dedicated",
        }
    }

    /// Human label including the hours-per-week band.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal (< 2 hours/week)",
            Self::Limited => "Limited (2-5 hours/week)",
            Self::Medium => "Medium (5-10 hours/week)",
            Self::Substantial => "Substantial (10-20 hours/week)",
            Self::Dedicated => "Dedicated (20+ hours/week)",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match normalize_key(s).as_str() {
            "minimal" => Some(Self::Minimal),
            "limited" => Some(Self::Limited),
            "medium" => Some(Self::Medium),
            "substantial" => Some(Self::Substantial),
            "dedicated" => Some(Self::Dedicated),
            _ => None,
        }
    }
}

impl From<String> for TimeAvailable {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

/// Priority level for macro goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum GoalPriority {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match normalize_key(s).as_str() {
            "low" => Some(Self::Low),
            "medium" | "normal" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl From<String> for GoalPriority {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

/// Kind of macro goal; selects the base template table.
///
/// Unknown spellings resolve to `Achievement`, so every goal type has a
/// catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum GoalType {
    Habit,
    Learning,
    Project,
    #[default]
    Achievement,
}

impl GoalType {
    pub const ALL: [GoalType; 4] = [Self::Habit, Self::Learning, Self::Project, Self::Achievement];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Habit => "habit",
            Self::Learning => "learning",
            Self::Project => "project",
            Self::Achievement => "achievement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Habit => "Habit",
            Self::Learning => "Learning",
            Self::Project => "Project",
            Self::Achievement => "Achievement",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match normalize_key(s).as_str() {
            "habit" => Some(Self::Habit),
            "learning" => Some(Self::Learning),
            "project" => Some(Self::Project),
            "achievement" => Some(Self::Achievement),
            _ => None,
        }
    }

    /// Parse a goal type, falling back to `Achievement` for unknown input.
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }
}

impl From<String> for GoalType {
    fn from(s: String) -> Self {
        Self::parse_or_default(&s)
    }
}

/// Input to one breakdown: the macro goal and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetails {
    /// Required, non-empty title. Missing in input means blank, which
    /// `validate` rejects.
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form category tag (e.g. "fitness", "financial")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub difficulty: GoalDifficulty,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub time_available: TimeAvailable,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub priority: GoalPriority,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub goal_type: GoalType,
    /// Persistence correlation only; ignored by the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    /// Persistence correlation only; ignored by the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl GoalDetails {
    /// Create goal details with the given title and default metadata.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_difficulty(mut self, difficulty: GoalDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_time_available(mut self, time_available: TimeAvailable) -> Self {
        self.time_available = time_available;
        self
    }

    pub fn with_priority(mut self, priority: GoalPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_goal_type(mut self, goal_type: GoalType) -> Self {
        self.goal_type = goal_type;
        self
    }

    /// Description if present and not blank.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Category normalized to lowercase, if present and not blank.
    pub fn category_key(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
    }

    /// Validate these details. A blank title is the one input the pipeline
    /// refuses to default.
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Goal title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
