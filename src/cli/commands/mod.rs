//! CLI command implementations.

pub mod breakdown;
pub mod progress;
pub mod prompt;
pub mod templates;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;

use crate::domain::models::{GoalDetails, GoalDifficulty, GoalPriority, GoalType, TimeAvailable};

/// Goal description flags shared by `breakdown` and `prompt`.
#[derive(Args, Debug, Clone, Default)]
pub struct GoalInputArgs {
    /// Goal title
    pub title: Option<String>,

    /// Read the goal from a JSON file (camelCase fields); flags override it
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Goal description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Category (e.g. fitness, financial)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Goal type (habit, learning, project, achievement)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub goal_type: Option<String>,

    /// Difficulty (easy, medium, hard, very-hard)
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Weekly time (minimal, limited, medium, substantial, dedicated)
    #[arg(long = "time", value_name = "TIME")]
    pub time_available: Option<String>,

    /// Priority (low, medium, high, critical)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Target date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub target_date: Option<NaiveDate>,
}

impl GoalInputArgs {
    /// Build goal details from the input file (if any) and flags.
    ///
    /// Flag values are checked strictly here; only provider output is
    /// coerced leniently.
    pub fn into_goal_details(self) -> Result<GoalDetails> {
        let mut goal = match &self.input {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read goal file {}", path.display()))?;
                serde_json::from_str::<GoalDetails>(&raw)
                    .with_context(|| format!("Invalid goal JSON in {}", path.display()))?
            }
            None => GoalDetails::default(),
        };

        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(description) = self.description {
            goal.description = Some(description);
        }
        if let Some(category) = self.category {
            goal.category = Some(category);
        }
        if let Some(date) = self.target_date {
            goal.target_date = Some(date);
        }
        if let Some(goal_type) = self.goal_type {
            goal.goal_type = GoalType::from_str(&goal_type)
                .ok_or_else(|| anyhow!("Invalid goal type: {goal_type}"))?;
        }
        if let Some(difficulty) = self.difficulty {
            goal.difficulty = GoalDifficulty::from_str(&difficulty)
                .ok_or_else(|| anyhow!("Invalid difficulty: {difficulty}"))?;
        }
        if let Some(time) = self.time_available {
            goal.time_available = TimeAvailable::from_str(&time)
                .ok_or_else(|| anyhow!("Invalid time available: {time}"))?;
        }
        if let Some(priority) = self.priority {
            goal.priority = GoalPriority::from_str(&priority)
                .ok_or_else(|| anyhow!("Invalid priority: {priority}"))?;
        }

        if goal.title.trim().is_empty() {
            bail!("A goal title is required (positional argument or \"title\" in --input)");
        }
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(title: &str) -> GoalInputArgs {
        GoalInputArgs {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_build_goal() {
        let goal = GoalInputArgs {
            goal_type: Some("learning".to_string()),
            priority: Some("high".to_string()),
            target_date: NaiveDate::from_ymd_opt(2026, 12, 31),
            ..args("Learn Spanish")
        }
        .into_goal_details()
        .unwrap();

        assert_eq!(goal.title, "Learn Spanish");
        assert_eq!(goal.goal_type, GoalType::Learning);
        assert_eq!(goal.priority, GoalPriority::High);
        assert_eq!(goal.target_date, NaiveDate::from_ymd_opt(2026, 12, 31));
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let err = GoalInputArgs {
            goal_type: Some("hobby".to_string()),
            ..args("Paint")
        }
        .into_goal_details()
        .unwrap_err();
        assert!(err.to_string().contains("Invalid goal type"));
    }

    #[test]
    fn test_missing_title_is_rejected() {
        assert!(GoalInputArgs::default().into_goal_details().is_err());
        assert!(args("   ").into_goal_details().is_err());
    }

    #[test]
    fn test_input_file_with_flag_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"title": "Save money", "category": "financial", "goalType": "project"}}"#
        )
        .unwrap();

        let goal = GoalInputArgs {
            input: Some(file.path().to_path_buf()),
            goal_type: Some("achievement".to_string()),
            ..Default::default()
        }
        .into_goal_details()
        .unwrap();

        assert_eq!(goal.title, "Save money");
        assert_eq!(goal.category.as_deref(), Some("financial"));
        assert_eq!(goal.goal_type, GoalType::Achievement);
    }

    #[test]
    fn test_input_file_without_title_uses_positional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"category": "fitness", "goalType": "habit"}}"#).unwrap();

        let goal = GoalInputArgs {
            input: Some(file.path().to_path_buf()),
            ..args("Run 5k")
        }
        .into_goal_details()
        .unwrap();

        assert_eq!(goal.title, "Run 5k");
        assert_eq!(goal.category.as_deref(), Some("fitness"));
        assert_eq!(goal.goal_type, GoalType::Habit);

        let err = GoalInputArgs {
            input: Some(file.path().to_path_buf()),
            ..Default::default()
        }
        .into_goal_details()
        .unwrap_err();
        assert!(err.to_string().contains("A goal title is required"));
    }
}
