//! `goalsplit progress`: tick off and edit micro-goals in a saved breakdown.
//!
//! The file is either the `breakdown --json` object or a bare micro-goal
//! array. Micro-goals are addressed by their `order`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cli::commands::breakdown::render_micro_goals;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{MicroGoal, MicroGoalPatch, Progress};

#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Saved breakdown (JSON object with "microGoals", or an array)
    #[arg(value_name = "PATH")]
    pub file: PathBuf,

    /// Flip completion of the micro-goal with this order (repeatable)
    #[arg(long, value_name = "ORDER")]
    pub toggle: Vec<u32>,

    /// Patch a micro-goal, e.g. 2='{"title":"Jog 2km","dueDate":"2026-11-01"}'
    #[arg(long, value_name = "ORDER=JSON", value_parser = parse_patch)]
    pub patch: Vec<(u32, MicroGoalPatch)>,

    /// Write the updated list back to the file
    #[arg(short, long)]
    pub write: bool,
}

fn parse_patch(raw: &str) -> Result<(u32, MicroGoalPatch), String> {
    let (order, json) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ORDER=JSON, got {raw}"))?;
    let order = order
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid order {order:?}: {e}"))?;
    let patch = serde_json::from_str(json).map_err(|e| format!("invalid patch JSON: {e}"))?;
    Ok((order, patch))
}

/// A saved breakdown as read from disk.
#[derive(Debug)]
struct SavedList {
    document: Value,
    goal: Option<String>,
    micro_goals: Vec<MicroGoal>,
}

impl SavedList {
    fn parse(raw: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(raw)?;
        let list = match &document {
            Value::Array(_) => document.clone(),
            Value::Object(map) => map
                .get("microGoals")
                .cloned()
                .ok_or_else(|| anyhow!("expected a \"microGoals\" field"))?,
            _ => bail!("expected a JSON object or array"),
        };
        let goal = document.get("goal").and_then(Value::as_str).map(str::to_string);
        let micro_goals = serde_json::from_value(list)?;

        Ok(Self {
            document,
            goal,
            micro_goals,
        })
    }

    fn find(&mut self, order: u32) -> Result<&mut MicroGoal> {
        self.micro_goals
            .iter_mut()
            .find(|m| m.order == order)
            .ok_or_else(|| anyhow!("No micro-goal with order {order}"))
    }

    fn apply(&mut self, toggles: &[u32], patches: &[(u32, MicroGoalPatch)]) -> Result<()> {
        for (order, patch) in patches {
            self.find(*order)?.apply_patch(patch);
        }
        for order in toggles {
            self.find(*order)?.toggle();
        }
        Ok(())
    }

    /// The original document with the micro-goals (and progress, when the
    /// document carries it) replaced.
    fn to_document(&self) -> Result<Value> {
        let list = serde_json::to_value(&self.micro_goals)?;
        match self.document.clone() {
            Value::Object(mut map) => {
                if map.contains_key("progress") {
                    map.insert(
                        "progress".to_string(),
                        serde_json::to_value(Progress::of(&self.micro_goals))?,
                    );
                }
                map.insert("microGoals".to_string(), list);
                Ok(Value::Object(map))
            }
            _ => Ok(list),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub progress: Progress,
    pub micro_goals: Vec<MicroGoal>,
}

impl CommandOutput for ProgressOutput {
    fn to_human(&self) -> String {
        let body = render_micro_goals(&self.micro_goals, &self.progress);
        match &self.goal {
            Some(goal) => format!("Goal: {goal}\n\n{body}"),
            None => body,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn load(path: &Path) -> Result<SavedList> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read micro-goal file {}", path.display()))?;
    SavedList::parse(&raw).with_context(|| format!("Invalid micro-goal file {}", path.display()))
}

pub async fn execute(args: ProgressArgs, json_mode: bool) -> Result<()> {
    let mut saved = load(&args.file)?;
    saved.apply(&args.toggle, &args.patch)?;

    if args.write {
        let document = serde_json::to_string_pretty(&saved.to_document()?)?;
        std::fs::write(&args.file, document)
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
        debug!(path = %args.file.display(), "micro-goal file updated");
    }

    let progress = Progress::of(&saved.micro_goals);
    output(
        &ProgressOutput {
            goal: saved.goal,
            progress,
            micro_goals: saved.micro_goals,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAVED: &str = r#"{
        "goal": "Run a 5k",
        "source": "template",
        "progress": {"completed": 0, "total": 3, "percentComplete": 0, "band": "low"},
        "microGoals": [
            {"title": "Buy shoes", "order": 1},
            {"title": "Jog 1km", "order": 2},
            {"title": "Jog 5km", "order": 3}
        ]
    }"#;

    #[test]
    fn test_parse_patch_argument() {
        let (order, patch) = parse_patch(r#"2={"title":"Jog 2km","isDone":true}"#).unwrap();
        assert_eq!(order, 2);
        assert_eq!(patch.title.as_deref(), Some("Jog 2km"));
        assert_eq!(patch.is_done, Some(true));

        assert!(parse_patch("2").is_err());
        assert!(parse_patch("two={}").is_err());
        assert!(parse_patch("2={not json").is_err());
    }

    #[test]
    fn test_toggle_and_patch_update_progress() {
        let mut saved = SavedList::parse(SAVED).unwrap();
        let patch = MicroGoalPatch {
            title: Some("   ".to_string()),
            due_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            ..Default::default()
        };

        saved.apply(&[1, 3], &[(2, patch)]).unwrap();

        assert_eq!(saved.goal.as_deref(), Some("Run a 5k"));
        assert!(saved.micro_goals[0].is_done);
        assert!(!saved.micro_goals[1].is_done);
        assert_eq!(saved.micro_goals[1].title, "Jog 1km", "blank title does not overwrite");
        assert_eq!(saved.micro_goals[1].due_date, NaiveDate::from_ymd_opt(2026, 11, 1));

        let progress = Progress::of(&saved.micro_goals);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.percent_complete, 67);
    }

    #[test]
    fn test_unknown_order_is_an_error() {
        let mut saved = SavedList::parse(SAVED).unwrap();
        let err = saved.apply(&[9], &[]).unwrap_err();
        assert!(err.to_string().contains("No micro-goal with order 9"));
    }

    #[test]
    fn test_document_keeps_shape() {
        let mut saved = SavedList::parse(SAVED).unwrap();
        saved.apply(&[2], &[]).unwrap();

        let document = saved.to_document().unwrap();
        assert_eq!(document["source"], "template");
        assert_eq!(document["microGoals"][1]["isDone"], true);
        assert_eq!(document["progress"]["completed"], 1);

        let mut bare = SavedList::parse(r#"[{"title": "Stretch", "order": 1}]"#).unwrap();
        bare.apply(&[1], &[]).unwrap();
        let document = bare.to_document().unwrap();
        assert!(document.is_array());
        assert_eq!(document[0]["isDone"], true);
        assert!(bare.goal.is_none());
    }

    #[test]
    fn test_rejects_unexpected_shapes() {
        assert!(SavedList::parse(r#"{"goal": "Run"}"#).is_err());
        assert!(SavedList::parse("42").is_err());
    }
}
