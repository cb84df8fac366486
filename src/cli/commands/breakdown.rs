//! `goalsplit breakdown`: run the full pipeline for one goal.

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;
use serde::Serialize;

use crate::adapters::providers::ProviderRegistry;
use crate::cli::commands::GoalInputArgs;
use crate::cli::display::{
    colorize_difficulty, colorize_progress, done_marker, list_table, render_list,
};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{Config, MicroGoal, Progress, ProviderKind};
use crate::services::{BreakdownOutcome, BreakdownService, BreakdownSettings};

#[derive(Args, Debug)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub goal: GoalInputArgs,

    /// Skip the provider and answer from the template catalog
    #[arg(long)]
    pub offline: bool,

    /// Provider timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownOutput {
    pub goal: String,
    /// Parse tier that produced the list, or "template"
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub total_minutes: u32,
    pub progress: Progress,
    pub micro_goals: Vec<MicroGoal>,
}

impl BreakdownOutput {
    pub fn new(goal: &str, outcome: BreakdownOutcome) -> Self {
        let source = outcome.source().to_string();
        let (micro_goals, fallback_reason) = match outcome {
            BreakdownOutcome::Parsed { micro_goals, .. } => (micro_goals, None),
            BreakdownOutcome::Defaulted { micro_goals, reason } => {
                (micro_goals, Some(reason.to_string()))
            }
        };

        Self {
            goal: goal.to_string(),
            source,
            fallback_reason,
            total_minutes: micro_goals.iter().map(|m| m.estimated_time.minutes()).sum(),
            progress: Progress::of(&micro_goals),
            micro_goals,
        }
    }
}

/// Micro-goal list table followed by the total time and progress line.
pub(crate) fn render_micro_goals(micro_goals: &[MicroGoal], progress: &Progress) -> String {
    let mut table = list_table(&["#", "", "title", "time", "difficulty", "description"]);
    for goal in micro_goals {
        table.add_row(vec![
            Cell::new(goal.order),
            Cell::new(done_marker(goal.is_done)),
            Cell::new(truncate(&goal.title, 48)),
            Cell::new(goal.estimated_time),
            Cell::new(colorize_difficulty(goal.difficulty)),
            Cell::new(truncate(&goal.description, 60)),
        ]);
    }

    let total_minutes: u32 = micro_goals.iter().map(|m| m.estimated_time.minutes()).sum();
    let done = format!(
        "{}/{} done ({}%)",
        progress.completed, progress.total, progress.percent_complete
    );
    format!(
        "{}\n\nTotal time: {total_minutes} min | Progress: {}",
        render_list("micro-goal", &table, micro_goals.len()),
        colorize_progress(done, progress.band)
    )
}

impl CommandOutput for BreakdownOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("Goal: {}", self.goal)];
        match &self.fallback_reason {
            Some(reason) => lines.push(format!("Source: {} ({reason})", self.source)),
            None => lines.push(format!("Source: {}", self.source)),
        }
        lines.push(String::new());
        lines.push(render_micro_goals(&self.micro_goals, &self.progress));

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Apply command-line overrides to a copy of the loaded config, so the HTTP
/// client and the pipeline deadline see the same values.
fn effective_config(config: &Config, args: &BreakdownArgs) -> Config {
    let mut config = config.clone();
    if args.offline {
        config.provider.kind = ProviderKind::Offline;
    }
    if let Some(secs) = args.timeout {
        config.breakdown.timeout_secs = secs;
    }
    config
}

pub async fn execute(args: BreakdownArgs, config: &Config, json_mode: bool) -> Result<()> {
    let config = effective_config(config, &args);
    let goal = args.goal.into_goal_details()?;

    let provider = ProviderRegistry::from_config(&config).create_by_kind(config.provider.kind);
    let settings = BreakdownSettings::from_config(&config);
    let service = BreakdownService::with_settings(provider, settings);
    let outcome = service.breakdown_detailed(&goal).await?;

    output(&BreakdownOutput::new(&goal.title, outcome), json_mode);
    Ok(())
}
