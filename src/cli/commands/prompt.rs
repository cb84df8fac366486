//! `goalsplit prompt`: show the provider prompt without calling it.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::commands::GoalInputArgs;
use crate::cli::output::{output, CommandOutput};
use crate::services::PromptBuilder;

#[derive(Args, Debug)]
pub struct PromptArgs {
    #[command(flatten)]
    pub goal: GoalInputArgs,
}

#[derive(Debug, Serialize)]
pub struct PromptOutput {
    pub prompt: String,
}

impl CommandOutput for PromptOutput {
    fn to_human(&self) -> String {
        self.prompt.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: PromptArgs, json_mode: bool) -> Result<()> {
    let goal = args.goal.into_goal_details()?;
    let prompt = PromptBuilder::new().build(&goal);
    output(&PromptOutput { prompt }, json_mode);
    Ok(())
}
