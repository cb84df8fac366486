//! `goalsplit templates`: inspect the fallback catalog.

use anyhow::{anyhow, Result};
use clap::Args;
use comfy_table::Cell;
use serde::Serialize;

use crate::cli::display::{colorize_difficulty, list_table, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{
    EstimatedTime, GoalDetails, GoalType, MicroGoal, MicroGoalDifficulty, MicroGoalTemplate,
};
use crate::services::TemplateCatalog;

#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Goal type (habit, learning, project, achievement)
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "habit")]
    pub goal_type: String,

    /// Category whose table replaces the type's (fitness, financial)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Fill the placeholders in for this goal title
    #[arg(short, long)]
    pub goal: Option<String>,

    /// Goal description used with --goal
    #[arg(short, long, requires = "goal")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRow {
    pub order: u32,
    pub title: String,
    pub description: String,
    pub estimated_time: EstimatedTime,
    pub difficulty: MicroGoalDifficulty,
}

impl From<&MicroGoalTemplate> for TemplateRow {
    fn from(t: &MicroGoalTemplate) -> Self {
        Self {
            order: t.order,
            title: t.title.to_string(),
            description: t.description.to_string(),
            estimated_time: t.estimated_time,
            difficulty: t.difficulty,
        }
    }
}

impl From<MicroGoal> for TemplateRow {
    fn from(m: MicroGoal) -> Self {
        Self {
            order: m.order,
            title: m.title,
            description: m.description,
            estimated_time: m.estimated_time,
            difficulty: m.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListOutput {
    pub goal_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether placeholders were substituted
    pub instantiated: bool,
    pub templates: Vec<TemplateRow>,
}

impl CommandOutput for TemplateListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["#", "title", "time", "difficulty", "description"]);
        for row in &self.templates {
            table.add_row(vec![
                Cell::new(row.order),
                Cell::new(truncate(&row.title, 48)),
                Cell::new(row.estimated_time),
                Cell::new(colorize_difficulty(row.difficulty)),
                Cell::new(truncate(&row.description, 60)),
            ]);
        }

        let heading = match &self.category {
            Some(category) => {
                format!("Templates for {} goals, category {category}", self.goal_type)
            }
            None => format!("Templates for {} goals", self.goal_type),
        };
        format!("{heading}\n\n{}", render_list("template", &table, self.templates.len()))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn build_output(args: TemplatesArgs) -> Result<TemplateListOutput> {
    let goal_type = GoalType::from_str(&args.goal_type)
        .ok_or_else(|| anyhow!("Invalid goal type: {}", args.goal_type))?;
    let catalog = TemplateCatalog::new();

    let (templates, instantiated) = match args.goal {
        Some(title) => {
            let mut goal = GoalDetails::new(title).with_goal_type(goal_type);
            goal.category.clone_from(&args.category);
            goal.description = args.description;
            goal.validate()?;
            let rows = catalog
                .defaults_for(&goal)
                .into_iter()
                .map(TemplateRow::from)
                .collect();
            (rows, true)
        }
        None => {
            let templates =
                catalog.refine(catalog.templates_for(goal_type), args.category.as_deref());
            (templates.iter().map(TemplateRow::from).collect(), false)
        }
    };

    Ok(TemplateListOutput {
        goal_type: goal_type.as_str().to_string(),
        category: args.category,
        instantiated,
        templates,
    })
}

pub async fn execute(args: TemplatesArgs, json_mode: bool) -> Result<()> {
    output(&build_output(args)?, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(goal_type: &str) -> TemplatesArgs {
        TemplatesArgs {
            goal_type: goal_type.to_string(),
            category: None,
            goal: None,
            description: None,
        }
    }

    #[test]
    fn test_raw_templates_keep_placeholders() {
        let out = build_output(args("learning")).unwrap();
        assert!(!out.instantiated);
        assert_eq!(out.templates.len(), 8);
        assert!(out.templates.iter().any(|t| t.title.contains("{GOAL}")));
    }

    #[test]
    fn test_instantiated_with_category() {
        let out = build_output(TemplatesArgs {
            category: Some("Fitness".to_string()),
            goal: Some("Run a marathon".to_string()),
            ..args("achievement")
        })
        .unwrap();

        assert!(out.instantiated);
        assert!(out.templates.iter().all(|t| !t.title.contains("{GOAL}")));
        assert_eq!(out.templates[0].order, 1);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(build_output(args("chores")).is_err());
    }
}
