//! Deterministic micro-goal templates.
//!
//! The catalog is the fallback tier of the breakdown pipeline: it always
//! resolves to a non-empty, contiguously ordered list. Base tables are keyed
//! by goal type; a few categories carry their own table which replaces the
//! base one wholesale.

use tracing::debug;

use crate::domain::models::{
    EstimatedTime as T, GoalDetails, GoalType, MicroGoal, MicroGoalDifficulty as D,
    MicroGoalTemplate,
};

pub const GOAL_PLACEHOLDER: &str = "{GOAL}";
pub const DESCRIPTION_PLACEHOLDER: &str = "{DESCRIPTION}";

const fn tpl(
    title: &'static str,
    description: &'static str,
    estimated_time: T,
    difficulty: D,
    order: u32,
) -> MicroGoalTemplate {
    MicroGoalTemplate {
        title,
        description,
        estimated_time,
        difficulty,
        order,
    }
}

#[rustfmt::skip]
static HABIT: [MicroGoalTemplate; 8] = [
    tpl("Research best practices for {GOAL}", "Find articles, videos, or books about establishing this habit successfully", T::Min30, D::Easy, 1),
    tpl("Define your specific habit routine", "Write out exactly what your {GOAL} habit will look like day-to-day", T::Min20, D::Medium, 2),
    tpl("Set up a tracking system", "Create a habit tracker for {GOAL} in your preferred app or notebook", T::Min15, D::Easy, 3),
    tpl("Identify potential obstacles", "List what might get in the way of your {GOAL} habit", T::Min20, D::Medium, 4),
    tpl("Create environmental triggers", "Set up reminders or cues in your environment for {GOAL}", T::Min25, D::Medium, 5),
    tpl("Practice habit for first time", "Complete {GOAL} once and note what worked and what didn't", T::Min30, D::Medium, 6),
    tpl("Establish accountability", "Tell a friend or family member about your {GOAL} commitment", T::Min15, D::Easy, 7),
    tpl("Design a reward system", "Create meaningful rewards for sticking with {GOAL}", T::Min20, D::Easy, 8),
];

#[rustfmt::skip]
static LEARNING: [MicroGoalTemplate; 8] = [
    tpl("Define learning objectives for {GOAL}", "Write specific, measurable outcomes for what you want to learn", T::Min30, D::Medium, 1),
    tpl("Research learning resources", "Find the best books, courses, videos or mentors for {GOAL}", T::Min45, D::Medium, 2),
    tpl("Create a learning schedule", "Set up regular time blocks dedicated to {GOAL}", T::Min20, D::Easy, 3),
    tpl("Set up note-taking system", "Prepare a method to document what you learn about {GOAL}", T::Min20, D::Easy, 4),
    tpl("Complete first learning session", "Go through your first structured study session for {GOAL}", T::Min60, D::Medium, 5),
    tpl("Create practice exercises", "Design ways to actively practice what you're learning about {GOAL}", T::Min30, D::Medium, 6),
    tpl("Find a study partner or community", "Connect with others learning similar material to {GOAL}", T::Min30, D::Medium, 7),
    tpl("Schedule review sessions", "Plan regular reviews to reinforce your {GOAL} learning", T::Min15, D::Easy, 8),
];

#[rustfmt::skip]
static PROJECT: [MicroGoalTemplate; 8] = [
    tpl("Define project scope for {GOAL}", "Clearly define what's included and not included in your project", T::Min45, D::Medium, 1),
    tpl("Break down main components", "List the major parts or phases needed to complete {GOAL}", T::Min30, D::Medium, 2),
    tpl("Create project timeline", "Establish deadlines for each component of {GOAL}", T::Min30, D::Medium, 3),
    tpl("Identify required resources", "List all tools, materials, and help needed for {GOAL}", T::Min20, D::Easy, 4),
    tpl("Set up project management", "Create a system to track progress on {GOAL}", T::Min30, D::Medium, 5),
    tpl("Complete first project task", "Finish the first actionable item for {GOAL}", T::Min60, D::Medium, 6),
    tpl("Plan for obstacles", "Identify potential issues and create contingency plans for {GOAL}", T::Min30, D::Medium, 7),
    tpl("Schedule regular reviews", "Set up times to review progress and adjust plans for {GOAL}", T::Min15, D::Easy, 8),
];

#[rustfmt::skip]
static ACHIEVEMENT: [MicroGoalTemplate; 8] = [
    tpl("Research success factors for {GOAL}", "Learn what leads to success for this type of goal", T::Min45, D::Medium, 1),
    tpl("Set measurable milestones", "Create checkpoints to track progress toward {GOAL}", T::Min30, D::Medium, 2),
    tpl("Identify required skills", "List skills you need to develop to achieve {GOAL}", T::Min30, D::Easy, 3),
    tpl("Create detailed action plan", "Map out specific steps to achieve {GOAL}", T::Min45, D::Medium, 4),
    tpl("Gather necessary resources", "Collect tools, materials, or information needed for {GOAL}", T::Min30, D::Medium, 5),
    tpl("Complete first milestone task", "Finish the first concrete action toward {GOAL}", T::Min60, D::Medium, 6),
    tpl("Establish accountability system", "Set up ways to stay accountable to {GOAL}", T::Min20, D::Easy, 7),
    tpl("Create tracking mechanism", "Build a way to measure your progress toward {GOAL}", T::Min30, D::Medium, 8),
];

#[rustfmt::skip]
static FITNESS: [MicroGoalTemplate; 8] = [
    tpl("Research fitness techniques for {GOAL}", "Find proper form and methods for your fitness goal", T::Min30, D::Medium, 1),
    tpl("Create a workout schedule", "Plan which days and times you'll work on {GOAL}", T::Min20, D::Easy, 2),
    tpl("Set up tracking metrics", "Decide how you'll measure progress on {GOAL}", T::Min15, D::Easy, 3),
    tpl("Prepare workout environment", "Set up the space or equipment you need for {GOAL}", T::Min30, D::Medium, 4),
    tpl("Complete first workout", "Do your first session focused on {GOAL}", T::Min45, D::Medium, 5),
    tpl("Plan nutrition support", "Research and plan nutrition to support your {GOAL}", T::Min30, D::Medium, 6),
    tpl("Schedule rest days", "Plan appropriate recovery for {GOAL}", T::Min15, D::Easy, 7),
    tpl("Create progress tracking", "Set up a system to record your improvements toward {GOAL}", T::Min20, D::Easy, 8),
];

#[rustfmt::skip]
static FINANCIAL: [MicroGoalTemplate; 8] = [
    tpl("Research best practices for {GOAL}", "Learn expert strategies related to your financial goal", T::Min45, D::Medium, 1),
    tpl("Analyze current financial situation", "Review your current status related to {GOAL}", T::Min60, D::Hard, 2),
    tpl("Set specific numerical targets", "Define exact numbers and deadlines for {GOAL}", T::Min30, D::Medium, 3),
    tpl("Create tracking spreadsheet", "Build a system to monitor progress on {GOAL}", T::Min45, D::Medium, 4),
    tpl("Identify necessary adjustments", "Determine what changes are needed to achieve {GOAL}", T::Min30, D::Medium, 5),
    tpl("Implement first financial change", "Make the first concrete change toward {GOAL}", T::Min30, D::Medium, 6),
    tpl("Schedule regular reviews", "Set up times to check progress on {GOAL}", T::Min15, D::Easy, 7),
    tpl("Create accountability system", "Set up ways to stay on track with {GOAL}", T::Min20, D::Easy, 8),
];

/// Read-only catalog of micro-goal templates.
///
/// All tables are `static`, so the catalog is safe to use from any number of
/// concurrent breakdowns without synchronisation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCatalog;

impl TemplateCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Base templates for a goal type.
    pub fn templates_for(&self, goal_type: GoalType) -> &'static [MicroGoalTemplate] {
        match goal_type {
            GoalType::Habit => &HABIT,
            GoalType::Learning => &LEARNING,
            GoalType::Project => &PROJECT,
            GoalType::Achievement => &ACHIEVEMENT,
        }
    }

    /// Base templates for a raw goal type string; unknown strings use the
    /// achievement table.
    pub fn templates_for_name(&self, goal_type: &str) -> &'static [MicroGoalTemplate] {
        self.templates_for(GoalType::parse_or_default(goal_type))
    }

    /// Category-specific table, if the category has one.
    pub fn category_templates(&self, category: &str) -> Option<&'static [MicroGoalTemplate]> {
        match category.trim().to_lowercase().as_str() {
            "fitness" => Some(&FITNESS),
            "financial" => Some(&FINANCIAL),
            _ => None,
        }
    }

    /// Refine base templates by category.
    ///
    /// A category table replaces the base table outright; the two are never
    /// merged. Categories without a table leave the base untouched.
    pub fn refine(
        &self,
        base: &'static [MicroGoalTemplate],
        category: Option<&str>,
    ) -> &'static [MicroGoalTemplate] {
        category
            .and_then(|c| self.category_templates(c))
            .unwrap_or(base)
    }

    /// Turn templates into micro-goals for a concrete goal.
    ///
    /// Every `{GOAL}` becomes the goal title and every `{DESCRIPTION}` the
    /// goal description. Without a description, or with a blank one, the
    /// `{DESCRIPTION}` placeholder is left as is.
    pub fn instantiate(
        &self,
        templates: &[MicroGoalTemplate],
        goal: &GoalDetails,
    ) -> Vec<MicroGoal> {
        let fill = |text: &str| -> String {
            let text = text.replace(GOAL_PLACEHOLDER, &goal.title);
            match goal.description_text() {
                Some(description) => text.replace(DESCRIPTION_PLACEHOLDER, description),
                None => text,
            }
        };

        templates
            .iter()
            .map(|t| MicroGoal {
                title: fill(t.title),
                description: fill(t.description),
                estimated_time: t.estimated_time,
                difficulty: t.difficulty,
                order: t.order,
                is_done: false,
                due_date: None,
            })
            .collect()
    }

    /// Full fallback for a goal: type lookup, category refinement and
    /// placeholder substitution.
    pub fn defaults_for(&self, goal: &GoalDetails) -> Vec<MicroGoal> {
        let category = goal.category_key();
        let base = self.templates_for(goal.goal_type);
        let templates = self.refine(base, category.as_deref());

        debug!(
            goal_type = goal.goal_type.as_str(),
            category = category.as_deref().unwrap_or("none"),
            category_override = !std::ptr::eq(templates, base),
            count = templates.len(),
            "resolved default templates"
        );

        self.instantiate(templates, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous(goals: &[MicroGoal]) {
        let orders: Vec<u32> = goals.iter().map(|g| g.order).collect();
        let expected: Vec<u32> = (1..=u32::try_from(goals.len()).unwrap()).collect();
        assert_eq!(orders, expected);
    }

    #[test]
    fn test_every_table_has_eight_contiguous_items() {
        let catalog = TemplateCatalog::new();
        let tables = GoalType::ALL
            .iter()
            .map(|t| catalog.templates_for(*t))
            .chain(["fitness", "financial"].iter().filter_map(|c| catalog.category_templates(c)));

        for table in tables {
            assert_eq!(table.len(), 8);
            for (i, t) in table.iter().enumerate() {
                assert_eq!(t.order as usize, i + 1);
                assert!(!t.title.is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_goal_type_uses_achievement() {
        let catalog = TemplateCatalog::new();
        assert_eq!(
            catalog.templates_for_name("unknown"),
            catalog.templates_for(GoalType::Achievement)
        );
    }

    #[test]
    fn test_refine_replaces_base_for_known_category() {
        let catalog = TemplateCatalog::new();
        let base = catalog.templates_for(GoalType::Habit);

        let refined = catalog.refine(base, Some("fitness"));
        assert_eq!(refined[0].title, "Research fitness techniques for {GOAL}");
        assert!(refined.iter().all(|t| !base.contains(t)));

        assert_eq!(catalog.refine(base, Some("career")), base);
        assert_eq!(catalog.refine(base, None), base);
    }

    #[test]
    fn test_instantiate_replaces_goal_placeholder() {
        let catalog = TemplateCatalog::new();
        let goal = GoalDetails::new("Learn Spanish");
        let goals = catalog.instantiate(catalog.templates_for(GoalType::Achievement), &goal);

        assert_eq!(goals.len(), 8);
        for g in &goals {
            assert!(!g.title.contains(GOAL_PLACEHOLDER));
            assert!(!g.description.contains(GOAL_PLACEHOLDER));
            assert!(!g.is_done);
        }
        assert_eq!(goals[0].title, "Research success factors for Learn Spanish");
        assert_eq!(
            goals[1].description,
            "Create checkpoints to track progress toward Learn Spanish"
        );
        assert_contiguous(&goals);
    }

    #[test]
    fn test_instantiate_replaces_every_occurrence() {
        let catalog = TemplateCatalog::new();
        let templates = [tpl(
            "{GOAL} then {GOAL}",
            "About {DESCRIPTION} / {DESCRIPTION}",
            T::Min15,
            D::Easy,
            1,
        )];

        let with_description = GoalDetails::new("Swim").with_description("open water");
        let goals = catalog.instantiate(&templates, &with_description);
        assert_eq!(goals[0].title, "Swim then Swim");
        assert_eq!(goals[0].description, "About open water / open water");

        let without_description = GoalDetails::new("Swim");
        let goals = catalog.instantiate(&templates, &without_description);
        assert_eq!(goals[0].description, "About {DESCRIPTION} / {DESCRIPTION}");
    }

    #[test]
    fn test_instantiate_treats_blank_description_as_absent() {
        let catalog = TemplateCatalog::new();
        let templates = [tpl("Plan {GOAL}", "Focus: {DESCRIPTION}", T::Min15, D::Easy, 1)];

        let goal = GoalDetails::new("Swim").with_description("   ");
        let goals = catalog.instantiate(&templates, &goal);
        assert_eq!(goals[0].title, "Plan Swim");
        assert_eq!(goals[0].description, "Focus: {DESCRIPTION}");

        let padded = GoalDetails::new("Swim").with_description("  open water ");
        let goals = catalog.instantiate(&templates, &padded);
        assert_eq!(goals[0].description, "Focus: open water");
    }

    #[test]
    fn test_defaults_for_unknown_type_with_fitness_category() {
        let catalog = TemplateCatalog::new();
        let goal: GoalDetails = serde_json::from_str(
            r#"{"title": "Run 5k", "goalType": "unknown", "category": "fitness"}"#,
        )
        .unwrap();

        let goals = catalog.defaults_for(&goal);
        assert_eq!(goals.len(), 8);
        assert_eq!(goals[0].title, "Research fitness techniques for Run 5k");
        assert_contiguous(&goals);
    }

    #[test]
    fn test_defaults_for_is_deterministic() {
        let catalog = TemplateCatalog::new();
        let goal = GoalDetails::new("Save for a trip")
            .with_goal_type(GoalType::Project)
            .with_category("Financial");

        let first = catalog.defaults_for(&goal);
        let second = catalog.defaults_for(&goal);
        assert_eq!(first, second);
        assert_eq!(first[1].title, "Analyze current financial situation");
        assert_eq!(first[1].difficulty, D::Hard);
    }
}
