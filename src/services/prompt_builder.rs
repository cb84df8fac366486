//! Prompt rendering for goal breakdowns.

use crate::domain::models::GoalDetails;

/// Fewest micro-goals the provider is asked for.
pub const MIN_ITEMS: usize = 5;
/// Most micro-goals the provider is asked for.
pub const MAX_ITEMS: usize = 12;

/// Renders `GoalDetails` into the instruction text sent to the provider.
///
/// Rendering never fails: absent fields are replaced with fixed
/// placeholder text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, goal: &GoalDetails) -> String {
        let title = goal.title.trim();
        let description = goal.description_text().unwrap_or("No description provided");
        let category = goal
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("General");
        let target_date = goal
            .target_date
            .map_or_else(|| "Not specified".to_string(), |d| d.format("%Y-%m-%d").to_string());

        format!(
            r#"You are an expert goal achievement coach and productivity specialist. You help people break down big goals into actionable micro-goals.

I need your help breaking down the following macro goal into specific, actionable micro-goals that are sequenced in a logical order.

## GOAL DETAILS
Title: {title}
Description: {description}
Category: {category}
Target Date: {target_date}
Difficulty: {difficulty}
Time Available: {time_available}
Priority: {priority}
Goal Type: {goal_type}

## REQUIREMENTS FOR MICRO-GOALS
1. Create {min}-{max} specific micro-goals that build toward the macro goal
2. Each micro-goal should be achievable in a single session (15-90 minutes)
3. Arrange them in sequential order (what needs to happen first, second, etc.)
4. Include a mix of research, planning, execution, and evaluation tasks
5. For each micro-goal, provide:
   - A clear, action-oriented title (starts with a verb)
   - A brief description that explains what to do and why it matters
   - Estimated time to complete (15min, 20min, 25min, 30min, 45min, 60min, 90min)
   - Difficulty (Easy, Medium, Hard)
   - Its position in the sequence, starting at 1

## Required Output Format (JSON)
Respond with a single JSON array where each object represents a micro-goal with these properties:
- title (string)
- description (string)
- estimatedTime (string)
- difficulty (string)
- order (number)

IMPORTANT: Output ONLY the JSON array. Do not include any explanations or text before or after it."#,
            difficulty = goal.difficulty.label(),
            time_available = goal.time_available.label(),
            priority = goal.priority.label(),
            goal_type = goal.goal_type.label(),
            min = MIN_ITEMS,
            max = MAX_ITEMS,
        )
    }
}
