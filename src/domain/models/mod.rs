pub mod config;
pub mod goal;
pub mod micro_goal;

pub use config::{BreakdownConfig, Config, LoggingConfig, ProviderConfig, ProviderKind};
pub use goal::{GoalDetails, GoalDifficulty, GoalPriority, GoalType, TimeAvailable};
pub use micro_goal::{
    EstimatedTime, MicroGoal, MicroGoalDifficulty, MicroGoalPatch, MicroGoalTemplate, Progress,
    ProgressBand,
};
