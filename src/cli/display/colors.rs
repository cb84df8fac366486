//! Difficulty and progress colour mapping for CLI output.
//!
//! Colouring is dropped automatically when stdout is not a terminal or
//! `NO_COLOR`/`CLICOLOR=0` is set (handled by `console`).

use console::{style, StyledObject};

use crate::domain::models::{MicroGoalDifficulty, ProgressBand};

/// Easy = green, Medium = yellow, Hard = red bold.
pub fn colorize_difficulty(difficulty: MicroGoalDifficulty) -> StyledObject<&'static str> {
    let label = difficulty.as_str();
    match difficulty {
        MicroGoalDifficulty::Easy => style(label).green(),
        MicroGoalDifficulty::Medium => style(label).yellow(),
        MicroGoalDifficulty::Hard => style(label).red().bold(),
    }
}

/// Progress text coloured by band.
pub fn colorize_progress(text: String, band: ProgressBand) -> StyledObject<String> {
    match band {
        ProgressBand::Low => style(text).red(),
        ProgressBand::Fair => style(text).yellow(),
        ProgressBand::Good => style(text).cyan(),
        ProgressBand::Strong => style(text).green().bold(),
    }
}

/// Done marker for a micro-goal row.
pub fn done_marker(is_done: bool) -> StyledObject<&'static str> {
    if is_done {
        style("\u{2713}").green().bold()
    } else {
        style("\u{2022}").dim()
    }
}
