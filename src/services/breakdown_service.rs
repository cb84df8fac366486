//! Goal breakdown orchestration.
//!
//! The orchestrator is the only component that talks to the generation
//! provider and the only one allowed to fall back to the template catalog.
//! Per call:
//!
//! ```text
//! START -> PROMPTED -> PARSED                       -> DONE
//!                   -> PROVIDER_FAILED -> DEFAULTED -> DONE
//!                   -> PARSE_EMPTY     -> DEFAULTED -> DONE
//! ```
//!
//! Once the input is valid a breakdown always succeeds.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, GoalDetails, MicroGoal};
use crate::domain::ports::{GenerationProvider, GenerationRequest, ProviderError};
use crate::infrastructure::logging::SecretScrubber;
use crate::services::prompt_builder::PromptBuilder;
use crate::services::response_parser::{ParseTier, ResponseParser};
use crate::services::template_catalog::TemplateCatalog;

/// Tunables for a breakdown call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownSettings {
    /// Result-size ceiling passed to the provider
    pub max_tokens: u32,
    /// Model identifier; `None` uses the provider default
    pub model: Option<String>,
    /// Upper bound on the provider call
    pub timeout: Duration,
}

impl Default for BreakdownSettings {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            model: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl BreakdownSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_tokens: config.provider.max_tokens,
            model: Some(config.provider.model.clone()),
            timeout: Duration::from_secs(config.breakdown.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Where a breakdown's micro-goals came from.
///
/// Both variants look the same to callers of
/// [`BreakdownService::breakdown`]; the distinction is kept for
/// diagnostics.
#[derive(Debug)]
pub enum BreakdownOutcome {
    /// Parsed from the provider's response
    Parsed {
        micro_goals: Vec<MicroGoal>,
        tier: ParseTier,
    },
    /// Taken from the template catalog
    Defaulted {
        micro_goals: Vec<MicroGoal>,
        /// `ProviderUnavailable` or `UnparsableResponse`
        reason: DomainError,
    },
}

impl BreakdownOutcome {
    pub fn micro_goals(&self) -> &[MicroGoal] {
        match self {
            Self::Parsed { micro_goals, .. } | Self::Defaulted { micro_goals, .. } => micro_goals,
        }
    }

    pub fn into_micro_goals(self) -> Vec<MicroGoal> {
        match self {
            Self::Parsed { micro_goals, .. } | Self::Defaulted { micro_goals, .. } => micro_goals,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }

    /// Short label for logs and CLI output.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Parsed { tier, .. } => tier.as_str(),
            Self::Defaulted { .. } => "template",
        }
    }
}

/// Renumber `order` to 1..N following list position and reset completion.
pub fn normalize_order(mut micro_goals: Vec<MicroGoal>) -> Vec<MicroGoal> {
    for (goal, order) in micro_goals.iter_mut().zip(1u32..) {
        goal.order = order;
        goal.is_done = false;
    }
    micro_goals
}

/// Breaks macro goals down into micro-goals.
///
/// Holds no per-call state; share it behind an `Arc` across tasks.
pub struct BreakdownService {
    provider: Arc<dyn GenerationProvider>,
    catalog: TemplateCatalog,
    prompts: PromptBuilder,
    parser: ResponseParser,
    scrubber: SecretScrubber,
    settings: BreakdownSettings,
}

impl BreakdownService {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self::with_settings(provider, BreakdownSettings::default())
    }

    pub fn with_settings(
        provider: Arc<dyn GenerationProvider>,
        settings: BreakdownSettings,
    ) -> Self {
        Self {
            provider,
            catalog: TemplateCatalog::new(),
            prompts: PromptBuilder::new(),
            parser: ResponseParser::new(),
            scrubber: SecretScrubber::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &BreakdownSettings {
        &self.settings
    }

    /// Break a goal down into an ordered, non-empty list of micro-goals.
    ///
    /// # Errors
    /// `DomainError::InvalidInput` when the goal title is blank. Provider and
    /// parse failures are absorbed by the template fallback.
    pub async fn breakdown(&self, goal: &GoalDetails) -> DomainResult<Vec<MicroGoal>> {
        self.breakdown_detailed(goal)
            .await
            .map(BreakdownOutcome::into_micro_goals)
    }

    /// Like [`breakdown`](Self::breakdown) but reports where the result came
    /// from.
    #[instrument(
        skip(self, goal),
        fields(goal_type = goal.goal_type.as_str(), provider = self.provider.provider_id())
    )]
    pub async fn breakdown_detailed(&self, goal: &GoalDetails) -> DomainResult<BreakdownOutcome> {
        goal.validate()?;

        let prompt = self.prompts.build(goal);
        let mut request = GenerationRequest::new(prompt, self.settings.max_tokens);
        request.model.clone_from(&self.settings.model);

        let outcome = match self.generate(request).await {
            Ok(text) => match self.parser.parse_with_tier(&text) {
                Some((tier, micro_goals)) => BreakdownOutcome::Parsed {
                    micro_goals: normalize_order(micro_goals),
                    tier,
                },
                None => {
                    warn!(
                        response_len = text.len(),
                        "provider response had no micro-goals, using templates"
                    );
                    self.defaulted(goal, DomainError::UnparsableResponse)
                }
            },
            Err(err) => {
                let cause = self.scrubber.scrub(&err.to_string());
                warn!(error = %cause, "generation provider failed, using templates");
                self.defaulted(goal, DomainError::ProviderUnavailable(cause))
            }
        };

        info!(
            source = outcome.source(),
            count = outcome.micro_goals().len(),
            "goal breakdown complete"
        );

        Ok(outcome)
    }

    /// Single provider attempt bounded by the configured timeout.
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        match tokio::time::timeout(self.settings.timeout, self.provider.generate(request)).await {
            Ok(result) => result.map(|response| response.text),
            Err(_) => Err(ProviderError::Timeout(self.settings.timeout.as_secs())),
        }
    }

    fn defaulted(&self, goal: &GoalDetails, reason: DomainError) -> BreakdownOutcome {
        BreakdownOutcome::Defaulted {
            micro_goals: self.catalog.defaults_for(goal),
            reason,
        }
    }
}
