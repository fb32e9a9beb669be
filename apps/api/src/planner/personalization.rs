//! Personalization: optional text-generation annotation layered onto a finished plan.
//!
//! The outcome type makes the fallback explicit: callers always get a usable plan,
//! and the reason personalization was skipped travels with it.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::prompts::{DEFAULT_TEMPERATURE, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{strip_json_fences, GenerationRequest, LlmError, TextGenerator};
use crate::planner::plan::WeeklyPlan;
use crate::planner::prompts::{
    PERSONALIZATION_MAX_TOKENS, PERSONALIZATION_PROMPT_TEMPLATE, PERSONALIZATION_SYSTEM,
};

#[derive(Debug, Error)]
pub enum PersonalizationError {
    #[error("text generation failed: {0}")]
    UpstreamService(#[from] LlmError),

    #[error("text generation returned non-JSON content: {0}")]
    MalformedResponse(serde_json::Error),

    #[error("failed to encode plan for the prompt: {0}")]
    PromptEncoding(serde_json::Error),
}

#[derive(Debug)]
pub enum PersonalizationOutcome {
    /// The plan with `personalization` set to the generator's JSON payload.
    Personalized(WeeklyPlan),
    /// The original plan, untouched.
    Fallback {
        plan: WeeklyPlan,
        reason: PersonalizationError,
    },
}

#[cfg(test)]
impl PersonalizationOutcome {
    pub fn is_personalized(&self) -> bool {
        matches!(self, PersonalizationOutcome::Personalized(_))
    }

    pub fn into_plan(self) -> WeeklyPlan {
        match self {
            PersonalizationOutcome::Personalized(plan) => plan,
            PersonalizationOutcome::Fallback { plan, .. } => plan,
        }
    }
}

/// Asks the generator to annotate `plan` for the given preferences.
///
/// Transport, API, and parse failures all yield `Fallback` with the plan unchanged.
pub async fn personalize(
    plan: WeeklyPlan,
    preferences: &[String],
    generator: &dyn TextGenerator,
) -> PersonalizationOutcome {
    let prompt = match build_personalization_prompt(&plan, preferences) {
        Ok(prompt) => prompt,
        Err(e) => return fallback(plan, PersonalizationError::PromptEncoding(e)),
    };

    let request = GenerationRequest {
        system: PERSONALIZATION_SYSTEM,
        prompt: &prompt,
        max_tokens: PERSONALIZATION_MAX_TOKENS,
        temperature: DEFAULT_TEMPERATURE,
    };

    let text = match generator.generate(request).await {
        Ok(text) => text,
        Err(e) => return fallback(plan, e.into()),
    };

    match serde_json::from_str::<Value>(strip_json_fences(&text)) {
        Ok(payload) => {
            info!("Weekly plan personalized");
            let mut plan = plan;
            plan.personalization = Some(payload);
            PersonalizationOutcome::Personalized(plan)
        }
        Err(e) => fallback(plan, PersonalizationError::MalformedResponse(e)),
    }
}

fn fallback(plan: WeeklyPlan, reason: PersonalizationError) -> PersonalizationOutcome {
    debug!("Personalization failed: {reason:?}");
    PersonalizationOutcome::Fallback { plan, reason }
}

fn build_personalization_prompt(
    plan: &WeeklyPlan,
    preferences: &[String],
) -> Result<String, serde_json::Error> {
    let plan_json = serde_json::to_string_pretty(plan)?;
    Ok(PERSONALIZATION_PROMPT_TEMPLATE
        .replace("{preferences}", &preferences.join(", "))
        .replace("{plan_json}", &plan_json)
        .replace("{json_instruction}", JSON_ONLY_INSTRUCTION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeGenerator;
    use crate::planner::alternates::testing::LowestFirst;
    use crate::planner::prioritizer::prioritize;
    use crate::planner::scheduler::schedule;
    use crate::planner::test_support::strings;
    use crate::recipes::sample::sample_recipes;

    fn plan() -> WeeklyPlan {
        schedule(&prioritize(sample_recipes(), &[]), &mut LowestFirst).unwrap()
    }

    #[tokio::test]
    async fn test_json_reply_attaches_payload() {
        let generator = FakeGenerator::replying(r#"{"tips": ["소금을 줄이세요"]}"#);
        let outcome = personalize(plan(), &strings(&["한식"]), &generator).await;

        assert!(outcome.is_personalized());
        let personalized = outcome.into_plan();
        assert_eq!(
            personalized.personalization.unwrap()["tips"][0],
            "소금을 줄이세요"
        );
    }

    #[tokio::test]
    async fn test_fenced_json_reply_is_accepted() {
        let generator = FakeGenerator::replying("```json\n{\"ok\": true}\n```");
        let outcome = personalize(plan(), &[], &generator).await;
        assert!(outcome.is_personalized());
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back_to_same_plan() {
        let original = plan();
        let generator = FakeGenerator::failing(429, "quota exceeded");
        let outcome = personalize(original.clone(), &[], &generator).await;

        match outcome {
            PersonalizationOutcome::Fallback { plan, reason } => {
                assert_eq!(plan, original);
                assert!(matches!(reason, PersonalizationError::UpstreamService(_)));
            }
            PersonalizationOutcome::Personalized(_) => panic!("expected fallback"),
        }
    }

    #[tokio::test]
    async fn test_non_json_reply_falls_back_as_malformed() {
        let original = plan();
        let generator = FakeGenerator::replying("월요일에는 샐러드를 추천합니다.");
        let outcome = personalize(original.clone(), &[], &generator).await;

        match outcome {
            PersonalizationOutcome::Fallback { plan, reason } => {
                assert_eq!(plan, original);
                assert!(plan.personalization.is_none());
                assert!(matches!(reason, PersonalizationError::MalformedResponse(_)));
            }
            PersonalizationOutcome::Personalized(_) => panic!("expected fallback"),
        }
    }

    #[tokio::test]
    async fn test_request_carries_preferences_plan_and_budget() {
        let generator = FakeGenerator::replying("{}");
        personalize(plan(), &strings(&["한식", "매운맛"]), &generator).await;

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, PERSONALIZATION_SYSTEM);
        assert_eq!(requests[0].max_tokens, 800);
        assert!((requests[0].temperature - 0.7).abs() < f32::EPSILON);
        assert!(requests[0].prompt.contains("사용자 선호도: 한식, 매운맛"));
        assert!(requests[0].prompt.contains("김치볶음밥"));
        assert!(!requests[0].prompt.contains("{plan_json}"));
    }
}
