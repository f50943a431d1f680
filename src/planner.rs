//! The two user-facing flows: a calorie-targeted recipe request, and a weekly
//! menu request with optional feedback rounds.
//!
//! Each call performs exactly one chat completion and records both sides of
//! the exchange in the caller's [`Session`].

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::api_connection::{CompletionOutcome, Provider};
use crate::calories::{estimate_calories, ActivityLevel, CalorieEstimate, UserProfile};
use crate::menu::MenuRequest;
use crate::menu_parser::{parse_menu_reply, ParsedMenu};
use crate::prompts::{build_feedback_prompt, build_menu_prompt, build_profile_recipe_prompt};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct RecipeRequest {
    pub profile: UserProfile,
    pub activity: ActivityLevel,
    pub additional_ingredients: Option<String>,
    /// Replaces the default recipe instruction.
    pub template: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecipeOutcome {
    pub estimate: CalorieEstimate,
    pub prompt: String,
    pub reply: CompletionOutcome,
}

/// Raw reply plus whatever could be parsed out of it.
#[derive(Debug, Clone)]
pub struct MenuOutcome {
    pub prompt: String,
    pub reply: CompletionOutcome,
    pub parsed: ParsedMenu,
}

pub async fn request_recipe(
    provider: &Provider,
    session: &mut Session,
    request: &RecipeRequest,
    sampling: Sampling,
) -> RecipeOutcome {
    let estimate = estimate_calories(&request.profile, request.activity);
    info!(
        basal_rate = estimate.basal_rate,
        multiplier = estimate.multiplier,
        target_calories = estimate.target_calories,
        "estimated daily calories"
    );

    let prompt = build_profile_recipe_prompt(
        request.template.as_deref(),
        &request.profile,
        request.activity,
        &estimate,
        request.additional_ingredients.as_deref(),
    );
    let reply = exchange(provider, session, &prompt, sampling).await;

    RecipeOutcome {
        estimate,
        prompt,
        reply,
    }
}

pub async fn request_menu(
    provider: &Provider,
    session: &mut Session,
    request: &MenuRequest,
    sampling: Sampling,
) -> Result<MenuOutcome> {
    request.validate()?;
    let prompt = build_menu_prompt(request);
    info!(
        days = request.days.len(),
        meals = request.meal_types.len(),
        people = request.people_count,
        excluded_dishes = request.prior_week_dishes.len(),
        "requesting weekly menu"
    );
    let reply = exchange(provider, session, &prompt, sampling).await;
    Ok(finish_menu(session, prompt, reply))
}

/// Fails only when the session has no menu to refine yet.
pub async fn refine_menu(
    provider: &Provider,
    session: &mut Session,
    feedback: &str,
    sampling: Sampling,
) -> Result<MenuOutcome> {
    let current = session
        .current_menu()
        .ok_or_else(|| anyhow!("No menu has been generated yet; nothing to refine"))?;
    let prompt = build_feedback_prompt(current, feedback);
    info!(feedback_chars = feedback.len(), "refining weekly menu");
    let reply = exchange(provider, session, &prompt, sampling).await;
    Ok(finish_menu(session, prompt, reply))
}

async fn exchange(
    provider: &Provider,
    session: &mut Session,
    prompt: &str,
    sampling: Sampling,
) -> CompletionOutcome {
    session.push_user(prompt);
    let reply = provider
        .complete(session.conversation(), sampling.max_tokens, sampling.temperature)
        .await;
    session.push_assistant(reply.display_text());
    reply
}

fn finish_menu(session: &mut Session, prompt: String, reply: CompletionOutcome) -> MenuOutcome {
    let parsed = match reply.text() {
        Some(text) => {
            session.record_menu(text);
            let parsed = parse_menu_reply(text);
            if parsed.is_empty() {
                warn!("menu reply contained no recognisable menu or shopping lines");
            }
            parsed
        }
        None => ParsedMenu::default(),
    };
    MenuOutcome {
        prompt,
        reply,
        parsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_connection::FailureKind;
    use crate::config::LlmConfig;
    use crate::menu::tests::sample_request;
    use crate::session::RefinementPolicy;

    fn unreachable_provider() -> Provider {
        Provider::openai(&LlmConfig {
            api_key_env_var: "MEAL_ASSISTANT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmConfig::default()
        })
    }

    const SAMPLING: Sampling = Sampling {
        max_tokens: 100,
        temperature: 0.9,
    };

    #[tokio::test]
    async fn test_failed_menu_is_recorded_as_text_but_not_parsed() {
        let provider = unreachable_provider();
        let mut session = Session::default();
        let outcome = request_menu(&provider, &mut session, &sample_request(), SAMPLING)
            .await
            .unwrap();

        assert!(matches!(
            outcome.reply,
            CompletionOutcome::Failure {
                kind: FailureKind::MissingApiKey,
                ..
            }
        ));
        assert!(outcome.parsed.is_empty());
        assert_eq!(session.current_menu(), None);
        assert_eq!(session.conversation().len(), 2);
        assert_eq!(session.conversation()[1].content, outcome.reply.display_text());
    }

    #[tokio::test]
    async fn test_refine_without_menu_is_an_error() {
        let provider = unreachable_provider();
        let mut session = Session::new(RefinementPolicy::KeepHistory);
        let result = refine_menu(&provider, &mut session, "more fish", SAMPLING).await;
        assert!(result.is_err());
        assert!(session.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_menu_request_is_rejected_before_sending() {
        let provider = unreachable_provider();
        let mut session = Session::default();
        let mut request = sample_request();
        request.meal_types.clear();
        assert!(request_menu(&provider, &mut session, &request, SAMPLING).await.is_err());
        assert!(session.conversation().is_empty());
    }
}
