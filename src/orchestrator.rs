//! Provider fallback orchestration and the public analysis facade
//!
//! The orchestrator drives providers in fixed priority order with bounded
//! retries, exponential backoff with jitter, structural validation of each
//! response, caching of validated results, and a static default profile as
//! the terminal fallback. The analysis path never surfaces an error to the
//! caller: user-facing flows must never block on provider availability.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::cache::AnalysisCache;
use crate::emotion::TextEmotionAnalyzer;
use crate::error::ReflektaError;
use crate::fingerprint::Fingerprint;
use crate::normalize::parse_profile;
use crate::prompts;
use crate::provider::{providers_from_config, Provider};
use crate::score::ScoreEngine;
use crate::types::{AnalysisConfig, ConversationTurn, Profile, QuestionMetadata, ScoreBreakdown};

/// Retry discipline for the analysis path: attempts across the whole
/// provider list, with exponential backoff plus uniform jitter between
/// attempts. Independent of any particular provider or concurrency model.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts across the full provider list before falling back
    pub max_retries: u32,
    /// Backoff base; attempt `n` sleeps `base * 2^n + uniform(0, base/2)`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep after a fully failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.base_delay.as_secs_f64();
        let jitter = if base > 0.0 {
            rand::thread_rng().gen_range(0.0..base * 0.5)
        } else {
            0.0
        };
        Duration::from_secs_f64(base * 2f64.powi(attempt as i32) + jitter)
    }
}

/// Facade over the full pipeline: cache lookup, provider fallback,
/// normalization, scoring and question generation.
pub struct Analyzer {
    providers: Vec<Arc<dyn Provider>>,
    cache: Arc<AnalysisCache>,
    policy: RetryPolicy,
    engine: ScoreEngine,
    emotion: TextEmotionAnalyzer,
    limit_notices: Vec<String>,
}

impl Analyzer {
    /// Build an analyzer from configuration, with a fresh process-scoped
    /// cache
    pub fn new(config: AnalysisConfig) -> Self {
        let providers = providers_from_config(&config);
        Self::with_providers(providers, &config, Arc::new(AnalysisCache::new()))
    }

    /// Build an analyzer with injected providers and a shared cache
    /// (dependency injection point for hosts and tests)
    pub fn with_providers(
        providers: Vec<Arc<dyn Provider>>,
        config: &AnalysisConfig,
        cache: Arc<AnalysisCache>,
    ) -> Self {
        Self {
            providers,
            cache,
            policy: RetryPolicy {
                max_retries: config.max_retries.max(1),
                base_delay: Duration::from_millis(config.base_delay_ms),
            },
            engine: ScoreEngine::with_seed(config.score_seed),
            emotion: TextEmotionAnalyzer::new(),
            limit_notices: config.limit_notices.clone(),
        }
    }

    /// Shared analysis cache
    pub fn cache(&self) -> &Arc<AnalysisCache> {
        &self.cache
    }

    /// Analyze a conversation history into a profile and score.
    ///
    /// Never fails: degrades to the insufficient-data profile (fewer than
    /// two turns) or the static default profile (no provider reachable).
    pub async fn analyze(&self, turns: &[ConversationTurn]) -> (Profile, ScoreBreakdown) {
        let mut profile = self.resolve_profile(turns).await;
        let breakdown = self.engine.score(&mut profile);
        (profile, breakdown)
    }

    async fn resolve_profile(&self, turns: &[ConversationTurn]) -> Profile {
        if turns.len() < 2 {
            return Profile::insufficient_data();
        }

        if self.providers.is_empty() {
            warn!("Żaden dostawca analizy nie jest skonfigurowany, używam wartości domyślnych");
            return Profile::default_analysis();
        }

        let key = Fingerprint::of_turns(turns);
        if let Some(cached) = self.cache.get_profile(&key) {
            info!(fingerprint = %key, "Używam zbuforowanej analizy psychologicznej");
            return (*cached).clone();
        }

        let transcript = prompts::render_transcript(turns);
        let user_prompt = prompts::analysis_user_prompt(&transcript);

        for attempt in 0..self.policy.max_retries {
            for provider in &self.providers {
                info!(
                    provider = provider.name(),
                    attempt = attempt + 1,
                    max = self.policy.max_retries,
                    "Próba analizy psychologicznej"
                );
                match provider
                    .invoke_json(prompts::ANALYSIS_SYSTEM_PROMPT, &user_prompt)
                    .await
                {
                    Ok(raw) => match parse_profile(&raw) {
                        Ok(profile) => {
                            info!(provider = provider.name(), "Analiza zakończona pomyślnie");
                            self.cache.put_profile(key.clone(), profile.clone());
                            return profile;
                        }
                        Err(e) => {
                            warn!(
                                provider = provider.name(),
                                error = %e,
                                "Dostawca zwrócił nieprawidłowy format odpowiedzi"
                            );
                        }
                    },
                    Err(ReflektaError::ProviderUnavailable(reason)) => {
                        debug!(provider = provider.name(), reason = %reason, "Dostawca niedostępny, pomijam");
                    }
                    Err(e) => {
                        if e.is_rate_limit() {
                            warn!(
                                provider = provider.name(),
                                "Przekroczono limit zapytań API"
                            );
                        }
                        error!(provider = provider.name(), error = %e, "Błąd dostawcy");
                    }
                }
            }

            if attempt + 1 < self.policy.max_retries {
                let delay = self.policy.delay_for(attempt);
                info!(delay_ms = delay.as_millis() as u64, "Ponawiam próbę");
                tokio::time::sleep(delay).await;
            }
        }

        error!("Wyczerpano limit prób dla wszystkich dostawców, zwracam dane zastępcze");
        let mut fallback = Profile::default_analysis();
        fallback.insights.extend(self.limit_notices.iter().cloned());
        fallback
    }

    /// Generate a follow-up question from recent history.
    ///
    /// Single attempt per provider, no retry loop; every failure path
    /// substitutes a uniformly-chosen question from the fixed default set.
    pub async fn generate_question(
        &self,
        turns: &[ConversationTurn],
    ) -> (String, QuestionMetadata) {
        if turns.is_empty() {
            return self.generate_initial_question().await;
        }

        let start = turns.len().saturating_sub(prompts::QUESTION_CONTEXT_TURNS);
        let recent_responses: Vec<&str> =
            turns[start..].iter().map(|t| t.response.as_str()).collect();
        let emotional = self.emotion.analyze(&recent_responses.join("\n"));
        let state = self.emotion.emotional_state(&emotional);

        let context = prompts::render_question_context(turns);
        let key = Fingerprint::of_text(&context);
        if let Some(question) = self.cache.get_question(&key) {
            info!(fingerprint = %key, "Używam zbuforowanego pytania");
            return (
                question,
                QuestionMetadata {
                    model_used: "cached".to_string(),
                    context_used: true,
                    emotional_analysis: Some(emotional),
                },
            );
        }

        let focus_areas: Vec<String> = prompts::DEFAULT_FOCUS_AREAS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let system = prompts::contextual_question_prompt(
            prompts::question_strategy(state),
            &focus_areas,
        );

        for provider in &self.providers {
            match provider.invoke(&system, &context).await {
                Ok(raw) => {
                    let question = raw.lines().map(str::trim).find(|l| !l.is_empty());
                    if let Some(question) = question {
                        self.cache.put_question(key.clone(), question.to_string());
                        return (
                            question.to_string(),
                            QuestionMetadata {
                                model_used: provider.name().to_string(),
                                context_used: true,
                                emotional_analysis: Some(emotional.clone()),
                            },
                        );
                    }
                    warn!(provider = provider.name(), "Dostawca zwrócił puste pytanie");
                }
                Err(ReflektaError::ProviderUnavailable(reason)) => {
                    debug!(provider = provider.name(), reason = %reason, "Dostawca niedostępny, pomijam");
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Błąd podczas generowania pytania"
                    );
                }
            }
        }

        (
            default_question(),
            QuestionMetadata {
                model_used: "default".to_string(),
                context_used: true,
                emotional_analysis: Some(emotional),
            },
        )
    }

    /// Opening question for a fresh conversation: single pass over the
    /// providers, then the fixed default set
    async fn generate_initial_question(&self) -> (String, QuestionMetadata) {
        for provider in &self.providers {
            match provider
                .invoke(
                    prompts::INITIAL_QUESTION_PROMPT,
                    "Wygeneruj pytanie otwierające rozmowę.",
                )
                .await
            {
                Ok(raw) => {
                    if let Some(question) = raw.lines().map(str::trim).find(|l| !l.is_empty()) {
                        return (
                            question.to_string(),
                            QuestionMetadata {
                                model_used: provider.name().to_string(),
                                context_used: false,
                                emotional_analysis: None,
                            },
                        );
                    }
                }
                Err(ReflektaError::ProviderUnavailable(reason)) => {
                    debug!(provider = provider.name(), reason = %reason, "Dostawca niedostępny, pomijam");
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Błąd podczas generowania pytania otwierającego"
                    );
                }
            }
        }

        (
            default_question(),
            QuestionMetadata {
                model_used: "default".to_string(),
                context_used: false,
                emotional_analysis: None,
            },
        )
    }
}

/// Uniformly-chosen question from the fixed default set
fn default_question() -> String {
    prompts::DEFAULT_QUESTIONS
        .choose(&mut rand::thread_rng())
        .expect("default question set is non-empty")
        .to_string()
}
