//! Core types for Reflekta

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded question/response exchange, owned by the external
/// conversation store. The core only reads ordered slices of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Therapeutic question shown to the user
    pub question: String,
    /// The user's journaled response
    pub response: String,
    /// When the exchange was recorded
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(
        question: impl Into<String>,
        response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
            timestamp,
        }
    }
}

/// Canonical psychological-analysis result.
///
/// The five canonical fields are always present (possibly empty) and are
/// never mutated after creation. The three optional fields are derived
/// enrichments written by the score engine; they never feed back into the
/// score total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Dominant personality traits visible in the responses
    #[serde(default)]
    pub personality_traits: Vec<String>,
    /// Emotional patterns (which emotions dominate, how they are expressed)
    #[serde(default)]
    pub emotional_patterns: Vec<String>,
    /// Cognitive patterns (thinking schemas, beliefs)
    #[serde(default)]
    pub cognitive_patterns: Vec<String>,
    /// Therapeutic insights, ordered by importance (first = primary)
    #[serde(default)]
    pub insights: Vec<String>,
    /// Suggested areas of personal growth
    #[serde(default)]
    pub growth_areas: Vec<String>,

    /// Per-trait weighted scores (score engine enrichment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_scores: Option<BTreeMap<String, u32>>,
    /// Emotional-intelligence category sub-scores (score engine enrichment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_intelligence_details: Option<EmotionalIntelligenceDetails>,
    /// Insight-depth summary (score engine enrichment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight_quality: Option<InsightQuality>,
}

impl Profile {
    /// Construct a profile from the five canonical fields
    pub fn new(
        personality_traits: Vec<String>,
        emotional_patterns: Vec<String>,
        cognitive_patterns: Vec<String>,
        insights: Vec<String>,
        growth_areas: Vec<String>,
    ) -> Self {
        Self {
            personality_traits,
            emotional_patterns,
            cognitive_patterns,
            insights,
            growth_areas,
            trait_scores: None,
            emotional_intelligence_details: None,
            insight_quality: None,
        }
    }

    /// The static fallback returned when every provider attempt is exhausted
    /// or no provider is configured
    pub fn default_analysis() -> Self {
        Self::new(
            vec![
                "Refleksyjność".to_string(),
                "Samoświadomość".to_string(),
                "Otwartość na introspekcję".to_string(),
            ],
            vec![
                "Zrównoważenie emocjonalne".to_string(),
                "Zdolność wyrażania uczuć".to_string(),
                "Samoregulacja".to_string(),
            ],
            vec![
                "Analityczne myślenie".to_string(),
                "Zdolność autorefleksji".to_string(),
                "Orientacja na rozwiązania".to_string(),
            ],
            vec![
                "Kontynuowanie regularnej refleksji pomaga w rozwoju samoświadomości.".to_string(),
                "Proces terapeutyczny wymaga czasu i regularności.".to_string(),
                "Wartościowe jest zadawanie pytań, które zachęcają do głębszej refleksji."
                    .to_string(),
            ],
            vec![
                "Rozwijanie praktyki codziennej refleksji".to_string(),
                "Pogłębianie samoświadomości emocjonalnej".to_string(),
            ],
        )
    }

    /// Returned when the history holds fewer than two answered turns
    pub fn insufficient_data() -> Self {
        Self::new(
            vec![],
            vec![],
            vec![],
            vec!["Za mało danych do przeprowadzenia analizy.".to_string()],
            vec![],
        )
    }
}

/// Emotional-intelligence category sub-scores, each capped at 100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalIntelligenceDetails {
    pub self_awareness: u32,
    pub emotional_regulation: u32,
    pub social_awareness: u32,
    pub relationship_management: u32,
}

/// Summary of insight depth produced while computing the development score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightQuality {
    /// Depth class (1-3) per insight, in insight order
    pub depth_scores: Vec<u32>,
    /// Half the coherence bonus (0.0 when no insight/growth-area overlap)
    pub coherence_level: f64,
    /// Development contribution as a percentage of its 25-point cap
    pub development_potential: f64,
}

/// Per-category score contributions; each category is capped at 25 and the
/// total is clamped to [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub personality: u32,
    pub emotional: u32,
    pub cognitive: u32,
    pub development: u32,
    pub total: u32,
}

/// Metadata returned alongside a generated follow-up question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMetadata {
    /// Which provider (or "default"/"cached") produced the question
    pub model_used: String,
    /// Whether conversation history informed the question
    pub context_used: bool,
    /// Lexicon-based emotional read of the recent responses, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_analysis: Option<crate::emotion::EmotionalAnalysis>,
}

/// Analysis pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Anthropic API key; absence skips the Anthropic adapter
    pub anthropic_api_key: Option<String>,
    /// OpenAI API key; absence skips the OpenAI adapter
    pub openai_api_key: Option<String>,
    /// Google AI API key; absence skips the Google adapter
    pub google_api_key: Option<String>,
    /// Anthropic model override
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    /// OpenAI model override
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Google model override
    #[serde(default = "default_google_model")]
    pub google_model: String,
    /// Attempts across the whole provider list before falling back
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff delay in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Seed for trait-score draws. None preserves run-to-run variability;
    /// Some makes repeated scoring of the same profile reproducible.
    #[serde(default)]
    pub score_seed: Option<u64>,
    /// Notices appended to the default profile's insights when every
    /// provider attempt is exhausted (empty by default)
    #[serde(default)]
    pub limit_notices: Vec<String>,
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_google_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            openai_api_key: None,
            google_api_key: None,
            anthropic_model: default_anthropic_model(),
            openai_model: default_openai_model(),
            google_model: default_google_model(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            score_seed: None,
            limit_notices: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Build a configuration from the process environment.
    ///
    /// Reads `ANTHROPIC_API_KEY`, `OPENAI_API_KEY`, `GOOGLE_API_KEY` plus the
    /// optional overrides `REFLEKTA_ANTHROPIC_MODEL`, `REFLEKTA_OPENAI_MODEL`,
    /// `REFLEKTA_GOOGLE_MODEL`, `REFLEKTA_MAX_RETRIES`,
    /// `REFLEKTA_BASE_DELAY_MS` and `REFLEKTA_SCORE_SEED`.
    pub fn from_env() -> Self {
        let mut config = Self {
            anthropic_api_key: env_nonempty("ANTHROPIC_API_KEY"),
            openai_api_key: env_nonempty("OPENAI_API_KEY"),
            google_api_key: env_nonempty("GOOGLE_API_KEY"),
            ..Self::default()
        };
        if let Some(model) = env_nonempty("REFLEKTA_ANTHROPIC_MODEL") {
            config.anthropic_model = model;
        }
        if let Some(model) = env_nonempty("REFLEKTA_OPENAI_MODEL") {
            config.openai_model = model;
        }
        if let Some(model) = env_nonempty("REFLEKTA_GOOGLE_MODEL") {
            config.google_model = model;
        }
        if let Some(retries) = env_nonempty("REFLEKTA_MAX_RETRIES") {
            if let Ok(n) = retries.parse() {
                config.max_retries = n;
            }
        }
        if let Some(delay) = env_nonempty("REFLEKTA_BASE_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                config.base_delay_ms = ms;
            }
        }
        if let Some(seed) = env_nonempty("REFLEKTA_SCORE_SEED") {
            config.score_seed = seed.parse().ok();
        }
        config
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_analysis_has_all_five_fields() {
        let profile = Profile::default_analysis();
        assert_eq!(profile.personality_traits.len(), 3);
        assert_eq!(profile.emotional_patterns.len(), 3);
        assert_eq!(profile.cognitive_patterns.len(), 3);
        assert_eq!(profile.insights.len(), 3);
        assert_eq!(profile.growth_areas.len(), 2);
        assert!(profile.trait_scores.is_none());
    }

    #[test]
    fn insufficient_data_is_mostly_empty() {
        let profile = Profile::insufficient_data();
        assert!(profile.personality_traits.is_empty());
        assert!(profile.emotional_patterns.is_empty());
        assert!(profile.cognitive_patterns.is_empty());
        assert!(profile.growth_areas.is_empty());
        assert_eq!(profile.insights.len(), 1);
    }

    #[test]
    fn profile_roundtrips_through_json() {
        let profile = Profile::default_analysis();
        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
        // Enrichment fields stay absent in serialized form until scoring
        assert!(!json.contains("trait_scores"));
    }

    #[test]
    fn config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay_ms, 1000);
        assert!(config.limit_notices.is_empty());
        assert!(config.score_seed.is_none());
    }
}
