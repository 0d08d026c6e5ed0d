//! Emotional-intelligence score engine
//!
//! Maps a normalized profile to a bounded score plus per-category
//! contributions. Mostly deterministic; the per-trait base value is a
//! stochastic placeholder (there is no real personality-scoring model
//! behind it). With no seed configured, repeated scoring of the same
//! profile may yield different trait sub-scores; with a seed, the draw is
//! derived from the seed and the trait label, making scoring reproducible.
//!
//! The engine also enriches the profile with diagnostic fields
//! (trait_scores, EI category details, insight quality). These are
//! presentation data only and never feed back into the total.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::types::{EmotionalIntelligenceDetails, InsightQuality, Profile, ScoreBreakdown};

/// Participation floor granted to any profile with enough insights
const BASE_SCORE: u32 = 20;
/// Cap applied to each of the four category contributions
const CATEGORY_CAP: u32 = 25;

/// Weight multipliers for known trait keywords (case-insensitive substring
/// match against the trait label; unmatched traits weigh 1.0)
static TRAIT_WEIGHTS: Lazy<Vec<(&'static str, f64)>> = Lazy::new(|| {
    vec![
        ("samoświadomość", 1.20),
        ("empatia", 1.30),
        ("refleksyjność", 1.10),
        ("otwartość", 1.15),
        ("stabilność", 1.25),
        ("adaptacyjność", 1.10),
        ("asertywność", 1.05),
    ]
});

/// Tokens marking an emotion-focused insight
const EMOTION_TERMS: [&str; 4] = ["czuję", "emocje", "uczucia", "odczuwam"];
/// Tokens marking a reflective insight
const REFLECTION_TERMS: [&str; 4] = ["myślę", "rozumiem", "dostrzegam", "zauważam"];

/// Deterministic-except-where-flagged heuristic scorer
#[derive(Debug, Default, Clone)]
pub struct ScoreEngine {
    seed: Option<u64>,
}

impl ScoreEngine {
    /// Engine with the source's run-to-run variability (thread RNG draws)
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Engine with reproducible per-trait draws
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Engine honoring an optional seed from configuration
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Score a profile and enrich it with diagnostic fields.
    ///
    /// Profiles with fewer than two insights score 0 (insufficient data)
    /// and are left unenriched.
    pub fn score(&self, profile: &mut Profile) -> ScoreBreakdown {
        if profile.insights.len() <= 1 {
            return ScoreBreakdown::default();
        }

        let trait_scores = self.trait_scores(&profile.personality_traits);

        let personality = self.personality_contribution(profile, &trait_scores);
        let emotional = self.emotional_contribution(profile);
        let cognitive = self.cognitive_contribution(profile);
        let (development, depth_scores, coherence_bonus) = self.development_contribution(profile);

        profile.emotional_intelligence_details = Some(ei_details(&trait_scores));
        profile.trait_scores = Some(trait_scores);
        profile.insight_quality = Some(InsightQuality {
            depth_scores,
            coherence_level: coherence_bonus as f64 / 2.0,
            development_potential: development as f64 / CATEGORY_CAP as f64 * 100.0,
        });

        let total = (BASE_SCORE + personality + emotional + cognitive + development).min(100);
        ScoreBreakdown {
            base: BASE_SCORE,
            personality,
            emotional,
            cognitive,
            development,
            total,
        }
    }

    /// Weighted per-trait scores, each capped at 100
    fn trait_scores(&self, traits: &[String]) -> BTreeMap<String, u32> {
        let mut scores = BTreeMap::new();
        for label in traits {
            let base = self.trait_base(label);
            let weight = trait_weight(label);
            let score = ((base as f64 * weight) as u32).min(100);
            scores.insert(label.clone(), score);
        }
        scores
    }

    /// Stochastic placeholder draw in [65, 95]; seeded per trait label when
    /// a seed is configured
    fn trait_base(&self, label: &str) -> u32 {
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ label_hash(label));
                rng.gen_range(65..=95)
            }
            None => rand::thread_rng().gen_range(65..=95),
        }
    }

    fn personality_contribution(
        &self,
        profile: &Profile,
        trait_scores: &BTreeMap<String, u32>,
    ) -> u32 {
        let breadth = profile.personality_traits.len() as u32 * 3;
        let depth = trait_scores.values().filter(|&&s| s > 80).count() as u32 * 2;
        (breadth + depth).min(CATEGORY_CAP)
    }

    fn emotional_contribution(&self, profile: &Profile) -> u32 {
        let patterns = &profile.emotional_patterns;
        let complexity = patterns
            .iter()
            .filter(|p| p.split_whitespace().count() > 3)
            .count() as u32
            * 2;
        (patterns.len() as u32 * 3 + complexity).min(CATEGORY_CAP)
    }

    fn cognitive_contribution(&self, profile: &Profile) -> u32 {
        let patterns = &profile.cognitive_patterns;
        let depth = patterns
            .iter()
            .filter(|p| {
                let lowered = p.to_lowercase();
                lowered.contains("rozumienie") || lowered.contains("świadomość")
            })
            .count() as u32
            * 3;
        (patterns.len() as u32 * 2 + depth).min(CATEGORY_CAP)
    }

    /// Development contribution plus the insight depth classes and the raw
    /// coherence bonus that go into the enrichment summary
    fn development_contribution(&self, profile: &Profile) -> (u32, Vec<u32>, u32) {
        let depth_scores: Vec<u32> = profile.insights.iter().map(|i| insight_depth(i)).collect();
        let insight_quality_score: u32 = depth_scores.iter().sum::<u32>() * 2;

        let growth_impact_score = profile
            .growth_areas
            .iter()
            .filter(|a| a.split_whitespace().count() > 8)
            .count() as u32
            * 3;

        let mut coherence_bonus = 0;
        for insight in &profile.insights {
            let insight_words = word_set(insight);
            for area in &profile.growth_areas {
                if word_set(area).iter().any(|w| insight_words.contains(w)) {
                    coherence_bonus += 2;
                }
            }
        }

        let development =
            (insight_quality_score + growth_impact_score + coherence_bonus).min(CATEGORY_CAP);
        (development, depth_scores, coherence_bonus)
    }
}

/// Classify insight depth: 3 for long and emotion/reflection-laden, 2 for
/// moderately long, 1 otherwise
fn insight_depth(insight: &str) -> u32 {
    let words = insight.split_whitespace().count();
    let lowered = insight.to_lowercase();
    let reflective = lowered
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|w| EMOTION_TERMS.contains(&w) || REFLECTION_TERMS.contains(&w));

    if words > 15 && reflective {
        3
    } else if words > 10 {
        2
    } else {
        1
    }
}

fn trait_weight(label: &str) -> f64 {
    let lowered = label.to_lowercase();
    TRAIT_WEIGHTS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, weight)| *weight)
        .unwrap_or(1.0)
}

/// Stable 64-bit digest of a trait label for seeded draws
fn label_hash(label: &str) -> u64 {
    let digest = Sha256::digest(label.to_lowercase().as_bytes());
    u64::from_le_bytes(digest[..8].try_into().expect("digest is 32 bytes"))
}

fn word_set(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Capped keyword-fragment sums over trait scores, with the per-category
/// fallback constants used when nothing matches
fn ei_details(trait_scores: &BTreeMap<String, u32>) -> EmotionalIntelligenceDetails {
    let category = |fragments: &[&str], fallback: u32| -> u32 {
        let sum: u32 = trait_scores
            .iter()
            .filter(|(label, _)| {
                let lowered = label.to_lowercase();
                fragments.iter().any(|f| lowered.contains(f))
            })
            .map(|(_, score)| score)
            .sum();
        (if sum == 0 { fallback } else { sum }).min(100)
    };

    EmotionalIntelligenceDetails {
        self_awareness: category(&["świadomość"], 70),
        emotional_regulation: category(&["stabilność", "kontrola"], 65),
        social_awareness: category(&["empatia", "społeczn"], 75),
        relationship_management: category(&["relacje", "komunikacja"], 70),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deep_insight(n: usize) -> String {
        format!(
            "Zauważam, że moja codzienna praktyka refleksji numer {n} pomaga mi lepiej \
             rozumieć własne reakcje oraz potrzeby innych osób wokół mnie"
        )
    }

    fn sample_profile() -> Profile {
        Profile::new(
            vec!["Empatia".to_string(), "Upór".to_string()],
            vec![
                "Zrównoważenie emocjonalne".to_string(),
                "Wyrażanie trudnych uczuć w bezpieczny sposób".to_string(),
            ],
            vec![
                "Analityczne myślenie".to_string(),
                "Rozumienie własnych schematów".to_string(),
            ],
            vec![deep_insight(1), deep_insight(2)],
            vec!["Praktyka refleksji i uważności w codziennych sytuacjach stresowych".to_string()],
        )
    }

    #[test]
    fn one_insight_scores_zero() {
        let engine = ScoreEngine::seeded(7);
        let mut profile = Profile::insufficient_data();
        let breakdown = engine.score(&mut profile);
        assert_eq!(breakdown, ScoreBreakdown::default());
        assert!(profile.trait_scores.is_none());
    }

    #[test]
    fn empty_profile_scores_zero() {
        let engine = ScoreEngine::new();
        let mut profile = Profile::new(vec![], vec![], vec![], vec![], vec![]);
        assert_eq!(engine.score(&mut profile).total, 0);
    }

    #[test]
    fn total_is_bounded_and_categories_capped() {
        let engine = ScoreEngine::seeded(42);
        let mut profile = Profile::new(
            (0..20).map(|i| format!("Cecha {i}")).collect(),
            (0..20)
                .map(|i| format!("Bardzo złożony wzorzec emocjonalny numer {i}"))
                .collect(),
            (0..20).map(|i| format!("Rozumienie schematu {i}")).collect(),
            (0..20).map(deep_insight).collect(),
            (0..20)
                .map(|i| format!("Niezwykle rozbudowany obszar rozwoju osobistego numer {i} w praktyce"))
                .collect(),
        );
        let breakdown = engine.score(&mut profile);
        assert_eq!(breakdown.personality, 25);
        assert_eq!(breakdown.emotional, 25);
        assert_eq!(breakdown.cognitive, 25);
        assert_eq!(breakdown.development, 25);
        assert_eq!(breakdown.total, 100);
    }

    #[test]
    fn seeded_scoring_is_reproducible() {
        let engine = ScoreEngine::seeded(1234);
        let mut first = sample_profile();
        let mut second = sample_profile();
        let a = engine.score(&mut first);
        let b = engine.score(&mut second);
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn trait_base_stays_in_range_and_weights_apply() {
        let engine = ScoreEngine::seeded(5);
        let scores = engine.trait_scores(&[
            "Empatia".to_string(),
            "Zwykła cecha".to_string(),
        ]);
        // Weighted 1.30: at least 65 * 1.3 = 84, capped at 100
        let empatia = scores["Empatia"];
        assert!((84..=100).contains(&empatia));
        // Unweighted draw stays in [65, 95]
        let plain = scores["Zwykła cecha"];
        assert!((65..=95).contains(&plain));
    }

    #[test]
    fn weight_matches_substring_case_insensitive() {
        assert_eq!(trait_weight("Głęboka EMPATIA wobec innych"), 1.30);
        assert_eq!(trait_weight("Samoświadomość"), 1.20);
        assert_eq!(trait_weight("Upór"), 1.0);
    }

    #[test]
    fn development_monotone_in_deep_insights() {
        let engine = ScoreEngine::seeded(9);
        let mut last = 0;
        for n in 2..8 {
            let mut profile = Profile::new(
                vec![],
                vec![],
                vec![],
                (0..n).map(deep_insight).collect(),
                vec![],
            );
            let development = engine.score(&mut profile).development;
            assert!(development >= last);
            assert!(development <= 25);
            last = development;
        }
        assert_eq!(last, 25);
    }

    #[test]
    fn insight_depth_classes() {
        assert_eq!(insight_depth("Krótko."), 1);
        // > 10 words, no lexicon token
        assert_eq!(
            insight_depth("Jeden dwa trzy cztery pięć sześć siedem osiem dziewięć dziesięć jedenaście"),
            2
        );
        // > 15 words with a reflection token
        assert_eq!(insight_depth(&deep_insight(1)), 3);
    }

    #[test]
    fn coherence_bonus_uses_whole_words() {
        let engine = ScoreEngine::seeded(3);
        // "refleksji" appears in both insights and the growth area
        let mut profile = Profile::new(
            vec![],
            vec![],
            vec![],
            vec![deep_insight(1), deep_insight(2)],
            vec!["Pogłębianie refleksji".to_string()],
        );
        let breakdown = engine.score(&mut profile);
        let quality = profile.insight_quality.unwrap();
        assert!(quality.coherence_level >= 2.0); // two matching pairs → bonus 4
        assert!(breakdown.development > 0);
    }

    #[test]
    fn enrichment_preserves_canonical_fields() {
        let engine = ScoreEngine::seeded(11);
        let mut profile = sample_profile();
        let canonical = sample_profile();
        engine.score(&mut profile);

        assert_eq!(profile.personality_traits, canonical.personality_traits);
        assert_eq!(profile.emotional_patterns, canonical.emotional_patterns);
        assert_eq!(profile.cognitive_patterns, canonical.cognitive_patterns);
        assert_eq!(profile.insights, canonical.insights);
        assert_eq!(profile.growth_areas, canonical.growth_areas);
        assert!(profile.trait_scores.is_some());
    }

    #[test]
    fn ei_details_fallbacks_and_sums() {
        let mut scores = BTreeMap::new();
        scores.insert("Samoświadomość".to_string(), 90);
        let details = ei_details(&scores);
        assert_eq!(details.self_awareness, 90);
        assert_eq!(details.emotional_regulation, 65);
        assert_eq!(details.social_awareness, 75);
        assert_eq!(details.relationship_management, 70);

        scores.insert("Świadomość ciała".to_string(), 80);
        let details = ei_details(&scores);
        // 90 + 80 caps at 100
        assert_eq!(details.self_awareness, 100);
    }

    #[test]
    fn default_analysis_scores_in_band() {
        let engine = ScoreEngine::seeded(2024);
        let mut profile = Profile::default_analysis();
        let breakdown = engine.score(&mut profile);
        assert!(breakdown.total >= BASE_SCORE);
        assert!(breakdown.total <= 100);
        assert_eq!(
            breakdown.total,
            breakdown.base
                + breakdown.personality
                + breakdown.emotional
                + breakdown.cognitive
                + breakdown.development
        );
    }
}
