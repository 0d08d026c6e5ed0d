//! Property-based tests for reflekta
//!
//! Invariants that must hold for all inputs:
//! - The score engine is bounded and never panics
//! - Fingerprints are stable, well-formed and order-sensitive
//! - The normalizer never panics on arbitrary provider output
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;

use reflekta::{Fingerprint, Profile, ScoreEngine};

fn labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("\\PC{0,60}", 0..12)
}

proptest! {
    /// Invariant: total stays in [0, 100], every category stays within its
    /// 25-point cap, for any profile content
    #[test]
    fn score_is_bounded(
        traits in labels(),
        emotional in labels(),
        cognitive in labels(),
        insights in labels(),
        growth in labels(),
        seed in any::<u64>(),
    ) {
        let engine = ScoreEngine::seeded(seed);
        let mut profile = Profile::new(traits, emotional, cognitive, insights, growth);
        let breakdown = engine.score(&mut profile);

        prop_assert!(breakdown.total <= 100);
        prop_assert!(breakdown.personality <= 25);
        prop_assert!(breakdown.emotional <= 25);
        prop_assert!(breakdown.cognitive <= 25);
        prop_assert!(breakdown.development <= 25);
        prop_assert!(breakdown.base == 0 || breakdown.base == 20);
    }

    /// Invariant: at most one insight means insufficient data, total 0
    #[test]
    fn short_insights_score_zero(
        traits in labels(),
        insight in prop::option::of("\\PC{0,60}"),
        seed in any::<u64>(),
    ) {
        let engine = ScoreEngine::seeded(seed);
        let mut profile = Profile::new(
            traits,
            vec![],
            vec![],
            insight.into_iter().collect(),
            vec![],
        );
        prop_assert_eq!(engine.score(&mut profile).total, 0);
    }

    /// Invariant: seeded scoring of identical profiles is identical
    #[test]
    fn seeded_scoring_deterministic(
        traits in labels(),
        insights in prop::collection::vec("\\PC{0,60}", 2..8),
        seed in any::<u64>(),
    ) {
        let engine = ScoreEngine::seeded(seed);
        let mut a = Profile::new(traits.clone(), vec![], vec![], insights.clone(), vec![]);
        let mut b = Profile::new(traits, vec![], vec![], insights, vec![]);
        prop_assert_eq!(engine.score(&mut a), engine.score(&mut b));
        prop_assert_eq!(a, b);
    }

    /// Invariant: fingerprints never panic and always render 64 hex chars
    #[test]
    fn fingerprint_is_well_formed(text in "\\PC{0,200}") {
        let fp = Fingerprint::of_text(&text);
        prop_assert_eq!(fp.as_str().len(), 64);
        prop_assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    /// Invariant: fingerprinting the same text twice matches
    #[test]
    fn fingerprint_is_stable(text in "\\PC{0,200}") {
        prop_assert_eq!(Fingerprint::of_text(&text), Fingerprint::of_text(&text));
    }

    /// Invariant: the normalizer rejects or accepts, never panics
    #[test]
    fn normalizer_never_panics(raw in "\\PC{0,400}") {
        let _ = reflekta::normalize::parse_profile(&raw);
    }

    /// Invariant: the emotion analyzer never panics and reports intensity
    /// as a percentage
    #[test]
    fn emotion_intensity_is_a_percentage(text in "\\PC{0,300}") {
        let analyzer = reflekta::emotion::TextEmotionAnalyzer::new();
        let analysis = analyzer.analyze(&text);
        prop_assert!((0.0..=100.0).contains(&analysis.emotion_intensity));
    }
}
