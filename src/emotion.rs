//! Lexicon-based emotion detection for Polish text
//!
//! A deliberately small heuristic: count occurrences of emotion-laden words
//! from a fixed lexicon, normalize by text length, and report the dominant
//! emotion plus an overall intensity. Feeds the question-generation path
//! (choice of question strategy) and the metadata returned to callers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed Polish emotion lexicon
static EMOTION_WORDS: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            "radość",
            vec![
                "szczęśliwy",
                "radosny",
                "wesoły",
                "zadowolony",
                "uśmiechnięty",
                "entuzjastyczny",
            ],
        ),
        (
            "smutek",
            vec!["smutny", "przygnębiony", "zmartwiony", "zrozpaczony", "załamany"],
        ),
        (
            "złość",
            vec!["zły", "wściekły", "zirytowany", "poirytowany", "rozzłoszczony"],
        ),
        (
            "strach",
            vec!["przestraszony", "przerażony", "zaniepokojony", "wystraszony"],
        ),
        (
            "zaskoczenie",
            vec!["zaskoczony", "zdziwiony", "zdumiony", "oszołomiony"],
        ),
        (
            "spokój",
            vec!["spokojny", "zrelaksowany", "wyciszony", "opanowany"],
        ),
    ]
});

/// Result of analyzing one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalAnalysis {
    /// Emotion with the highest score; None when no lexicon word appears
    pub dominant_emotion: Option<String>,
    /// Per-emotion share of words, as a percentage rounded to 2 dp
    pub emotion_scores: BTreeMap<String, f64>,
    /// Share of emotion-laden words in the text, as a percentage
    pub emotion_intensity: f64,
}

impl EmotionalAnalysis {
    fn empty() -> Self {
        Self {
            dominant_emotion: None,
            emotion_scores: BTreeMap::new(),
            emotion_intensity: 0.0,
        }
    }
}

/// A sentence paired with the emotion it expresses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalPhrase {
    pub phrase: String,
    pub emotion: String,
}

/// Direction of emotional intensity between first and last text of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

/// Emotional changes across a series of texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalProgression {
    /// Human-readable dominant-emotion transitions, in order
    pub emotion_changes: Vec<String>,
    /// Intensity trend, when at least two texts were given
    pub overall_trend: Option<Trend>,
}

/// Coarse classification used to pick a question strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Positive,
    Negative,
    Mixed,
    Neutral,
}

/// Analyzer over the fixed Polish emotion lexicon
#[derive(Debug, Default, Clone)]
pub struct TextEmotionAnalyzer;

impl TextEmotionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a single text for expressed emotions
    pub fn analyze(&self, text: &str) -> EmotionalAnalysis {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        if words.is_empty() {
            return EmotionalAnalysis::empty();
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for word in &words {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            for (emotion, emotion_words) in EMOTION_WORDS.iter() {
                if emotion_words.contains(&word) {
                    *counts.entry(*emotion).or_insert(0) += 1;
                    break;
                }
            }
        }

        let total_emotional: usize = counts.values().sum();
        let mut scores = BTreeMap::new();
        for (emotion, _) in EMOTION_WORDS.iter() {
            let count = counts.get(emotion).copied().unwrap_or(0);
            let score = count as f64 / words.len() as f64;
            scores.insert((*emotion).to_string(), round2(score * 100.0));
        }

        let dominant = if total_emotional == 0 {
            None
        } else {
            scores
                .iter()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(emotion, _)| emotion.clone())
        };

        EmotionalAnalysis {
            dominant_emotion: dominant,
            emotion_scores: scores,
            emotion_intensity: round2(total_emotional as f64 / words.len() as f64 * 100.0),
        }
    }

    /// Extract sentences that carry an emotion from the lexicon
    pub fn emotional_phrases(&self, text: &str) -> Vec<EmotionalPhrase> {
        let mut phrases = Vec::new();
        for sentence in split_sentences(text) {
            let lowered = sentence.to_lowercase();
            for (emotion, words) in EMOTION_WORDS.iter() {
                if words.iter().any(|w| lowered.contains(w)) {
                    phrases.push(EmotionalPhrase {
                        phrase: sentence.to_string(),
                        emotion: (*emotion).to_string(),
                    });
                }
            }
        }
        phrases
    }

    /// Track dominant-emotion changes and the intensity trend across texts
    pub fn analyze_changes(&self, texts: &[&str]) -> EmotionalProgression {
        let analyses: Vec<_> = texts.iter().map(|t| self.analyze(t)).collect();

        let mut changes = Vec::new();
        let mut prev: Option<&str> = None;
        for analysis in &analyses {
            if let Some(current) = analysis.dominant_emotion.as_deref() {
                if let Some(previous) = prev {
                    if previous != current {
                        changes.push(format!("Zmiana z {previous} na {current}"));
                    }
                }
                prev = Some(current);
            }
        }

        let overall_trend = if analyses.len() >= 2 {
            let first = analyses[0].emotion_intensity;
            let last = analyses[analyses.len() - 1].emotion_intensity;
            Some(if last > first {
                Trend::Rising
            } else if last < first {
                Trend::Falling
            } else {
                Trend::Stable
            })
        } else {
            None
        };

        EmotionalProgression {
            emotion_changes: changes,
            overall_trend,
        }
    }

    /// Map an analysis to the coarse state driving question strategy
    pub fn emotional_state(&self, analysis: &EmotionalAnalysis) -> EmotionalState {
        match analysis.dominant_emotion.as_deref() {
            Some("radość") | Some("spokój") => EmotionalState::Positive,
            Some("smutek") | Some("złość") | Some("strach") => EmotionalState::Negative,
            Some("zaskoczenie") => EmotionalState::Mixed,
            _ => EmotionalState::Neutral,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
