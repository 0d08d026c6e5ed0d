//! Prompt templates, transcript rendering and static defaults
//!
//! All user-facing text is Polish, matching the journaling assistant the
//! core serves.

use crate::emotion::EmotionalState;
use crate::types::ConversationTurn;

/// System instructions for the psychological-analysis path. The provider is
/// required to answer with a JSON object carrying the five canonical keys.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"Jesteś psychoterapeutą specjalizującym się w analizie wypowiedzi pacjentów.
Twoim zadaniem jest przeprowadzenie dogłębnej analizy psychologicznej na podstawie
odpowiedzi pacjenta na pytania terapeutyczne.

Analiza powinna zawierać:
1. Dominujące cechy osobowości widoczne w wypowiedziach
2. Wzorce emocjonalne (jakie emocje przeważają, jak są wyrażane)
3. Wzorce poznawcze (schematy myślenia, przekonania)
4. Główne spostrzeżenia terapeutyczne
5. Potencjalne obszary rozwoju osobistego

Unikaj nadmiernych uogólnień. Bazuj wyłącznie na dostarczonych danych.
Pamiętaj, że analiza ma być wspierająca i konstruktywna, skupiona na wzroście.

Odpowiedź sformatuj jako JSON z następującymi kluczami:
{
    "personality_traits": ["cecha1", "cecha2", ...],
    "emotional_patterns": ["wzorzec1", "wzorzec2", ...],
    "cognitive_patterns": ["wzorzec1", "wzorzec2", ...],
    "insights": ["spostrzeżenie1", "spostrzeżenie2", ...],
    "growth_areas": ["obszar1", "obszar2", ...]
}

Upewnij się, że Twoja odpowiedź jest poprawnym i dobrze sformatowanym obiektem JSON."#;

/// System instructions for generating the first question of a conversation
pub const INITIAL_QUESTION_PROMPT: &str = r#"Wygeneruj jedno głębokie, refleksyjne pytanie terapeutyczne w języku polskim,
które mogłoby rozpocząć rozmowę z nowym użytkownikiem aplikacji wsparcia psychologicznego.

Pytanie powinno być empatyczne, otwarte i zachęcające do głębszej refleksji nad sobą
i swoim samopoczuciem.

Unikaj pytań zamkniętych i powierzchownych. Pytanie powinno być napisane w drugiej
osobie liczby pojedynczej (Ty).

Odpowiedz tylko samym pytaniem, bez dodatkowego tekstu."#;

/// Fixed fallback questions used when no provider is reachable or no
/// context exists
pub const DEFAULT_QUESTIONS: &[&str] = &[
    "Co sprawiło Ci największą satysfakcję w ostatnim tygodniu?",
    "Jak opisałbyś/opisałabyś swój nastrój w ostatnich dniach?",
    "Jakie emocje towarzyszą Ci najczęściej w ciągu dnia?",
    "Co przede wszystkim motywuje Cię do działania?",
    "Jakie wartości są dla Ciebie najważniejsze w życiu?",
];

/// Focus areas suggested when the emotional analysis offers nothing better
pub const DEFAULT_FOCUS_AREAS: &[&str] = &["samoświadomość", "refleksja"];

/// How many trailing turns feed the question-generation context
pub const QUESTION_CONTEXT_TURNS: usize = 5;

/// Question strategy matching the user's current emotional state
pub fn question_strategy(state: EmotionalState) -> &'static str {
    match state {
        EmotionalState::Positive => {
            "Zadaj pytanie, które zachęci do refleksji nad pozytywnymi aspektami życia lub doświadczeniami."
        }
        EmotionalState::Negative => {
            "Zadaj empatyczne pytanie, które pomoże w analizie trudnych emocji, ale z perspektywą konstruktywnego rozwiązania."
        }
        EmotionalState::Mixed => {
            "Zadaj pytanie, które pozwoli na zrównoważenie sprzecznych emocji i znalezienie harmonii."
        }
        EmotionalState::Neutral => {
            "Zadaj pytanie, które zgłębi tematy ważne dla osobistego rozwoju i samoświadomości."
        }
    }
}

/// Render a turn sequence into the transcript block fed to providers
pub fn render_transcript(turns: &[ConversationTurn]) -> String {
    let mut text = String::new();
    for turn in turns {
        text.push_str(&format!("Pytanie: {}\n", turn.question));
        text.push_str(&format!("Odpowiedź: {}\n", turn.response));
        text.push_str(&format!(
            "Data: {}\n\n",
            turn.timestamp.format("%Y-%m-%d %H:%M")
        ));
    }
    text
}

/// Render the trailing context window for question generation
pub fn render_question_context(turns: &[ConversationTurn]) -> String {
    let start = turns.len().saturating_sub(QUESTION_CONTEXT_TURNS);
    render_transcript(&turns[start..])
}

/// User payload for the analysis path
pub fn analysis_user_prompt(transcript: &str) -> String {
    format!(
        "Dokonaj analizy psychologicznej następujących odpowiedzi na pytania terapeutyczne:\n\n\
         {transcript}\n\
         Proszę o analizę w formacie JSON zgodnie ze wskazówkami z systemu."
    )
}

/// System instructions for a contextual follow-up question
pub fn contextual_question_prompt(strategy: &str, focus_areas: &[String]) -> String {
    format!(
        "Jesteś doświadczonym polskim psychoterapeutą prowadzącym terapeutyczną rozmowę.\n\
         Twoim zadaniem jest wygenerowanie pojedynczego, głębokiego pytania w języku polskim,\n\
         które będzie kontynuacją rozmowy z pacjentem.\n\n\
         Na podstawie dostarczonego fragmentu rozmowy, stwórz pytanie, które:\n\
         1. Bezpośrednio odnosi się do tematów poruszonych przez pacjenta\n\
         2. {strategy}\n\
         3. Skupia się na jednym lub więcej z następujących obszarów: {areas}\n\
         4. Jest sformułowane w sposób otwarty (nie może być odpowiedzią tak/nie)\n\
         5. Nie zawiera osądów ani założeń\n\
         6. Jest empatyczne i pełne zrozumienia\n\n\
         Wygeneruj wyłącznie jedno pytanie, bez wprowadzenia ani wyjaśnień.",
        strategy = strategy,
        areas = focus_areas.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn transcript_renders_all_fields() {
        let turns = vec![ConversationTurn::new(
            "Jak się czujesz?",
            "Dobrze.",
            Utc.with_ymd_and_hms(2024, 3, 5, 20, 15, 0).unwrap(),
        )];
        let text = render_transcript(&turns);
        assert!(text.contains("Pytanie: Jak się czujesz?"));
        assert!(text.contains("Odpowiedź: Dobrze."));
        assert!(text.contains("Data: 2024-03-05 20:15"));
    }

    #[test]
    fn question_context_uses_last_five_turns() {
        let turns: Vec<_> = (0..8)
            .map(|i| {
                ConversationTurn::new(
                    format!("Q{i}"),
                    format!("R{i}"),
                    Utc.timestamp_opt(i, 0).unwrap(),
                )
            })
            .collect();
        let text = render_question_context(&turns);
        assert!(!text.contains("Pytanie: Q2"));
        assert!(text.contains("Pytanie: Q3"));
        assert!(text.contains("Pytanie: Q7"));
    }

    #[test]
    fn contextual_prompt_embeds_strategy_and_areas() {
        let prompt = contextual_question_prompt(
            question_strategy(EmotionalState::Negative),
            &["samoświadomość".to_string(), "relacje".to_string()],
        );
        assert!(prompt.contains("trudnych emocji"));
        assert!(prompt.contains("samoświadomość, relacje"));
    }
}
