//! Keyword-frequency language heuristic for resumes.
//!
//! Only reliable on resume vocabulary: each language carries a handful of
//! section words ("experience", "education", "skills", ...) and the language
//! with the most distinct hits wins once it clears a minimum. Anything sparser
//! defaults to English.

use crate::models::Language;

/// Minimum number of distinct keyword hits before a non-English language is chosen.
pub const DEFAULT_MIN_MATCHES: usize = 2;

/// Tie-break order among the non-English languages; first listed wins.
pub const DEFAULT_PRIORITY: [Language; 5] = [
    Language::Es,
    Language::Fr,
    Language::De,
    Language::It,
    Language::Pt,
];

const SPANISH: &[&str] = &[
    "experiencia",
    "educación",
    "habilidades",
    "idiomas",
    "formación",
    "perfil profesional",
    "logros",
];
const FRENCH: &[&str] = &[
    "expérience",
    "éducation",
    "compétences",
    "langues",
    "formation",
    "profil professionnel",
];
const GERMAN: &[&str] = &[
    "erfahrung",
    "ausbildung",
    "fähigkeiten",
    "sprachen",
    "berufserfahrung",
];
const ITALIAN: &[&str] = &[
    "esperienza",
    "istruzione",
    "competenze",
    "lingue",
    "formazione",
];
const PORTUGUESE: &[&str] = &[
    "experiência",
    "educação",
    "habilidades",
    "idiomas",
    "formação",
];

/// Lowercase section keywords for `language`. English has none: it is the default.
pub fn keywords(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => &[],
        Language::Es => SPANISH,
        Language::Fr => FRENCH,
        Language::De => GERMAN,
        Language::It => ITALIAN,
        Language::Pt => PORTUGUESE,
    }
}

/// Language classifier with a configurable threshold and tie-break order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDetector {
    min_matches: usize,
    priority: [Language; 5],
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self {
            min_matches: DEFAULT_MIN_MATCHES,
            priority: DEFAULT_PRIORITY,
        }
    }
}

impl LanguageDetector {
    pub fn new(min_matches: usize, priority: [Language; 5]) -> Self {
        Self {
            min_matches,
            priority,
        }
    }

    pub fn with_min_matches(mut self, min_matches: usize) -> Self {
        self.min_matches = min_matches;
        self
    }

    /// Distinct keyword hits per candidate language, in priority order.
    pub fn scores(&self, text: &str) -> Vec<(Language, usize)> {
        let lowered = text.to_lowercase();
        self.priority
            .iter()
            .map(|&lang| {
                let hits = keywords(lang)
                    .iter()
                    .filter(|kw| lowered.contains(*kw))
                    .count();
                (lang, hits)
            })
            .collect()
    }

    /// Classifies `text`. Total: always returns a supported language.
    pub fn detect(&self, text: &str) -> Language {
        let scores = self.scores(text);
        let max = scores.iter().map(|&(_, n)| n).max().unwrap_or(0);
        // A threshold of zero would otherwise pick the first priority language
        // for keyword-free text.
        if max == 0 || max < self.min_matches {
            return Language::En;
        }
        scores
            .into_iter()
            .find(|&(_, n)| n == max)
            .map(|(lang, _)| lang)
            .unwrap_or_default()
    }
}

/// Detects with the default threshold and priority.
pub fn detect_language(text: &str) -> Language {
    LanguageDetector::default().detect(text)
}
