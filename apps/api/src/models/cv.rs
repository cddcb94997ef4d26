//! The structured resume record produced by the rewriting step and consumed by rendering.
//!
//! Every collection defaults to empty and every string to `""`, so a bare `{}`
//! deserializes into a valid (degenerate) record and renderers only ever check
//! for emptiness.

use serde::{Deserialize, Serialize};

use crate::models::language::{deserialize_lenient, Language};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredCv {
    pub name: String,
    pub title: String,
    pub contact: Contact,
    pub profile: String,
    pub key_accomplishments: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<String>,
    pub skills: Vec<String>,
    pub tools: Vec<String>,
    pub languages: Vec<String>,
    /// Tag set by the language detector; drives heading localization.
    #[serde(
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub dates: String,
}

impl StructuredCv {
    /// Returns a copy tagged with `language`.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

impl Links {
    /// Non-empty links in display order.
    pub fn present(&self) -> Vec<&str> {
        [&self.linkedin, &self.github, &self.portfolio]
            .into_iter()
            .filter_map(|l| l.as_deref())
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}
