// Template registry: five visual variants over one shared document builder.
// The table is static and immutable; lookups never fail and unknown ids fall
// back to the modern layout.

pub mod builder;
pub mod headings;
pub mod theme;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::Document;
use crate::models::{Language, StructuredCv};
use crate::templates::theme::Theme;

pub use builder::{build_document, contact_line, merge_skills};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Modern,
    Classic,
    Minimal,
    Professional,
    Creative,
}

impl TemplateId {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Minimal => "minimal",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
        }
    }

    /// Case-insensitive parse of a registered id.
    pub fn from_id(id: &str) -> Option<TemplateId> {
        TEMPLATES
            .iter()
            .map(|t| t.id)
            .find(|t| t.as_str().eq_ignore_ascii_case(id.trim()))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered layout.
#[derive(Debug)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub theme: Theme,
}

impl TemplateDescriptor {
    /// Projects the record onto this template's document tree. Pure and total.
    pub fn render(&self, cv: &StructuredCv, keywords: &[String], language: Option<Language>) -> Document {
        build_document(cv, keywords, language, &self.theme)
    }
}

static TEMPLATES: [TemplateDescriptor; 5] = [
    TemplateDescriptor {
        id: TemplateId::Modern,
        name: "Modern",
        description: "Clean, contemporary design with blue accents",
        theme: theme::MODERN,
    },
    TemplateDescriptor {
        id: TemplateId::Classic,
        name: "Classic",
        description: "Traditional black and white professional style",
        theme: theme::CLASSIC,
    },
    TemplateDescriptor {
        id: TemplateId::Minimal,
        name: "Minimal",
        description: "Minimalist design with focus on content",
        theme: theme::MINIMAL,
    },
    TemplateDescriptor {
        id: TemplateId::Professional,
        name: "Professional",
        description: "Corporate style with structured layout",
        theme: theme::PROFESSIONAL,
    },
    TemplateDescriptor {
        id: TemplateId::Creative,
        name: "Creative",
        description: "Vibrant purple design with modern flair",
        theme: theme::CREATIVE,
    },
];

/// Every registered template, in registration order.
pub fn all() -> &'static [TemplateDescriptor] {
    &TEMPLATES
}

pub fn get(id: TemplateId) -> &'static TemplateDescriptor {
    match id {
        TemplateId::Modern => &TEMPLATES[0],
        TemplateId::Classic => &TEMPLATES[1],
        TemplateId::Minimal => &TEMPLATES[2],
        TemplateId::Professional => &TEMPLATES[3],
        TemplateId::Creative => &TEMPLATES[4],
    }
}

/// Looks a template up by id. Unknown or empty ids resolve to `modern`.
pub fn resolve(id: &str) -> &'static TemplateDescriptor {
    match TemplateId::from_id(id) {
        Some(id) => get(id),
        None => {
            tracing::debug!(requested = id, "unknown template id, using modern");
            get(TemplateId::Modern)
        }
    }
}
