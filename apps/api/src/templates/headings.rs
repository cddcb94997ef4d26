//! Localized section headings, one row per supported language.

use crate::layout::SectionKind;
use crate::models::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headings {
    pub professional_summary: &'static str,
    pub key_accomplishments: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub tools_technologies: &'static str,
    pub languages: &'static str,
    pub certifications: &'static str,
}

impl Headings {
    pub fn for_section(&self, kind: SectionKind) -> &'static str {
        match kind {
            SectionKind::Profile => self.professional_summary,
            SectionKind::KeyAccomplishments => self.key_accomplishments,
            SectionKind::Experience => self.experience,
            SectionKind::Education => self.education,
            SectionKind::Skills => self.skills,
            SectionKind::Tools => self.tools_technologies,
            SectionKind::Languages => self.languages,
            SectionKind::Certifications => self.certifications,
        }
    }
}

static EN: Headings = Headings {
    professional_summary: "PROFESSIONAL SUMMARY",
    key_accomplishments: "KEY ACCOMPLISHMENTS",
    experience: "EXPERIENCE",
    education: "EDUCATION",
    skills: "SKILLS",
    tools_technologies: "TOOLS & TECHNOLOGIES",
    languages: "LANGUAGES",
    certifications: "CERTIFICATIONS",
};

static ES: Headings = Headings {
    professional_summary: "PERFIL PROFESIONAL",
    key_accomplishments: "LOGROS CLAVE",
    experience: "EXPERIENCIA",
    education: "EDUCACIÓN",
    skills: "HABILIDADES",
    tools_technologies: "HERRAMIENTAS Y TECNOLOGÍAS",
    languages: "IDIOMAS",
    certifications: "CERTIFICACIONES",
};

static FR: Headings = Headings {
    professional_summary: "PROFIL PROFESSIONNEL",
    key_accomplishments: "RÉALISATIONS CLÉS",
    experience: "EXPÉRIENCE",
    education: "FORMATION",
    skills: "COMPÉTENCES",
    tools_technologies: "OUTILS ET TECHNOLOGIES",
    languages: "LANGUES",
    certifications: "CERTIFICATIONS",
};

static DE: Headings = Headings {
    professional_summary: "BERUFSPROFIL",
    key_accomplishments: "WICHTIGSTE ERFOLGE",
    experience: "BERUFSERFAHRUNG",
    education: "AUSBILDUNG",
    skills: "FÄHIGKEITEN",
    tools_technologies: "WERKZEUGE UND TECHNOLOGIEN",
    languages: "SPRACHEN",
    certifications: "ZERTIFIZIERUNGEN",
};

static IT: Headings = Headings {
    professional_summary: "PROFILO PROFESSIONALE",
    key_accomplishments: "RISULTATI CHIAVE",
    experience: "ESPERIENZA",
    education: "ISTRUZIONE",
    skills: "COMPETENZE",
    tools_technologies: "STRUMENTI E TECNOLOGIE",
    languages: "LINGUE",
    certifications: "CERTIFICAZIONI",
};

static PT: Headings = Headings {
    professional_summary: "PERFIL PROFISSIONAL",
    key_accomplishments: "CONQUISTAS PRINCIPAIS",
    experience: "EXPERIÊNCIA",
    education: "EDUCAÇÃO",
    skills: "HABILIDADES",
    tools_technologies: "FERRAMENTAS E TECNOLOGIAS",
    languages: "IDIOMAS",
    certifications: "CERTIFICAÇÕES",
};

/// Heading table for `language`; `None` means English.
pub fn headings(language: Option<Language>) -> &'static Headings {
    match language.unwrap_or_default() {
        Language::En => &EN,
        Language::Es => &ES,
        Language::Fr => &FR,
        Language::De => &DE,
        Language::It => &IT,
        Language::Pt => &PT,
    }
}
