//! Projects a [`StructuredCv`] plus keyword list onto a themed [`Document`] tree.
//!
//! Renderers never paginate; they only decide what goes where and how it looks.

use std::collections::HashSet;

use crate::layout::{Block, Document, Section, SectionKind, TextBlock};
use crate::models::{Contact, Language, StructuredCv};
use crate::templates::headings::{headings, Headings};
use crate::templates::theme::Theme;

/// Separator between contact fields and between links.
pub const CONTACT_SEPARATOR: &str = " | ";

const ITEM_GAP: f32 = 3.0;
const TITLE_GAP: f32 = 6.0;

/// Builds the document tree for one render request.
///
/// Headings follow `language`, else the record's own tag, else English.
pub fn build_document(
    cv: &StructuredCv,
    keywords: &[String],
    language: Option<Language>,
    theme: &Theme,
) -> Document {
    let headings = headings(language.or(cv.language));
    let builder = Builder { theme, headings };

    let sections = [
        builder.profile(cv),
        builder.list(SectionKind::KeyAccomplishments, &cv.key_accomplishments),
        builder.experience(cv),
        builder.education(cv),
        builder.tags(SectionKind::Skills, &merge_skills(keywords, &cv.skills)),
        builder.tags(SectionKind::Tools, &non_empty(&cv.tools)),
        builder.lines(SectionKind::Languages, &cv.languages),
        builder.list(SectionKind::Certifications, &cv.certifications),
    ];

    Document {
        title: document_title(cv),
        page: theme.page,
        margin: theme.margin,
        background: theme.background,
        header: builder.header(cv),
        sections: sections.into_iter().flatten().collect(),
    }
}

/// Non-empty `email`, `phone`, `location` joined with [`CONTACT_SEPARATOR`].
pub fn contact_line(contact: &Contact) -> String {
    [&contact.email, &contact.phone, &contact.location]
        .into_iter()
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

/// Keywords first, then any skill not already listed (case-insensitive).
pub fn merge_skills(keywords: &[String], skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .chain(skills)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn non_empty(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn document_title(cv: &StructuredCv) -> String {
    match (cv.name.trim(), cv.title.trim()) {
        ("", "") => "Curriculum Vitae".to_string(),
        (name, "") => name.to_string(),
        ("", title) => title.to_string(),
        (name, title) => format!("{name} - {title}"),
    }
}

struct Builder<'a> {
    theme: &'a Theme,
    headings: &'static Headings,
}

impl Builder<'_> {
    fn header(&self, cv: &StructuredCv) -> Vec<Block> {
        let t = self.theme;
        let mut blocks = Vec::new();

        let name = cv.name.trim();
        if !name.is_empty() {
            blocks.push(Block::Text(TextBlock::new(name, t.name).space_after(2.0)));
        }
        let title = cv.title.trim();
        if !title.is_empty() {
            blocks.push(Block::Text(TextBlock::new(title, t.title).space_after(4.0)));
        }
        let contact = contact_line(&cv.contact);
        if !contact.is_empty() {
            blocks.push(Block::text(contact, t.contact));
        }
        if let Some(links) = &cv.contact.links {
            let present = links.present();
            if !present.is_empty() {
                blocks.push(Block::text(present.join(CONTACT_SEPARATOR), t.contact));
            }
        }

        match t.header_rule {
            Some(rule) => {
                blocks.push(Block::Spacer(8.0));
                blocks.push(Block::Rule {
                    color: rule.color,
                    thickness: rule.thickness,
                    space_after: t.header_gap,
                });
            }
            None => blocks.push(Block::Spacer(t.header_gap)),
        }
        blocks
    }

    /// Wraps a non-empty body into a titled section; empty bodies yield `None`.
    fn section(&self, kind: SectionKind, mut body: Vec<Block>) -> Option<Section> {
        if body.is_empty() {
            return None;
        }
        let t = self.theme;
        let title = self.headings.for_section(kind).to_string();

        let mut heading = vec![Block::Text(TextBlock::new(title.clone(), t.section_title))];
        match t.section_rule {
            Some(rule) => {
                heading.push(Block::Spacer(2.0));
                heading.push(Block::Rule {
                    color: rule.color,
                    thickness: rule.thickness,
                    space_after: TITLE_GAP,
                });
            }
            None => heading.push(Block::Spacer(TITLE_GAP)),
        }

        body.push(Block::Spacer(t.section_gap));
        Some(Section { kind, title, heading, body })
    }

    fn profile(&self, cv: &StructuredCv) -> Option<Section> {
        let profile = cv.profile.trim();
        let body = if profile.is_empty() {
            Vec::new()
        } else {
            vec![Block::text(profile, self.theme.body)]
        };
        self.section(SectionKind::Profile, body)
    }

    /// Bulleted list, one paragraph per item.
    fn list(&self, kind: SectionKind, items: &[String]) -> Option<Section> {
        let body = non_empty(items)
            .into_iter()
            .map(|item| {
                Block::Text(
                    TextBlock::new(format!("{}{item}", self.theme.bullet), self.theme.body)
                        .space_after(ITEM_GAP),
                )
            })
            .collect();
        self.section(kind, body)
    }

    /// Plain lines without bullets.
    fn lines(&self, kind: SectionKind, items: &[String]) -> Option<Section> {
        let body = non_empty(items)
            .into_iter()
            .map(|item| Block::Text(TextBlock::new(item, self.theme.body).space_after(ITEM_GAP)))
            .collect();
        self.section(kind, body)
    }

    fn tags(&self, kind: SectionKind, items: &[String]) -> Option<Section> {
        let t = self.theme;
        let body = if items.is_empty() {
            Vec::new()
        } else {
            vec![Block::Tags {
                items: items.to_vec(),
                style: t.tag,
                chip: t.tag_chip,
                separator: t.tag_separator.map(str::to_string),
                space_after: 0.0,
            }]
        };
        self.section(kind, body)
    }

    fn experience(&self, cv: &StructuredCv) -> Option<Section> {
        let t = self.theme;
        let mut body = Vec::new();
        for job in &cv.experience {
            let (title, company, dates, description) = (
                job.title.trim(),
                job.company.trim(),
                job.dates.trim(),
                job.description.trim(),
            );
            if [title, company, dates, description].iter().all(|f| f.is_empty()) {
                continue;
            }
            if !title.is_empty() || !dates.is_empty() {
                body.push(Block::Split {
                    left: TextBlock::new(title, t.entry_title).space_after(1.0),
                    right: TextBlock::new(dates, t.entry_dates),
                });
            }
            if !company.is_empty() {
                body.push(Block::Text(TextBlock::new(company, t.entry_org).space_after(2.0)));
            }
            if !description.is_empty() {
                body.push(Block::text(description, t.body));
            }
            body.push(Block::Spacer(t.entry_gap));
        }
        self.section(SectionKind::Experience, body)
    }

    fn education(&self, cv: &StructuredCv) -> Option<Section> {
        let t = self.theme;
        let mut body = Vec::new();
        for edu in &cv.education {
            let (degree, school, dates) = (edu.degree.trim(), edu.school.trim(), edu.dates.trim());
            if degree.is_empty() && school.is_empty() && dates.is_empty() {
                continue;
            }
            if !degree.is_empty() || !dates.is_empty() {
                body.push(Block::Split {
                    left: TextBlock::new(degree, t.entry_title).space_after(1.0),
                    right: TextBlock::new(dates, t.entry_dates),
                });
            }
            if !school.is_empty() {
                body.push(Block::text(school, t.entry_org));
            }
            body.push(Block::Spacer(t.entry_gap));
        }
        self.section(SectionKind::Education, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, Links};
    use crate::templates::theme::{CLASSIC, MODERN};

    fn sample_cv() -> StructuredCv {
        StructuredCv {
            name: "Jane Doe".into(),
            title: "Backend Engineer".into(),
            contact: Contact {
                email: "jane@example.com".into(),
                phone: "".into(),
                location: "Berlin".into(),
                links: None,
            },
            profile: "Engineer with ten years of distributed systems experience.".into(),
            key_accomplishments: vec!["Cut p99 latency by 40%".into()],
            experience: vec![ExperienceEntry {
                title: "Staff Engineer".into(),
                company: "Acme".into(),
                dates: "2019 - 2024".into(),
                description: "Built the billing platform.".into(),
            }],
            education: vec![],
            certifications: vec!["CKA".into()],
            skills: vec!["rust".into(), "Kafka".into()],
            tools: vec!["Terraform".into()],
            languages: vec!["English".into(), "German".into()],
            language: None,
        }
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let doc = build_document(&sample_cv(), &["Rust".into()], None, &MODERN);
        assert_eq!(
            doc.section_kinds(),
            vec![
                SectionKind::Profile,
                SectionKind::KeyAccomplishments,
                SectionKind::Experience,
                SectionKind::Skills,
                SectionKind::Tools,
                SectionKind::Languages,
                SectionKind::Certifications,
            ]
        );
    }

    #[test]
    fn test_education_omitted_when_empty() {
        let doc = build_document(&sample_cv(), &[], None, &MODERN);
        assert!(doc.section(SectionKind::Experience).is_some());
        assert!(doc.section(SectionKind::Education).is_none());
        assert!(!doc.text_content().contains("EDUCATION"));
    }

    #[test]
    fn test_blank_entries_do_not_create_sections() {
        let cv = StructuredCv {
            education: vec![EducationEntry::default()],
            tools: vec!["  ".into()],
            ..StructuredCv::default()
        };
        let doc = build_document(&cv, &[" ".into()], None, &MODERN);
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_degenerate_record_has_only_header() {
        let doc = build_document(&StructuredCv::default(), &[], None, &MODERN);
        assert!(doc.sections.is_empty());
        assert!(!doc.header.is_empty());
        assert_eq!(doc.title, "Curriculum Vitae");
    }

    #[test]
    fn test_contact_line_skips_empty_fields() {
        let cv = sample_cv();
        assert_eq!(contact_line(&cv.contact), "jane@example.com | Berlin");
        assert_eq!(contact_line(&Contact::default()), "");
    }

    #[test]
    fn test_links_line_rendered_when_present() {
        let mut cv = sample_cv();
        cv.contact.links = Some(Links {
            linkedin: Some("linkedin.com/in/jane".into()),
            github: None,
            portfolio: Some("jane.dev".into()),
        });
        let doc = build_document(&cv, &[], None, &MODERN);
        assert!(doc.text_content().contains("linkedin.com/in/jane | jane.dev"));
    }

    #[test]
    fn test_skills_merge_keywords_first_case_insensitive() {
        let merged = merge_skills(&["Rust".into(), "Kafka".into()], &["rust".into(), "Go".into()]);
        assert_eq!(merged, vec!["Rust", "Kafka", "Go"]);
    }

    #[test]
    fn test_headings_localized_from_argument_then_record() {
        let mut cv = sample_cv();
        let doc = build_document(&cv, &[], Some(Language::Es), &MODERN);
        assert_eq!(doc.section(SectionKind::Experience).unwrap().title, "EXPERIENCIA");

        cv.language = Some(Language::De);
        let doc = build_document(&cv, &[], None, &MODERN);
        assert_eq!(doc.section(SectionKind::Experience).unwrap().title, "BERUFSERFAHRUNG");

        let doc = build_document(&cv, &[], Some(Language::Fr), &MODERN);
        assert_eq!(doc.section(SectionKind::Experience).unwrap().title, "EXPÉRIENCE");
    }

    #[test]
    fn test_classic_joins_keywords_with_bullets() {
        let doc = build_document(&sample_cv(), &["Rust".into()], None, &CLASSIC);
        let skills = doc.section(SectionKind::Skills).unwrap();
        assert!(matches!(
            &skills.body[0],
            Block::Tags { separator: Some(sep), .. } if sep == " \u{2022} "
        ));
    }
}
