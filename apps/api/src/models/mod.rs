pub mod cv;
pub mod language;

pub use cv::{Contact, EducationEntry, ExperienceEntry, Links, StructuredCv};
pub use language::Language;
