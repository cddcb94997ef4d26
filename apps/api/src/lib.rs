//! Resume document reconstruction pipeline.
//!
//! Input half: PDF bytes are turned into normalized text and tagged with a
//! language ([`extraction`]). Output half: a [`models::StructuredCv`] is
//! projected through one of five [`templates`] onto a document tree, flowed
//! onto pages ([`layout`]) and serialized to PDF ([`render`]). [`pipeline`]
//! is the in-process entry point; [`routes`] hosts it over HTTP.

pub mod config;
pub mod errors;
pub mod extraction;
pub mod layout;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod state;
pub mod templates;

pub use errors::{AppError, PipelineError};
pub use models::{Language, StructuredCv};
pub use pipeline::{detect_language, extract_text, render, render_with_fallback, Pipeline, RenderedDocument};
