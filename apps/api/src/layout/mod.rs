// Document layout: a declarative tree, standard-font metrics, and the flow
// engine that turns the tree into positioned marks on fixed-size pages.
// Layout is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod document;
pub mod flow;
pub mod font_metrics;

pub use document::{Block, Color, Document, PageSize, Section, SectionKind, TextBlock, TextStyle};
pub use flow::{layout, Layout, Mark, PageLayout};
pub use font_metrics::{get_metrics, FontFace};
