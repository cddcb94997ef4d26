//! Declarative document tree handed from the template builders to the flow engine.
//!
//! Nothing here knows about pages or coordinates; `layout::flow` decides where
//! every line lands.

use serde::{Deserialize, Serialize};

pub use crate::layout::font_metrics::FontFace;

// ────────────────────────────────────────────────────────────────────────────
// Primitives
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xffffff);

    /// Builds a colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Color {
        Color { r: (rgb >> 16) as u8, g: (rgb >> 8) as u8, b: rgb as u8 }
    }

    /// Components in `0.0..=1.0`, as PDF colour operators expect them.
    pub fn unit(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| f32::from(c) / 255.0)
    }
}

/// Physical page size in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize { width: 595.28, height: 841.89 };
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Typographic style of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub face: FontFace,
    /// Font size in points.
    pub size: f32,
    pub color: Color,
    /// Line height as a multiple of `size`.
    pub line_height: f32,
    /// Filled band drawn behind each line across the full content width.
    pub band: Option<Color>,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Color) -> Self {
        TextStyle { face, size, color, line_height: 1.3, band: None }
    }

    pub const fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub const fn band(mut self, band: Color) -> Self {
        self.band = Some(band);
        self
    }

    /// Vertical advance of one line in points.
    pub fn leading(&self) -> f32 {
        self.size * self.line_height
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

/// A paragraph that the flow engine wraps to the content width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub style: TextStyle,
    /// Left indent relative to the content box, in points.
    pub indent: f32,
    /// Vertical gap after the paragraph, in points.
    pub space_after: f32,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        TextBlock { text: text.into(), style, indent: 0.0, space_after: 0.0 }
    }

    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    pub fn space_after(mut self, space_after: f32) -> Self {
        self.space_after = space_after;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Text(TextBlock),
    /// Two runs on the same row: `left` wraps, `right` is right-aligned on the
    /// first row (job title / dates).
    Split { left: TextBlock, right: TextBlock },
    /// A tag cloud. With `separator` set the items are joined into one wrapped
    /// paragraph; otherwise each item is laid out as a chip, filled with `chip`
    /// when given.
    Tags {
        items: Vec<String>,
        style: TextStyle,
        chip: Option<Color>,
        separator: Option<String>,
        space_after: f32,
    },
    /// Horizontal rule across the content width.
    Rule { color: Color, thickness: f32, space_after: f32 },
    /// Vertical gap. Dropped when it would open a page.
    Spacer(f32),
}

impl Block {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Block::Text(TextBlock::new(text, style))
    }

    /// Text carried by the block, in reading order.
    pub fn text_content(&self) -> Vec<&str> {
        match self {
            Block::Text(t) => vec![t.text.as_str()],
            Block::Split { left, right } => vec![left.text.as_str(), right.text.as_str()],
            Block::Tags { items, .. } => items.iter().map(String::as_str).collect(),
            Block::Rule { .. } | Block::Spacer(_) => Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections & document
// ────────────────────────────────────────────────────────────────────────────

/// Resume sections, in the order builders emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Profile,
    KeyAccomplishments,
    Experience,
    Education,
    Skills,
    Tools,
    Languages,
    Certifications,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Localized heading text.
    pub title: String,
    /// Blocks drawing the heading; kept on the same page as the first body line.
    pub heading: Vec<Block>,
    pub body: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Written to the PDF Info dictionary.
    pub title: String,
    pub page: PageSize,
    /// Uniform page margin in points.
    pub margin: f32,
    /// Fill painted under every page.
    pub background: Option<Color>,
    pub header: Vec<Block>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }

    /// All text in the document joined by newlines, header first.
    pub fn text_content(&self) -> String {
        let header = self.header.iter().flat_map(Block::text_content);
        let sections = self
            .sections
            .iter()
            .flat_map(|s| s.heading.iter().chain(s.body.iter()))
            .flat_map(Block::text_content);
        header.chain(sections).collect::<Vec<_>>().join("\n")
    }
}
