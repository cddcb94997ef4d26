//! Visual parameters for the five layouts. The builder is shared; only these
//! constants differ between templates.

use crate::layout::{Color, FontFace, PageSize, TextStyle};

use FontFace::{Helvetica, HelveticaBold, TimesBold, TimesRoman};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleStyle {
    pub color: Color,
    pub thickness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub page: PageSize,
    pub margin: f32,
    pub background: Option<Color>,

    pub name: TextStyle,
    pub title: TextStyle,
    pub contact: TextStyle,
    /// Rule under the header block.
    pub header_rule: Option<RuleStyle>,
    pub header_gap: f32,

    pub section_title: TextStyle,
    /// Rule under each section title.
    pub section_rule: Option<RuleStyle>,
    pub section_gap: f32,

    pub body: TextStyle,
    pub entry_title: TextStyle,
    pub entry_dates: TextStyle,
    pub entry_org: TextStyle,
    pub entry_gap: f32,
    /// Prefix for list items (accomplishments, certifications).
    pub bullet: &'static str,

    pub tag: TextStyle,
    pub tag_chip: Option<Color>,
    /// When set, tags render as one joined line instead of chips.
    pub tag_separator: Option<&'static str>,
}

pub const MODERN: Theme = Theme {
    page: PageSize::A4,
    margin: 40.0,
    background: None,
    name: TextStyle::new(HelveticaBold, 28.0, Color::hex(0x1e293b)).line_height(1.2),
    title: TextStyle::new(HelveticaBold, 14.0, Color::hex(0x2563eb)),
    contact: TextStyle::new(Helvetica, 9.0, Color::hex(0x64748b)),
    header_rule: Some(RuleStyle { color: Color::hex(0x2563eb), thickness: 3.0 }),
    header_gap: 20.0,
    section_title: TextStyle::new(HelveticaBold, 12.0, Color::WHITE)
        .line_height(1.7)
        .band(Color::hex(0x2563eb)),
    section_rule: None,
    section_gap: 14.0,
    body: TextStyle::new(Helvetica, 9.0, Color::hex(0x334155)).line_height(1.5),
    entry_title: TextStyle::new(HelveticaBold, 11.0, Color::hex(0x1e293b)),
    entry_dates: TextStyle::new(Helvetica, 9.0, Color::hex(0x64748b)),
    entry_org: TextStyle::new(HelveticaBold, 10.0, Color::hex(0x2563eb)),
    entry_gap: 8.0,
    bullet: "\u{2022} ",
    tag: TextStyle::new(Helvetica, 8.0, Color::hex(0x1e40af)),
    tag_chip: Some(Color::hex(0xdbeafe)),
    tag_separator: None,
};

pub const CLASSIC: Theme = Theme {
    page: PageSize::A4,
    margin: 40.0,
    background: None,
    name: TextStyle::new(TimesBold, 26.0, Color::BLACK).line_height(1.2),
    title: TextStyle::new(TimesRoman, 12.0, Color::hex(0x333333)),
    contact: TextStyle::new(TimesRoman, 8.0, Color::hex(0x555555)),
    header_rule: Some(RuleStyle { color: Color::BLACK, thickness: 1.0 }),
    header_gap: 16.0,
    section_title: TextStyle::new(TimesBold, 11.0, Color::BLACK),
    section_rule: Some(RuleStyle { color: Color::BLACK, thickness: 0.75 }),
    section_gap: 12.0,
    body: TextStyle::new(TimesRoman, 9.0, Color::hex(0x333333)).line_height(1.5),
    entry_title: TextStyle::new(TimesBold, 10.0, Color::BLACK),
    entry_dates: TextStyle::new(TimesRoman, 9.0, Color::hex(0x555555)),
    entry_org: TextStyle::new(TimesBold, 10.0, Color::BLACK),
    entry_gap: 8.0,
    bullet: "\u{2022} ",
    tag: TextStyle::new(TimesRoman, 9.0, Color::hex(0x333333)),
    tag_chip: None,
    tag_separator: Some(" \u{2022} "),
};

pub const MINIMAL: Theme = Theme {
    page: PageSize::A4,
    margin: 35.0,
    background: None,
    name: TextStyle::new(HelveticaBold, 24.0, Color::hex(0x1a1a1a)).line_height(1.2),
    title: TextStyle::new(Helvetica, 11.0, Color::hex(0x666666)),
    contact: TextStyle::new(Helvetica, 8.0, Color::hex(0x888888)),
    header_rule: None,
    header_gap: 14.0,
    section_title: TextStyle::new(HelveticaBold, 10.0, Color::hex(0x1a1a1a)),
    section_rule: Some(RuleStyle { color: Color::hex(0xe5e5e5), thickness: 0.5 }),
    section_gap: 10.0,
    body: TextStyle::new(Helvetica, 8.0, Color::hex(0x333333)).line_height(1.4),
    entry_title: TextStyle::new(HelveticaBold, 9.0, Color::hex(0x1a1a1a)),
    entry_dates: TextStyle::new(Helvetica, 8.0, Color::hex(0x888888)),
    entry_org: TextStyle::new(Helvetica, 9.0, Color::hex(0x666666)),
    entry_gap: 6.0,
    bullet: "- ",
    tag: TextStyle::new(Helvetica, 8.0, Color::hex(0x666666)),
    tag_chip: None,
    tag_separator: Some(" \u{b7} "),
};

pub const PROFESSIONAL: Theme = Theme {
    page: PageSize::A4,
    margin: 40.0,
    background: None,
    name: TextStyle::new(HelveticaBold, 26.0, Color::hex(0x1f2937)).line_height(1.2),
    title: TextStyle::new(Helvetica, 13.0, Color::hex(0x374151)),
    contact: TextStyle::new(Helvetica, 9.0, Color::hex(0x6b7280)),
    header_rule: Some(RuleStyle { color: Color::hex(0x1f2937), thickness: 2.0 }),
    header_gap: 16.0,
    section_title: TextStyle::new(HelveticaBold, 11.0, Color::hex(0x1f2937)),
    section_rule: Some(RuleStyle { color: Color::hex(0xd1d5db), thickness: 1.0 }),
    section_gap: 12.0,
    body: TextStyle::new(Helvetica, 9.0, Color::hex(0x374151)).line_height(1.5),
    entry_title: TextStyle::new(HelveticaBold, 10.0, Color::hex(0x1f2937)),
    entry_dates: TextStyle::new(Helvetica, 9.0, Color::hex(0x6b7280)),
    entry_org: TextStyle::new(HelveticaBold, 10.0, Color::hex(0x374151)),
    entry_gap: 8.0,
    bullet: "\u{2022} ",
    tag: TextStyle::new(Helvetica, 8.0, Color::hex(0x374151)),
    tag_chip: Some(Color::hex(0xf3f4f6)),
    tag_separator: None,
};

pub const CREATIVE: Theme = Theme {
    page: PageSize::A4,
    margin: 40.0,
    background: Some(Color::hex(0xfafafa)),
    name: TextStyle::new(HelveticaBold, 28.0, Color::hex(0x7c3aed)).line_height(1.2),
    title: TextStyle::new(Helvetica, 13.0, Color::hex(0x6b21a8)),
    contact: TextStyle::new(Helvetica, 8.0, Color::hex(0x666666)),
    header_rule: Some(RuleStyle { color: Color::hex(0x7c3aed), thickness: 4.0 }),
    header_gap: 18.0,
    section_title: TextStyle::new(HelveticaBold, 12.0, Color::hex(0x7c3aed)),
    section_rule: Some(RuleStyle { color: Color::hex(0xe9d5ff), thickness: 1.5 }),
    section_gap: 14.0,
    body: TextStyle::new(Helvetica, 9.0, Color::hex(0x374151)).line_height(1.5),
    entry_title: TextStyle::new(HelveticaBold, 10.0, Color::hex(0x1f2937)),
    entry_dates: TextStyle::new(HelveticaBold, 8.0, Color::hex(0x9333ea)),
    entry_org: TextStyle::new(HelveticaBold, 10.0, Color::hex(0x7c3aed)),
    entry_gap: 8.0,
    bullet: "\u{2022} ",
    tag: TextStyle::new(HelveticaBold, 8.0, Color::hex(0x6b21a8)),
    tag_chip: Some(Color::hex(0xede9fe)),
    tag_separator: None,
};
