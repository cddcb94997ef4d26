//! Flows a [`Document`] tree onto fixed-size pages.
//!
//! Blocks are first broken into rows (one wrapped line, a chip row, a rule or
//! a gap), rows are grouped into units that must not be split across a page
//! break, and units are then stacked top to bottom. A section heading and the
//! first row of its body always form one unit.

use serde::Serialize;

use crate::errors::PipelineError;
use crate::layout::document::{Block, Color, Document, FontFace, PageSize, TextBlock, TextStyle};
use crate::layout::font_metrics::get_metrics;

/// Inner padding of section bands and tag chips.
const CHIP_PAD_X: f32 = 6.0;
const CHIP_PAD_Y: f32 = 3.0;
const CHIP_GAP: f32 = 6.0;
const BAND_PAD_X: f32 = 8.0;
/// Minimum horizontal gap between the two runs of a split row.
const SPLIT_GAP: f32 = 12.0;
/// Baseline position inside a line box, as a fraction of the font size.
const ASCENT: f32 = 0.78;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A positioned drawing instruction in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Mark {
    Text { x: f32, y: f32, face: FontFace, size: f32, color: Color, text: String },
    Rect { x: f32, y: f32, width: f32, height: f32, color: Color },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub marks: Vec<Mark>,
}

impl PageLayout {
    /// Text runs on the page, top to bottom.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text { text, .. } => Some(text.as_str()),
            Mark::Rect { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub page: PageSize,
    pub pages: Vec<PageLayout>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rows
// ────────────────────────────────────────────────────────────────────────────

/// Mark positioned relative to the top-left corner of its row.
#[derive(Debug, Clone)]
enum RowMark {
    Text { dx: f32, baseline: f32, style: TextStyle, text: String },
    Rect { dx: f32, dy: f32, width: f32, height: f32, color: Color },
}

#[derive(Debug, Clone)]
struct Row {
    height: f32,
    marks: Vec<RowMark>,
    /// Pure vertical space; dropped at the top of a page.
    gap: bool,
}

impl Row {
    fn gap(height: f32) -> Option<Row> {
        (height > 0.0).then(|| Row { height, marks: Vec::new(), gap: true })
    }
}

struct RowBuilder {
    width: f32,
}

impl RowBuilder {
    fn block(&self, block: &Block) -> Vec<Row> {
        match block {
            Block::Text(t) => self.text(t),
            Block::Split { left, right } => self.split(left, right),
            Block::Tags { items, style, chip, separator, space_after } => {
                let mut rows = match separator {
                    Some(sep) => {
                        let joined = items
                            .iter()
                            .map(|i| i.trim())
                            .filter(|i| !i.is_empty())
                            .collect::<Vec<_>>()
                            .join(sep);
                        self.lines(&joined, style, 0.0)
                    }
                    None => self.chips(items, style, *chip),
                };
                rows.extend(Row::gap(*space_after));
                rows
            }
            Block::Rule { color, thickness, space_after } => {
                let mut rows = vec![Row {
                    height: *thickness,
                    marks: vec![RowMark::Rect {
                        dx: 0.0,
                        dy: 0.0,
                        width: self.width,
                        height: *thickness,
                        color: *color,
                    }],
                    gap: false,
                }];
                rows.extend(Row::gap(*space_after));
                rows
            }
            Block::Spacer(h) => Row::gap(*h).into_iter().collect(),
        }
    }

    fn text(&self, block: &TextBlock) -> Vec<Row> {
        let mut rows = self.lines(&block.text, &block.style, block.indent);
        if !rows.is_empty() {
            rows.extend(Row::gap(block.space_after));
        }
        rows
    }

    /// One row per wrapped line. Banded styles get a filled strip behind each line.
    fn lines(&self, text: &str, style: &TextStyle, indent: f32) -> Vec<Row> {
        let pad = if style.band.is_some() { BAND_PAD_X } else { 0.0 };
        let available = (self.width - indent - 2.0 * pad).max(style.size);
        let leading = style.leading();
        let baseline = (leading - style.size) / 2.0 + style.size * ASCENT;

        get_metrics(style.face)
            .wrap(text, available / style.size)
            .into_iter()
            .map(|line| {
                let mut marks = Vec::with_capacity(2);
                if let Some(band) = style.band {
                    marks.push(RowMark::Rect {
                        dx: indent,
                        dy: 0.0,
                        width: self.width - indent,
                        height: leading,
                        color: band,
                    });
                }
                marks.push(RowMark::Text { dx: indent + pad, baseline, style: *style, text: line });
                Row { height: leading, marks, gap: false }
            })
            .collect()
    }

    fn split(&self, left: &TextBlock, right: &TextBlock) -> Vec<Row> {
        let right_text = right.text.trim();
        let right_width = get_metrics(right.style.face).measure_str(right_text) * right.style.size;

        let narrowed = RowBuilder { width: (self.width - right_width - SPLIT_GAP).max(self.width / 2.0) };
        let mut rows = narrowed.lines(&left.text, &left.style, left.indent);

        if !right_text.is_empty() {
            let leading = right.style.leading();
            let mark = RowMark::Text {
                dx: (self.width - right_width).max(0.0),
                baseline: (leading - right.style.size) / 2.0 + right.style.size * ASCENT,
                style: right.style,
                text: right_text.to_string(),
            };
            match rows.first_mut() {
                Some(first) => {
                    if leading > first.height {
                        first.height = leading;
                    }
                    first.marks.push(mark);
                }
                None => rows.push(Row { height: leading, marks: vec![mark], gap: false }),
            }
        }

        if !rows.is_empty() {
            rows.extend(Row::gap(left.space_after.max(right.space_after)));
        }
        rows
    }

    /// Lays items out left to right as chips, wrapping onto new rows.
    fn chips(&self, items: &[String], style: &TextStyle, fill: Option<Color>) -> Vec<Row> {
        let metrics = get_metrics(style.face);
        let chip_height = style.leading() + 2.0 * CHIP_PAD_Y;
        let baseline = CHIP_PAD_Y + (style.leading() - style.size) / 2.0 + style.size * ASCENT;

        let mut rows = Vec::new();
        let mut marks: Vec<RowMark> = Vec::new();
        let mut x = 0.0_f32;

        for item in items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
            let chip_width = metrics.measure_str(item) * style.size + 2.0 * CHIP_PAD_X;
            if x > 0.0 && x + chip_width > self.width {
                rows.push(Row { height: chip_height, marks: std::mem::take(&mut marks), gap: false });
                rows.extend(Row::gap(CHIP_GAP / 2.0));
                x = 0.0;
            }
            if let Some(color) = fill {
                marks.push(RowMark::Rect { dx: x, dy: 0.0, width: chip_width, height: chip_height, color });
            }
            marks.push(RowMark::Text { dx: x + CHIP_PAD_X, baseline, style: *style, text: item.to_string() });
            x += chip_width + CHIP_GAP;
        }

        if !marks.is_empty() {
            rows.push(Row { height: chip_height, marks, gap: false });
        }
        rows
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Checks every dimension in the tree before any layout work happens.
fn validate(doc: &Document) -> Result<(), PipelineError> {
    let bad = |what: &str| Err(PipelineError::RenderFailed(format!("invalid {what}")));

    let PageSize { width, height } = doc.page;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return bad("page size");
    }
    if !doc.margin.is_finite() || doc.margin < 0.0 || 2.0 * doc.margin >= width.min(height) {
        return bad("page margin");
    }

    let style_ok = |s: &TextStyle| {
        s.size.is_finite() && s.size > 0.0 && s.line_height.is_finite() && s.line_height > 0.0
    };
    let len_ok = |v: f32| v.is_finite() && v >= 0.0;
    let text_ok = |t: &TextBlock| style_ok(&t.style) && len_ok(t.indent) && len_ok(t.space_after);

    let blocks = doc
        .header
        .iter()
        .chain(doc.sections.iter().flat_map(|s| s.heading.iter().chain(s.body.iter())));
    for block in blocks {
        let ok = match block {
            Block::Text(t) => text_ok(t),
            Block::Split { left, right } => text_ok(left) && text_ok(right),
            Block::Tags { style, space_after, .. } => style_ok(style) && len_ok(*space_after),
            Block::Rule { thickness, space_after, .. } => len_ok(*thickness) && len_ok(*space_after),
            Block::Spacer(h) => len_ok(*h),
        };
        if !ok {
            return bad("block dimensions");
        }
    }
    Ok(())
}

/// Lays the document out on as many pages as it needs. Always yields at least one page.
pub fn layout(doc: &Document) -> Result<Layout, PipelineError> {
    validate(doc)?;

    let content_width = doc.page.width - 2.0 * doc.margin;
    let builder = RowBuilder { width: content_width };

    let mut units: Vec<Vec<Row>> = Vec::new();
    for block in &doc.header {
        units.extend(builder.block(block).into_iter().map(|r| vec![r]));
    }
    for section in &doc.sections {
        let mut lead: Vec<Row> = section.heading.iter().flat_map(|b| builder.block(b)).collect();
        let mut body = section.body.iter().flat_map(|b| builder.block(b));
        // Carry gaps and the first real row along with the heading.
        for row in body.by_ref() {
            let is_gap = row.gap;
            lead.push(row);
            if !is_gap {
                break;
            }
        }
        units.push(lead);
        units.extend(body.map(|r| vec![r]));
    }

    Ok(paginate(doc, units))
}

fn paginate(doc: &Document, units: Vec<Vec<Row>>) -> Layout {
    let PageSize { width, height } = doc.page;
    let top = doc.margin;
    let bottom = height - doc.margin;

    let new_page = || {
        let mut page = PageLayout::default();
        if let Some(color) = doc.background {
            page.marks.push(Mark::Rect { x: 0.0, y: 0.0, width, height, color });
        }
        page
    };

    let mut pages = vec![new_page()];
    let mut cursor = top;

    for unit in units {
        let unit_height: f32 = unit.iter().map(|r| r.height).sum();
        if cursor > top && cursor + unit_height > bottom {
            pages.push(new_page());
            cursor = top;
        }

        for row in unit {
            if row.gap && cursor <= top {
                continue;
            }
            // Rows inside an oversized unit still break between lines.
            if !row.gap && cursor > top && cursor + row.height > bottom {
                pages.push(new_page());
                cursor = top;
            }
            let Some(page) = pages.last_mut() else { break };
            for mark in row.marks {
                page.marks.push(match mark {
                    RowMark::Text { dx, baseline, style, text } => Mark::Text {
                        x: doc.margin + dx,
                        y: height - (cursor + baseline),
                        face: style.face,
                        size: style.size,
                        color: style.color,
                        text,
                    },
                    RowMark::Rect { dx, dy, width, height: h, color } => Mark::Rect {
                        x: doc.margin + dx,
                        y: height - (cursor + dy + h),
                        width,
                        height: h,
                        color,
                    },
                });
            }
            cursor += row.height;
        }
    }

    tracing::debug!(pages = pages.len(), "document laid out");
    Layout { page: doc.page, pages }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
