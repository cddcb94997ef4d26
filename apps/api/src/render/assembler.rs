//! Serializes a laid-out [`Document`] into PDF bytes with `lopdf`.
//!
//! Only the standard Type1 fonts are referenced (no embedding), text is
//! encoded as WinAnsi, and content streams are left uncompressed.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, StringFormat};
use tracing::debug;

use crate::errors::PipelineError;
use crate::layout::{self, Color, Document, FontFace, Layout, Mark};

const PRODUCER: &str = concat!("resume-forge ", env!("CARGO_PKG_VERSION"));

/// Turns document trees into PDF byte buffers. Holds no per-render state.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    producer: String,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self { producer: PRODUCER.to_string() }
    }
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays `doc` out and serializes it. Any failure is `RenderFailed`.
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>, PipelineError> {
        let laid_out = layout::layout(doc)?;
        let bytes = self.write_pdf(&doc.title, &laid_out)?;
        debug!(pages = laid_out.pages.len(), bytes = bytes.len(), "document assembled");
        Ok(bytes)
    }

    fn write_pdf(&self, title: &str, laid_out: &Layout) -> Result<Vec<u8>, PipelineError> {
        let mut pdf = lopdf::Document::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            let font_id = pdf.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(laid_out.page.width),
            Object::Real(laid_out.page.height),
        ];

        let mut kids: Vec<Object> = Vec::with_capacity(laid_out.pages.len());
        for page in &laid_out.pages {
            let content = Content { operations: page_operations(&page.marks) };
            let encoded = content
                .encode()
                .map_err(|e| PipelineError::RenderFailed(format!("content stream: {e}")))?;
            let content_id = pdf.add_object(lopdf::Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => media_box.clone(),
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
            }),
        );
        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = pdf.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => text_string(&self.producer),
        });
        pdf.trailer.set("Root", catalog_id);
        pdf.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes)
            .map_err(|e| PipelineError::RenderFailed(format!("writer: {e}")))?;
        Ok(bytes)
    }
}

fn page_operations(marks: &[Mark]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for mark in marks {
        match mark {
            Mark::Rect { x, y, width, height, color } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![
                        Object::Real(*x),
                        Object::Real(*y),
                        Object::Real(*width),
                        Object::Real(*height),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Mark::Text { x, y, face, size, color, text } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(face.resource_name().as_bytes().to_vec()), Object::Real(*size)],
                ));
                ops.push(fill_color(*color));
                ops.push(Operation::new("Td", vec![Object::Real(*x), Object::Real(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }
    ops
}

fn fill_color(color: Color) -> Operation {
    let [r, g, b] = color.unit();
    Operation::new("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)])
}

/// Encodes text for a WinAnsiEncoding font. Characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{0152}' => 0x8c,
            '\u{0153}' => 0x9c,
            '\u{0160}' => 0x8a,
            '\u{0161}' => 0x9a,
            '\u{017d}' => 0x8e,
            '\u{017e}' => 0x9e,
            '\u{0178}' => 0x9f,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

/// PDF text string for the Info dictionary: literal when ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xfe, 0xff];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Block, PageSize, Section, SectionKind, TextStyle};

    fn doc_with(lines: usize) -> Document {
        let style = TextStyle::new(FontFace::Helvetica, 10.0, Color::BLACK);
        Document {
            title: "Jane Doe - Engineer".into(),
            page: PageSize::A4,
            margin: 40.0,
            background: Some(Color::hex(0xfafafa)),
            header: vec![Block::text("Jane Doe", style)],
            sections: vec![Section {
                kind: SectionKind::Experience,
                title: "EXPERIENCE".into(),
                heading: vec![Block::text("EXPERIENCE", style)],
                body: (0..lines).map(|i| Block::text(format!("Item {i}"), style)).collect(),
            }],
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_render_produces_pdf_with_visible_headings() {
        let bytes = DocumentAssembler::new().render(&doc_with(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"(EXPERIENCE)"));
        assert!(contains(&bytes, b"WinAnsiEncoding"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
    }

    #[test]
    fn test_rendered_pdf_reloads_with_expected_page_count() {
        let bytes = DocumentAssembler::new().render(&doc_with(150)).unwrap();
        let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(reloaded.get_pages().len() >= 2);

        let text = reloaded.extract_text(&[1]).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("EXPERIENCE"));
    }

    #[test]
    fn test_empty_document_is_single_blank_page() {
        let doc = Document {
            title: String::new(),
            page: PageSize::A4,
            margin: 40.0,
            background: None,
            header: vec![],
            sections: vec![],
        };
        let bytes = DocumentAssembler::new().render(&doc).unwrap();
        let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 1);
    }

    #[test]
    fn test_invalid_geometry_is_render_failed() {
        let mut doc = doc_with(1);
        doc.page.width = f32::INFINITY;
        let err = DocumentAssembler::new().render(&doc).unwrap_err();
        assert!(matches!(err, PipelineError::RenderFailed(_)));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Educación"), b"Educaci\xf3n".to_vec());
        assert_eq!(encode_win_ansi("a \u{2022} b"), b"a \x95 b".to_vec());
        assert_eq!(encode_win_ansi("\u{6f22}"), b"?".to_vec());
    }

    #[test]
    fn test_info_title_uses_utf16_for_non_ascii() {
        assert!(matches!(text_string("Plain"), Object::String(_, StringFormat::Literal)));
        match text_string("José") {
            Object::String(bytes, StringFormat::Hexadecimal) => assert_eq!(&bytes[..2], &[0xfe, 0xff]),
            other => panic!("unexpected {other:?}"),
        }
    }
}
