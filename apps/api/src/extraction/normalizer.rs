//! Cleanup of raw PDF-extracted text.
//!
//! PDF text layers come out with glyph-level artifacts: spaced-out URLs and
//! emails, accented letters detached from their word, whitespace on the wrong
//! side of punctuation, and words from adjacent columns glued together.
//! [`normalize`] repairs those in a fixed order of passes and finally breaks
//! the text into one sentence per line.
//!
//! `normalize` is idempotent: `normalize(&normalize(s)) == normalize(s)`.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Start/end sentinels for masked URL and email spans. Private-use code points
/// never collide with punctuation handled by the segmenter.
const MASK_OPEN: char = '\u{E000}';
const MASK_CLOSE: char = '\u{E001}';

struct Patterns {
    protocol: Regex,
    www: Regex,
    email_at: Regex,
    split_before_accent: Regex,
    split_after_accent: Regex,
    space_before_punct: Regex,
    space_after_punct: Regex,
    glued_words: Regex,
    spaced_hyphen: Regex,
    horizontal_space: Regex,
    line_edges: Regex,
    blank_lines: Regex,
    protected_span: Regex,
    sentence_end: Regex,
    mask: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        protocol: Regex::new(r"(?i)\b(https?)\s*:\s*/\s*(?:/\s*)?")
            .expect("Failed to compile protocol regex"),
        www: Regex::new(r"(?i)\b(www)\s*\.\s*").expect("Failed to compile www regex"),
        email_at: Regex::new(r"(\w)\s*@\s*(\w)").expect("Failed to compile email regex"),
        split_before_accent: Regex::new(r"([a-zA-Z])[^\S\n]+([áéíóúÁÉÍÓÚñÑ])")
            .expect("Failed to compile accent regex"),
        split_after_accent: Regex::new(r"([áéíóúÁÉÍÓÚñÑ])[^\S\n]+([a-zA-Z])")
            .expect("Failed to compile accent regex"),
        space_before_punct: Regex::new(r"(\p{L})\s+([.,;:!?])")
            .expect("Failed to compile punctuation regex"),
        space_after_punct: Regex::new(r"([.,;:!?])\s+(\p{L})")
            .expect("Failed to compile punctuation regex"),
        glued_words: Regex::new(r"([a-z])([A-Z])").expect("Failed to compile camel regex"),
        spaced_hyphen: Regex::new(r"[^\S\n]*-[^\S\n]*").expect("Failed to compile hyphen regex"),
        horizontal_space: Regex::new(r"[^\S\n]+").expect("Failed to compile space regex"),
        line_edges: Regex::new(r" ?\n ?").expect("Failed to compile line edge regex"),
        blank_lines: Regex::new(r"\n(?:\s*\n)+").expect("Failed to compile blank line regex"),
        protected_span: Regex::new(r"(?i)(?:https?://|www\.)\S+|[\w.-]+@[\w.-]+\.[a-z]{2,}")
            .expect("Failed to compile url/email regex"),
        sentence_end: Regex::new(r"([.?!])\s*").expect("Failed to compile sentence regex"),
        mask: Regex::new("\u{E000}(\\d+)\u{E001}").expect("Failed to compile mask regex"),
    })
}

/// Runs the full cleanup pipeline over raw extracted text.
///
/// Empty or whitespace-only input yields an empty string.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let p = patterns();

    // Stray sentinels in the input would be mistaken for masks.
    let text: String = raw
        .chars()
        .filter(|&c| c != MASK_OPEN && c != MASK_CLOSE)
        .collect();

    // 1. spaced-out protocol and www prefixes
    let text = repair_url_prefixes(p, &text);
    // 2. spaces around '@'
    let text = p.email_at.replace_all(&text, "${1}@${2}");
    // 3. accented letters detached from their word
    let text = p.split_before_accent.replace_all(&text, "${1}${2}");
    let text = p.split_after_accent.replace_all(&text, "${1}${2}");
    // 4. whitespace around punctuation
    let text = p.space_before_punct.replace_all(&text, "${1}${2}");
    let text = p.space_after_punct.replace_all(&text, "${1}${2}");
    // 5. words merged across columns
    let text = p.glued_words.replace_all(&text, "${1} ${2}");
    // 6. pass 5 can split a protocol prefix again
    let text = repair_url_prefixes(p, &text);
    // 7. hyphens and horizontal whitespace. Line breaks are left for pass 8, so
    // page and paragraph boundaries come out as a single '\n', not a space.
    let text = p.spaced_hyphen.replace_all(&text, "-");
    let text = p.horizontal_space.replace_all(&text, " ");
    let text = p.line_edges.replace_all(&text, "\n");
    // 8. blank-line gaps
    let text = p.blank_lines.replace_all(&text, "\n");
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    // 9. one sentence per line, URLs and emails untouched
    segment_sentences(p, text)
}

fn repair_url_prefixes(p: &Patterns, text: &str) -> String {
    let text = p.protocol.replace_all(text, "${1}://");
    p.www.replace_all(&text, "${1}.").into_owned()
}

fn segment_sentences(p: &Patterns, text: &str) -> String {
    let mut protected: Vec<String> = Vec::new();
    let masked = p.protected_span.replace_all(text, |caps: &Captures| {
        protected.push(caps[0].to_string());
        format!("{MASK_OPEN}{}{MASK_CLOSE}", protected.len() - 1)
    });

    let segmented = p.sentence_end.replace_all(&masked, "${1}\n");

    p.mask
        .replace_all(&segmented, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| protected.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}
