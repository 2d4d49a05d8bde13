pub mod cards;
pub mod hero;
pub mod narration;

use crate::dom::Element;
use regex::Regex;
use std::sync::OnceLock;

/// The block types the decoration pipeline recognizes.
///
/// `Header` carries persistent state and is decorated through
/// [`crate::header::decorate_header`]; the rest are one-shot transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Cards,
    Hero,
    Narration,
    Header,
}

impl BlockKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cards" => Some(BlockKind::Cards),
            "hero" => Some(BlockKind::Hero),
            "narration" => Some(BlockKind::Narration),
            "header" => Some(BlockKind::Header),
            _ => None,
        }
    }
}

/// Apply the one-shot decorator for `kind` to `block` in place.
///
/// `Header` is skipped here: it needs a fragment source and an event host.
pub fn decorate(kind: BlockKind, block: &mut Element) {
    match kind {
        BlockKind::Cards => cards::decorate(block),
        BlockKind::Hero => hero::decorate(block),
        BlockKind::Narration => narration::decorate(block),
        BlockKind::Header => {}
    }
}

fn key_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^a-z0-9]+").expect("valid regex"))
}

/// Normalize an authored field key: lowercase, non-alphanumerics collapsed
/// to single dashes, no leading/trailing dash.
pub(crate) fn normalize_key(value: &str) -> String {
    let lowered = value.to_lowercase();
    let dashed = key_separator().replace_all(lowered.trim(), "-");
    dashed.trim_matches('-').to_string()
}

/// Collapse all whitespace runs to single spaces and trim.
pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn extract_text(el: &Element) -> String {
    normalize_text(&el.text_content())
}

/// Pull a URL out of an authored value cell: a link's href, an audio
/// element's source, or bare URL text.
pub(crate) fn extract_url(el: &Element) -> Option<String> {
    if let Some(link) = el.find("a")
        && let Some(href) = link.attr("href")
    {
        return Some(href.to_string());
    }

    if let Some(audio) = el.find("audio") {
        if let Some(src) = audio.attr("src") {
            return Some(src.to_string());
        }
        if let Some(source) = audio.find("source")
            && let Some(src) = source.attr("src")
        {
            return Some(src.to_string());
        }
    }

    let text = el.text_content().trim().to_string();
    if text.starts_with("http://") || text.starts_with("https://") || text.starts_with('/') {
        return Some(text);
    }
    None
}
