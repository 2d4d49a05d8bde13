use super::normalize_text;
use crate::dom::{Element, Node};
use regex::Regex;
use std::sync::OnceLock;

/// Descriptions shorter than this are treated as title residue and dropped.
const MIN_DESCRIPTION_LEN: usize = 10;

struct HeroLink {
    href: String,
    text: String,
    strong: bool,
}

/// Decorate a hero block: row 0 becomes the title (split into title and
/// subtitle at the first "When"), row 1 the description, and all authored
/// links become call-to-action buttons.
pub fn decorate(block: &mut Element) {
    let mut links = Vec::new();
    collect_links(block, block.tag(), &mut links);

    let rows: Vec<Element> = block
        .take_children()
        .into_iter()
        .filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
        .collect();

    let mut content = Element::new("div").with_class("hero-content");
    let mut title_patterns = Vec::new();

    if let Some(first) = rows.first() {
        let text = first
            .find("h1")
            .map(|h1| h1.text_content())
            .unwrap_or_else(|| first.text_content());
        let text = normalize_text(&text);
        if !text.is_empty() {
            let (main, subtitle) = split_title(&text);
            content.append_element(build_title(&main, subtitle.as_deref()));
            title_patterns.push(main);
            title_patterns.extend(subtitle);
        }
    }

    if let Some(second) = rows.get(1)
        && let Some(description) = extract_description(second, &title_patterns)
    {
        content.append_element(
            Element::new("p")
                .with_class("hero-description")
                .with_text(&description),
        );
    }

    if !links.is_empty() {
        let mut buttons = Element::new("div").with_class("hero-buttons");
        for (index, link) in links.iter().enumerate() {
            let class = if link.strong || index == 0 {
                "button primary"
            } else {
                "button secondary"
            };
            let anchor = Element::new("a")
                .with_attr("href", &link.href)
                .with_attr("title", &link.text)
                .with_attr("class", class)
                .with_text(&link.text);
            buttons.append_element(Element::new("p").with_child(anchor));
        }
        content.append_element(buttons);
    }

    let wrapper = Element::new("div")
        .with_class("hero-wrapper")
        .with_child(content);
    block.append_element(wrapper);
}

fn collect_links(el: &Element, parent_tag: &str, out: &mut Vec<HeroLink>) {
    for child in el.child_elements() {
        if child.tag() == "a" {
            if let Some(href) = child.attr("href") {
                out.push(HeroLink {
                    href: href.to_string(),
                    text: normalize_text(&child.text_content()),
                    strong: parent_tag == "strong",
                });
            }
        }
        collect_links(child, child.tag(), out);
    }
}

fn when_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bwhen\b").expect("valid regex"))
}

/// Split title text into a main title and an optional subtitle starting at
/// the first "When".
fn split_title(text: &str) -> (String, Option<String>) {
    match when_marker().find(text) {
        Some(m) if m.start() > 0 => (
            text[..m.start()].trim().to_string(),
            Some(text[m.start()..].trim().to_string()),
        ),
        _ => (text.to_string(), None),
    }
}

fn build_title(main: &str, subtitle: Option<&str>) -> Element {
    let mut wrapper = Element::new("div").with_class("hero-title-wrapper");
    wrapper.append_element(Element::new("h1").with_class("hero-title").with_text(main));

    if let Some(subtitle) = subtitle {
        let mut heading = Element::new("h2").with_class("hero-subtitle");
        let words: Vec<&str> = subtitle.split(' ').collect();
        if words.len() >= 4 {
            // Long subtitles break after the second word
            heading.append_text(&words[..2].join(" "));
            heading.append_element(Element::new("br"));
            heading.append_text(&words[2..].join(" "));
        } else {
            heading.append_text(subtitle);
        }
        wrapper.append_element(heading);
    }

    wrapper
}

/// Row text minus links and minus whatever already went into the title.
fn extract_description(row: &Element, title_patterns: &[String]) -> Option<String> {
    let mut stripped = row.clone();
    strip_links(&mut stripped);

    let mut text = normalize_text(&stripped.text_content());
    for pattern in title_patterns {
        let matcher = Regex::new(&format!("(?i){}", regex::escape(pattern))).expect("valid regex");
        text = matcher.replace_all(&text, "").trim().to_string();
    }

    let text = normalize_text(&text);
    (text.len() > MIN_DESCRIPTION_LEN).then_some(text)
}

fn strip_links(el: &mut Element) {
    el.children_mut()
        .retain(|node| !matches!(node, Node::Element(child) if child.tag() == "a"));
    for child in el.child_elements_mut() {
        strip_links(child);
    }
}
