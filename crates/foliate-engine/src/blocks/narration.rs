use super::{extract_text, extract_url, normalize_key};
use crate::dom::{Element, Node};
use std::collections::BTreeMap;

const TITLE_KEYS: &[&str] = &["title", "heading", "name"];
const DESCRIPTION_KEYS: &[&str] = &["description", "summary", "text", "body"];
const AUDIO_KEYS: &[&str] = &["audio", "audio-url", "audio-src", "src", "url"];
const TRANSCRIPT_KEYS: &[&str] = &[
    "transcript",
    "transcript-url",
    "transcript-link",
    "transcript-path",
];
const NOTE_KEYS: &[&str] = &["note", "disclaimer"];

/// Decorate a narration block: key/value rows become a narration card with
/// an audio player, transcript link, and AI-voice badge.
pub fn decorate(block: &mut Element) {
    let mut fields: BTreeMap<String, Element> = BTreeMap::new();

    for row in block.take_children() {
        let Node::Element(mut row) = row else {
            continue;
        };
        let mut columns: Vec<Element> = row
            .take_children()
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(el) => Some(el),
                Node::Text(_) => None,
            })
            .collect();
        if columns.len() < 2 {
            log::debug!("narration row with fewer than two columns ignored");
            continue;
        }
        let key = normalize_key(&columns[0].text_content());
        if key.is_empty() {
            continue;
        }
        fields.insert(key, columns.swap_remove(1));
    }

    let title_text = pick_first(&fields, TITLE_KEYS)
        .map(extract_text)
        .unwrap_or_default();
    let audio_url = pick_first(&fields, AUDIO_KEYS).and_then(extract_url);
    let transcript_url = pick_first(&fields, TRANSCRIPT_KEYS).and_then(extract_url);
    let transcript_text = pick_first(&fields, TRANSCRIPT_KEYS)
        .map(extract_text)
        .unwrap_or_default();

    let mut card = Element::new("div").with_class("narration-card");

    if !title_text.is_empty() {
        let header = Element::new("div").with_class("narration-header").with_child(
            Element::new("h3")
                .with_class("narration-title")
                .with_text(&title_text),
        );
        card.append_element(header);
    }

    card.append_element(
        Element::new("div").with_class("narration-meta").with_child(
            Element::new("span")
                .with_class("narration-badge")
                .with_text("AI-generated voice"),
        ),
    );

    if let Some(description) = pick_first_owned(&mut fields, DESCRIPTION_KEYS) {
        let mut target = Element::new("div").with_class("narration-description");
        move_children(description, &mut target);
        card.append_element(target);
    }

    let mut player = Element::new("div").with_class("narration-player");
    match audio_url {
        Some(url) => {
            let mut audio = Element::new("audio")
                .with_attr("controls", "")
                .with_attr("preload", "none");
            let mut source = Element::new("source").with_attr("src", &url);
            if let Some(mime) = mime_from_url(&url) {
                source.set_attr("type", mime);
            }
            audio.append_element(source);
            audio.append_text("Your browser does not support the audio element.");
            player.append_element(audio);
        }
        None => {
            player.append_element(
                Element::new("div")
                    .with_class("narration-placeholder")
                    .with_text("Narration audio not available yet."),
            );
        }
    }

    if let Some(url) = transcript_url {
        let label = if !transcript_text.is_empty() && transcript_text != url {
            transcript_text.clone()
        } else {
            "View transcript".to_string()
        };
        let actions = Element::new("div").with_class("narration-actions").with_child(
            Element::new("a")
                .with_class("narration-transcript")
                .with_attr("href", &url)
                .with_text(&label),
        );
        player.append_element(actions);
    }
    card.append_element(player);

    if let Some(note) = pick_first_owned(&mut fields, NOTE_KEYS) {
        let mut target = Element::new("div").with_class("narration-note");
        move_children(note, &mut target);
        card.append_element(target);
    }

    block.append_element(card);
    block.set_attr("data-block-status", "loaded");
}

fn pick_first<'a>(fields: &'a BTreeMap<String, Element>, keys: &[&str]) -> Option<&'a Element> {
    keys.iter().find_map(|key| fields.get(*key))
}

fn pick_first_owned(fields: &mut BTreeMap<String, Element>, keys: &[&str]) -> Option<Element> {
    let key = keys.iter().find(|key| fields.contains_key(**key))?;
    fields.remove(*key)
}

fn move_children(mut source: Element, target: &mut Element) {
    for child in source.take_children() {
        target.append(child);
    }
}

fn mime_from_url(url: &str) -> Option<&'static str> {
    let clean = url.split(['?', '#']).next().unwrap_or(url);
    let ext = clean.rsplit('.').next()?.to_lowercase();
    match ext.as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "flac" => Some("audio/flac"),
        "aac" => Some("audio/aac"),
        "opus" => Some("audio/opus"),
        _ => None,
    }
}
