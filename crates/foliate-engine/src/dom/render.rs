use super::{Element, Node};
use std::fmt::Write;

/// Elements that never carry children and are serialized without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize an element subtree to HTML.
///
/// Text and attribute values are escaped; attributes are emitted in map
/// order so output is deterministic for a given tree.
pub fn to_html(el: &Element) -> String {
    let mut out = String::new();
    write_element(el, &mut out);
    out
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag());
    for (name, value) in el.attrs() {
        let _ = write!(
            out,
            " {}=\"{}\"",
            name,
            html_escape::encode_double_quoted_attribute(value)
        );
    }
    out.push('>');

    if VOID_TAGS.contains(&el.tag()) {
        return;
    }

    for child in el.children() {
        match child {
            Node::Element(child) => write_element(child, out),
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        }
    }

    let _ = write!(out, "</{}>", el.tag());
}
