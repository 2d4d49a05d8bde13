use crate::dom::{Element, Node};

/// Index of a top-level navigation section, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionId(pub usize);

/// One-time classification of a section's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A plain link entry.
    Link,
    /// A disclosure group: the entry contains a nested list of subsections.
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub kind: SectionKind,
    pub label: String,
}

impl Section {
    pub fn has_subsections(&self) -> bool {
        self.kind == SectionKind::Group
    }
}

/// The header's top-level sections, classified once at build time.
///
/// Built from the nav-sections container; interaction code never re-tests
/// the markup shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build the registry from the nav-sections container, normalizing the
    /// section list in place first.
    ///
    /// A container with no recognizable top-level list yields an empty
    /// registry rather than an error.
    pub fn build(nav_sections: &mut Element) -> Self {
        let Some(list) = nav_sections.find_mut("ul") else {
            log::warn!("nav sections fragment has no list, navigation will be empty");
            return Self::default();
        };

        normalize_list(list);

        let sections = list
            .child_elements()
            .filter(|child| child.tag() == "li")
            .enumerate()
            .map(|(index, entry)| {
                let kind = if entry.find("ul").is_some() {
                    SectionKind::Group
                } else {
                    SectionKind::Link
                };
                Section {
                    id: SectionId(index),
                    kind,
                    label: section_label(entry, kind),
                }
            })
            .collect();

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    pub fn is_group(&self, id: SectionId) -> bool {
        self.get(id).is_some_and(Section::has_subsections)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn section_label(entry: &Element, kind: SectionKind) -> String {
    let text = match kind {
        SectionKind::Link => entry
            .find("a")
            .map(Element::text_content)
            .unwrap_or_else(|| entry.text_content()),
        // A group's label is the entry's own text, not the nested list's
        SectionKind::Group => entry
            .children()
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.clone()),
                Node::Element(el) if el.tag() != "ul" => Some(el.text_content()),
                Node::Element(_) => None,
            })
            .collect::<String>(),
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Best-effort normalization of an authored section list: every link ends
/// up in its own `li`, and no link is ever dropped. Authored wrappers such
/// as `p.button-container` are looked through, not just direct children.
fn normalize_list(list: &mut Element) {
    let children = list.take_children();
    let mut rebuilt = Vec::with_capacity(children.len());

    for node in children {
        match node {
            // A bare link gets its own list item
            Node::Element(el) if el.tag() == "a" => {
                rebuilt.push(Node::Element(Element::new("li").with_child(el)));
            }
            Node::Element(mut li) if li.tag() == "li" => {
                let extra_links = split_extra_links(&mut li);
                rebuilt.push(Node::Element(li));
                for link in extra_links {
                    rebuilt.push(Node::Element(Element::new("li").with_child(link)));
                }
            }
            // A wrapper (e.g. a paragraph) directly under the list: every
            // link it holds becomes its own entry
            Node::Element(mut el) => {
                let mut links = Vec::new();
                let mut first_kept = true;
                detach_links(&mut el, &mut first_kept, &mut links);
                if links.is_empty() {
                    rebuilt.push(Node::Element(el));
                } else {
                    for link in links {
                        rebuilt.push(Node::Element(Element::new("li").with_child(link)));
                    }
                }
            }
            other => rebuilt.push(other),
        }
    }

    *list.children_mut() = rebuilt;
}

/// Remove every link after the first from a list item, at any wrapper depth,
/// returning the removed links so each can become its own entry. Links
/// inside a nested list belong to subsections and are left alone.
fn split_extra_links(li: &mut Element) -> Vec<Element> {
    let mut extra = Vec::new();
    let mut first_kept = false;
    detach_links(li, &mut first_kept, &mut extra);
    extra
}

/// Depth-first walk detaching links into `out`, skipping nested lists.
/// The first link encountered stays in place unless `first_kept` starts true.
fn detach_links(el: &mut Element, first_kept: &mut bool, out: &mut Vec<Element>) {
    let children = el.take_children();
    let mut kept = Vec::with_capacity(children.len());

    for node in children {
        match node {
            Node::Element(link) if link.tag() == "a" => {
                if *first_kept {
                    out.push(link);
                } else {
                    *first_kept = true;
                    kept.push(Node::Element(link));
                }
            }
            Node::Element(mut child) => {
                if child.tag() != "ul" {
                    detach_links(&mut child, first_kept, out);
                }
                kept.push(Node::Element(child));
            }
            other => kept.push(other),
        }
    }

    *el.children_mut() = kept;
}
