use crate::dom::{Element, Node};

/// Decorate a cards block: each authored row becomes one `li` in a `ul`,
/// with image columns and body columns classified separately.
pub fn decorate(block: &mut Element) {
    let rows = block.take_children();
    let mut list = Element::new("ul");

    for row in rows {
        let Node::Element(mut row) = row else {
            continue;
        };
        let mut item = Element::new("li");

        for column in row.take_children() {
            let Node::Element(mut column) = column else {
                continue;
            };
            if column.find("picture").is_some() || column.find("img").is_some() {
                column.set_attr("class", "cards-card-image");
            } else {
                column.set_attr("class", "cards-card-body");
            }
            item.append_element(column);
        }

        list.append_element(item);
    }

    block.append_element(list);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_row(with_image: bool) -> Element {
        let mut row = Element::new("div");
        let mut icon = Element::new("div");
        if with_image {
            icon.append_element(Element::new("img").with_attr("src", "/icon.png"));
        } else {
            icon.append_text("no icon here");
        }
        row.append_element(icon);
        row.append_element(
            Element::new("div")
                .with_child(Element::new("h3").with_text("Title"))
                .with_child(Element::new("p").with_text("Description")),
        );
        row
    }

    #[test]
    fn test_rows_become_list_items() {
        let mut block = Element::new("div")
            .with_child(card_row(true))
            .with_child(card_row(true));

        decorate(&mut block);

        let list = block.child_elements().next().unwrap();
        assert_eq!(list.tag(), "ul");
        assert_eq!(list.child_elements().count(), 2);
        assert!(list.child_elements().all(|li| li.tag() == "li"));
    }

    #[test]
    fn test_columns_classified_as_image_or_body() {
        let mut block = Element::new("div").with_child(card_row(true));

        decorate(&mut block);

        let list = block.child_elements().next().unwrap();
        let item = list.child_elements().next().unwrap();
        let classes: Vec<_> = item
            .child_elements()
            .map(|col| col.attr("class").unwrap_or_default().to_string())
            .collect();
        assert_eq!(classes, vec!["cards-card-image", "cards-card-body"]);
    }

    #[test]
    fn test_row_without_image_is_all_body() {
        let mut block = Element::new("div").with_child(card_row(false));

        decorate(&mut block);

        let list = block.child_elements().next().unwrap();
        let item = list.child_elements().next().unwrap();
        assert!(item.child_elements().all(|col| col.has_class("cards-card-body")));
    }

    #[test]
    fn test_picture_counts_as_image_column() {
        let row = Element::new("div").with_child(
            Element::new("div")
                .with_child(Element::new("picture").with_child(Element::new("img"))),
        );
        let mut block = Element::new("div").with_child(row);

        decorate(&mut block);

        let image_col = block.find_where(&|el| el.has_class("cards-card-image"));
        assert!(image_col.is_some());
    }
}
