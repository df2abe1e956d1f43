//! Item list rendering
//!
//! HTML blocks for the listing surface plus a plain-text variant for the
//! terminal. Every field value is escaped before it is emitted.

use crate::domain::Item;

pub const EMPTY_LIST_HTML: &str = "<p>No items found.</p>";
pub const LOAD_ERROR_HTML: &str = "<p>Error loading items.</p>";
pub const EMPTY_LIST_TEXT: &str = "No items found.";

const FIELD_LABELS: [&str; 7] = [
    "Category",
    "Name",
    "Expiry Date",
    "Cycle",
    "Price",
    "Notes",
    "Reminder",
];

fn field_values(item: &Item) -> [&str; 7] {
    [
        &item.category,
        &item.item,
        &item.date,
        &item.cycle,
        &item.price,
        &item.notes,
        &item.reminder,
    ]
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `<div>` per item, or the empty-list placeholder
pub fn render_item_list(items: &[Item]) -> String {
    if items.is_empty() {
        return EMPTY_LIST_HTML.to_string();
    }

    let mut html = String::new();
    for item in items {
        html.push_str(
            "<div style=\"margin-bottom:16px; border-bottom:1px solid #ddd; padding-bottom:8px;\">\n",
        );
        for (label, value) in FIELD_LABELS.iter().zip(field_values(item)) {
            html.push_str(&format!("<strong>{}:</strong> {}<br>\n", label, escape_html(value)));
        }
        html.push_str("</div>");
    }
    html
}

pub fn render_item_text(items: &[Item]) -> String {
    if items.is_empty() {
        return EMPTY_LIST_TEXT.to_string();
    }

    items
        .iter()
        .map(|item| {
            let mut block = format!("[{}]\n", item.id);
            for (label, value) in FIELD_LABELS.iter().zip(field_values(item)) {
                block.push_str(&format!("  {:<12} {}\n", format!("{}:", label), value));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_empty_list_placeholder() {
        assert_eq!(render_item_list(&[]), EMPTY_LIST_HTML);
        assert_eq!(render_item_text(&[]), EMPTY_LIST_TEXT);
    }

    #[test]
    fn test_render_escapes_every_field() {
        let mut item = Item::new("Dairy", "<script>", "2024-01-10", "2024-01-08");
        item.notes = "a & b".to_string();

        let html = render_item_list(&[item]);
        assert!(html.contains("<strong>Name:</strong> &lt;script&gt;<br>"));
        assert!(html.contains("<strong>Notes:</strong> a &amp; b<br>"));
        assert!(html.contains("<strong>Expiry Date:</strong> 2024-01-10<br>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_one_block_per_item() {
        let items = vec![
            Item::new("A", "one", "d", "r"),
            Item::new("B", "two", "d", "r"),
        ];
        assert_eq!(render_item_list(&items).matches("<div").count(), 2);

        let text = render_item_text(&items);
        assert!(text.contains("Name:        one"));
        assert!(text.contains("Category:    B"));
    }
}
