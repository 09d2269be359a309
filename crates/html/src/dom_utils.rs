use crate::traverse::descendants;
use crate::types::{Document, Id, NodeKind};

/// Whitespace-separated tokens of the `class` attribute, in order.
pub fn class_list(doc: &Document, id: Id) -> Vec<&str> {
    doc.attribute(id, "class")
        .map(|c| c.split_ascii_whitespace().collect())
        .unwrap_or_default()
}

/// Concatenated text of every text node below `id`, trimmed.
pub fn text_content(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    for node in descendants(doc, id) {
        if let NodeKind::Text { text } = &doc.node(node).kind {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}

/// Last element in document order whose trimmed text content equals `text`,
/// so nested matches resolve to the innermost one.
pub fn element_with_text(doc: &Document, text: &str) -> Option<Id> {
    let mut best = None;
    for node in descendants(doc, Id::DOCUMENT) {
        if doc.is_element(node) && text_content(doc, node) == text {
            best = Some(node);
        }
    }
    best
}

fn shorten(text: &str) -> String {
    match text.char_indices().nth(40) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// Indented one-line-per-node dump, at most `cap` lines.
pub fn outline(doc: &Document, cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    // (node, depth)
    let mut stack = vec![(Id::DOCUMENT, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        if out.len() == cap {
            break;
        }
        let indent = "  ".repeat(depth);
        match &doc.node(node).kind {
            NodeKind::Document { doctype } => match doctype {
                Some(dt) => out.push(format!("{indent}<!{dt}>")),
                None => out.push(format!("{indent}#document")),
            },
            NodeKind::Element { name, .. } => {
                let mut line = format!("{indent}<{name}");
                if let Some(id) = doc.attribute(node, "id").filter(|v| !v.is_empty()) {
                    line.push_str(&format!(r#" id="{id}""#));
                }
                if let Some(class) = doc.attribute(node, "class").filter(|v| !v.is_empty()) {
                    line.push_str(&format!(r#" class="{class}""#));
                }
                line.push('>');
                out.push(line);
            }
            NodeKind::Text { text } => {
                let t = text.replace('\n', " ");
                let t = t.trim();
                if !t.is_empty() {
                    out.push(format!("{indent}\"{}\"", shorten(t)));
                }
            }
            NodeKind::Comment { text } => {
                out.push(format!("{indent}<!-- {} -->", shorten(&text.replace('\n', " "))));
            }
        }
        for &child in doc.children(node).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}
