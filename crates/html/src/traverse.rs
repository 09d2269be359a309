use crate::types::{Document, Id};

/// Ancestors of a node, nearest first, ending at the document node.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<Id>,
}

impl Iterator for Ancestors<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

pub fn ancestors(doc: &Document, id: Id) -> Ancestors<'_> {
    Ancestors {
        doc,
        next: doc.parent(id),
    }
}

/// Pre-order (document order) walk of the subtree below `root`, excluding `root`.
///
/// Uses an explicit stack so deep trees cannot overflow the call stack.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<Id>,
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}

pub fn descendants(doc: &Document, root: Id) -> Descendants<'_> {
    Descendants {
        doc,
        stack: doc.children(root).iter().rev().copied().collect(),
    }
}

/// Element descendants of `root` in document order.
pub fn element_descendants(doc: &Document, root: Id) -> impl Iterator<Item = Id> + '_ {
    descendants(doc, root).filter(|&id| doc.is_element(id))
}

pub fn is_descendant_of(doc: &Document, id: Id, ancestor: Id) -> bool {
    ancestors(doc, id).any(|a| a == ancestor)
}

/// First element in document order satisfying `predicate`.
pub fn find_element(doc: &Document, mut predicate: impl FnMut(Id) -> bool) -> Option<Id> {
    element_descendants(doc, Id::DOCUMENT).find(|&id| predicate(id))
}

/// First element whose `id` attribute equals `value`.
pub fn element_by_id(doc: &Document, value: &str) -> Option<Id> {
    find_element(doc, |id| doc.attribute(id, "id") == Some(value))
}
