use crate::syntax::{AttributeOp, Combinator, ComplexSelector, Compound, SelectorList, SimpleSelector};
use html::dom_utils::class_list;
use html::{Document, Id};

fn matches_simple(doc: &Document, id: Id, simple: &SimpleSelector) -> bool {
    match simple {
        SimpleSelector::Id(value) => doc.attribute(id, "id") == Some(value.as_str()),
        SimpleSelector::Class(value) => class_list(doc, id).contains(&value.as_str()),
        SimpleSelector::Attribute { name, matcher } => {
            let Some(actual) = doc.attribute(id, name) else {
                return false;
            };
            let Some((op, expected)) = matcher else {
                return true;
            };
            let expected = expected.as_str();
            match op {
                AttributeOp::Equals => actual == expected,
                AttributeOp::Includes => actual.split_ascii_whitespace().any(|t| t == expected),
                AttributeOp::DashMatch => {
                    actual == expected
                        || actual
                            .strip_prefix(expected)
                            .is_some_and(|rest| rest.starts_with('-'))
                }
                AttributeOp::Prefix => !expected.is_empty() && actual.starts_with(expected),
                AttributeOp::Suffix => !expected.is_empty() && actual.ends_with(expected),
                AttributeOp::Substring => !expected.is_empty() && actual.contains(expected),
            }
        }
        SimpleSelector::NthChild(n) => doc.child_index(id) == Some(*n),
        SimpleSelector::NthOfType(n) => doc.type_index(id) == Some(*n),
    }
}

fn matches_compound(doc: &Document, id: Id, compound: &Compound) -> bool {
    let Some(name) = doc.element_name(id) else {
        return false;
    };
    if compound.tag.as_deref().is_some_and(|tag| tag != name) {
        return false;
    }
    compound.simple.iter().all(|s| matches_simple(doc, id, s))
}

fn previous_element_sibling(doc: &Document, id: Id) -> Option<Id> {
    let parent = doc.parent(id)?;
    let mut previous = None;
    for sibling in doc.element_children(parent) {
        if sibling == id {
            return previous;
        }
        previous = Some(sibling);
    }
    None
}

/// Matches `selector.compounds[..=index]` with `id` as the subject of
/// `compounds[index]`, walking right to left.
fn matches_from(doc: &Document, id: Id, selector: &ComplexSelector, index: usize) -> bool {
    if !matches_compound(doc, id, &selector.compounds[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }
    let next = index - 1;
    match selector.combinators[next] {
        Combinator::Child => doc
            .parent_element(id)
            .is_some_and(|p| matches_from(doc, p, selector, next)),
        Combinator::Descendant => {
            let mut ancestor = doc.parent_element(id);
            while let Some(a) = ancestor {
                if matches_from(doc, a, selector, next) {
                    return true;
                }
                ancestor = doc.parent_element(a);
            }
            false
        }
        Combinator::NextSibling => previous_element_sibling(doc, id)
            .is_some_and(|s| matches_from(doc, s, selector, next)),
        Combinator::SubsequentSibling => {
            let mut sibling = previous_element_sibling(doc, id);
            while let Some(s) = sibling {
                if matches_from(doc, s, selector, next) {
                    return true;
                }
                sibling = previous_element_sibling(doc, s);
            }
            false
        }
    }
}

/// Whether the element `id` is the subject of `selector`.
///
/// Ancestors are looked up in the whole document, never clipped to a scope.
pub fn matches(doc: &Document, id: Id, selector: &ComplexSelector) -> bool {
    !selector.compounds.is_empty()
        && doc.is_element(id)
        && matches_from(doc, id, selector, selector.compounds.len() - 1)
}

pub fn matches_any(doc: &Document, id: Id, list: &SelectorList) -> bool {
    list.0.iter().any(|selector| matches(doc, id, selector))
}
