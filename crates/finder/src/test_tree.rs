//! In-memory tree and a brute-force matcher for the fragments this crate emits.
//!
//! The matcher understands single-fragment compounds (`#id`, `.class`,
//! `[name="value"]`, `tag`, `tag:nth-of-type(n)`, `tag:nth-child(n)`) joined by
//! ` > ` or a plain space. Tests use the identity [`escape`], so no unescaping
//! is needed.

use crate::tree::{OracleError, TreeNode, UniquenessOracle};
use std::cell::Cell;

pub fn escape(ident: &str) -> String {
    ident.to_string()
}

#[derive(Debug, Default)]
struct TestNodeData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Index 0 is the document node; everything else is an element.
#[derive(Debug)]
pub struct TestTree {
    nodes: Vec<TestNodeData>,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![TestNodeData {
                tag: "#document".to_string(),
                ..TestNodeData::default()
            }],
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn element(&mut self, parent: usize, tag: &str) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TestNodeData {
            tag: tag.to_string(),
            parent: Some(parent),
            ..TestNodeData::default()
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// Element with no parent at all.
    pub fn detached(&mut self, tag: &str) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TestNodeData {
            tag: tag.to_string(),
            ..TestNodeData::default()
        });
        index
    }

    pub fn set_id(&mut self, node: usize, id: &str) {
        self.nodes[node].id = Some(id.to_string());
        self.nodes[node]
            .attributes
            .push(("id".to_string(), id.to_string()));
    }

    pub fn add_class(&mut self, node: usize, class: &str) {
        self.nodes[node].classes.push(class.to_string());
    }

    pub fn set_attr(&mut self, node: usize, name: &str, value: &str) {
        self.nodes[node]
            .attributes
            .push((name.to_string(), value.to_string()));
    }

    pub fn node(&self, index: usize) -> TestNode<'_> {
        TestNode { tree: self, index }
    }

    fn elements(&self) -> impl Iterator<Item = usize> + '_ {
        (1..self.nodes.len()).filter(|&i| self.is_attached(i))
    }

    fn is_attached(&self, mut index: usize) -> bool {
        while let Some(parent) = self.nodes[index].parent {
            index = parent;
        }
        index == 0
    }

    fn is_descendant_of(&self, index: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[index].parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.nodes[p].parent;
        }
        false
    }

    fn position(&self, index: usize, same_tag: bool) -> Option<usize> {
        let parent = self.nodes[index].parent?;
        let tag = &self.nodes[index].tag;
        let mut n = 0;
        for &sibling in &self.nodes[parent].children {
            if !same_tag || &self.nodes[sibling].tag == tag {
                n += 1;
            }
            if sibling == index {
                return Some(n);
            }
        }
        None
    }

    fn matches_fragment(&self, index: usize, fragment: &str) -> bool {
        let node = &self.nodes[index];
        if let Some(id) = fragment.strip_prefix('#') {
            return node.id.as_deref() == Some(id);
        }
        if let Some(class) = fragment.strip_prefix('.') {
            return node.classes.iter().any(|c| c == class);
        }
        if let Some(inner) = fragment.strip_prefix('[').and_then(|f| f.strip_suffix(']')) {
            let Some((name, value)) = inner.split_once('=') else {
                return false;
            };
            let value = value.trim_matches('"');
            return node
                .attributes
                .iter()
                .any(|(n, v)| n == name && v == value);
        }
        if let Some((tag, rest)) = fragment.split_once(':') {
            if node.tag != tag {
                return false;
            }
            let (same_tag, arg) = if let Some(arg) = rest.strip_prefix("nth-of-type(") {
                (true, arg)
            } else if let Some(arg) = rest.strip_prefix("nth-child(") {
                (false, arg)
            } else {
                return false;
            };
            let wanted = arg.trim_end_matches(')').parse::<usize>().ok();
            return wanted.is_some() && self.position(index, same_tag) == wanted;
        }
        node.tag == fragment
    }

    /// `parts` is rightmost-first: `(fragment, child_combinator_to_the_left)`.
    fn matches_from(&self, index: usize, parts: &[(&str, bool)]) -> bool {
        let Some(((fragment, child), rest)) = parts.split_first() else {
            return true;
        };
        if !self.matches_fragment(index, fragment) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }
        let mut ancestor = self.nodes[index].parent.filter(|&p| p != 0);
        while let Some(a) = ancestor {
            if self.matches_from(a, rest) {
                return true;
            }
            if *child {
                return false;
            }
            ancestor = self.nodes[a].parent.filter(|&p| p != 0);
        }
        false
    }

    pub fn select(&self, selector: &str, scope: Option<usize>) -> Vec<usize> {
        let mut parts: Vec<(&str, bool)> = Vec::new();
        let mut child = false;
        for token in selector.split(' ') {
            if token == ">" {
                child = true;
                continue;
            }
            parts.push((token, child));
            child = false;
        }
        parts.reverse();
        self.elements()
            .filter(|&i| scope.is_none_or(|s| self.is_descendant_of(i, s)))
            .filter(|&i| self.matches_from(i, &parts))
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TestNode<'a> {
    tree: &'a TestTree,
    pub index: usize,
}

impl PartialEq for TestNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<'a> TreeNode for TestNode<'a> {
    fn is_element(&self) -> bool {
        self.index != 0
    }

    fn is_root_element(&self) -> bool {
        self.tree.nodes[self.index].parent == Some(0)
            && self.tree.nodes[self.index].tag == "html"
    }

    fn tag_name(&self) -> &str {
        &self.tree.nodes[self.index].tag
    }

    fn id(&self) -> Option<&str> {
        self.tree.nodes[self.index].id.as_deref()
    }

    fn class_names(&self) -> Vec<&str> {
        self.tree.nodes[self.index]
            .classes
            .iter()
            .map(String::as_str)
            .collect()
    }

    fn attributes(&self) -> Vec<(&str, &str)> {
        self.tree.nodes[self.index]
            .attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.tree.nodes[self.index].parent?;
        (parent != 0).then_some(TestNode {
            tree: self.tree,
            index: parent,
        })
    }

    fn child_index(&self) -> Option<usize> {
        self.tree.position(self.index, false)
    }

    fn type_index(&self) -> Option<usize> {
        self.tree.position(self.index, true)
    }
}

/// Oracle over [`TestTree`] that records how many times it was consulted.
pub struct TestOracle<'a> {
    tree: &'a TestTree,
    pub counts: Cell<usize>,
}

impl<'a> TestOracle<'a> {
    pub fn new(tree: &'a TestTree) -> Self {
        Self {
            tree,
            counts: Cell::new(0),
        }
    }
}

impl<'a> UniquenessOracle<TestNode<'a>> for TestOracle<'a> {
    fn count_matches(
        &self,
        selector: &str,
        scope: Option<&TestNode<'a>>,
    ) -> Result<usize, OracleError> {
        self.counts.set(self.counts.get() + 1);
        Ok(self.tree.select(selector, scope.map(|s| s.index)).len())
    }

    fn resolve(
        &self,
        selector: &str,
        scope: Option<&TestNode<'a>>,
    ) -> Result<Option<TestNode<'a>>, OracleError> {
        Ok(self
            .tree
            .select(selector, scope.map(|s| s.index))
            .first()
            .map(|&index| self.tree.node(index)))
    }
}
