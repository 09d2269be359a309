use crate::config::Config;
use crate::path::{Segment, SegmentKind};
use crate::tree::{Escape, TreeNode};

/// Deduplicated fragments for one tree level, cheapest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateSet {
    segments: Vec<Segment>,
}

impl CandidateSet {
    /// Adds `segment` unless a fragment with the same text is already present.
    pub fn push(&mut self, segment: Segment) {
        if self.segments.iter().any(|s| s.text == segment.text) {
            return;
        }
        self.segments.push(segment);
    }

    pub fn set_level(&mut self, level: usize) {
        for segment in &mut self.segments {
            segment.level = level;
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

pub fn candidates_for<N, E>(node: &N, config: &Config<N>, escape: &E) -> CandidateSet
where
    N: TreeNode,
    E: Escape + ?Sized,
{
    let mut set = CandidateSet::default();

    if let Some(id) = node.id() {
        if (config.id_name)(id) {
            set.push(Segment::new(
                format!("#{}", escape.escape(id)),
                SegmentKind::Id,
            ));
        }
    }

    for class in node.class_names() {
        if (config.class_name)(class) {
            set.push(Segment::new(
                format!(".{}", escape.escape(class)),
                SegmentKind::Class,
            ));
        }
    }

    for (name, value) in node.attributes() {
        if (config.attribute)(name, value) {
            set.push(Segment::new(
                format!(r#"[{}="{}"]"#, escape.escape(name), escape.escape(value)),
                SegmentKind::Attribute,
            ));
        }
    }

    let tag = node.tag_name();
    let escaped_tag = escape.escape(tag);
    let root = node.is_root_element();
    if (config.tag_name)(tag) {
        set.push(Segment::new(escaped_tag.as_str(), SegmentKind::Tag));
        if let Some(index) = node.type_index() {
            set.push(Segment::new(
                nth_of_type(&escaped_tag, index, root),
                SegmentKind::NthOfType,
            ));
        }
    }
    if let Some(index) = node.child_index() {
        set.push(Segment::new(
            nth_child(&escaped_tag, index, root),
            SegmentKind::NthChild,
        ));
    }

    set
}

/// `tag` is already escaped. The root element is unique in its document, so it
/// never needs an ordinal.
pub(crate) fn nth_of_type(tag: &str, index: usize, root: bool) -> String {
    if root {
        return tag.to_string();
    }
    format!("{tag}:nth-of-type({index})")
}

pub(crate) fn nth_child(tag: &str, index: usize, root: bool) -> String {
    if root {
        return tag.to_string();
    }
    format!("{tag}:nth-child({index})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tree::{TestTree, escape};

    fn texts(set: &CandidateSet) -> Vec<(String, u32)> {
        set.segments()
            .iter()
            .map(|s| (s.text.to_string(), s.cost()))
            .collect()
    }

    #[test]
    fn emits_fragments_in_cost_tier_order() {
        let mut tree = TestTree::new();
        let body = tree.element(tree.root(), "body");
        tree.element(body, "p");
        let button = tree.element(body, "button");
        tree.set_id(button, "search-button");
        tree.add_class(button, "primary");
        tree.add_class(button, "css-xk7j2");
        tree.set_attr(button, "role", "button");
        tree.set_attr(button, "type", "submit");

        let set = candidates_for(&tree.node(button), &Config::default(), &escape);
        assert_eq!(
            texts(&set),
            vec![
                ("#search-button".to_string(), 0),
                (".primary".to_string(), 1),
                (r#"[role="button"]"#.to_string(), 2),
                ("button".to_string(), 5),
                ("button:nth-of-type(1)".to_string(), 10),
                ("button:nth-child(2)".to_string(), 50),
            ]
        );
    }

    #[test]
    fn hashed_identifiers_are_skipped() {
        let mut tree = TestTree::new();
        let body = tree.element(tree.root(), "body");
        let div = tree.element(body, "div");
        tree.set_id(div, "ember1234");
        tree.add_class(div, "sc-bdVaJa");

        let set = candidates_for(&tree.node(div), &Config::default(), &escape);
        assert_eq!(
            texts(&set),
            vec![
                ("div".to_string(), 5),
                ("div:nth-of-type(1)".to_string(), 10),
                ("div:nth-child(1)".to_string(), 50),
            ]
        );
    }

    #[test]
    fn root_element_collapses_to_its_tag() {
        let mut tree = TestTree::new();
        let html = tree.element(tree.root(), "html");
        let set = candidates_for(&tree.node(html), &Config::default(), &escape);
        assert_eq!(texts(&set), vec![("html".to_string(), 5)]);
    }

    #[test]
    fn tag_predicate_gates_tag_and_type_ordinal() {
        let mut tree = TestTree::new();
        let body = tree.element(tree.root(), "body");
        let span = tree.element(body, "span");
        let config = Config::default().with_tag_name(|tag| tag != "span");
        let set = candidates_for(&tree.node(span), &config, &escape);
        assert_eq!(texts(&set), vec![("span:nth-child(1)".to_string(), 50)]);
    }

    #[test]
    fn duplicate_fragments_keep_the_cheapest() {
        let mut set = CandidateSet::default();
        set.push(Segment::new("div", SegmentKind::Tag));
        set.push(Segment::new("div", SegmentKind::NthOfType));
        assert_eq!(set.len(), 1);
        assert_eq!(set.segments()[0].kind, SegmentKind::Tag);
    }

    #[test]
    fn fragments_are_escaped() {
        let mut tree = TestTree::new();
        let body = tree.element(tree.root(), "body");
        let div = tree.element(body, "div");
        tree.add_class(div, "wide");
        let set = candidates_for(&tree.node(div), &Config::default(), &|s: &str| {
            format!("<{s}>")
        });
        assert_eq!(set.segments()[0].text.as_ref(), ".<wide>");
    }

    #[test]
    fn tag_fragments_are_escaped() {
        let mut tree = TestTree::new();
        let body = tree.element(tree.root(), "body");
        let rect = tree.element(body, "svg:rect");

        let colon = |ident: &str| ident.replace(':', "\\:");
        let set = candidates_for(&tree.node(rect), &Config::default(), &colon);
        assert_eq!(
            texts(&set),
            vec![
                ("svg\\:rect".to_string(), 5),
                ("svg\\:rect:nth-of-type(1)".to_string(), 10),
                ("svg\\:rect:nth-child(1)".to_string(), 50),
            ]
        );
    }
}
