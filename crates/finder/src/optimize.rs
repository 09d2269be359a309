//! Identity-preserving minimization.
//!
//! A reduction drops one internal segment (never the target or the outermost
//! segment). It is accepted only when the shorter selector is still unique
//! *and* resolves to the original target: a unique selector can point at a
//! different node once an ancestor constraint is gone.
//!
//! Accepted reductions are reduced further depth-first before the next index
//! is tried, using an explicit stack bounded by the path length.

use crate::config::{Budget, Config};
use crate::error::FindError;
use crate::path::Path;
use crate::tree::{TreeNode, UniquenessOracle};

struct Frame {
    path: Path,
    next_index: usize,
}

pub struct Minimizer<'a, N, O: ?Sized> {
    target: &'a N,
    config: &'a Config<N>,
    oracle: &'a O,
    budget: Budget,
    stack: Vec<Frame>,
}

pub fn minimize<'a, N, O>(
    path: Path,
    target: &'a N,
    config: &'a Config<N>,
    oracle: &'a O,
    budget: Budget,
) -> Minimizer<'a, N, O>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
{
    Minimizer {
        target,
        config,
        oracle,
        budget,
        stack: vec![Frame {
            path,
            next_index: 1,
        }],
    }
}

impl<'a, N, O> Minimizer<'a, N, O>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
{
    fn reducible(&self, path: &Path) -> bool {
        path.len() > 2 && path.len() > self.config.minimize_floor
    }

    fn resolves_to_target(&self, candidate: &Path) -> Result<bool, FindError> {
        let selector = candidate.to_selector();
        let scope = self.config.scope_root.as_ref();
        match self.oracle.count_matches(&selector, scope)? {
            0 => Err(FindError::OracleInconsistency { selector }),
            1 => Ok(self.oracle.resolve(&selector, scope)?.as_ref() == Some(self.target)),
            _ => Ok(false),
        }
    }
}

impl<'a, N, O> Iterator for Minimizer<'a, N, O>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
{
    type Item = Result<Path, FindError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last()?;
            if !self.reducible(&frame.path) || frame.next_index >= frame.path.len() - 1 {
                self.stack.pop();
                continue;
            }
            if self.budget.exceeded() {
                log::debug!(target: "finder.optimize", "budget exceeded, stopping reductions");
                self.stack.clear();
                return None;
            }

            let frame = self.stack.last_mut()?;
            let index = frame.next_index;
            frame.next_index += 1;
            let candidate = frame.path.without(index);

            match self.resolves_to_target(&candidate) {
                Ok(true) => {
                    log::trace!(
                        target: "finder.optimize",
                        "reduced to `{candidate}` (cost {})",
                        candidate.cost()
                    );
                    self.stack.push(Frame {
                        path: candidate.clone(),
                        next_index: 1,
                    });
                    return Some(Ok(candidate));
                }
                Ok(false) => {}
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Segment, SegmentKind};
    use crate::test_tree::{TestNode, TestOracle, TestTree};
    use std::time::Duration;

    fn seg(text: &str, kind: SegmentKind, level: usize) -> Segment {
        Segment {
            text: text.into(),
            kind,
            level,
        }
    }

    /// html > body > div#main > ul > li.row > a
    fn list_tree() -> (TestTree, usize) {
        let mut tree = TestTree::new();
        let html = tree.element(tree.root(), "html");
        let body = tree.element(html, "body");
        let main = tree.element(body, "div");
        tree.set_id(main, "main");
        let ul = tree.element(main, "ul");
        let li = tree.element(ul, "li");
        tree.add_class(li, "row");
        let a = tree.element(li, "a");
        (tree, a)
    }

    #[test]
    fn drops_internal_segments_that_are_not_needed() {
        let (tree, a) = list_tree();
        let oracle = TestOracle::new(&tree);
        let config = Config::default();
        let target = tree.node(a);
        let path = Path::new(vec![
            seg("a", SegmentKind::Tag, 0),
            seg(".row", SegmentKind::Class, 1),
            seg("ul", SegmentKind::Tag, 2),
            seg("#main", SegmentKind::Id, 3),
        ]);
        let budget = Budget::start(Duration::from_secs(5));
        let reductions: Vec<String> = minimize(path, &target, &config, &oracle, budget)
            .map(|r| r.map(|p| p.to_selector()))
            .collect::<Result<_, _>>()
            .expect("no oracle errors");
        // `#main a` is reachable from two different parents and shows up twice.
        assert_eq!(
            reductions,
            vec!["#main > ul a", "#main a", "#main .row > a", "#main a"]
        );
    }

    #[test]
    fn short_paths_are_left_alone() {
        let (tree, a) = list_tree();
        let oracle = TestOracle::new(&tree);
        let config = Config::default();
        let target = tree.node(a);
        let path = Path::new(vec![
            seg("a", SegmentKind::Tag, 0),
            seg(".row", SegmentKind::Class, 1),
        ]);
        let budget = Budget::start(Duration::from_secs(5));
        assert_eq!(minimize(path, &target, &config, &oracle, budget).count(), 0);
        assert_eq!(oracle.counts.get(), 0);
    }

    #[test]
    fn rejects_reductions_that_match_several_nodes() {
        // html > body > (span, section > div.card > span)
        let mut tree = TestTree::new();
        let html = tree.element(tree.root(), "html");
        let body = tree.element(html, "body");
        tree.element(body, "span");
        let section = tree.element(body, "section");
        let card = tree.element(section, "div");
        tree.add_class(card, "card");
        let span = tree.element(card, "span");

        let oracle = TestOracle::new(&tree);
        let config = Config::default();
        let target = tree.node(span);
        let path = Path::new(vec![
            seg("span", SegmentKind::Tag, 0),
            seg("div", SegmentKind::Tag, 1),
            seg("section", SegmentKind::Tag, 2),
            seg("body", SegmentKind::Tag, 3),
        ]);
        let budget = Budget::start(Duration::from_secs(5));
        let reductions: Vec<String> = minimize(path, &target, &config, &oracle, budget)
            .map(|r| r.map(|p| p.to_selector()))
            .collect::<Result<_, _>>()
            .expect("no oracle errors");
        // `body span` matches both spans and is never accepted.
        assert_eq!(reductions, vec!["body > section span", "body div > span"]);
        for selector in &reductions {
            assert_eq!(tree.select(selector, None), vec![span], "{selector}");
        }
    }

    /// Reports uniqueness faithfully but resolves every selector to `decoy`.
    struct MisdirectingOracle<'a> {
        inner: TestOracle<'a>,
        decoy: TestNode<'a>,
    }

    impl<'a> UniquenessOracle<TestNode<'a>> for MisdirectingOracle<'a> {
        fn count_matches(
            &self,
            selector: &str,
            scope: Option<&TestNode<'a>>,
        ) -> Result<usize, crate::tree::OracleError> {
            self.inner.count_matches(selector, scope)
        }

        fn resolve(
            &self,
            _selector: &str,
            _scope: Option<&TestNode<'a>>,
        ) -> Result<Option<TestNode<'a>>, crate::tree::OracleError> {
            Ok(Some(self.decoy))
        }
    }

    #[test]
    fn unique_reductions_must_resolve_to_the_target() {
        let (tree, a) = list_tree();
        let oracle = MisdirectingOracle {
            inner: TestOracle::new(&tree),
            decoy: tree.node(1),
        };
        let config = Config::default();
        let target = tree.node(a);
        let path = Path::new(vec![
            seg("a", SegmentKind::Tag, 0),
            seg(".row", SegmentKind::Class, 1),
            seg("ul", SegmentKind::Tag, 2),
            seg("#main", SegmentKind::Id, 3),
        ]);
        let budget = Budget::start(Duration::from_secs(5));
        assert_eq!(minimize(path, &target, &config, &oracle, budget).count(), 0);
    }

    /// Unique for the full path only; every reduction matches nothing.
    struct VanishingOracle<'a> {
        full: String,
        target: TestNode<'a>,
    }

    impl<'a> UniquenessOracle<TestNode<'a>> for VanishingOracle<'a> {
        fn count_matches(
            &self,
            selector: &str,
            _scope: Option<&TestNode<'a>>,
        ) -> Result<usize, crate::tree::OracleError> {
            Ok(usize::from(selector == self.full))
        }

        fn resolve(
            &self,
            selector: &str,
            _scope: Option<&TestNode<'a>>,
        ) -> Result<Option<TestNode<'a>>, crate::tree::OracleError> {
            Ok((selector == self.full).then_some(self.target))
        }
    }

    #[test]
    fn reduction_matching_nothing_is_an_oracle_inconsistency() {
        let (tree, a) = list_tree();
        let config = Config::default();
        let target = tree.node(a);
        let path = Path::new(vec![
            seg("a", SegmentKind::Tag, 0),
            seg(".row", SegmentKind::Class, 1),
            seg("ul", SegmentKind::Tag, 2),
            seg("#main", SegmentKind::Id, 3),
        ]);
        let oracle = VanishingOracle {
            full: path.to_selector(),
            target,
        };
        let budget = Budget::start(Duration::from_secs(5));
        let mut reductions = minimize(path, &target, &config, &oracle, budget);
        assert_eq!(
            reductions.next(),
            Some(Err(FindError::OracleInconsistency {
                selector: "#main > ul a".to_string()
            }))
        );
        assert_eq!(reductions.next(), None);
    }

    #[test]
    fn stops_when_budget_is_spent() {
        let (tree, a) = list_tree();
        let oracle = TestOracle::new(&tree);
        let config = Config::default();
        let target = tree.node(a);
        let path = Path::new(vec![
            seg("a", SegmentKind::Tag, 0),
            seg(".row", SegmentKind::Class, 1),
            seg("ul", SegmentKind::Tag, 2),
            seg("#main", SegmentKind::Id, 3),
        ]);
        let budget = Budget::start(Duration::ZERO);
        assert_eq!(minimize(path, &target, &config, &oracle, budget).count(), 0);
    }
}
