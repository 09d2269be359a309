//! Lazy, batched enumeration of candidate paths.
//!
//! The enumerator climbs from the target towards the scope root one level at a
//! time. Each new level is pushed onto a stack and the cross product of all
//! stacked levels is appended to an accumulator. Once `seed_depth` levels are
//! stacked, every new level flushes the accumulator as one cost-sorted batch.
//!
//! Invariants:
//! - Paths within a batch are in ascending total cost; ties keep cross-product
//!   order (the target level's candidate varies slowest).
//! - Every path is gapless: segment `i` has level `i`.
//! - At most one depth's cross product is buffered at a time.

use crate::candidates::{CandidateSet, candidates_for};
use crate::config::Config;
use crate::path::Path;
use crate::tree::{Escape, TreeNode};

pub struct PathEnumerator<'a, N, E: ?Sized> {
    config: &'a Config<N>,
    escape: &'a E,
    current: Option<N>,
    depth: usize,
    stack: Vec<CandidateSet>,
    pending: Vec<Path>,
    ready: std::vec::IntoIter<Path>,
    exhausted: bool,
}

pub fn enumerate<'a, N, E>(
    target: &N,
    config: &'a Config<N>,
    escape: &'a E,
) -> PathEnumerator<'a, N, E>
where
    N: TreeNode,
    E: Escape + ?Sized,
{
    PathEnumerator {
        config,
        escape,
        current: Some(target.clone()),
        depth: 0,
        stack: Vec::new(),
        pending: Vec::new(),
        ready: Vec::new().into_iter(),
        exhausted: false,
    }
}

impl<'a, N, E> PathEnumerator<'a, N, E>
where
    N: TreeNode,
    E: Escape + ?Sized,
{
    /// Climbs one level, flushing a batch when the seed depth is reached.
    fn advance(&mut self) {
        let node = self
            .current
            .take()
            .filter(|node| self.config.scope_root.as_ref() != Some(node));
        let Some(node) = node else {
            self.flush();
            self.exhausted = true;
            return;
        };

        let mut level = candidates_for(&node, self.config, self.escape);
        level.set_level(self.depth);
        log::trace!(
            target: "finder.search",
            "level {}: {} candidates",
            self.depth,
            level.len()
        );
        self.stack.push(level);
        self.current = node.parent();
        self.depth += 1;

        self.pending.extend(combinations(&self.stack));
        if self.depth >= self.config.seed_depth {
            self.flush();
        }
    }

    fn flush(&mut self) {
        let mut batch = std::mem::take(&mut self.pending);
        batch.sort_by_key(Path::cost);
        if !batch.is_empty() {
            log::debug!(
                target: "finder.search",
                "batch at depth {}: {} paths",
                self.depth,
                batch.len()
            );
        }
        self.ready = batch.into_iter();
    }
}

impl<'a, N, E> Iterator for PathEnumerator<'a, N, E>
where
    N: TreeNode,
    E: Escape + ?Sized,
{
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            if let Some(path) = self.ready.next() {
                return Some(path);
            }
            if self.exhausted {
                return None;
            }
            self.advance();
        }
    }
}

/// Every way to pick one segment per level, target level first.
fn combinations(stack: &[CandidateSet]) -> Vec<Path> {
    let mut paths = vec![Vec::with_capacity(stack.len())];
    for level in stack {
        let mut next = Vec::with_capacity(paths.len() * level.len());
        for prefix in &paths {
            for segment in level.segments() {
                let mut path = prefix.clone();
                path.push(segment.clone());
                next.push(path);
            }
        }
        paths = next;
    }
    paths.into_iter().map(Path::new).collect()
}
