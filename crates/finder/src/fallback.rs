use crate::candidates::nth_of_type;
use crate::path::{Path, Segment, SegmentKind};
use crate::tree::{Escape, TreeNode};

/// Full-depth `tag:nth-of-type(n)` chain from `target` up to (excluding) `scope_root`.
///
/// Ignores the cost model and every predicate. Returns `None` when a level has
/// no derivable ordinal, which only happens for detached nodes.
pub fn fallback_path<N, E>(target: &N, scope_root: Option<&N>, escape: &E) -> Option<Path>
where
    N: TreeNode,
    E: Escape + ?Sized,
{
    let mut segments = Vec::new();
    let mut current = Some(target.clone());
    let mut level = 0;
    while let Some(node) = current.filter(|node| scope_root != Some(node)) {
        let index = node.type_index()?;
        let mut segment = Segment::new(
            nth_of_type(&escape.escape(node.tag_name()), index, node.is_root_element()),
            SegmentKind::NthOfType,
        );
        segment.level = level;
        segments.push(segment);
        current = node.parent();
        level += 1;
    }
    Some(Path::new(segments))
}
