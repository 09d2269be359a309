use std::fmt;
use std::rc::Rc;

/// Fragment tier. Lower cost means more stable and more readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKind {
    Id,
    Class,
    Attribute,
    Tag,
    NthOfType,
    NthChild,
}

impl SegmentKind {
    pub const fn cost(self) -> u32 {
        match self {
            SegmentKind::Id => 0,
            SegmentKind::Class => 1,
            SegmentKind::Attribute => 2,
            SegmentKind::Tag => 5,
            SegmentKind::NthOfType => 10,
            SegmentKind::NthChild => 50,
        }
    }
}

/// One selector fragment tied to a tree level (0 = target).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: Rc<str>,
    pub kind: SegmentKind,
    pub level: usize,
}

impl Segment {
    pub fn new(text: impl Into<Rc<str>>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
            level: 0,
        }
    }

    pub fn cost(&self) -> u32 {
        self.kind.cost()
    }
}

/// Segments ordered from the target outward.
///
/// Freshly enumerated paths are gapless (levels 0, 1, 2, ...). Minimized paths
/// may skip levels; the serializer then falls back to a descendant combinator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
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

    pub fn cost(&self) -> u32 {
        self.segments.iter().map(Segment::cost).sum()
    }

    /// Copy of this path with the segment at `index` dropped.
    pub fn without(&self, index: usize) -> Path {
        let mut segments = self.segments.clone();
        segments.remove(index);
        Path { segments }
    }

    pub fn to_selector(&self) -> String {
        serialize(&self.segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_selector())
    }
}

/// Joins segments into a selector, rightmost compound first in `segments`.
///
/// Adjacent levels use the child combinator; a gap (left by minimization) uses
/// the descendant combinator, which is a sound superset of the dropped chain.
pub fn serialize(segments: &[Segment]) -> String {
    let mut query = String::with_capacity(segments.iter().map(|s| s.text.len() + 3).sum());
    let mut outer: Option<&Segment> = None;
    for segment in segments.iter().rev() {
        if let Some(outer) = outer {
            let combinator = if segment.level + 1 == outer.level {
                " > "
            } else {
                " "
            };
            query.push_str(combinator);
        }
        query.push_str(&segment.text);
        outer = Some(segment);
    }
    query
}
