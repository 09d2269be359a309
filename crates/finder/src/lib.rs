//! Unique selector synthesis.
//!
//! Given an element in a live tree, [`find`] returns the cheapest selector that
//! matches exactly that element, preferring ids, word-like classes and
//! attributes over tag names and positional fragments.
//!
//! Pipeline:
//! 1. [`enumerate`] climbs the ancestors and yields cost-sorted batches of paths.
//! 2. The first path the [`UniquenessOracle`] reports as unique is taken.
//! 3. [`minimize`] drops internal segments while the selector still resolves to
//!    the same element.
//! 4. If the time or candidate budget runs out first, [`fallback_path`] builds a
//!    full `:nth-of-type` chain instead.
//!
//! The crate never touches a concrete DOM; hosts implement [`TreeNode`],
//! [`Escape`] and [`UniquenessOracle`].

mod candidates;
mod config;
mod error;
mod fallback;
mod finder;
mod optimize;
mod path;
mod search;
mod tree;
mod word;

#[cfg(test)]
mod test_tree;

pub use crate::candidates::{CandidateSet, candidates_for};
pub use crate::config::{
    ACCEPTED_ATTRIBUTE_NAMES, AttributePredicate, Budget, Config, DATA_ATTRIBUTE_PREFIX,
    DEFAULT_MINIMIZE_FLOOR, DEFAULT_SEED_DEPTH, DEFAULT_TIME_BUDGET, MAX_ATTRIBUTE_VALUE_LEN,
    NamePredicate, default_attribute, default_class_name, default_id_name, default_tag_name,
};
pub use crate::error::{FindError, NotFoundCause};
pub use crate::fallback::fallback_path;
pub use crate::finder::{Finder, find};
pub use crate::optimize::{Minimizer, minimize};
pub use crate::path::{Path, Segment, SegmentKind, serialize};
pub use crate::search::{PathEnumerator, enumerate};
pub use crate::tree::{Escape, OracleError, TreeNode, UniquenessOracle};
pub use crate::word::is_word_like;
