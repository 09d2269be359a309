use crate::word::is_word_like;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type NamePredicate = Arc<dyn Fn(&str) -> bool>;
pub type AttributePredicate = Arc<dyn Fn(&str, &str) -> bool>;

/// Attribute names worth using regardless of their shape.
pub const ACCEPTED_ATTRIBUTE_NAMES: &[&str] = &["role", "name", "aria-label", "rel", "href"];
/// Custom data attributes are accepted when their name is word-like.
pub const DATA_ATTRIBUTE_PREFIX: &str = "data-";
/// Values at or above this length are treated as content, not identifiers.
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 100;

pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(1000);
pub const DEFAULT_SEED_DEPTH: usize = 3;
pub const DEFAULT_MINIMIZE_FLOOR: usize = 2;

pub fn default_id_name(id: &str) -> bool {
    is_word_like(id)
}

pub fn default_class_name(class: &str) -> bool {
    is_word_like(class)
}

pub fn default_tag_name(_tag: &str) -> bool {
    true
}

/// Allow-listed or `data-*` names with word-like values (or `#fragment` links).
pub fn default_attribute(name: &str, value: &str) -> bool {
    let name_ok = ACCEPTED_ATTRIBUTE_NAMES.contains(&name)
        || (name.starts_with(DATA_ATTRIBUTE_PREFIX) && is_word_like(name));
    let value_ok = (is_word_like(value) && value.len() < MAX_ATTRIBUTE_VALUE_LEN)
        || value
            .strip_prefix('#')
            .is_some_and(|fragment| is_word_like(fragment));
    name_ok && value_ok
}

/// Search configuration.
///
/// Override selectively with struct update syntax:
/// `Config { seed_depth: 2, ..Config::default() }`.
#[derive(Clone)]
pub struct Config<N> {
    /// Ancestor walk stops before this node; `None` searches the whole tree.
    pub scope_root: Option<N>,
    pub id_name: NamePredicate,
    pub class_name: NamePredicate,
    /// Gates both the tag and the `:nth-of-type` fragments.
    pub tag_name: NamePredicate,
    pub attribute: AttributePredicate,
    /// Wall-clock ceiling shared by search and minimization.
    pub time_budget: Duration,
    /// Levels accumulated before the first batch is emitted.
    pub seed_depth: usize,
    /// Paths at or below this length are not minimized.
    pub minimize_floor: usize,
    /// `None` is unbounded.
    pub max_candidates_checked: Option<usize>,
}

impl<N> Default for Config<N> {
    fn default() -> Self {
        Self {
            scope_root: None,
            id_name: Arc::new(default_id_name),
            class_name: Arc::new(default_class_name),
            tag_name: Arc::new(default_tag_name),
            attribute: Arc::new(default_attribute),
            time_budget: DEFAULT_TIME_BUDGET,
            seed_depth: DEFAULT_SEED_DEPTH,
            minimize_floor: DEFAULT_MINIMIZE_FLOOR,
            max_candidates_checked: None,
        }
    }
}

impl<N> Config<N> {
    pub fn with_scope_root(mut self, root: N) -> Self {
        self.scope_root = Some(root);
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_seed_depth(mut self, depth: usize) -> Self {
        self.seed_depth = depth;
        self
    }

    pub fn with_minimize_floor(mut self, floor: usize) -> Self {
        self.minimize_floor = floor;
        self
    }

    pub fn with_max_candidates_checked(mut self, max: usize) -> Self {
        self.max_candidates_checked = Some(max);
        self
    }

    pub fn with_id_name(mut self, predicate: impl Fn(&str) -> bool + 'static) -> Self {
        self.id_name = Arc::new(predicate);
        self
    }

    pub fn with_class_name(mut self, predicate: impl Fn(&str) -> bool + 'static) -> Self {
        self.class_name = Arc::new(predicate);
        self
    }

    pub fn with_tag_name(mut self, predicate: impl Fn(&str) -> bool + 'static) -> Self {
        self.tag_name = Arc::new(predicate);
        self
    }

    pub fn with_attribute(mut self, predicate: impl Fn(&str, &str) -> bool + 'static) -> Self {
        self.attribute = Arc::new(predicate);
        self
    }
}

impl<N: fmt::Debug> fmt::Debug for Config<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("scope_root", &self.scope_root)
            .field("time_budget", &self.time_budget)
            .field("seed_depth", &self.seed_depth)
            .field("minimize_floor", &self.minimize_floor)
            .field("max_candidates_checked", &self.max_candidates_checked)
            .finish_non_exhaustive()
    }
}

/// Wall-clock budget for one `find` call.
#[derive(Clone, Copy, Debug)]
pub struct Budget {
    started: Instant,
    limit: Duration,
}

impl Budget {
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// A zero limit is exceeded immediately.
    pub fn exceeded(&self) -> bool {
        self.elapsed() >= self.limit
    }
}
