use crate::config::{Budget, Config};
use crate::error::{FindError, NotFoundCause};
use crate::fallback::fallback_path;
use crate::optimize::minimize;
use crate::path::Path;
use crate::search::enumerate;
use crate::tree::{Escape, TreeNode, UniquenessOracle};

/// How the primary search ended.
enum SearchOutcome {
    Found(Path),
    BudgetExceeded { checked: usize },
    Exhausted { checked: usize },
}

/// Bundles the host capabilities and a configuration for repeated lookups.
pub struct Finder<'a, N, O: ?Sized, E: ?Sized> {
    oracle: &'a O,
    escape: &'a E,
    config: Config<N>,
}

impl<'a, N, O, E> Finder<'a, N, O, E>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
    E: Escape + ?Sized,
{
    pub fn new(oracle: &'a O, escape: &'a E) -> Self {
        Self {
            oracle,
            escape,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config<N>) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config<N> {
        &self.config
    }

    pub fn find(&self, target: &N) -> Result<String, FindError> {
        find_with(target, self.oracle, self.escape, &self.config)
    }
}

/// Shortest unique selector for `target`, using `config` or the defaults.
pub fn find<N, O, E>(
    target: &N,
    oracle: &O,
    escape: &E,
    config: Option<Config<N>>,
) -> Result<String, FindError>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
    E: Escape + ?Sized,
{
    let config = config.unwrap_or_default();
    find_with(target, oracle, escape, &config)
}

fn find_with<N, O, E>(
    target: &N,
    oracle: &O,
    escape: &E,
    config: &Config<N>,
) -> Result<String, FindError>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
    E: Escape + ?Sized,
{
    if !target.is_element() {
        return Err(FindError::InvalidInput);
    }
    if target.is_root_element() {
        return Ok(escape.escape(target.tag_name()));
    }

    let budget = Budget::start(config.time_budget);
    let found = match search(target, oracle, escape, config, &budget)? {
        SearchOutcome::Found(path) => path,
        SearchOutcome::BudgetExceeded { checked } => {
            log::debug!(
                target: "finder.driver",
                "budget exceeded after {checked} candidates ({:?}), using fallback",
                budget.elapsed()
            );
            return fallback(target, oracle, escape, config);
        }
        SearchOutcome::Exhausted { checked } => {
            log::debug!(
                target: "finder.driver",
                "search exhausted after {checked} candidates"
            );
            return Err(FindError::NoUniqueSelectorFound {
                cause: NotFoundCause::Exhausted,
            });
        }
    };
    log::debug!(
        target: "finder.driver",
        "found `{found}` (cost {}), minimizing",
        found.cost()
    );

    let mut reductions = minimize(found.clone(), target, config, oracle, budget)
        .collect::<Result<Vec<Path>, FindError>>()?;
    reductions.push(found);
    reductions.sort_by_key(Path::cost);
    let best = reductions.swap_remove(0);
    Ok(best.to_selector())
}

fn search<N, O, E>(
    target: &N,
    oracle: &O,
    escape: &E,
    config: &Config<N>,
    budget: &Budget,
) -> Result<SearchOutcome, FindError>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
    E: Escape + ?Sized,
{
    let scope = config.scope_root.as_ref();
    let mut checked = 0usize;
    for candidate in enumerate(target, config, escape) {
        let over_count = config
            .max_candidates_checked
            .is_some_and(|max| checked >= max);
        if budget.exceeded() || over_count {
            return Ok(SearchOutcome::BudgetExceeded { checked });
        }
        checked += 1;
        if is_unique(&candidate, oracle, scope)? {
            return Ok(SearchOutcome::Found(candidate));
        }
    }
    Ok(SearchOutcome::Exhausted { checked })
}

fn fallback<N, O, E>(
    target: &N,
    oracle: &O,
    escape: &E,
    config: &Config<N>,
) -> Result<String, FindError>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
    E: Escape + ?Sized,
{
    let Some(path) = fallback_path(target, config.scope_root.as_ref(), escape) else {
        return Err(FindError::NoUniqueSelectorFound {
            cause: NotFoundCause::FallbackUnavailable,
        });
    };
    if is_unique(&path, oracle, config.scope_root.as_ref())? {
        return Ok(path.to_selector());
    }
    Err(FindError::NoUniqueSelectorFound {
        cause: NotFoundCause::FallbackNotUnique {
            selector: path.to_selector(),
        },
    })
}

fn is_unique<N, O>(path: &Path, oracle: &O, scope: Option<&N>) -> Result<bool, FindError>
where
    N: TreeNode,
    O: UniquenessOracle<N> + ?Sized,
{
    let selector = path.to_selector();
    let count = oracle.count_matches(&selector, scope)?;
    log::trace!(target: "finder.search", "`{selector}` matches {count}");
    match count {
        0 => {
            log::error!(
                target: "finder.driver",
                "selector `{selector}` derived from the live tree matched nothing"
            );
            Err(FindError::OracleInconsistency { selector })
        }
        1 => Ok(true),
        _ => Ok(false),
    }
}
