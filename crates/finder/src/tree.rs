//! Capabilities the search consumes from its host.
//!
//! The core never touches a concrete DOM or selector engine. Hosts provide:
//! - [`TreeNode`]: read-only navigation over element handles;
//! - [`Escape`]: identifier escaping for the emitted selector syntax;
//! - [`UniquenessOracle`]: match counting and resolution for a selector.

use std::fmt;

/// Read-only element handle.
///
/// Equality must be node identity, not structural equality: the minimizer relies
/// on it to prove a shortened selector still resolves to the original node.
pub trait TreeNode: Clone + PartialEq {
    /// `false` for text, comment, document and other non-element handles.
    fn is_element(&self) -> bool;

    /// The document element (`html`). It is addressed by its tag name alone.
    fn is_root_element(&self) -> bool;

    /// Canonical (ASCII-lowercase) tag name.
    fn tag_name(&self) -> &str;

    fn id(&self) -> Option<&str>;

    fn class_names(&self) -> Vec<&str>;

    /// All attributes in document order, including `id` and `class`.
    fn attributes(&self) -> Vec<(&str, &str)>;

    /// Parent element. `None` at the root element or for detached nodes.
    fn parent(&self) -> Option<Self>;

    /// 1-based position among all element siblings, if the node has a parent node.
    fn child_index(&self) -> Option<usize>;

    /// 1-based position among element siblings with the same tag name.
    fn type_index(&self) -> Option<usize>;
}

/// Escapes a raw token so it can be embedded in a selector.
pub trait Escape {
    fn escape(&self, ident: &str) -> String;
}

/// Counts and resolves selector matches.
///
/// `scope == None` means the whole tree. With `Some(root)`, only descendants of
/// `root` are candidates, while the selector itself is still matched against
/// the full tree.
pub trait UniquenessOracle<N> {
    fn count_matches(&self, selector: &str, scope: Option<&N>) -> Result<usize, OracleError>;

    /// First match in document order.
    fn resolve(&self, selector: &str, scope: Option<&N>) -> Result<Option<N>, OracleError>;
}

/// The oracle rejected a selector (for example, it failed to parse it).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleError {
    pub selector: String,
    pub message: String,
}

impl OracleError {
    pub fn new(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "selector `{}` rejected: {}", self.selector, self.message)
    }
}

impl std::error::Error for OracleError {}

impl<F> Escape for F
where
    F: Fn(&str) -> String,
{
    fn escape(&self, ident: &str) -> String {
        self(ident)
    }
}
