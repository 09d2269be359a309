use crate::escape::escape_identifier;
use crate::matching::matches_any;
use crate::syntax::{SelectorParseError, parse_selector_list};
use finder::{Config, Escape, FindError, OracleError, TreeNode, UniquenessOracle};
use html::dom_utils::class_list;
use html::traverse::element_descendants;
use html::{Document, Id};

/// Element handle over a parsed [`Document`].
///
/// Equality is identity: same document, same node.
#[derive(Clone, Copy, Debug)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: Id,
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}

impl<'a> ElementRef<'a> {
    pub fn new(doc: &'a Document, id: Id) -> Self {
        Self { doc, id }
    }

    pub fn node_id(&self) -> Id {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }
}

impl TreeNode for ElementRef<'_> {
    fn is_element(&self) -> bool {
        self.doc.is_element(self.id)
    }

    /// The `html` element, when it is the only element child of the document.
    fn is_root_element(&self) -> bool {
        let mut top_level = self.doc.element_children(Id::DOCUMENT);
        top_level.next() == Some(self.id)
            && top_level.next().is_none()
            && self.doc.element_name(self.id) == Some("html")
    }

    fn tag_name(&self) -> &str {
        self.doc.element_name(self.id).unwrap_or("")
    }

    fn id(&self) -> Option<&str> {
        self.doc
            .attribute(self.id, "id")
            .filter(|value| !value.is_empty())
    }

    fn class_names(&self) -> Vec<&str> {
        class_list(self.doc, self.id)
    }

    fn attributes(&self) -> Vec<(&str, &str)> {
        self.doc
            .node(self.id)
            .attributes()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref().unwrap_or("")))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.doc
            .parent_element(self.id)
            .map(|id| ElementRef::new(self.doc, id))
    }

    fn child_index(&self) -> Option<usize> {
        self.doc.child_index(self.id)
    }

    fn type_index(&self) -> Option<usize> {
        self.doc.type_index(self.id)
    }
}

/// Selector engine over one document.
///
/// Implements the finder's [`Escape`] and [`UniquenessOracle`] capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Engine<'a> {
    doc: &'a Document,
}

impl<'a> Engine<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn element(&self, id: Id) -> ElementRef<'a> {
        ElementRef::new(self.doc, id)
    }

    /// Elements matching `selector` in document order.
    ///
    /// With `scope`, only descendants of `scope` are returned; the selector is
    /// still matched against the whole document.
    pub fn query_selector_all(
        &self,
        selector: &str,
        scope: Option<Id>,
    ) -> Result<Vec<Id>, SelectorParseError> {
        let list = parse_selector_list(selector)?;
        let found: Vec<Id> = element_descendants(self.doc, scope.unwrap_or(Id::DOCUMENT))
            .filter(|&id| matches_any(self.doc, id, &list))
            .collect();
        log::trace!(target: "css.engine", "`{selector}` matched {} elements", found.len());
        Ok(found)
    }

    pub fn query_selector(
        &self,
        selector: &str,
        scope: Option<Id>,
    ) -> Result<Option<Id>, SelectorParseError> {
        let list = parse_selector_list(selector)?;
        Ok(element_descendants(self.doc, scope.unwrap_or(Id::DOCUMENT))
            .find(|&id| matches_any(self.doc, id, &list)))
    }
}

impl Escape for Engine<'_> {
    fn escape(&self, ident: &str) -> String {
        escape_identifier(ident)
    }
}

fn rejected(selector: &str, err: SelectorParseError) -> OracleError {
    OracleError::new(selector, err.to_string())
}

impl<'a> UniquenessOracle<ElementRef<'a>> for Engine<'a> {
    fn count_matches(
        &self,
        selector: &str,
        scope: Option<&ElementRef<'a>>,
    ) -> Result<usize, OracleError> {
        self.query_selector_all(selector, scope.map(|s| s.id))
            .map(|found| found.len())
            .map_err(|err| rejected(selector, err))
    }

    fn resolve(
        &self,
        selector: &str,
        scope: Option<&ElementRef<'a>>,
    ) -> Result<Option<ElementRef<'a>>, OracleError> {
        self.query_selector(selector, scope.map(|s| s.id))
            .map(|found| found.map(|id| self.element(id)))
            .map_err(|err| rejected(selector, err))
    }
}

/// Shortest unique selector for `target` with the default configuration.
pub fn unique_selector(target: &ElementRef<'_>) -> Result<String, FindError> {
    let engine = Engine::new(target.document());
    finder::find(target, &engine, &engine, None)
}

pub fn unique_selector_with<'a>(
    target: &ElementRef<'a>,
    config: Config<ElementRef<'a>>,
) -> Result<String, FindError> {
    let engine = Engine::new(target.document());
    finder::find(target, &engine, &engine, Some(config))
}
