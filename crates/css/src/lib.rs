//! Selector parsing and matching over the `html` arena DOM, plus the glue that
//! lets the `finder` crate synthesize unique selectors for parsed documents.

pub mod escape;
pub mod matching;
pub mod syntax;

mod engine;

pub use engine::{ElementRef, Engine, unique_selector, unique_selector_with};
pub use escape::escape_identifier;
pub use matching::{matches, matches_any};
pub use syntax::{
    AttributeOp, Combinator, ComplexSelector, Compound, SelectorList, SelectorParseError,
    SelectorParseErrorKind, SimpleSelector, parse_selector_list,
};
