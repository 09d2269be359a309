//! Lightweight HTML tokenizer and arena DOM.
//!
//! [`parse_document`] turns markup into a [`Document`]: a flat arena of nodes
//! with parent links, so sibling positions and ancestor chains are cheap to
//! compute. Names are ASCII-lowercased at tokenization time.

pub mod dom_utils;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::dom_builder::{build_dom, parse_document};
pub use crate::tokenizer::{is_void_element, tokenize};
pub use crate::types::{Document, Id, Node, NodeId, NodeKind, Token};
