use crate::tokenizer::tokenize;
use crate::types::{Document, Id, Token};

/// Builds a [`Document`] from a token stream with a stack of open elements.
///
/// An end tag closes the innermost open element of the same name together with
/// everything opened after it. End tags with no matching open element are
/// dropped.
pub fn build_dom(tokens: &[Token]) -> Document {
    let mut doc = Document::new();
    let mut open_elements: Vec<Id> = Vec::new();

    for token in tokens {
        let parent = open_elements.last().copied().unwrap_or(Id::DOCUMENT);
        match token {
            Token::Doctype(s) => doc.set_doctype(s.clone()),
            Token::Comment(c) => {
                doc.append_comment(parent, c);
            }
            Token::Text(t) => {
                if !t.is_empty() {
                    doc.append_text(parent, t);
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let id = doc.append_element(parent, name, attributes.clone());
                if !*self_closing {
                    open_elements.push(id);
                }
            }
            Token::EndTag(name) => {
                let matching = open_elements
                    .iter()
                    .rposition(|&open| doc.element_name(open) == Some(name.as_str()));
                match matching {
                    Some(index) => open_elements.truncate(index),
                    None => log::trace!(
                        target: "html.tokenizer",
                        "dropping unmatched end tag </{name}>"
                    ),
                }
            }
        }
    }

    doc
}

pub fn parse_document(input: &str) -> Document {
    build_dom(&tokenize(input))
}
