//! Simplified HTML tokenizer with a practical tag-name character set.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lowercased.
//! `script` and `style` bodies are rawtext. This is not an HTML5 state machine:
//! there is no parse-error recovery beyond skipping stray bytes.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn starts_with_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

/// Finds `</tag` followed by optional ASCII whitespace and `>`.
/// Returns `(start, end)` of the close tag within `haystack`.
fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        i += memchr(b'<', &bytes[i..])?;
        if starts_with_ignore_ascii_case(&bytes[i..], close_tag) {
            let mut k = i + close_tag.len();
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if bytes.get(k) == Some(&b'>') {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Byte cursor over the input. Slices are only cut at ASCII bytes, so every
/// slice boundary is a UTF-8 char boundary.
struct Tokenizer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    out: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            out: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn take_name(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.text();
            } else if self.rest().starts_with(COMMENT_START) {
                self.comment();
            } else if starts_with_ignore_ascii_case(&self.bytes[self.pos..], b"<!doctype") {
                if !self.doctype() {
                    break;
                }
            } else if self.bytes.get(self.pos + 1) == Some(&b'/') {
                self.end_tag();
            } else if self.bytes.get(self.pos + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
                if !self.start_tag() {
                    break;
                }
            } else {
                // Stray `<` is text.
                self.out.push(Token::Text("<".to_string()));
                self.pos += 1;
            }
        }
        self.out
    }

    fn text(&mut self) {
        let start = self.pos;
        let end = memchr(b'<', &self.bytes[start..]).map_or(self.bytes.len(), |rel| start + rel);
        self.pos = end;
        let decoded = decode_entities(&self.input[start..end]);
        if !decoded.is_empty() {
            self.out.push(Token::Text(decoded));
        }
    }

    fn comment(&mut self) {
        let body = &self.rest()[COMMENT_START.len()..];
        match body.find(COMMENT_END) {
            Some(end) => {
                self.out.push(Token::Comment(body[..end].to_string()));
                self.pos += COMMENT_START.len() + end + COMMENT_END.len();
            }
            None => {
                self.out.push(Token::Comment(body.to_string()));
                self.pos = self.bytes.len();
            }
        }
    }

    /// Returns `false` when the doctype is unterminated.
    fn doctype(&mut self) -> bool {
        let body = &self.rest()[2..];
        let Some(end) = body.find('>') else {
            return false;
        };
        self.out.push(Token::Doctype(body[..end].trim().to_string()));
        self.pos += 2 + end + 1;
        true
    }

    fn end_tag(&mut self) {
        self.pos += 2;
        let name = self.take_name().to_ascii_lowercase();
        match memchr(b'>', &self.bytes[self.pos..]) {
            Some(rel) => self.pos += rel + 1,
            None => self.pos = self.bytes.len(),
        }
        if !name.is_empty() {
            self.out.push(Token::EndTag(name));
        }
    }

    fn attribute_value(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return None;
        }
        self.pos += 1;
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                let end = memchr(quote, &self.bytes[start..])
                    .map_or(self.bytes.len(), |rel| start + rel);
                self.pos = (end + 1).min(self.bytes.len());
                Some(decode_entities(&self.input[start..end]))
            }
            _ => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace()
                        || b == b'>'
                        || (b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>'))
                    {
                        break;
                    }
                    self.pos += 1;
                }
                Some(decode_entities(&self.input[start..self.pos]))
            }
        }
    }

    /// Returns `false` once the input has been consumed by a rawtext body.
    fn start_tag(&mut self) -> bool {
        self.pos += 1;
        let name = self.take_name().to_ascii_lowercase();
        let mut attributes: Vec<(String, Option<String>)> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek() == Some(b'>') {
                        self.pos += 1;
                        self_closing = true;
                        break;
                    }
                }
                Some(b) if is_name_byte(b) => {
                    let attr = self.take_name().to_ascii_lowercase();
                    let value = self.attribute_value();
                    attributes.push((attr, value));
                }
                Some(_) => self.pos += 1,
            }
        }
        self_closing |= is_void_element(&name);
        log::trace!(
            target: "html.tokenizer",
            "start tag <{name}> with {} attributes",
            attributes.len()
        );

        let rawtext = !self_closing && (name == "script" || name == "style");
        self.out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });
        if !rawtext {
            return true;
        }

        let close_tag = if name == "script" {
            SCRIPT_CLOSE_TAG
        } else {
            STYLE_CLOSE_TAG
        };
        let body = self.rest();
        let (raw, consumed, closed) = match find_rawtext_close_tag(body, close_tag) {
            Some((start, end)) => (&body[..start], end, true),
            // Missing close tag: the remainder is rawtext with an implicit end.
            None => (body, body.len(), false),
        };
        if !raw.is_empty() {
            self.out.push(Token::Text(raw.to_string()));
        }
        self.out.push(Token::EndTag(name));
        self.pos += consumed;
        closed
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let tokens = Tokenizer::new(input).run();
    log::trace!(target: "html.tokenizer", "{} tokens from {} bytes", tokens.len(), input.len());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str, attributes: &[(&str, Option<&str>)], self_closing: bool) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
            self_closing,
        }
    }

    #[test]
    fn tokenize_preserves_utf8_text_nodes() {
        let tokens = tokenize("<p>120×32</p>");
        assert_eq!(
            tokens,
            vec![
                start("p", &[], false),
                Token::Text("120×32".to_string()),
                Token::EndTag("p".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_handles_mixed_case_doctype() {
        let tokens = tokenize("<!DoCtYpE html>");
        assert_eq!(tokens, vec![Token::Doctype("DoCtYpE html".to_string())]);
    }

    #[test]
    fn tokenize_lowercases_tag_and_attribute_names() {
        let tokens = tokenize("<DIV ID=Main Data-Row='3'></Div>");
        assert_eq!(
            tokens,
            vec![
                start("div", &[("id", Some("Main")), ("data-row", Some("3"))], false),
                Token::EndTag("div".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_reads_bare_and_quoted_attributes() {
        let tokens = tokenize(r#"<input disabled value="a &amp; b" class='x y'>"#);
        assert_eq!(
            tokens,
            vec![start(
                "input",
                &[
                    ("disabled", None),
                    ("value", Some("a & b")),
                    ("class", Some("x y")),
                ],
                true,
            )]
        );
    }

    #[test]
    fn tokenize_marks_void_and_self_closing_tags() {
        let tokens = tokenize("<br><img src=a.png/><x-widget/>");
        assert_eq!(
            tokens,
            vec![
                start("br", &[], true),
                start("img", &[("src", Some("a.png"))], true),
                start("x-widget", &[], true),
            ]
        );
    }

    #[test]
    fn tokenize_finds_script_end_tag_case_insensitive() {
        let tokens = tokenize("<script>if (a < b) {}</ScRiPt ><p>");
        assert_eq!(
            tokens,
            vec![
                start("script", &[], false),
                Token::Text("if (a < b) {}".to_string()),
                Token::EndTag("script".to_string()),
                start("p", &[], false),
            ]
        );
    }

    #[test]
    fn tokenize_handles_rawtext_without_close_tag() {
        let tokens = tokenize("<style>p { color: red }");
        assert_eq!(
            tokens,
            vec![
                start("style", &[], false),
                Token::Text("p { color: red }".to_string()),
                Token::EndTag("style".to_string()),
            ]
        );
    }

    #[test]
    fn rawtext_close_tag_does_not_accept_near_matches() {
        assert_eq!(
            find_rawtext_close_tag("</scripty></script>", SCRIPT_CLOSE_TAG),
            Some((10, 19))
        );
        assert_eq!(find_rawtext_close_tag("</scrip>", SCRIPT_CLOSE_TAG), None);
    }

    #[test]
    fn tokenize_keeps_comments_and_unterminated_comment_tail() {
        let tokens = tokenize("<!-- a --><b><!-- open");
        assert_eq!(
            tokens,
            vec![
                Token::Comment(" a ".to_string()),
                start("b", &[], false),
                Token::Comment(" open".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_treats_stray_angle_brackets_as_text() {
        let tokens = tokenize("a < b");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a ".to_string()),
                Token::Text("<".to_string()),
                Token::Text(" b".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_handles_tons_of_angle_brackets() {
        let input = "<".repeat(10_000);
        assert_eq!(tokenize(&input).len(), 10_000);
    }
}
