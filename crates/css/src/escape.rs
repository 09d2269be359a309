use std::fmt::Write;

/// Serializes `ident` as a CSS identifier (CSSOM "serialize an identifier").
///
/// The output is also a valid body for a double-quoted string, which is how
/// attribute values are embedded.
pub fn escape_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let first = ident.chars().next();
    let lone_hyphen = ident == "-";
    for (index, c) in ident.chars().enumerate() {
        let leading_digit = c.is_ascii_digit()
            && (index == 0 || (index == 1 && first == Some('-')));
        match c {
            '\0' => out.push(char::REPLACEMENT_CHARACTER),
            '\u{1}'..='\u{1f}' | '\u{7f}' => hex_escape(&mut out, c),
            _ if leading_digit => hex_escape(&mut out, c),
            '-' if lone_hyphen => out.push_str("\\-"),
            c if !c.is_ascii() || c.is_ascii_alphanumeric() || c == '-' || c == '_' => {
                out.push(c)
            }
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}

fn hex_escape(out: &mut String, c: char) {
    let _ = write!(out, "\\{:x} ", c as u32);
}
