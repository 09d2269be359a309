/// Named references recognised by [`decode_entities`]; all require the trailing `;`.
const NAMED: &[(&str, char)] = &[
    ("amp;", '&'),
    ("lt;", '<'),
    ("gt;", '>'),
    ("quot;", '"'),
    ("apos;", '\''),
    ("nbsp;", '\u{a0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decodes the handful of character references that show up in ids, classes and
/// attribute values.
///
/// - Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// - Numeric: `&#123;` and `&#x1F4A9;`, semicolon-terminated, valid scalars only.
///
/// Anything else (unknown names, missing `;`, overlong digit runs) is copied
/// through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        match decode_reference(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// `tail` starts right after `&`. Returns the character and the bytes consumed.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    if let Some(numeric) = tail.strip_prefix('#') {
        let (digits, radix, max, prefix) = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, MAX_HEX_DIGITS, 2),
            None => (numeric, 10, MAX_DEC_DIGITS, 1),
        };
        let end = digits.find(';')?;
        if end == 0 || end > max {
            return None;
        }
        let value = u32::from_str_radix(&digits[..end], radix).ok()?;
        let ch = char::from_u32(value)?;
        return Some((ch, prefix + end + 1));
    }
    NAMED
        .iter()
        .find(|(name, _)| tail.starts_with(name))
        .map(|&(name, ch)| (ch, name.len()))
}
