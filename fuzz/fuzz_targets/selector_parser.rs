#![no_main]

use css::{escape_identifier, parse_selector_list};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let _ = parse_selector_list(input);

    // Escaped identifiers must parse back to themselves.
    if input.is_empty() {
        return;
    }
    let selector = format!(".{}", escape_identifier(input));
    let list = parse_selector_list(&selector)
        .unwrap_or_else(|err| panic!("escaped class `{selector}` failed to parse: {err}"));
    let class = match &list.0[0].compounds[0].simple[0] {
        css::SimpleSelector::Class(class) => class.clone(),
        other => panic!("unexpected simple selector {other:?}"),
    };
    assert_eq!(class, input.replace('\0', "\u{fffd}"));
});
