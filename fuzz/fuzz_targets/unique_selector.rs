#![no_main]

use css::{Engine, unique_selector_with};
use finder::Config;
use html::parse_document;
use html::traverse::element_descendants;
use libfuzzer_sys::fuzz_target;
use std::time::Duration;

// Every element of an arbitrary document must get a selector that the engine
// resolves back to exactly that element.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let doc = parse_document(input);
    let engine = Engine::new(&doc);
    for id in element_descendants(&doc, html::Id::DOCUMENT).take(32) {
        let config = Config::default().with_time_budget(Duration::from_millis(50));
        let Ok(selector) = unique_selector_with(&engine.element(id), config) else {
            continue;
        };
        let matches = engine
            .query_selector_all(&selector, None)
            .unwrap_or_else(|err| panic!("emitted unparsable `{selector}`: {err}"));
        assert_eq!(matches, vec![id], "`{selector}` is not unique to its target");
    }
});
