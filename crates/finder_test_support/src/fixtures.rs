use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const FIXTURE_FORMAT_V1: &str = "finder-fixture-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
struct FixtureManifest {
    format: String,
    cases: Vec<FixtureCase>,
}

/// One selector synthesis case.
///
/// `target` and `scope` are selectors resolved against the parsed document;
/// the first match is used.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixtureCase {
    pub id: String,
    pub html: String,
    pub target: String,
    #[serde(default)]
    pub scope: Option<String>,
    /// Exact expected selector; when absent only soundness is checked.
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub time_budget_ms: Option<u64>,
}

/// Loads and validates a fixture manifest. Panics with the offending path on
/// any I/O, syntax or validation failure.
pub fn load_fixtures(path: &Path) -> Vec<FixtureCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture TOML {path:?}: {err}"));
    let manifest: FixtureManifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture TOML {path:?}: {err}"));
    assert_eq!(
        manifest.format, FIXTURE_FORMAT_V1,
        "unsupported fixture format in {path:?}"
    );
    assert!(!manifest.cases.is_empty(), "no cases in {path:?}");

    let mut seen = BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate fixture id in {path:?}: {}",
            case.id
        );
        assert!(
            !case.target.trim().is_empty(),
            "empty target in {path:?}: {}",
            case.id
        );
    }
    manifest.cases
}
