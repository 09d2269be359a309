//! Shared helpers for the selector synthesis integration tests.

mod fixtures;

pub use fixtures::{FIXTURE_FORMAT_V1, FixtureCase, load_fixtures};

/// Readable report of the first difference between two line lists, with two
/// lines of context on either side.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    const MISSING: &str = "<missing>";
    let line = |lines: &[String], i: usize| lines.get(i).map_or(MISSING, String::as_str).to_string();
    let max = expected.len().max(actual.len());
    let mut out = String::new();

    match (0..max).find(|&i| line(expected, i) != line(actual, i)) {
        Some(i) => {
            let start = i.saturating_sub(2);
            let end = (i + 3).min(max);
            let _ = writeln!(out, "first mismatch at line {}:", i + 1);
            for n in start..end {
                let marker = if n == i { ">" } else { " " };
                let _ = writeln!(out, "{marker} {:>4}  expected: {}", n + 1, line(expected, n));
                let _ = writeln!(out, "{marker} {:>4}    actual: {}", n + 1, line(actual, n));
            }
        }
        None => {
            let _ = writeln!(out, "no differences");
        }
    }
    let _ = writeln!(
        out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}
