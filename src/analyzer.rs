//! Pure text heuristics over published contract source. No network, no I/O.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker that separates any free-text description from the code proper.
const PRAGMA_MARKER: &str = "pragma solidity";

/// Source substrings that heuristically indicate the contract restricts
/// actions to an allow-listed set of callers.
pub const GATING_TERMS: [&str; 8] = [
    "onlywhitelist",
    "onlywhitelisted",
    "whitelistonly",
    "whitelistedonly",
    "onlyallowlist",
    "onlyallowlisted",
    "allowlistonly",
    "allowlistedonly",
];

static FUNCTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {2,}function ").expect("function line regex"));

/// Everything preceding the first version pragma. Not all contracts put
/// their metadata before the pragma; when the marker is absent the whole
/// source comes back.
pub fn extract_description(source: &str) -> &str {
    match source.find(PRAGMA_MARKER) {
        Some(idx) => &source[..idx],
        None => source,
    }
}

/// Function names declared in the source, found by scanning for lines that
/// start with two or more spaces followed by `function `. Differently
/// formatted or minified source will slip through; that is accepted.
pub fn extract_function_signatures(source: &str) -> Vec<String> {
    source
        .lines()
        .filter(|line| FUNCTION_LINE.is_match(line))
        .filter_map(|line| {
            let decl = line.trim().strip_prefix("function ")?;
            let name = decl.split('(').next()?.trim();
            Some(name.to_string())
        })
        .collect()
}

/// Case-insensitive test for any of the eight gating terms, stopping at the
/// first match.
pub fn contains_gating_term(source: &str) -> bool {
    let lowered = source.to_lowercase();
    GATING_TERMS.iter().any(|term| lowered.contains(term))
}

/// Exact, case-sensitive substring containment; used for free-text filters.
pub fn contains_string(source: &str, needle: &str) -> bool {
    source.contains(needle)
}
