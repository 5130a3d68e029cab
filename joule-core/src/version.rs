//! Version stability classification
//!
//! A version string counts as stable when it carries a recognized stability
//! keyword or is a plain numeric/dotted version with an optional trailing
//! revision marker. `1.2.3` and `1.2.3-r` are stable, `1.2.3-beta` is not.

use regex::Regex;
use std::sync::OnceLock;

const STABLE_KEYWORDS: &[&str] = &["RELEASE", "FINAL", "GA"];

fn stable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9,.v-]+(-r)?$").expect("valid stable version pattern"))
}

/// Whether a version string looks like a stable release
pub fn is_stable(version: &str) -> bool {
    let upper = version.to_uppercase();
    if STABLE_KEYWORDS.iter().any(|kw| upper.contains(kw)) {
        return true;
    }
    stable_pattern().is_match(version)
}

/// Release channel label for a version string
pub fn channel(version: &str) -> &'static str {
    if is_stable(version) {
        "stable"
    } else {
        "pre-release"
    }
}
