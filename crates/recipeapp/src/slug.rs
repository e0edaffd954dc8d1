//! Key normalization.
//!
//! Storage keys and recipe slugs share one normal form: lowercase, words joined
//! by single hyphens, nothing but word characters and hyphens.
//!
//! ```
//! use recipeapp::slug::normalize_key;
//!
//! assert_eq!(normalize_key("My Recipe!! Title"), "my-recipe-title");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w-]+").unwrap());
static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Normalizes a free-form key into a filesystem- and URL-safe name.
///
/// Idempotent: `normalize_key(&normalize_key(s)) == normalize_key(s)`.
pub fn normalize_key(key: &str) -> String {
    let lowered = key.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let stripped = NON_WORD.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUNS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
