//! `.gitmodules` path extraction
//!
//! Only the `path` keys matter here. Accepted line grammar:
//!
//! ```text
//! <ws>* path <ws>* = <ws>* <value> <ws>*
//! ```
//!
//! where `<value>` runs to the end of the line. Section headers, other keys
//! and comments are ignored.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

/// Location of the submodule registry inside a revision's tree.
pub const GITMODULES_PATH: &str = ".gitmodules";

lazy_static! {
    static ref PATH_LINE: Regex = Regex::new(r"^\s*path\s*=\s*(\S.*?)\s*$").unwrap();
}

/// Submodule paths declared in a `.gitmodules` blob, deduplicated.
pub fn submodule_paths(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter_map(|line| PATH_LINE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|value| value.as_str().to_string())
        .collect()
}
