//! Narrow `Gemfile.lock` reader: finds the version a single gem is pinned to.
//!
//! This is pattern matching over the first `specs:` block, not a lockfile
//! parser. Pure functions only.

use regex::Regex;

/// Marker that opens the declarations block of a lockfile source section.
pub const SPECS_MARKER: &str = "specs:";

/// Lines of the first declarations block: the first line containing
/// [`SPECS_MARKER`] up to (not including) the next blank line, or end of input.
#[must_use]
pub fn specs_section(lockfile: &str) -> Vec<&str> {
    lockfile
        .lines()
        .skip_while(|line| !line.contains(SPECS_MARKER))
        .take_while(|line| !line.trim().is_empty())
        .collect()
}

/// Version `gem` is pinned to inside the declarations block.
///
/// Matches `<gem> (<version>)` and returns the first capture. `None` means
/// the gem is not pinned, which is a normal outcome.
#[must_use]
pub fn extract_pinned_version(lockfile: &str, gem: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r"{} \((.+)\)", regex::escape(gem))).ok()?;
    specs_section(lockfile).into_iter().find_map(|line| {
        pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}
