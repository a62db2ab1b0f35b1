//! Link rendering for `@see` targets and nested type anchors.

use regex::Regex;
use std::sync::LazyLock;

static RE_MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").unwrap());

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").unwrap());

static RE_TYPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap());

/// Render a `@see` target as inline markdown.
///
/// Existing markdown links pass through, URLs become autolinks, relative
/// paths link to themselves and a PascalCase word links to the nested type
/// table of that name. Anything else is plain text.
pub fn see_link(target: &str) -> String {
    if RE_MARKDOWN_LINK.is_match(target) {
        return target.to_string();
    }
    if RE_URL.is_match(target) {
        return RE_URL.replace_all(target, "<$0>").into_owned();
    }
    if ["./", "../", "/"].iter().any(|p| target.starts_with(p)) {
        return format!("[{0}]({0})", target);
    }
    if RE_TYPE_NAME.is_match(target) {
        return format!("[{}](#{})", target, heading_anchor(target));
    }
    target.to_string()
}

/// GitHub's anchor for a heading: lowercase, spaces to hyphens, other
/// punctuation dropped.
pub fn heading_anchor(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}
