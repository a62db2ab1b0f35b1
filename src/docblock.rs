//! Doc comment normalization.
//!
//! Strips comment markers and splits a doc block into prose lines and
//! `@directive` lines.

use crate::ast::DocBlockNode;
use crate::directive::DirectiveRecord;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedDoc {
    /// Prose lines, trimmed, without leading or trailing blank lines.
    pub content_lines: Vec<String>,
    pub directives: Vec<DirectiveRecord>,
}

impl NormalizedDoc {
    pub fn is_empty(&self) -> bool {
        self.content_lines.is_empty() && self.directives.is_empty()
    }

    /// Content lines joined with newlines.
    pub fn text(&self) -> String {
        self.content_lines.join("\n")
    }
}

/// Normalize a doc block attached to an object property.
pub fn normalize(block: &DocBlockNode) -> NormalizedDoc {
    match block {
        DocBlockNode::Lines(lines) => classify(lines.iter().map(|l| strip_line_marker(l))),
        DocBlockNode::Block(text) => {
            let body = strip_block_markers(text);
            classify(body.split('\n'))
        }
    }
}

/// Normalize a free-standing description, e.g. a variable's description
/// string. Lines are classified exactly like doc comment lines.
pub fn normalize_description(text: &str) -> NormalizedDoc {
    classify(text.lines())
}

fn strip_line_marker(line: &str) -> &str {
    line.strip_prefix("///")
        .unwrap_or(line)
        .trim_start_matches([' ', '\t'])
}

fn strip_block_markers(text: &str) -> String {
    let inner = text.strip_prefix("/**").unwrap_or(text);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let lines: Vec<&str> = inner
        .split('\n')
        .map(|line| {
            let line = line.trim();
            match line.strip_prefix('*') {
                Some(rest) => rest.trim_start_matches([' ', '\t']),
                None => line,
            }
        })
        .collect();

    lines.join("\n").trim_matches('\n').to_string()
}

fn classify<'a>(lines: impl Iterator<Item = &'a str>) -> NormalizedDoc {
    let mut doc = NormalizedDoc::default();

    for line in lines {
        let line = line.trim();
        let directive = line
            .strip_prefix('@')
            .map(|rest| rest.split_once(' ').unwrap_or((rest, "")));
        match directive {
            // A bare `@` has no name and stays prose.
            Some((name, content)) if !name.is_empty() => {
                doc.directives.push(DirectiveRecord::new(name, content));
            }
            _ => doc.content_lines.push(line.to_string()),
        }
    }

    trim_blank_lines(&mut doc.content_lines);
    doc
}

fn trim_blank_lines(lines: &mut Vec<String>) {
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines.truncate(end);
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(0);
    lines.drain(..start);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveKind;

    fn lines(raw: &[&str]) -> DocBlockNode {
        DocBlockNode::Lines(raw.iter().map(|l| l.to_string()).collect())
    }

    fn names(doc: &NormalizedDoc) -> Vec<(&str, &str)> {
        doc.directives
            .iter()
            .map(|d| (d.name.as_str(), d.raw_content.as_str()))
            .collect()
    }

    #[test]
    fn line_comments() {
        let doc = normalize(&lines(&[
            "/// This is a description",
            "/// It spans multiple lines",
            "/// @since 1.0.0",
            "/// @param name The name parameter",
        ]));
        assert_eq!(
            doc.content_lines,
            ["This is a description", "It spans multiple lines"]
        );
        assert_eq!(
            names(&doc),
            [("since", "1.0.0"), ("param", "name The name parameter")]
        );
        assert_eq!(doc.directives[0].parsed.kind, DirectiveKind::Since);
        assert_eq!(doc.directives[1].parsed.kind, DirectiveKind::Unsupported);
    }

    #[test]
    fn block_comment() {
        let doc = normalize(&DocBlockNode::Block(
            "/**\n * This is a block comment\n * With multiple lines\n * @deprecated Use new function\n * @since 2.0.0\n */"
                .to_string(),
        ));
        assert_eq!(
            doc.content_lines,
            ["This is a block comment", "With multiple lines"]
        );
        assert_eq!(
            names(&doc),
            [("deprecated", "Use new function"), ("since", "2.0.0")]
        );
    }

    #[test]
    fn block_comment_without_stars() {
        let doc = normalize(&DocBlockNode::Block(
            "/** Age in years\n    must be positive */".to_string(),
        ));
        assert_eq!(doc.content_lines, ["Age in years", "must be positive"]);
    }

    #[test]
    fn mixed_content_keeps_interior_blanks() {
        let doc = normalize(&lines(&[
            "///",
            "///   Leading whitespace should be trimmed  ",
            "///",
            "/// Empty lines are preserved",
            "/// @example some code example",
            "/// More content after directive",
            "///",
        ]));
        assert_eq!(
            doc.content_lines,
            [
                "Leading whitespace should be trimmed",
                "",
                "Empty lines are preserved",
                "More content after directive",
            ]
        );
        assert_eq!(names(&doc), [("example", "some code example")]);
        assert!(!doc.directives[0].parsed.valid);
    }

    #[test]
    fn directive_without_content() {
        let doc = normalize(&lines(&["/// Some description", "/// @deprecated", "/// @final"]));
        assert_eq!(doc.content_lines, ["Some description"]);
        assert_eq!(names(&doc), [("deprecated", ""), ("final", "")]);
    }

    #[test]
    fn only_first_at_is_consumed() {
        let doc = normalize(&lines(&["/// @@double trouble"]));
        assert_eq!(names(&doc), [("@double", "trouble")]);
    }

    #[test]
    fn indented_at_is_a_directive() {
        let doc = normalize(&lines(&["///     @since 3.1"]));
        assert!(doc.content_lines.is_empty());
        assert_eq!(names(&doc), [("since", "3.1")]);
    }

    #[test]
    fn nameless_at_is_content() {
        let doc = normalize(&lines(&["/// Notes", "/// @", "/// @ reach the team"]));
        assert!(doc.directives.is_empty());
        assert_eq!(doc.content_lines, ["Notes", "@", "@ reach the team"]);
    }

    #[test]
    fn at_inside_text_is_content() {
        let doc = normalize(&lines(&["/// mail admin@example.com"]));
        assert_eq!(doc.content_lines, ["mail admin@example.com"]);
        assert!(doc.directives.is_empty());
    }

    #[test]
    fn empty_blocks() {
        assert!(normalize(&lines(&["///", "///   "])).is_empty());
        assert!(normalize(&DocBlockNode::Block("/***/".to_string())).is_empty());
        assert!(normalize(&DocBlockNode::Block("/**\n *\n */".to_string())).is_empty());
    }

    #[test]
    fn description_string() {
        let doc = normalize_description(
            "The VPC configuration.\n\n@link \"VPC docs\" https://example.com/vpc\n",
        );
        assert_eq!(doc.content_lines, ["The VPC configuration."]);
        assert_eq!(doc.directives.len(), 1);
        assert!(doc.directives[0].parsed.valid);
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize(&DocBlockNode::Block(
            "/**\n * Title\n *\n * Body text\n * @enum a | b\n * @see other\n */".to_string(),
        ));
        let mut rebuilt: Vec<String> = first
            .content_lines
            .iter()
            .map(|l| format!("/// {}", l))
            .collect();
        rebuilt.extend(
            first
                .directives
                .iter()
                .map(|d| format!("/// @{} {}", d.name, d.raw_content)),
        );
        let second = normalize(&DocBlockNode::Lines(rebuilt));
        assert_eq!(first, second);
    }
}
