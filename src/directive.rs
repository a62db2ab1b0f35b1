//! `@name content` directive micro-grammars.
//!
//! Every directive parses to a [`ParsedDirective`]; malformed arguments only
//! clear its `valid` flag so the rest of the doc block is unaffected.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_QUOTED_AND_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]+)"\s+(.+)$"#).unwrap());

static RE_BRACED_AND_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([^}]+)\}\s+(.+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Unsupported,
    Deprecated,
    Example,
    Enum,
    Link,
    Regex,
    See,
    Since,
}

impl DirectiveKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "deprecated" => DirectiveKind::Deprecated,
            "example" => DirectiveKind::Example,
            "enum" => DirectiveKind::Enum,
            "link" => DirectiveKind::Link,
            "regex" => DirectiveKind::Regex,
            "see" => DirectiveKind::See,
            "since" => DirectiveKind::Since,
            _ => DirectiveKind::Unsupported,
        }
    }
}

/// How a `@link` names its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// `"Display Name" url`, shown inline.
    Named,
    /// `{reference-id} url`, collected as a reference definition.
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDirective {
    pub kind: DirectiveKind,
    pub args: Vec<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_style: Option<LinkStyle>,
}

impl ParsedDirective {
    fn valid(kind: DirectiveKind, args: Vec<String>) -> Self {
        ParsedDirective {
            kind,
            args,
            valid: true,
            link_style: None,
        }
    }

    fn invalid(kind: DirectiveKind) -> Self {
        ParsedDirective {
            kind,
            args: Vec::new(),
            valid: false,
            link_style: None,
        }
    }

    fn link(style: LinkStyle, target: &str, url: &str) -> Self {
        ParsedDirective {
            kind: DirectiveKind::Link,
            args: vec![target.to_string(), url.to_string()],
            valid: true,
            link_style: Some(style),
        }
    }
}

/// A directive line split into name and content, with its parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveRecord {
    pub name: String,
    pub raw_content: String,
    pub parsed: ParsedDirective,
}

impl DirectiveRecord {
    pub fn new(name: &str, raw_content: &str) -> Self {
        let raw_content = raw_content.trim();
        DirectiveRecord {
            name: name.to_string(),
            raw_content: raw_content.to_string(),
            parsed: parse_directive(name, raw_content),
        }
    }

    /// Whether renderers should show this directive. Unknown names are kept
    /// as opaque attributes; known names with bad arguments are hidden.
    pub fn is_emittable(&self) -> bool {
        self.parsed.valid || self.parsed.kind == DirectiveKind::Unsupported
    }
}

/// Parse the content of directive `name`.
pub fn parse_directive(name: &str, content: &str) -> ParsedDirective {
    let content = content.trim();
    let kind = DirectiveKind::from_name(name);
    match kind {
        DirectiveKind::Link => parse_link(content),
        DirectiveKind::Example => parse_example(content),
        DirectiveKind::Enum => parse_enum(content),
        DirectiveKind::Regex => parse_regex(content),
        DirectiveKind::Deprecated | DirectiveKind::See | DirectiveKind::Since => {
            ParsedDirective::valid(kind, vec![content.to_string()])
        }
        DirectiveKind::Unsupported => ParsedDirective::invalid(kind),
    }
}

fn parse_link(content: &str) -> ParsedDirective {
    if content.starts_with('"') {
        if let Some(caps) = RE_QUOTED_AND_TARGET.captures(content) {
            return ParsedDirective::link(LinkStyle::Named, &caps[1], &caps[2]);
        }
    }
    if content.starts_with('{') {
        if let Some(caps) = RE_BRACED_AND_TARGET.captures(content) {
            return ParsedDirective::link(LinkStyle::Reference, &caps[1], &caps[2]);
        }
    }
    ParsedDirective::invalid(DirectiveKind::Link)
}

fn parse_example(content: &str) -> ParsedDirective {
    match RE_QUOTED_AND_TARGET.captures(content) {
        Some(caps) => ParsedDirective::valid(
            DirectiveKind::Example,
            vec![caps[1].to_string(), caps[2].to_string()],
        ),
        None => ParsedDirective::invalid(DirectiveKind::Example),
    }
}

fn parse_enum(content: &str) -> ParsedDirective {
    let choices = content
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    ParsedDirective::valid(DirectiveKind::Enum, choices)
}

fn parse_regex(content: &str) -> ParsedDirective {
    let Some(body) = content.strip_prefix('/') else {
        return ParsedDirective::invalid(DirectiveKind::Regex);
    };
    let Some(end) = closing_slash(body) else {
        return ParsedDirective::invalid(DirectiveKind::Regex);
    };

    let pattern = &body[..end];
    if Regex::new(pattern).is_err() {
        return ParsedDirective::invalid(DirectiveKind::Regex);
    }

    let mut args = vec![pattern.to_string()];
    args.extend(split_args(&body[end + 1..]));
    ParsedDirective::valid(DirectiveKind::Regex, args)
}

/// Byte index of the first `/` not escaped by an odd run of backslashes.
fn closing_slash(body: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in body.char_indices() {
        match ch {
            '\\' => escaped = !escaped,
            '/' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// Split on whitespace; double quotes group words and are dropped.
fn split_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for ch in text.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        args.push(current);
    }
    args
}
