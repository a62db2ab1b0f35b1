//! GitHub-flavored markdown renderer.
//!
//! One pipe table per input group, then one table per nested object type.
//! Nested types are linked from the rows that use them.

use crate::render::Renderer;
use crate::links;
use anyhow::Result;
use tfdocs_extras::manifest::{Annotations, InputsManifest, RowAttribute, TableData, TableRow};

pub struct MarkdownRenderer;

const TABLE_HEADER: &str = "| Name | Type | Default | Description |";
const TABLE_RULE: &str = "| ---- | ---- | ------- | ----------- |";

impl Renderer for MarkdownRenderer {
    fn render(&self, manifest: &InputsManifest) -> Result<String> {
        let mut sections: Vec<String> = Vec::new();

        if !manifest.required_inputs.rows.is_empty() {
            sections.push(render_table("### Required Inputs", &manifest.required_inputs));
        }
        if !manifest.optional_inputs.rows.is_empty() {
            sections.push(render_table("### Optional Inputs", &manifest.optional_inputs));
        }

        if !manifest.nested_inputs.is_empty() {
            sections.push("### Nested Types\n".to_string());
            for (name, table) in &manifest.nested_inputs {
                sections.push(render_table(&format!("#### {}", name), table));
            }
        }

        if !manifest.reference_links.is_empty() {
            let mut refs: Vec<String> = manifest
                .reference_links
                .iter()
                .map(|(name, url)| format!("[{}]: {}", name, url))
                .collect();
            refs.push(String::new());
            sections.push(refs.join("\n"));
        }

        Ok(sections.join("\n"))
    }
}

/// Render a heading, the table's own documentation and its rows.
fn render_table(heading: &str, table: &TableData) -> String {
    let mut lines: Vec<String> = vec![format!("{}\n", heading)];

    if !table.description.is_empty() {
        lines.push(table.description.clone());
        lines.push(String::new());
    }

    if !table.annotations.is_empty() {
        lines.extend(annotation_items(&table.annotations).map(|item| format!("* {}", item)));
        lines.push(String::new());
    }

    lines.push(TABLE_HEADER.to_string());
    lines.push(TABLE_RULE.to_string());
    for row in &table.rows {
        lines.push(render_row(row));
    }
    lines.push(String::new());

    lines.join("\n")
}

fn render_row(row: &TableRow) -> String {
    let name = format!("`{}`", row.name);

    let type_cell = match (row.type_parts(), row.anchor()) {
        (Some((prefix, suffix)), Some(anchor)) => format!(
            "{}[{}](#{}){}",
            escape_cell(prefix),
            row.complex_type.as_deref().unwrap_or_default(),
            anchor,
            escape_cell(suffix)
        ),
        _ if row.type_str.is_empty() => String::new(),
        _ => format!("`{}`", escape_cell(&row.type_str)),
    };

    let default = if row.default_value.is_empty() {
        String::new()
    } else {
        format!("`{}`", escape_cell(&row.default_value))
    };

    let mut description: Vec<String> = Vec::new();
    if !row.description.is_empty() {
        description.push(escape_cell(&row.description));
    }
    description.extend(annotation_items(&row.annotations).map(|item| escape_cell(&item)));

    format!(
        "| {} | {} | {} | {} |",
        name,
        type_cell,
        default,
        description.join("<br>")
    )
}

/// Attributes, examples and links as inline markdown, in that order.
fn annotation_items(annotations: &Annotations) -> impl Iterator<Item = String> + '_ {
    let attributes = annotations.attributes.iter().map(render_attribute);
    let examples = annotations
        .examples
        .iter()
        .map(|e| format!("Example: [{}]({})", e.name, e.content));
    let links = annotations
        .links
        .iter()
        .map(|l| format!("[{}]({})", l.name, l.content));
    attributes.chain(examples).chain(links)
}

fn render_attribute(attr: &RowAttribute) -> String {
    if attr.name == "See" {
        return format!("**See:** {}", links::see_link(&attr.content));
    }
    if attr.content.is_empty() {
        return format!("**{}**", attr.name);
    }
    format!("**{}:** {}", attr.name, attr.content)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfdocs_extras::manifest::{build_manifest, Variable};
    use tfdocs_extras::Options;

    fn var(name: &str, type_expr: &str, description: &str, required: bool) -> Variable {
        Variable {
            name: name.into(),
            type_expr: Some(type_expr.into()),
            description: description.into(),
            required,
            default: None,
        }
    }

    fn render(vars: &[Variable]) -> String {
        MarkdownRenderer
            .render(&build_manifest(vars, Options::default()))
            .unwrap()
    }

    #[test]
    fn simple_required_table() {
        assert_eq!(
            render(&[var("region", "string", "AWS region", true)]),
            "### Required Inputs\n\n\
             | Name | Type | Default | Description |\n\
             | ---- | ---- | ------- | ----------- |\n\
             | `region` | `string` |  | AWS region |\n"
        );
    }

    #[test]
    fn nested_types_are_linked() {
        let out = render(&[var(
            "instance_config",
            "map(object({ /// Instance size\n size = optional(string, \"small\") }))",
            "Per-instance settings",
            false,
        )]);
        assert!(out.contains("### Optional Inputs"));
        assert!(out.contains(
            "| `instance_config` | map(object([InstanceConfig](#instanceconfig))) |  | Per-instance settings |"
        ));
        assert!(out.contains("### Nested Types\n\n#### InstanceConfig\n"));
        assert!(out.contains("| `size` | `string` | `\"small\"` | Instance size |"));
    }

    #[test]
    fn annotations_in_cells_and_reference_links() {
        let out = render(&[var(
            "mode",
            "string",
            "Routing mode\n@enum simple | failover\n@see ./routing.md\n@link \"Guide\" https://example.com/g\n@link {failover} https://example.com/f",
            true,
        )]);
        assert!(out.contains(
            "| `mode` | `string` |  | Routing mode<br>**Enum:** simple \\| failover<br>**See:** [./routing.md](./routing.md)<br>[Guide](https://example.com/g) |"
        ));
        assert!(out.ends_with("[failover]: https://example.com/f\n"));
    }

    #[test]
    fn nested_table_documentation() {
        let out = render(&[var(
            "settings",
            "object({ /// Listener options\n /// @since 2.0\n listener = object({ port = number }) })",
            "",
            true,
        )]);
        assert!(out.contains("#### Listener\n\nListener options\n\n* **Since:** 2.0\n\n| Name |"));
    }

    #[test]
    fn nameless_at_lines_render_as_text() {
        let out = render(&[var("owner", "string", "Owner\n@\n@ platform team", true)]);
        assert!(out.contains("| `owner` | `string` |  | Owner<br>@<br>@ platform team |"));
        assert!(!out.contains("****"));
        assert!(!out.contains("**:**"));
    }

    #[test]
    fn empty_manifest_renders_nothing() {
        assert_eq!(render(&[]), "");
    }
}
