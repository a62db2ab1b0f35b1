//! Input tables assembled from declared variables.
//!
//! Each variable becomes a row in the required or optional table; every
//! expanded object type gets its own nested table keyed by type name.
//! Reference links are collected manifest-wide so renderers can emit them
//! once.

use crate::directive::{DirectiveKind, DirectiveRecord, LinkStyle};
use crate::docblock::{normalize_description, NormalizedDoc};
use crate::model::{titlecase, ObjectField, ObjectGroup};
use crate::{document_declaration_with, Options};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A variable as delivered by the module loader.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_expr: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl Variable {
    /// Default value as shown in tables; strings are shown unquoted.
    pub fn default_display(&self) -> String {
        match &self.default {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAttribute {
    pub name: String,
    pub content: String,
}

impl RowAttribute {
    fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        RowAttribute {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Directive-derived extras shared by tables and rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotations {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<RowAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<RowAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RowAttribute>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.examples.is_empty() && self.links.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(rename = "type")]
    pub type_str: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex_type: Option<String>,
    pub name: String,
    pub default_value: String,
    pub description: String,
    #[serde(flatten)]
    pub annotations: Annotations,
}

impl TableRow {
    /// Anchor of the nested table this row's type points to.
    pub fn anchor(&self) -> Option<String> {
        self.complex_type.as_deref().map(str::to_lowercase)
    }

    /// The type signature around the complex type name:
    /// `map(object(Rules))` → `("map(object(", "))")`.
    pub fn type_parts(&self) -> Option<(&str, &str)> {
        let complex = self.complex_type.as_deref()?;
        let idx = self.type_str.rfind(complex)?;
        Some((
            &self.type_str[..idx],
            &self.type_str[idx + complex.len()..],
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableData {
    pub description: String,
    #[serde(flatten)]
    pub annotations: Annotations,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputsManifest {
    pub required_inputs: TableData,
    pub optional_inputs: TableData,
    pub nested_inputs: BTreeMap<String, TableData>,
    pub reference_links: BTreeMap<String, String>,
}

impl InputsManifest {
    pub fn is_empty(&self) -> bool {
        self.required_inputs.rows.is_empty()
            && self.optional_inputs.rows.is_empty()
            && self.nested_inputs.is_empty()
    }
}

/// Build the manifest for `variables`, in input order.
///
/// A variable whose type fails to parse or resolve is still listed with its
/// raw type string; the failure is logged.
pub fn build_manifest(variables: &[Variable], options: Options) -> InputsManifest {
    let mut manifest = InputsManifest::default();

    for variable in variables {
        let group = variable
            .type_expr
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .and_then(|type_expr| {
                match document_declaration_with(type_expr, &variable.name, options) {
                    Ok(group) => group,
                    Err(e) => {
                        tracing::warn!(variable = %variable.name, error = %e, "type expression not documented");
                        None
                    }
                }
            });

        let doc = normalize_description(&variable.description);
        let mut row = TableRow {
            type_str: variable.type_expr.clone().unwrap_or_default(),
            complex_type: None,
            name: variable.name.clone(),
            default_value: variable.default_display(),
            description: doc.text(),
            annotations: Annotations::default(),
        };
        apply_directives(&doc, &mut row.annotations, &mut manifest.reference_links);

        if let Some(group) = &group {
            if let Some(nested) = &group.field.nested_type_name {
                row.type_str = group.field.data_type_str.clone();
                row.complex_type = Some(nested.clone());
            }
            record_nested(group, &mut manifest);
        }

        if variable.required {
            manifest.required_inputs.rows.push(row);
        } else {
            manifest.optional_inputs.rows.push(row);
        }
    }

    manifest
}

fn record_nested(group: &ObjectGroup, manifest: &mut InputsManifest) {
    for field in group.field.nested_fields() {
        let Some(type_name) = &field.nested_type_name else {
            continue;
        };

        let mut table = TableData {
            description: field.documentation.text(),
            ..Default::default()
        };
        apply_directives(
            &field.documentation,
            &mut table.annotations,
            &mut manifest.reference_links,
        );
        table.rows = field
            .children
            .iter()
            .map(|child| field_row(child, &mut manifest.reference_links))
            .collect();

        if manifest.nested_inputs.insert(type_name.clone(), table).is_some() {
            tracing::debug!(type_name = %type_name, "nested type name reused; later definition kept");
        }
    }
}

fn field_row(field: &ObjectField, reference_links: &mut BTreeMap<String, String>) -> TableRow {
    let mut row = TableRow {
        type_str: field.data_type_str.clone(),
        complex_type: field.nested_type_name.clone(),
        name: field.name.clone(),
        default_value: field.default_value.clone().unwrap_or_default(),
        description: field.documentation.text(),
        annotations: Annotations::default(),
    };
    apply_directives(&field.documentation, &mut row.annotations, reference_links);
    row
}

/// Route each emittable directive: examples and named links to their own
/// lists, reference links to the manifest index, everything else to
/// attributes.
fn apply_directives(
    doc: &NormalizedDoc,
    annotations: &mut Annotations,
    reference_links: &mut BTreeMap<String, String>,
) {
    for directive in doc.directives.iter().filter(|d| d.is_emittable()) {
        let parsed = &directive.parsed;
        match (parsed.kind, parsed.link_style) {
            (DirectiveKind::Example, _) => annotations
                .examples
                .push(RowAttribute::new(&parsed.args[0], &parsed.args[1])),
            (DirectiveKind::Link, Some(LinkStyle::Named)) => annotations
                .links
                .push(RowAttribute::new(&parsed.args[0], &parsed.args[1])),
            (DirectiveKind::Link, _) => {
                reference_links.insert(parsed.args[0].clone(), parsed.args[1].clone());
            }
            _ => annotations.attributes.push(attribute(directive)),
        }
    }
}

fn attribute(directive: &DirectiveRecord) -> RowAttribute {
    RowAttribute::new(titlecase(&directive.name), &directive.raw_content)
}
