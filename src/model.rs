//! Resolved documentation tree, independent of any output format.

use crate::docblock::NormalizedDoc;
use serde::Serialize;

/// Name used for an expanded object whose owner has no name.
pub const UNKNOWN_OBJECT: &str = "UnknownObject";

/// A documented field, possibly carrying an expanded nested object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectField {
    pub name: String,
    pub documentation: NormalizedDoc,
    /// Canonical type signature, e.g. `map(object(InstanceConfig))`.
    pub data_type_str: String,
    pub optional: bool,
    pub default_value: Option<String>,
    /// Set iff `children` is non-empty.
    pub nested_type_name: Option<String>,
    pub children: Vec<ObjectField>,
}

impl ObjectField {
    pub fn new(name: &str) -> Self {
        ObjectField {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn is_nested(&self) -> bool {
        self.nested_type_name.is_some()
    }

    /// Depth-first walk over this field and every descendant that carries a
    /// nested object, parents first.
    pub fn nested_fields(&self) -> Vec<&ObjectField> {
        let mut out = Vec::new();
        collect_nested(self, &mut out);
        out
    }
}

fn collect_nested<'a>(field: &'a ObjectField, out: &mut Vec<&'a ObjectField>) {
    if field.is_nested() {
        out.push(field);
    }
    for child in &field.children {
        collect_nested(child, out);
    }
}

/// Outer collection wrapper of a top-level declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CollectionPrefix {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "map")]
    Map,
    #[serde(rename = "list")]
    List,
}

impl CollectionPrefix {
    pub fn from_call_name(name: &str) -> Self {
        match name {
            "map" => CollectionPrefix::Map,
            "list" => CollectionPrefix::List,
            _ => CollectionPrefix::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionPrefix::None => "",
            CollectionPrefix::Map => "map",
            CollectionPrefix::List => "list",
        }
    }

    /// Wrap `inner` in this collection, e.g. `map(inner)`.
    pub fn wrap(&self, inner: &str) -> String {
        match self {
            CollectionPrefix::None => inner.to_string(),
            other => format!("{}({})", other.as_str(), inner),
        }
    }
}

/// A top-level declaration resolved into documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectGroup {
    #[serde(flatten)]
    pub field: ObjectField,
    pub collection_prefix: CollectionPrefix,
}

/// Derive the generated type name for an expanded object:
/// `instance_config` → `InstanceConfig`.
pub fn pascal_name(name: &str) -> String {
    let pascal: String = name.split('_').map(titlecase).collect();
    if pascal.is_empty() {
        UNKNOWN_OBJECT.to_string()
    } else {
        pascal
    }
}

pub(crate) fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
