//! Semantic resolution of parsed type expressions.
//!
//! Flattens calls to canonical signatures, unwraps `optional(...)` and
//! expands inline object literals into named nested fields.

use crate::ast::{DataTypeNode, DocBlockNode, ObjectPropertyNode};
use crate::docblock::normalize;
use crate::error::ResolveError;
use crate::model::{pascal_name, CollectionPrefix, ObjectField, ObjectGroup};
use std::collections::HashMap;

/// Outer call names that make a declaration object-shaped.
const GROUP_CALLS: &[&str] = &["object", "optional", "map", "list"];

/// What to do when one object literal repeats a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateKeyPolicy {
    /// The later property replaces the earlier one, keeping the earlier position.
    #[default]
    LastWriteWins,
    Reject,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    pub duplicate_keys: DuplicateKeyPolicy,
}

/// Canonical single-line signature of a type expression.
///
/// Object literals have no flattened form and are left out of call
/// arguments.
pub fn flatten(node: &DataTypeNode) -> Option<String> {
    match node {
        DataTypeNode::Primitive(text)
        | DataTypeNode::NumberLiteral(text)
        | DataTypeNode::StringLiteral(text) => Some(text.clone()),
        DataTypeNode::FunctionCall { name, args } => {
            let args: Vec<String> = args.iter().filter_map(flatten).collect();
            Some(format!("{}({})", name, args.join(", ")))
        }
        DataTypeNode::ObjectLiteral { .. } => None,
    }
}

/// Resolve one `key = value` property with default options.
pub fn resolve_field(
    key: &str,
    doc: Option<&DocBlockNode>,
    value: &DataTypeNode,
) -> Result<ObjectField, ResolveError> {
    Resolver::default().resolve_field(key, doc, value)
}

/// Resolve a top-level declaration with default options.
pub fn resolve_group(
    root: &DataTypeNode,
    declared_name: &str,
) -> Result<Option<ObjectGroup>, ResolveError> {
    Resolver::default().resolve_group(root, declared_name)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    pub fn new(options: ResolveOptions) -> Self {
        Resolver { options }
    }

    pub fn resolve_field(
        &self,
        key: &str,
        doc: Option<&DocBlockNode>,
        value: &DataTypeNode,
    ) -> Result<ObjectField, ResolveError> {
        let mut field = ObjectField::new(key);
        if let Some(doc) = doc {
            field.documentation = normalize(doc);
        }
        self.resolve_type(&mut field, value)?;
        Ok(field)
    }

    /// Resolve a declaration whose root is `object`, `optional`, `map` or
    /// `list`. Any other root is not object-shaped and yields `None`.
    pub fn resolve_group(
        &self,
        root: &DataTypeNode,
        declared_name: &str,
    ) -> Result<Option<ObjectGroup>, ResolveError> {
        let Some((call, _)) = root.as_call() else {
            return Ok(None);
        };
        if !GROUP_CALLS.contains(&call) {
            tracing::debug!(name = declared_name, call, "declaration is not object-shaped");
            return Ok(None);
        }

        let mut field = ObjectField::new(declared_name);
        self.resolve_type(&mut field, root)?;
        Ok(Some(ObjectGroup {
            field,
            collection_prefix: outer_prefix(root),
        }))
    }

    /// Fill in the type of `field` from `value`.
    fn resolve_type(&self, field: &mut ObjectField, value: &DataTypeNode) -> Result<(), ResolveError> {
        if let Some(("optional", args)) = value.as_call() {
            field.optional = true;
            match args.first() {
                Some(inner) => self.resolve_type(field, inner)?,
                None => tracing::debug!(field = %field.name, "optional() without a type argument"),
            }
            if let Some(default) = args.get(1) {
                field.default_value = default_value(default);
            }
            if args.len() > 2 {
                tracing::debug!(field = %field.name, count = args.len(), "extra optional() arguments ignored");
            }
            return Ok(());
        }

        if let Some((call @ ("map" | "list"), [inner])) = value.as_call() {
            if let Some(properties) = object_properties(inner) {
                return self.expand(field, properties, CollectionPrefix::from_call_name(call));
            }
        }

        if let Some(properties) = object_properties(value) {
            return self.expand(field, properties, CollectionPrefix::None);
        }

        field.data_type_str = flatten(value).unwrap_or_default();
        Ok(())
    }

    fn expand(
        &self,
        field: &mut ObjectField,
        properties: &[ObjectPropertyNode],
        prefix: CollectionPrefix,
    ) -> Result<(), ResolveError> {
        if properties.is_empty() {
            field.data_type_str = prefix.wrap("object({})");
            return Ok(());
        }

        let type_name = pascal_name(&field.name);
        field.children = self.resolve_properties(properties)?;
        field.data_type_str = prefix.wrap(&format!("object({})", type_name));
        field.nested_type_name = Some(type_name);
        Ok(())
    }

    fn resolve_properties(
        &self,
        properties: &[ObjectPropertyNode],
    ) -> Result<Vec<ObjectField>, ResolveError> {
        let mut fields: Vec<ObjectField> = Vec::with_capacity(properties.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for property in properties {
            let field = self.resolve_field(&property.key, property.doc.as_ref(), &property.value)?;
            match index.get(&property.key) {
                Some(&existing) => match self.options.duplicate_keys {
                    DuplicateKeyPolicy::LastWriteWins => {
                        tracing::debug!(key = %property.key, "duplicate key replaces earlier property");
                        fields[existing] = field;
                    }
                    DuplicateKeyPolicy::Reject => {
                        return Err(ResolveError::DuplicateKey {
                            key: property.key.clone(),
                        });
                    }
                },
                None => {
                    index.insert(property.key.clone(), fields.len());
                    fields.push(field);
                }
            }
        }

        Ok(fields)
    }
}

/// Collection wrapper of a declaration root, looking through one outer
/// `optional`. Recorded whether or not the wrapped type expands.
fn outer_prefix(root: &DataTypeNode) -> CollectionPrefix {
    match root.as_call() {
        Some(("optional", [inner, ..])) => match inner.as_call() {
            Some((name, _)) => CollectionPrefix::from_call_name(name),
            None => CollectionPrefix::None,
        },
        Some((name, _)) => CollectionPrefix::from_call_name(name),
        None => CollectionPrefix::None,
    }
}

/// Properties of `object({...})` or a bare `{...}`.
fn object_properties(node: &DataTypeNode) -> Option<&[ObjectPropertyNode]> {
    match node {
        DataTypeNode::ObjectLiteral { properties } => Some(properties),
        DataTypeNode::FunctionCall { name, args } if name == "object" => match args.as_slice() {
            [DataTypeNode::ObjectLiteral { properties }] => Some(properties),
            _ => None,
        },
        _ => None,
    }
}

fn default_value(node: &DataTypeNode) -> Option<String> {
    match node {
        DataTypeNode::ObjectLiteral { properties } if properties.is_empty() => Some("{}".to_string()),
        DataTypeNode::ObjectLiteral { .. } => {
            tracing::debug!("object literal default has no flattened form");
            None
        }
        other => flatten(other),
    }
}
