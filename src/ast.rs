//! Syntax tree for type expressions.
//!
//! Produced once by [`crate::parser`] and never mutated afterwards.

/// A single type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTypeNode {
    /// `name(arg, ...)`
    FunctionCall { name: String, args: Vec<DataTypeNode> },
    /// `{ key = value ... }`
    ObjectLiteral { properties: Vec<ObjectPropertyNode> },
    /// Bare identifier such as `string` or `any`.
    Primitive(String),
    NumberLiteral(String),
    /// Raw string literal text, quotes included.
    StringLiteral(String),
}

impl DataTypeNode {
    /// Returns the call name and arguments if this node is a function call.
    pub fn as_call(&self) -> Option<(&str, &[DataTypeNode])> {
        match self {
            DataTypeNode::FunctionCall { name, args } => Some((name.as_str(), args.as_slice())),
            _ => None,
        }
    }

    /// Returns the properties if this node is an object literal.
    pub fn as_object(&self) -> Option<&[ObjectPropertyNode]> {
        match self {
            DataTypeNode::ObjectLiteral { properties } => Some(properties.as_slice()),
            _ => None,
        }
    }
}

/// One `key = value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPropertyNode {
    pub doc: Option<DocBlockNode>,
    pub key: String,
    pub value: DataTypeNode,
}

/// Raw documentation attached to a property, exactly as lexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlockNode {
    /// Consecutive `///` comments, markers included.
    Lines(Vec<String>),
    /// A single `/** ... */` comment, delimiters included.
    Block(String),
}
