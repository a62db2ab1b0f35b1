//! Recursive-descent parser for type expressions.
//!
//! ```text
//! DataType      := FunctionCall | ObjectLiteral | Primitive | Number | String
//! FunctionCall  := Identifier "(" [DataType ("," DataType)*] ")"
//! ObjectLiteral := "{" (DocBlock? Identifier "=" DataType)* "}"
//! DocBlock      := LineDocComment+ | BlockDocComment
//! ```

use crate::ast::{DataTypeNode, DocBlockNode, ObjectPropertyNode};
use crate::error::{ParseError, Position};
use crate::lexer::{tokenize, Token, TokenKind};

/// Default cap on nested calls and object literals.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hard ceiling for `ParseOptions::max_depth`; larger values are clamped.
pub const MAX_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Clamped to [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a complete type expression with default options.
pub fn parse(input: &str) -> Result<DataTypeNode, ParseError> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse a complete type expression. The whole input must form exactly one
/// expression; trailing tokens are an error.
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<DataTypeNode, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        max_depth: options.max_depth.min(MAX_DEPTH_LIMIT),
        end: end_position(input),
    };
    let root = parser.data_type()?;
    if let Some(token) = parser.peek() {
        return Err(parser.unexpected(token, "end of input"));
    }
    Ok(root)
}

fn end_position(input: &str) -> Position {
    let mut position = Position::start();
    for ch in input.chars() {
        position.offset += ch.len_utf8();
        if ch == '\n' {
            position.line += 1;
            position.column = 1;
        } else {
            position.column += 1;
        }
    }
    position
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
    end: Position,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn unexpected(&self, token: &Token, expected: &str) -> ParseError {
        ParseError::Syntax {
            position: token.position,
            expected: expected.to_string(),
            found: token.kind.describe(),
        }
    }

    fn unexpected_end(&self, expected: &str) -> ParseError {
        ParseError::Syntax {
            position: self.end,
            expected: expected.to_string(),
            found: "end of input".to_string(),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&'t Token, ParseError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(self.unexpected(token, expected)),
            None => Err(self.unexpected_end(expected)),
        }
    }

    fn enter(&mut self, position: Position) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::DepthExceeded {
                position,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn data_type(&mut self) -> Result<DataTypeNode, ParseError> {
        let Some(token) = self.advance() else {
            return Err(self.unexpected_end("type expression"));
        };
        match &token.kind {
            TokenKind::Ident(name) => {
                if matches!(self.peek(), Some(t) if t.kind == TokenKind::LParen) {
                    self.enter(token.position)?;
                    let call = self.call_args(name);
                    self.leave();
                    call
                } else {
                    Ok(DataTypeNode::Primitive(name.clone()))
                }
            }
            TokenKind::LBrace => {
                self.enter(token.position)?;
                let object = self.object_body();
                self.leave();
                object
            }
            TokenKind::Number(n) => Ok(DataTypeNode::NumberLiteral(n.clone())),
            TokenKind::Str(s) => Ok(DataTypeNode::StringLiteral(s.clone())),
            _ => Err(self.unexpected(token, "type expression")),
        }
    }

    fn call_args(&mut self, name: &str) -> Result<DataTypeNode, ParseError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut args = Vec::new();

        if matches!(self.peek(), Some(t) if t.kind == TokenKind::RParen) {
            self.advance();
            return Ok(DataTypeNode::FunctionCall {
                name: name.to_string(),
                args,
            });
        }

        loop {
            args.push(self.data_type()?);
            match self.advance() {
                Some(t) if t.kind == TokenKind::Comma => continue,
                Some(t) if t.kind == TokenKind::RParen => break,
                Some(t) => return Err(self.unexpected(t, "`,` or `)`")),
                None => return Err(self.unexpected_end("`,` or `)`")),
            }
        }

        Ok(DataTypeNode::FunctionCall {
            name: name.to_string(),
            args,
        })
    }

    /// Parse properties after the opening `{` through the closing `}`.
    fn object_body(&mut self) -> Result<DataTypeNode, ParseError> {
        let mut properties = Vec::new();
        loop {
            match self.peek() {
                Some(t) if t.kind == TokenKind::RBrace => {
                    self.advance();
                    return Ok(DataTypeNode::ObjectLiteral { properties });
                }
                Some(_) => properties.push(self.property()?),
                None => return Err(self.unexpected_end("property or `}`")),
            }
        }
    }

    fn property(&mut self) -> Result<ObjectPropertyNode, ParseError> {
        let doc = self.doc_block();

        let key = match self.advance() {
            Some(Token {
                kind: TokenKind::Ident(key),
                ..
            }) => key.clone(),
            Some(t) => return Err(self.unexpected(t, "property key")),
            None => return Err(self.unexpected_end("property key")),
        };

        self.expect(TokenKind::Equals, "`=`")?;
        let value = self.data_type()?;

        Ok(ObjectPropertyNode { doc, key, value })
    }

    fn doc_block(&mut self) -> Option<DocBlockNode> {
        let token = self.peek()?;
        match &token.kind {
            TokenKind::DocBlock(text) => {
                self.advance();
                Some(DocBlockNode::Block(text.clone()))
            }
            TokenKind::DocLine(_) => {
                let mut lines = Vec::new();
                while let Some(Token {
                    kind: TokenKind::DocLine(line),
                    ..
                }) = self.peek()
                {
                    lines.push(line.clone());
                    self.advance();
                }
                Some(DocBlockNode::Lines(lines))
            }
            _ => None,
        }
    }
}
