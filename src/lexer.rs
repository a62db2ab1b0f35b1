//! Tokenizer for type expressions.
//!
//! Whitespace and `#` inline comments are dropped here so the parser only
//! sees meaningful tokens. Doc comments survive as tokens because they attach
//! to the property that follows them.

use crate::error::{ParseError, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `/** ... */`, delimiters included.
    DocBlock(String),
    /// `/// ...` up to the end of the line, marker included.
    DocLine(String),
    /// Double-quoted string, quotes and escapes kept verbatim.
    Str(String),
    Number(String),
    Ident(String),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Equals,
    Comma,
}

impl TokenKind {
    /// Short human-readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::DocBlock(_) => "doc block comment".to_string(),
            TokenKind::DocLine(_) => "doc line comment".to_string(),
            TokenKind::Str(s) => format!("string {}", s),
            TokenKind::Number(n) => format!("number `{}`", n),
            TokenKind::Ident(i) => format!("identifier `{}`", i),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::LBrace => "`{`".to_string(),
            TokenKind::RBrace => "`}`".to_string(),
            TokenKind::Equals => "`=`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

/// Split `input` into tokens, or fail at the first character that cannot
/// start or continue a token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        let start = Position::start();
        Lexer {
            src,
            offset: start.offset,
            line: start.line,
            column: start.column,
        }
    }

    fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume `len` bytes (must land on a char boundary) and return them.
    fn consume(&mut self, len: usize) -> &'a str {
        let start = self.offset;
        let end = start + len;
        while self.offset < end {
            self.bump();
        }
        &self.src[start..end]
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map(|(i, _)| i)
            .unwrap_or(self.rest().len());
        self.consume(len)
    }

    fn error(&self, position: Position, message: impl Into<String>) -> ParseError {
        ParseError::Lex {
            position,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.bump();
                }
                Some('#') => {
                    self.consume_while(|c| c != '\n');
                }
                _ => return,
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_trivia();
        let position = self.position();
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        let kind = match ch {
            '(' => self.punct(TokenKind::LParen),
            ')' => self.punct(TokenKind::RParen),
            '{' => self.punct(TokenKind::LBrace),
            '}' => self.punct(TokenKind::RBrace),
            '=' => self.punct(TokenKind::Equals),
            ',' => self.punct(TokenKind::Comma),
            '/' => self.doc_comment(position)?,
            '"' => self.string(position)?,
            '-' | '0'..='9' => self.number(position)?,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let ident = self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
                TokenKind::Ident(ident.to_string())
            }
            other => {
                return Err(self.error(position, format!("unexpected character `{}`", other)));
            }
        };

        Ok(Some(Token { kind, position }))
    }

    fn punct(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn doc_comment(&mut self, position: Position) -> Result<TokenKind, ParseError> {
        let rest = self.rest();
        if rest.starts_with("/**") {
            // Non-greedy: the first `*/` after the opener closes the block.
            return match rest[3..].find("*/") {
                Some(idx) => {
                    let text = self.consume(3 + idx + 2);
                    Ok(TokenKind::DocBlock(text.to_string()))
                }
                None => Err(self.error(position, "unterminated doc block comment")),
            };
        }
        if rest.starts_with("///") {
            let text = self.consume_while(|c| c != '\n');
            return Ok(TokenKind::DocLine(text.to_string()));
        }
        Err(self.error(
            position,
            "unexpected `/`; only `///` and `/** */` comments are allowed",
        ))
    }

    fn string(&mut self, position: Position) -> Result<TokenKind, ParseError> {
        let start = self.offset;
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    if self.bump().is_none() {
                        break;
                    }
                }
                Some('"') => {
                    return Ok(TokenKind::Str(self.src[start..self.offset].to_string()));
                }
                Some(_) => {}
                None => break,
            }
        }
        Err(self.error(position, "unterminated string literal"))
    }

    fn number(&mut self, position: Position) -> Result<TokenKind, ParseError> {
        let start = self.offset;
        if self.peek() == Some('-') {
            self.bump();
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error(position, "expected digits after `-`"));
            }
        }
        self.consume_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && matches!(self.peek_second(), Some(c) if c.is_ascii_digit()) {
            self.bump();
            self.consume_while(|c| c.is_ascii_digit());
        }
        Ok(TokenKind::Number(self.src[start..self.offset].to_string()))
    }
}
