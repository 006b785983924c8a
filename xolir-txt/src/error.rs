use thiserror::Error;

use crate::parser::lexer::TokenKind;
use crate::span::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character {ch:?} at line {line}, column {column}")]
    UnexpectedChar {
        ch: char,
        line: usize,
        column: usize,
        pos: Position,
    },
}

impl LexError {
    pub fn pos(&self) -> Position {
        match self {
            LexError::UnexpectedChar { pos, .. } => *pos,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected {expected}, found {found} {text:?} at {pos}")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        pos: Position,
    },

    #[error("Unknown field name {field:?} in {record} at {pos}")]
    UnknownField {
        record: &'static str,
        field: String,
        pos: Position,
    },

    #[error("Unsupported {union} target #{name} at {pos}")]
    UnknownDiscriminator {
        union: &'static str,
        name: String,
        pos: Position,
    },

    #[error("Unknown builtin type %{name} at {pos}")]
    UnknownBuiltin { name: String, pos: Position },

    #[error("Missing field {field:?} in {record} at {pos}")]
    MissingField {
        record: &'static str,
        field: &'static str,
        pos: Position,
    },

    #[error("Invalid number {text:?} at {pos}")]
    InvalidNumber { text: String, pos: Position },

    #[error("Invalid boolean {text:?} at {pos}, expected true or false")]
    InvalidBoolean { text: String, pos: Position },

    #[error("Unterminated string {text:?} at {pos}")]
    UnterminatedString { text: String, pos: Position },

    #[error("Statements are not supported, found {text:?} in code list at {pos}")]
    UnsupportedCode { text: String, pos: Position },
}

impl ParseError {
    pub fn pos(&self) -> Position {
        match self {
            ParseError::Expected { pos, .. }
            | ParseError::UnknownField { pos, .. }
            | ParseError::UnknownDiscriminator { pos, .. }
            | ParseError::UnknownBuiltin { pos, .. }
            | ParseError::MissingField { pos, .. }
            | ParseError::InvalidNumber { pos, .. }
            | ParseError::InvalidBoolean { pos, .. }
            | ParseError::UnterminatedString { pos, .. }
            | ParseError::UnsupportedCode { pos, .. } => *pos,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
