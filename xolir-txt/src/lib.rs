//! Reader for the XOLIR text format: the pretty-printed view of an IR
//! program (`{ Program ... }`), turned back into a tree whose nodes carry the
//! byte spans they were read from.

pub mod error;
pub mod ir;
pub mod parser;
pub mod report;
pub mod span;

pub use error::{Error, LexError, ParseError};
pub use ir::ast;
pub use parser::lexer::{Token, TokenKind, tokenize};
pub use parser::parse;
pub use parser::parser::{Parser, parse_tokens};
pub use span::Position;
