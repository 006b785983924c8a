use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use serde::Serialize;

use crate::error::LexError;
use crate::span::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Скобки
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    LParen,   // (
    RParen,   // )
    // Разделители
    Comma,   // ,
    Equals,  // =
    Hash,    // #
    Percent, // %
    // Идентификаторы и литералы
    Identifier,
    String,
    Number,
    // Служебные
    Comment,
    Whitespace,
    Eof,
}

impl TokenKind {
    /// Whitespace and comments: kept in the stream, skipped by the parser.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn is_closer(self) -> bool {
        matches!(self, TokenKind::RBrace | TokenKind::RParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Equals => "'='",
            TokenKind::Hash => "'#'",
            TokenKind::Percent => "'%'",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Comment => "comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Eof => "end of file",
        };
        f.write_str(name)
    }
}

/// A token borrowing its exact source slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub pos: Position,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, pos: Position) -> Self {
        Self { kind, text, pos }
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while let Some((start, ch)) = cursor.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                cursor.eat_while(char::is_whitespace);
                TokenKind::Whitespace
            }
            '/' if source[start..].starts_with("//") => {
                cursor.eat_while(|c| c != '\n');
                TokenKind::Comment
            }
            '{' | '}' | '[' | ']' | '(' | ')' | ',' | '=' | '#' | '%' => {
                cursor.bump();
                punctuation(ch)
            }
            '"' => {
                cursor.bump();
                eat_string_body(&mut cursor);
                TokenKind::String
            }
            '0'..='9' => {
                cursor.eat_while(|c| c.is_ascii_digit());
                TokenKind::Number
            }
            c if c.is_alphabetic() || c == '_' => {
                cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
                TokenKind::Identifier
            }
            _ => {
                let pos = Position::new(start, ch.len_utf8());
                let (line, column) = pos.line_col(source);
                return Err(LexError::UnexpectedChar {
                    ch,
                    line,
                    column,
                    pos,
                });
            }
        };

        let end = cursor.offset();
        tokens.push(Token::new(
            kind,
            &source[start..end],
            Position::from_bounds(start, end),
        ));
    }

    tokens.push(Token::new(TokenKind::Eof, "", Position::empty_at(source.len())));
    Ok(tokens)
}

fn punctuation(ch: char) -> TokenKind {
    match ch {
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        ',' => TokenKind::Comma,
        '=' => TokenKind::Equals,
        '#' => TokenKind::Hash,
        _ => TokenKind::Percent,
    }
}

// Opening quote already consumed. Stops after the closing quote or at end of
// text; a backslash swallows whatever follows it.
fn eat_string_body(cursor: &mut Cursor<'_>) {
    while let Some((_, ch)) = cursor.bump() {
        match ch {
            '"' => break,
            '\\' => {
                cursor.bump();
            }
            _ => {}
        }
    }
}

struct Cursor<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Cursor<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some((_, ch)) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
    }

    fn offset(&mut self) -> usize {
        match self.peek() {
            Some((offset, _)) => offset,
            None => self.source.len(),
        }
    }
}
