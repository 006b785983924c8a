use tracing::trace;

use super::lexer::{Token, TokenKind};
use crate::error::ParseError;
use crate::ir::ast;
use crate::span::Position;

/// Parses one `{ Program ... }` record followed by end of input.
pub fn parse_tokens(tokens: &[Token<'_>]) -> Result<ast::Program, ParseError> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program()?;
    parser.expect(TokenKind::Eof)?;
    Ok(program)
}

/// Recursive-descent reader over a token slice.
///
/// Each `parse_*` method recognizes one record kind, starting at its opening
/// delimiter and stopping right after its closing one. The only state is the
/// cursor, so any recognizer can be run directly on a slice holding just that
/// record.
pub struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    position: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn parse_program(&mut self) -> Result<ast::Program, ParseError> {
        let start = self.open_record()?;

        let mut name = String::new();
        let mut ir_version = 0;
        let mut telc_version = 0;
        let mut types = Vec::new();
        let mut funcs = Vec::new();

        while !self.at(TokenKind::RBrace) {
            let field = self.field_name()?;
            match field.text {
                "program_name" => name = self.string_value()?,
                "ir_version" => ir_version = self.number_value()?,
                "telc_version" => telc_version = self.number_value()?,
                "types" => types = self.list(Self::parse_type_def)?,
                "funcs" => funcs = self.list(Self::parse_function)?,
                _ => return Err(unknown_field("Program", field)),
            }
            self.eat(TokenKind::Comma);
        }

        let pos = self.close_record(start)?;
        Ok(ast::Program {
            pos,
            name,
            ir_version,
            telc_version,
            types,
            funcs,
        })
    }

    pub fn parse_type_def(&mut self) -> Result<ast::TypeDef, ParseError> {
        let start = self.open_record()?;
        let mut target = None;

        while !self.at(TokenKind::RBrace) {
            let field = self.field_name()?;
            match field.text {
                "target" => target = Some(self.type_def_target()?),
                _ => return Err(unknown_field("TypeDef", field)),
            }
            self.eat(TokenKind::Comma);
        }

        let pos = self.close_record(start)?;
        let target = target.ok_or(ParseError::MissingField {
            record: "TypeDef",
            field: "target",
            pos,
        })?;
        Ok(ast::TypeDef { pos, target })
    }

    fn type_def_target(&mut self) -> Result<ast::TypeDefTarget, ParseError> {
        let tag = self.discriminator()?;
        match tag.text {
            "struct" => Ok(ast::TypeDefTarget::Struct(self.parse_struct_type()?)),
            _ => Err(unknown_discriminator("TypeDef", tag)),
        }
    }

    /// `({ StructType name = ..., is_anonymous = ..., fields = [...] })`
    pub fn parse_struct_type(&mut self) -> Result<ast::StructType, ParseError> {
        let start = self.peek().pos.start;
        self.expect(TokenKind::LParen)?;
        self.open_record()?;

        let mut name = String::new();
        let mut is_anonymous = false;
        let mut fields = Vec::new();

        while !self.at(TokenKind::RBrace) {
            let field = self.field_name()?;
            match field.text {
                "name" => name = self.string_value()?,
                "is_anonymous" => is_anonymous = self.bool_value()?,
                "fields" => fields = self.list(Self::parse_typed_name)?,
                _ => return Err(unknown_field("StructType", field)),
            }
            self.eat(TokenKind::Comma);
        }

        self.expect(TokenKind::RBrace)?;
        let end = self.expect(TokenKind::RParen)?.pos.end();
        Ok(ast::StructType {
            pos: Position::from_bounds(start, end),
            name,
            is_anonymous,
            fields,
        })
    }

    pub fn parse_typed_name(&mut self) -> Result<ast::TypedName, ParseError> {
        let start = self.open_record()?;
        let mut name = String::new();
        let mut typ = None;

        while !self.at(TokenKind::RBrace) {
            let field = self.field_name()?;
            match field.text {
                "name" => name = self.string_value()?,
                "type_id" => typ = Some(self.parse_type_ref()?),
                _ => return Err(unknown_field("TypedName", field)),
            }
            self.eat(TokenKind::Comma);
        }

        let pos = self.close_record(start)?;
        let typ = typ.ok_or(ParseError::MissingField {
            record: "TypedName",
            field: "type_id",
            pos,
        })?;
        Ok(ast::TypedName { pos, name, typ })
    }

    pub fn parse_type_ref(&mut self) -> Result<ast::TypeRef, ParseError> {
        let start = self.open_record()?;
        let mut target = None;

        while !self.at(TokenKind::RBrace) {
            let field = self.field_name()?;
            match field.text {
                "target" => target = Some(self.type_ref_target()?),
                _ => return Err(unknown_field("TypeRef", field)),
            }
            // The emitter sometimes closes the variant's parens twice.
            while self.at(TokenKind::RParen) {
                let stray = self.advance();
                trace!(pos = %stray.pos, "skipping stray ')' in TypeRef");
            }
            self.eat(TokenKind::Comma);
        }

        let pos = self.close_record(start)?;
        let target = target.ok_or(ParseError::MissingField {
            record: "TypeRef",
            field: "target",
            pos,
        })?;
        Ok(ast::TypeRef { pos, target })
    }

    fn type_ref_target(&mut self) -> Result<ast::TypeTarget, ParseError> {
        let tag = self.discriminator()?;
        match tag.text {
            "builtin" => self.builtin_ref().map(ast::TypeTarget::Builtin),
            "type_id" => self.id_ref().map(ast::TypeTarget::ById),
            _ => Err(unknown_discriminator("TypeRef", tag)),
        }
    }

    // ({ BuiltinType %NAME })
    fn builtin_ref(&mut self) -> Result<ast::BuiltinType, ParseError> {
        self.expect(TokenKind::LParen)?;
        self.open_record()?;
        self.expect(TokenKind::Percent)?;
        let name = self.expect(TokenKind::Identifier)?;
        let kind = name
            .text
            .parse::<ast::BuiltinType>()
            .map_err(|_| ParseError::UnknownBuiltin {
                name: name.text.to_string(),
                pos: name.pos,
            })?;
        self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::RParen)?;
        Ok(kind)
    }

    // (N)
    fn id_ref(&mut self) -> Result<u32, ParseError> {
        self.expect(TokenKind::LParen)?;
        let id = self.number_value()?;
        self.expect(TokenKind::RParen)?;
        Ok(id)
    }

    pub fn parse_function(&mut self) -> Result<ast::Function, ParseError> {
        let start = self.open_record()?;

        let mut name = String::new();
        let mut signature = None;
        let mut locals = Vec::new();
        let mut code = Vec::new();

        while !self.at(TokenKind::RBrace) {
            let field = self.field_name()?;
            match field.text {
                "name" => name = self.string_value()?,
                "typ" => signature = Some(self.parse_function_type()?),
                "locals" => locals = self.list(Self::parse_typed_name)?,
                "code" => code = self.parse_code()?,
                _ => return Err(unknown_field("Function", field)),
            }
            self.eat(TokenKind::Comma);
        }

        let pos = self.close_record(start)?;
        let signature = signature.ok_or(ParseError::MissingField {
            record: "Function",
            field: "typ",
            pos,
        })?;
        Ok(ast::Function {
            pos,
            name,
            signature,
            locals,
            code,
        })
    }

    pub fn parse_function_type(&mut self) -> Result<ast::FunctionType, ParseError> {
        let start = self.open_record()?;
        let mut args = Vec::new();
        let mut results = Vec::new();

        while !self.at(TokenKind::RBrace) {
            let field = self.field_name()?;
            match field.text {
                "args" => args = self.list(Self::parse_typed_name)?,
                "results" => results = self.list(Self::parse_type_ref)?,
                _ => return Err(unknown_field("FunctionType", field)),
            }
            self.eat(TokenKind::Comma);
        }

        let pos = self.close_record(start)?;
        Ok(ast::FunctionType { pos, args, results })
    }

    /// Only `[]` is accepted.
    pub fn parse_code(&mut self) -> Result<Vec<ast::Statement>, ParseError> {
        self.expect(TokenKind::LBracket)?;
        let next = self.peek();
        if next.kind != TokenKind::RBracket {
            return Err(ParseError::UnsupportedCode {
                text: next.text.to_string(),
                pos: next.pos,
            });
        }
        self.advance();
        Ok(Vec::new())
    }

    /// `[ elem ,? closer* ... ]` where closer is a stray `}` or `)`.
    fn list<T>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect(TokenKind::LBracket)?;
        let mut items = Vec::new();

        while !self.at(TokenKind::RBracket) {
            items.push(element(self)?);
            self.eat(TokenKind::Comma);
            while self.peek().kind.is_closer() {
                let stray = self.advance();
                trace!(pos = %stray.pos, text = stray.text, "skipping stray closer in list");
            }
        }

        self.expect(TokenKind::RBracket)?;
        Ok(items)
    }

    // '{' RecordName, returning the start offset of '{'.
    fn open_record(&mut self) -> Result<usize, ParseError> {
        let open = self.expect(TokenKind::LBrace)?;
        self.expect(TokenKind::Identifier)?;
        Ok(open.pos.start)
    }

    fn close_record(&mut self, start: usize) -> Result<Position, ParseError> {
        let close = self.expect(TokenKind::RBrace)?;
        Ok(Position::from_bounds(start, close.pos.end()))
    }

    // field_name '='
    fn field_name(&mut self) -> Result<Token<'src>, ParseError> {
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Equals)?;
        Ok(name)
    }

    // '#' tag
    fn discriminator(&mut self) -> Result<Token<'src>, ParseError> {
        self.expect(TokenKind::Hash)?;
        self.expect(TokenKind::Identifier)
    }

    fn string_value(&mut self) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::String)?;
        string_contents(token.text)
            .map(str::to_string)
            .ok_or_else(|| ParseError::UnterminatedString {
                text: token.text.to_string(),
                pos: token.pos,
            })
    }

    fn number_value(&mut self) -> Result<u32, ParseError> {
        let token = self.expect(TokenKind::Number)?;
        token.text.parse().map_err(|_| ParseError::InvalidNumber {
            text: token.text.to_string(),
            pos: token.pos,
        })
    }

    fn bool_value(&mut self) -> Result<bool, ParseError> {
        let token = self.expect(TokenKind::Identifier)?;
        match token.text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ParseError::InvalidBoolean {
                text: token.text.to_string(),
                pos: token.pos,
            }),
        }
    }

    // Вспомогательные методы

    /// Next significant token. Whitespace and comments are stepped over.
    fn peek(&mut self) -> Token<'src> {
        while self
            .tokens
            .get(self.position)
            .is_some_and(|token| token.kind.is_trivia())
        {
            self.position += 1;
        }
        match self.tokens.get(self.position) {
            Some(token) => *token,
            None => self.synthetic_eof(),
        }
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.peek();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token<'src>, ParseError> {
        let token = self.peek();
        if token.kind != expected {
            return Err(ParseError::Expected {
                expected,
                found: token.kind,
                text: token.text.to_string(),
                pos: token.pos,
            });
        }
        Ok(self.advance())
    }

    // Slices handed to a single recognizer need not end in EOF.
    fn synthetic_eof(&self) -> Token<'src> {
        let end = self.tokens.last().map_or(0, |token| token.pos.end());
        Token::new(TokenKind::Eof, "", Position::empty_at(end))
    }
}

/// Text between the quotes of a STRING token, or `None` if the closing quote
/// is missing (or escaped).
fn string_contents(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let escapes = inner.chars().rev().take_while(|&c| c == '\\').count();
    (escapes % 2 == 0).then_some(inner)
}

fn unknown_field(record: &'static str, field: Token<'_>) -> ParseError {
    ParseError::UnknownField {
        record,
        field: field.text.to_string(),
        pos: field.pos,
    }
}

fn unknown_discriminator(union: &'static str, tag: Token<'_>) -> ParseError {
    ParseError::UnknownDiscriminator {
        union,
        name: tag.text.to_string(),
        pos: tag.pos,
    }
}
