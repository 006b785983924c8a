pub mod lexer;
pub mod parser;

use tracing::debug;

use crate::error::Error;
use crate::ir::ast;

/// Главная функция парсера - из текста в AST
pub fn parse(source: &str) -> Result<ast::Program, Error> {
    let tokens = lexer::tokenize(source)?;
    debug!(tokens = tokens.len(), bytes = source.len(), "tokenized");

    let program = parser::parse_tokens(&tokens)?;
    debug!(
        program = %program.name,
        types = program.types.len(),
        funcs = program.funcs.len(),
        "parsed program"
    );
    Ok(program)
}
