use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement, utils::expect},
    },
};

/// Parses the statements of a brace-delimited block.
///
/// Parsing continues until the matching `}`. Running into the end of input
/// first is reported at the line of the end-of-input token.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// The statements together with the line of the opening brace.
pub fn parse_block_statements<'a, I>(tokens: &mut Peekable<I>)
                                     -> ParseResult<(Vec<Statement>, usize)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBrace)?;
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Eof, eof_line)) => {
                return Err(ParseError::UnexpectedEndOfInput { line: *eof_line });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
            Some(_) => statements.push(parse_statement(tokens)?),
        }
    }

    Ok((statements, line))
}

/// Parses a block and wraps it as a [`Statement::Block`].
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (statements, line) = parse_block_statements(tokens)?;
    Ok(Statement::Block { statements, line })
}
