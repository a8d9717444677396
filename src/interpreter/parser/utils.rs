use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, call argument lists, method
/// argument lists and parameter lists. It repeatedly calls `parse_item` to
/// parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((Token::Eof, line)) => return Err(ParseError::UnexpectedEndOfInput { line: *line }),
            Some((tok, line)) => {
                return Err(ParseError::ExpectedToken { expected: format!("',' or '{closing}'"),
                                                       found:    tok.to_string(),
                                                       line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`. Keywords are rejected with a
/// message naming them.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// A `String` containing the identifier.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((Token::Eof, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) if tok.kind() == TokenKind::Keyword => {
            Err(ParseError::ExpectedToken { expected: "identifier".to_string(),
                                            found:    format!("keyword {tok}"),
                                            line:     *line, })
        },
        Some((tok, line)) => Err(ParseError::ExpectedToken { expected: "identifier".to_string(),
                                                             found:    tok.to_string(),
                                                             line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// Returns `ExpectedToken` naming both tokens, or `UnexpectedEndOfInput` if
/// the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((Token::Eof, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) => Err(ParseError::ExpectedToken { expected: format!("'{expected}'"),
                                                             found:    tok.to_string(),
                                                             line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token if it equals `token`.
pub(in crate::interpreter::parser) fn consume_if<'a, I>(tokens: &mut Peekable<I>,
                                                        token: &Token)
                                                        -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((tok, _)) = tokens.peek()
       && tok == token
    {
        tokens.next();
        return true;
    }
    false
}

/// Returns the line of the next token without consuming it.
pub(in crate::interpreter::parser) fn peek_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(0, |(_, l)| *l)
}

/// Deepest nesting of brackets, or longest run of prefix operators, that a
/// program may contain.
pub const MAX_NESTING: usize = 256;

/// Rejects token streams that nest deeper than [`MAX_NESTING`].
///
/// Runs before parsing, so the recursive descent and the tree it builds stay
/// within a bounded depth.
///
/// # Errors
/// Returns `NestingTooDeep` at the first token that crosses the limit.
pub(in crate::interpreter::parser) fn check_nesting(tokens: &[(Token, usize)]) -> ParseResult<()> {
    let mut depth = 0usize;
    let mut prefix_run = 0usize;

    for (token, line) in tokens {
        match token {
            Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
            _ => {},
        }
        if matches!(token, Token::Bang | Token::Minus | Token::Plus) {
            prefix_run += 1;
        } else {
            prefix_run = 0;
        }

        if depth > MAX_NESTING || prefix_run > MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                    line:  *line, });
        }
    }
    Ok(())
}

/// Builds the error for a token that cannot start the construct being parsed.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, line: usize) -> ParseError {
    match token {
        Token::Eof => ParseError::UnexpectedEndOfInput { line },
        other => ParseError::UnexpectedToken { token: other.to_string(),
                                               line },
    }
}
