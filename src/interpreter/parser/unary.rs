use std::iter::Peekable;

use crate::{
    ast::{Expr, TypeName, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            types::parse_type,
            utils::{consume_if, expect, parse_comma_separated, parse_identifier, unexpected},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// Prefix operators bind tighter than every binary operator and may be
/// stacked, as in `!!done` or `- -x`.
///
/// Grammar: `unary := ("!" | "-" | "+") unary | postfix`
///
/// # Parameters
/// - `tokens`: Token stream positioned at a possible prefix operator.
///
/// # Returns
/// An `Expr::Unary` node or the result of [`parse_postfix`].
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let op = match token {
        Token::Bang => UnaryOperator::Not,
        Token::Minus => UnaryOperator::Negate,
        Token::Plus => UnaryOperator::Plus,
        _ => return parse_postfix(tokens),
    };
    tokens.next();

    let operand = ensure_sufficient_stack(|| parse_unary(tokens))?;
    Ok(Expr::Unary { op,
                     operand: Box::new(operand),
                     line: *line })
}

/// Parses indexing and method calls applied to a primary expression.
///
/// Postfix operators are left associative, so `rows[0].size()` indexes first
/// and then calls `size` on the element.
///
/// Grammar: `postfix := primary ("[" expression "]" | "." identifier "(" arguments ")")*`
///
/// # Errors
/// Returns a `ParseError` if a bracket is left open or a method name is not
/// followed by an argument list.
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;

    loop {
        match tokens.peek().copied() {
            Some((Token::LBracket, line)) => {
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket)?;

                expr = Expr::Index { target: Box::new(expr),
                                     index:  Box::new(index),
                                     line:   *line, };
            },
            Some((Token::Dot, line)) => {
                tokens.next();
                let method = parse_identifier(tokens)?;
                expect(tokens, &Token::LParen)?;
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;

                expr = Expr::MethodCall { target: Box::new(expr),
                                          method,
                                          arguments,
                                          line: *line };
            },
            _ => return Ok(expr),
        }
    }
}

/// Parses a primary expression.
///
/// Primary expressions are literals, names, calls, list constructions and
/// parenthesized expressions.
///
/// A dotted name whose first segment starts with an upper-case letter, such
/// as `Console.WriteLine`, is a qualified callee and produces a single
/// `Expr::Call` carrying the whole dotted name. Lower-case receivers go
/// through [`parse_postfix`] as method calls instead.
///
/// # Errors
/// Returns a `ParseError` for any token that cannot begin an expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    match token {
        Token::Integer(value) => {
            tokens.next();
            Ok(Expr::IntLiteral { value: *value,
                                  line })
        },
        Token::Str(value) => {
            tokens.next();
            Ok(Expr::StringLiteral { value: value.clone(),
                                     line })
        },
        Token::Bool(value) => {
            tokens.next();
            Ok(Expr::BoolLiteral { value: *value,
                                   line })
        },
        Token::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },
        Token::LBracket => {
            tokens.next();
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::ListLiteral { elements, line })
        },
        Token::New => parse_new_list(tokens),
        Token::TypeList => {
            parse_type(tokens)?;
            expect(tokens, &Token::LParen)?;
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            Ok(Expr::Call { callee: "List".to_string(),
                            arguments,
                            line })
        },
        Token::Identifier(name) => {
            tokens.next();

            if starts_with_uppercase(name) && next_is_member(tokens) {
                let mut callee = name.clone();
                while next_is_member(tokens) {
                    tokens.next();
                    callee.push('.');
                    callee.push_str(&parse_identifier(tokens)?);
                }
                expect(tokens, &Token::LParen)?;
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                return Ok(Expr::Call { callee, arguments, line });
            }

            if consume_if(tokens, &Token::LParen) {
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                return Ok(Expr::Call { callee: name.clone(),
                                       arguments,
                                       line });
            }

            Ok(Expr::Identifier { name: name.clone(),
                                  line })
        },
        other => Err(unexpected(other, line)),
    }
}

/// Parses `new List<T>()`, `new List<T> { a, b }` or `new List<T>() { a, b }`.
///
/// The generic arguments are discarded; the result is an `Expr::ListLiteral`.
fn parse_new_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::New)?;

    let type_line = tokens.peek().map_or(line, |(_, l)| *l);
    let ty = parse_type(tokens)?;
    if !matches!(ty, TypeName::List(_)) {
        return Err(ParseError::ExpectedToken { expected: "'List' after 'new'".to_string(),
                                               found:    ty.to_string(),
                                               line:     type_line, });
    }

    let has_parens = consume_if(tokens, &Token::LParen);
    if has_parens {
        expect(tokens, &Token::RParen)?;
    }

    let elements = if consume_if(tokens, &Token::LBrace) {
        parse_comma_separated(tokens, parse_expression, &Token::RBrace)?
    } else if has_parens {
        Vec::new()
    } else {
        let (found, found_line) = tokens.peek().map_or_else(|| (Token::Eof.to_string(), line),
                                                           |(t, l)| (t.to_string(), *l));
        return Err(ParseError::ExpectedToken { expected: "'(' or '{'".to_string(),
                                               found,
                                               line: found_line });
    };

    Ok(Expr::ListLiteral { elements, line })
}

/// Returns `true` if the next two tokens are `.` and an identifier.
fn next_is_member<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    matches!(lookahead.next(), Some((Token::Dot, _)))
    && matches!(lookahead.next(), Some((Token::Identifier(_), _)))
}

fn starts_with_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
