use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef, Param, Statement, TypeName},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_block_statements},
            core::{ParseResult, parse_expression},
            types::{parse_type, starts_declaration, starts_function},
            utils::{consume_if, expect, parse_comma_separated, parse_identifier, peek_line},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a block (`{ ... }`),
/// - `if`, `while`, `for` or `foreach`,
/// - `return`,
/// - a nested function declaration,
/// - a variable declaration,
/// - an expression followed by `;`.
///
/// The construct is chosen from the leading token. Declarations are told
/// apart from expressions by lookahead: `<type> <name>` starts a declaration
/// and `<type> <name> (` starts a function.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns the first syntax violation; parsing never resynchronizes.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    ensure_sufficient_stack(|| parse_statement_inner(tokens))
}

fn parse_statement_inner<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };

    match token {
        Token::LBrace => parse_block(tokens),
        Token::If => parse_if(tokens),
        Token::While => parse_while(tokens),
        Token::For => parse_for(tokens),
        Token::Foreach => parse_foreach(tokens),
        Token::Return => parse_return(tokens),
        Token::Eof => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        _ if starts_function(tokens) => parse_function_declaration(tokens),
        // A scalar type keyword can only start a declaration, so a bad name
        // after it is reported there rather than as an expression.
        _ if is_scalar_type(token) || starts_declaration(tokens) => {
            let declaration = parse_variable_declaration(tokens)?;
            expect(tokens, &Token::Semicolon)?;
            Ok(declaration)
        },
        _ => parse_expression_statement(tokens),
    }
}

const fn is_scalar_type(token: &Token) -> bool {
    matches!(token,
             Token::Var | Token::TypeInt | Token::TypeBool | Token::TypeString | Token::TypeVoid)
}

/// Parses `<expression> ;`.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens);
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::Expression { expr, line })
}

/// Parses `<type> <name> (= <expression>)?` without the trailing `;`.
///
/// A `var` declaration must have an initializer; every other type may omit
/// it, in which case the evaluator binds the type's default value.
///
/// # Errors
/// Returns `MissingInitializer` for `var name` with no `=`.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens);
    let ty = parse_type(tokens)?;
    let name = parse_identifier(tokens)?;

    let initializer = if consume_if(tokens, &Token::Equals) {
        Some(parse_expression(tokens)?)
    } else if ty == TypeName::Var {
        return Err(ParseError::MissingInitializer { name, line });
    } else {
        None
    };

    Ok(Statement::VarDecl { ty,
                            name,
                            initializer,
                            line })
}

/// Parses a function declaration.
///
/// Grammar: `function := type identifier "(" (param ("," param)*)? ")" block`
///
/// The same rule serves top-level functions and functions nested in a block.
pub(in crate::interpreter::parser) fn parse_function_declaration<'a, I>(
    tokens: &mut Peekable<I>)
    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens);
    let return_type = parse_type(tokens)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_param, &Token::RParen)?;
    let (body, _) = parse_block_statements(tokens)?;

    tracing::trace!(function = %name, params = params.len(), line, "parsed function declaration");

    Ok(Statement::FunctionDecl(Rc::new(FunctionDef { return_type,
                                                     name,
                                                     params,
                                                     body,
                                                     line })))
}

/// Parses one parameter, either `<type> <name>` or a bare `<name>`.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let ty = if starts_declaration(tokens) { parse_type(tokens)? } else { TypeName::Var };
    let name = parse_identifier(tokens)?;

    Ok(Param { ty, name })
}

/// Parses `if (condition) statement (else statement)?`.
///
/// An `else` binds to the nearest `if` that has none, which falls out of the
/// recursion: the inner `if` consumes it first.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::If)?;
    let condition = parse_condition(tokens)?;
    let then_branch = Box::new(parse_statement(tokens)?);
    let else_branch = if consume_if(tokens, &Token::Else) {
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses `while (condition) statement`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::While)?;
    let condition = parse_condition(tokens)?;
    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::While { condition, body, line })
}

/// Parses `for (init; condition; step) statement`.
///
/// Each clause may be empty. The initializer is either a declaration or an
/// expression; the step is an expression.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::For)?;
    expect(tokens, &Token::LParen)?;

    let init = if consume_if(tokens, &Token::Semicolon) {
        None
    } else if starts_declaration(tokens) {
        let declaration = parse_variable_declaration(tokens)?;
        expect(tokens, &Token::Semicolon)?;
        Some(Box::new(declaration))
    } else {
        Some(Box::new(parse_expression_statement(tokens)?))
    };

    let condition = if matches!(tokens.peek(), Some((Token::Semicolon, _))) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, &Token::Semicolon)?;

    let step = if matches!(tokens.peek(), Some((Token::RParen, _))) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, &Token::RParen)?;

    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::For { init,
                        condition,
                        step,
                        body,
                        line })
}

/// Parses `foreach (var name in iterable) statement`.
///
/// The loop variable's type is optional and ignored: `foreach (x in xs)`,
/// `foreach (var x in xs)` and `foreach (int x in xs)` are equivalent.
fn parse_foreach<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Foreach)?;
    expect(tokens, &Token::LParen)?;

    if starts_declaration(tokens) {
        parse_type(tokens)?;
    }
    let var = parse_identifier(tokens)?;
    expect(tokens, &Token::In)?;
    let iterable = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::Foreach { var,
                            iterable,
                            body,
                            line })
}

/// Parses `return;` or `return expression;`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Return)?;
    let value = if consume_if(tokens, &Token::Semicolon) {
        None
    } else {
        let value = parse_expression(tokens)?;
        expect(tokens, &Token::Semicolon)?;
        Some(value)
    };

    Ok(Statement::Return { value, line })
}

/// Parses a parenthesized condition.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    Ok(condition)
}
