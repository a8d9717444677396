use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{lexer::Token, parser::binary::parse_logical_or},
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    ensure_sufficient_stack(|| parse_assignment(tokens))
}

/// Parses an assignment or compound assignment.
///
/// Assignment is right associative: `a = b = 1` assigns `1` to `b`, then to
/// `a`. Compound operators are rewritten into a plain assignment of a binary
/// expression, so `x += 2` becomes `x = x + 2`.
///
/// Grammar: `assignment := logical_or (("=" | "+=" | "-=" | "*=" | "/=" | "%=") assignment)?`
///
/// # Errors
/// Returns `InvalidAssignmentTarget` if the left side is not a variable or an
/// index expression.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_logical_or(tokens)?;

    let Some((token, line)) = tokens.peek().copied() else {
        return Ok(target);
    };
    let compound = match token {
        Token::Equals => None,
        Token::PlusAssign => Some(BinaryOperator::Add),
        Token::MinusAssign => Some(BinaryOperator::Sub),
        Token::MulAssign => Some(BinaryOperator::Mul),
        Token::DivAssign => Some(BinaryOperator::Div),
        Token::ModAssign => Some(BinaryOperator::Mod),
        _ => return Ok(target),
    };

    if !target.is_assignable() {
        return Err(ParseError::InvalidAssignmentTarget { line: *line });
    }
    tokens.next();

    let value = ensure_sufficient_stack(|| parse_assignment(tokens))?;
    let value = match compound {
        Some(op) => Expr::Binary { op,
                                   left: Box::new(target.clone()),
                                   right: Box::new(value),
                                   line: *line },
        None => value,
    };

    Ok(Expr::Assign { target: Box::new(target),
                      value:  Box::new(value),
                      line:   *line, })
}
