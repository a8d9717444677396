use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses one left-associative precedence level.
///
/// `operand` parses the next-higher level and `operator` maps the tokens that
/// belong to this level to their operator.
///
/// Grammar: `level := operand (op operand)*`
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>,
                                 operator: impl Fn(&Token) -> Option<BinaryOperator>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = operand(tokens)?;

    while let Some((token, line)) = tokens.peek().copied()
          && let Some(op) = operator(token)
    {
        tokens.next();
        let right = operand(tokens)?;
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              line: *line };
    }

    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_logical_and, |token| match token {
        Token::PipePipe => Some(BinaryOperator::Or),
        _ => None,
    })
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_equality, |token| match token {
        Token::AmpAmp => Some(BinaryOperator::And),
        _ => None,
    })
}

/// Parses equality comparisons.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_relational, |token| match token {
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    })
}

/// Parses relational comparisons.
///
/// The rule is: `relational := additive (("<" | "<=" | ">" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_additive, |token| match token {
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    })
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_multiplicative, |token| match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        _ => None,
    })
}

/// Parses multiplication, division and remainder expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_unary, |token| match token {
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        _ => None,
    })
}
