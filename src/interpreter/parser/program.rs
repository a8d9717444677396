use std::iter::Peekable;

use crate::{
    ast::{Program, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{check_nesting, expect, parse_identifier},
        },
    },
};

/// Parses a whole source unit.
///
/// A program is a sequence of top-level items: `using` directives,
/// `namespace` blocks, function declarations and global statements, in any
/// order. Parsing stops at the end-of-input token.
///
/// Grammar: `program := item* EOF`
///
/// # Parameters
/// - `tokens`: The full token list produced by the lexer, ending in `Eof`.
///
/// # Returns
/// The parsed [`Program`].
///
/// # Errors
/// Returns the first syntax error; no recovery is attempted.
///
/// # Example
/// ```
/// use cshs::interpreter::{lexer::tokenize, parser::parse_program};
///
/// let tokens = tokenize("using System;\nint Main() { return 0; }").unwrap();
/// let program = parse_program(&tokens).unwrap();
/// assert_eq!(program.items.len(), 2);
/// assert_eq!(program.end_line, 2);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    check_nesting(tokens)?;

    let mut iter = tokens.iter().peekable();
    let mut items = Vec::new();

    let end_line = loop {
        match iter.peek() {
            Some((Token::Eof, line)) => break *line,
            None => break tokens.last().map_or(1, |(_, l)| *l),
            Some(_) => items.push(parse_item(&mut iter)?),
        }
    };

    tracing::debug!(items = items.len(), end_line, "parsed program");
    Ok(Program { items, end_line })
}

/// Parses one top-level item.
fn parse_item<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Using, _)) => parse_using(tokens),
        Some((Token::Namespace, _)) => parse_namespace(tokens),
        _ => parse_statement(tokens),
    }
}

/// Parses `using A.B.C;`.
fn parse_using<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Using)?;
    let path = parse_dotted_name(tokens)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::Using { path, line })
}

/// Parses `namespace A.B { item* }`.
///
/// Namespaces may nest. Their names are kept in the tree but never used for
/// resolution.
fn parse_namespace<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Namespace)?;
    let name = parse_dotted_name(tokens)?;
    expect(tokens, &Token::LBrace)?;

    let mut items = Vec::new();
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
            Some(_) => items.push(parse_item(tokens)?),
        }
    }

    Ok(Statement::Namespace { name, items, line })
}

fn parse_dotted_name<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut name = parse_identifier(tokens)?;
    while let Some((Token::Dot, _)) = tokens.peek() {
        tokens.next();
        name.push('.');
        name.push_str(&parse_identifier(tokens)?);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::Expr, interpreter::lexer::tokenize};

    fn parse(source: &str) -> ParseResult<Program> {
        parse_program(&tokenize(source).unwrap())
    }

    #[test]
    fn namespaces_and_dotted_usings_are_accepted() {
        let program = parse("using System.Collections.Generic;\n\
                             namespace Demo.App {\n\
                               void Main() { }\n\
                             }\n")
                .unwrap();

        assert_eq!(program.items.len(), 2);
        let Statement::Using { path, .. } = &program.items[0] else {
            panic!("expected using");
        };
        assert_eq!(path, "System.Collections.Generic");
        let Statement::Namespace { name, items, line } = &program.items[1] else {
            panic!("expected namespace");
        };
        assert_eq!(name, "Demo.App");
        assert_eq!(*line, 2);
        assert!(matches!(items[0], Statement::FunctionDecl(_)));
    }

    #[test]
    fn qualified_calls_keep_the_dotted_callee() {
        let program = parse("Console.WriteLine(1);").unwrap();
        let Statement::Expression { expr: Expr::Call { callee, arguments, .. }, .. } =
            &program.items[0]
        else {
            panic!("expected call");
        };
        assert_eq!(callee, "Console.WriteLine");
        assert_eq!(arguments.len(), 1);
    }

    #[test]
    fn lower_case_receivers_are_method_calls() {
        let program = parse("xs.push_back(1);").unwrap();
        assert!(matches!(&program.items[0],
                         Statement::Expression { expr: Expr::MethodCall { method, .. }, .. }
                         if method == "push_back"));
    }

    #[test]
    fn parsing_is_deterministic() {
        let source = "int F(int n) { if (n < 2) return n; return F(n - 1) + F(n - 2); }";
        assert_eq!(parse(source), parse(source));
    }

    #[test]
    fn unclosed_namespace_reports_end_of_input() {
        assert_eq!(parse("namespace A {\nvoid Main() { }\n"),
                   Err(ParseError::UnexpectedEndOfInput { line: 3 }));
    }
}
