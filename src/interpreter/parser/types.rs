use std::iter::Peekable;

use crate::{
    ast::TypeName,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            utils::{consume_if, parse_comma_separated},
        },
    },
};

/// Parses a type annotation.
///
/// Accepts the built-in type keywords, `List` with optional generic arguments
/// (`List<int>`, `List<List<string>>`) and any identifier, which becomes a
/// [`TypeName::Named`]. Types are never checked, so the arguments are kept
/// only for display.
///
/// Grammar: `type := "var" | "int" | "bool" | "string" | "void"
///                 | "List" ("<" type ("," type)* ">")? | identifier`
///
/// # Errors
/// Returns `ExpectedToken` if the next token cannot start a type.
pub fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeName>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Var, _)) => Ok(TypeName::Var),
        Some((Token::TypeInt, _)) => Ok(TypeName::Int),
        Some((Token::TypeBool, _)) => Ok(TypeName::Bool),
        Some((Token::TypeString, _)) => Ok(TypeName::String),
        Some((Token::TypeVoid, _)) => Ok(TypeName::Void),
        Some((Token::TypeList, _)) => {
            let arguments = if consume_if(tokens, &Token::Less) {
                parse_comma_separated(tokens, parse_type, &Token::Greater)?
            } else {
                Vec::new()
            };
            Ok(TypeName::List(arguments))
        },
        Some((Token::Identifier(name), _)) => Ok(TypeName::Named(name.clone())),
        Some((Token::Eof, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) => Err(ParseError::ExpectedToken { expected: "type".to_string(),
                                                             found:    tok.to_string(),
                                                             line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Returns `true` if the tokens ahead read as `<type> <identifier>`.
///
/// The check runs on a clone of the stream, so nothing is consumed. It is
/// what separates `List<int> xs = ...;` from the expression `a < b`.
pub fn starts_declaration<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    parse_type(&mut lookahead).is_ok()
    && matches!(lookahead.next(), Some((Token::Identifier(_), _)))
}

/// Returns `true` if the tokens ahead read as `<type> <identifier> (`.
pub fn starts_function<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    parse_type(&mut lookahead).is_ok()
    && matches!(lookahead.next(), Some((Token::Identifier(_), _)))
    && matches!(lookahead.next(), Some((Token::LParen, _)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn type_of(source: &str) -> TypeName {
        let tokens = tokenize(source).unwrap();
        parse_type(&mut tokens.iter().peekable()).unwrap()
    }

    #[test]
    fn nested_generics_close_on_separate_angles() {
        assert_eq!(type_of("List<List<int>>"),
                   TypeName::List(vec![TypeName::List(vec![TypeName::Int])]));
        assert_eq!(type_of("List"), TypeName::List(vec![]));
        assert_eq!(type_of("Widget"), TypeName::Named("Widget".to_string()));
    }

    #[test]
    fn declaration_lookahead_does_not_consume() {
        let tokens = tokenize("int total = 0;").unwrap();
        let stream = tokens.iter().peekable();
        assert!(starts_declaration(&stream));
        assert!(!starts_function(&stream));

        let tokens = tokenize("a < b;").unwrap();
        assert!(!starts_declaration(&tokens.iter().peekable()));

        let tokens = tokenize("void Main() {}").unwrap();
        assert!(starts_function(&tokens.iter().peekable()));
    }
}
